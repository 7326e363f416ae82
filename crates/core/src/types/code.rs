//! Supplier custody codes.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`SupplierCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SupplierCodeError {
    /// The input is not exactly three characters long.
    #[error("supplier code must be exactly 3 digits")]
    Length,
    /// The input contains a non-digit character.
    #[error("supplier code must contain only digits")]
    NonDigit,
}

/// A 3-digit custody code identifying a farmer or distributor.
///
/// Partners quote these codes to each other when transferring crops: a
/// distributor types a farmer's code to pull that farmer's inventory. The
/// remote service assigns one per farmer/distributor account at
/// registration; the local store assigns one from the 100-999 range when
/// registering offline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SupplierCode(String);

impl SupplierCode {
    /// Parse a `SupplierCode` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is exactly three ASCII digits.
    pub fn parse(s: &str) -> Result<Self, SupplierCodeError> {
        if s.len() != 3 {
            return Err(SupplierCodeError::Length);
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SupplierCodeError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Draw a fresh code from the 100-999 range.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(100..=999_u16).to_string())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SupplierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SupplierCode {
    type Err = SupplierCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(SupplierCode::parse("042").unwrap().as_str(), "042");
        assert_eq!(SupplierCode::parse("999").unwrap().as_str(), "999");
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            SupplierCode::parse("42"),
            Err(SupplierCodeError::Length)
        ));
        assert!(matches!(
            SupplierCode::parse("1234"),
            Err(SupplierCodeError::Length)
        ));
        assert!(matches!(SupplierCode::parse(""), Err(SupplierCodeError::Length)));
    }

    #[test]
    fn test_parse_non_digit() {
        assert!(matches!(
            SupplierCode::parse("12a"),
            Err(SupplierCodeError::NonDigit)
        ));
        assert!(matches!(
            SupplierCode::parse("1 2"),
            Err(SupplierCodeError::NonDigit)
        ));
    }

    #[test]
    fn test_generate_in_range() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let code = SupplierCode::generate(&mut rng);
            let value: u16 = code.as_str().parse().unwrap();
            assert!((100..=999).contains(&value), "out of range: {code}");
        }
    }

    #[test]
    fn test_serde_transparent() {
        let code = SupplierCode::parse("123").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"123\"");
    }
}
