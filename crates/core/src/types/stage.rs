//! Supply-chain stage and freshness classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Custody stage of a crop, inferred from which provenance blocks are
/// populated (a crop with no blocks at all is still at the farmer stage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyStage {
    Farmer,
    Distributor,
    Retailer,
}

impl std::fmt::Display for SupplyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Farmer => write!(f, "farmer"),
            Self::Distributor => write!(f, "distributor"),
            Self::Retailer => write!(f, "retailer"),
        }
    }
}

/// Freshness of a crop relative to a reference date.
///
/// Classification follows the badge rule: a crop expiring today still has
/// zero days left and counts as expiring soon, not expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Freshness {
    /// More than a week until expiry.
    Fresh,
    /// At most a week until expiry.
    ExpiringSoon {
        /// Whole days until expiry (0-7).
        days_left: i64,
    },
    /// Expiry date has passed.
    Expired,
}

impl Freshness {
    /// Classify an expiry date against a reference day.
    #[must_use]
    pub fn classify(expiry: NaiveDate, today: NaiveDate) -> Self {
        let days_left = (expiry - today).num_days();

        if days_left < 0 {
            Self::Expired
        } else if days_left <= 7 {
            Self::ExpiringSoon { days_left }
        } else {
            Self::Fresh
        }
    }

    /// True unless the crop has expired.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        !matches!(self, Self::Expired)
    }
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fresh => write!(f, "fresh"),
            Self::ExpiringSoon { days_left } => write!(f, "expiring in {days_left}d"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_fresh() {
        let today = date(2024, 6, 1);
        assert_eq!(Freshness::classify(date(2024, 6, 9), today), Freshness::Fresh);
    }

    #[test]
    fn test_classify_expiring_soon_boundaries() {
        let today = date(2024, 6, 1);
        assert_eq!(
            Freshness::classify(date(2024, 6, 8), today),
            Freshness::ExpiringSoon { days_left: 7 }
        );
        // Expiring today is not yet expired.
        assert_eq!(
            Freshness::classify(today, today),
            Freshness::ExpiringSoon { days_left: 0 }
        );
    }

    #[test]
    fn test_classify_expired() {
        let today = date(2024, 6, 1);
        assert_eq!(Freshness::classify(date(2024, 5, 31), today), Freshness::Expired);
        assert!(!Freshness::classify(date(2024, 5, 31), today).is_usable());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(SupplyStage::Distributor.to_string(), "distributor");
    }
}
