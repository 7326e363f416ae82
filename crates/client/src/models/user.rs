//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use harvest_trail_core::{Email, SupplierCode, UserId, UserRole};

/// A supply-chain participant.
///
/// Farmer and distributor accounts carry the 3-digit custody code partners
/// quote to each other when transferring crops; other roles have neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Role within the supply chain.
    pub role: UserRole,
    /// Display name, if the user provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text location, if the user provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Custody code for farmer accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_code: Option<SupplierCode>,
    /// Custody code for distributor accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_code: Option<SupplierCode>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The custody code this account quotes to partners, if it has one.
    #[must_use]
    pub const fn supplier_code(&self) -> Option<&SupplierCode> {
        match self.role {
            UserRole::Farmer => self.farmer_code.as_ref(),
            UserRole::Distributor => self.distributor_code.as_ref(),
            _ => None,
        }
    }

    /// Display name, falling back to the empty string.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Details for creating a new account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: Email,
    pub password: String,
    pub role: UserRole,
    pub name: Option<String>,
    pub location: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> User {
        User {
            id: UserId::new(1),
            email: Email::parse("u@example.com").unwrap(),
            role,
            name: None,
            location: None,
            farmer_code: Some(SupplierCode::parse("111").unwrap()),
            distributor_code: Some(SupplierCode::parse("222").unwrap()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_supplier_code_follows_role() {
        assert_eq!(user(UserRole::Farmer).supplier_code().unwrap().as_str(), "111");
        assert_eq!(
            user(UserRole::Distributor).supplier_code().unwrap().as_str(),
            "222"
        );
        assert!(user(UserRole::Retailer).supplier_code().is_none());
        assert!(user(UserRole::Admin).supplier_code().is_none());
    }
}
