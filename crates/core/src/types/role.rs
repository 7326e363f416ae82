//! Account roles.

use serde::{Deserialize, Serialize};

/// Role of an account within the supply chain.
///
/// The remote service speaks SCREAMING_SNAKE on the wire (`"FARMER"`) and
/// scopes crop endpoints by a lowercase path segment (`/farmer/crops`);
/// stored records and display output use the lowercase form throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Grows crops and originates custody.
    Farmer,
    /// Receives crops from farmers.
    Distributor,
    /// Receives crops from distributors.
    Retailer,
    /// End of the chain; purchase history only.
    Consumer,
    /// Manages users and views aggregate statistics.
    Admin,
}

impl UserRole {
    /// All roles, in supply-chain order.
    pub const ALL: [Self; 5] = [
        Self::Farmer,
        Self::Distributor,
        Self::Retailer,
        Self::Consumer,
        Self::Admin,
    ];

    /// The wire form the remote service expects (`"FARMER"`).
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Farmer => "FARMER",
            Self::Distributor => "DISTRIBUTOR",
            Self::Retailer => "RETAILER",
            Self::Consumer => "CONSUMER",
            Self::Admin => "ADMIN",
        }
    }

    /// The lowercase path segment for role-scoped endpoints.
    #[must_use]
    pub const fn as_path_segment(self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Distributor => "distributor",
            Self::Retailer => "retailer",
            Self::Consumer => "consumer",
            Self::Admin => "admin",
        }
    }

    /// Parse the remote service's wire form. Case-insensitive, since stored
    /// sessions may carry either casing.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected input.
    pub fn from_wire(s: &str) -> Result<Self, String> {
        s.parse()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path_segment())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "farmer" => Ok(Self::Farmer),
            "distributor" => Ok(Self::Distributor),
            "retailer" => Ok(Self::Retailer),
            "consumer" => Ok(Self::Consumer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
