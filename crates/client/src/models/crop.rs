//! Crop domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use harvest_trail_core::{CropId, Freshness, SupplyStage, UserId};

/// Origin-of-custody details stamped onto a crop at the farmer stage.
///
/// Codes inside provenance blocks are kept as the raw strings the service
/// reported; validated [`harvest_trail_core::SupplierCode`]s are only
/// required where a code is typed in as input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerInfo {
    /// Custody code of the originating farmer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Farmer display name (may be empty for legacy records).
    pub name: String,
    /// Farm location.
    pub location: String,
}

/// Custody details added when a distributor receives a crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributorInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub name: String,
    pub location: String,
    /// Date the distributor took custody. Absent on records where only the
    /// downstream stage carries a received date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_date: Option<NaiveDate>,
}

/// Custody details added when a retailer receives a crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailerInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location: String,
    /// Date the retailer took custody.
    pub received_date: NaiveDate,
}

/// A tracked agricultural product instance.
///
/// Custody stage is not modeled as a state machine; it is inferred from
/// which of the optional provenance blocks are populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    /// Unique crop ID.
    pub id: CropId,
    /// Owning user, when known. Records from some service endpoints omit
    /// the owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub name: String,
    pub crop_type: String,
    pub harvest_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub soil_type: String,
    pub pesticides_used: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_info: Option<FarmerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_info: Option<DistributorInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retailer_info: Option<RetailerInfo>,
}

impl Crop {
    /// Current custody stage, inferred from the populated provenance blocks.
    #[must_use]
    pub const fn stage(&self) -> SupplyStage {
        if self.retailer_info.is_some() {
            SupplyStage::Retailer
        } else if self.distributor_info.is_some() {
            SupplyStage::Distributor
        } else {
            SupplyStage::Farmer
        }
    }

    /// Freshness classification against a reference day.
    #[must_use]
    pub fn freshness(&self, today: NaiveDate) -> Freshness {
        Freshness::classify(self.expiry_date, today)
    }

    /// True when all three custody stages are recorded.
    #[must_use]
    pub const fn has_full_chain(&self) -> bool {
        self.farmer_info.is_some() && self.distributor_info.is_some() && self.retailer_info.is_some()
    }
}

/// The writable subset of a crop, used for create and update operations.
#[derive(Debug, Clone)]
pub struct CropDraft {
    pub name: String,
    pub crop_type: String,
    pub harvest_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub soil_type: String,
    /// Defaults to `"Not specified"` when absent.
    pub pesticides_used: Option<String>,
    pub image_url: Option<String>,
    /// Overrides the acting user's location in the provenance stamp.
    pub location: Option<String>,
}

impl CropDraft {
    /// The pesticide note, defaulted the way the service expects.
    #[must_use]
    pub fn pesticides_or_default(&self) -> String {
        self.pesticides_used
            .clone()
            .unwrap_or_else(|| "Not specified".to_string())
    }
}
