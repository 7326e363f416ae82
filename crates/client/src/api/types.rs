//! Wire types for the remote service.
//!
//! The service speaks flat camelCase JSON; the domain model is snake_case
//! with nested provenance blocks. These structs mirror the wire exactly and
//! never leak past [`super::conversions`].

use serde::{Deserialize, Serialize};

/// `POST /auth/login` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/register` request body. `role` is SCREAMING_SNAKE.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub location: String,
    pub role: String,
}

/// Response body of both auth endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub id: i64,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub farmer_id: Option<String>,
    #[serde(default)]
    pub distributor_id: Option<String>,
}

/// The owner object embedded in some crop records.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub farmer_id: Option<String>,
    #[serde(default)]
    pub distributor_id: Option<String>,
}

/// A crop as the service reports it.
///
/// One flat shape covers all custody stages: farmer records carry the
/// `farmer*` fields, distributor records add `distributor*` plus the
/// `receivedFromFarmer*` context, retailer records add `retailer*` plus the
/// `receivedFromDistributor*` context. `receivedDate` always belongs to the
/// record's own (latest) stage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecord {
    pub id: i64,
    #[serde(default)]
    pub user: Option<OwnerRecord>,
    pub name: String,
    pub crop_type: String,
    pub harvest_date: String,
    pub expiry_date: String,
    pub soil_type: String,
    #[serde(default)]
    pub pesticides_used: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub farmer_id: Option<String>,
    #[serde(default)]
    pub farmer_name: Option<String>,
    #[serde(default)]
    pub farmer_location: Option<String>,

    #[serde(default)]
    pub distributor_id: Option<String>,
    #[serde(default)]
    pub distributor_name: Option<String>,
    #[serde(default)]
    pub distributor_location: Option<String>,
    #[serde(default)]
    pub received_from_farmer_id: Option<String>,
    #[serde(default)]
    pub received_from_farmer_name: Option<String>,

    #[serde(default)]
    pub retailer_id: Option<String>,
    #[serde(default)]
    pub retailer_name: Option<String>,
    #[serde(default)]
    pub retailer_location: Option<String>,
    #[serde(default)]
    pub received_from_distributor_id: Option<String>,
    #[serde(default)]
    pub received_from_distributor_name: Option<String>,

    #[serde(default)]
    pub received_date: Option<String>,
}

/// Request body for crop create/update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropPayload {
    pub name: String,
    pub crop_type: String,
    pub harvest_date: String,
    pub expiry_date: String,
    pub soil_type: String,
    pub pesticides_used: String,
    pub image_url: String,
    pub farmer_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farmer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farmer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distributor_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_date: Option<String>,
}

/// A user as `GET /admin/users` reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub farmer_id: Option<String>,
    #[serde(default)]
    pub distributor_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_record_decodes_camel_case() {
        let json = r#"{
            "id": 7,
            "user": {"id": 3, "name": "Ann", "farmerId": "123"},
            "name": "Tomatoes",
            "cropType": "Vegetable",
            "harvestDate": "2024-05-01",
            "expiryDate": "2024-05-20",
            "soilType": "Loam",
            "pesticidesUsed": "None",
            "imageUrl": "http://img.example/t.jpg",
            "createdAt": "2024-05-01T08:30:00",
            "farmerLocation": "North Field"
        }"#;

        let record: CropRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.crop_type, "Vegetable");
        assert_eq!(record.user.unwrap().farmer_id.as_deref(), Some("123"));
        assert_eq!(record.farmer_location.as_deref(), Some("North Field"));
        assert!(record.distributor_location.is_none());
    }

    #[test]
    fn test_crop_record_ignores_unmodeled_fields() {
        // The service also reports stock-keeping fields; they are not part
        // of the tracked model and must not break decoding.
        let json = r#"{
            "id": 1,
            "name": "Corn",
            "cropType": "Grain",
            "harvestDate": "2024-09-01",
            "expiryDate": "2024-10-01",
            "soilType": "Silt",
            "quantity": 12.5,
            "quantityUnit": "kg",
            "pricePerUnit": 3.2,
            "status": "IN_STOCK"
        }"#;

        let record: CropRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Corn");
    }

    #[test]
    fn test_payload_serializes_camel_case_and_skips_none() {
        let payload = CropPayload {
            name: "Corn".to_string(),
            crop_type: "Grain".to_string(),
            harvest_date: "2024-09-01".to_string(),
            expiry_date: "2024-10-01".to_string(),
            soil_type: "Silt".to_string(),
            pesticides_used: "Not specified".to_string(),
            image_url: String::new(),
            farmer_location: "West Farm".to_string(),
            farmer_id: None,
            farmer_name: None,
            distributor_location: None,
            received_date: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["cropType"], "Grain");
        assert_eq!(json["farmerLocation"], "West Farm");
        assert!(json.get("farmerId").is_none());
        assert!(json.get("distributorLocation").is_none());
    }
}
