//! Conversions between wire shapes and domain types.
//!
//! This module owns the bidirectional field-name transformation: the flat
//! camelCase records of the service become snake_case domain types with
//! nested provenance blocks, and drafts become outbound payloads with the
//! farmer identity stamped the way the service expects.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use harvest_trail_core::{CropId, Email, SupplierCode, UserId, UserRole};

use super::ApiError;
use super::types::{AuthResponse, CropPayload, CropRecord, UserRecord};
use crate::models::{Crop, CropDraft, DistributorInfo, FarmerInfo, RetailerInfo, User};

/// Build the session user out of an auth response.
///
/// The auth endpoints do not report a creation timestamp, so the session
/// user is stamped with the current time.
pub(crate) fn user_from_auth(response: &AuthResponse) -> Result<User, ApiError> {
    Ok(User {
        id: UserId::new(response.id),
        email: parse_email(&response.email)?,
        role: parse_role(&response.role)?,
        name: response.name.clone(),
        location: response.location.clone(),
        farmer_code: parse_code(response.farmer_id.as_deref()),
        distributor_code: parse_code(response.distributor_id.as_deref()),
        created_at: Utc::now(),
    })
}

/// Build a domain user out of an admin directory record.
pub(crate) fn user_from_record(record: UserRecord) -> Result<User, ApiError> {
    Ok(User {
        id: UserId::new(record.id),
        email: parse_email(&record.email)?,
        role: parse_role(&record.role)?,
        name: record.name,
        location: record.location,
        farmer_code: parse_code(record.farmer_id.as_deref()),
        distributor_code: parse_code(record.distributor_id.as_deref()),
        created_at: parse_timestamp(record.created_at.as_deref()),
    })
}

/// Build a domain crop out of a wire record.
///
/// Provenance blocks are assembled from the flat stage fields: the farmer
/// block exists whenever a farmer location is present (names and codes fall
/// back to the embedded owner), and the shared `receivedDate` belongs to
/// the record's own stage - the retailer block when one exists, the
/// distributor block otherwise.
pub(crate) fn crop_from_record(record: CropRecord) -> Result<Crop, ApiError> {
    let harvest_date = parse_date("harvestDate", &record.harvest_date)?;
    let expiry_date = parse_date("expiryDate", &record.expiry_date)?;

    let received_date = record
        .received_date
        .as_deref()
        .map(|s| parse_date("receivedDate", s))
        .transpose()?;

    let owner = record.user.as_ref();

    let farmer_info = record.farmer_location.clone().map(|location| FarmerInfo {
        code: record
            .farmer_id
            .clone()
            .or_else(|| record.received_from_farmer_id.clone())
            .or_else(|| owner.and_then(|o| o.farmer_id.clone())),
        name: record
            .farmer_name
            .clone()
            .or_else(|| record.received_from_farmer_name.clone())
            .or_else(|| owner.and_then(|o| o.name.clone()))
            .unwrap_or_default(),
        location,
    });

    let retailer_info = match (record.retailer_location.clone(), received_date) {
        (Some(location), Some(date)) => Some(RetailerInfo {
            code: record.retailer_id.clone(),
            name: record.retailer_name.clone(),
            location,
            received_date: date,
        }),
        _ => None,
    };

    let distributor_info = record.distributor_location.clone().map(|location| DistributorInfo {
        code: record
            .distributor_id
            .clone()
            .or_else(|| record.received_from_distributor_id.clone()),
        name: record
            .distributor_name
            .clone()
            .or_else(|| record.received_from_distributor_name.clone())
            .unwrap_or_default(),
        location,
        // On retailer records the received date is the retailer's.
        received_date: if retailer_info.is_some() { None } else { received_date },
    });

    Ok(Crop {
        id: CropId::new(record.id),
        user_id: owner.map(|o| UserId::new(o.id)),
        name: record.name,
        crop_type: record.crop_type,
        harvest_date,
        expiry_date,
        soil_type: record.soil_type,
        pesticides_used: record
            .pesticides_used
            .unwrap_or_else(|| "Not specified".to_string()),
        image_url: record.image_url.filter(|url| !url.is_empty()),
        created_at: parse_timestamp(record.created_at.as_deref()),
        farmer_info,
        distributor_info,
        retailer_info,
    })
}

/// Payload for creating a crop as its originating farmer.
pub(crate) fn creation_payload(draft: &CropDraft, user: &User) -> CropPayload {
    CropPayload {
        name: draft.name.clone(),
        crop_type: draft.crop_type.clone(),
        harvest_date: draft.harvest_date.to_string(),
        expiry_date: draft.expiry_date.to_string(),
        soil_type: draft.soil_type.clone(),
        pesticides_used: draft.pesticides_or_default(),
        image_url: draft.image_url.clone().unwrap_or_default(),
        farmer_location: draft
            .location
            .clone()
            .or_else(|| user.location.clone())
            .unwrap_or_default(),
        farmer_id: user.farmer_code.as_ref().map(|c| c.as_str().to_string()),
        farmer_name: user.name.clone(),
        distributor_location: None,
        received_date: None,
    }
}

/// Payload for updating an existing crop. The farmer identity is already on
/// record server-side and is not resent.
pub(crate) fn update_payload(draft: &CropDraft, user: &User) -> CropPayload {
    CropPayload {
        farmer_id: None,
        farmer_name: None,
        ..creation_payload(draft, user)
    }
}

/// Payload for copying a supplier's crop into the recipient's inventory.
///
/// The farmer provenance travels with the crop (falling back to the typed
/// supplier code for legacy records without a block); the recipient's own
/// custody details are stamped with today's date.
pub(crate) fn receive_payload(
    source: &Crop,
    recipient: &User,
    supplier_code: Option<&SupplierCode>,
    today: NaiveDate,
) -> CropPayload {
    let farmer = source.farmer_info.as_ref();

    CropPayload {
        name: source.name.clone(),
        crop_type: source.crop_type.clone(),
        harvest_date: source.harvest_date.to_string(),
        expiry_date: source.expiry_date.to_string(),
        soil_type: source.soil_type.clone(),
        pesticides_used: source.pesticides_used.clone(),
        image_url: source.image_url.clone().unwrap_or_default(),
        farmer_location: farmer
            .map(|f| f.location.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        farmer_id: farmer
            .and_then(|f| f.code.clone())
            .or_else(|| supplier_code.map(|c| c.as_str().to_string())),
        farmer_name: farmer
            .map(|f| f.name.clone())
            .filter(|name| !name.is_empty())
            .or_else(|| Some("Farmer".to_string())),
        distributor_location: (recipient.role == UserRole::Distributor).then(|| {
            recipient
                .location
                .clone()
                .unwrap_or_else(|| "Unknown".to_string())
        }),
        received_date: Some(today.to_string()),
    }
}

fn parse_email(raw: &str) -> Result<Email, ApiError> {
    Email::parse(raw).map_err(|e| ApiError::InvalidResponse(format!("bad email in response: {e}")))
}

fn parse_role(raw: &str) -> Result<UserRole, ApiError> {
    UserRole::from_wire(raw).map_err(|e| ApiError::InvalidResponse(format!("bad role in response: {e}")))
}

/// Codes outside the 3-digit scheme are dropped rather than rejected; the
/// service is the authority on the accounts it reports.
fn parse_code(raw: Option<&str>) -> Option<SupplierCode> {
    raw.and_then(|s| SupplierCode::parse(s).ok())
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ApiError> {
    raw.parse::<NaiveDate>()
        .map_err(|e| ApiError::InvalidResponse(format!("bad {field} in response: {e}")))
}

/// Timestamps arrive as RFC 3339 or a bare `LocalDateTime`; records missing
/// one are stamped on arrival, matching how sessions are stamped.
fn parse_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };

    if let Ok(ts) = raw.parse::<DateTime<Utc>>() {
        return ts;
    }

    raw.parse::<NaiveDateTime>()
        .map_or_else(|_| Utc::now(), |naive| naive.and_utc())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn farmer_record_json() -> &'static str {
        r#"{
            "id": 7,
            "user": {"id": 3, "name": "Ann", "farmerId": "123"},
            "name": "Tomatoes",
            "cropType": "Vegetable",
            "harvestDate": "2024-05-01",
            "expiryDate": "2024-05-20",
            "soilType": "Loam",
            "pesticidesUsed": "None",
            "createdAt": "2024-05-01T08:30:00",
            "farmerLocation": "North Field"
        }"#
    }

    #[test]
    fn test_farmer_record_builds_farmer_block() {
        let record: CropRecord = serde_json::from_str(farmer_record_json()).unwrap();
        let crop = crop_from_record(record).unwrap();

        assert_eq!(crop.id, CropId::new(7));
        assert_eq!(crop.user_id, Some(UserId::new(3)));
        assert_eq!(crop.harvest_date, date(2024, 5, 1));

        let farmer = crop.farmer_info.unwrap();
        // farmerName is absent on the record; the owner's name fills in.
        assert_eq!(farmer.name, "Ann");
        assert_eq!(farmer.code.as_deref(), Some("123"));
        assert_eq!(farmer.location, "North Field");

        assert!(crop.distributor_info.is_none());
        assert!(crop.retailer_info.is_none());
    }

    #[test]
    fn test_record_without_farmer_location_has_no_block() {
        let json = r#"{
            "id": 1,
            "name": "Corn",
            "cropType": "Grain",
            "harvestDate": "2024-09-01",
            "expiryDate": "2024-10-01",
            "soilType": "Silt"
        }"#;
        let crop = crop_from_record(serde_json::from_str(json).unwrap()).unwrap();

        assert!(crop.farmer_info.is_none());
        assert!(crop.user_id.is_none());
        assert_eq!(crop.pesticides_used, "Not specified");
    }

    #[test]
    fn test_distributor_record_takes_received_date() {
        let json = r#"{
            "id": 2,
            "name": "Apples",
            "cropType": "Fruit",
            "harvestDate": "2024-08-01",
            "expiryDate": "2024-09-15",
            "soilType": "Clay",
            "farmerLocation": "Hill Farm",
            "receivedFromFarmerId": "555",
            "receivedFromFarmerName": "Bo",
            "distributorId": "200",
            "distributorName": "Midway Foods",
            "distributorLocation": "Hub 9",
            "receivedDate": "2024-08-03"
        }"#;
        let crop = crop_from_record(serde_json::from_str(json).unwrap()).unwrap();

        let farmer = crop.farmer_info.unwrap();
        assert_eq!(farmer.code.as_deref(), Some("555"));
        assert_eq!(farmer.name, "Bo");

        let distributor = crop.distributor_info.unwrap();
        assert_eq!(distributor.code.as_deref(), Some("200"));
        assert_eq!(distributor.received_date, Some(date(2024, 8, 3)));
        assert!(crop.retailer_info.is_none());
    }

    #[test]
    fn test_retailer_record_owns_received_date() {
        let json = r#"{
            "id": 3,
            "name": "Apples",
            "cropType": "Fruit",
            "harvestDate": "2024-08-01",
            "expiryDate": "2024-09-15",
            "soilType": "Clay",
            "distributorLocation": "Hub 9",
            "receivedFromDistributorId": "200",
            "receivedFromDistributorName": "Midway Foods",
            "retailerName": "Corner Market",
            "retailerLocation": "Main St",
            "receivedDate": "2024-08-07"
        }"#;
        let crop = crop_from_record(serde_json::from_str(json).unwrap()).unwrap();

        let retailer = crop.retailer_info.unwrap();
        assert_eq!(retailer.received_date, date(2024, 8, 7));
        assert_eq!(retailer.name.as_deref(), Some("Corner Market"));

        let distributor = crop.distributor_info.unwrap();
        assert_eq!(distributor.code.as_deref(), Some("200"));
        assert_eq!(distributor.name, "Midway Foods");
        // The record's received date belongs to the retailer stage.
        assert!(distributor.received_date.is_none());
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let json = r#"{
            "id": 1,
            "name": "Corn",
            "cropType": "Grain",
            "harvestDate": "09/01/2024",
            "expiryDate": "2024-10-01",
            "soilType": "Silt"
        }"#;
        let result = crop_from_record(serde_json::from_str(json).unwrap());
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_user_from_auth_lowercases_role() {
        let response = AuthResponse {
            token: "jwt".to_string(),
            id: 9,
            email: "f@example.com".to_string(),
            role: "FARMER".to_string(),
            name: Some("Ann".to_string()),
            location: Some("North".to_string()),
            farmer_id: Some("123".to_string()),
            distributor_id: None,
        };

        let user = user_from_auth(&response).unwrap();
        assert_eq!(user.role, UserRole::Farmer);
        assert_eq!(user.farmer_code.unwrap().as_str(), "123");
    }

    #[test]
    fn test_user_from_auth_drops_malformed_code() {
        let response = AuthResponse {
            token: "jwt".to_string(),
            id: 9,
            email: "d@example.com".to_string(),
            role: "DISTRIBUTOR".to_string(),
            name: None,
            location: None,
            farmer_id: None,
            distributor_id: Some("not-a-code".to_string()),
        };

        let user = user_from_auth(&response).unwrap();
        assert!(user.distributor_code.is_none());
    }

    fn draft() -> CropDraft {
        CropDraft {
            name: "Corn".to_string(),
            crop_type: "Grain".to_string(),
            harvest_date: date(2024, 9, 1),
            expiry_date: date(2024, 10, 1),
            soil_type: "Silt".to_string(),
            pesticides_used: None,
            image_url: None,
            location: None,
        }
    }

    fn farmer_user() -> User {
        User {
            id: UserId::new(1),
            email: Email::parse("ann@example.com").unwrap(),
            role: UserRole::Farmer,
            name: Some("Ann".to_string()),
            location: Some("North Field".to_string()),
            farmer_code: Some(SupplierCode::parse("123").unwrap()),
            distributor_code: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_creation_payload_stamps_farmer_identity() {
        let payload = creation_payload(&draft(), &farmer_user());

        assert_eq!(payload.pesticides_used, "Not specified");
        assert_eq!(payload.farmer_location, "North Field");
        assert_eq!(payload.farmer_id.as_deref(), Some("123"));
        assert_eq!(payload.farmer_name.as_deref(), Some("Ann"));
        assert_eq!(payload.harvest_date, "2024-09-01");
    }

    #[test]
    fn test_creation_payload_prefers_draft_location() {
        let mut d = draft();
        d.location = Some("South Field".to_string());

        let payload = creation_payload(&d, &farmer_user());
        assert_eq!(payload.farmer_location, "South Field");
    }

    #[test]
    fn test_update_payload_omits_farmer_identity() {
        let payload = update_payload(&draft(), &farmer_user());
        assert!(payload.farmer_id.is_none());
        assert!(payload.farmer_name.is_none());
        assert_eq!(payload.farmer_location, "North Field");
    }

    #[test]
    fn test_receive_payload_stamps_recipient_custody() {
        let source = crop_from_record(serde_json::from_str(farmer_record_json()).unwrap()).unwrap();

        let recipient = User {
            role: UserRole::Distributor,
            distributor_code: Some(SupplierCode::parse("200").unwrap()),
            location: Some("Hub 9".to_string()),
            ..farmer_user()
        };

        let payload = receive_payload(&source, &recipient, None, date(2024, 8, 3));
        assert_eq!(payload.farmer_id.as_deref(), Some("123"));
        assert_eq!(payload.farmer_name.as_deref(), Some("Ann"));
        assert_eq!(payload.farmer_location, "North Field");
        assert_eq!(payload.distributor_location.as_deref(), Some("Hub 9"));
        assert_eq!(payload.received_date.as_deref(), Some("2024-08-03"));
    }

    #[test]
    fn test_receive_payload_falls_back_to_typed_code() {
        let mut source =
            crop_from_record(serde_json::from_str(farmer_record_json()).unwrap()).unwrap();
        source.farmer_info = None;

        let recipient = User {
            role: UserRole::Distributor,
            ..farmer_user()
        };
        let code = SupplierCode::parse("777").unwrap();

        let payload = receive_payload(&source, &recipient, Some(&code), date(2024, 8, 3));
        assert_eq!(payload.farmer_id.as_deref(), Some("777"));
        assert_eq!(payload.farmer_name.as_deref(), Some("Farmer"));
        assert_eq!(payload.farmer_location, "Unknown");
    }

    #[test]
    fn test_retailer_receive_has_no_distributor_location() {
        let source = crop_from_record(serde_json::from_str(farmer_record_json()).unwrap()).unwrap();
        let recipient = User {
            role: UserRole::Retailer,
            ..farmer_user()
        };

        let payload = receive_payload(&source, &recipient, None, date(2024, 8, 7));
        assert!(payload.distributor_location.is_none());
        assert_eq!(payload.received_date.as_deref(), Some("2024-08-07"));
    }

    #[test]
    fn test_timestamp_parsing_accepts_both_forms() {
        let rfc3339 = parse_timestamp(Some("2024-05-01T08:30:00Z"));
        assert_eq!(rfc3339.date_naive(), date(2024, 5, 1));

        let local = parse_timestamp(Some("2024-05-01T08:30:00"));
        assert_eq!(local.date_naive(), date(2024, 5, 1));
    }
}
