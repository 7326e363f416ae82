//! Crop service.
//!
//! Role-scoped crop CRUD, custody transfer, and the public provenance
//! scan. Mutating and listing operations attempt the remote service and
//! fall back to the local record store; the transfer *sources* (another
//! party's inventory) are remote-only, since local records only ever hold
//! the acting user's own data.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::warn;

use harvest_trail_core::{CropId, SupplierCode, UserRole};

use crate::api::{ApiClient, ApiError, conversions};
use crate::models::{Crop, CropDraft, DistributorInfo, FarmerInfo, RetailerInfo, User};
use crate::store::{RecordStore, StoreError};

/// Errors that can occur in crop operations.
#[derive(Debug, Error)]
pub enum CropError {
    /// The remote service failed on a remote-only operation.
    #[error("service error: {0}")]
    Api(#[from] ApiError),

    /// The local record store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The queried farmer has nothing to transfer.
    #[error("farmer {code} has no crops available")]
    NoSupplierCrops { code: SupplierCode },

    /// No distributor stock exists to transfer.
    #[error("no distributor crops available")]
    NoDistributorStock,

    /// A transfer was requested with nothing selected.
    #[error("no crops selected")]
    NothingSelected,

    /// The crop does not exist in either data source.
    #[error("crop {0} not found")]
    NotFound(CropId),

    /// Only distributors and retailers receive supplier crops.
    #[error("{0} accounts cannot receive supplier crops")]
    UnsupportedRole(UserRole),
}

/// Crop service.
pub struct CropService {
    api: ApiClient,
    store: RecordStore,
}

impl CropService {
    /// Create a new crop service.
    #[must_use]
    pub const fn new(api: ApiClient, store: RecordStore) -> Self {
        Self { api, store }
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// List the acting user's crops.
    ///
    /// # Errors
    ///
    /// Returns `CropError::Store` only; a remote failure falls back to the
    /// local collection.
    pub async fn list(&self, user: &User) -> Result<Vec<Crop>, CropError> {
        match self.api.crops(user.role).await {
            Ok(crops) => Ok(crops),
            Err(err) => {
                warn!(error = %err, "remote crop listing failed, using local records");
                Ok(self.store.crops().for_user(user.id))
            }
        }
    }

    /// Create a crop for the acting user.
    ///
    /// # Errors
    ///
    /// Returns `CropError::Store` if the fallback insert fails.
    pub async fn create(&self, user: &User, draft: &CropDraft) -> Result<Crop, CropError> {
        let payload = conversions::creation_payload(draft, user);

        match self.api.create_crop(user.role, &payload).await {
            Ok(crop) => Ok(crop),
            Err(err) => {
                warn!(error = %err, "remote crop creation failed, using local records");
                Ok(self.store.crops().add(local_crop(draft, user))?)
            }
        }
    }

    /// Update one of the acting user's crops.
    ///
    /// Provenance blocks are left untouched; only the writable draft
    /// fields change.
    ///
    /// # Errors
    ///
    /// Returns `CropError::NotFound` when the fallback has no such crop.
    pub async fn update(&self, user: &User, id: CropId, draft: &CropDraft) -> Result<Crop, CropError> {
        let payload = conversions::update_payload(draft, user);

        match self.api.update_crop(user.role, id, &payload).await {
            Ok(crop) => Ok(crop),
            Err(err) => {
                warn!(error = %err, "remote crop update failed, using local records");

                let changed = self.store.crops().update(id, |crop| apply_draft(crop, draft))?;
                if !changed {
                    return Err(CropError::NotFound(id));
                }

                self.store.crops().find(id).ok_or(CropError::NotFound(id))
            }
        }
    }

    /// Delete one of the acting user's crops.
    ///
    /// Deleting a crop absent from both sources is a no-op, as it is in the
    /// local collection semantics.
    ///
    /// # Errors
    ///
    /// Returns `CropError::Store` if the fallback rewrite fails.
    pub async fn delete(&self, user: &User, id: CropId) -> Result<(), CropError> {
        match self.api.delete_crop(user.role, id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "remote crop deletion failed, using local records");
                self.store.crops().remove(id)?;
                Ok(())
            }
        }
    }

    // =========================================================================
    // Custody transfer
    // =========================================================================

    /// List a supplier's transferable crops.
    ///
    /// Distributors query one farmer by custody code; retailers browse all
    /// distributor stock. Remote-only: other parties' inventories have no
    /// local mirror.
    ///
    /// # Errors
    ///
    /// Returns `CropError::NoSupplierCrops`/`NoDistributorStock` on an
    /// empty result, `CropError::UnsupportedRole` for roles outside the
    /// receiving stages, or `CropError::Api` if the request fails.
    pub async fn supplier_crops(
        &self,
        user: &User,
        code: &SupplierCode,
    ) -> Result<Vec<Crop>, CropError> {
        match user.role {
            UserRole::Distributor => {
                let crops = self.api.farmer_crops_by_code(code).await?;
                if crops.is_empty() {
                    return Err(CropError::NoSupplierCrops { code: code.clone() });
                }
                Ok(crops)
            }
            UserRole::Retailer => {
                let crops = self.api.all_distributor_crops().await?;
                if crops.is_empty() {
                    return Err(CropError::NoDistributorStock);
                }
                Ok(crops)
            }
            role => Err(CropError::UnsupportedRole(role)),
        }
    }

    /// Copy selected supplier crops into the acting user's inventory,
    /// stamping the receiving stage's provenance with today's date.
    ///
    /// # Errors
    ///
    /// Returns `CropError::NothingSelected` for an empty selection or
    /// `CropError::Store` if a fallback insert fails.
    pub async fn receive(
        &self,
        user: &User,
        supplier_code: Option<&SupplierCode>,
        crops: &[Crop],
    ) -> Result<Vec<Crop>, CropError> {
        self.receive_dated(user, supplier_code, crops, Utc::now().date_naive())
            .await
    }

    /// [`Self::receive`] with an explicit receipt date.
    ///
    /// # Errors
    ///
    /// See [`Self::receive`].
    pub async fn receive_dated(
        &self,
        user: &User,
        supplier_code: Option<&SupplierCode>,
        crops: &[Crop],
        today: NaiveDate,
    ) -> Result<Vec<Crop>, CropError> {
        if crops.is_empty() {
            return Err(CropError::NothingSelected);
        }

        let mut received = Vec::with_capacity(crops.len());

        for source in crops {
            let payload = conversions::receive_payload(source, user, supplier_code, today);

            let crop = match self.api.create_crop(user.role, &payload).await {
                Ok(crop) => crop,
                Err(err) => {
                    warn!(error = %err, "remote transfer failed, recording locally");
                    self.store
                        .crops()
                        .add(local_received_crop(source, user, supplier_code, today))?
                }
            };

            received.push(crop);
        }

        Ok(received)
    }

    // =========================================================================
    // Provenance scan
    // =========================================================================

    /// Public provenance lookup by crop ID. Remote-only and unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns `CropError::Api` wrapping `NotFound` for unknown IDs.
    pub async fn scan(&self, id: CropId) -> Result<Crop, CropError> {
        Ok(self.api.scan_crop(id).await?)
    }
}

/// Build the local-fallback record for a freshly created crop.
fn local_crop(draft: &CropDraft, user: &User) -> Crop {
    let farmer_info = (user.role == UserRole::Farmer).then(|| FarmerInfo {
        code: user.farmer_code.as_ref().map(|c| c.as_str().to_string()),
        name: user.display_name().to_string(),
        location: draft
            .location
            .clone()
            .or_else(|| user.location.clone())
            .unwrap_or_default(),
    });

    Crop {
        id: random_crop_id(),
        user_id: Some(user.id),
        name: draft.name.clone(),
        crop_type: draft.crop_type.clone(),
        harvest_date: draft.harvest_date,
        expiry_date: draft.expiry_date,
        soil_type: draft.soil_type.clone(),
        pesticides_used: draft.pesticides_or_default(),
        image_url: draft.image_url.clone(),
        created_at: Utc::now(),
        farmer_info,
        distributor_info: None,
        retailer_info: None,
    }
}

/// Build the local-fallback record for a received transfer.
fn local_received_crop(
    source: &Crop,
    recipient: &User,
    supplier_code: Option<&SupplierCode>,
    today: NaiveDate,
) -> Crop {
    let farmer_info = source.farmer_info.clone().or_else(|| {
        Some(FarmerInfo {
            code: supplier_code.map(|c| c.as_str().to_string()),
            name: "Farmer".to_string(),
            location: "Unknown".to_string(),
        })
    });

    let mut distributor_info = source.distributor_info.clone();
    let mut retailer_info = None;

    match recipient.role {
        UserRole::Distributor => {
            distributor_info = Some(DistributorInfo {
                code: recipient.supplier_code().map(|c| c.as_str().to_string()),
                name: recipient.display_name().to_string(),
                location: recipient
                    .location
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                received_date: Some(today),
            });
        }
        UserRole::Retailer => {
            retailer_info = Some(RetailerInfo {
                code: None,
                name: recipient.name.clone(),
                location: recipient.location.clone().unwrap_or_default(),
                received_date: today,
            });
        }
        _ => {}
    }

    Crop {
        id: random_crop_id(),
        user_id: Some(recipient.id),
        name: source.name.clone(),
        crop_type: source.crop_type.clone(),
        harvest_date: source.harvest_date,
        expiry_date: source.expiry_date,
        soil_type: source.soil_type.clone(),
        pesticides_used: source.pesticides_used.clone(),
        image_url: source.image_url.clone(),
        created_at: Utc::now(),
        farmer_info,
        distributor_info,
        retailer_info,
    }
}

fn apply_draft(crop: &mut Crop, draft: &CropDraft) {
    crop.name = draft.name.clone();
    crop.crop_type = draft.crop_type.clone();
    crop.harvest_date = draft.harvest_date;
    crop.expiry_date = draft.expiry_date;
    crop.soil_type = draft.soil_type.clone();
    crop.pesticides_used = draft.pesticides_or_default();
    if draft.image_url.is_some() {
        crop.image_url = draft.image_url.clone();
    }
}

fn random_crop_id() -> CropId {
    CropId::new(rand::rng().random_range(1..i64::MAX))
}
