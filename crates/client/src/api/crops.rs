//! Crop endpoints.
//!
//! Crop CRUD is scoped by the caller's role: the service keeps separate
//! collections per custody stage and routes `/{role}/crops` accordingly.

use tracing::instrument;

use harvest_trail_core::{CropId, SupplierCode, UserRole};

use super::types::{CropPayload, CropRecord};
use super::{ApiClient, ApiError, conversions};
use crate::models::Crop;

impl ApiClient {
    /// List the acting role's crops. `GET /{role}/crops`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record is malformed.
    #[instrument(skip(self))]
    pub async fn crops(&self, role: UserRole) -> Result<Vec<Crop>, ApiError> {
        let records: Vec<CropRecord> = self.get(&format!("{}/crops", role.as_path_segment())).await?;
        records.into_iter().map(conversions::crop_from_record).collect()
    }

    /// Create a crop in the acting role's collection. `POST /{role}/crops`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_crop(
        &self,
        role: UserRole,
        payload: &CropPayload,
    ) -> Result<Crop, ApiError> {
        let record: CropRecord = self
            .post(&format!("{}/crops", role.as_path_segment()), payload)
            .await?;
        conversions::crop_from_record(record)
    }

    /// Update a crop. `PUT /{role}/crops/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, payload), fields(crop_id = %id))]
    pub async fn update_crop(
        &self,
        role: UserRole,
        id: CropId,
        payload: &CropPayload,
    ) -> Result<Crop, ApiError> {
        let record: CropRecord = self
            .put(&format!("{}/crops/{id}", role.as_path_segment()), payload)
            .await?;
        conversions::crop_from_record(record)
    }

    /// Delete a crop. `DELETE /{role}/crops/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(crop_id = %id))]
    pub async fn delete_crop(&self, role: UserRole, id: CropId) -> Result<(), ApiError> {
        self.delete(&format!("{}/crops/{id}", role.as_path_segment()))
            .await
    }

    /// Every farmer crop in the system. `GET /farmer/crops/all`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record is malformed.
    #[instrument(skip(self))]
    pub async fn all_farmer_crops(&self) -> Result<Vec<Crop>, ApiError> {
        let records: Vec<CropRecord> = self.get("farmer/crops/all").await?;
        records.into_iter().map(conversions::crop_from_record).collect()
    }

    /// A single farmer's crops, looked up by custody code.
    /// `GET /farmer/crops/by-farmer/{code}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record is malformed.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn farmer_crops_by_code(&self, code: &SupplierCode) -> Result<Vec<Crop>, ApiError> {
        let records: Vec<CropRecord> =
            self.get(&format!("farmer/crops/by-farmer/{code}")).await?;
        records.into_iter().map(conversions::crop_from_record).collect()
    }

    /// Every distributor crop in the system. `GET /distributor/crops/all`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record is malformed.
    #[instrument(skip(self))]
    pub async fn all_distributor_crops(&self) -> Result<Vec<Crop>, ApiError> {
        let records: Vec<CropRecord> = self.get("distributor/crops/all").await?;
        records.into_iter().map(conversions::crop_from_record).collect()
    }

    /// The acting distributor's own stock. `GET /distributor/crops`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record is malformed.
    #[instrument(skip(self))]
    pub async fn distributor_inventory(&self) -> Result<Vec<Crop>, ApiError> {
        let records: Vec<CropRecord> = self.get("distributor/crops").await?;
        records.into_iter().map(conversions::crop_from_record).collect()
    }

    /// Public provenance lookup for a scanned crop. `GET /crops/scan/{id}`
    ///
    /// No bearer token is attached; anyone holding a crop ID may trace it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown IDs, or another error if the
    /// request fails.
    #[instrument(skip(self), fields(crop_id = %id))]
    pub async fn scan_crop(&self, id: CropId) -> Result<Crop, ApiError> {
        let record: CropRecord = self.get_public(&format!("crops/scan/{id}")).await?;
        conversions::crop_from_record(record)
    }
}
