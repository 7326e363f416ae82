//! Administrative endpoints.

use tracing::instrument;

use harvest_trail_core::UserId;

use super::types::UserRecord;
use super::{ApiClient, ApiError, conversions};
use crate::models::User;

impl ApiClient {
    /// Every registered user. `GET /admin/users`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record is malformed.
    #[instrument(skip(self))]
    pub async fn all_users(&self) -> Result<Vec<User>, ApiError> {
        let records: Vec<UserRecord> = self.get("admin/users").await?;
        records.into_iter().map(conversions::user_from_record).collect()
    }

    /// Delete a user and every crop they own. `DELETE /admin/users/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when the caller is not an admin, or
    /// another error if the request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.delete(&format!("admin/users/{id}")).await
    }
}
