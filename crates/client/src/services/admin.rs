//! Administrative service.
//!
//! The user directory prefers the remote service; aggregate statistics are
//! computed over local records, which is where the administrative views
//! read from.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use harvest_trail_core::UserId;

use crate::analytics::AnalyticsSnapshot;
use crate::api::{ApiClient, ApiError};
use crate::models::{Crop, User};
use crate::store::{RecordStore, StoreError};

/// Errors that can occur in administrative operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The remote service failed on a remote-only operation.
    #[error("service error: {0}")]
    Api(#[from] ApiError),

    /// The local record store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The user does not exist in either data source.
    #[error("user {0} not found")]
    NotFound(UserId),
}

/// Administrative service.
pub struct AdminService {
    api: ApiClient,
    store: RecordStore,
}

impl AdminService {
    /// Create a new administrative service.
    #[must_use]
    pub const fn new(api: ApiClient, store: RecordStore) -> Self {
        Self { api, store }
    }

    /// The full user directory, falling back to local accounts.
    ///
    /// # Errors
    ///
    /// Infallible in practice; the signature leaves room for the fallback
    /// path to grow a failure mode.
    pub async fn users(&self) -> Result<Vec<User>, AdminError> {
        match self.api.all_users().await {
            Ok(users) => Ok(users),
            Err(err) => {
                warn!(error = %err, "remote user listing failed, using local records");
                Ok(self.store.users().all())
            }
        }
    }

    /// Delete a user and every crop they own.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` when neither source knows the user.
    pub async fn delete_user(&self, id: UserId) -> Result<(), AdminError> {
        match self.api.delete_user(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "remote user deletion failed, using local records");

                if self.store.users().remove(id)? {
                    Ok(())
                } else {
                    Err(AdminError::NotFound(id))
                }
            }
        }
    }

    /// Every tracked product, for the product table. Reads local records,
    /// which is where that view sources its data.
    #[must_use]
    pub fn products(&self) -> Vec<Crop> {
        self.store.crops().all()
    }

    /// Aggregate statistics over the local records.
    #[must_use]
    pub fn snapshot(&self, today: NaiveDate) -> AnalyticsSnapshot {
        AnalyticsSnapshot::collect(&self.store.users().all(), &self.store.crops().all(), today)
    }
}
