//! Users collection.

use serde::{Deserialize, Serialize};

use harvest_trail_core::{SupplierCode, UserId, UserRole};

use super::{RecordStore, StoreError};
use crate::models::User;

const USERS_FILE: &str = "users.json";

/// A fallback account as persisted locally.
///
/// Carries the registration password alongside the user record; credential
/// matching against it is the whole of the offline authentication scheme,
/// mirroring the demo store this component stands in for. The password
/// never leaves this module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    pub(crate) password: String,
}

impl StoredUser {
    /// Pair a user record with its registration password.
    #[must_use]
    pub const fn new(user: User, password: String) -> Self {
        Self { user, password }
    }
}

/// Store operations on the users collection.
pub struct UserStore<'a> {
    store: &'a RecordStore,
}

impl<'a> UserStore<'a> {
    pub(super) const fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// All locally registered users, without credentials.
    #[must_use]
    pub fn all(&self) -> Vec<User> {
        self.records().into_iter().map(|r| r.user).collect()
    }

    /// Register a user locally.
    ///
    /// Farmer and distributor accounts that arrive without a custody code
    /// are assigned a random one from the 100-999 range.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be written.
    pub fn add(&self, mut record: StoredUser) -> Result<User, StoreError> {
        let mut rng = rand::rng();
        match record.user.role {
            UserRole::Farmer if record.user.farmer_code.is_none() => {
                record.user.farmer_code = Some(SupplierCode::generate(&mut rng));
            }
            UserRole::Distributor if record.user.distributor_code.is_none() => {
                record.user.distributor_code = Some(SupplierCode::generate(&mut rng));
            }
            _ => {}
        }

        let mut records = self.records();
        records.push(record.clone());
        self.store.write_collection(USERS_FILE, &records)?;

        Ok(record.user)
    }

    /// Find the user registered with exactly this email and password.
    #[must_use]
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<User> {
        self.records()
            .into_iter()
            .find(|r| r.user.email.as_str() == email && r.password == password)
            .map(|r| r.user)
    }

    /// Whether any local account uses this email.
    #[must_use]
    pub fn exists(&self, email: &str) -> bool {
        self.records().iter().any(|r| r.user.email.as_str() == email)
    }

    /// Remove a user and every crop they own.
    ///
    /// Returns `false` when no such user exists (the crops are left alone).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a collection cannot be written.
    pub fn remove(&self, id: UserId) -> Result<bool, StoreError> {
        let mut records = self.records();
        let before = records.len();
        records.retain(|r| r.user.id != id);

        if records.len() == before {
            return Ok(false);
        }

        self.store.write_collection(USERS_FILE, &records)?;
        self.store.crops().remove_for_user(id)?;
        Ok(true)
    }

    fn records(&self) -> Vec<StoredUser> {
        self.store.read_collection(USERS_FILE)
    }
}
