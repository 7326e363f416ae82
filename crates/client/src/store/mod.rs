//! Local record store.
//!
//! A thin persistence wrapper over a data directory holding three JSON
//! collections, mimicking a tiny document database for offline/demo
//! operation:
//!
//! - `users.json` - registered fallback accounts (including the password
//!   each one was registered with; this store is demo-grade by design)
//! - `crops.json` - locally created crop records
//! - `session.json` - the current authenticated user, mirrored here so a
//!   session survives process restarts
//!
//! Every operation reads and rewrites a whole collection. A missing file is
//! an empty collection; a corrupt file is treated as empty and logged at
//! `warn`, never surfaced as an error.

mod crops;
mod session;
mod users;

pub use crops::CropStore;
pub use session::{Session, SessionStore};
pub use users::{StoredUser, UserStore};

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when persisting records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a collection file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a collection to JSON failed.
    #[error("store encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Handle on the record store's data directory.
///
/// Cheap to clone; the per-collection stores borrow from it the way
/// repository types borrow a connection pool.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Open (and create if needed) a record store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Access the users collection.
    #[must_use]
    pub const fn users(&self) -> UserStore<'_> {
        UserStore::new(self)
    }

    /// Access the crops collection.
    #[must_use]
    pub const fn crops(&self) -> CropStore<'_> {
        CropStore::new(self)
    }

    /// Access the persisted session.
    #[must_use]
    pub const fn session(&self) -> SessionStore<'_> {
        SessionStore::new(self)
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Read a collection file, treating missing or corrupt files as empty.
    pub(crate) fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        self.read_value(file).unwrap_or_default()
    }

    pub(crate) fn write_collection<T: Serialize>(
        &self,
        file: &str,
        items: &[T],
    ) -> Result<(), StoreError> {
        self.write_value(file, &items)
    }

    /// Read a single JSON value, treating missing or corrupt files as absent.
    pub(crate) fn read_value<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.path(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(file, error = %err, "discarding unreadable collection");
                None
            }
        }
    }

    pub(crate) fn write_value<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(value)?;
        fs::write(self.path(file), encoded)?;
        Ok(())
    }

    pub(crate) fn remove_value(&self, file: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(file)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
