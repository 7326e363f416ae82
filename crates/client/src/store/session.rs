//! Persisted session.
//!
//! The current authenticated user is mirrored here so a sign-in survives a
//! process restart. Remote sessions also carry the bearer token the service
//! issued; local-fallback sessions have none.

use serde::{Deserialize, Serialize};

use super::{RecordStore, StoreError};
use crate::models::User;

const SESSION_FILE: &str = "session.json";

/// The persisted authentication state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The signed-in user.
    pub user: User,
    /// Bearer token from the remote service, absent for local-fallback
    /// sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Store operations on the persisted session.
pub struct SessionStore<'a> {
    store: &'a RecordStore,
}

impl<'a> SessionStore<'a> {
    pub(super) const fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// The persisted session, if one exists and is readable.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.store.read_value(SESSION_FILE)
    }

    /// Persist the session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the session file cannot be written.
    pub fn set(&self, session: &Session) -> Result<(), StoreError> {
        self.store.write_value(SESSION_FILE, session)
    }

    /// Forget the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the session file cannot be removed.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove_value(SESSION_FILE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use harvest_trail_core::{Email, UserId, UserRole};

    use super::*;

    fn session(token: Option<&str>) -> Session {
        Session {
            user: User {
                id: UserId::new(5),
                email: Email::parse("s@example.com").unwrap(),
                role: UserRole::Farmer,
                name: None,
                location: None,
                farmer_code: None,
                distributor_code: None,
                created_at: Utc::now(),
            },
            token: token.map(String::from),
        }
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();

        assert!(store.session().current().is_none());

        store.session().set(&session(Some("jwt-token"))).unwrap();
        let restored = store.session().current().unwrap();
        assert_eq!(restored.user.id, UserId::new(5));
        assert_eq!(restored.token.as_deref(), Some("jwt-token"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();

        store.session().set(&session(None)).unwrap();
        store.session().clear().unwrap();
        store.session().clear().unwrap();
        assert!(store.session().current().is_none());
    }
}
