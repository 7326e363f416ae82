//! Authentication session manager.
//!
//! Owns the dual-path sign-in/sign-up flow: every operation attempts the
//! remote service first and falls back to the local record store when the
//! attempt fails for any reason (unreachable service and rejected
//! credentials alike - the fallback is the arbiter). The current user is
//! held in memory and mirrored to the session collection so a sign-in
//! survives process restarts.

mod error;

pub use error::AuthError;

use std::sync::RwLock;

use rand::Rng;
use tracing::{debug, warn};

use harvest_trail_core::{Email, UserId};

use crate::api::ApiClient;
use crate::models::{Registration, User};
use crate::store::{RecordStore, Session, StoredUser};

/// Authentication session manager.
pub struct SessionManager {
    api: ApiClient,
    store: RecordStore,
    current: RwLock<Option<User>>,
}

impl SessionManager {
    /// Create a new session manager.
    #[must_use]
    pub const fn new(api: ApiClient, store: RecordStore) -> Self {
        Self {
            api,
            store,
            current: RwLock::new(None),
        }
    }

    /// Load a previously persisted session into memory.
    ///
    /// Returns the restored user, if a session was on disk. A persisted
    /// remote token is handed back to the API client.
    pub fn restore(&self) -> Option<User> {
        let session = self.store.session().current()?;

        if let Some(token) = &session.token {
            self.api.set_token(token);
        }

        self.set_current(Some(session.user.clone()));
        debug!(user_id = %session.user.id, "restored persisted session");
        Some(session.user)
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    // =========================================================================
    // Sign-in / sign-up / sign-out
    // =========================================================================

    /// Sign in, remotely if possible, locally otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for structurally invalid input,
    /// `AuthError::InvalidCredentials` when both paths reject the
    /// credentials, or `AuthError::Store` if persisting the session fails.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        match self.api.login(email.as_str(), password).await {
            Ok(session) => {
                debug!(user_id = %session.user.id, "remote sign-in succeeded");
                self.establish(session.user, Some(session.token))
            }
            Err(err) => {
                warn!(error = %err, "remote sign-in failed, trying local records");

                let user = self
                    .store
                    .users()
                    .find_by_credentials(email.as_str(), password)
                    .ok_or(AuthError::InvalidCredentials)?;

                // A fallback session carries no remote token.
                self.api.clear_token();
                self.establish(user, None)
            }
        }
    }

    /// Register a new account, remotely if possible, locally otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` when the fallback already has an
    /// account under this email, or `AuthError::Store` if the local store
    /// fails.
    pub async fn sign_up(&self, registration: Registration) -> Result<User, AuthError> {
        match self.api.register(&registration).await {
            Ok(session) => {
                debug!(user_id = %session.user.id, "remote registration succeeded");
                self.establish(session.user, Some(session.token))
            }
            Err(err) => {
                warn!(error = %err, "remote registration failed, using local records");

                if self.store.users().exists(registration.email.as_str()) {
                    return Err(AuthError::EmailTaken);
                }

                let user = User {
                    id: random_id(),
                    email: registration.email,
                    role: registration.role,
                    name: registration.name,
                    location: registration.location,
                    farmer_code: None,
                    distributor_code: None,
                    created_at: chrono::Utc::now(),
                };

                // The store assigns the custody code the role calls for.
                let user = self
                    .store
                    .users()
                    .add(StoredUser::new(user, registration.password))?;

                self.api.clear_token();
                self.establish(user, None)
            }
        }
    }

    /// Sign out. Clears the token, the persisted session, and the
    /// in-memory user. Always succeeds against the remote side; only a
    /// store failure can surface.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the persisted session cannot be
    /// removed.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.api.sign_out();
        self.store.session().clear()?;
        self.set_current(None);
        Ok(())
    }

    fn establish(&self, user: User, token: Option<String>) -> Result<User, AuthError> {
        self.store.session().set(&Session {
            user: user.clone(),
            token,
        })?;
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    fn set_current(&self, user: Option<User>) {
        if let Ok(mut guard) = self.current.write() {
            *guard = user;
        }
    }
}

fn random_id() -> UserId {
    UserId::new(rand::rng().random_range(1..i64::MAX))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use harvest_trail_core::UserRole;

    use super::*;
    use crate::Config;

    /// A config whose remote side refuses connections immediately.
    fn offline_config(dir: &std::path::Path) -> Config {
        Config {
            api_base_url: "http://127.0.0.1:9/api".parse().unwrap(),
            data_dir: dir.to_path_buf(),
            http_timeout: std::time::Duration::from_secs(1),
        }
    }

    fn manager(dir: &std::path::Path) -> SessionManager {
        let config = offline_config(dir);
        let api = ApiClient::new(&config).unwrap();
        let store = RecordStore::open(&config.data_dir).unwrap();
        SessionManager::new(api, store)
    }

    fn registration(email: &str, role: UserRole) -> Registration {
        Registration {
            email: Email::parse(email).unwrap(),
            password: "hunter42".to_string(),
            role,
            name: Some("Test User".to_string()),
            location: Some("Somewhere".to_string()),
        }
    }

    #[tokio::test]
    async fn test_sign_up_falls_back_to_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        let user = sessions
            .sign_up(registration("farmer@example.com", UserRole::Farmer))
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::Farmer);
        assert!(user.farmer_code.is_some());
        assert_eq!(sessions.current_user().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicate_email() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        sessions
            .sign_up(registration("farmer@example.com", UserRole::Farmer))
            .await
            .unwrap();

        let result = sessions
            .sign_up(registration("farmer@example.com", UserRole::Retailer))
            .await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_sign_in_matches_local_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        let registered = sessions
            .sign_up(registration("farmer@example.com", UserRole::Farmer))
            .await
            .unwrap();

        let user = sessions
            .sign_in("farmer@example.com", "hunter42")
            .await
            .unwrap();
        assert_eq!(user.id, registered.id);

        let wrong = sessions.sign_in("farmer@example.com", "wrong").await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_sign_in_rejects_malformed_email() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        let result = sessions.sign_in("not-an-email", "whatever").await;
        assert!(matches!(result, Err(AuthError::InvalidEmail(_))));
    }

    #[tokio::test]
    async fn test_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        let first = manager(dir.path());
        let user = first
            .sign_up(registration("farmer@example.com", UserRole::Farmer))
            .await
            .unwrap();

        // A fresh manager over the same data directory restores the session.
        let second = manager(dir.path());
        assert!(second.current_user().is_none());
        let restored = second.restore().unwrap();
        assert_eq!(restored.id, user.id);
        assert_eq!(second.current_user().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        sessions
            .sign_up(registration("farmer@example.com", UserRole::Farmer))
            .await
            .unwrap();
        sessions.sign_out().unwrap();

        assert!(sessions.current_user().is_none());
        assert!(manager(dir.path()).restore().is_none());
    }
}
