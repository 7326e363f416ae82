//! Integration tests for Harvest Trail.
//!
//! The suites in `tests/` exercise the dual-path services end to end in
//! their offline configuration: the remote side points at a port that
//! refuses connections immediately, so every operation runs through its
//! local-store fallback against a temp-dir record store. This is the
//! "fallback" half of the client's contract; the remote half is covered by
//! the wire-shape tests inside the client crate.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p harvest-trail-integration-tests
//! ```

use harvest_trail_client::Config;
use harvest_trail_client::api::ApiClient;
use harvest_trail_client::services::{AdminService, CropService, SessionManager};
use harvest_trail_client::store::RecordStore;

/// A fully wired client stack over a temp directory, with a remote side
/// that is guaranteed unreachable (connection refused, no timeout wait).
pub struct TestEnv {
    pub api: ApiClient,
    pub store: RecordStore,
    // Keeps the temp directory alive for the lifetime of the environment.
    _dir: tempfile::TempDir,
}

impl TestEnv {
    /// Create a fresh environment with its own empty record store.
    ///
    /// # Panics
    ///
    /// Panics when the temp directory or client cannot be set up; these are
    /// test-harness failures, not outcomes under test.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            // Port 9 (discard) is never listened on; connecting fails fast.
            api_base_url: "http://127.0.0.1:9/api".parse().unwrap(),
            data_dir: dir.path().to_path_buf(),
            http_timeout: std::time::Duration::from_secs(1),
        };

        let api = ApiClient::new(&config).unwrap();
        let store = RecordStore::open(&config.data_dir).unwrap();

        Self {
            api,
            store,
            _dir: dir,
        }
    }

    /// A session manager over this environment.
    #[must_use]
    pub fn sessions(&self) -> SessionManager {
        SessionManager::new(self.api.clone(), self.store.clone())
    }

    /// A crop service over this environment.
    #[must_use]
    pub fn crops(&self) -> CropService {
        CropService::new(self.api.clone(), self.store.clone())
    }

    /// An admin service over this environment.
    #[must_use]
    pub fn admin(&self) -> AdminService {
        AdminService::new(self.api.clone(), self.store.clone())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
