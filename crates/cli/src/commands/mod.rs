//! CLI commands.

pub mod account;
pub mod admin;
pub mod crop;

use harvest_trail_client::api::ApiClient;
use harvest_trail_client::models::User;
use harvest_trail_client::services::SessionManager;
use harvest_trail_client::store::RecordStore;
use harvest_trail_client::Config;

type CommandError = Box<dyn std::error::Error>;

/// Shared wiring for every command: configuration, API client, record store.
pub(crate) struct Context {
    pub api: ApiClient,
    pub store: RecordStore,
}

impl Context {
    pub(crate) fn from_env() -> Result<Self, CommandError> {
        let config = Config::from_env()?;
        let api = ApiClient::new(&config)?;
        let store = RecordStore::open(&config.data_dir)?;
        Ok(Self { api, store })
    }

    pub(crate) fn sessions(&self) -> SessionManager {
        SessionManager::new(self.api.clone(), self.store.clone())
    }

    /// Restore the persisted session, or explain how to start one.
    pub(crate) fn require_user(&self) -> Result<User, CommandError> {
        self.sessions()
            .restore()
            .ok_or_else(|| "not signed in; run `ht account login` first".into())
    }
}
