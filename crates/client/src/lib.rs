//! Harvest Trail client - the data-access layer.
//!
//! This crate is everything between a front-end and the data: a remote API
//! client for the supply-chain tracking service, a local record store that
//! mimics a tiny document database for offline/demo operation, and the
//! services that decide, per call, which of the two to use.
//!
//! # Architecture
//!
//! - [`config`] - Environment configuration
//! - [`models`] - Domain types (`User`, `Crop`, provenance blocks)
//! - [`store`] - Local JSON record store (users / crops / session)
//! - [`api`] - Remote API client, wire types, and the bidirectional
//!   snake_case/camelCase field transformation
//! - [`services`] - Auth session manager and crop service; each operation
//!   attempts the remote API and falls back to the local store on failure
//! - [`analytics`] - Aggregate statistics and the filtering logic behind
//!   the administrative views
//!
//! # Example
//!
//! ```rust,ignore
//! use harvest_trail_client::{Config, api::ApiClient, store::RecordStore};
//! use harvest_trail_client::services::{SessionManager, CropService};
//!
//! let config = Config::from_env()?;
//! let api = ApiClient::new(&config)?;
//! let store = RecordStore::open(&config.data_dir)?;
//!
//! let sessions = SessionManager::new(api.clone(), store.clone());
//! let user = sessions.sign_in("farmer@example.com", "hunter42").await?;
//!
//! let crops = CropService::new(api, store);
//! for crop in crops.list(&user).await? {
//!     println!("{} ({})", crop.name, crop.crop_type);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod store;

pub use config::{Config, ConfigError};
