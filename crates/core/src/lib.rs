//! Harvest Trail Core - Shared types library.
//!
//! This crate provides common types used across all Harvest Trail components:
//! - `client` - Data-access library (remote API + local record store)
//! - `cli` - Command-line front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no file
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and custody
//!   codes, plus the role/stage/freshness enumerations of the supply chain

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
