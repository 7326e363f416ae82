//! Core types for Harvest Trail.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod code;
pub mod email;
pub mod id;
pub mod role;
pub mod stage;

pub use code::{SupplierCode, SupplierCodeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use role::UserRole;
pub use stage::{Freshness, SupplyStage};
