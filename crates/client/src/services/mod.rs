//! Services.
//!
//! Each service pairs the remote API client with the local record store and
//! decides, per call, which to use: the remote attempt comes first, and any
//! failure falls back to local records. There is no queue and no retry
//! policy - one attempt, one fallback.

pub mod admin;
pub mod auth;
pub mod crops;

pub use admin::{AdminError, AdminService};
pub use auth::{AuthError, SessionManager};
pub use crops::{CropError, CropService};
