//! Authentication errors.

use thiserror::Error;

use harvest_trail_core::EmailError;

use crate::store::StoreError;

/// Errors that can occur during sign-in, sign-up, or sign-out.
///
/// Remote failures never surface from the dual-path operations; what the
/// caller sees is the outcome of the fallback.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Neither the remote service nor the local records matched the
    /// credentials.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A local account with this email already exists.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// The email failed structural validation before any attempt was made.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The local record store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
