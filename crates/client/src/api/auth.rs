//! Authentication endpoints.

use tracing::instrument;

use super::types::{AuthResponse, LoginRequest, RegisterRequest};
use super::{ApiClient, ApiError, conversions};
use crate::models::{Registration, User};

/// A successful remote authentication: the issued bearer token plus the
/// session user built from the response.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

impl ApiClient {
    /// Sign in against the remote service.
    ///
    /// On success the issued token is remembered for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with the service's message (typically
    /// "Invalid email or password") on rejection, or a transport error when
    /// the service is unreachable.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self.post("auth/login", &body).await?;
        let user = conversions::user_from_auth(&response)?;

        self.set_token(&response.token);

        Ok(AuthSession {
            token: response.token,
            user,
        })
    }

    /// Register a new account against the remote service.
    ///
    /// The role goes out in the service's SCREAMING_SNAKE form. On success
    /// the issued token is remembered for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with the service's message on rejection,
    /// or a transport error when the service is unreachable.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<AuthSession, ApiError> {
        let body = RegisterRequest {
            email: registration.email.as_str().to_string(),
            password: registration.password.clone(),
            name: registration.name.clone().unwrap_or_default(),
            location: registration.location.clone().unwrap_or_default(),
            role: registration.role.as_wire().to_string(),
        };

        let response: AuthResponse = self.post("auth/register", &body).await?;
        let user = conversions::user_from_auth(&response)?;

        self.set_token(&response.token);

        Ok(AuthSession {
            token: response.token,
            user,
        })
    }

    /// Drop the held bearer token.
    pub fn sign_out(&self) {
        self.clear_token();
    }
}
