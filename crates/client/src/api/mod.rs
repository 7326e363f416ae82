//! Remote API client.
//!
//! # Architecture
//!
//! - Plain REST/JSON over `reqwest`; the service's base URL comes from
//!   [`crate::Config`]
//! - A bearer token captured at login is attached to every authenticated
//!   request (the public provenance scan goes out bare)
//! - The wire model is flat camelCase; [`conversions`] transforms it to and
//!   from the nested snake_case domain model
//! - No response caching: every call observes the service directly
//!
//! # Example
//!
//! ```rust,ignore
//! use harvest_trail_client::api::ApiClient;
//!
//! let client = ApiClient::new(&config)?;
//! let session = client.login("ann@example.com", "hunter42").await?;
//! let crops = client.crops(session.user.role).await?;
//! ```

mod admin;
mod auth;
pub(crate) mod conversions;
mod crops;
pub mod types;

pub use auth::AuthSession;

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::Config;

/// Errors that can occur when talking to the remote service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded as JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service rejected the credentials or the token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status; the message is the response body.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response decoded but did not match the documented contract.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Client for the supply-chain tracking service.
///
/// Cheap to clone; all clones share the HTTP connection pool and the
/// current bearer token.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
                token: RwLock::new(None),
            }),
        })
    }

    /// Remember a bearer token for subsequent requests.
    pub fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = Some(SecretString::from(token.to_string()));
        }
    }

    /// Forget the bearer token.
    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = None;
        }
    }

    /// Whether a bearer token is currently held.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.inner
            .token
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn bearer(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|t| t.expose_secret().to_string()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authed(self.inner.client.get(self.endpoint(path)));
        Self::decode(request.send().await?).await
    }

    /// GET without attaching the bearer token (public endpoints).
    pub(crate) async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.inner.client.get(self.endpoint(path));
        Self::decode(request.send().await?).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authed(self.inner.client.post(self.endpoint(path)).json(body));
        Self::decode(request.send().await?).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authed(self.inner.client.put(self.endpoint(path)).json(body));
        Self::decode(request.send().await?).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.authed(self.inner.client.delete(self.endpoint(path)));
        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Map a non-success status to a typed error, returning the body text.
    async fn check_status(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let message = if body.is_empty() {
            format!("HTTP error! status: {}", status.as_u16())
        } else {
            body
        };

        tracing::debug!(
            status = %status,
            body = %message.chars().take(500).collect::<String>(),
            "service returned non-success status"
        );

        Err(match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                ApiError::Unauthorized(message)
            }
            reqwest::StatusCode::NOT_FOUND => ApiError::NotFound(message),
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let body = Self::check_status(response).await?;

        serde_json::from_str(&body).map_err(|err| {
            tracing::error!(
                error = %err,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse service response"
            );
            ApiError::Parse(err)
        })
    }
}
