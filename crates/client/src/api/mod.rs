//! REST API handlers for the ticketing backend.
//!
//! One method per endpoint, grouped by resource:
//! - [`auth`] - login and verification email
//! - [`accounts`] - attendee, organizer and promoter accounts
//! - [`tiers`] - ticket tiers
//! - [`tickets`] - ticket invalidation
//! - [`payments`] - organizer payment dashboard
//!
//! Every handler performs exactly one request with a fixed method and path.
//! Nothing is retried, cached or deduplicated; a transport or status error is
//! returned to the caller as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use boxoffice_client::api::ApiClient;
//!
//! let api = ApiClient::new(&config.api)?.with_session(&session.snapshot());
//! let tiers = api.get_ticket_tiers(event_id).await?;
//! ```

pub mod accounts;
pub mod auth;
pub mod payments;
pub mod tickets;
pub mod tiers;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use boxoffice_core::SessionState;

use crate::config::ApiConfig;

/// Longest slice of an error body kept in [`ApiError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Errors that can occur when calling the ticketing API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configured header value is not valid.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for 401 responses, which mean the session token expired.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

/// Response envelope used by every endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of endpoints that only acknowledge a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body shapes the backend is known to send.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the ticketing REST API.
///
/// Cheaply cloneable; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("boxoffice/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                token: config.token.clone(),
            }),
        })
    }

    /// Same client, authenticating with `token`.
    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: self.inner.client.clone(),
                base_url: self.inner.base_url.clone(),
                token: Some(SecretString::from(token.into())),
            }),
        }
    }

    /// Same client, authenticating as the session's user when one is signed in.
    #[must_use]
    pub fn with_session(&self, session: &SessionState) -> Self {
        session
            .access_token()
            .map_or_else(|| self.clone(), |token| self.with_token(token))
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns `true` if requests carry a bearer token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// `GET` a path and unwrap the envelope.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.inner.client.get(self.url(path));
        self.execute::<Envelope<T>>(request).await.map(|env| env.data)
    }

    /// Send a JSON body and unwrap the envelope.
    async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.inner.client.request(method, self.url(path)).json(body);
        self.execute::<Envelope<T>>(request).await.map(|env| env.data)
    }

    /// Send a JSON body to an endpoint that answers with a bare acknowledgement.
    async fn command<B>(&self, method: Method, path: &str, body: &B) -> Result<Ack, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.inner.client.request(method, self.url(path)).json(body);
        self.execute::<Ack>(request).await
    }

    /// Attach auth, send, check the status and decode the body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = match &self.inner.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "API returned non-success status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        // 204 responses carry no body; treat them as an empty object.
        let body = if body.trim().is_empty() {
            "{}".to_string()
        } else {
            body
        };

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to decode API response"
            );
            ApiError::Decode(e)
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("authenticated", &self.inner.token.is_some())
            .finish()
    }
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && let Some(message) = parsed.message.or(parsed.error)
    {
        return message;
    }
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use mockito::ServerGuard;

    use super::ApiClient;
    use crate::config::ApiConfig;

    /// Client pointed at a mock server, authenticated with `tok_test`.
    #[allow(clippy::unwrap_used)]
    pub fn client_for(server: &ServerGuard) -> ApiClient {
        ApiClient::new(&ApiConfig::new(&server.url()).unwrap())
            .unwrap()
            .with_token("tok_test")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boxoffice_core::{CurrentUser, Email, Role, UserId};

    use super::*;

    #[test]
    fn test_error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"message":"Tier is sold out"}"#), "Tier is sold out");
        assert_eq!(error_message(r#"{"error":"forbidden"}"#), "forbidden");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(&"x".repeat(500)).len(), MAX_ERROR_BODY_CHARS);
    }

    #[test]
    fn test_with_session_uses_user_token() {
        let api = ApiClient::new(&ApiConfig::new("https://api.tix.test/").unwrap()).unwrap();
        assert!(!api.is_authenticated());
        assert_eq!(api.base_url(), "https://api.tix.test");

        let mut session = SessionState::default();
        assert!(!api.with_session(&session).is_authenticated());

        session.set_user(CurrentUser {
            id: UserId::new(1),
            email: Email::parse("fan@tix.test").unwrap(),
            display_name: "Fan".to_string(),
            role: Role::Attendee,
            email_verified: false,
            onboarded: true,
            access_token: "tok_user".to_string(),
        });
        assert!(api.with_session(&session).is_authenticated());
    }

    #[test]
    fn test_status_helpers() {
        let err = ApiError::Status {
            status: 401,
            message: "expired".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "API error: 401 - expired");
    }
}
