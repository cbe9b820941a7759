//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BOXOFFICE_API_URL` - Base URL of the ticketing REST API
//!
//! ## Optional
//! - `BOXOFFICE_API_TOKEN` - Service token used when nobody is signed in
//! - `BOXOFFICE_STATE_DIR` - Directory holding persisted stores (default: `.boxoffice`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_STATE_DIR: &str = ".boxoffice";
const MIN_TOKEN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Settings for the REST API collaborator.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `https://api.example.com/v1`.
    pub base_url: String,
    /// Service token sent when no user token is supplied.
    pub token: Option<SecretString>,
}

impl ApiConfig {
    /// Build an API config from a base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or is not
    /// http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            token: None,
        })
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Complete client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST API settings
    pub api: ApiConfig,
    /// Directory holding the persisted session and checkout stores
    pub state_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the API token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("BOXOFFICE_API_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("BOXOFFICE_API_URL".to_string()))?;
        let mut api = ApiConfig::new(&raw_url)?;

        if let Some(token) = lookup("BOXOFFICE_API_TOKEN").filter(|t| !t.is_empty()) {
            validate_token_strength(&token, "BOXOFFICE_API_TOKEN")?;
            api.token = Some(SecretString::from(token));
        }

        let state_dir = lookup("BOXOFFICE_STATE_DIR")
            .filter(|dir| !dir.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STATE_DIR), PathBuf::from);

        Ok(Self {
            api,
            state_dir,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the service token, if any, exposed for header construction.
    #[must_use]
    pub fn service_token(&self) -> Option<&str> {
        self.api.token.as_ref().map(ExposeSecret::expose_secret)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate an API base URL and strip any trailing slash.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("BOXOFFICE_API_URL".to_string(), reason);

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment".to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // token length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject tokens that are obviously copied from a sample `.env`.
fn validate_token_strength(token: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = token.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(token);
    if entropy < MIN_TOKEN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_TOKEN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_url() {
        let result = ClientConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(var)) if var == "BOXOFFICE_API_URL"));
    }

    #[test]
    fn test_defaults() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("BOXOFFICE_API_URL", "https://api.tix.test/v1/")]))
                .unwrap();
        assert_eq!(config.api.base_url, "https://api.tix.test/v1");
        assert_eq!(config.state_dir, PathBuf::from(".boxoffice"));
        assert!(config.service_token().is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let result = ClientConfig::from_lookup(lookup_from(&[("BOXOFFICE_API_URL", "ftp://files.test")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_rejects_placeholder_token() {
        let result = ClientConfig::from_lookup(lookup_from(&[
            ("BOXOFFICE_API_URL", "https://api.tix.test"),
            ("BOXOFFICE_API_TOKEN", "your-token-here"),
        ]));
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_accepts_random_token() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("BOXOFFICE_API_URL", "https://api.tix.test"),
            ("BOXOFFICE_API_TOKEN", "sk_9fQ2xL7vRm4TzW8kB1pN"),
            ("BOXOFFICE_STATE_DIR", "/tmp/boxoffice-state"),
        ]))
        .unwrap();
        assert_eq!(config.service_token(), Some("sk_9fQ2xL7vRm4TzW8kB1pN"));
        assert_eq!(config.state_dir, PathBuf::from("/tmp/boxoffice-state"));
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut api = ApiConfig::new("https://api.tix.test").unwrap();
        api.token = Some(SecretString::from("sk_9fQ2xL7vRm4TzW8kB1pN"));
        let rendered = format!("{api:?}");
        assert!(!rendered.contains("sk_9fQ2"));
    }
}
