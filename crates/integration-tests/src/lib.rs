//! Integration tests for Boxoffice.
//!
//! Each test gets a mock API server and a scratch state directory, then drives
//! the real handlers and file-backed stores against them.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boxoffice-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_flow` - login, persisted session, authenticated calls, guards
//! - `checkout_flow` - multi-step checkout drafts across store reloads

use std::sync::Arc;

use mockito::{Server, ServerGuard};
use serde_json::json;
use tempfile::TempDir;

use boxoffice_client::{
    ApiClient, ApiConfig, CheckoutStore, FileStorage, SessionStore, Storage,
};

/// A mock API and a fresh state directory.
pub struct TestContext {
    pub server: ServerGuard,
    pub state_dir: TempDir,
    pub api: ApiClient,
}

impl TestContext {
    /// Start a mock server and point an unauthenticated client at it.
    ///
    /// # Panics
    ///
    /// Panics if the temp dir or the client can't be created.
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let state_dir = TempDir::new().expect("Failed to create state dir");
        let config = ApiConfig::new(&server.url()).expect("Mock server URL is valid");
        let api = ApiClient::new(&config).expect("Failed to build API client");
        Self {
            server,
            state_dir,
            api,
        }
    }

    /// File storage rooted at the state directory. Every call opens the same
    /// files, like a new process would.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::new(FileStorage::new(self.state_dir.path()))
    }

    /// Session store loaded from disk.
    #[must_use]
    pub fn session(&self) -> SessionStore {
        SessionStore::load(self.storage())
    }

    /// Checkout store loaded from disk.
    #[must_use]
    pub fn checkout(&self) -> CheckoutStore {
        CheckoutStore::load(self.storage())
    }
}

/// Body of a successful `POST /auth/login`.
#[must_use]
pub fn login_body(role: &str, token: &str, onboarded: bool) -> String {
    json!({
        "data": {
            "access_token": token,
            "user": {
                "id": 12,
                "email": "host@lowlight.events",
                "display_name": "Lowlight",
                "role": role,
                "email_verified": true,
                "onboarded": onboarded
            }
        }
    })
    .to_string()
}
