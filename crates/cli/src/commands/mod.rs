//! Command implementations and the state they share.

pub mod account;
pub mod checkout;
pub mod payments;
pub mod route;
pub mod session;
pub mod tickets;
pub mod tiers;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use boxoffice_client::utils::{SettleError, settle, snake_to_title};
use boxoffice_client::{
    ApiClient, ApiError, CheckoutStore, ClientConfig, FileStorage, SessionStore, Storage,
};
use boxoffice_core::{CurrentUser, Role};

/// Errors raised by the CLI itself rather than the client library.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command needs a signed-in user.
    #[error("Not signed in. Run `boxoffice login` first.")]
    NotSignedIn,

    /// The API rejected the stored token; the session has been cleared.
    #[error("Session expired. Run `boxoffice login` again.")]
    SessionExpired,

    /// The signed-in role can't use this command.
    #[error("This command is not available to {0} accounts")]
    WrongRole(Role),

    /// Nothing to send.
    #[error("Nothing to update: pass at least one field flag")]
    EmptyUpdate,

    /// A flag value didn't parse.
    #[error("Invalid value for {flag}: {reason}")]
    InvalidArgument { flag: &'static str, reason: String },

    /// A path that isn't a known page.
    #[error("Unknown page: {0}")]
    UnknownRoute(String),

    /// The API call ended without a value or an error.
    #[error("No response from the API")]
    NoResponse,
}

/// Stores and client wired up for one command invocation.
pub struct Context {
    pub session: SessionStore,
    pub checkout: CheckoutStore,
    api: ApiClient,
}

impl Context {
    /// Open the persisted stores under the configured state directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn load(config: ClientConfig) -> Result<Self, ApiError> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(config.state_dir.clone()));
        tracing::debug!(state_dir = %config.state_dir.display(), "Opening stores");

        Ok(Self {
            session: SessionStore::load(Arc::clone(&storage)),
            checkout: CheckoutStore::load(storage),
            api: ApiClient::new(&config.api)?,
        })
    }

    /// Client authenticated as the signed-in user, or with the service token.
    pub fn api(&self) -> ApiClient {
        self.api.with_session(&self.session.snapshot())
    }

    /// The signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NotSignedIn`] when nobody is signed in.
    pub fn require_user(&self) -> Result<CurrentUser, CliError> {
        self.session.current_user().ok_or(CliError::NotSignedIn)
    }

    /// Run one API call, signing out if the server says the token expired.
    ///
    /// # Errors
    ///
    /// Returns the call's error, or [`CliError::SessionExpired`] on a 401.
    pub async fn call<T, Op, Fut>(&self, op: Op) -> Result<T, Box<dyn std::error::Error>>
    where
        Op: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let api = self.api();
        match settle(|| op(api)).await {
            (_, Some(SettleError::Failed(e))) if e.is_unauthorized() => {
                tracing::warn!("API rejected the session token, signing out");
                self.session.logout();
                Err(CliError::SessionExpired.into())
            }
            (_, Some(e)) => Err(e.into()),
            (Some(value), None) => Ok(value),
            (None, None) => Err(CliError::NoResponse.into()),
        }
    }
}

/// Print a serialized record as aligned `Label: value` lines.
#[allow(clippy::print_stdout)]
pub fn print_record(record: &Value) {
    let Some(fields) = record.as_object() else {
        println!("{record}");
        return;
    };
    for (key, value) in fields {
        let text = match value {
            Value::Null => "-".to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        println!("{:<22} {text}", format!("{}:", snake_to_title(key)));
    }
}
