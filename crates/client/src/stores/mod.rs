//! Persisted client-side state stores.
//!
//! Each store owns its state inside a `tokio::sync::watch` channel, so every
//! mutation is visible to subscribers as soon as the mutator returns. After
//! each mutation the store writes its state to [`Storage`]; that write is
//! best-effort and a failure only logs a warning.

mod checkout;
mod session;

pub use checkout::CheckoutStore;
pub use session::SessionStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::{self, Storage};

/// Storage key of the session store.
pub const SESSION_KEY: &str = "boxoffice.session";

/// Storage key of the checkout store.
pub const CHECKOUT_KEY: &str = "boxoffice.checkout";

/// Load a store's persisted state. Undecodable state is dropped with a warning.
fn rehydrate<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    match storage::read_json(storage, key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable persisted state");
            None
        }
    }
}

/// Mirror a store's state to storage; `None` removes the key.
fn persist<T: Serialize>(storage: &dyn Storage, key: &str, value: Option<&T>) {
    let result = match value {
        Some(value) => storage::write_json(storage, key, value),
        None => storage.remove(key),
    };

    if let Err(e) = result {
        tracing::warn!(key, error = %e, "Failed to persist store state");
    }
}
