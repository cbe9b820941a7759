//! Persistent key-value storage behind the client stores.
//!
//! The stores treat storage as a string-valued map with one JSON blob per
//! key, like browser local storage. [`FileStorage`] keeps one file per key on
//! disk, [`MemoryStorage`] keeps everything in-process, and
//! [`UnavailableStorage`] models a context with no persistent storage at all.
//!
//! [`read_json`] is the reader every caller goes through. It keeps "never
//! set" and "unreadable" apart: an unset key (or no storage) is `Ok(None)`,
//! a blob that fails to decode is `Err(StorageError::Decode)`.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::{MemoryStorage, UnavailableStorage};

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised by storage backends and the JSON helpers.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No persistent storage in this context.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend I/O failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored blob is not valid JSON for the requested type.
    #[error("failed to decode stored value for key {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded.
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-valued persistent map.
pub trait Storage: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// `Ok(None)` when the key is unset; `Err(StorageError::Unavailable)`
    /// when the medium cannot be reached; `Err(StorageError::Decode)` when
    /// the stored bytes are not text.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an unset key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot write.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and decode the JSON value stored under `key`.
///
/// # Errors
///
/// Returns `StorageError::Decode` if a value is present but does not decode
/// as `T`, and passes through backend failures other than
/// [`StorageError::Unavailable`], which reads as `Ok(None)`.
pub fn read_json<T, S>(storage: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(None),
        Err(StorageError::Unavailable(reason)) => {
            tracing::debug!(key, %reason, "Storage unavailable, treating key as unset");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns an error if encoding or the backend write fails.
pub fn write_json<T, S>(storage: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: Storage + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &raw)
}
