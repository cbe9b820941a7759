//! Boxoffice client library.
//!
//! Everything a Boxoffice frontend needs besides rendering:
//! - [`api`] - one async method per ticketing REST endpoint
//! - [`stores`] - the persisted session and checkout stores
//! - [`storage`] - key/value persistence backends the stores write through
//! - [`routes`] - page paths and the session-based navigation guards
//! - [`config`] - environment configuration
//! - [`utils`] - query strings, formatting, validation and friends

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod routes;
pub mod storage;
pub mod stores;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use config::{ApiConfig, ClientConfig, ConfigError};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, UnavailableStorage};
pub use stores::{CheckoutStore, SessionStore};
