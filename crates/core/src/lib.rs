//! Boxoffice Core - Shared domain types.
//!
//! This crate provides the types used across all Boxoffice components:
//! - `client` - Stores, API handlers, navigation guards and utilities
//! - `cli` - The `boxoffice` terminal frontend
//!
//! # Architecture
//!
//! The core crate contains only types and their pure operations - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Ids, emails, roles, prices, accounts, ticket tiers, the
//!   session record and the checkout draft

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
