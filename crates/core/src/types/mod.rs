//! Core types for Boxoffice.
//!
//! This module provides type-safe wrappers and records for the ticketing domain.

pub mod account;
pub mod checkout;
pub mod email;
pub mod id;
pub mod payments;
pub mod price;
pub mod role;
pub mod session;
pub mod tier;

pub use account::*;
pub use checkout::{CheckoutDraft, CheckoutStep, CheckoutUpdate, Patch, TicketSelection};
pub use email::{Email, EmailError};
pub use id::*;
pub use payments::{PaymentDashboard, Payout, PayoutStatus};
pub use price::{CurrencyCode, Price};
pub use role::{Role, RoleParseError};
pub use session::{CurrentUser, SessionState};
pub use tier::{TicketTier, TicketTierInput, TicketTierUpdate, TierVisibility};
