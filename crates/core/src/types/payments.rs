//! Organizer payment dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PayoutId, Price};

/// Payout lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    #[default]
    Pending,
    InTransit,
    Paid,
    Failed,
}

/// A payout sent (or about to be sent) to the organizer's bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub id: PayoutId,
    pub amount: Price,
    pub status: PayoutStatus,
    pub arrival_date: Option<DateTime<Utc>>,
}

/// Figures shown on the organizer payments page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDashboard {
    /// Funds available for the next payout.
    pub available_balance: Price,
    /// Funds still inside the refund window.
    pub pending_balance: Price,
    /// Lifetime gross ticket sales.
    pub gross_sales: Price,
    pub tickets_sold: u64,
    /// Whether the payment provider account can receive payouts.
    #[serde(default)]
    pub payouts_enabled: bool,
    #[serde(default)]
    pub recent_payouts: Vec<Payout>,
}
