//! Ticket tiers: the priced, capped ticket types an event sells.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EventId, Price, TierId};

/// Who can see a tier on the event page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TierVisibility {
    #[default]
    Public,
    /// Only reachable through a direct link or promo code.
    Hidden,
    /// Not on sale; kept for reporting.
    Archived,
}

impl std::str::FromStr for TierVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "hidden" => Ok(Self::Hidden),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid tier visibility: {s}")),
        }
    }
}

/// A ticket tier as returned by the tiers endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTier {
    pub id: TierId,
    pub event_id: EventId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    pub quantity_total: u32,
    #[serde(default)]
    pub quantity_sold: u32,
    #[serde(default)]
    pub max_per_order: Option<u32>,
    #[serde(default)]
    pub sales_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sales_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visibility: TierVisibility,
}

impl TicketTier {
    /// Tickets still available.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.quantity_total.saturating_sub(self.quantity_sold)
    }

    /// Returns `true` when nothing is left to sell.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns `true` if the tier can be bought at `now`.
    #[must_use]
    pub fn is_on_sale(&self, now: DateTime<Utc>) -> bool {
        self.visibility != TierVisibility::Archived
            && !self.is_sold_out()
            && self.sales_start.is_none_or(|start| start <= now)
            && self.sales_end.is_none_or(|end| now < end)
    }
}

/// Body for creating a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTierInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    pub quantity_total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visibility: TierVisibility,
}

/// Partial update for a tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTierUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<TierVisibility>,
}
