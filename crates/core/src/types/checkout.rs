//! In-progress checkout draft and its field-by-field merge.
//!
//! The checkout flow spans several steps; each step contributes a
//! [`CheckoutUpdate`] that is merged onto the draft. A field is only touched
//! when the update says so, which keeps earlier steps' answers intact.

use serde::{Deserialize, Serialize};

use super::{Email, EventId, Price, TierId};

/// Per-field update instruction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Leave the current value alone.
    #[default]
    Keep,
    /// Overwrite with a new value.
    Set(T),
    /// Remove the current value.
    Clear,
}

impl<T> Patch<T> {
    /// `Some(v)` becomes `Set(v)`, `None` becomes `Keep`.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Keep, Self::Set)
    }

    /// Apply this patch to a slot.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Set(value) => *slot = Some(value),
            Self::Clear => *slot = None,
        }
    }

    /// Returns `true` for [`Patch::Keep`].
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

/// Checkout progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    SelectTickets,
    Details,
    Payment,
    Confirmation,
}

impl std::str::FromStr for CheckoutStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select_tickets" | "tickets" => Ok(Self::SelectTickets),
            "details" => Ok(Self::Details),
            "payment" => Ok(Self::Payment),
            "confirmation" => Ok(Self::Confirmation),
            _ => Err(format!("invalid checkout step: {s}")),
        }
    }
}

/// Quantity of one tier in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSelection {
    pub tier_id: TierId,
    pub quantity: u32,
}

/// The in-progress checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selections: Option<Vec<TicketSelection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    /// Promoter referral code credited for the sale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<CheckoutStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Price>,
}

impl CheckoutDraft {
    /// Overlay `update` onto this draft. Last write wins per field.
    pub fn merge(&mut self, update: CheckoutUpdate) {
        let CheckoutUpdate {
            event_id,
            event_slug,
            selections,
            buyer_name,
            buyer_email,
            promo_code,
            referral_code,
            step,
            payment_intent_id,
            total,
        } = update;

        event_id.apply(&mut self.event_id);
        event_slug.apply(&mut self.event_slug);
        selections.apply(&mut self.selections);
        buyer_name.apply(&mut self.buyer_name);
        buyer_email.apply(&mut self.buyer_email);
        promo_code.apply(&mut self.promo_code);
        referral_code.apply(&mut self.referral_code);
        step.apply(&mut self.step);
        payment_intent_id.apply(&mut self.payment_intent_id);
        total.apply(&mut self.total);
    }

    /// Total number of tickets selected.
    ///
    /// Summed as `u64`; per-tier quantities are not validated, so their
    /// total can exceed `u32::MAX`.
    #[must_use]
    pub fn ticket_count(&self) -> u64 {
        self.selections
            .iter()
            .flatten()
            .map(|selection| u64::from(selection.quantity))
            .sum()
    }
}

/// A partial checkout draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutUpdate {
    pub event_id: Patch<EventId>,
    pub event_slug: Patch<String>,
    pub selections: Patch<Vec<TicketSelection>>,
    pub buyer_name: Patch<String>,
    pub buyer_email: Patch<Email>,
    pub promo_code: Patch<String>,
    pub referral_code: Patch<String>,
    pub step: Patch<CheckoutStep>,
    pub payment_intent_id: Patch<String>,
    pub total: Patch<Price>,
}

impl CheckoutUpdate {
    /// Returns `true` if the update would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.event_id.is_keep()
            && self.event_slug.is_keep()
            && self.selections.is_keep()
            && self.buyer_name.is_keep()
            && self.buyer_email.is_keep()
            && self.promo_code.is_keep()
            && self.referral_code.is_keep()
            && self.step.is_keep()
            && self.payment_intent_id.is_keep()
            && self.total.is_keep()
    }
}
