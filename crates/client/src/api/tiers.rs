//! Ticket tier read/write.

use reqwest::Method;
use tracing::instrument;

use boxoffice_core::{EventId, TicketTier, TicketTierInput, TicketTierUpdate, TierId};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// List an event's tiers.
    ///
    /// `GET /events/{event_id}/tiers`
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_ticket_tiers(&self, event_id: EventId) -> Result<Vec<TicketTier>, ApiError> {
        self.get(&format!("/events/{event_id}/tiers")).await
    }

    /// Add a tier to an event.
    ///
    /// `POST /events/{event_id}/tiers`
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_ticket_tier(
        &self,
        event_id: EventId,
        input: &TicketTierInput,
    ) -> Result<TicketTier, ApiError> {
        self.send(Method::POST, &format!("/events/{event_id}/tiers"), input)
            .await
    }

    /// Change some fields of a tier.
    ///
    /// `PUT /tiers/{tier_id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, update))]
    pub async fn update_ticket_tier(
        &self,
        tier_id: TierId,
        update: &TicketTierUpdate,
    ) -> Result<TicketTier, ApiError> {
        self.send(Method::PUT, &format!("/tiers/{tier_id}"), update)
            .await
    }
}
