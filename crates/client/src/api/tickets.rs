//! Ticket invalidation.

use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use boxoffice_core::TicketId;

use super::{Ack, ApiClient, ApiError};

#[derive(Serialize)]
struct InvalidateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl ApiClient {
    /// Void a ticket so it no longer scans at the door.
    ///
    /// `POST /tickets/{ticket_id}/invalidate`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, e.g. 409 when the ticket was
    /// already used.
    #[instrument(skip(self))]
    pub async fn invalidate_ticket(
        &self,
        ticket_id: TicketId,
        reason: Option<&str>,
    ) -> Result<Ack, ApiError> {
        let body = InvalidateRequest { reason };
        let ack = self
            .command(
                Method::POST,
                &format!("/tickets/{ticket_id}/invalidate"),
                &body,
            )
            .await?;
        tracing::info!(%ticket_id, "Ticket invalidated");
        Ok(ack)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;
    use crate::api::test_support::client_for;

    #[tokio::test]
    async fn test_invalidate_with_reason() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/tickets/991/invalidate")
            .match_body(Matcher::Json(json!({ "reason": "chargeback" })))
            .with_status(200)
            .with_body(r#"{"message":"Ticket invalidated"}"#)
            .create_async()
            .await;

        let ack = client_for(&server)
            .invalidate_ticket(TicketId::new(991), Some("chargeback"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(ack.message.as_deref(), Some("Ticket invalidated"));
    }

    #[tokio::test]
    async fn test_invalidate_without_reason_sends_empty_object() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/tickets/5/invalidate")
            .match_body(Matcher::Json(json!({})))
            .with_status(204)
            .create_async()
            .await;

        client_for(&server)
            .invalidate_ticket(TicketId::new(5), None)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_already_used_ticket() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/tickets/5/invalidate")
            .with_status(409)
            .with_body(r#"{"message":"Ticket already scanned"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .invalidate_ticket(TicketId::new(5), None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert!(err.to_string().contains("already scanned"));
    }
}
