//! Account retrieval and update for attendees, organizers and promoters.

use reqwest::Method;
use tracing::instrument;

use boxoffice_core::{
    AttendeeAccount, AttendeeAccountUpdate, CurrentUser, OrganizerAccount, OrganizerAccountUpdate,
    PromoterAccount, PromoterAccountUpdate, Role,
};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /attendee/account`
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_attendee_account(&self) -> Result<AttendeeAccount, ApiError> {
        self.get("/attendee/account").await
    }

    /// `PUT /attendee/account` with only the changed fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, update))]
    pub async fn update_attendee_account(
        &self,
        update: &AttendeeAccountUpdate,
    ) -> Result<AttendeeAccount, ApiError> {
        self.send(Method::PUT, "/attendee/account", update).await
    }

    /// `GET /organizer/account`
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_organizer_account(&self) -> Result<OrganizerAccount, ApiError> {
        self.get("/organizer/account").await
    }

    /// `PUT /organizer/account` with only the changed fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, update))]
    pub async fn update_organizer_account(
        &self,
        update: &OrganizerAccountUpdate,
    ) -> Result<OrganizerAccount, ApiError> {
        self.send(Method::PUT, "/organizer/account", update).await
    }

    /// `GET /promoter/account`
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_promoter_account(&self) -> Result<PromoterAccount, ApiError> {
        self.get("/promoter/account").await
    }

    /// `PUT /promoter/account` with only the changed fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, update))]
    pub async fn update_promoter_account(
        &self,
        update: &PromoterAccountUpdate,
    ) -> Result<PromoterAccount, ApiError> {
        self.send(Method::PUT, "/promoter/account", update).await
    }

    /// Re-fetch the signed-in user's account and rebuild their session record.
    ///
    /// Operators have no account endpoint; their record is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip_all, fields(user_id = %user.id, role = %user.role))]
    pub async fn refresh_current_user(&self, user: &CurrentUser) -> Result<CurrentUser, ApiError> {
        let token = user.access_token.clone();
        let refreshed = match user.role {
            Role::Attendee => CurrentUser::from_account(&self.get_attendee_account().await?, token),
            Role::Organizer => {
                CurrentUser::from_account(&self.get_organizer_account().await?, token)
            }
            Role::Promoter => CurrentUser::from_account(&self.get_promoter_account().await?, token),
            Role::Operator => user.clone(),
        };
        Ok(refreshed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boxoffice_core::{Email, UserId};
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;
    use crate::api::test_support::client_for;

    fn organizer_json(onboarding_complete: bool) -> serde_json::Value {
        json!({
            "data": {
                "id": 12,
                "email": "host@lowlight.events",
                "organization_name": "Lowlight Events",
                "first_name": "Ada",
                "last_name": "Obi",
                "payout_currency": "NGN",
                "onboarding_complete": onboarding_complete,
                "email_verified": true,
                "created_at": "2026-02-01T09:30:00Z"
            }
        })
    }

    #[tokio::test]
    async fn test_get_organizer_account() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/organizer/account")
            .match_header("authorization", "Bearer tok_test")
            .with_status(200)
            .with_body(organizer_json(false).to_string())
            .create_async()
            .await;

        let account = client_for(&server).get_organizer_account().await.unwrap();

        mock.assert_async().await;
        assert_eq!(account.organization_name, "Lowlight Events");
        assert!(!account.onboarding_complete);
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/organizer/account")
            .match_body(Matcher::Json(json!({ "onboarding_complete": true })))
            .with_status(200)
            .with_body(organizer_json(true).to_string())
            .create_async()
            .await;

        let update = OrganizerAccountUpdate {
            onboarding_complete: Some(true),
            ..Default::default()
        };
        let account = client_for(&server)
            .update_organizer_account(&update)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(account.onboarding_complete);
    }

    #[tokio::test]
    async fn test_attendee_account_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/attendee/account")
            .with_status(404)
            .with_body(r#"{"error":"account not found"}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_attendee_account().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_refresh_current_user_keeps_token() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/organizer/account")
            .with_status(200)
            .with_body(organizer_json(true).to_string())
            .create_async()
            .await;

        let stale = CurrentUser {
            id: UserId::new(12),
            email: Email::parse("host@lowlight.events").unwrap(),
            display_name: "Old name".to_string(),
            role: Role::Organizer,
            email_verified: false,
            onboarded: false,
            access_token: "tok_session".to_string(),
        };
        let fresh = client_for(&server)
            .refresh_current_user(&stale)
            .await
            .unwrap();

        assert_eq!(fresh.display_name, "Lowlight Events");
        assert!(fresh.onboarded);
        assert!(fresh.email_verified);
        assert_eq!(fresh.access_token, "tok_session");
    }

    #[tokio::test]
    async fn test_refresh_operator_is_local() {
        let server = Server::new_async().await;
        let operator = CurrentUser {
            id: UserId::new(1),
            email: Email::parse("ops@boxoffice.test").unwrap(),
            display_name: "Ops".to_string(),
            role: Role::Operator,
            email_verified: true,
            onboarded: true,
            access_token: "tok_ops".to_string(),
        };
        let same = client_for(&server)
            .refresh_current_user(&operator)
            .await
            .unwrap();
        assert_eq!(same, operator);
    }
}
