//! Login and email verification.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use boxoffice_core::{CurrentUser, Email, Role, UserId};

use super::{Ack, ApiClient, ApiError};

/// Profile summary returned alongside a fresh token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginUser {
    pub id: UserId,
    pub email: Email,
    pub display_name: String,
    pub role: Role,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub onboarded: bool,
}

/// Successful login.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: LoginUser,
}

impl LoginResponse {
    /// Session record for the user that just signed in.
    #[must_use]
    pub fn into_current_user(self) -> CurrentUser {
        CurrentUser {
            id: self.user.id,
            email: self.user.email,
            display_name: self.user.display_name,
            role: self.user.role,
            email_verified: self.user.email_verified,
            onboarded: self.user.onboarded,
            access_token: self.access_token,
        }
    }
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct VerificationEmailRequest<'a> {
    email: &'a str,
}

impl ApiClient {
    /// Exchange credentials for an access token.
    ///
    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        self.send(Method::POST, "/auth/login", &body).await
    }

    /// Ask the backend to (re)send the address verification email.
    ///
    /// `POST /auth/verification-email`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn request_verification_email(&self, email: &Email) -> Result<Ack, ApiError> {
        let body = VerificationEmailRequest {
            email: email.as_str(),
        };
        self.command(Method::POST, "/auth/verification-email", &body)
            .await
    }
}
