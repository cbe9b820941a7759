//! Session state: the signed-in user and UI preferences.

use serde::{Deserialize, Serialize};

use super::{AccountProfile, Email, Role, UserId};

/// The signed-in user as held by the session.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
    pub display_name: String,
    pub role: Role,
    #[serde(default)]
    pub email_verified: bool,
    /// Whether the role's onboarding flow has been completed.
    #[serde(default)]
    pub onboarded: bool,
    /// Bearer token sent with API requests.
    pub access_token: String,
}

impl CurrentUser {
    /// Build a session record from a freshly fetched account.
    #[must_use]
    pub fn from_account(account: &impl AccountProfile, access_token: impl Into<String>) -> Self {
        Self {
            id: account.user_id(),
            email: account.email().clone(),
            display_name: account.display_name(),
            role: account.role(),
            email_verified: account.email_verified(),
            onboarded: account.onboarded(),
            access_token: access_token.into(),
        }
    }
}

impl std::fmt::Debug for CurrentUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .field("email_verified", &self.email_verified)
            .field("onboarded", &self.onboarded)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Everything the session store holds.
///
/// At most one user is signed in; `role` always mirrors that user's role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub user: Option<CurrentUser>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub sidebar_collapsed: bool,
}

impl SessionState {
    /// Replace the signed-in user wholesale.
    pub fn set_user(&mut self, user: CurrentUser) {
        self.role = Some(user.role);
        self.user = Some(user);
    }

    /// Sign out. UI preferences survive.
    pub fn logout(&mut self) {
        self.user = None;
        self.role = None;
    }

    /// Returns `true` iff a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Set the sidebar flag.
    pub fn toggle_sidebar(&mut self, collapsed: bool) {
        self.sidebar_collapsed = collapsed;
    }

    /// Bearer token of the signed-in user.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.access_token.as_str())
    }
}
