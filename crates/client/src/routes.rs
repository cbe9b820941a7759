//! Page routes and the session-based guards in front of them.
//!
//! Every page has a fixed path. Before a page renders, [`resolve`] decides from
//! the current [`SessionState`] whether to render it or send the user
//! elsewhere.
//!
//! # Example
//!
//! ```rust,ignore
//! match resolve(Route::OrganizerPayments, &session.snapshot()) {
//!     Navigation::Render => render_payments(),
//!     Navigation::Redirect(path) => navigate(path),
//! }
//! ```

use boxoffice_core::{Role, SessionState};
use serde_json::json;

use crate::utils::build_query;

/// Where anonymous users are sent.
pub const LOGIN_PATH: &str = "/login";

/// A page reachable in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    /// Role onboarding flow; only for users that haven't finished it.
    Onboarding,
    AttendeeTickets,
    OrganizerDashboard,
    OrganizerPayments,
    PromoterDashboard,
    OperatorConsole,
    Checkout,
}

impl Route {
    /// Every route, in navigation order.
    pub const ALL: [Self; 10] = [
        Self::Home,
        Self::Login,
        Self::Signup,
        Self::Onboarding,
        Self::AttendeeTickets,
        Self::OrganizerDashboard,
        Self::OrganizerPayments,
        Self::PromoterDashboard,
        Self::OperatorConsole,
        Self::Checkout,
    ];

    /// Path the page is served at.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => LOGIN_PATH,
            Self::Signup => "/signup",
            Self::Onboarding => "/onboarding",
            Self::AttendeeTickets => "/tickets",
            Self::OrganizerDashboard => "/organizer/dashboard",
            Self::OrganizerPayments => "/organizer/payments",
            Self::PromoterDashboard => "/promoter/dashboard",
            Self::OperatorConsole => "/operator",
            Self::Checkout => "/checkout",
        }
    }

    /// Match a path, ignoring any query string, fragment or trailing slash.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Role a page is restricted to, if any.
    #[must_use]
    pub const fn required_role(self) -> Option<Role> {
        match self {
            Self::AttendeeTickets => Some(Role::Attendee),
            Self::OrganizerDashboard | Self::OrganizerPayments => Some(Role::Organizer),
            Self::PromoterDashboard => Some(Role::Promoter),
            Self::OperatorConsole => Some(Role::Operator),
            Self::Home | Self::Login | Self::Signup | Self::Onboarding | Self::Checkout => None,
        }
    }

    /// Returns `true` for pages anyone may see.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Home | Self::Login | Self::Signup)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Show the requested page.
    Render,
    /// Go to this path instead.
    Redirect(String),
}

impl Navigation {
    fn to(path: &str) -> Self {
        Self::Redirect(path.to_string())
    }
}

/// Login path that returns to `route` after signing in.
#[must_use]
pub fn login_redirect(route: Route) -> String {
    let query = build_query([("next", json!(route.path()))]);
    format!("{LOGIN_PATH}?{query}")
}

/// Decide whether `route` may render for `session`.
#[must_use]
pub fn resolve(route: Route, session: &SessionState) -> Navigation {
    let Some(user) = session.user.as_ref() else {
        return if route.is_public() {
            Navigation::Render
        } else {
            Navigation::Redirect(login_redirect(route))
        };
    };
    let home = user.role.home_path();

    match route {
        Route::Home | Route::Checkout => Navigation::Render,
        Route::Login | Route::Signup => Navigation::to(home),
        Route::Onboarding if user.onboarded => Navigation::to(home),
        Route::Onboarding => Navigation::Render,
        _ => match route.required_role() {
            Some(required) if user.role != required && user.role != Role::Operator => {
                tracing::debug!(%route, role = %user.role, "Role mismatch, redirecting home");
                Navigation::to(home)
            }
            Some(required) if required == user.role && !user.onboarded => {
                Navigation::to(Route::Onboarding.path())
            }
            _ => Navigation::Render,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boxoffice_core::{CurrentUser, Email, UserId};

    use super::*;

    fn session_for(role: Role, onboarded: bool) -> SessionState {
        let mut session = SessionState::default();
        session.set_user(CurrentUser {
            id: UserId::new(4),
            email: Email::parse("someone@tix.test").unwrap(),
            display_name: "Someone".to_string(),
            role,
            email_verified: true,
            onboarded,
            access_token: "tok".to_string(),
        });
        session
    }

    #[test]
    fn test_parse_paths() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
        assert_eq!(Route::parse("/organizer/payments/"), Some(Route::OrganizerPayments));
        assert_eq!(Route::parse("/checkout?step=payment"), Some(Route::Checkout));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/nope"), None);
    }

    #[test]
    fn test_anonymous() {
        let session = SessionState::default();
        assert_eq!(resolve(Route::Home, &session), Navigation::Render);
        assert_eq!(resolve(Route::Login, &session), Navigation::Render);
        assert_eq!(resolve(Route::Signup, &session), Navigation::Render);
        for route in [
            Route::Onboarding,
            Route::AttendeeTickets,
            Route::OrganizerPayments,
            Route::OperatorConsole,
            Route::Checkout,
        ] {
            assert_eq!(resolve(route, &session), Navigation::Redirect(login_redirect(route)));
        }
    }

    #[test]
    fn test_login_redirect_carries_next() {
        assert_eq!(login_redirect(Route::Checkout), "/login?next=%2Fcheckout");
        assert_eq!(
            login_redirect(Route::OrganizerPayments),
            "/login?next=%2Forganizer%2Fpayments"
        );
    }

    #[test]
    fn test_signed_in_user_skips_login() {
        let session = session_for(Role::Promoter, true);
        assert_eq!(
            resolve(Route::Login, &session),
            Navigation::to("/promoter/dashboard")
        );
        assert_eq!(
            resolve(Route::Signup, &session),
            Navigation::to("/promoter/dashboard")
        );
    }

    #[test]
    fn test_onboarding_redirects_when_done() {
        let done = session_for(Role::Organizer, true);
        assert_eq!(
            resolve(Route::Onboarding, &done),
            Navigation::to("/organizer/dashboard")
        );

        let pending = session_for(Role::Organizer, false);
        assert_eq!(resolve(Route::Onboarding, &pending), Navigation::Render);
        assert_eq!(
            resolve(Route::OrganizerDashboard, &pending),
            Navigation::to("/onboarding")
        );
    }

    #[test]
    fn test_role_mismatch_goes_home() {
        let attendee = session_for(Role::Attendee, true);
        assert_eq!(
            resolve(Route::OrganizerPayments, &attendee),
            Navigation::to("/tickets")
        );
        assert_eq!(resolve(Route::AttendeeTickets, &attendee), Navigation::Render);
        assert_eq!(resolve(Route::Checkout, &attendee), Navigation::Render);
    }

    #[test]
    fn test_operator_sees_everything() {
        let operator = session_for(Role::Operator, true);
        for route in [
            Route::AttendeeTickets,
            Route::OrganizerDashboard,
            Route::OrganizerPayments,
            Route::PromoterDashboard,
            Route::OperatorConsole,
        ] {
            assert_eq!(resolve(route, &operator), Navigation::Render);
        }
    }
}
