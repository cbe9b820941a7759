//! Login, persisted session and authenticated calls against a mock API.

#![allow(clippy::unwrap_used)]

use mockito::{Matcher, ServerGuard};
use secrecy::SecretString;
use serde_json::json;

use boxoffice_client::routes::{Navigation, Route, resolve};
use boxoffice_client::stores::SESSION_KEY;
use boxoffice_client::utils::{SettleError, settle};
use boxoffice_core::{Email, Role};
use boxoffice_integration_tests::{TestContext, login_body};

async fn mock_login(server: &mut ServerGuard, role: &str, onboarded: bool) -> mockito::Mock {
    server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(login_body(role, "tok_organizer", onboarded))
        .create_async()
        .await
}

#[tokio::test]
async fn test_login_persists_and_authenticates_later_calls() {
    let mut ctx = TestContext::new().await;
    let login = mock_login(&mut ctx.server, "organizer", true).await;
    let account = ctx
        .server
        .mock("GET", "/organizer/account")
        .match_header("authorization", "Bearer tok_organizer")
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "id": 12,
                    "email": "host@lowlight.events",
                    "organization_name": "Lowlight Events",
                    "first_name": "Ada",
                    "last_name": "Obi",
                    "onboarding_complete": true,
                    "email_verified": true,
                    "created_at": "2026-02-01T09:30:00Z"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    // First "process": sign in
    {
        let session = ctx.session();
        let response = ctx
            .api
            .login(
                &Email::parse("host@lowlight.events").unwrap(),
                &SecretString::from("Backstage9"),
            )
            .await
            .unwrap();
        session.set_user(response.into_current_user());
        assert!(session.is_authenticated());
    }
    login.assert_async().await;
    assert!(ctx.state_dir.path().join(format!("{SESSION_KEY}.json")).exists());

    // Second "process": the session comes back from disk and drives the token
    let session = ctx.session();
    assert_eq!(session.role(), Some(Role::Organizer));
    let api = ctx.api.with_session(&session.snapshot());
    let organizer = api.get_organizer_account().await.unwrap();
    account.assert_async().await;

    let refreshed = api
        .refresh_current_user(&session.current_user().unwrap())
        .await
        .unwrap();
    assert_eq!(refreshed.display_name, "Lowlight Events");
    assert_eq!(organizer.organization_name, refreshed.display_name);
}

#[tokio::test]
async fn test_logout_survives_reload() {
    let mut ctx = TestContext::new().await;
    let _login = mock_login(&mut ctx.server, "promoter", true).await;

    let session = ctx.session();
    let user = ctx
        .api
        .login(
            &Email::parse("host@lowlight.events").unwrap(),
            &SecretString::from("Backstage9"),
        )
        .await
        .unwrap()
        .into_current_user();
    session.set_user(user);
    session.toggle_sidebar(true);
    session.logout();
    assert!(!session.is_authenticated());

    let reloaded = ctx.session();
    assert!(!reloaded.is_authenticated());
    assert_eq!(reloaded.role(), None);
    assert!(reloaded.sidebar_collapsed());
    assert!(!ctx.api.with_session(&reloaded.snapshot()).is_authenticated());
}

#[tokio::test]
async fn test_guards_follow_the_session() {
    let mut ctx = TestContext::new().await;
    let _login = mock_login(&mut ctx.server, "organizer", false).await;
    let session = ctx.session();

    assert_eq!(
        resolve(Route::OrganizerPayments, &session.snapshot()),
        Navigation::Redirect("/login?next=%2Forganizer%2Fpayments".to_string())
    );

    let user = ctx
        .api
        .login(
            &Email::parse("host@lowlight.events").unwrap(),
            &SecretString::from("Backstage9"),
        )
        .await
        .unwrap()
        .into_current_user();
    session.set_user(user);
    let state = session.snapshot();

    assert_eq!(
        resolve(Route::OrganizerPayments, &state),
        Navigation::Redirect("/onboarding".to_string())
    );
    assert_eq!(resolve(Route::Onboarding, &state), Navigation::Render);
    assert_eq!(
        resolve(Route::PromoterDashboard, &state),
        Navigation::Redirect("/organizer/dashboard".to_string())
    );
    assert_eq!(
        resolve(Route::Login, &state),
        Navigation::Redirect("/organizer/dashboard".to_string())
    );
}

#[tokio::test]
async fn test_expired_token_settles_as_error() {
    let ctx = TestContext::new().await;
    let mut server = ctx.server;
    let _expired = server
        .mock("GET", "/organizer/payments/dashboard")
        .match_header("authorization", Matcher::Regex("^Bearer ".to_string()))
        .with_status(401)
        .with_body(r#"{"message":"Token expired"}"#)
        .create_async()
        .await;

    let api = ctx.api.with_token("tok_stale");
    let (dashboard, error) = settle(|| async move { api.get_payment_dashboard().await }).await;

    assert!(dashboard.is_none());
    let error = error.and_then(SettleError::into_failed).unwrap();
    assert!(error.is_unauthorized());
    assert!(error.to_string().contains("Token expired"));
}
