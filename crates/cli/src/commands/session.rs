//! Sign-in, sign-out and session preferences.

use secrecy::SecretString;

use boxoffice_client::routes::{Navigation, Route, resolve};
use boxoffice_core::Email;

use super::{CliError, Context};

/// Sign in and persist the session.
///
/// # Errors
///
/// Returns an error if the email is malformed or the API rejects the login.
#[allow(clippy::print_stdout)]
pub async fn login(
    ctx: &Context,
    email: &str,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidArgument {
        flag: "--email",
        reason: e.to_string(),
    })?;
    let password = SecretString::from(password);

    let response = ctx.api().login(&email, &password).await?;
    let user = response.into_current_user();
    println!("Signed in as {} ({})", user.display_name, user.role);
    ctx.session.set_user(user);

    // Where the app would land right after login
    if let Navigation::Redirect(path) = resolve(Route::Login, &ctx.session.snapshot()) {
        println!("Home: {path}");
    }
    Ok(())
}

/// Forget the session. The checkout draft belongs to the browser, not the
/// user, so it is kept.
#[allow(clippy::print_stdout)]
pub fn logout(ctx: &Context) {
    if ctx.session.is_authenticated() {
        ctx.session.logout();
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
}

/// Print the signed-in user, optionally refreshing it from the API first.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the refresh fails.
#[allow(clippy::print_stdout)]
pub async fn whoami(ctx: &Context, refresh: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut user = ctx.require_user()?;

    if refresh {
        let current = user.clone();
        user = ctx
            .call(|api| async move { api.refresh_current_user(&current).await })
            .await?;
        ctx.session.set_user(user.clone());
    }

    println!("{} <{}>", user.display_name, user.email);
    println!("  id:         {}", user.id);
    println!("  role:       {}", user.role);
    println!("  verified:   {}", yes_no(user.email_verified));
    println!("  onboarded:  {}", yes_no(user.onboarded));
    println!("  sidebar:    {}", if ctx.session.sidebar_collapsed() { "collapsed" } else { "expanded" });
    Ok(())
}

/// Persist the sidebar preference.
#[allow(clippy::print_stdout)]
pub fn sidebar(ctx: &Context, collapsed: bool) {
    ctx.session.toggle_sidebar(collapsed);
    println!("Sidebar {}", if collapsed { "collapsed" } else { "expanded" });
}

/// Ask for another verification email.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the request fails.
#[allow(clippy::print_stdout)]
pub async fn verify_email(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let user = ctx.require_user()?;
    if user.email_verified {
        println!("{} is already verified", user.email);
        return Ok(());
    }

    let email = user.email.clone();
    let ack = ctx
        .call(|api| async move { api.request_verification_email(&email).await })
        .await?;
    println!(
        "{}",
        ack.message
            .unwrap_or_else(|| format!("Verification email sent to {}", user.email))
    );
    Ok(())
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
