//! Resolve a page path against the stored session.

use boxoffice_client::routes::{Navigation, Route, resolve as resolve_route};

use super::{CliError, Context};

/// Print whether `path` renders or where it redirects.
///
/// # Errors
///
/// Returns an error if `path` is not a known page.
#[allow(clippy::print_stdout)]
pub fn resolve(ctx: &Context, path: &str) -> Result<(), CliError> {
    let route = Route::parse(path).ok_or_else(|| CliError::UnknownRoute(path.to_string()))?;

    match resolve_route(route, &ctx.session.snapshot()) {
        Navigation::Render => println!("{route} -> render"),
        Navigation::Redirect(to) => println!("{route} -> redirect {to}"),
    }
    Ok(())
}
