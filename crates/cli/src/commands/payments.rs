//! Organizer payment dashboard.

use boxoffice_client::utils::{format_k, snake_to_title};
use boxoffice_core::Role;

use super::{CliError, Context};

/// Print balances, totals and recent payouts.
///
/// # Errors
///
/// Returns an error if the signed-in user isn't an organizer or the request
/// fails.
#[allow(clippy::print_stdout, clippy::cast_precision_loss)]
pub async fn dashboard(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let user = ctx.require_user()?;
    if !matches!(user.role, Role::Organizer | Role::Operator) {
        return Err(CliError::WrongRole(user.role).into());
    }

    let dashboard = ctx
        .call(|api| async move { api.get_payment_dashboard().await })
        .await?;

    println!("Available:     {}", dashboard.available_balance);
    println!("Pending:       {}", dashboard.pending_balance);
    println!("Gross sales:   {}", dashboard.gross_sales);
    println!("Tickets sold:  {}", format_k(dashboard.tickets_sold as f64));
    println!(
        "Payouts:       {}",
        if dashboard.payouts_enabled { "enabled" } else { "disabled" }
    );

    if dashboard.recent_payouts.is_empty() {
        return Ok(());
    }
    println!();
    println!("Recent payouts");
    for payout in &dashboard.recent_payouts {
        let status = serde_json::to_value(payout.status)?;
        let arrival = payout
            .arrival_date
            .map_or_else(|| "-".to_string(), |date| date.format("%Y-%m-%d").to_string());
        println!(
            "  #{:<8} {:>12}  {:<12} {arrival}",
            payout.id,
            payout.amount.display(),
            snake_to_title(status.as_str().unwrap_or_default()),
        );
    }
    Ok(())
}
