//! Ticket tier listing and editing.

use chrono::Utc;

use boxoffice_client::utils::{days_until, format_k, is_past, percentage, title_case};
use boxoffice_core::{EventId, Role, TicketTier, TicketTierInput, TicketTierUpdate, TierId};

use super::{CliError, Context};

/// Print an event's tiers with sales progress.
///
/// # Errors
///
/// Returns an error if the request fails.
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &Context, event_id: EventId) -> Result<(), Box<dyn std::error::Error>> {
    let tiers = ctx
        .call(|api| async move { api.get_ticket_tiers(event_id).await })
        .await?;

    if tiers.is_empty() {
        println!("Event {event_id} has no ticket tiers");
        return Ok(());
    }

    println!(
        "{:<6} {:<24} {:>10} {:>9} {:>7}  STATUS",
        "ID", "NAME", "PRICE", "SOLD", "%"
    );
    for tier in &tiers {
        println!(
            "{:<6} {:<24} {:>10} {:>9} {:>6.1}%  {}",
            tier.id,
            tier.name,
            tier.price.display(),
            format!(
                "{}/{}",
                format_k(f64::from(tier.quantity_sold)),
                format_k(f64::from(tier.quantity_total))
            ),
            percentage(tier.quantity_sold, tier.quantity_total),
            status(tier),
        );
    }
    Ok(())
}

/// Create a tier. Organizers and operators only.
///
/// # Errors
///
/// Returns an error if the role can't manage tiers or the request fails.
#[allow(clippy::print_stdout)]
pub async fn create(
    ctx: &Context,
    event_id: EventId,
    input: TicketTierInput,
) -> Result<(), Box<dyn std::error::Error>> {
    require_manager(ctx)?;
    let tier = ctx
        .call(|api| async move { api.create_ticket_tier(event_id, &input).await })
        .await?;
    println!("Created tier {} \"{}\" at {}", tier.id, tier.name, tier.price);
    Ok(())
}

/// Update a tier. Organizers and operators only.
///
/// # Errors
///
/// Returns an error if nothing would change, the role can't manage tiers or
/// the request fails.
#[allow(clippy::print_stdout)]
pub async fn update(
    ctx: &Context,
    tier_id: TierId,
    update: TicketTierUpdate,
) -> Result<(), Box<dyn std::error::Error>> {
    require_manager(ctx)?;
    if update == TicketTierUpdate::default() {
        return Err(CliError::EmptyUpdate.into());
    }
    let tier = ctx
        .call(|api| async move { api.update_ticket_tier(tier_id, &update).await })
        .await?;
    println!(
        "Updated tier {} \"{}\": {} remaining of {}",
        tier.id,
        tier.name,
        tier.remaining(),
        tier.quantity_total
    );
    Ok(())
}

fn require_manager(ctx: &Context) -> Result<(), CliError> {
    let user = ctx.require_user()?;
    match user.role {
        Role::Organizer | Role::Operator => Ok(()),
        role => Err(CliError::WrongRole(role)),
    }
}

fn status(tier: &TicketTier) -> String {
    let now = Utc::now();
    let today = now.date_naive();

    if tier.is_sold_out() {
        return "sold out".to_string();
    }
    if let Some(start) = tier.sales_start
        && now < start
    {
        return format!("opens in {} days", days_until(start.date_naive(), today));
    }
    if let Some(end) = tier.sales_end {
        if is_past(end.date_naive(), today) {
            return "ended".to_string();
        }
        if tier.is_on_sale(now) {
            return format!("on sale, {} days left", days_until(end.date_naive(), today));
        }
    }
    if tier.is_on_sale(now) {
        "on sale".to_string()
    } else {
        title_case(&format!("{:?}", tier.visibility))
    }
}
