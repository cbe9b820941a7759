//! Ticket actions.

use boxoffice_core::{Role, TicketId};

use super::{CliError, Context};

/// Invalidate a ticket. Organizers and operators only.
///
/// # Errors
///
/// Returns an error if the role can't invalidate tickets or the request fails.
#[allow(clippy::print_stdout)]
pub async fn invalidate(
    ctx: &Context,
    ticket_id: TicketId,
    reason: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = ctx.require_user()?;
    if !matches!(user.role, Role::Organizer | Role::Operator) {
        return Err(CliError::WrongRole(user.role).into());
    }

    let ack = ctx
        .call(|api| async move { api.invalidate_ticket(ticket_id, reason.as_deref()).await })
        .await?;
    println!(
        "{}",
        ack.message
            .unwrap_or_else(|| format!("Ticket {ticket_id} invalidated"))
    );
    Ok(())
}
