//! Account view and edit for the signed-in user's role.

use clap::Args;
use serde::Serialize;

use boxoffice_client::utils::{changed_fields_of, is_valid_phone};
use boxoffice_core::{
    AttendeeAccountUpdate, CurrencyCode, CurrentUser, OrganizerAccountUpdate,
    PromoterAccountUpdate, Role,
};

use super::{CliError, Context, print_record};

/// Flags for `account update`. Only flags that are passed get sent.
#[derive(Debug, Args)]
pub struct AccountUpdateArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Organizers only
    #[arg(long)]
    pub organization_name: Option<String>,

    /// Organizers only
    #[arg(long)]
    pub website: Option<String>,

    /// Organizers only
    #[arg(long)]
    pub bio: Option<String>,

    /// Organizers only
    #[arg(long)]
    pub payout_currency: Option<CurrencyCode>,

    /// Mark onboarding as finished (organizers and promoters)
    #[arg(long)]
    pub onboarding_complete: Option<bool>,
}

impl AccountUpdateArgs {
    fn has_organizer_fields(&self) -> bool {
        self.organization_name.is_some()
            || self.website.is_some()
            || self.bio.is_some()
            || self.payout_currency.is_some()
    }
}

/// Print the account record.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the request fails.
pub async fn show(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let user = ctx.require_user()?;
    let record = match user.role {
        Role::Attendee => {
            let account = ctx
                .call(|api| async move { api.get_attendee_account().await })
                .await?;
            serde_json::to_value(account)?
        }
        Role::Organizer => {
            let account = ctx
                .call(|api| async move { api.get_organizer_account().await })
                .await?;
            serde_json::to_value(account)?
        }
        Role::Promoter => {
            let account = ctx
                .call(|api| async move { api.get_promoter_account().await })
                .await?;
            serde_json::to_value(account)?
        }
        Role::Operator => return Err(CliError::WrongRole(Role::Operator).into()),
    };
    print_record(&record);
    Ok(())
}

/// Send the changed fields and refresh the session from the result.
///
/// # Errors
///
/// Returns an error if a flag is invalid for the role or the request fails.
pub async fn update(
    ctx: &Context,
    args: AccountUpdateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = ctx.require_user()?;

    if let Some(phone) = &args.phone
        && !is_valid_phone(phone)
    {
        return Err(CliError::InvalidArgument {
            flag: "--phone",
            reason: format!("'{phone}' is not a phone number"),
        }
        .into());
    }
    if args.has_organizer_fields() && user.role != Role::Organizer {
        return Err(CliError::InvalidArgument {
            flag: "--organization-name/--website/--bio/--payout-currency",
            reason: "only organizers have these fields".to_string(),
        }
        .into());
    }

    let token = user.access_token.clone();
    let (record, refreshed) = match user.role {
        Role::Attendee => {
            if args.onboarding_complete.is_some() {
                return Err(CliError::InvalidArgument {
                    flag: "--onboarding-complete",
                    reason: "attendees have no onboarding".to_string(),
                }
                .into());
            }
            let update = AttendeeAccountUpdate {
                first_name: args.first_name,
                last_name: args.last_name,
                phone: args.phone,
            };
            ensure_changes(update.is_empty(), &update)?;
            let account = ctx
                .call(|api| async move { api.update_attendee_account(&update).await })
                .await?;
            (serde_json::to_value(&account)?, CurrentUser::from_account(&account, token))
        }
        Role::Organizer => {
            let update = OrganizerAccountUpdate {
                organization_name: args.organization_name,
                first_name: args.first_name,
                last_name: args.last_name,
                phone: args.phone,
                website: args.website,
                bio: args.bio,
                payout_currency: args.payout_currency,
                onboarding_complete: args.onboarding_complete,
            };
            ensure_changes(update.is_empty(), &update)?;
            let account = ctx
                .call(|api| async move { api.update_organizer_account(&update).await })
                .await?;
            (serde_json::to_value(&account)?, CurrentUser::from_account(&account, token))
        }
        Role::Promoter => {
            let update = PromoterAccountUpdate {
                first_name: args.first_name,
                last_name: args.last_name,
                phone: args.phone,
                onboarding_complete: args.onboarding_complete,
            };
            ensure_changes(update.is_empty(), &update)?;
            let account = ctx
                .call(|api| async move { api.update_promoter_account(&update).await })
                .await?;
            (serde_json::to_value(&account)?, CurrentUser::from_account(&account, token))
        }
        Role::Operator => return Err(CliError::WrongRole(Role::Operator).into()),
    };

    ctx.session.set_user(refreshed);
    print_record(&record);
    Ok(())
}

/// Reject empty updates and log which fields are about to be sent.
fn ensure_changes<T: Serialize>(
    is_empty: bool,
    update: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    if is_empty {
        return Err(CliError::EmptyUpdate.into());
    }
    let changed = changed_fields_of(update, |_| true)?;
    tracing::info!(fields = ?changed.keys().collect::<Vec<_>>(), "Updating account");
    Ok(())
}
