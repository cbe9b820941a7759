//! The checkout draft, edited one step at a time.

use clap::Args;
use rust_decimal::Decimal;

use boxoffice_client::utils::is_valid_slug;
use boxoffice_core::{
    CheckoutStep, CheckoutUpdate, CurrencyCode, Email, EventId, Patch, Price, TicketSelection,
    TierId,
};

use super::{CliError, Context, print_record};

/// Draft fields `--clear` accepts.
const CLEARABLE: [&str; 10] = [
    "event_id",
    "event_slug",
    "selections",
    "buyer_name",
    "buyer_email",
    "promo_code",
    "referral_code",
    "step",
    "payment_intent_id",
    "total",
];

/// Flags for `checkout set`. Unset flags leave the draft's value alone.
#[derive(Debug, Args)]
pub struct CheckoutSetArgs {
    #[arg(long)]
    pub event_id: Option<EventId>,

    #[arg(long)]
    pub event_slug: Option<String>,

    /// `TIER_ID:QUANTITY`; repeat for several tiers. Replaces the selection.
    #[arg(long = "tier", value_parser = parse_selection)]
    pub tiers: Vec<TicketSelection>,

    #[arg(long)]
    pub buyer_name: Option<String>,

    #[arg(long)]
    pub buyer_email: Option<Email>,

    #[arg(long)]
    pub promo_code: Option<String>,

    /// Promoter referral code
    #[arg(long)]
    pub referral_code: Option<String>,

    #[arg(long)]
    pub step: Option<CheckoutStep>,

    #[arg(long)]
    pub payment_intent_id: Option<String>,

    /// Order total in the currency's major unit
    #[arg(long)]
    pub total: Option<Decimal>,

    /// Currency for `--total`
    #[arg(long, default_value = "USD")]
    pub currency: CurrencyCode,

    /// Remove a field from the draft; repeatable
    #[arg(long, value_parser = CLEARABLE)]
    pub clear: Vec<String>,
}

fn parse_selection(raw: &str) -> Result<TicketSelection, String> {
    let (tier, quantity) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected TIER_ID:QUANTITY, got '{raw}'"))?;
    let tier_id: TierId = tier.parse().map_err(|e| format!("bad tier id '{tier}': {e}"))?;
    let quantity: u32 = quantity
        .parse()
        .map_err(|e| format!("bad quantity '{quantity}': {e}"))?;
    Ok(TicketSelection { tier_id, quantity })
}

impl CheckoutSetArgs {
    /// Turn the flags into a field-by-field patch.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is both set and cleared, or the slug is malformed.
    pub fn into_update(self) -> Result<CheckoutUpdate, CliError> {
        if let Some(slug) = &self.event_slug
            && !is_valid_slug(slug)
        {
            return Err(CliError::InvalidArgument {
                flag: "--event-slug",
                reason: format!("'{slug}' is not a lowercase, hyphenated slug"),
            });
        }

        let mut update = CheckoutUpdate {
            event_id: Patch::from_option(self.event_id),
            event_slug: Patch::from_option(self.event_slug),
            selections: Patch::from_option((!self.tiers.is_empty()).then_some(self.tiers)),
            buyer_name: Patch::from_option(self.buyer_name),
            buyer_email: Patch::from_option(self.buyer_email),
            promo_code: Patch::from_option(self.promo_code),
            referral_code: Patch::from_option(self.referral_code),
            step: Patch::from_option(self.step),
            payment_intent_id: Patch::from_option(self.payment_intent_id),
            total: Patch::from_option(self.total.map(|amount| Price::new(amount, self.currency))),
        };

        for field in &self.clear {
            let set = match field.as_str() {
                "event_id" => clear(&mut update.event_id),
                "event_slug" => clear(&mut update.event_slug),
                "selections" => clear(&mut update.selections),
                "buyer_name" => clear(&mut update.buyer_name),
                "buyer_email" => clear(&mut update.buyer_email),
                "promo_code" => clear(&mut update.promo_code),
                "referral_code" => clear(&mut update.referral_code),
                "step" => clear(&mut update.step),
                "payment_intent_id" => clear(&mut update.payment_intent_id),
                "total" => clear(&mut update.total),
                _ => false,
            };
            if set {
                return Err(CliError::InvalidArgument {
                    flag: "--clear",
                    reason: format!("{field} is also being set"),
                });
            }
        }
        Ok(update)
    }
}

/// Mark `patch` as a removal; returns `true` if it was already a `Set`.
fn clear<T>(patch: &mut Patch<T>) -> bool {
    let was_set = matches!(patch, Patch::Set(_));
    *patch = Patch::Clear;
    was_set
}

/// Print the draft.
#[allow(clippy::print_stdout)]
pub fn show(ctx: &Context) {
    match ctx.checkout.checkout() {
        Some(draft) => match serde_json::to_value(&draft) {
            Ok(record) => {
                print_record(&record);
                println!("{:<22} {}", "Tickets:", draft.ticket_count());
            }
            Err(e) => tracing::error!(error = %e, "Failed to render checkout draft"),
        },
        None => println!("No checkout in progress"),
    }
}

/// Merge flags into the draft.
///
/// # Errors
///
/// Returns an error if the flags contradict each other or nothing was given.
pub fn set(ctx: &Context, args: CheckoutSetArgs) -> Result<(), CliError> {
    let update = args.into_update()?;
    if update.is_empty() {
        return Err(CliError::EmptyUpdate);
    }
    ctx.checkout.set_checkout(update);
    show(ctx);
    Ok(())
}

/// Move to a checkout step.
pub fn step(ctx: &Context, step: CheckoutStep) {
    ctx.checkout.set_checkout(CheckoutUpdate {
        step: step.into(),
        ..Default::default()
    });
    show(ctx);
}

/// Abandon the draft.
#[allow(clippy::print_stdout)]
pub fn clear_draft(ctx: &Context) {
    ctx.checkout.empty_checkout();
    println!("Checkout cleared");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CheckoutSetArgs,
    }

    fn parse(argv: &[&str]) -> CheckoutSetArgs {
        Harness::try_parse_from(std::iter::once("checkout").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            parse_selection("7:2").unwrap(),
            TicketSelection { tier_id: TierId::new(7), quantity: 2 }
        );
        assert!(parse_selection("7").is_err());
        assert!(parse_selection("x:2").is_err());
    }

    #[test]
    fn test_flags_become_patches() {
        let update = parse(&[
            "--event-id",
            "42",
            "--tier",
            "7:2",
            "--tier",
            "8:1",
            "--clear",
            "promo_code",
        ])
        .into_update()
        .unwrap();
        assert_eq!(update.event_id, Patch::Set(EventId::new(42)));
        assert_eq!(
            update.selections,
            Patch::Set(vec![
                TicketSelection { tier_id: TierId::new(7), quantity: 2 },
                TicketSelection { tier_id: TierId::new(8), quantity: 1 },
            ])
        );
        assert_eq!(update.promo_code, Patch::Clear);
        assert_eq!(update.buyer_name, Patch::Keep);
    }

    #[test]
    fn test_set_and_clear_conflict() {
        let err = parse(&["--promo-code", "EARLY", "--clear", "promo_code"])
            .into_update()
            .unwrap_err();
        assert!(err.to_string().contains("promo_code"));
    }

    #[test]
    fn test_bad_slug() {
        assert!(parse(&["--event-slug", "Summer Jam"]).into_update().is_err());
        assert!(parse(&["--event-slug", "summer-jam"]).into_update().is_ok());
    }

    #[test]
    fn test_no_flags_is_empty() {
        assert!(parse(&[]).into_update().unwrap().is_empty());
    }
}
