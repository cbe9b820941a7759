//! Boxoffice CLI - the ticketing frontend in a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in; the session is kept under BOXOFFICE_STATE_DIR
//! boxoffice login -e host@lowlight.events -p 'Backstage9'
//!
//! # Organizer: list and edit tiers
//! boxoffice tiers list 42
//! boxoffice tiers create 42 --name "Early bird" --price 25.00 --quantity 100
//! boxoffice tiers update 7 --quantity 150
//!
//! # Build up a checkout across several invocations
//! boxoffice checkout set --event-id 42 --tier 7:2
//! boxoffice checkout set --buyer-name "Zainab" --step details
//!
//! # Ask the guards where a page would send you
//! boxoffice route /organizer/payments
//! ```
//!
//! # Environment Variables
//!
//! - `BOXOFFICE_API_URL` - REST API base URL (required)
//! - `BOXOFFICE_API_TOKEN` - service token used when nobody is signed in
//! - `BOXOFFICE_STATE_DIR` - where the session and checkout are persisted
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT` - error tracking

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{ArgAction, Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boxoffice_client::ClientConfig;
use boxoffice_core::{CheckoutStep, CurrencyCode, EventId, TicketId, TierId, TierVisibility};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "boxoffice")]
#[command(author, version, about = "Boxoffice ticketing CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Re-fetch the account before printing
        #[arg(long)]
        refresh: bool,
    },
    /// Set the sidebar preference
    Sidebar {
        /// Whether the sidebar starts collapsed
        #[arg(long, action = ArgAction::Set)]
        collapsed: bool,
    },
    /// View or edit the signed-in account
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Manage an event's ticket tiers
    Tiers {
        #[command(subcommand)]
        action: TiersAction,
    },
    /// Act on individual tickets
    Ticket {
        #[command(subcommand)]
        action: TicketAction,
    },
    /// Resend the address verification email
    VerifyEmail,
    /// Show the organizer payment dashboard
    Payments,
    /// Inspect or edit the checkout draft
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
    /// Show where a page path leads for the current session
    Route {
        /// Page path, e.g. `/organizer/payments`
        path: String,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Print the account record
    Show,
    /// Change account fields; only the given flags are sent
    Update(commands::account::AccountUpdateArgs),
}

#[derive(Subcommand)]
enum TiersAction {
    /// List an event's tiers
    List {
        /// Event ID
        event_id: EventId,
    },
    /// Add a tier to an event
    Create {
        /// Event ID
        event_id: EventId,

        /// Tier name
        #[arg(long)]
        name: String,

        /// Price in the currency's major unit, e.g. `25.00`
        #[arg(long)]
        price: Decimal,

        /// Currency code
        #[arg(long, default_value = "USD")]
        currency: CurrencyCode,

        /// Number of tickets on sale
        #[arg(long)]
        quantity: u32,

        /// Per-order cap
        #[arg(long)]
        max_per_order: Option<u32>,

        /// `public`, `hidden` or `archived`
        #[arg(long, default_value = "public")]
        visibility: TierVisibility,
    },
    /// Change some fields of a tier
    Update {
        /// Tier ID
        tier_id: TierId,

        #[arg(long)]
        name: Option<String>,

        /// New price in the currency's major unit
        #[arg(long)]
        price: Option<Decimal>,

        /// Currency for `--price`
        #[arg(long, default_value = "USD")]
        currency: CurrencyCode,

        #[arg(long)]
        quantity: Option<u32>,

        #[arg(long)]
        max_per_order: Option<u32>,

        #[arg(long)]
        visibility: Option<TierVisibility>,
    },
}

#[derive(Subcommand)]
enum TicketAction {
    /// Void a ticket so it no longer scans
    Invalidate {
        /// Ticket ID
        ticket_id: TicketId,

        /// Reason recorded with the invalidation
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Print the current draft
    Show,
    /// Merge fields into the draft
    Set(commands::checkout::CheckoutSetArgs),
    /// Abandon the draft
    Clear,
    /// Move the draft to a step
    Step {
        /// `select_tickets`, `details`, `payment` or `confirmation`
        step: CheckoutStep,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Config comes first so Sentry is up before the subscriber is installed
    let config = ClientConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "boxoffice=info,boxoffice_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load(config)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&ctx, &email, password).await?;
        }
        Commands::Logout => commands::session::logout(&ctx),
        Commands::Whoami { refresh } => commands::session::whoami(&ctx, refresh).await?,
        Commands::Sidebar { collapsed } => commands::session::sidebar(&ctx, collapsed),
        Commands::VerifyEmail => commands::session::verify_email(&ctx).await?,
        Commands::Account { action } => match action {
            AccountAction::Show => commands::account::show(&ctx).await?,
            AccountAction::Update(args) => commands::account::update(&ctx, args).await?,
        },
        Commands::Tiers { action } => match action {
            TiersAction::List { event_id } => commands::tiers::list(&ctx, event_id).await?,
            TiersAction::Create {
                event_id,
                name,
                price,
                currency,
                quantity,
                max_per_order,
                visibility,
            } => {
                let input = boxoffice_core::TicketTierInput {
                    name,
                    description: None,
                    price: boxoffice_core::Price::new(price, currency),
                    quantity_total: quantity,
                    max_per_order,
                    sales_start: None,
                    sales_end: None,
                    visibility,
                };
                commands::tiers::create(&ctx, event_id, input).await?;
            }
            TiersAction::Update {
                tier_id,
                name,
                price,
                currency,
                quantity,
                max_per_order,
                visibility,
            } => {
                let update = boxoffice_core::TicketTierUpdate {
                    name,
                    price: price.map(|amount| {
                        boxoffice_core::Price::new(amount, currency)
                    }),
                    quantity_total: quantity,
                    max_per_order,
                    visibility,
                    ..Default::default()
                };
                commands::tiers::update(&ctx, tier_id, update).await?;
            }
        },
        Commands::Ticket { action } => match action {
            TicketAction::Invalidate { ticket_id, reason } => {
                commands::tickets::invalidate(&ctx, ticket_id, reason).await?;
            }
        },
        Commands::Payments => commands::payments::dashboard(&ctx).await?,
        Commands::Checkout { action } => match action {
            CheckoutAction::Show => commands::checkout::show(&ctx),
            CheckoutAction::Set(args) => commands::checkout::set(&ctx, args)?,
            CheckoutAction::Clear => commands::checkout::clear_draft(&ctx),
            CheckoutAction::Step { step } => commands::checkout::step(&ctx, step),
        },
        Commands::Route { path } => commands::route::resolve(&ctx, &path)?,
    }
    Ok(())
}
