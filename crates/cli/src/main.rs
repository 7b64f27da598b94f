//! RK Industry CLI - terminal front end for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Check the backend is reachable
//! rk-cli status
//!
//! # Sign in (password from RK_PASSWORD or prompted on stdin)
//! rk-cli login -e ann@example.com
//!
//! # Browse and buy
//! rk-cli products --category clothing
//! rk-cli add-to-cart <product-id>
//! rk-cli orders place --payment bkash
//!
//! # Portfolio contact form
//! rk-cli contact send -n Ann -e ann@example.com -m "Hello"
//! ```
//!
//! The session persists between invocations in `$RK_STATE_DIR/storage.json`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rk_industry_core::{CartItemId, PaymentMethod, ProductCategory, ProductId};
use rk_industry_storefront::config::StorefrontConfig;
use rk_industry_storefront::error::AppError;
use rk_industry_storefront::services::SessionStore;
use rk_industry_storefront::views::ViewShell;

mod commands;

use commands::output::StdoutNotifier;

#[derive(Parser)]
#[command(name = "rk-cli")]
#[command(author, version, about = "RK Industry storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend answers
    Status,
    /// Show the signed-in user
    Whoami,
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(long, env = "RK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(long, env = "RK_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        phone: String,

        #[arg(short, long)]
        address: String,
    },
    /// Sign out and forget the stored credential
    Logout,
    /// List the catalog
    Products {
        /// `clothing`, `electronics` or `accessories`
        #[arg(short, long)]
        category: Option<ProductCategory>,
    },
    /// Add one unit of a product to the cart
    AddToCart { product_id: ProductId },
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Order history and checkout
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Portfolio contact form
    Contact {
        #[command(subcommand)]
        action: ContactAction,
    },
    /// Render the header and footer for the current session
    Shell,
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines with totals
    List,
    /// Remove a cart line
    Remove { item_id: CartItemId },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List past orders
    List,
    /// Order everything in the cart
    Place {
        /// `payoneer`, `bkash`, `nagad` or `bank-transfer`
        #[arg(short, long)]
        payment: PaymentMethod,

        /// Defaults to the address on the account
        #[arg(short, long)]
        address: Option<String>,
    },
}

#[derive(Subcommand)]
enum ContactAction {
    /// Send a message
    Send {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(long, default_value = "")]
        project: String,

        #[arg(short, long)]
        message: String,
    },
    /// List received messages
    List,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
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
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            commands::output::error(&AppError::from(e).user_message());
            return ExitCode::FAILURE;
        }
    };

    // Must be done before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output stays pipeable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rk_industry_storefront=info,rk_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            if !e.is_notified() {
                commands::output::error(&e.user_message());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), AppError> {
    if matches!(cli.command, Commands::Logout) {
        let session = SessionStore::from_config(config)?;
        commands::account::logout(&session);
        return Ok(());
    }

    let shell = ViewShell::from_config(config, Arc::new(StdoutNotifier)).await?;

    match cli.command {
        Commands::Status => commands::account::status(&shell).await?,
        Commands::Whoami => commands::account::whoami(&shell),
        Commands::Login { email, password } => {
            commands::account::login(&shell, &email, password).await?;
        }
        Commands::Register {
            email,
            password,
            name,
            phone,
            address,
        } => {
            commands::account::register(&shell, &email, password, &name, &phone, &address)
                .await?;
        }
        Commands::Logout => unreachable!("handled before mounting"),
        Commands::Products { category } => commands::shop::products(&shell, category).await,
        Commands::AddToCart { product_id } => {
            commands::shop::add_to_cart(&shell, &product_id).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::List => commands::shop::cart(&shell).await?,
            CartAction::Remove { item_id } => commands::shop::remove(&shell, &item_id).await?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&shell).await?,
            OrdersAction::Place { payment, address } => {
                commands::orders::place(&shell, payment, address).await?;
            }
        },
        Commands::Contact { action } => match action {
            ContactAction::Send {
                name,
                email,
                project,
                message,
            } => commands::contact::send(&shell, &name, &email, &project, &message).await?,
            ContactAction::List => commands::contact::list(&shell).await?,
        },
        Commands::Shell => commands::shell::render(&shell),
    }
    Ok(())
}
