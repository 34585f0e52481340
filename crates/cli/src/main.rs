//! Mobile-commerce export CLI.
//!
//! # Usage
//!
//! ```bash
//! # Resolve relations offline from JSON files
//! mx-cli relations --input request.json --rows rows.json
//!
//! # Resolve relations against the host catalog database
//! mx-cli relations --input request.json
//!
//! # Include lookup statistics in the output
//! mx-cli relations --input request.json --rows rows.json --report
//!
//! # Show the effective configuration
//! mx-cli config
//! ```
//!
//! # Commands
//!
//! - `relations` - Resolve cross-sell, upsell and related UIDs for one product
//! - `config` - Print the effective configuration (secrets redacted)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mcommerce_export::ExportConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "mx-cli")]
#[command(author, version, about = "Mobile-commerce export tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve relation UIDs for one product
    Relations {
        /// Request file with `cross_sell`, `upsell` and `related` references
        #[arg(short, long)]
        input: PathBuf,

        /// Parent rows file; queries the catalog database when omitted
        #[arg(short, long)]
        rows: Option<PathBuf>,

        /// Print lookup statistics along with the relations
        #[arg(long)]
        report: bool,
    },
    /// Print the effective configuration
    Config,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ExportConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

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
    let config = match ExportConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mcommerce_export=info,mx_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ExportConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Relations {
            input,
            rows,
            report,
        } => commands::relations::resolve(config, &input, rows.as_deref(), report).await?,
        Commands::Config => commands::config::show(config)?,
    }
    Ok(())
}
