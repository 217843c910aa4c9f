//! Tutorial CLI - simulate tutorial first visits from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build the backend configuration and analytics client.
//! - Run one simulated session and print the resulting tutorial state as JSON.
//!
//! Does NOT handle:
//! - Tutorial state logic (see `crates/tracker`).
//! - HTTP details of the analytics endpoints (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; stdout carries notifications and the final state only.

mod args;
mod session;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Cli, Commands, LogFormat};
use clap::Parser;
use session::{Flow, Session};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tutorial_client::{AnalyticsClient, MetricsCollector};
use tutorial_config::{Config, ConfigLoader};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(1);
    }

    let cli = Cli::parse();
    init_logging(cli.log_format);

    if let Err(e) = run(cli).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new()
        .from_env()
        .context("Failed to load configuration from environment")?
        .with_base_url(cli.base_url.clone());
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    loader.build().context("Failed to build configuration")
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    let client = AnalyticsClient::builder()
        .from_config(&config)
        .metrics(MetricsCollector::new())
        .build()
        .context("Failed to build analytics client")?;

    let (flow, experience_id) = match cli.command {
        Commands::Editor {
            experience_id,
            returning,
        } => (
            Flow::Editor {
                first_time: !returning,
            },
            experience_id,
        ),
        Commands::Translation {
            experience_id,
            seen_before,
        } => (
            Flow::Translation {
                not_seen_before: !seen_before,
            },
            experience_id,
        ),
    };

    tracing::debug!(
        ?flow,
        experience_id = %experience_id,
        base_url = %config.backend.base_url,
        "Starting session"
    );
    // Beacons time out on their own after the request timeout.
    let flush_timeout = config.backend.timeout + Duration::from_secs(1);
    let state = Session::new(client, flush_timeout)
        .run(flow, &experience_id)
        .await;

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
