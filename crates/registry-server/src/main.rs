//! People Registry server binary.
//!
//! Wires the configuration, logging, and HTTP server together and runs
//! until interrupted.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line flags (and their environment variables)
//! 2. Load configuration from YAML, then apply the flags on top
//! 3. Initialize structured logging (tracing)
//! 4. Start the HTTP server over a fresh in-memory store
//! 5. Wait for Ctrl-C, then shut down gracefully

mod cli;
mod config;
mod error;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use registry_api::{AppState, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{LoggingConfig, RegistryConfig};
use crate::error::AppError;

/// Application entry point for the People Registry.
///
/// Usage errors exit with status 2 (from clap). Any failure after that is
/// printed to stderr and exits with status 1.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("people-registry: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), AppError> {
    let (config, source) = RegistryConfig::load(cli.config.as_deref())?;
    let config = config.apply_cli(cli);

    init_logging(&config.logging);

    info!("people-registry starting");
    match &source {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        host = config.server.host,
        port = config.server.port,
        max_body_bytes = config.server.max_body_bytes,
        "Server configuration"
    );

    let state =
        Arc::new(AppState::in_memory().with_max_body_bytes(config.server.max_body_bytes));
    let server = start_server(&config.server_config(), state).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    server.stop().await?;
    info!("people-registry stopped");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when it is set and valid.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
