//! FileDesk: command-line client for a remote folder and file service.
//!
//! Entry point that loads configuration, installs logging and runs one CLI
//! command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use filedesk_cli::Cli;
use filedesk_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env = cli.environment();
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e.message);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::debug!(env = %env, base_url = %config.api.base_url, "Configuration loaded");

    if let Err(e) = cli.execute(config).await {
        tracing::debug!(kind = %e.kind, error = ?e, "Command failed");
        eprintln!("Error: {}", e.message);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
