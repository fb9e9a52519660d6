//! guard-alert - push a notification to a Telegram chat.
//!
//! CLI entry point.

use clap::Parser;
use guard_alert::{AlertDispatcher, Config, ConsoleOutput, DispatchOutcome};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Variables already in the environment win over .env entries.
    let dotenv = dotenvy::dotenv();

    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.verbose {
            EnvFilter::new("guard_alert=debug,info")
        } else {
            EnvFilter::new("guard_alert=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => error!("Failed to read .env file: {}", e),
    }

    match run(&config).await {
        Ok(outcome) => ExitCode::from(exit_status(&outcome)),
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> guard_alert::Result<DispatchOutcome> {
    let dispatcher = AlertDispatcher::new(config.timeout)?.with_prefix(config.prefix.as_str());
    let credentials = config.credentials();
    debug!("Dispatching with {:?}", credentials);

    let outcome = dispatcher.dispatch(&credentials, &config.message).await;
    ConsoleOutput::new(config.json).print_outcome(&outcome)?;

    Ok(outcome)
}

/// Process exit status for an outcome.
fn exit_status(outcome: &DispatchOutcome) -> u8 {
    match outcome {
        DispatchOutcome::Sent => 0,
        DispatchOutcome::DeliveryFailed { .. } => 1,
        DispatchOutcome::ConfigurationMissing => 2,
    }
}
