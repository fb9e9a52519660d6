//! Colored console output for dispatch outcomes.

use crate::types::{DeliveryFailure, DispatchOutcome, Result, CHAT_ID_ENV, TOKEN_ENV};
use colored::Colorize;

/// Console output handler with colors and formatting.
pub struct ConsoleOutput {
    json_mode: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(json_mode: bool) -> Self {
        Self { json_mode }
    }

    /// Print an outcome: successes to stdout, failures to stderr.
    pub fn print_outcome(&self, outcome: &DispatchOutcome) -> Result<()> {
        if self.json_mode {
            println!("{}", to_json(outcome)?);
            return Ok(());
        }

        let line = describe(outcome);
        if outcome.is_sent() {
            println!("{} {}", "[+]".bright_green(), line);
        } else {
            eprintln!("{} {}", "[!]".bright_red(), line);
        }
        Ok(())
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Single-line JSON form of an outcome.
pub fn to_json(outcome: &DispatchOutcome) -> Result<String> {
    Ok(serde_json::to_string(outcome)?)
}

/// Human-readable one-line description of an outcome.
pub fn describe(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Sent => "Notification sent! Check your phone.".to_string(),
        DispatchOutcome::ConfigurationMissing => format!(
            "Config Error: bot token and/or chat ID missing (set {} and {}, \
             pass --telegram-token and --telegram-chat-id, or check your .env file)",
            TOKEN_ENV, CHAT_ID_ENV
        ),
        DispatchOutcome::DeliveryFailed {
            reason: DeliveryFailure::Rejected { status, body },
        } => format!("Telegram API complained (HTTP {}): {}", status, body),
        DispatchOutcome::DeliveryFailed {
            reason: DeliveryFailure::Transport { error },
        } => format!("Failed to send the alert: {}", error),
    }
}
