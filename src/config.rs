//! Command-line and environment configuration.

use crate::notify::telegram::DEFAULT_PREFIX;
use crate::notify::transport::DEFAULT_TIMEOUT_SECS;
use crate::types::Credentials;
use clap::Parser;

/// Message sent when none is given on the command line.
pub const DEFAULT_MESSAGE: &str = "No manual message provided.";

/// Push a notification to a Telegram chat.
#[derive(Parser, Debug, Clone)]
#[command(name = "guard-alert")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Message text to send
    #[arg(default_value = DEFAULT_MESSAGE)]
    pub message: String,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Telegram chat ID to notify
    #[arg(long, env = "TELEGRAM_CHAT_ID", hide_env_values = true)]
    pub telegram_chat_id: Option<String>,

    /// Tag prepended to the message
    #[arg(long, env = "GUARD_ALERT_PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Credentials resolved from flags or environment.
    pub fn credentials(&self) -> Credentials {
        Credentials::from_parts(self.telegram_token.clone(), self.telegram_chat_id.clone())
    }
}
