//! Core types and errors for the alert dispatcher.

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";

/// Environment variable holding the destination chat ID.
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Errors that can occur while setting up or reporting a dispatch.
///
/// Delivery problems are not errors: they come back as a [`DispatchOutcome`].
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, AlertError>;

/// Bot token and chat ID needed to address the Bot API.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    bot_token: String,
    chat_id: String,
}

impl Credentials {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Build credentials from optional values, treating `None` as empty.
    pub fn from_parts(bot_token: Option<String>, chat_id: Option<String>) -> Self {
        Self {
            bot_token: bot_token.unwrap_or_default(),
            chat_id: chat_id.unwrap_or_default(),
        }
    }

    /// Read credentials from `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID`.
    pub fn from_env() -> Self {
        Self::from_parts(
            std::env::var(TOKEN_ENV).ok(),
            std::env::var(CHAT_ID_ENV).ok(),
        )
    }

    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Both values are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.bot_token.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("Credentials")
            .field("bot_token", &token)
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Failure to get any HTTP response back from the Bot API.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TransportError {
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(#[serde(serialize_with = "serialize_secs")] Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Other(String),
}

fn serialize_secs<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_secs())
}

/// Why a message was not delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliveryFailure {
    /// The API answered with a non-200 status.
    Rejected { status: u16, body: String },
    /// No response was received.
    Transport { error: TransportError },
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status, body } => write!(f, "HTTP {}: {}", status, body),
            Self::Transport { error } => write!(f, "{}", error),
        }
    }
}

/// Result of a single dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Sent,
    ConfigurationMissing,
    DeliveryFailed { reason: DeliveryFailure },
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}
