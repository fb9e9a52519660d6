//! Notification delivery and reporting.
//!
//! This module handles:
//! - Building and sending Telegram `sendMessage` requests
//! - The HTTP transport seam behind them
//! - Colored console and JSON output of outcomes

pub mod console;
pub mod telegram;
pub mod transport;

pub use console::ConsoleOutput;
pub use telegram::{AlertDispatcher, SendMessageForm, SendMessageRequest};
pub use transport::{HttpTransport, Transport, TransportResponse};
