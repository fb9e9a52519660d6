//! guard-alert - push a notification to a Telegram chat.
//!
//! This library provides:
//! - Credential handling for the Telegram Bot API
//! - A dispatcher that sends one message and reports a [`DispatchOutcome`]
//! - Console rendering of that outcome
//!
//! # Example
//!
//! ```no_run
//! use guard_alert::{AlertDispatcher, Credentials, DispatchOutcome};
//!
//! #[tokio::main]
//! async fn main() {
//!     let dispatcher = AlertDispatcher::new(10).unwrap();
//!     let credentials = Credentials::new("123456:ABC", "987654321");
//!     match dispatcher.dispatch(&credentials, "disk almost full").await {
//!         DispatchOutcome::Sent => println!("delivered"),
//!         other => eprintln!("not delivered: {:?}", other),
//!     }
//! }
//! ```

pub mod config;
pub mod notify;
pub mod types;

pub use config::{Config, DEFAULT_MESSAGE};
pub use notify::{AlertDispatcher, ConsoleOutput, HttpTransport, Transport};
pub use types::{
    AlertError, Credentials, DeliveryFailure, DispatchOutcome, Result, TransportError,
};
