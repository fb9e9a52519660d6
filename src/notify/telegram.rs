//! Telegram Bot API alert dispatcher.

use crate::notify::transport::{HttpTransport, Transport};
use crate::types::{Credentials, DeliveryFailure, DispatchOutcome, Result};
use serde::Serialize;
use tracing::debug;

/// Public Bot API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Tag prepended to every alert so the recipient can tell where it came from.
pub const DEFAULT_PREFIX: &str = "🚀 [Cybertech Lab]: ";

/// Form fields of a `sendMessage` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessageForm {
    pub chat_id: String,
    pub text: String,
}

/// A fully built `sendMessage` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub url: String,
    pub form: SendMessageForm,
}

/// Delivers one message to one Telegram chat and reports the outcome.
///
/// The dispatcher holds no credentials and no mutable state; every call to
/// [`AlertDispatcher::dispatch`] is independent of the ones before it.
pub struct AlertDispatcher<T = HttpTransport> {
    transport: T,
    api_base: String,
    prefix: String,
}

impl AlertDispatcher<HttpTransport> {
    /// Create a dispatcher backed by a reqwest client with the given timeout.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(timeout_secs)?))
    }
}

impl<T: Transport> AlertDispatcher<T> {
    /// Create a dispatcher on top of an existing transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            api_base: DEFAULT_API_BASE.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Point the dispatcher at another Bot API server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the tag prepended to every message.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Build the `sendMessage` request for a message without sending it.
    pub fn build_request(&self, credentials: &Credentials, message: &str) -> SendMessageRequest {
        SendMessageRequest {
            url: format!(
                "{}/bot{}/sendMessage",
                self.api_base,
                credentials.bot_token()
            ),
            form: SendMessageForm {
                chat_id: credentials.chat_id().to_string(),
                text: format!("{}{}", self.prefix, message),
            },
        }
    }

    /// Send `message` to the chat named by `credentials`.
    ///
    /// Never fails: missing credentials, rejected requests and network faults
    /// all come back as a [`DispatchOutcome`]. Incomplete credentials are
    /// caught before any request is made. Nothing is retried.
    pub async fn dispatch(&self, credentials: &Credentials, message: &str) -> DispatchOutcome {
        if !credentials.is_complete() {
            debug!("Telegram credentials incomplete, skipping request");
            return DispatchOutcome::ConfigurationMissing;
        }

        let request = self.build_request(credentials, message);

        match self.transport.send(&request).await {
            Ok(response) if response.status == 200 => {
                debug!("Telegram message sent successfully");
                DispatchOutcome::Sent
            }
            Ok(response) => {
                debug!(
                    "Telegram rejected message with HTTP {}: {}",
                    response.status, response.body
                );
                DispatchOutcome::DeliveryFailed {
                    reason: DeliveryFailure::Rejected {
                        status: response.status,
                        body: response.body,
                    },
                }
            }
            Err(error) => {
                debug!("Failed to reach Telegram: {}", error);
                DispatchOutcome::DeliveryFailed {
                    reason: DeliveryFailure::Transport { error },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::transport::TransportResponse;
    use crate::types::TransportError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Transport returning a canned result and recording every request.
    struct MockTransport {
        reply: std::result::Result<TransportResponse, TransportError>,
        calls: AtomicUsize,
        last_request: Mutex<Option<SendMessageRequest>>,
    }

    impl MockTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self::with_reply(Ok(TransportResponse {
                status,
                body: body.to_string(),
            }))
        }

        fn failing(error: TransportError) -> Self {
            Self::with_reply(Err(error))
        }

        fn with_reply(reply: std::result::Result<TransportResponse, TransportError>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Transport for MockTransport {
        async fn send(
            &self,
            request: &SendMessageRequest,
        ) -> std::result::Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.reply.clone()
        }
    }

    fn creds() -> Credentials {
        Credentials::new("T1", "C1")
    }

    #[tokio::test]
    async fn test_missing_config_makes_no_request() {
        let incomplete = [
            Credentials::new("", "C1"),
            Credentials::new("T1", ""),
            Credentials::new("", ""),
            Credentials::from_parts(None, Some("C1".to_string())),
            Credentials::from_parts(Some("T1".to_string()), None),
        ];

        let dispatcher = AlertDispatcher::with_transport(MockTransport::replying(200, "ok"));
        for credentials in &incomplete {
            let outcome = dispatcher.dispatch(credentials, "hello").await;
            assert_eq!(outcome, DispatchOutcome::ConfigurationMissing);
        }
        assert_eq!(dispatcher.transport.calls(), 0);
    }

    #[test]
    fn test_build_request() {
        let dispatcher = AlertDispatcher::with_transport(MockTransport::replying(200, "ok"));
        let request = dispatcher.build_request(&creds(), "hello");

        assert_eq!(request.url, "https://api.telegram.org/botT1/sendMessage");
        assert_eq!(request.form.chat_id, "C1");
        assert_eq!(request.form.text, format!("{}hello", DEFAULT_PREFIX));
    }

    #[test]
    fn test_build_request_empty_message() {
        let dispatcher = AlertDispatcher::with_transport(MockTransport::replying(200, "ok"));
        let request = dispatcher.build_request(&creds(), "");
        assert_eq!(request.form.text, DEFAULT_PREFIX);
    }

    #[test]
    fn test_custom_prefix_and_api_base() {
        let dispatcher = AlertDispatcher::with_transport(MockTransport::replying(200, "ok"))
            .with_api_base("http://localhost:8081/")
            .with_prefix("[nightly] ");
        let request = dispatcher.build_request(&creds(), "build broke");

        assert_eq!(request.url, "http://localhost:8081/botT1/sendMessage");
        assert_eq!(request.form.text, "[nightly] build broke");
    }

    #[tokio::test]
    async fn test_success() {
        let dispatcher = AlertDispatcher::with_transport(MockTransport::replying(200, "{\"ok\":true}"));

        let outcome = dispatcher.dispatch(&creds(), "test").await;
        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(dispatcher.transport.calls(), 1);

        let sent = dispatcher.transport.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent, dispatcher.build_request(&creds(), "test"));
    }

    #[tokio::test]
    async fn test_rejected_keeps_status_and_body() {
        let dispatcher = AlertDispatcher::with_transport(MockTransport::replying(401, "Unauthorized"));

        match dispatcher.dispatch(&creds(), "test").await {
            DispatchOutcome::DeliveryFailed {
                reason: DeliveryFailure::Rejected { status, body },
            } => {
                assert_eq!(status, 401);
                assert_eq!(body, "Unauthorized");
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_success_codes_are_failures() {
        let dispatcher = AlertDispatcher::with_transport(MockTransport::replying(204, ""));
        let outcome = dispatcher.dispatch(&creds(), "test").await;
        assert!(!outcome.is_sent());
    }

    #[tokio::test]
    async fn test_timeout_is_delivery_failure() {
        let dispatcher = AlertDispatcher::with_transport(MockTransport::failing(
            TransportError::Timeout(Duration::from_secs(10)),
        ));

        match dispatcher.dispatch(&creds(), "test").await {
            DispatchOutcome::DeliveryFailed { reason } => {
                assert!(reason.to_string().contains("timed out"));
            }
            other => panic!("Expected delivery failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_stable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dispatcher = AlertDispatcher::new(5)
            .unwrap()
            .with_api_base(format!("http://{}", addr));

        let first = dispatcher.dispatch(&creds(), "ping").await;
        let second = dispatcher.dispatch(&creds(), "ping").await;

        assert!(matches!(
            first,
            DispatchOutcome::DeliveryFailed {
                reason: DeliveryFailure::Transport { .. }
            }
        ));
        assert_eq!(
            std::mem::discriminant(&first),
            std::mem::discriminant(&second)
        );
    }
}
