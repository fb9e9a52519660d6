//! HTTP transport used to deliver Bot API requests.

use crate::notify::telegram::SendMessageRequest;
use crate::types::{AlertError, Result, TransportError};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::trace;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one prepared request and returns whatever the server answered.
pub trait Transport {
    fn send(
        &self,
        request: &SendMessageRequest,
    ) -> impl Future<Output = std::result::Result<TransportResponse, TransportError>> + Send;
}

/// reqwest-backed transport posting form-encoded bodies.
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        if timeout_secs == 0 {
            return Err(AlertError::ConfigError(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("guard-alert/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Map a reqwest error onto a token-free transport error.
    fn classify(&self, err: reqwest::Error) -> TransportError {
        // The URL carries the bot token.
        let err = err.without_url();
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_connect() {
            TransportError::Connect(error_chain(&err))
        } else {
            TransportError::Other(error_chain(&err))
        }
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &SendMessageRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        trace!("POST sendMessage to chat {}", request.form.chat_id);

        let response = self
            .client
            .post(&request.url)
            .form(&request.form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        Ok(TransportResponse { status, body })
    }
}

/// Render an error with its sources, e.g. "error sending request: tcp connect error: ...".
///
/// hyper already prints its cause in `Display`; causes the text already
/// contains are skipped.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
