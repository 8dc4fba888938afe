//! HTTP transport port - abstraction over the network stack.

use async_trait::async_trait;

use crate::domain::{HttpRequest, HttpResponse};

/// Sends one request and returns whatever the server answered.
///
/// Non-2xx statuses are not errors at this level; only failures to obtain
/// a response at all are.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport-level failures (no HTTP response was received).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(String),
}
