//! Client-level error types.

use serde_json::Value;
use thiserror::Error;

use crate::ports::{SessionError, TransportError};

/// Error raised for any HTTP response the gateway did not answer with success.
///
/// This is the one shape UI layers need to present: a message, the HTTP
/// status, and the raw response body when there was one.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
    pub data: Option<Value>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            data: None,
        }
    }

    /// Error carrying only a message derived from the status code.
    pub fn from_status(status: u16) -> Self {
        Self::new(status, status_message(status))
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Fallback message for a status when the body has none.
pub fn status_message(status: u16) -> String {
    let reason = match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => return format!("Request failed with status {status}"),
    };
    format!("Request failed with status {status} ({reason})")
}

/// Everything an [`ApiClient`](crate::client::ApiClient) call can fail with.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No response was received; passed through untouched.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),

    #[error("Invalid response payload: {0}")]
    Decode(String),

    #[error("Failed to encode request body: {0}")]
    Encode(String),
}

impl ClientError {
    /// HTTP status, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(err) => Some(err.status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_known_and_unknown() {
        assert_eq!(
            status_message(404),
            "Request failed with status 404 (Not Found)"
        );
        assert_eq!(status_message(418), "Request failed with status 418");
    }

    #[test]
    fn test_display_names_status_once() {
        assert_eq!(
            ApiError::from_status(401).to_string(),
            "Request failed with status 401 (Unauthorized)"
        );
        assert_eq!(ApiError::new(400, "revoked").to_string(), "revoked");
    }

    #[test]
    fn test_client_error_status() {
        let err = ClientError::from(ApiError::from_status(401));
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());

        let err = ClientError::from(TransportError::Timeout);
        assert_eq!(err.status(), None);
        assert!(!err.is_unauthorized());
    }
}
