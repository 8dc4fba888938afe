//! Standardized response envelope returned by every gateway endpoint.

use serde::{Deserialize, Serialize};

use crate::pagination::PaginationHeaders;

/// Envelope wrapping every JSON payload from the gateway.
///
/// `headers` is not sent by the backend. The client fills it in from the
/// pagination response headers before the payload reaches the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub is_success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Validation errors, usually a map of field name to messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<PaginationHeaders>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::ok_with_message(data, "")
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
            data: Some(data),
            error_code: None,
            trace_id: None,
            errors: None,
            headers: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
            data: None,
            error_code: None,
            trace_id: None,
            errors: None,
            headers: None,
        }
    }

    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_gateway_envelope() {
        let body = json!({
            "isSuccess": true,
            "message": "ok",
            "data": [1, 2, 3],
            "traceId": "abc"
        });

        let envelope: ApiResponse<Vec<u32>> = serde_json::from_value(body).unwrap();

        assert!(envelope.is_success);
        assert_eq!(envelope.data, Some(vec![1, 2, 3]));
        assert_eq!(envelope.trace_id.as_deref(), Some("abc"));
        assert!(envelope.headers.is_none());
    }

    #[test]
    fn test_missing_message_and_data_default() {
        let envelope: ApiResponse<String> =
            serde_json::from_value(json!({ "isSuccess": false })).unwrap();

        assert!(!envelope.is_success);
        assert!(envelope.message.is_empty());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_failure_serializes_camel_case() {
        let value =
            serde_json::to_value(ApiResponse::<()>::failure("nope").with_error_code("E42")).unwrap();

        assert_eq!(value["isSuccess"], json!(false));
        assert_eq!(value["errorCode"], json!("E42"));
        assert!(value.get("traceId").is_none());
    }
}
