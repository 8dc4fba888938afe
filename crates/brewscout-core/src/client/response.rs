//! Turning raw responses into payloads or typed errors.

use brewscout_shared::PaginationHeaders;
use serde_json::{Map, Value};

use crate::domain::HttpResponse;
use crate::error::{ApiError, ClientError};

/// Member added to object payloads when pagination headers are present.
pub const PAGINATION_FIELD: &str = "headers";

pub fn is_json(response: &HttpResponse) -> bool {
    response
        .content_type()
        .map(|ct| {
            let mime = ct.split(';').next().unwrap_or_default().trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

pub fn pagination_headers(response: &HttpResponse) -> PaginationHeaders {
    PaginationHeaders::from_lookup(|name| response.header(name))
}

/// Parse a response into its payload.
///
/// - non-JSON or empty bodies become `{}` on success and a status-derived
///   [`ApiError`] otherwise
/// - JSON error bodies keep their `message` and travel as the error's `data`
/// - JSON object payloads gain a `headers` member with pagination metadata
pub fn parse_response(response: HttpResponse) -> Result<Value, ClientError> {
    let status = response.status;

    if !is_json(&response) || response.body.iter().all(u8::is_ascii_whitespace) {
        if response.is_success() {
            return Ok(Value::Object(Map::new()));
        }
        return Err(ApiError::from_status(status).into());
    }

    let body: Value = match serde_json::from_slice(&response.body) {
        Ok(body) => body,
        Err(e) if response.is_success() => return Err(ClientError::Decode(e.to_string())),
        Err(_) => return Err(ApiError::from_status(status).into()),
    };

    if !response.is_success() {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string);
        let error = match message {
            Some(message) => ApiError::new(status, message),
            None => ApiError::from_status(status),
        };
        return Err(error.with_data(body).into());
    }

    Ok(annotate_pagination(body, &pagination_headers(&response)))
}

/// Attach pagination headers to object payloads. Anything else passes through.
pub fn annotate_pagination(mut payload: Value, headers: &PaginationHeaders) -> Value {
    if headers.is_empty() {
        return payload;
    }
    if let Value::Object(map) = &mut payload {
        if let Ok(value) = serde_json::to_value(headers) {
            map.insert(PAGINATION_FIELD.to_string(), value);
        }
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pagination_headers_are_attached() {
        let response = HttpResponse::json(200, &json!({ "isSuccess": true, "data": [] }))
            .with_header("X-Total-Pages", "5")
            .with_header("X-Total-Count", "97");

        let payload = parse_response(response).unwrap();

        assert_eq!(payload["headers"]["X-Total-Pages"], json!("5"));
        assert_eq!(payload["headers"]["X-Total-Count"], json!("97"));
        assert!(payload["headers"].get("X-Page-Size").is_none());
    }

    #[test]
    fn test_no_headers_member_without_pagination() {
        let payload =
            parse_response(HttpResponse::json(200, &json!({ "isSuccess": true }))).unwrap();

        assert!(payload.get("headers").is_none());
    }

    #[test]
    fn test_primitive_payloads_pass_through() {
        let response = HttpResponse::json(200, &json!(42)).with_header("X-Total-Pages", "5");

        assert_eq!(parse_response(response).unwrap(), json!(42));
    }

    #[test]
    fn test_non_json_success_is_empty_object() {
        let no_content = HttpResponse::new(204);
        let text = HttpResponse::new(200)
            .with_header("Content-Type", "text/plain")
            .with_body("ok");

        assert_eq!(parse_response(no_content).unwrap(), json!({}));
        assert_eq!(parse_response(text).unwrap(), json!({}));
    }

    #[test]
    fn test_non_json_failure_uses_status_message() {
        let response = HttpResponse::new(502)
            .with_header("Content-Type", "text/html")
            .with_body("<html>bad gateway</html>");

        let err = parse_response(response).unwrap_err();
        let api = err.as_api_error().unwrap();

        assert_eq!(api.status, 502);
        assert_eq!(api.message, "Request failed with status 502 (Bad Gateway)");
        assert!(api.data.is_none());
    }

    #[test]
    fn test_json_failure_keeps_message_and_body() {
        let body = json!({ "isSuccess": false, "message": "Shop not found", "errorCode": "SHOP_404" });

        let err = parse_response(HttpResponse::json(404, &body)).unwrap_err();
        let api = err.as_api_error().unwrap();

        assert_eq!(api.status, 404);
        assert_eq!(api.message, "Shop not found");
        assert_eq!(api.data.as_ref(), Some(&body));
    }

    #[test]
    fn test_json_failure_without_message_falls_back() {
        let err = parse_response(HttpResponse::json(403, &json!({ "errors": {} }))).unwrap_err();

        assert_eq!(
            err.as_api_error().unwrap().message,
            "Request failed with status 403 (Forbidden)"
        );
    }

    #[test]
    fn test_vendor_json_content_type() {
        let response = HttpResponse::new(200)
            .with_header("Content-Type", "application/problem+json")
            .with_body(r#"{"title":"x"}"#);

        assert_eq!(parse_response(response).unwrap(), json!({ "title": "x" }));
    }

    #[test]
    fn test_malformed_json_success_is_decode_error() {
        let response = HttpResponse::new(200)
            .with_header("Content-Type", "application/json")
            .with_body("{not json");

        assert!(matches!(
            parse_response(response),
            Err(ClientError::Decode(_))
        ));
    }
}
