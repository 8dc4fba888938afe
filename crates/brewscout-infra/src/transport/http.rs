//! reqwest-backed HTTP transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use url::Url;

use brewscout_core::domain::{FormPart, HttpRequest, HttpResponse, Method, RequestBody};
use brewscout_core::ports::{HttpTransport, TransportError};

/// HTTP transport configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Origin that relative request URLs resolve against (e.g. the dev proxy).
    pub origin: Option<String>,
    /// Whole-request timeout. `None` leaves it to the OS.
    pub timeout: Option<Duration>,
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            origin: None,
            timeout: None,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            origin: std::env::var("APP_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            timeout: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
            connect_timeout: Duration::from_secs(
                std::env::var("HTTP_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}

pub struct ReqwestTransport {
    client: Client,
    origin: Option<Url>,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let origin = config
            .origin
            .as_deref()
            .map(|raw| Url::parse(raw).map_err(|e| TransportError::InvalidUrl(format!("{raw}: {e}"))))
            .transpose()?;

        let mut builder = Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        tracing::info!(
            origin = ?config.origin,
            timeout_secs = config.timeout.map(|t| t.as_secs()),
            "HTTP transport ready"
        );

        Ok(Self { client, origin })
    }

    /// Create from environment configuration.
    pub fn from_env() -> Result<Self, TransportError> {
        Self::new(TransportConfig::from_env())
    }

    fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin = self.origin.as_ref().ok_or_else(|| {
                    TransportError::InvalidUrl(format!("relative URL {url} without an origin"))
                })?;
                origin
                    .join(url)
                    .map_err(|e| TransportError::InvalidUrl(format!("{url}: {e}")))
            }
            Err(e) => Err(TransportError::InvalidUrl(format!("{url}: {e}"))),
        }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_form(parts: Vec<FormPart>) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let mut file = Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = content_type {
                    file = file
                        .mime_str(&mime)
                        .map_err(|e| TransportError::Request(e.to_string()))?;
                }
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

fn map_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.resolve(&request.url)?;
        let mut builder = self.client.request(to_reqwest_method(request.method), url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let bytes =
                    serde_json::to_vec(&value).map_err(|e| TransportError::Request(e.to_string()))?;
                builder.body(bytes)
            }
            RequestBody::Multipart(form) => builder.multipart(to_form(form.into_parts())?),
        };

        let response = builder.send().await.map_err(map_error)?;

        let mut reply = HttpResponse::new(response.status().as_u16());
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                reply.insert_header(name.as_str(), value);
            }
        }
        let body = response.bytes().await.map_err(map_error)?;

        Ok(reply.with_body(body.to_vec()))
    }
}
