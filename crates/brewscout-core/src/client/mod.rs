//! The API client: the single path every gateway call goes through.
//!
//! A call runs through base URL resolution, bearer token attachment, the
//! optional GET cache, one refresh-and-retry on a 401, and response parsing.
//!
//! ```ignore
//! let client = ApiClient::new(&ApiConfig::from_env(), transport, session, cache)
//!     .with_session_expired_hook(Arc::new(|| tracing::warn!("Please log in again")));
//!
//! let shops: Page<CoffeeShop> = client
//!     .page(ApiRequest::get("/api/coffeeshops").cache_for(Duration::from_secs(60)))
//!     .await?;
//! ```

mod config;
mod query;
mod request;
pub mod response;

use std::sync::Arc;

use brewscout_shared::dto::TokenPair;
use brewscout_shared::{ApiResponse, Page, PaginationHeaders};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{HttpRequest, HttpResponse, Method, MultipartForm, RequestBody};
use crate::error::{ApiError, ClientError};
use crate::ports::{Cache, HttpTransport, SessionStore};

pub use config::{
    ApiConfig, DEFAULT_LOCAL_BASE_URL, DEFAULT_PRODUCTION_BASE_URL, DEFAULT_REFRESH_PATH,
};
pub use query::{QueryParams, QueryValue};
pub use request::ApiRequest;

use response::parse_response;

/// Header carrying the per-call correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Invoked when the session cannot be refreshed and the tokens were cleared.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Gateway client. Cheap to clone; clones share session, cache and refresh state.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    refresh_path: String,
    transport: Arc<dyn HttpTransport>,
    session: Arc<dyn SessionStore>,
    cache: Arc<dyn Cache>,
    on_session_expired: Option<SessionExpiredHook>,
    refresh_lock: Arc<Mutex<()>>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        transport: Arc<dyn HttpTransport>,
        session: Arc<dyn SessionStore>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        let base_url = config.resolve_base_url();
        tracing::debug!(base_url = %base_url, "API client configured");

        Self {
            base_url,
            refresh_path: config.refresh_path.clone(),
            transport,
            session,
            cache,
            on_session_expired: None,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_session_expired_hook(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Send a request and return the parsed, pagination-annotated payload.
    pub async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let key = request.cache_key();
        let ttl = request.effective_cache_ttl();

        if ttl.is_some() {
            if let Some(hit) = self.cache.get(&key).await {
                tracing::debug!(key = %key, "Response cache hit");
                return Ok(hit);
            }
        }

        let payload = self.execute(&request, &request.path_and_query()).await?;

        if let Some(ttl) = ttl {
            match self.cache.set(&key, payload.clone(), ttl).await {
                Ok(()) => tracing::debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "Response cached"),
                Err(e) => tracing::warn!(key = %key, error = %e, "Failed to cache response"),
            }
        }

        Ok(payload)
    }

    /// Send and decode the whole payload as `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let payload = self.send(request).await?;
        serde_json::from_value(payload).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Send, decode the envelope, and return its `data`.
    pub async fn data<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let payload = self.send(request).await?;
        let (data, _) = unwrap_envelope::<T>(payload)?;
        Ok(data)
    }

    /// Send a list request and return its items with the pagination headers.
    pub async fn page<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Page<T>, ClientError> {
        let payload = self.send(request).await?;
        let (items, pagination) = unwrap_envelope::<Vec<T>>(payload)?;
        Ok(Page { items, pagination })
    }

    /// POST a multipart form. Shares auth, retry and parsing with [`send`](Self::send).
    pub async fn upload(&self, path: &str, form: MultipartForm) -> Result<Value, ClientError> {
        self.send(ApiRequest::post(path).multipart(form)).await
    }

    /// Drop every cached response whose key starts with `prefix`.
    pub async fn invalidate_cache(&self, prefix: &str) {
        match self.cache.invalidate_prefix(prefix).await {
            Ok(removed) => tracing::debug!(prefix = %prefix, removed, "Response cache invalidated"),
            Err(e) => tracing::warn!(prefix = %prefix, error = %e, "Failed to invalidate cache"),
        }
    }

    pub async fn clear_cache(&self) {
        if let Err(e) = self.cache.clear().await {
            tracing::warn!(error = %e, "Failed to clear response cache");
        }
    }

    async fn execute(&self, request: &ApiRequest, path_and_query: &str) -> Result<Value, ClientError> {
        let request_id = Uuid::new_v4().to_string();
        let token = self.session.access_token();

        let first = self
            .dispatch(request, path_and_query, token.as_deref(), &request_id)
            .await?;

        match token {
            Some(stale) if first.status == 401 => {
                tracing::debug!(path = %path_and_query, request_id = %request_id, "Access token rejected");
                let fresh = self.refresh_session(&stale, first).await?;
                let retried = self
                    .dispatch(request, path_and_query, Some(&fresh), &request_id)
                    .await?;
                parse_response(retried)
            }
            _ => parse_response(first),
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        path_and_query: &str,
        token: Option<&str>,
        request_id: &str,
    ) -> Result<HttpResponse, ClientError> {
        let mut headers = Vec::with_capacity(request.headers().len() + 3);
        if !request.body().is_multipart() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        headers.push((REQUEST_ID_HEADER.to_string(), request_id.to_string()));
        headers.extend(request.headers().iter().cloned());

        let http_request = HttpRequest {
            method: request.method(),
            url: format!("{}{}", self.base_url, path_and_query),
            headers,
            body: request.body().clone(),
        };

        tracing::debug!(
            method = %request.method(),
            path = %path_and_query,
            request_id = %request_id,
            authenticated = token.is_some(),
            "Dispatching request"
        );

        Ok(self.transport.send(http_request).await?)
    }

    /// Obtain a usable access token after `stale` was rejected.
    ///
    /// Concurrent callers queue on the refresh lock; whoever finds the stored
    /// token already replaced reuses it instead of refreshing again.
    async fn refresh_session(
        &self,
        stale: &str,
        rejected: HttpResponse,
    ) -> Result<String, ClientError> {
        let _guard = self.refresh_lock.lock().await;

        match self.session.access_token() {
            Some(current) if current != stale => {
                tracing::debug!("Access token already refreshed by a concurrent call");
                return Ok(current);
            }
            // A concurrent call already failed to refresh and expired the session.
            None => {
                tracing::debug!("Session already expired by a concurrent call");
                return Err(rejection(rejected));
            }
            Some(_) => {}
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            self.expire_session();
            return Err(rejection(rejected));
        };

        match self.request_refresh(&refresh_token).await {
            Ok(tokens) => {
                self.session.set_tokens(&tokens)?;
                tracing::info!("Access token refreshed");
                Ok(tokens.access_token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed");
                self.expire_session();
                Err(e)
            }
        }
    }

    async fn request_refresh(&self, refresh_token: &str) -> Result<TokenPair, ClientError> {
        let path = QueryParams::new()
            .with("refreshToken", refresh_token)
            .apply_to(&self.refresh_path);
        let http_request = HttpRequest {
            method: Method::Get,
            url: format!("{}{}", self.base_url, path),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: RequestBody::Empty,
        };

        let reply = self.transport.send(http_request).await?;
        let payload = parse_response(reply)?;
        let (tokens, _) = unwrap_envelope::<TokenPair>(payload)?;
        Ok(tokens)
    }

    fn expire_session(&self) {
        if let Err(e) = self.session.clear_tokens() {
            tracing::warn!(error = %e, "Failed to clear session tokens");
        }
        tracing::warn!("Session expired");
        if let Some(hook) = &self.on_session_expired {
            hook();
        }
    }
}

/// The error a rejected (401) response turns into.
fn rejection(rejected: HttpResponse) -> ClientError {
    parse_response(rejected)
        .err()
        .unwrap_or_else(|| ApiError::from_status(401).into())
}

/// Decode an envelope payload into its data and pagination headers.
///
/// An envelope reporting `isSuccess: false` on a 2xx response becomes an
/// [`ApiError`] with status 200 and the raw body attached.
fn unwrap_envelope<T: DeserializeOwned>(
    payload: Value,
) -> Result<(T, PaginationHeaders), ClientError> {
    let envelope: ApiResponse<T> = serde_json::from_value(payload.clone())
        .map_err(|e| ClientError::Decode(e.to_string()))?;

    if !envelope.is_success {
        let message = if envelope.message.trim().is_empty() {
            "Request was not successful".to_string()
        } else {
            envelope.message
        };
        return Err(ApiError::new(200, message).with_data(payload).into());
    }

    let data = match envelope.data {
        Some(data) => data,
        // Lets `T = Option<_>` or `()` accept a missing `data`.
        None => T::deserialize(Value::Null)
            .map_err(|_| ClientError::Decode("envelope has no data".to_string()))?,
    };

    Ok((data, envelope.headers.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_returns_data_and_headers() {
        let payload = json!({
            "isSuccess": true,
            "message": "",
            "data": ["a", "b"],
            "headers": { "X-Total-Pages": "5" }
        });

        let (data, headers) = unwrap_envelope::<Vec<String>>(payload).unwrap();

        assert_eq!(data, vec!["a", "b"]);
        assert_eq!(headers.total_pages(), Some(5));
    }

    #[test]
    fn test_unwrap_envelope_failure_flag() {
        let payload = json!({ "isSuccess": false, "message": "Already reviewed" });

        let err = unwrap_envelope::<Value>(payload.clone()).unwrap_err();
        let api = err.as_api_error().unwrap();

        assert_eq!(api.message, "Already reviewed");
        assert_eq!(api.data.as_ref(), Some(&payload));
    }

    #[test]
    fn test_unwrap_envelope_missing_data() {
        let payload = json!({ "isSuccess": true, "message": "deleted" });

        assert_eq!(unwrap_envelope::<Option<u32>>(payload.clone()).unwrap().0, None);
        assert!(unwrap_envelope::<()>(payload.clone()).is_ok());
        assert!(matches!(
            unwrap_envelope::<u32>(payload),
            Err(ClientError::Decode(_))
        ));
    }
}
