//! Logical API request, before base URL and auth headers are applied.

use std::time::Duration;

use brewscout_shared::pagination::{PAGE_NUMBER_HEADER, PAGE_SIZE_HEADER};
use serde::Serialize;
use serde_json::Value;

use super::query::{QueryParams, QueryValue};
use crate::domain::{Method, MultipartForm, RequestBody};
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: QueryParams,
    body: RequestBody,
    headers: Vec<(String, String)>,
    cache_ttl: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: RequestBody::Empty,
            headers: Vec::new(),
            cache_ttl: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push(key, value);
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))?;
        Ok(self.json_value(value))
    }

    pub fn json_value(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Ask for a specific page through the `X-Page-Number`/`X-Page-Size` headers.
    pub fn page(self, number: u32, size: u32) -> Self {
        self.header(PAGE_NUMBER_HEADER, number.to_string())
            .header(PAGE_SIZE_HEADER, size.to_string())
    }

    /// Serve from and store into the response cache for `ttl`. GET only.
    pub fn cache_for(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Path plus query string.
    pub fn path_and_query(&self) -> String {
        self.query.apply_to(&self.path)
    }

    /// Response cache key: path and query, plus any page headers so pages
    /// requested only through [`page`](Self::page) are cached apart.
    pub fn cache_key(&self) -> String {
        let mut key = self.path_and_query();
        let page: Vec<String> = self
            .headers
            .iter()
            .filter(|(name, _)| {
                name.eq_ignore_ascii_case(PAGE_NUMBER_HEADER)
                    || name.eq_ignore_ascii_case(PAGE_SIZE_HEADER)
            })
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        if !page.is_empty() {
            key.push('#');
            key.push_str(&page.join("&"));
        }
        key
    }

    /// TTL that actually applies: positive and on a GET.
    pub fn effective_cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl
            .filter(|ttl| !ttl.is_zero() && !self.method.is_mutating())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_ttl_ignored_for_mutations_and_zero() {
        let ttl = Duration::from_secs(30);

        assert_eq!(
            ApiRequest::get("/api/coffeeshops")
                .cache_for(ttl)
                .effective_cache_ttl(),
            Some(ttl)
        );
        assert_eq!(
            ApiRequest::post("/api/coffeeshops")
                .cache_for(ttl)
                .effective_cache_ttl(),
            None
        );
        assert_eq!(
            ApiRequest::get("/api/coffeeshops")
                .cache_for(Duration::ZERO)
                .effective_cache_ttl(),
            None
        );
        assert_eq!(ApiRequest::get("/api/coffeeshops").effective_cache_ttl(), None);
    }

    #[test]
    fn test_path_and_query_is_host_free() {
        let request = ApiRequest::get("/api/coffeeshops")
            .param("equipments", vec!["v60", "espresso"])
            .param("pageNumber", 2u32);

        assert_eq!(
            request.path_and_query(),
            "/api/coffeeshops?equipments=v60&equipments=espresso&pageNumber=2"
        );
    }

    #[test]
    fn test_cache_key_includes_page_headers() {
        let plain = ApiRequest::get("/api/coffeeshops").param("search", "kiln");
        let first = plain.clone().page(1, 20);
        let second = plain.clone().page(2, 20);

        assert_eq!(plain.cache_key(), "/api/coffeeshops?search=kiln");
        assert_eq!(
            first.cache_key(),
            "/api/coffeeshops?search=kiln#X-Page-Number=1&X-Page-Size=20"
        );
        assert_ne!(first.cache_key(), second.cache_key());
        assert!(second.cache_key().starts_with(&plain.path_and_query()));
    }

    #[test]
    fn test_json_body_and_page_headers() {
        let request = ApiRequest::post("/api/reviews")
            .json(&json!({ "rating": 5 }))
            .unwrap()
            .page(3, 20);

        assert_eq!(request.body(), &RequestBody::Json(json!({ "rating": 5 })));
        assert_eq!(
            request.headers(),
            &[
                ("X-Page-Number".to_string(), "3".to_string()),
                ("X-Page-Size".to_string(), "20".to_string()),
            ]
        );
    }
}
