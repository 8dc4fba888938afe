//! Scripted transport for tests - replays canned responses and records requests.
//!
//! Routes match on method and URL path (query and origin ignored). Queued
//! replies are consumed in order and the last one keeps being served.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use brewscout_core::domain::{HttpRequest, HttpResponse, Method};
use brewscout_core::ports::{HttpTransport, TransportError};

type Handler = Arc<dyn Fn(&HttpRequest) -> HttpResponse + Send + Sync>;

#[derive(Clone)]
enum Reply {
    Response(HttpResponse),
    Failure(String),
}

enum Behavior {
    Queue(VecDeque<Reply>),
    Handler(Handler),
}

struct Route {
    method: Method,
    path: String,
    behavior: Behavior,
    delay: Option<Duration>,
}

#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`.
    pub fn enqueue(&self, method: Method, path: &str, response: HttpResponse) {
        self.push_reply(method, path, Reply::Response(response));
    }

    /// Queue a JSON response for `method path`.
    pub fn enqueue_json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.enqueue(method, path, HttpResponse::json(status, &body));
    }

    /// Queue a transport failure (no response at all).
    pub fn enqueue_failure(&self, method: Method, path: &str, message: &str) {
        self.push_reply(method, path, Reply::Failure(message.to_string()));
    }

    /// Answer `method path` by inspecting each request.
    pub fn respond_with<F>(&self, method: Method, path: &str, handler: F)
    where
        F: Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static,
    {
        self.lock_routes().push(Route {
            method,
            path: path.to_string(),
            behavior: Behavior::Handler(Arc::new(handler)),
            delay: None,
        });
    }

    /// Hold every response on `method path` for `delay` before returning it.
    pub fn delay(&self, method: Method, path: &str, delay: Duration) {
        if let Some(route) = self
            .lock_routes()
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            route.delay = Some(delay);
        }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests received for `method path`.
    pub fn calls(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && url_path(&r.url) == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests().len()
    }

    fn lock_routes(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.routes.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push_reply(&self, method: Method, path: &str, reply: Reply) {
        let mut routes = self.lock_routes();
        if let Some(Route {
            behavior: Behavior::Queue(queue),
            ..
        }) = routes.iter_mut().find(|r| {
            r.method == method && r.path == path && matches!(r.behavior, Behavior::Queue(_))
        }) {
            queue.push_back(reply);
            return;
        }
        routes.push(Route {
            method,
            path: path.to_string(),
            behavior: Behavior::Queue(VecDeque::from([reply])),
            delay: None,
        });
    }

    fn next_reply(&self, request: &HttpRequest) -> (Option<Reply>, Option<Duration>) {
        let path = url_path(&request.url);
        let mut routes = self.lock_routes();
        let Some(route) = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == path)
        else {
            return (None, None);
        };

        let reply = match &mut route.behavior {
            Behavior::Handler(handler) => Some(Reply::Response(handler(request))),
            Behavior::Queue(queue) if queue.len() > 1 => queue.pop_front(),
            Behavior::Queue(queue) => queue.front().cloned(),
        };
        (reply, route.delay)
    }
}

/// Path component of an absolute or origin-relative URL.
fn url_path(url: &str) -> &str {
    let without_origin = match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            rest.find('/').map_or("/", |i| &rest[i..])
        }
        None => url,
    };
    without_origin
        .split(['?', '#'])
        .next()
        .unwrap_or(without_origin)
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let (reply, delay) = self.next_reply(&request);
        let route = format!("{} {}", request.method, url_path(&request.url));
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(TransportError::Connection(message)),
            None => Err(TransportError::Connection(format!("no mock route for {route}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewscout_core::domain::RequestBody;
    use serde_json::json;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: Method::Get,
            url: url.to_string(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    #[test]
    fn test_url_path() {
        assert_eq!(url_path("https://api.example.com/api/x?y=1"), "/api/x");
        assert_eq!(url_path("/api/x?y=1"), "/api/x");
        assert_eq!(url_path("http://localhost:5000"), "/");
    }

    #[tokio::test]
    async fn test_queue_replays_in_order_and_sticks_on_last() {
        let mock = MockTransport::new();
        mock.enqueue_json(Method::Get, "/api/x", 401, json!({}));
        mock.enqueue_json(Method::Get, "/api/x", 200, json!({}));

        let statuses = [
            mock.send(get("/api/x")).await.unwrap().status,
            mock.send(get("/api/x?page=2")).await.unwrap().status,
            mock.send(get("https://h/api/x")).await.unwrap().status,
        ];

        assert_eq!(statuses, [401, 200, 200]);
        assert_eq!(mock.calls(Method::Get, "/api/x"), 3);
    }

    #[tokio::test]
    async fn test_unrouted_request_fails() {
        let mock = MockTransport::new();

        let result = mock.send(get("/api/missing")).await;

        assert!(matches!(result, Err(TransportError::Connection(_))));
        assert_eq!(mock.total_calls(), 1);
    }
}
