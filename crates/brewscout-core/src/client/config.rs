//! Gateway location and base URL resolution.

use std::env;

pub const DEFAULT_PRODUCTION_BASE_URL: &str = "https://api.brewscout.app";
pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_REFRESH_PATH: &str = "/api/auth/refresh";

/// Where the gateway lives and how to reach it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Gateway used when `use_local_api` is set.
    pub local_base_url: String,
    /// Gateway used otherwise.
    pub production_base_url: String,
    pub use_local_api: bool,
    /// Host the application itself is served from. Loopback hosts go
    /// through the dev proxy with relative URLs.
    pub app_host: Option<String>,
    /// Endpoint that exchanges a refresh token for a new pair.
    pub refresh_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            local_base_url: DEFAULT_LOCAL_BASE_URL.to_string(),
            production_base_url: DEFAULT_PRODUCTION_BASE_URL.to_string(),
            use_local_api: false,
            app_host: None,
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            local_base_url: env::var("API_BASE_URL_LOCAL")
                .unwrap_or_else(|_| DEFAULT_LOCAL_BASE_URL.to_string()),
            production_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PRODUCTION_BASE_URL.to_string()),
            use_local_api: env::var("USE_LOCAL_API")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            app_host: env::var("APP_HOST").ok().filter(|v| !v.trim().is_empty()),
            refresh_path: env::var("API_REFRESH_PATH")
                .unwrap_or_else(|_| DEFAULT_REFRESH_PATH.to_string()),
        }
    }

    /// Base URL prefixed to every request path.
    ///
    /// Empty when the app runs on a loopback host, whatever the configured
    /// gateways say.
    pub fn resolve_base_url(&self) -> String {
        if self.app_host.as_deref().is_some_and(is_loopback_host) {
            return String::new();
        }

        let base = if self.use_local_api {
            &self.local_base_url
        } else {
            &self.production_base_url
        };
        base.trim().trim_end_matches('/').to_string()
    }
}

/// Accepts a bare host, `host:port`, or a full origin URL.
fn is_loopback_host(raw: &str) -> bool {
    let raw = raw.trim();
    let host = match url::Url::parse(raw) {
        Ok(parsed) if parsed.has_host() => parsed.host_str().unwrap_or_default().to_string(),
        _ => raw.split(':').next().unwrap_or_default().to_string(),
    };
    host.eq_ignore_ascii_case("localhost") || host == "127.0.0.1"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(app_host: Option<&str>, use_local_api: bool) -> ApiConfig {
        ApiConfig {
            local_base_url: "http://localhost:5000/".to_string(),
            production_base_url: "https://api.example.com".to_string(),
            use_local_api,
            app_host: app_host.map(str::to_string),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
        }
    }

    #[test]
    fn test_loopback_host_uses_relative_urls() {
        for host in [
            "localhost",
            "127.0.0.1",
            "localhost:5173",
            "http://127.0.0.1:3000",
        ] {
            assert_eq!(config(Some(host), false).resolve_base_url(), "", "{host}");
            assert_eq!(config(Some(host), true).resolve_base_url(), "", "{host}");
        }
    }

    #[test]
    fn test_flag_selects_gateway() {
        assert_eq!(
            config(Some("brewscout.app"), false).resolve_base_url(),
            "https://api.example.com"
        );
        assert_eq!(
            config(Some("https://brewscout.app"), true).resolve_base_url(),
            "http://localhost:5000"
        );
        assert_eq!(config(None, false).resolve_base_url(), "https://api.example.com");
    }

    #[test]
    fn test_lookalike_hosts_are_not_loopback() {
        assert!(!is_loopback_host("localhost.evil.com"));
        assert!(!is_loopback_host("127.0.0.10"));
    }
}
