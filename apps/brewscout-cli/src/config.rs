//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use brewscout_core::ApiConfig;
use brewscout_infra::TransportConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub transport: TransportConfig,
    /// Where the session is persisted. `None` keeps it in memory.
    pub session_file: Option<PathBuf>,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            transport: TransportConfig::from_env(),
            session_file: env::var("SESSION_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            telemetry: TelemetryConfig::from_env(),
        }
    }
}
