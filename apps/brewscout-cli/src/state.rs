//! Application state - the wired-up client and its resource wrappers.

use std::sync::Arc;

use anyhow::Context;
use brewscout_core::ApiClient;
use brewscout_core::api::{AuthApi, CheckInApi, CoffeeShopApi, ReviewApi};
use brewscout_core::ports::SessionStore;
use brewscout_infra::{FileSessionStore, InMemoryCache, InMemorySessionStore, ReqwestTransport};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub auth: AuthApi,
    pub shops: CoffeeShopApi,
    pub reviews: ReviewApi,
    pub check_ins: CheckInApi,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(config.transport.clone())
            .context("failed to build HTTP transport")?;

        let session: Arc<dyn SessionStore> = match &config.session_file {
            Some(path) => Arc::new(
                FileSessionStore::open(path)
                    .with_context(|| format!("failed to open session file {}", path.display()))?,
            ),
            None => {
                tracing::warn!("SESSION_FILE not set - session will not outlive this command");
                Arc::new(InMemorySessionStore::new())
            }
        };

        let client = ApiClient::new(
            &config.api,
            Arc::new(transport),
            session,
            Arc::new(InMemoryCache::new()),
        )
        .with_session_expired_hook(Arc::new(|| {
            tracing::warn!("Session expired - run `brewscout login` to sign in again");
        }));

        Ok(Self {
            auth: AuthApi::new(client.clone()),
            shops: CoffeeShopApi::new(client.clone()),
            reviews: ReviewApi::new(client.clone()),
            check_ins: CheckInApi::new(client.clone()),
            client,
        })
    }
}
