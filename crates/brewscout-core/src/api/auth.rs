//! Authentication endpoints and local session bookkeeping.

use brewscout_shared::dto::{LoginRequest, RegisterRequest, TokenPair};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiRequest};
use crate::domain::UserProfile;
use crate::error::ClientError;

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const CURRENT_USER_PATH: &str = "/api/users/me";

/// Payload returned by login and register.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl AuthSession {
    pub fn tokens(&self) -> TokenPair {
        TokenPair::new(self.access_token.clone(), self.refresh_token.clone())
    }
}

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession, ClientError> {
        let session: AuthSession = self
            .client
            .data(ApiRequest::post(LOGIN_PATH).json(request)?)
            .await?;
        self.persist(&session).await?;
        tracing::info!(email = %request.email, "Logged in");
        Ok(session)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, ClientError> {
        let session: AuthSession = self
            .client
            .data(ApiRequest::post(REGISTER_PATH).json(request)?)
            .await?;
        self.persist(&session).await?;
        tracing::info!(email = %request.email, "Registered");
        Ok(session)
    }

    /// Fetch the signed-in profile and refresh the locally cached copy.
    pub async fn current_user(&self) -> Result<UserProfile, ClientError> {
        let user: UserProfile = self.client.data(ApiRequest::get(CURRENT_USER_PATH)).await?;
        self.client.session().set_user(&user)?;
        Ok(user)
    }

    /// Locally cached profile, if any. No network call.
    pub fn cached_user(&self) -> Option<UserProfile> {
        self.client.session().user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().access_token().is_some()
    }

    /// Forget tokens, the cached profile and every cached response.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let session = self.client.session();
        session.clear_tokens()?;
        session.clear_user()?;
        self.client.clear_cache().await;
        tracing::info!("Logged out");
        Ok(())
    }

    async fn persist(&self, auth: &AuthSession) -> Result<(), ClientError> {
        let session = self.client.session();
        session.set_tokens(&auth.tokens())?;
        match &auth.user {
            Some(user) => session.set_user(user)?,
            None => session.clear_user()?,
        }
        // Cached responses may be personalised for the previous identity.
        self.client.clear_cache().await;
        Ok(())
    }
}
