//! Session storage port - where tokens and the cached profile live.

use brewscout_shared::dto::TokenPair;

use crate::domain::UserProfile;

/// Storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Storage key of the cached user profile.
pub const USER_KEY: &str = "user";

/// Persisted session state, read before every request.
///
/// Reads are infallible: a store that cannot be read behaves as empty.
pub trait SessionStore: Send + Sync {
    fn access_token(&self) -> Option<String>;

    fn refresh_token(&self) -> Option<String>;

    /// Overwrite both tokens.
    fn set_tokens(&self, tokens: &TokenPair) -> Result<(), SessionError>;

    /// Remove both tokens.
    fn clear_tokens(&self) -> Result<(), SessionError>;

    fn user(&self) -> Option<UserProfile>;

    fn set_user(&self, user: &UserProfile) -> Result<(), SessionError>;

    fn clear_user(&self) -> Result<(), SessionError>;
}

/// Session storage errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Storage failed: {0}")]
    Storage(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
