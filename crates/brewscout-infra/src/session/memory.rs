//! In-memory session store - for tests and sessions that need not survive a restart.

use std::sync::RwLock;

use brewscout_core::domain::UserProfile;
use brewscout_core::ports::{SessionError, SessionStore};
use brewscout_shared::dto::TokenPair;

#[derive(Debug, Default)]
struct SessionState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserProfile>,
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    state: RwLock<SessionState>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token pair.
    pub fn with_tokens(tokens: &TokenPair) -> Self {
        Self {
            state: RwLock::new(SessionState {
                access_token: Some(tokens.access_token.clone()),
                refresh_token: Some(tokens.refresh_token.clone()),
                user: None,
            }),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        f(&state)
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) -> Result<(), SessionError> {
        let mut state = self
            .state
            .write()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        f(&mut state);
        Ok(())
    }
}

impl SessionStore for InMemorySessionStore {
    fn access_token(&self) -> Option<String> {
        self.read(|s| s.access_token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.read(|s| s.refresh_token.clone())
    }

    fn set_tokens(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        self.write(|s| {
            s.access_token = Some(tokens.access_token.clone());
            s.refresh_token = Some(tokens.refresh_token.clone());
        })
    }

    fn clear_tokens(&self) -> Result<(), SessionError> {
        self.write(|s| {
            s.access_token = None;
            s.refresh_token = None;
        })
    }

    fn user(&self) -> Option<UserProfile> {
        self.read(|s| s.user.clone())
    }

    fn set_user(&self, user: &UserProfile) -> Result<(), SessionError> {
        self.write(|s| s.user = Some(user.clone()))
    }

    fn clear_user(&self) -> Result<(), SessionError> {
        self.write(|s| s.user = None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_round_trip_and_clear() {
        let store = InMemorySessionStore::new();
        assert!(store.access_token().is_none());

        store.set_tokens(&TokenPair::new("a1", "r1")).unwrap();
        assert_eq!(store.access_token().as_deref(), Some("a1"));
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));

        store.clear_tokens().unwrap();
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
    }
}
