//! File-backed session store - the on-disk counterpart of browser local storage.
//!
//! The file is a JSON object using the same keys the web client stores:
//! `accessToken`, `refreshToken` and `user`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use brewscout_core::domain::UserProfile;
use brewscout_core::ports::{SessionError, SessionStore};
use brewscout_shared::dto::TokenPair;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<UserProfile>,
}

/// Session persisted to a JSON file, rewritten on every change.
pub struct FileSessionStore {
    path: PathBuf,
    state: Mutex<SessionFile>,
}

impl FileSessionStore {
    /// Open the store at `path`. A missing file is an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let state = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => SessionFile::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| SessionError::Serialization(e.to_string()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => SessionFile::default(),
            Err(e) => return Err(SessionError::Storage(e.to_string())),
        };

        tracing::debug!(
            path = %path.display(),
            authenticated = state.access_token.is_some(),
            "Session file loaded"
        );

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(&self, f: impl FnOnce(&SessionFile) -> T) -> T {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&state)
    }

    fn update(&self, f: impl FnOnce(&mut SessionFile)) -> Result<(), SessionError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        let mut next = state.clone();
        f(&mut next);
        self.persist(&next)?;
        *state = next;
        Ok(())
    }

    fn persist(&self, state: &SessionFile) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SessionError::Storage(e.to_string()))?;
        }
        let bytes = serde_json::to_vec_pretty(state)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        // Replace atomically: write a sibling file, then rename it over the old one.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes).map_err(|e| SessionError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| SessionError::Storage(e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn access_token(&self) -> Option<String> {
        self.read(|s| s.access_token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.read(|s| s.refresh_token.clone())
    }

    fn set_tokens(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        self.update(|s| {
            s.access_token = Some(tokens.access_token.clone());
            s.refresh_token = Some(tokens.refresh_token.clone());
        })
    }

    fn clear_tokens(&self) -> Result<(), SessionError> {
        self.update(|s| {
            s.access_token = None;
            s.refresh_token = None;
        })
    }

    fn user(&self) -> Option<UserProfile> {
        self.read(|s| s.user.clone())
    }

    fn set_user(&self, user: &UserProfile) -> Result<(), SessionError> {
        self.update(|s| s.user = Some(user.clone()))
    }

    fn clear_user(&self) -> Result<(), SessionError> {
        self.update(|s| s.user = None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewscout_core::ports::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
    use uuid::Uuid;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("brewscout-session-{}", Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_missing_file_is_empty_session() {
        let store = FileSessionStore::open(temp_path("session.json")).unwrap();

        assert!(store.access_token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_state_survives_reopen() {
        let path = temp_path("session.json");
        let user = UserProfile::new(Uuid::new_v4(), "Ada", "ada@example.com");

        {
            let store = FileSessionStore::open(&path).unwrap();
            store.set_tokens(&TokenPair::new("access", "refresh")).unwrap();
            store.set_user(&user).unwrap();
        }

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.access_token().as_deref(), Some("access"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("refresh"));
        assert_eq!(reopened.user(), Some(user));

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw[ACCESS_TOKEN_KEY], "access");
        assert_eq!(raw[REFRESH_TOKEN_KEY], "refresh");
        assert_eq!(raw[USER_KEY]["email"], "ada@example.com");

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_clear_tokens_keeps_user() {
        let path = temp_path("session.json");
        let store = FileSessionStore::open(&path).unwrap();
        let user = UserProfile::new(Uuid::new_v4(), "Ada", "ada@example.com");
        store.set_tokens(&TokenPair::new("a", "r")).unwrap();
        store.set_user(&user).unwrap();

        store.clear_tokens().unwrap();

        let reopened = FileSessionStore::open(&path).unwrap();
        assert!(reopened.access_token().is_none());
        assert_eq!(reopened.user(), Some(user));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let path = temp_path("session.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let result = FileSessionStore::open(&path);

        assert!(matches!(result, Err(SessionError::Serialization(_))));
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
