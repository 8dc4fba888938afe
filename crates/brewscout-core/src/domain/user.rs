use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal profile of the signed-in user.
///
/// Kept in the session store as a convenience cache. The gateway stays the
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_moderator: bool,
}

impl UserProfile {
    pub fn new(id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            avatar: None,
            is_moderator: false,
        }
    }
}
