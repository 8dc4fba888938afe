use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's review of a coffee shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub coffee_shop_id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub user_name: Option<String>,
    pub rating: u8,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
