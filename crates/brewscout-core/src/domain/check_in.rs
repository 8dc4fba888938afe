use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: Uuid,
    pub coffee_shop_id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
