//! Moderator workflow for user-submitted coffee shops.

use brewscout_shared::Page;
use brewscout_shared::dto::{ModerationDecision, ModerationDecisionRequest};
use uuid::Uuid;

use super::coffee_shops::COFFEE_SHOPS_PATH;
use crate::client::{ApiClient, ApiRequest};
use crate::domain::CoffeeShop;
use crate::error::ClientError;

pub const MODERATION_PATH: &str = "/api/moderation";

#[derive(Clone)]
pub struct ModerationApi {
    client: ApiClient,
}

impl ModerationApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Submissions waiting for a decision. Never cached.
    pub async fn pending_shops(&self, page: u32, page_size: u32) -> Result<Page<CoffeeShop>, ClientError> {
        let request = ApiRequest::get(format!("{MODERATION_PATH}/coffeeshops"))
            .param("pageNumber", page)
            .param("pageSize", page_size)
            .page(page, page_size);
        self.client.page(request).await
    }

    pub async fn decide(
        &self,
        shop_id: Uuid,
        decision: ModerationDecision,
        reason: Option<String>,
    ) -> Result<CoffeeShop, ClientError> {
        let body = ModerationDecisionRequest { decision, reason };
        let shop = self
            .client
            .data(ApiRequest::patch(format!("{MODERATION_PATH}/coffeeshops/{shop_id}")).json(&body)?)
            .await?;
        self.client.invalidate_cache(MODERATION_PATH).await;
        self.client.invalidate_cache(COFFEE_SHOPS_PATH).await;
        Ok(shop)
    }
}
