use std::time::Duration;

use brewscout_shared::Page;
use brewscout_shared::dto::CreateReviewRequest;
use uuid::Uuid;

use super::coffee_shops::shop_path;
use crate::client::{ApiClient, ApiRequest};
use crate::domain::Review;
use crate::error::ClientError;

pub const REVIEWS_PATH: &str = "/api/reviews";

const LIST_TTL: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ReviewApi {
    client: ApiClient,
}

impl ReviewApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_for_shop(
        &self,
        coffee_shop_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Review>, ClientError> {
        let request = ApiRequest::get(REVIEWS_PATH)
            .param("coffeeShopId", coffee_shop_id)
            .param("pageNumber", page)
            .param("pageSize", page_size)
            .page(page, page_size)
            .cache_for(LIST_TTL);
        self.client.page(request).await
    }

    /// Post a review. The shop's rating changes too, so its cache goes as well.
    pub async fn create(&self, request: &CreateReviewRequest) -> Result<Review, ClientError> {
        let review = self
            .client
            .data(ApiRequest::post(REVIEWS_PATH).json(request)?)
            .await?;
        self.invalidate(request.coffee_shop_id).await;
        Ok(review)
    }

    pub async fn delete(&self, review_id: Uuid, coffee_shop_id: Uuid) -> Result<(), ClientError> {
        self.client
            .send(ApiRequest::delete(format!("{REVIEWS_PATH}/{review_id}")))
            .await?;
        self.invalidate(coffee_shop_id).await;
        Ok(())
    }

    async fn invalidate(&self, coffee_shop_id: Uuid) {
        self.client.invalidate_cache(REVIEWS_PATH).await;
        self.client.invalidate_cache(&shop_path(coffee_shop_id)).await;
    }
}
