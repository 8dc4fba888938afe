//! Coffee shop listing, details and submissions.

use std::time::Duration;

use brewscout_shared::Page;
use brewscout_shared::dto::{CreateCoffeeShopRequest, UpdateCoffeeShopRequest};
use serde_json::Value;
use uuid::Uuid;

use crate::client::{ApiClient, ApiRequest, QueryParams};
use crate::domain::{CoffeeShop, MultipartForm};
use crate::error::ClientError;

pub const COFFEE_SHOPS_PATH: &str = "/api/coffeeshops";

const LIST_TTL: Duration = Duration::from_secs(60);
const DETAIL_TTL: Duration = Duration::from_secs(60);

/// Filters for the shop listing.
#[derive(Debug, Clone, Default)]
pub struct ShopQuery {
    pub search: Option<String>,
    pub equipments: Vec<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ShopQuery {
    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new().with_opt("search", self.search.as_deref());
        if !self.equipments.is_empty() {
            params = params.with("equipments", self.equipments.clone());
        }
        params
            .with_opt("pageNumber", self.page)
            .with_opt("pageSize", self.page_size)
    }
}

#[derive(Clone)]
pub struct CoffeeShopApi {
    client: ApiClient,
}

impl CoffeeShopApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ShopQuery) -> Result<Page<CoffeeShop>, ClientError> {
        let mut request = ApiRequest::get(COFFEE_SHOPS_PATH)
            .query(query.to_params())
            .cache_for(LIST_TTL);
        if let Some(page) = query.page {
            request = request.page(page, query.page_size.unwrap_or(20));
        }
        self.client.page(request).await
    }

    pub async fn get(&self, id: Uuid) -> Result<CoffeeShop, ClientError> {
        self.client
            .data(ApiRequest::get(shop_path(id)).cache_for(DETAIL_TTL))
            .await
    }

    pub async fn create(&self, request: &CreateCoffeeShopRequest) -> Result<CoffeeShop, ClientError> {
        let shop = self
            .client
            .data(ApiRequest::post(COFFEE_SHOPS_PATH).json(request)?)
            .await?;
        self.client.invalidate_cache(COFFEE_SHOPS_PATH).await;
        Ok(shop)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateCoffeeShopRequest,
    ) -> Result<CoffeeShop, ClientError> {
        let shop = self
            .client
            .data(ApiRequest::put(shop_path(id)).json(request)?)
            .await?;
        self.client.invalidate_cache(COFFEE_SHOPS_PATH).await;
        Ok(shop)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.client.send(ApiRequest::delete(shop_path(id))).await?;
        self.client.invalidate_cache(COFFEE_SHOPS_PATH).await;
        Ok(())
    }

    /// Upload a photo for the shop as `multipart/form-data`.
    pub async fn upload_photo(
        &self,
        id: Uuid,
        file_name: &str,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<Value, ClientError> {
        let form = MultipartForm::new().file("photo", file_name, content_type, bytes);
        let payload = self
            .client
            .upload(&format!("{}/photos", shop_path(id)), form)
            .await?;
        self.client.invalidate_cache(COFFEE_SHOPS_PATH).await;
        Ok(payload)
    }
}

pub(crate) fn shop_path(id: Uuid) -> String {
    format!("{COFFEE_SHOPS_PATH}/{id}")
}
