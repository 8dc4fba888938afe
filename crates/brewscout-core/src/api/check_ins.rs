use brewscout_shared::dto::CreateCheckInRequest;

use crate::client::{ApiClient, ApiRequest};
use crate::domain::CheckIn;
use crate::error::ClientError;

pub const CHECK_INS_PATH: &str = "/api/checkins";

#[derive(Clone)]
pub struct CheckInApi {
    client: ApiClient,
}

impl CheckInApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn check_in(&self, request: &CreateCheckInRequest) -> Result<CheckIn, ClientError> {
        let check_in = self
            .client
            .data(ApiRequest::post(CHECK_INS_PATH).json(request)?)
            .await?;
        self.client.invalidate_cache(CHECK_INS_PATH).await;
        Ok(check_in)
    }

    /// Check-ins of the signed-in user, newest first.
    pub async fn mine(&self) -> Result<Vec<CheckIn>, ClientError> {
        self.client
            .data(ApiRequest::get(format!("{CHECK_INS_PATH}/me")))
            .await
    }
}
