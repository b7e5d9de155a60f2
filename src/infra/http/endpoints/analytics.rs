use jamjournal_api_types::Analytics;

use crate::infra::http::client::{ApiClient, Auth};
use crate::infra::http::error::ClientError;

impl ApiClient {
    pub async fn analytics(&self) -> Result<Analytics, ClientError> {
        self.get_json("api/analytics", &[], Auth::Bearer).await
    }
}
