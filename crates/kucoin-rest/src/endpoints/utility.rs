//! Service status endpoints

use crate::client::KuCoinRestClient;
use crate::error::RestResult;
use crate::types::ApiRequest;
use serde_json::Value;
use tracing::instrument;

/// Utility endpoints
pub struct UtilityEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> UtilityEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Server time in milliseconds
    #[instrument(skip(self))]
    pub async fn server_time(&self) -> RestResult<Value> {
        self.client.execute(ApiRequest::get("/api/v1/timestamp")).await
    }

    /// Service status: `{status: open|close|cancelonly, msg}`
    #[instrument(skip(self))]
    pub async fn service_status(&self) -> RestResult<Value> {
        self.client.execute(ApiRequest::get("/api/v1/status")).await
    }

    /// Announcements, optionally filtered by type (e.g. `latest-announcements`)
    #[instrument(skip(self))]
    pub async fn announcements(&self, kind: Option<&str>) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v3/announcements").query_opt("annType", kind);
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::test_support::client_answering;
    use serde_json::json;

    #[tokio::test]
    async fn test_server_time_is_scalar_data() {
        let (client, transport) = client_answering(json!(1_700_000_000_000_i64));
        let data = client.utility().server_time().await.unwrap();
        assert_eq!(data, json!(1_700_000_000_000_i64));
        assert_eq!(transport.requests()[0].path, "/api/v1/timestamp");
    }

    #[tokio::test]
    async fn test_announcements_type_filter() {
        let (client, transport) = client_answering(json!({"items": []}));
        client.utility().announcements(Some("new-listings")).await.unwrap();
        assert_eq!(transport.requests()[0].path, "/api/v3/announcements?annType=new-listings");
    }
}
