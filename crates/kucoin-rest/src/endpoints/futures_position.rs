//! Futures position and margin endpoints

use crate::client::KuCoinRestClient;
use crate::endpoints::required;
use crate::error::RestResult;
use crate::types::ApiRequest;
use kucoin_types::generate_client_oid;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::instrument;

/// Futures position endpoints
pub struct FuturesPositionEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> FuturesPositionEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Position for one contract
    #[instrument(skip(self))]
    pub async fn position(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/position")
            .query("symbol", required("symbol", symbol)?)
            .futures();
        self.client.execute(request).await
    }

    /// All open positions, optionally settled in one currency
    #[instrument(skip(self))]
    pub async fn positions(&self, currency: Option<&str>) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/positions")
            .query_opt("currency", currency)
            .futures();
        self.client.execute(request).await
    }

    /// Toggle automatic margin top-up for a position
    #[instrument(skip(self))]
    pub async fn set_auto_deposit(&self, symbol: &str, enabled: bool) -> RestResult<Value> {
        let body = json!({ "symbol": required("symbol", symbol)?, "status": enabled });
        let request = ApiRequest::post("/api/v1/position/margin/auto-deposit-status")
            .json_body(&body)?
            .futures();
        self.client.execute(request).await
    }

    /// Add margin to a position
    #[instrument(skip(self))]
    pub async fn add_margin(&self, symbol: &str, margin: Decimal) -> RestResult<Value> {
        let body = json!({
            "symbol": required("symbol", symbol)?,
            "margin": margin,
            "bizNo": generate_client_oid(),
        });
        let request = ApiRequest::post("/api/v1/position/margin/deposit-margin")
            .json_body(&body)?
            .futures();
        self.client.execute(request).await
    }

    /// Largest margin amount that can be withdrawn from a position
    #[instrument(skip(self))]
    pub async fn max_withdraw_margin(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/margin/maxWithdrawMargin")
            .query("symbol", required("symbol", symbol)?)
            .futures();
        self.client.execute(request).await
    }

    /// Withdraw margin from a position
    #[instrument(skip(self))]
    pub async fn withdraw_margin(&self, symbol: &str, amount: Decimal) -> RestResult<Value> {
        let body = json!({ "symbol": required("symbol", symbol)?, "withdrawAmount": amount });
        let request = ApiRequest::post("/api/v1/margin/withdrawMargin")
            .json_body(&body)?
            .futures();
        self.client.execute(request).await
    }

    /// Funding fee history for a contract
    #[instrument(skip(self))]
    pub async fn funding_history(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/funding-history")
            .query("symbol", required("symbol", symbol)?)
            .futures();
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::test_support::{client_answering, sent_body};
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_margin_body() {
        let (client, transport) = client_answering(json!({"id": "p1"}));
        client.futures_position().add_margin("XBTUSDTM", dec!(25)).await.unwrap();

        let requests = transport.requests();
        let request = &requests[0];
        assert!(request.url.starts_with("https://api-futures.kucoin.com"));
        let body = sent_body(&transport);
        assert_eq!(body["margin"], "25");
        assert_eq!(body["bizNo"].as_str().unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_auto_deposit_status() {
        let (client, transport) = client_answering(json!(true));
        let data = client
            .futures_position()
            .set_auto_deposit("XBTUSDTM", true)
            .await
            .unwrap();
        assert_eq!(data, json!(true));
        assert_eq!(sent_body(&transport), json!({"symbol": "XBTUSDTM", "status": true}));
    }

    #[tokio::test]
    async fn test_position_query() {
        let (client, transport) = client_answering(json!({"currentQty": 0}));
        client.futures_position().position("ETHUSDTM").await.unwrap();
        assert_eq!(transport.requests()[0].path, "/api/v1/position?symbol=ETHUSDTM");
    }
}
