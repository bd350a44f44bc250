//! High-frequency (HF) trading endpoints
//!
//! HF orders trade from the `trade_hf` account and support synchronous
//! placement, which waits for the matching result.

use crate::client::KuCoinRestClient;
use crate::endpoints::{path_segment, required};
use crate::error::RestResult;
use crate::types::{ApiRequest, OrderRequest};
use serde_json::{json, Value};
use tracing::instrument;

/// HF trading endpoints
pub struct HfTradingEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> HfTradingEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Place an HF order
    ///
    /// # Arguments
    /// * `order` - Order request with all parameters
    /// * `sync` - Wait for the matching result before answering
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = ?order.side, sync))]
    pub async fn place_order(&self, order: &OrderRequest, sync: bool) -> RestResult<Value> {
        order.validate()?;
        let path = if sync { "/api/v1/hf/orders/sync" } else { "/api/v1/hf/orders" };
        self.client
            .execute(ApiRequest::post(path).json_body(order)?)
            .await
    }

    /// Cancel one HF order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &str, symbol: &str) -> RestResult<Value> {
        let id = path_segment("orderId", order_id)?;
        let request = ApiRequest::delete(format!("/api/v1/hf/orders/{}", id))
            .query("symbol", required("symbol", symbol)?);
        self.client.execute(request).await
    }

    /// Cancel all HF orders for a symbol
    #[instrument(skip(self))]
    pub async fn cancel_all(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::delete("/api/v1/hf/orders").query("symbol", required("symbol", symbol)?);
        self.client.execute(request).await
    }

    /// Open HF orders for a symbol
    #[instrument(skip(self))]
    pub async fn active_orders(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/hf/orders/active").query("symbol", required("symbol", symbol)?);
        self.client.execute(request).await
    }

    /// Get one HF order
    #[instrument(skip(self))]
    pub async fn order(&self, order_id: &str, symbol: &str) -> RestResult<Value> {
        let id = path_segment("orderId", order_id)?;
        let request = ApiRequest::get(format!("/api/v1/hf/orders/{}", id))
            .query("symbol", required("symbol", symbol)?);
        self.client.execute(request).await
    }

    /// Arm the dead-man switch
    ///
    /// Every HF order is cancelled if this is not called again within
    /// `timeout_secs`. A timeout of `-1` disarms it.
    #[instrument(skip(self))]
    pub async fn auto_cancel(&self, timeout_secs: i64, symbols: Option<&str>) -> RestResult<Value> {
        let mut body = json!({ "timeout": timeout_secs });
        if let Some(symbols) = symbols {
            body["symbols"] = json!(symbols);
        }
        self.client
            .execute(ApiRequest::post("/api/v1/hf/orders/dead-cancel-all").json_body(&body)?)
            .await
    }

    /// Current dead-man switch settings
    #[instrument(skip(self))]
    pub async fn auto_cancel_settings(&self) -> RestResult<Value> {
        self.client
            .execute(ApiRequest::get("/api/v1/hf/orders/dead-cancel-all/query"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::test_support::{client_answering, sent_body};
    use crate::types::OrderRequest;
    use kucoin_types::{Method, Side};
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_sync_placement_path() {
        let (client, transport) = client_answering(json!({"orderId": "h1", "status": "done"}));
        let order = OrderRequest::market("BTC-USDT", Side::Buy, dec!(0.5));
        client.hf().place_order(&order, true).await.unwrap();
        assert_eq!(transport.requests()[0].path, "/api/v1/hf/orders/sync");
    }

    #[tokio::test]
    async fn test_cancel_carries_symbol() {
        let (client, transport) = client_answering(json!({"orderId": "h1"}));
        client.hf().cancel_order("h1", "BTC-USDT").await.unwrap();
        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/api/v1/hf/orders/h1?symbol=BTC-USDT");
    }

    #[tokio::test]
    async fn test_auto_cancel_settings_is_a_read() {
        let (client, transport) = client_answering(json!({"timeout": 10}));
        client.hf().auto_cancel_settings().await.unwrap();
        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/api/v1/hf/orders/dead-cancel-all/query");
    }

    #[tokio::test]
    async fn test_auto_cancel_body() {
        let (client, transport) = client_answering(json!({"currentTime": 1}));
        client.hf().auto_cancel(10, Some("BTC-USDT,ETH-USDT")).await.unwrap();
        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/api/v1/hf/orders/dead-cancel-all");
        assert_eq!(
            sent_body(&transport),
            json!({"timeout": 10, "symbols": "BTC-USDT,ETH-USDT"})
        );
    }
}
