//! Futures contracts and order management
//!
//! Every request targets the futures host.

use crate::client::KuCoinRestClient;
use crate::endpoints::{path_segment, required};
use crate::error::RestResult;
use crate::pagination::DEFAULT_ITEMS_FIELD;
use crate::types::{ApiRequest, FuturesOrderRequest};
use serde_json::Value;
use tracing::{debug, instrument};

/// Futures trading endpoints
pub struct FuturesTradingEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> FuturesTradingEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Open contracts
    #[instrument(skip(self))]
    pub async fn contracts(&self) -> RestResult<Value> {
        self.client
            .execute(ApiRequest::get("/api/v1/contracts/active").futures())
            .await
    }

    /// One contract's specification
    #[instrument(skip(self))]
    pub async fn contract(&self, symbol: &str) -> RestResult<Value> {
        let symbol = path_segment("symbol", symbol)?;
        self.client
            .execute(ApiRequest::get(format!("/api/v1/contracts/{}", symbol)).futures())
            .await
    }

    /// Ticker for a contract
    #[instrument(skip(self))]
    pub async fn ticker(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/ticker")
            .query("symbol", required("symbol", symbol)?)
            .futures();
        self.client.execute(request).await
    }

    /// Full aggregated order book
    #[instrument(skip(self))]
    pub async fn order_book(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/level2/snapshot")
            .query("symbol", required("symbol", symbol)?)
            .futures();
        self.client.execute(request).await
    }

    /// Place a futures order
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = ?order.side, leverage = order.leverage))]
    pub async fn place_order(&self, order: &FuturesOrderRequest) -> RestResult<Value> {
        order.validate()?;
        debug!(client_oid = %order.client_oid, "Placing futures order");
        self.client
            .execute(ApiRequest::post("/api/v1/orders").json_body(order)?.futures())
            .await
    }

    /// Cancel one futures order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &str) -> RestResult<Value> {
        let id = path_segment("orderId", order_id)?;
        self.client
            .execute(ApiRequest::delete(format!("/api/v1/orders/{}", id)).futures())
            .await
    }

    /// Cancel all open futures orders, optionally for one contract
    #[instrument(skip(self))]
    pub async fn cancel_all(&self, symbol: Option<&str>) -> RestResult<Value> {
        let request = ApiRequest::delete("/api/v1/orders").query_opt("symbol", symbol).futures();
        self.client.execute(request).await
    }

    fn orders_request(symbol: Option<&str>, status: Option<&str>) -> ApiRequest {
        ApiRequest::get("/api/v1/orders")
            .query_opt("symbol", symbol)
            .query_opt("status", status)
            .futures()
    }

    /// List futures orders (first page)
    #[instrument(skip(self))]
    pub async fn orders(&self, symbol: Option<&str>, status: Option<&str>) -> RestResult<Value> {
        self.client.execute(Self::orders_request(symbol, status)).await
    }

    /// List every futures order, following pagination
    #[instrument(skip(self))]
    pub async fn all_orders(&self, symbol: Option<&str>, status: Option<&str>) -> RestResult<Vec<Value>> {
        self.client
            .fetch_all_pages(Self::orders_request(symbol, status), DEFAULT_ITEMS_FIELD)
            .await
    }

    /// Get one futures order
    #[instrument(skip(self))]
    pub async fn order(&self, order_id: &str) -> RestResult<Value> {
        let id = path_segment("orderId", order_id)?;
        self.client
            .execute(ApiRequest::get(format!("/api/v1/orders/{}", id)).futures())
            .await
    }

    /// Futures fills (first page)
    #[instrument(skip(self))]
    pub async fn fills(&self, symbol: Option<&str>) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/fills").query_opt("symbol", symbol).futures();
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::test_support::{client_answering, sent_body};
    use crate::types::FuturesOrderRequest;
    use kucoin_types::Side;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_requests_target_futures_host() {
        let (client, transport) = client_answering(json!({"symbol": "XBTUSDTM"}));
        client.futures().contract("XBTUSDTM").await.unwrap();
        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(request.url, "https://api-futures.kucoin.com/api/v1/contracts/XBTUSDTM");
    }

    #[tokio::test]
    async fn test_place_futures_order() {
        let (client, transport) = client_answering(json!({"orderId": "f1"}));
        let order = FuturesOrderRequest::limit("XBTUSDTM", Side::Sell, 3, 2, dec!(45000.5)).with_client_oid("c-1");
        client.futures().place_order(&order).await.unwrap();

        let requests = transport.requests();
        let request = &requests[0];
        assert!(request.url.starts_with("https://api-futures.kucoin.com/api/v1/orders"));
        let body = sent_body(&transport);
        assert_eq!(body["leverage"], 3);
        assert_eq!(body["price"], "45000.5");
        assert_eq!(body["clientOid"], "c-1");
    }

    #[tokio::test]
    async fn test_all_orders_single_page() {
        let (client, transport) = client_answering(json!({"totalPage": 1, "items": [{"id": "a"}]}));
        let orders = client.futures().all_orders(Some("XBTUSDTM"), Some("done")).await.unwrap();
        assert_eq!(orders, vec![json!({"id": "a"})]);
        assert_eq!(
            transport.requests()[0].path,
            "/api/v1/orders?symbol=XBTUSDTM&status=done&currentPage=1&pageSize=50"
        );
    }
}
