//! Spot trading endpoints
//!
//! These endpoints require authentication.

use crate::client::KuCoinRestClient;
use crate::endpoints::{path_segment, required};
use crate::error::RestResult;
use crate::pagination::DEFAULT_ITEMS_FIELD;
use crate::types::{ApiRequest, OrderRequest};
use kucoin_types::TradeType;
use serde_json::Value;
use tracing::{debug, instrument};

/// Spot trading endpoints
pub struct SpotTradingEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> SpotTradingEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Place a new order
    ///
    /// # Arguments
    /// * `order` - Order request with all parameters
    ///
    /// # Returns
    /// `{orderId}` on success
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = ?order.side, order_type = ?order.order_type))]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<Value> {
        order.validate()?;
        debug!(client_oid = %order.client_oid, "Placing spot order");
        self.client
            .execute(ApiRequest::post("/api/v1/orders").json_body(order)?)
            .await
    }

    /// Cancel one order by ID
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &str) -> RestResult<Value> {
        let id = path_segment("orderId", order_id)?;
        self.client
            .execute(ApiRequest::delete(format!("/api/v1/orders/{}", id)))
            .await
    }

    /// Cancel all open orders, optionally for one symbol or trade type
    #[instrument(skip(self))]
    pub async fn cancel_all(&self, symbol: Option<&str>, trade_type: Option<TradeType>) -> RestResult<Value> {
        let request = ApiRequest::delete("/api/v1/orders")
            .query_opt("symbol", symbol)
            .query_opt("tradeType", trade_type.map(|t| t.as_str()));
        self.client.execute(request).await
    }

    fn orders_request(symbol: Option<&str>, status: Option<&str>) -> ApiRequest {
        ApiRequest::get("/api/v1/orders")
            .query_opt("symbol", symbol)
            .query_opt("status", status)
    }

    /// List orders (first page)
    ///
    /// # Arguments
    /// * `symbol` - Filter by symbol (optional)
    /// * `status` - `active` or `done` (optional)
    #[instrument(skip(self))]
    pub async fn orders(&self, symbol: Option<&str>, status: Option<&str>) -> RestResult<Value> {
        self.client.execute(Self::orders_request(symbol, status)).await
    }

    /// List every order, following pagination
    #[instrument(skip(self))]
    pub async fn all_orders(&self, symbol: Option<&str>, status: Option<&str>) -> RestResult<Vec<Value>> {
        self.client
            .fetch_all_pages(Self::orders_request(symbol, status), DEFAULT_ITEMS_FIELD)
            .await
    }

    /// Get one order by ID
    #[instrument(skip(self))]
    pub async fn order(&self, order_id: &str) -> RestResult<Value> {
        let id = path_segment("orderId", order_id)?;
        self.client
            .execute(ApiRequest::get(format!("/api/v1/orders/{}", id)))
            .await
    }

    /// Get fills for a symbol (first page)
    #[instrument(skip(self))]
    pub async fn fills(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/fills").query("symbol", required("symbol", symbol)?);
        self.client.execute(request).await
    }

    /// Fills of the last 24 hours, newest first
    #[instrument(skip(self))]
    pub async fn recent_fills(&self, symbol: Option<&str>) -> RestResult<Value> {
        self.client
            .execute(ApiRequest::get("/api/v1/limit/fills").query_opt("symbol", symbol))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::test_support::{client_answering, sent_body};
    use crate::error::RestError;
    use crate::types::OrderRequest;
    use kucoin_types::{Method, Side, TradeType};
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_place_order() {
        let (client, transport) = client_answering(json!({"orderId": "5bd6e9286d99522a52e458de"}));
        let order = OrderRequest::limit("BTC-USDT", Side::Buy, dec!(0.001), dec!(50000)).with_client_oid("oid-7");
        let data = client.spot().place_order(&order).await.unwrap();
        assert_eq!(data["orderId"], "5bd6e9286d99522a52e458de");

        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/api/v1/orders");
        let body = sent_body(&transport);
        assert_eq!(body["clientOid"], "oid-7");
        assert_eq!(body["price"], "50000");
    }

    #[tokio::test]
    async fn test_invalid_order_is_not_sent() {
        let (client, transport) = client_answering(json!({}));
        let mut order = OrderRequest::market("BTC-USDT", Side::Sell, dec!(1));
        order.symbol.clear();
        assert!(matches!(
            client.spot().place_order(&order).await,
            Err(RestError::InvalidParameter(_))
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_all_for_symbol() {
        let (client, transport) = client_answering(json!({"cancelledOrderIds": ["a", "b"]}));
        client.spot().cancel_all(Some("ETH-USDT"), None).await.unwrap();
        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/api/v1/orders?symbol=ETH-USDT");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_cancel_all_margin_orders() {
        let (client, transport) = client_answering(json!({"cancelledOrderIds": []}));
        client.spot().cancel_all(None, Some(TradeType::MarginTrade)).await.unwrap();
        assert_eq!(transport.requests()[0].path, "/api/v1/orders?tradeType=MARGIN_TRADE");
    }

    #[tokio::test]
    async fn test_order_lookup_path() {
        let (client, transport) = client_answering(json!({"id": "o-1"}));
        client.spot().order("o-1").await.unwrap();
        assert_eq!(transport.requests()[0].path, "/api/v1/orders/o-1");
    }
}
