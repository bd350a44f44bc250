//! Earn (savings) endpoints

use crate::client::KuCoinRestClient;
use crate::endpoints::required;
use crate::error::RestResult;
use crate::types::ApiRequest;
use kucoin_types::EarnAccountType;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::instrument;

/// Earn endpoints
pub struct EarnEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> EarnEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Savings products, optionally for one currency
    #[instrument(skip(self))]
    pub async fn savings_products(&self, currency: Option<&str>) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/earn/saving/products").query_opt("currency", currency);
        self.client.execute(request).await
    }

    /// Subscribe to a product
    ///
    /// # Arguments
    /// * `product_id` - Product from [`savings_products`](Self::savings_products)
    /// * `amount` - Amount to subscribe
    /// * `account_type` - Account the funds come from
    #[instrument(skip(self))]
    pub async fn subscribe(
        &self,
        product_id: &str,
        amount: Decimal,
        account_type: EarnAccountType,
    ) -> RestResult<Value> {
        let body = json!({
            "productId": required("productId", product_id)?,
            "amount": amount,
            "accountType": account_type,
        });
        self.client
            .execute(ApiRequest::post("/api/v1/earn/orders").json_body(&body)?)
            .await
    }

    /// Redeem a holding
    ///
    /// The order ID and amount travel in the body of the DELETE request.
    #[instrument(skip(self))]
    pub async fn redeem(&self, order_id: &str, amount: Decimal) -> RestResult<Value> {
        let body = json!({
            "orderId": required("orderId", order_id)?,
            "amount": amount,
        });
        self.client
            .execute(ApiRequest::delete("/api/v1/earn/orders").json_body(&body)?)
            .await
    }

    /// Current holdings
    #[instrument(skip(self))]
    pub async fn holdings(&self, currency: Option<&str>) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/earn/hold-assets").query_opt("currency", currency);
        self.client.execute(request).await
    }

    /// Preview what redeeming an order would return
    #[instrument(skip(self))]
    pub async fn redeem_preview(&self, order_id: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/earn/redeem-preview").query("orderId", required("orderId", order_id)?);
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::test_support::{client_answering, sent_body};
    use kucoin_types::{EarnAccountType, Method};
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_subscribe_body() {
        let (client, transport) = client_answering(json!({"orderId": "e1", "orderTxId": "tx"}));
        client
            .earn()
            .subscribe("2611", dec!(100), EarnAccountType::Trade)
            .await
            .unwrap();
        assert_eq!(
            sent_body(&transport),
            json!({"productId": "2611", "amount": "100", "accountType": "TRADE"})
        );
    }

    #[tokio::test]
    async fn test_redeem_sends_body_with_delete() {
        let (client, transport) = client_answering(json!({"orderTxId": "tx"}));
        client.earn().redeem("e1", dec!(50)).await.unwrap();

        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/api/v1/earn/orders");
        assert_eq!(sent_body(&transport), json!({"orderId": "e1", "amount": "50"}));
    }

    #[tokio::test]
    async fn test_products_without_currency() {
        let (client, transport) = client_answering(json!([]));
        client.earn().savings_products(None).await.unwrap();
        assert_eq!(transport.requests()[0].path, "/api/v1/earn/saving/products");
    }
}
