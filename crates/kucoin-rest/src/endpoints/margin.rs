//! Margin borrowing endpoints

use crate::client::KuCoinRestClient;
use crate::endpoints::{path_segment, required};
use crate::error::RestResult;
use crate::types::ApiRequest;
use kucoin_types::{MarginMode, TimeInForce};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::instrument;

/// Margin endpoints
pub struct MarginEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> MarginEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Borrow on margin
    ///
    /// # Arguments
    /// * `currency` - Currency to borrow
    /// * `size` - Amount
    /// * `time_in_force` - `IOC` or `FOK`
    /// * `mode` - Cross or isolated margin
    #[instrument(skip(self))]
    pub async fn borrow(
        &self,
        currency: &str,
        size: Decimal,
        time_in_force: TimeInForce,
        mode: MarginMode,
    ) -> RestResult<Value> {
        let body = json!({
            "currency": required("currency", currency)?,
            "size": size,
            "timeInForce": time_in_force,
            "isIsolated": mode.is_isolated(),
        });
        self.client
            .execute(ApiRequest::post("/api/v3/margin/borrow").json_body(&body)?)
            .await
    }

    /// Repay a margin loan
    #[instrument(skip(self))]
    pub async fn repay(&self, currency: &str, size: Decimal, mode: MarginMode) -> RestResult<Value> {
        let body = json!({
            "currency": required("currency", currency)?,
            "size": size,
            "isIsolated": mode.is_isolated(),
        });
        self.client
            .execute(ApiRequest::post("/api/v3/margin/repay").json_body(&body)?)
            .await
    }

    /// Borrow records for a currency
    #[instrument(skip(self))]
    pub async fn borrow_history(&self, currency: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v3/margin/borrow").query("currency", required("currency", currency)?);
        self.client.execute(request).await
    }

    /// Repayment records for a currency
    #[instrument(skip(self))]
    pub async fn repay_history(&self, currency: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v3/margin/repay").query("currency", required("currency", currency)?);
        self.client.execute(request).await
    }

    /// Cross-margin account overview
    #[instrument(skip(self))]
    pub async fn account(&self) -> RestResult<Value> {
        self.client.execute(ApiRequest::get("/api/v3/margin/accounts")).await
    }

    /// Current mark price of a margin symbol
    #[instrument(skip(self))]
    pub async fn mark_price(&self, symbol: &str) -> RestResult<Value> {
        let symbol = path_segment("symbol", symbol)?;
        self.client
            .execute(ApiRequest::get(format!("/api/v1/mark-price/{}/current", symbol)))
            .await
    }

    /// Margin configuration (currencies, max leverage)
    #[instrument(skip(self))]
    pub async fn config(&self) -> RestResult<Value> {
        self.client.execute(ApiRequest::get("/api/v1/margin/config")).await
    }
}
