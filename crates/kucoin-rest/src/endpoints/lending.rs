//! Margin lending endpoints

use crate::client::KuCoinRestClient;
use crate::endpoints::{path_segment, required};
use crate::error::RestResult;
use crate::types::ApiRequest;
use kucoin_types::util::clean_object;
use kucoin_types::LendingTerm;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use tracing::instrument;

/// Lending endpoints
pub struct LendingEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> LendingEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Post a lend order
    ///
    /// # Arguments
    /// * `daily_rate` - Daily interest rate, e.g. `0.002` for 0.2%
    #[instrument(skip(self))]
    pub async fn lend(
        &self,
        currency: &str,
        size: Decimal,
        daily_rate: Decimal,
        term: LendingTerm,
    ) -> RestResult<Value> {
        let body = json!({
            "currency": required("currency", currency)?,
            "size": size,
            "dailyIntRate": daily_rate,
            "term": term.as_days(),
        });
        self.client
            .execute(ApiRequest::post("/api/v1/margin/lend").json_body(&body)?)
            .await
    }

    /// Cancel a lend order
    #[instrument(skip(self))]
    pub async fn cancel(&self, order_id: &str) -> RestResult<Value> {
        let id = path_segment("orderId", order_id)?;
        self.client
            .execute(ApiRequest::delete(format!("/api/v1/margin/lend/{}", id)))
            .await
    }

    /// Enable or disable auto-lend for a currency
    ///
    /// `daily_rate` and `retain_size` apply only when enabling.
    #[instrument(skip(self))]
    pub async fn set_auto_lend(
        &self,
        currency: &str,
        enable: bool,
        daily_rate: Option<Decimal>,
        retain_size: Option<Decimal>,
        term: Option<LendingTerm>,
    ) -> RestResult<Value> {
        let mut body = Map::new();
        body.insert("currency".into(), json!(required("currency", currency)?));
        body.insert("isEnable".into(), json!(enable));
        body.insert("dailyIntRate".into(), json!(daily_rate));
        body.insert("retainSize".into(), json!(retain_size));
        body.insert("term".into(), json!(term.map(|t| t.as_days())));
        self.client
            .execute(ApiRequest::post("/api/v1/margin/toggle-auto-lend").body(clean_object(body)))
            .await
    }

    /// Open lend orders
    #[instrument(skip(self))]
    pub async fn active_orders(&self, currency: Option<&str>) -> RestResult<Value> {
        self.client
            .execute(ApiRequest::get("/api/v1/margin/lend/active").query_opt("currency", currency))
            .await
    }

    /// Completed lend orders
    #[instrument(skip(self))]
    pub async fn history(&self, currency: Option<&str>) -> RestResult<Value> {
        self.client
            .execute(ApiRequest::get("/api/v1/margin/lend/done").query_opt("currency", currency))
            .await
    }

    /// Lendings that have not settled yet
    #[instrument(skip(self))]
    pub async fn unsettled(&self, currency: Option<&str>) -> RestResult<Value> {
        self.client
            .execute(ApiRequest::get("/api/v1/margin/lend/trade/unsettled").query_opt("currency", currency))
            .await
    }

    /// Lending assets per currency
    #[instrument(skip(self))]
    pub async fn assets(&self, currency: Option<&str>) -> RestResult<Value> {
        self.client
            .execute(ApiRequest::get("/api/v1/margin/lend/assets").query_opt("currency", currency))
            .await
    }
}
