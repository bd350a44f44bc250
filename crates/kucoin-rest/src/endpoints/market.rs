//! Market data endpoints
//!
//! Public data, but requests are signed like every other call.

use crate::client::KuCoinRestClient;
use crate::endpoints::{path_segment, required};
use crate::error::RestResult;
use crate::types::ApiRequest;
use chrono::{DateTime, Utc};
use kucoin_types::{KlineInterval, OrderBookLevel};
use serde_json::Value;
use tracing::{debug, instrument};

/// Market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// List tradable symbols, optionally for one market (e.g. `USDS`)
    #[instrument(skip(self))]
    pub async fn symbols(&self, market: Option<&str>) -> RestResult<Value> {
        self.client
            .execute(ApiRequest::get("/api/v2/symbols").query_opt("market", market))
            .await
    }

    /// Best bid/ask and last price for a symbol
    #[instrument(skip(self))]
    pub async fn ticker(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/market/orderbook/level1")
            .query("symbol", required("symbol", symbol)?);
        self.client.execute(request).await
    }

    /// Tickers for every symbol
    #[instrument(skip(self))]
    pub async fn all_tickers(&self) -> RestResult<Value> {
        self.client.execute(ApiRequest::get("/api/v1/market/allTickers")).await
    }

    /// 24h statistics for a symbol
    #[instrument(skip(self))]
    pub async fn stats(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/market/stats").query("symbol", required("symbol", symbol)?);
        self.client.execute(request).await
    }

    /// Order book snapshot
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol (e.g. "BTC-USDT")
    /// * `level` - Depth; aggregated top 20/100 or full level 3
    #[instrument(skip(self))]
    pub async fn order_book(&self, symbol: &str, level: OrderBookLevel) -> RestResult<Value> {
        let request = ApiRequest::get(level.path()).query("symbol", required("symbol", symbol)?);
        self.client.execute(request).await
    }

    /// Most recent trades for a symbol
    #[instrument(skip(self))]
    pub async fn trade_histories(&self, symbol: &str) -> RestResult<Value> {
        let request = ApiRequest::get("/api/v1/market/histories").query("symbol", required("symbol", symbol)?);
        self.client.execute(request).await
    }

    /// Candlesticks
    ///
    /// Bounds are sent in seconds. Each row is
    /// `[time, open, close, high, low, volume, turnover]`.
    #[instrument(skip(self))]
    pub async fn klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> RestResult<Value> {
        debug!(interval = interval.as_str(), "Fetching klines");
        let request = ApiRequest::get("/api/v1/market/candles")
            .query("symbol", required("symbol", symbol)?)
            .query("type", interval.as_str())
            .query_opt("startAt", start.map(|t| t.timestamp()))
            .query_opt("endAt", end.map(|t| t.timestamp()));
        self.client.execute(request).await
    }

    /// List currencies
    #[instrument(skip(self))]
    pub async fn currencies(&self) -> RestResult<Value> {
        self.client.execute(ApiRequest::get("/api/v3/currencies")).await
    }

    /// Details of one currency, optionally for one chain
    #[instrument(skip(self))]
    pub async fn currency(&self, currency: &str, chain: Option<&str>) -> RestResult<Value> {
        let currency = path_segment("currency", currency)?;
        let request = ApiRequest::get(format!("/api/v3/currencies/{}", currency)).query_opt("chain", chain);
        self.client.execute(request).await
    }

    /// Fiat prices of currencies
    ///
    /// # Arguments
    /// * `base` - Fiat base, USD when omitted
    /// * `currencies` - Currencies to price; every currency when empty
    #[instrument(skip(self))]
    pub async fn fiat_prices(&self, base: Option<&str>, currencies: &[&str]) -> RestResult<Value> {
        let currencies = (!currencies.is_empty()).then(|| currencies.join(","));
        let request = ApiRequest::get("/api/v1/prices")
            .query_opt("base", base)
            .query_opt("currencies", currencies);
        self.client.execute(request).await
    }

    /// Server time in milliseconds
    #[instrument(skip(self))]
    pub async fn server_time(&self) -> RestResult<Value> {
        self.client.execute(ApiRequest::get("/api/v1/timestamp")).await
    }
}
