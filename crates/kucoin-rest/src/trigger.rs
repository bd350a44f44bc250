//! Polling event detection
//!
//! Each poll issues one request and compares the answer against the
//! caller's [`PollState`], returning the events seen since the last poll.
//! The state is plain serde data so callers can persist it between runs.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::client::KuCoinRestClient;
use crate::error::{RestError, RestResult};
use crate::types::ApiRequest;
use kucoin_types::util::{format_timestamp, parse_numeric, to_milliseconds};

/// Fills emitted on the very first poll
pub const INITIAL_FILL_LIMIT: usize = 10;

/// Memory carried from one poll to the next
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollState {
    /// Newest trade ID seen by the fill poll
    pub last_trade_id: Option<String>,
    /// Unix milliseconds of the last order poll
    pub last_order_check: i64,
    /// Account ID to last seen balance
    pub previous_balances: HashMap<String, String>,
    pub price_alert_triggered: bool,
}

/// Which side of the threshold fires a price alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    Above,
    Below,
}

impl AlertDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
        }
    }

    fn crossed(&self, price: Decimal, threshold: Decimal) -> bool {
        match self {
            Self::Above => price > threshold,
            Self::Below => price < threshold,
        }
    }
}

/// Runs polls against one client
pub struct Poller<'a> {
    client: &'a KuCoinRestClient,
}

impl<'a> Poller<'a> {
    pub fn new(client: &'a KuCoinRestClient) -> Self {
        Self { client }
    }

    /// Fills since the last poll, newest first
    ///
    /// The first poll returns at most [`INITIAL_FILL_LIMIT`] fills.
    #[instrument(skip(self, state))]
    pub async fn new_fills(&self, state: &mut PollState, symbol: Option<&str>) -> RestResult<Vec<Value>> {
        let response = self
            .client
            .execute(ApiRequest::get("/api/v1/limit/fills").query_opt("symbol", non_empty(symbol)))
            .await?;
        let fills = into_list(response, None)?;
        Ok(select_new_fills(state, fills))
    }

    /// Orders created or completed since the last poll
    #[instrument(skip(self, state))]
    pub async fn order_status_changes(
        &self,
        state: &mut PollState,
        symbol: Option<&str>,
    ) -> RestResult<Vec<Value>> {
        let checked_at = Utc::now().timestamp_millis();
        let response = self
            .client
            .execute(ApiRequest::get("/api/v1/orders").query_opt("symbol", non_empty(symbol)))
            .await?;
        let orders = into_list(response, Some("items"))?;
        Ok(select_changed_orders(state, orders, checked_at))
    }

    /// Accounts whose balance moved since the last poll
    ///
    /// Accounts seen for the first time are remembered but not reported.
    #[instrument(skip(self, state))]
    pub async fn balance_changes(
        &self,
        state: &mut PollState,
        currency: Option<&str>,
    ) -> RestResult<Vec<Value>> {
        let response = self
            .client
            .execute(ApiRequest::get("/api/v1/accounts").query_opt("currency", non_empty(currency)))
            .await?;
        let accounts = into_list(response, None)?;
        Ok(select_balance_changes(state, accounts))
    }

    /// Fire once when the last price crosses `threshold`
    ///
    /// Re-arms once the price is back at or beyond the threshold on the
    /// other side.
    ///
    /// # Errors
    /// [`RestError::InvalidParameter`] when `symbol` is empty.
    #[instrument(skip(self, state))]
    pub async fn price_alert(
        &self,
        state: &mut PollState,
        symbol: &str,
        direction: AlertDirection,
        threshold: Decimal,
    ) -> RestResult<Vec<Value>> {
        if symbol.trim().is_empty() {
            return Err(RestError::InvalidParameter(
                "symbol is required for price alerts".into(),
            ));
        }
        let ticker = self.client.market().ticker(symbol).await?;
        let price = parse_numeric(&ticker["price"])
            .ok_or_else(|| RestError::Parse(format!("ticker without a price: {}", ticker)))?;
        Ok(evaluate_price_alert(state, symbol, direction, threshold, price)
            .into_iter()
            .collect())
    }
}

impl KuCoinRestClient {
    /// Event polling over this client
    pub fn poller(&self) -> Poller<'_> {
        Poller::new(self)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Pull a list out of a payload; `null` counts as empty
fn into_list(value: Value, field: Option<&str>) -> RestResult<Vec<Value>> {
    let value = match (value, field) {
        (Value::Object(mut map), Some(field)) => map.remove(field).unwrap_or(Value::Null),
        (value, _) => value,
    };
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        other => Err(RestError::UnexpectedShape(format!("expected a list, got {}", other))),
    }
}

fn select_new_fills(state: &mut PollState, fills: Vec<Value>) -> Vec<Value> {
    let newest = fills
        .first()
        .and_then(|fill| fill.get("tradeId"))
        .and_then(id_string);

    let fresh: Vec<Value> = match state.last_trade_id.as_deref() {
        Some(last) => fills
            .into_iter()
            .take_while(|fill| fill.get("tradeId").and_then(id_string).as_deref() != Some(last))
            .collect(),
        None => fills.into_iter().take(INITIAL_FILL_LIMIT).collect(),
    };

    if newest.is_some() {
        state.last_trade_id = newest;
    }
    debug!(count = fresh.len(), "New fills");
    fresh
}

fn select_changed_orders(state: &mut PollState, orders: Vec<Value>, checked_at: i64) -> Vec<Value> {
    let since = state.last_order_check;
    let after = |order: &Value, field: &str| {
        order
            .get(field)
            .and_then(Value::as_i64)
            .map(to_milliseconds)
            .is_some_and(|t| t > since)
    };

    let changed: Vec<Value> = orders
        .into_iter()
        .filter(|order| after(order, "createdAt") || after(order, "doneAt"))
        .collect();

    state.last_order_check = checked_at;
    changed
}

fn select_balance_changes(state: &mut PollState, accounts: Vec<Value>) -> Vec<Value> {
    let mut changes = Vec::new();

    for account in accounts {
        let (Some(id), Some(balance)) = (
            account.get("id").and_then(id_string),
            account.get("balance").and_then(id_string),
        ) else {
            continue;
        };

        if let Some(previous) = state.previous_balances.get(&id) {
            if *previous != balance {
                let change = balance
                    .parse::<Decimal>()
                    .ok()
                    .zip(previous.parse::<Decimal>().ok())
                    .map(|(current, previous)| (current - previous).normalize().to_string());
                let mut event = account.clone();
                if let Value::Object(map) = &mut event {
                    map.insert("previousBalance".into(), json!(previous));
                    map.insert("changeAmount".into(), json!(change));
                }
                changes.push(event);
            }
        }
        state.previous_balances.insert(id, balance);
    }

    changes
}

fn evaluate_price_alert(
    state: &mut PollState,
    symbol: &str,
    direction: AlertDirection,
    threshold: Decimal,
    price: Decimal,
) -> Option<Value> {
    let fired = if direction.crossed(price, threshold) && !state.price_alert_triggered {
        state.price_alert_triggered = true;
        Some(json!({
            "symbol": symbol,
            "currentPrice": price.to_f64(),
            "thresholdPrice": threshold.to_f64(),
            "alertType": direction.as_str(),
            "triggeredAt": format_timestamp(Utc::now().timestamp_millis()),
        }))
    } else {
        None
    };

    if !direction.crossed(price, threshold) {
        state.price_alert_triggered = false;
    }
    fired
}

/// IDs and balances arrive as strings, occasionally as numbers
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_support::client_answering;
    use rust_decimal_macros::dec;

    fn fills(ids: &[&str]) -> Vec<Value> {
        ids.iter().map(|id| json!({"tradeId": id, "size": "1"})).collect()
    }

    #[test]
    fn test_first_fill_poll_is_capped() {
        let mut state = PollState::default();
        let ids: Vec<String> = (0..15).map(|i| format!("t{}", 15 - i)).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();

        let fresh = select_new_fills(&mut state, fills(&refs));
        assert_eq!(fresh.len(), INITIAL_FILL_LIMIT);
        assert_eq!(state.last_trade_id.as_deref(), Some("t15"));
    }

    #[test]
    fn test_later_polls_stop_at_remembered_trade() {
        let mut state = PollState {
            last_trade_id: Some("t2".into()),
            ..Default::default()
        };
        let fresh = select_new_fills(&mut state, fills(&["t4", "t3", "t2", "t1"]));
        assert_eq!(fresh, fills(&["t4", "t3"]));
        assert_eq!(state.last_trade_id.as_deref(), Some("t4"));

        assert!(select_new_fills(&mut state, fills(&["t4", "t3"])).is_empty());
    }

    #[test]
    fn test_empty_fill_list_keeps_state() {
        let mut state = PollState {
            last_trade_id: Some("t9".into()),
            ..Default::default()
        };
        assert!(select_new_fills(&mut state, Vec::new()).is_empty());
        assert_eq!(state.last_trade_id.as_deref(), Some("t9"));
    }

    #[test]
    fn test_order_changes_since_last_check() {
        let mut state = PollState {
            last_order_check: 1_700_000_001_000,
            ..Default::default()
        };
        let orders = vec![
            json!({"id": "old", "createdAt": 1_700_000_000_500i64}),
            json!({"id": "new", "createdAt": 1_700_000_001_500i64}),
            json!({"id": "done", "createdAt": 1_700_000_000_400i64, "doneAt": 1_700_000_002_000i64}),
            json!({"id": "no-times"}),
        ];
        let changed = select_changed_orders(&mut state, orders, 1_700_000_003_000);
        let ids: Vec<&str> = changed.iter().map(|o| o["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["new", "done"]);
        assert_eq!(state.last_order_check, 1_700_000_003_000);
    }

    #[test]
    fn test_order_times_in_seconds_are_compared_as_milliseconds() {
        let mut state = PollState {
            last_order_check: 1_700_000_001_000,
            ..Default::default()
        };
        let orders = vec![
            json!({"id": "before", "createdAt": 1_700_000_000}),
            json!({"id": "after", "createdAt": 1_700_000_002}),
        ];
        let changed = select_changed_orders(&mut state, orders, 1_700_000_003_000);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0]["id"], "after");
    }

    #[test]
    fn test_balance_changes() {
        let mut state = PollState::default();
        let first = vec![json!({"id": "a1", "currency": "BTC", "balance": "1.5"})];
        assert!(select_balance_changes(&mut state, first).is_empty());
        assert_eq!(state.previous_balances.get("a1").map(String::as_str), Some("1.5"));

        let same = vec![json!({"id": "a1", "currency": "BTC", "balance": "1.5"})];
        assert!(select_balance_changes(&mut state, same).is_empty());

        let moved = vec![json!({"id": "a1", "currency": "BTC", "balance": "1.25"})];
        let changes = select_balance_changes(&mut state, moved);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0]["previousBalance"], "1.5");
        assert_eq!(changes[0]["changeAmount"], "-0.25");
        assert_eq!(changes[0]["currency"], "BTC");
        assert_eq!(state.previous_balances["a1"], "1.25");
    }

    #[test]
    fn test_price_alert_fires_once_and_rearms() {
        let mut state = PollState::default();
        let above = AlertDirection::Above;

        let fired = evaluate_price_alert(&mut state, "BTC-USDT", above, dec!(50000), dec!(50001)).unwrap();
        assert_eq!(fired["alertType"], "above");
        assert_eq!(fired["currentPrice"], 50001.0);
        assert_eq!(fired["thresholdPrice"], 50000.0);
        assert!(fired["triggeredAt"].as_str().unwrap().ends_with('Z'));
        assert!(state.price_alert_triggered);

        assert!(evaluate_price_alert(&mut state, "BTC-USDT", above, dec!(50000), dec!(50100)).is_none());

        assert!(evaluate_price_alert(&mut state, "BTC-USDT", above, dec!(50000), dec!(50000)).is_none());
        assert!(!state.price_alert_triggered);

        assert!(evaluate_price_alert(&mut state, "BTC-USDT", above, dec!(50000), dec!(50002)).is_some());
    }

    #[test]
    fn test_price_alert_below() {
        let mut state = PollState::default();
        let below = AlertDirection::Below;
        assert!(evaluate_price_alert(&mut state, "ETH-USDT", below, dec!(2000), dec!(2100)).is_none());
        assert!(evaluate_price_alert(&mut state, "ETH-USDT", below, dec!(2000), dec!(1999.5)).is_some());
        assert!(state.price_alert_triggered);
    }

    #[test]
    fn test_poll_state_serde() {
        let state: PollState = serde_json::from_value(json!({"lastTradeId": "t1"})).unwrap();
        assert_eq!(state.last_trade_id.as_deref(), Some("t1"));
        assert_eq!(state.last_order_check, 0);

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["priceAlertTriggered"], false);
        assert!(value.get("previousBalances").is_some());
    }

    #[tokio::test]
    async fn test_price_alert_requires_symbol() {
        let (client, transport) = client_answering(json!({"price": "1"}));
        let mut state = PollState::default();
        let result = client
            .poller()
            .price_alert(&mut state, "", AlertDirection::Above, dec!(1))
            .await;
        assert!(matches!(result, Err(RestError::InvalidParameter(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_price_alert_over_client() {
        let (client, transport) = client_answering(json!({"price": "43000.5", "bestBid": "43000"}));
        let mut state = PollState::default();
        let events = client
            .poller()
            .price_alert(&mut state, "BTC-USDT", AlertDirection::Above, dec!(42000))
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["thresholdPrice"], 42000.0);
        assert_eq!(events[0]["currentPrice"], 43000.5);
        assert_eq!(
            transport.requests()[0].path,
            "/api/v1/market/orderbook/level1?symbol=BTC-USDT"
        );
    }

    #[tokio::test]
    async fn test_order_poll_reads_items() {
        let now = Utc::now().timestamp_millis();
        let (client, transport) = client_answering(json!({"items": [{"id": "o1", "createdAt": now}]}));
        let mut state = PollState::default();
        let events = client
            .poller()
            .order_status_changes(&mut state, Some(""))
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(transport.requests()[0].path, "/api/v1/orders");
        assert!(state.last_order_check > 0);
    }
}
