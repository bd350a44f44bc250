//! Types for KuCoin REST API requests and responses

use kucoin_types::{
    generate_client_oid, ApiFamily, Method, OrderType, SelfTradePrevention, Side, Symbol,
    TimeInForce, SUCCESS_CODE,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{RestError, RestResult};
use crate::query::QueryParams;

// ============================================================================
// Request Descriptor
// ============================================================================

/// One API call: method, path, query, optional body and API family
///
/// # Example
///
/// ```
/// use kucoin_rest::ApiRequest;
///
/// let request = ApiRequest::get("/api/v1/orders")
///     .query("symbol", "BTC-USDT")
///     .query("status", "active");
/// assert_eq!(request.query.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path without query, starting with `/`
    pub path: String,
    pub query: QueryParams,
    pub body: Option<Map<String, Value>>,
    pub family: ApiFamily,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
            family: ApiFamily::Spot,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Add a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.push(key, value);
        self
    }

    /// Add a query parameter when a value is given
    pub fn query_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.query.push(key, value);
        }
        self
    }

    /// Replace the query parameters
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Set the JSON body
    pub fn body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize a typed body; it must serialize to a JSON object
    pub fn json_body<T: Serialize>(self, body: &T) -> RestResult<Self> {
        match serde_json::to_value(body) {
            Ok(Value::Object(map)) => Ok(self.body(map)),
            Ok(other) => Err(RestError::InvalidParameter(format!(
                "body must be a JSON object, got {}",
                other
            ))),
            Err(e) => Err(RestError::InvalidParameter(format!("body: {}", e))),
        }
    }

    /// Target the futures host
    pub fn futures(self) -> Self {
        self.family(ApiFamily::Futures)
    }

    pub fn family(mut self, family: ApiFamily) -> Self {
        self.family = family;
        self
    }

    /// Check the request before it is signed
    pub fn validate(&self) -> RestResult<()> {
        if !self.path.starts_with('/') {
            return Err(RestError::InvalidParameter(format!(
                "path must start with '/': {}",
                self.path
            )));
        }
        if self.path.contains('?') {
            return Err(RestError::InvalidParameter(format!(
                "path must not carry a query string: {}",
                self.path
            )));
        }
        Ok(())
    }
}

// ============================================================================
// API Response Wrapper
// ============================================================================

/// Standard KuCoin response envelope: `{code, msg, data}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Response code; numeric codes are normalized to strings
    #[serde(deserialize_with = "code_as_string")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// `Some(Value::Null)` when the response carried `"data": null`
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
    /// Any other top-level fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Check if the response indicates success
    ///
    /// An empty code is not an error code.
    pub fn is_success(&self) -> bool {
        self.code.is_empty() || self.code == SUCCESS_CODE
    }

    /// Get the payload, returning an error for a non-success code
    ///
    /// Without `data` the whole envelope is returned.
    pub fn into_result(self) -> RestResult<Value> {
        if !self.is_success() {
            return Err(RestError::business(self.code, self.msg.as_deref()));
        }
        match self.data {
            Some(data) => Ok(data),
            None => serde_json::to_value(&self).map_err(|e| RestError::Parse(e.to_string())),
        }
    }
}

fn code_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("invalid code: {}", other))),
    }
}

fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Every response shape the API returns
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// `{code, msg?, data?}`
    Envelope(Envelope),
    /// A bare array
    List(Vec<Value>),
    /// A bare object without `code`
    Object(Map<String, Value>),
}

impl ApiResponse {
    /// Decode a response body
    pub fn decode(body: &str) -> RestResult<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| RestError::Parse(format!("invalid JSON response: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> RestResult<Self> {
        match value {
            Value::Array(items) => Ok(Self::List(items)),
            Value::Object(map) if map.contains_key("code") => {
                serde_json::from_value(Value::Object(map))
                    .map(Self::Envelope)
                    .map_err(|e| RestError::Parse(format!("invalid envelope: {}", e)))
            }
            Value::Object(map) => Ok(Self::Object(map)),
            other => Err(RestError::Parse(format!("unexpected response: {}", other))),
        }
    }

    /// Resolve to the caller-facing payload
    pub fn into_data(self) -> RestResult<Value> {
        match self {
            Self::Envelope(envelope) => envelope.into_result(),
            Self::List(items) => Ok(Value::Array(items)),
            Self::Object(map) => Ok(Value::Object(map)),
        }
    }
}

// ============================================================================
// Trading Types
// ============================================================================

/// Spot and HF order placement body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub client_oid: String,
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub size: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stp: Option<SelfTradePrevention>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl OrderRequest {
    fn base(symbol: impl Into<String>, side: Side, order_type: OrderType, size: Decimal) -> Self {
        Self {
            client_oid: generate_client_oid(),
            symbol: symbol.into(),
            side,
            order_type,
            size,
            price: None,
            time_in_force: None,
            post_only: None,
            hidden: None,
            stp: None,
            remark: None,
        }
    }

    /// Create a limit order
    pub fn limit(symbol: impl Into<String>, side: Side, size: Decimal, price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..Self::base(symbol, side, OrderType::Limit, size)
        }
    }

    /// Create a market order
    pub fn market(symbol: impl Into<String>, side: Side, size: Decimal) -> Self {
        Self::base(symbol, side, OrderType::Market, size)
    }

    /// Set time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set as post-only (maker only)
    pub fn post_only(mut self) -> Self {
        self.post_only = Some(true);
        self
    }

    /// Hide the order from the book
    pub fn hidden(mut self) -> Self {
        self.hidden = Some(true);
        self
    }

    pub fn with_stp(mut self, stp: SelfTradePrevention) -> Self {
        self.stp = Some(stp);
        self
    }

    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Replace the generated client order ID
    pub fn with_client_oid(mut self, client_oid: impl Into<String>) -> Self {
        self.client_oid = client_oid.into();
        self
    }

    /// Check the order before sending
    pub fn validate(&self) -> RestResult<()> {
        validate_order_shape(&self.symbol, self.order_type, self.price)?;
        self.symbol
            .parse::<Symbol>()
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
        if self.size <= Decimal::ZERO {
            return Err(RestError::InvalidParameter("size must be positive".into()));
        }
        Ok(())
    }
}

/// Futures order placement body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesOrderRequest {
    pub client_oid: String,
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub leverage: u32,
    /// Number of contracts
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl FuturesOrderRequest {
    /// Create a limit order
    pub fn limit(symbol: impl Into<String>, side: Side, leverage: u32, size: u64, price: Decimal) -> Self {
        Self {
            client_oid: generate_client_oid(),
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            leverage,
            size,
            price: Some(price),
        }
    }

    /// Create a market order
    pub fn market(symbol: impl Into<String>, side: Side, leverage: u32, size: u64) -> Self {
        Self {
            client_oid: generate_client_oid(),
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            leverage,
            size,
            price: None,
        }
    }

    /// Replace the generated client order ID
    pub fn with_client_oid(mut self, client_oid: impl Into<String>) -> Self {
        self.client_oid = client_oid.into();
        self
    }

    pub fn validate(&self) -> RestResult<()> {
        validate_order_shape(&self.symbol, self.order_type, self.price)?;
        if self.size == 0 || self.leverage == 0 {
            return Err(RestError::InvalidParameter(
                "size and leverage must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn validate_order_shape(symbol: &str, order_type: OrderType, price: Option<Decimal>) -> RestResult<()> {
    if symbol.is_empty() {
        return Err(RestError::InvalidParameter("symbol is required".into()));
    }
    if order_type == OrderType::Limit && price.is_none() {
        return Err(RestError::InvalidParameter("limit orders require a price".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::delete("/api/v1/orders")
            .query("symbol", "BTC-USDT")
            .query_opt::<&str>("tradeType", None)
            .futures();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.family, ApiFamily::Futures);
        assert_eq!(request.query.len(), 1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_path_validation() {
        assert!(matches!(
            ApiRequest::get("api/v1/accounts").validate(),
            Err(RestError::InvalidParameter(_))
        ));
        assert!(ApiRequest::get("/api/v1/orders?symbol=BTC-USDT").validate().is_err());
    }

    #[test]
    fn test_json_body_must_be_object() {
        assert!(ApiRequest::post("/x").json_body(&json!({"a": 1})).is_ok());
        assert!(ApiRequest::post("/x").json_body(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_envelope_with_data() {
        let response = ApiResponse::decode(r#"{"code":"200000","data":{"balance":"1.5"}}"#).unwrap();
        assert_eq!(response.into_data().unwrap(), json!({"balance": "1.5"}));
    }

    #[test]
    fn test_envelope_null_data_is_present() {
        let response = ApiResponse::decode(r#"{"code":"200000","data":null}"#).unwrap();
        assert_eq!(response.into_data().unwrap(), Value::Null);
    }

    #[test]
    fn test_envelope_without_data_returns_envelope() {
        let response = ApiResponse::decode(r#"{"code":"200000","msg":"ok","extra":1}"#).unwrap();
        assert_eq!(
            response.into_data().unwrap(),
            json!({"code": "200000", "msg": "ok", "extra": 1})
        );
    }

    #[test]
    fn test_business_error() {
        let response = ApiResponse::decode(r#"{"code":"400100","msg":"Parameter Error"}"#).unwrap();
        let err = response.into_data().unwrap_err();
        assert!(matches!(err, RestError::Business { ref code, .. } if code == "400100"));
        assert_eq!(err.message(), "Parameter Error");
    }

    #[test]
    fn test_numeric_code_is_normalized() {
        let response = ApiResponse::decode(r#"{"code":200000,"data":[1]}"#).unwrap();
        match &response {
            ApiResponse::Envelope(envelope) => assert_eq!(envelope.code, "200000"),
            other => panic!("expected envelope, got {:?}", other),
        }
        assert_eq!(response.into_data().unwrap(), json!([1]));

        let err = ApiResponse::decode(r#"{"code":400001}"#).unwrap().into_data().unwrap_err();
        assert_eq!(err.code(), Some("400001"));
        assert_eq!(err.message(), "Unknown KuCoin API error");
    }

    #[test]
    fn test_empty_code_is_not_an_error() {
        let response = ApiResponse::decode(r#"{"code":"","data":5}"#).unwrap();
        assert_eq!(response.into_data().unwrap(), json!(5));
    }

    #[test]
    fn test_bare_shapes() {
        assert_eq!(
            ApiResponse::decode("[1,2]").unwrap(),
            ApiResponse::List(vec![json!(1), json!(2)])
        );
        assert!(matches!(
            ApiResponse::decode(r#"{"items":[]}"#).unwrap(),
            ApiResponse::Object(_)
        ));
        assert!(matches!(ApiResponse::decode("42"), Err(RestError::Parse(_))));
        assert!(matches!(ApiResponse::decode("not json"), Err(RestError::Parse(_))));
    }

    #[test]
    fn test_order_request_serialization() {
        let order = OrderRequest::limit("BTC-USDT", Side::Buy, dec!(0.001), dec!(50000))
            .post_only()
            .with_time_in_force(TimeInForce::GoodTillCancelled)
            .with_client_oid("oid-1");
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "clientOid": "oid-1",
                "symbol": "BTC-USDT",
                "side": "buy",
                "type": "limit",
                "size": "0.001",
                "price": "50000",
                "timeInForce": "GTC",
                "postOnly": true
            })
        );
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_order_validation() {
        let mut order = OrderRequest::market("BTC-USDT", Side::Sell, dec!(1));
        assert!(order.validate().is_ok());
        assert_eq!(order.client_oid.len(), 32);

        order.order_type = OrderType::Limit;
        assert!(order.validate().is_err());

        let zero = OrderRequest::market("BTC-USDT", Side::Sell, Decimal::ZERO);
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_order_symbol_must_be_a_pair() {
        let order = OrderRequest::market("BTCUSDT", Side::Buy, dec!(1));
        assert!(matches!(order.validate(), Err(RestError::InvalidParameter(msg)) if msg.contains("BTCUSDT")));

        assert!(OrderRequest::market("btc-usdt", Side::Buy, dec!(1)).validate().is_ok());
    }

    #[test]
    fn test_futures_order_serialization() {
        let order = FuturesOrderRequest::market("XBTUSDTM", Side::Buy, 5, 10).with_client_oid("f-1");
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "clientOid": "f-1",
                "symbol": "XBTUSDTM",
                "side": "buy",
                "type": "market",
                "leverage": 5,
                "size": 10
            })
        );
        assert!(FuturesOrderRequest::market("XBTUSDTM", Side::Buy, 0, 10).validate().is_err());
    }
}
