//! Query parameters and canonical query strings
//!
//! The query string is part of the signed path, so it must be built exactly
//! the same way every time: insertion order, no null or empty values, and
//! `encodeURIComponent` escaping (space becomes `%20`, never `+`).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};

/// Characters escaped in query keys and values
///
/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Ordered query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(String, Value)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.push((key.into(), value.into()));
        self
    }

    /// Replace a parameter in place, or append it if absent
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key, value)),
        }
        self
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Append only when a value is given
    pub fn with_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Map<String, Value>> for QueryParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Stringify a query value; `None` means the parameter is dropped
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(stringify_element(other)),
    }
}

fn stringify_element(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(stringify_element)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Build the canonical query string
///
/// Returns `""` when nothing survives filtering, otherwise `?k=v&k=v`.
pub fn build_query_string(params: &QueryParams) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            stringify(value).map(|value| format!("{}={}", encode(key), encode(&value)))
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_params() {
        assert_eq!(build_query_string(&QueryParams::new()), "");
    }

    #[test]
    fn test_null_and_empty_are_dropped() {
        let params = QueryParams::new()
            .with("a", 1)
            .with("b", Value::Null)
            .with("c", "");
        assert_eq!(build_query_string(&params), "?a=1");

        let all_dropped = QueryParams::new().with("c", Value::Null).with("d", "");
        assert_eq!(build_query_string(&all_dropped), "");
    }

    #[test]
    fn test_space_is_percent_encoded() {
        let params = QueryParams::new().with("q", "test value");
        assert_eq!(build_query_string(&params), "?q=test%20value");
    }

    #[test]
    fn test_component_escaping() {
        let params = QueryParams::new()
            .with("symbol", "BTC-USDT")
            .with("note", "a+b/c&d=e")
            .with("keep", "-_.!~*'()");
        assert_eq!(
            build_query_string(&params),
            "?symbol=BTC-USDT&note=a%2Bb%2Fc%26d%3De&keep=-_.!~*'()"
        );
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let params = QueryParams::new()
            .with("type", "trade")
            .with("currency", "BTC")
            .with("currentPage", 2);
        assert_eq!(build_query_string(&params), "?type=trade&currency=BTC&currentPage=2");
    }

    #[test]
    fn test_scalar_rendering() {
        let params = QueryParams::new()
            .with("isEnable", false)
            .with("zero", 0)
            .with("rate", 0.5)
            .with("currencies", json!(["BTC", "ETH"]));
        assert_eq!(
            build_query_string(&params),
            "?isEnable=false&zero=0&rate=0.5&currencies=BTC%2CETH"
        );
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = QueryParams::new().with("symbol", "BTC-USDT").with("currentPage", 1);
        params.set("currentPage", 2).set("pageSize", 50);
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("currentPage"), Some(&json!(2)));
        assert_eq!(
            build_query_string(&params),
            "?symbol=BTC-USDT&currentPage=2&pageSize=50"
        );
    }

    #[test]
    fn test_with_opt() {
        let params = QueryParams::new()
            .with_opt("symbol", Some("BTC-USDT"))
            .with_opt::<&str>("side", None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_unicode_is_utf8_encoded() {
        let params = QueryParams::new().with("memo", "é");
        assert_eq!(build_query_string(&params), "?memo=%C3%A9");
    }
}
