//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes returned by the KuCoin REST API.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use kucoin_rest::{
    ClientConfig, Credentials, HttpResponse, HttpTransport, KuCoinRestClient, SignedRequest,
    TransportError,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-secret-key";
pub const API_PASSPHRASE: &str = "my-passphrase";

/// Signing timestamp used by the fixed vectors
pub const TIMESTAMP: &str = "1234567890000";

/// Account list wrapped in a success envelope
pub const ACCOUNTS_RESPONSE: &str = r#"{
    "code": "200000",
    "data": [
        {"id": "5bd6e9286d99522a52e458de", "currency": "BTC", "type": "main",
         "balance": "0.5", "available": "0.5", "holds": "0"},
        {"id": "5bd6e9216d99522a52e458d6", "currency": "USDT", "type": "trade",
         "balance": "1250.75", "available": "1000", "holds": "250.75"}
    ]
}"#;

/// Success envelope without `data`
pub const NO_DATA_RESPONSE: &str = r#"{"code": "200000", "msg": "success"}"#;

/// Business failure inside an HTTP 200
pub const BALANCE_ERROR_RESPONSE: &str = r#"{"code": "400600", "msg": "Insufficient balance"}"#;

/// Body of an HTTP 401
pub const INVALID_KEY_RESPONSE: &str = r#"{"code": "400003", "msg": "KC-API-KEY not exists"}"#;

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET, API_PASSPHRASE).expect("valid test credentials")
}

/// One page of an order listing
pub fn order_page(page: u64, total_pages: u64, ids: &[&str]) -> String {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "symbol": "BTC-USDT", "isActive": false}))
        .collect();
    json!({
        "code": "200000",
        "data": {
            "currentPage": page,
            "pageSize": 50,
            "totalNum": items.len(),
            "totalPage": total_pages,
            "items": items
        }
    })
    .to_string()
}

/// Transport that records every request and replays scripted responses
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<SignedRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) {
        self.responses.lock().push_back(HttpResponse::new(status, body));
    }

    pub fn ok(&self, body: impl Into<String>) {
        self.respond(200, body);
    }

    pub fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.path.clone()).collect()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: SignedRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| TransportError::ConnectionFailed("connection refused".into()))
    }
}

/// Client over a recording transport, license notice off
pub fn client(transport: &Arc<RecordingTransport>) -> KuCoinRestClient {
    client_with(ClientConfig::new(credentials()).without_license_notice(), transport)
}

pub fn client_with(config: ClientConfig, transport: &Arc<RecordingTransport>) -> KuCoinRestClient {
    KuCoinRestClient::with_transport(config, transport.clone())
}
