//! Signed REST client for the KuCoin exchange
//!
//! This crate turns a logical API call (method, path, query, body) into a
//! signed HTTP request, sends it, and normalizes the answer.
//!
//! # Features
//!
//! - **Signing**: HMAC-SHA256 over timestamp, method, path and body (key version 2)
//! - **Routing**: Spot and futures hosts, or the shared sandbox host
//! - **Responses**: `{code, msg, data}` envelopes, bare arrays and bare objects
//! - **Pagination**: `currentPage` / `pageSize` collection walking
//! - **Endpoints**: Accounts, trading, margin, lending, market data, futures, earn
//! - **Automation**: Sequential batches and polling triggers
//!
//! # Example
//!
//! ```no_run
//! use kucoin_rest::{ApiRequest, Credentials, KuCoinRestClient};
//! use kucoin_types::Environment;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::new("key", "secret", "passphrase")?
//!         .with_environment(Environment::Sandbox);
//!     let client = KuCoinRestClient::new(creds)?;
//!
//!     let ticker = client.market().ticker("BTC-USDT").await?;
//!     println!("BTC-USDT: {}", ticker["price"]);
//!
//!     // Every page of done orders
//!     let orders = client
//!         .fetch_all_pages(ApiRequest::get("/api/v1/orders").query("status", "done"), "items")
//!         .await?;
//!     println!("{} orders", orders.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Business failures (`code` other than `200000`) and HTTP failures both
//! surface as [`RestError`]; its `Display` reads
//! `KuCoin API Error: <message> (Code: <code>)`.

pub mod batch;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod notice;
pub mod pagination;
pub mod query;
pub mod request;
pub mod transport;
pub mod trigger;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, KuCoinRestClient};
pub use error::{RestError, RestResult};
pub use kucoin_auth::Credentials;

pub use batch::{run_sequential, FailureMode, ItemOutcome};
pub use pagination::{PageData, PageState, PAGE_SIZE};
pub use query::{build_query_string, QueryParams};
pub use request::{assemble, assemble_at, SignedHeaders, SignedRequest};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use trigger::{AlertDirection, PollState, Poller};
pub use types::{ApiRequest, ApiResponse, Envelope, FuturesOrderRequest, OrderRequest};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;
