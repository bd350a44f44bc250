//! HTTP transport abstraction
//!
//! This module provides a trait-based abstraction over the HTTP exchange,
//! enabling unit testing of the executor without real network calls.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use kucoin_rest::transport::{HttpTransport, ReqwestTransport, TransportError};
//! use kucoin_rest::request::assemble;
//! use kucoin_auth::Credentials;
//! use kucoin_types::{ApiFamily, Method};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let transport = ReqwestTransport::new(Duration::from_secs(30), "kucoin-rest")?;
//!     let request = assemble(&creds, Method::Get, "/api/v1/accounts", None, ApiFamily::Spot)?;
//!     let response = transport.send(request).await?;
//!     println!("{}: {}", response.status, response.body);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use kucoin_types::Method;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::request::SignedRequest;

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// No response was received
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The HTTP client's timeout elapsed
    #[error("request timed out")]
    Timeout,

    /// The response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),

    /// The HTTP client could not be built
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP transport abstraction
///
/// Implementations send one signed request and return the raw status and
/// body. Non-2xx statuses are not errors at this layer.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: SignedRequest) -> Result<HttpResponse, TransportError>;
}

/// Real HTTP transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with its own HTTP client
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| TransportError::Config(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing HTTP client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: SignedRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        for (name, value) in request.headers.pairs() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status, len = body.len(), "Received response");
        Ok(HttpResponse { status, body })
    }
}

/// Mock transport for testing
///
/// Returns scripted responses in order and records every request sent.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Default)]
pub struct MockTransport {
    responses: parking_lot::Mutex<std::collections::VecDeque<Result<HttpResponse, TransportError>>>,
    requests: parking_lot::Mutex<Vec<SignedRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response to be returned on send()
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Add a 200 response with a JSON body
    pub fn push_json(&self, body: serde_json::Value) {
        self.push_response(200, body.to_string());
    }

    /// Simulate a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Requests sent so far
    pub fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: SignedRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::ConnectionFailed("no scripted response".into())))
    }
}
