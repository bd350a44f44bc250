//! Request assembly: host selection, signing headers and body
//!
//! Every request is signed with a timestamp sampled once at assembly time.
//! The header timestamp and the signed payload always use the same value.

use kucoin_auth::{Credentials, RequestSigner, KEY_VERSION};
use kucoin_types::{ApiFamily, Environment, Method};
use serde_json::{Map, Value};

use crate::error::{RestError, RestResult};

/// Sandbox host, shared by spot and futures
pub const SANDBOX_HOST: &str = "https://openapi-sandbox.kucoin.com";

pub const HEADER_API_KEY: &str = "KC-API-KEY";
pub const HEADER_SIGN: &str = "KC-API-SIGN";
pub const HEADER_TIMESTAMP: &str = "KC-API-TIMESTAMP";
pub const HEADER_PASSPHRASE: &str = "KC-API-PASSPHRASE";
pub const HEADER_KEY_VERSION: &str = "KC-API-KEY-VERSION";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Pick the base host for a call
pub fn resolve_base_host(credentials: &Credentials, family: ApiFamily) -> &str {
    match (credentials.environment(), family) {
        (Environment::Sandbox, _) => SANDBOX_HOST,
        (Environment::Production, ApiFamily::Futures) => credentials.base_url_futures(),
        (Environment::Production, ApiFamily::Spot) => credentials.base_url_spot(),
    }
}

/// Authentication headers for one request
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub api_key: String,
    pub signature: String,
    pub timestamp: String,
    pub passphrase: String,
    pub key_version: &'static str,
}

impl SignedHeaders {
    /// All headers in wire order, including `Content-Type`
    pub fn pairs(&self) -> [(&'static str, &str); 6] {
        [
            (HEADER_API_KEY, self.api_key.as_str()),
            (HEADER_SIGN, self.signature.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_PASSPHRASE, self.passphrase.as_str()),
            (HEADER_KEY_VERSION, self.key_version),
            ("Content-Type", CONTENT_TYPE_JSON),
        ]
    }

    /// Look up a header value by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs()
            .into_iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

impl std::fmt::Debug for SignedHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("api_key", &self.api_key)
            .field("signature", &"[REDACTED]")
            .field("timestamp", &self.timestamp)
            .field("passphrase", &"[REDACTED]")
            .field("key_version", &self.key_version)
            .finish()
    }
}

/// A fully signed request, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: Method,
    /// Host plus path with query
    pub url: String,
    /// Path with query, as signed
    pub path: String,
    pub headers: SignedHeaders,
    /// Exact JSON body that was signed; `None` when empty
    pub body: Option<String>,
}

/// Assemble a signed request, sampling the clock now
pub fn assemble(
    credentials: &Credentials,
    method: Method,
    path_with_query: &str,
    body: Option<&Map<String, Value>>,
    family: ApiFamily,
) -> RestResult<SignedRequest> {
    assemble_with(RequestSigner::new(credentials), credentials, method, path_with_query, body, family)
}

/// Assemble a signed request for a fixed millisecond timestamp
pub fn assemble_at(
    credentials: &Credentials,
    method: Method,
    path_with_query: &str,
    body: Option<&Map<String, Value>>,
    family: ApiFamily,
    timestamp: u64,
) -> RestResult<SignedRequest> {
    assemble_with(
        RequestSigner::at(credentials, timestamp),
        credentials,
        method,
        path_with_query,
        body,
        family,
    )
}

fn assemble_with(
    signer: RequestSigner<'_>,
    credentials: &Credentials,
    method: Method,
    path_with_query: &str,
    body: Option<&Map<String, Value>>,
    family: ApiFamily,
) -> RestResult<SignedRequest> {
    let body = match body {
        Some(map) if !map.is_empty() => Some(
            serde_json::to_string(map)
                .map_err(|e| RestError::InvalidParameter(format!("body: {}", e)))?,
        ),
        _ => None,
    };

    let signature = signer.sign(method, path_with_query, body.as_deref().unwrap_or(""));
    let url = format!("{}{}", resolve_base_host(credentials, family), path_with_query);

    Ok(SignedRequest {
        method,
        url,
        path: path_with_query.to_string(),
        headers: SignedHeaders {
            api_key: signer.api_key().to_string(),
            signature,
            timestamp: signer.timestamp().to_string(),
            passphrase: signer.passphrase(),
            key_version: KEY_VERSION,
        },
        body,
    })
}
