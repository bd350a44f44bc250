//! KuCoin request signing (API key version 2)
//!
//! Signature algorithm:
//! 1. payload = timestamp + UPPER(method) + path_with_query + body
//! 2. HMAC-SHA256(api_secret, payload)
//! 3. Base64 encode result
//!
//! The passphrase is sent HMAC-SHA256'd with the same secret, base64 encoded.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use kucoin_types::Method;
use sha2::Sha256;

use crate::credentials::Credentials;

type HmacSha256 = Hmac<Sha256>;

/// API key version sent in `KC-API-KEY-VERSION`
pub const KEY_VERSION: &str = "2";

fn hmac_base64(secret: &str, message: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Sign a request
///
/// # Arguments
/// * `secret` - API secret
/// * `timestamp` - Millisecond timestamp, as sent in `KC-API-TIMESTAMP`
/// * `method` - HTTP method; upper-cased before signing
/// * `path_with_query` - Path including the `?query` suffix, if any
/// * `body` - Exact JSON body sent on the wire, empty when there is none
pub fn sign(secret: &str, timestamp: &str, method: &str, path_with_query: &str, body: &str) -> String {
    let payload = format!(
        "{}{}{}{}",
        timestamp,
        method.to_ascii_uppercase(),
        path_with_query,
        body
    );
    hmac_base64(secret, payload.as_bytes())
}

/// Encrypt the passphrase for `KC-API-PASSPHRASE`
pub fn encrypt_passphrase(passphrase: &str, secret: &str) -> String {
    hmac_base64(secret, passphrase.as_bytes())
}

/// Current wall clock time in milliseconds since the Unix epoch
pub fn timestamp_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Signs one request with a single sampled timestamp
///
/// The same timestamp is used for the header and the signature payload.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    timestamp: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer, sampling the clock now
    pub fn new(credentials: &'a Credentials) -> Self {
        Self::at(credentials, timestamp_ms())
    }

    /// Create a signer for a fixed timestamp
    pub fn at(credentials: &'a Credentials, timestamp: u64) -> Self {
        Self {
            credentials,
            timestamp: timestamp.to_string(),
        }
    }

    /// Get the timestamp for this request
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request
    pub fn sign(&self, method: Method, path_with_query: &str, body: &str) -> String {
        self.credentials
            .sign(&self.timestamp, method.as_str(), path_with_query, body)
    }

    /// Encrypted passphrase header value
    pub fn passphrase(&self) -> String {
        self.credentials.encrypted_passphrase()
    }
}
