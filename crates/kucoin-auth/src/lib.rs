//! Credentials and request signing for the KuCoin REST API
//!
//! KuCoin authenticates every private call with an HMAC-SHA256 signature
//! over `timestamp + METHOD + path + body`, plus a passphrase encrypted with
//! the same secret (API key version 2).
//!
//! # Example
//!
//! ```no_run
//! use kucoin_auth::{Credentials, RequestSigner};
//! use kucoin_types::Method;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from environment
//!     let creds = Credentials::from_env()?;
//!
//!     // One signer per request; the timestamp is sampled once
//!     let signer = RequestSigner::new(&creds);
//!     let signature = signer.sign(Method::Get, "/api/v1/accounts", "");
//!     println!("{} {}", signer.timestamp(), signature);
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
pub mod signer;

pub use credentials::{Credentials, DEFAULT_FUTURES_URL, DEFAULT_SPOT_URL};
pub use error::{AuthError, AuthResult};
pub use signer::{encrypt_passphrase, sign, timestamp_ms, RequestSigner, KEY_VERSION};
