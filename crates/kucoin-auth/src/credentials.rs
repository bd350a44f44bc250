//! Authentication credentials for the KuCoin API
//!
//! # Security
//!
//! The API secret and passphrase are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use kucoin_types::Environment;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AuthError, AuthResult};
use crate::signer;

/// Default production host for spot, margin and account endpoints
pub const DEFAULT_SPOT_URL: &str = "https://api.kucoin.com";

/// Default production host for futures endpoints
pub const DEFAULT_FUTURES_URL: &str = "https://api-futures.kucoin.com";

/// API credentials for authenticated requests
///
/// Immutable once built. The secret and passphrase are zeroized when the
/// credentials are dropped.
#[derive(Deserialize)]
#[serde(try_from = "CredentialRecord")]
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
    api_passphrase: SecretString,
    environment: Environment,
    base_url_spot: String,
    base_url_futures: String,
}

impl Credentials {
    /// Create production credentials with the default hosts
    ///
    /// Fails if any field is empty.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        api_passphrase: impl Into<String>,
    ) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        let api_passphrase = api_passphrase.into();

        for (name, value) in [
            ("api key", &api_key),
            ("api secret", &api_secret),
            ("api passphrase", &api_passphrase),
        ] {
            if value.trim().is_empty() {
                return Err(AuthError::InvalidCredentials(format!("{} is empty", name)));
            }
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
            api_passphrase: SecretString::from(api_passphrase),
            environment: Environment::Production,
            base_url_spot: DEFAULT_SPOT_URL.to_string(),
            base_url_futures: DEFAULT_FUTURES_URL.to_string(),
        })
    }

    /// Set the target environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the production spot host
    pub fn with_spot_url(mut self, url: impl Into<String>) -> Self {
        self.base_url_spot = url.into();
        self
    }

    /// Override the production futures host
    pub fn with_futures_url(mut self, url: impl Into<String>) -> Self {
        self.base_url_futures = url.into();
        self
    }

    /// Create credentials from environment variables
    ///
    /// Reads `KUCOIN_API_KEY`, `KUCOIN_API_SECRET` and `KUCOIN_API_PASSPHRASE`.
    /// Optional: `KUCOIN_ENVIRONMENT` (`production` or `sandbox`),
    /// `KUCOIN_BASE_URL_SPOT`, `KUCOIN_BASE_URL_FUTURES`.
    pub fn from_env() -> AuthResult<Self> {
        let required = |name: &str| {
            std::env::var(name).map_err(|_| AuthError::EnvVarNotSet(name.to_string()))
        };

        let mut creds = Self::new(
            required("KUCOIN_API_KEY")?,
            required("KUCOIN_API_SECRET")?,
            required("KUCOIN_API_PASSPHRASE")?,
        )?;

        if let Ok(env) = std::env::var("KUCOIN_ENVIRONMENT") {
            creds.environment = env
                .parse()
                .map_err(|_| AuthError::InvalidEnvironment(env.clone()))?;
        }
        if let Ok(url) = std::env::var("KUCOIN_BASE_URL_SPOT") {
            creds.base_url_spot = url;
        }
        if let Ok(url) = std::env::var("KUCOIN_BASE_URL_FUTURES") {
            creds.base_url_futures = url;
        }

        debug!(environment = %creds.environment, "Loaded credentials from environment");
        Ok(creds)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url_spot(&self) -> &str {
        &self.base_url_spot
    }

    pub fn base_url_futures(&self) -> &str {
        &self.base_url_futures
    }

    /// Sign a request payload with the API secret
    ///
    /// See [`signer::sign`] for the payload layout.
    pub fn sign(&self, timestamp: &str, method: &str, path_with_query: &str, body: &str) -> String {
        signer::sign(
            self.api_secret.expose_secret(),
            timestamp,
            method,
            path_with_query,
            body,
        )
    }

    /// Passphrase encrypted with the API secret
    pub fn encrypted_passphrase(&self) -> String {
        signer::encrypt_passphrase(
            self.api_passphrase.expose_secret(),
            self.api_secret.expose_secret(),
        )
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new secrets with the same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
            api_passphrase: SecretString::from(self.api_passphrase.expose_secret().to_owned()),
            environment: self.environment,
            base_url_spot: self.base_url_spot.clone(),
            base_url_futures: self.base_url_futures.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", self.api_key.chars().take(8).collect::<String>()),
            )
            .field("api_secret", &"[REDACTED]")
            .field("api_passphrase", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("base_url_spot", &self.base_url_spot)
            .field("base_url_futures", &self.base_url_futures)
            .finish()
    }
}

/// Stored credential record, as saved by the host platform
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialRecord {
    api_key: String,
    api_secret: String,
    api_passphrase: String,
    #[serde(default)]
    environment: Environment,
    #[serde(default = "default_spot_url")]
    base_url_spot: String,
    #[serde(default = "default_futures_url")]
    base_url_futures: String,
}

fn default_spot_url() -> String {
    DEFAULT_SPOT_URL.to_string()
}

fn default_futures_url() -> String {
    DEFAULT_FUTURES_URL.to_string()
}

impl TryFrom<CredentialRecord> for Credentials {
    type Error = AuthError;

    fn try_from(record: CredentialRecord) -> AuthResult<Self> {
        Ok(Self::new(record.api_key, record.api_secret, record.api_passphrase)?
            .with_environment(record.environment)
            .with_spot_url(record.base_url_spot)
            .with_futures_url(record.base_url_futures))
    }
}
