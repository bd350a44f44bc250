//! Error types for REST API operations

use kucoin_auth::AuthError;
use kucoin_types::KuCoinErrorCode;
use serde_json::Value;

use crate::transport::TransportError;

/// Message used when a business error carries no `msg`
pub const UNKNOWN_API_ERROR: &str = "Unknown KuCoin API error";

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The API answered with a non-success `code`
    #[error("KuCoin API Error: {message} (Code: {code})")]
    Business {
        /// Response code, e.g. "400100"
        code: String,
        /// `msg` from the response
        message: String,
    },

    /// The HTTP exchange failed: non-2xx status or no response at all
    #[error("KuCoin API Error: {message}")]
    Transport {
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// `code` from the error body, falling back to the HTTP status
        code: Option<String>,
        message: String,
    },

    /// A 2xx response that is not JSON or not a known shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// A paginated response without a list of items
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Credential problems
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

impl RestError {
    /// Build a business error from an envelope's `code` and `msg`
    pub fn business(code: impl Into<String>, msg: Option<&str>) -> Self {
        Self::Business {
            code: code.into(),
            message: msg
                .filter(|m| !m.is_empty())
                .unwrap_or(UNKNOWN_API_ERROR)
                .to_string(),
        }
    }

    /// Build a transport error from a non-2xx response
    ///
    /// `code` and `msg` are taken from the body when it is a JSON object;
    /// otherwise the status stands in for the code and the message is
    /// `HTTP {status}`.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body).ok();
        let field = |name: &str| parsed.as_ref().and_then(|v| v.get(name));

        let code = field("code")
            .and_then(|c| match c {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| status.to_string());
        let message = field("msg")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));

        Self::Transport {
            status: Some(status),
            code: Some(code),
            message,
        }
    }

    /// Error code, if the failure carried one
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Business { code, .. } => Some(code),
            Self::Transport { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Message without the `KuCoin API Error:` prefix
    pub fn message(&self) -> String {
        match self {
            Self::Business { message, .. } | Self::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_business(&self) -> bool {
        matches!(self, Self::Business { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Look the code up in the known error table
    pub fn known_code(&self) -> Option<KuCoinErrorCode> {
        self.code().and_then(KuCoinErrorCode::from_code)
    }

    /// Check if the error points at credentials, signature or clock
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Auth(_)) || self.known_code().is_some_and(|c| c.is_auth_error())
    }
}

impl From<TransportError> for RestError {
    fn from(err: TransportError) -> Self {
        Self::Transport {
            status: None,
            code: None,
            message: format!("Request failed: {}", err),
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
