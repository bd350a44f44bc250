//! KuCoin API response codes
//!
//! Every REST response carries a `code` field. `"200000"` is the only success
//! code; everything else is a business error reported inside a (usually)
//! successful HTTP response. This table covers the codes documented for the
//! authentication and general layers; unknown codes are passed through as
//! plain strings by the REST client.

use std::fmt;

/// The single success code
pub const SUCCESS_CODE: &str = "200000";

/// Error code categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 200000
    Success,
    /// 4000xx - missing or invalid authentication headers
    Auth,
    /// 4001xx / 4006xx - rejected parameters
    Request,
    /// Account or region restrictions
    Permission,
    /// 5xxxxx - exchange side failures
    Server,
}

/// Known KuCoin response codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KuCoinErrorCode {
    /// 200000
    Success,
    /// 400001
    MissingAuthHeaders,
    /// 400002
    InvalidTimestamp,
    /// 400003
    ApiKeyNotFound,
    /// 400004
    InvalidPassphrase,
    /// 400005
    InvalidSignature,
    /// 400006
    IpNotWhitelisted,
    /// 400007
    AccessDenied,
    /// 400100
    ParameterError,
    /// 400200
    OrderPlacementForbidden,
    /// 400500
    RegionNotSupported,
    /// 400600
    ValidationFailed,
    /// 400700
    InvalidTradePassword,
    /// 411100
    UserFrozen,
    /// 500000
    InternalServerError,
}

impl KuCoinErrorCode {
    /// All known codes, in numeric order
    pub const ALL: [KuCoinErrorCode; 15] = [
        Self::Success,
        Self::MissingAuthHeaders,
        Self::InvalidTimestamp,
        Self::ApiKeyNotFound,
        Self::InvalidPassphrase,
        Self::InvalidSignature,
        Self::IpNotWhitelisted,
        Self::AccessDenied,
        Self::ParameterError,
        Self::OrderPlacementForbidden,
        Self::RegionNotSupported,
        Self::ValidationFailed,
        Self::InvalidTradePassword,
        Self::UserFrozen,
        Self::InternalServerError,
    ];

    /// Look up a code string as returned in the `code` field
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code.trim() {
            "200000" => Self::Success,
            "400001" => Self::MissingAuthHeaders,
            "400002" => Self::InvalidTimestamp,
            "400003" => Self::ApiKeyNotFound,
            "400004" => Self::InvalidPassphrase,
            "400005" => Self::InvalidSignature,
            "400006" => Self::IpNotWhitelisted,
            "400007" => Self::AccessDenied,
            "400100" => Self::ParameterError,
            "400200" => Self::OrderPlacementForbidden,
            "400500" => Self::RegionNotSupported,
            "400600" => Self::ValidationFailed,
            "400700" => Self::InvalidTradePassword,
            "411100" => Self::UserFrozen,
            "500000" => Self::InternalServerError,
            _ => return None,
        })
    }

    /// The wire code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "200000",
            Self::MissingAuthHeaders => "400001",
            Self::InvalidTimestamp => "400002",
            Self::ApiKeyNotFound => "400003",
            Self::InvalidPassphrase => "400004",
            Self::InvalidSignature => "400005",
            Self::IpNotWhitelisted => "400006",
            Self::AccessDenied => "400007",
            Self::ParameterError => "400100",
            Self::OrderPlacementForbidden => "400200",
            Self::RegionNotSupported => "400500",
            Self::ValidationFailed => "400600",
            Self::InvalidTradePassword => "400700",
            Self::UserFrozen => "411100",
            Self::InternalServerError => "500000",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::MissingAuthHeaders => {
                "Any of KC-API-KEY, KC-API-SIGN, KC-API-TIMESTAMP, KC-API-PASSPHRASE is missing"
            }
            Self::InvalidTimestamp => "KC-API-TIMESTAMP Invalid",
            Self::ApiKeyNotFound => "KC-API-KEY not exists",
            Self::InvalidPassphrase => "KC-API-PASSPHRASE error",
            Self::InvalidSignature => "Signature error",
            Self::IpNotWhitelisted => "The requested ip address is not in the api whitelist",
            Self::AccessDenied => "Access Denied",
            Self::ParameterError => "Parameter Error",
            Self::OrderPlacementForbidden => "Forbidden to place an order",
            Self::RegionNotSupported => "Your located country/region is currently not supported",
            Self::ValidationFailed => "Validation failed",
            Self::InvalidTradePassword => "Invalid trade password",
            Self::UserFrozen => "User is frozen",
            Self::InternalServerError => "Internal Server Error",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Success => ErrorCategory::Success,
            Self::MissingAuthHeaders
            | Self::InvalidTimestamp
            | Self::ApiKeyNotFound
            | Self::InvalidPassphrase
            | Self::InvalidSignature => ErrorCategory::Auth,
            Self::ParameterError | Self::ValidationFailed | Self::InvalidTradePassword => {
                ErrorCategory::Request
            }
            Self::IpNotWhitelisted
            | Self::AccessDenied
            | Self::OrderPlacementForbidden
            | Self::RegionNotSupported
            | Self::UserFrozen => ErrorCategory::Permission,
            Self::InternalServerError => ErrorCategory::Server,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Credentials, signature or clock problems
    pub fn is_auth_error(&self) -> bool {
        self.category() == ErrorCategory::Auth
    }
}

impl fmt::Display for KuCoinErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_code() {
        let code = KuCoinErrorCode::from_code(SUCCESS_CODE).unwrap();
        assert!(code.is_success());
        assert_eq!(code.description(), "Success");
    }

    #[test]
    fn test_table_is_consistent() {
        for code in KuCoinErrorCode::ALL {
            assert_eq!(KuCoinErrorCode::from_code(code.code()), Some(code));
            assert!(!code.description().is_empty());
        }
    }

    #[test]
    fn test_categories() {
        assert!(KuCoinErrorCode::InvalidSignature.is_auth_error());
        assert!(KuCoinErrorCode::InvalidTimestamp.is_auth_error());
        assert!(!KuCoinErrorCode::ParameterError.is_auth_error());
        assert_eq!(KuCoinErrorCode::UserFrozen.category(), ErrorCategory::Permission);
        assert_eq!(KuCoinErrorCode::InternalServerError.category(), ErrorCategory::Server);
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(KuCoinErrorCode::from_code("999999"), None);
    }
}
