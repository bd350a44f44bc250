//! API endpoint implementations
//!
//! Each group is a thin borrow of the client; every method is one
//! [`execute`](crate::KuCoinRestClient::execute) or
//! [`fetch_all_pages`](crate::KuCoinRestClient::fetch_all_pages) call.

pub mod account;
pub mod earn;
pub mod futures_account;
pub mod futures_position;
pub mod futures_trading;
pub mod hf;
pub mod lending;
pub mod margin;
pub mod market;
pub mod spot;
pub mod sub_account;
pub mod utility;

pub use account::AccountEndpoints;
pub use earn::EarnEndpoints;
pub use futures_account::FuturesAccountEndpoints;
pub use futures_position::FuturesPositionEndpoints;
pub use futures_trading::FuturesTradingEndpoints;
pub use hf::HfTradingEndpoints;
pub use lending::LendingEndpoints;
pub use margin::MarginEndpoints;
pub use market::MarketEndpoints;
pub use spot::SpotTradingEndpoints;
pub use sub_account::SubAccountEndpoints;
pub use utility::UtilityEndpoints;

use crate::error::{RestError, RestResult};

/// Check a value interpolated into the path
pub(crate) fn path_segment<'v>(name: &str, value: &'v str) -> RestResult<&'v str> {
    if value.trim().is_empty() {
        return Err(RestError::InvalidParameter(format!("{} is required", name)));
    }
    if value.contains(['/', '?', '#']) {
        return Err(RestError::InvalidParameter(format!(
            "{} contains a reserved character: {}",
            name, value
        )));
    }
    Ok(value)
}

/// Check a required query or body parameter
pub(crate) fn required<'v>(name: &str, value: &'v str) -> RestResult<&'v str> {
    if value.trim().is_empty() {
        return Err(RestError::InvalidParameter(format!("{} is required", name)));
    }
    Ok(value)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segment() {
        assert_eq!(path_segment("orderId", "abc123").unwrap(), "abc123");
        assert!(path_segment("orderId", "").is_err());
        assert!(path_segment("orderId", "a/b").is_err());
        assert!(path_segment("orderId", "a?b=1").is_err());
    }

    #[test]
    fn test_required() {
        assert!(required("symbol", "BTC-USDT").is_ok());
        assert!(matches!(required("symbol", " "), Err(RestError::InvalidParameter(_))));
    }
}
