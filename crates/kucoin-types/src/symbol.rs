//! Spot trading pair symbols (BTC-USDT format)

use std::fmt;
use std::str::FromStr;

/// Spot trading pair symbol, `BASE-QUOTE`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check a symbol against the `BASE-QUOTE` format
///
/// Case-insensitive: `btc-usdt` is accepted.
pub fn is_valid_symbol(symbol: &str) -> bool {
    let mut parts = symbol.split('-');
    let valid_part = |p: Option<&str>| {
        p.is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric()))
    };
    valid_part(parts.next()) && valid_part(parts.next()) && parts.next().is_none()
}

impl FromStr for Symbol {
    type Err = SymbolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains('-') {
            return Err(SymbolParseError::MissingDash(s.to_string()));
        }
        if !is_valid_symbol(s) {
            return Err(SymbolParseError::InvalidFormat(s.to_string()));
        }
        Ok(Self(s.to_ascii_uppercase()))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error parsing a symbol
#[derive(Debug, Clone, thiserror::Error)]
pub enum SymbolParseError {
    #[error("Symbol must contain '-': {0}")]
    MissingDash(String),

    #[error("Invalid symbol format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_parse() {
        let symbol: Symbol = "btc-usdt".parse().unwrap();
        assert_eq!(symbol.as_str(), "BTC-USDT");
        assert_eq!(symbol.to_string(), "BTC-USDT");
    }

    #[test]
    fn test_symbol_validation() {
        assert!(is_valid_symbol("BTC-USDT"));
        assert!(is_valid_symbol("ETH-BTC"));
        assert!(is_valid_symbol("btc-usdt"));
        assert!(!is_valid_symbol("BTCUSDT"));
        assert!(!is_valid_symbol("BTC_USDT"));
        assert!(!is_valid_symbol("BTC-"));
        assert!(!is_valid_symbol("BTC-USDT-X"));
    }

    #[test]
    fn test_symbol_parse_error() {
        assert!(matches!("BTCUSDT".parse::<Symbol>(), Err(SymbolParseError::MissingDash(_))));
        assert!(matches!("-USDT".parse::<Symbol>(), Err(SymbolParseError::InvalidFormat(_))));
    }
}
