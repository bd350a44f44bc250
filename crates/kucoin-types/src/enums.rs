//! Environment, API family, HTTP method and order/account enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target environment for a set of credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live trading hosts
    #[default]
    Production,
    /// KuCoin sandbox, one host for spot and futures
    Sandbox,
}

impl Environment {
    /// Returns the environment name as stored in credential records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Sandbox => "sandbox",
        }
    }
}

impl FromStr for Environment {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" | "live" => Ok(Self::Production),
            "sandbox" | "test" => Ok(Self::Sandbox),
            _ => Err(UnknownVariant {
                kind: "environment",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which product surface a call targets; selects the base host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiFamily {
    /// Spot, margin, lending, earn and account endpoints
    #[default]
    Spot,
    /// Derivatives endpoints
    Futures,
}

impl ApiFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::Futures => "futures",
        }
    }
}

/// HTTP methods used by the KuCoin REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Upper-case method name, as it appears in the signature payload
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for Method {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(UnknownVariant {
                kind: "method",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Account types for balances and transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Funding account
    Main,
    /// Spot trading account
    #[default]
    Trade,
    /// High-frequency trading account
    TradeHf,
    /// Cross margin account
    Margin,
    /// Earn pool account
    Pool,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Trade => "trade",
            Self::TradeHf => "trade_hf",
            Self::Margin => "margin",
            Self::Pool => "pool",
        }
    }
}

/// Trade type filter for order and fill queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    Trade,
    MarginTrade,
    MarginIsolatedTrade,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trade => "TRADE",
            Self::MarginTrade => "MARGIN_TRADE",
            Self::MarginIsolatedTrade => "MARGIN_ISOLATED_TRADE",
        }
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// Order types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Executes at the given price or better
    Limit,
    /// Executes immediately against the book
    Market,
}

/// Time in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeInForce {
    /// Good till cancelled
    #[default]
    #[serde(rename = "GTC")]
    GoodTillCancelled,
    /// Good till time
    #[serde(rename = "GTT")]
    GoodTillTime,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Fill or kill
    #[serde(rename = "FOK")]
    FillOrKill,
}

/// Self-trade prevention strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelfTradePrevention {
    /// Decrease and cancel
    #[serde(rename = "DC")]
    DecreaseAndCancel,
    /// Cancel oldest
    #[serde(rename = "CO")]
    CancelOldest,
    /// Cancel newest
    #[serde(rename = "CN")]
    CancelNewest,
    /// Cancel both
    #[serde(rename = "CB")]
    CancelBoth,
}

/// Margin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarginMode {
    #[default]
    Cross,
    Isolated,
}

impl MarginMode {
    pub fn is_isolated(&self) -> bool {
        matches!(self, Self::Isolated)
    }
}

/// Candlestick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KlineInterval {
    #[serde(rename = "1min")]
    M1,
    #[serde(rename = "3min")]
    M3,
    #[serde(rename = "5min")]
    M5,
    #[serde(rename = "15min")]
    M15,
    #[serde(rename = "30min")]
    M30,
    #[default]
    #[serde(rename = "1hour")]
    H1,
    #[serde(rename = "2hour")]
    H2,
    #[serde(rename = "4hour")]
    H4,
    #[serde(rename = "6hour")]
    H6,
    #[serde(rename = "8hour")]
    H8,
    #[serde(rename = "12hour")]
    H12,
    #[serde(rename = "1day")]
    D1,
    #[serde(rename = "1week")]
    W1,
}

impl KlineInterval {
    /// Returns the interval name used in the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "1min",
            Self::M3 => "3min",
            Self::M5 => "5min",
            Self::M15 => "15min",
            Self::M30 => "30min",
            Self::H1 => "1hour",
            Self::H2 => "2hour",
            Self::H4 => "4hour",
            Self::H6 => "6hour",
            Self::H8 => "8hour",
            Self::H12 => "12hour",
            Self::D1 => "1day",
            Self::W1 => "1week",
        }
    }
}

/// Lending term in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LendingTerm {
    D7 = 7,
    D14 = 14,
    #[default]
    D28 = 28,
}

impl LendingTerm {
    pub fn as_days(&self) -> u32 {
        *self as u32
    }
}

/// Order book depth selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderBookLevel {
    /// Top 20 aggregated levels
    #[default]
    #[serde(rename = "level2_20")]
    Level2Top20,
    /// Top 100 aggregated levels
    #[serde(rename = "level2_100")]
    Level2Top100,
    /// Full order-by-order book
    #[serde(rename = "level3")]
    Level3,
}

impl OrderBookLevel {
    /// REST path serving this depth
    pub fn path(&self) -> &'static str {
        match self {
            Self::Level2Top20 => "/api/v1/market/orderbook/level2_20",
            Self::Level2Top100 => "/api/v1/market/orderbook/level2_100",
            Self::Level3 => "/api/v3/market/orderbook/level3",
        }
    }
}

/// Master/sub-account transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferDirection {
    /// Master to sub-account
    Out,
    /// Sub-account to master
    In,
}

/// Funding source for earn subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum EarnAccountType {
    #[default]
    Main,
    Trade,
}
