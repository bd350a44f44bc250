//! Shared types for the KuCoin REST API
//!
//! This crate provides the core type definitions used across the connector.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Environment`], [`ApiFamily`], [`Method`] - Request routing
//! - [`Symbol`] - Trading pair symbols (e.g., "BTC-USDT")
//! - [`Side`], [`OrderType`], [`TimeInForce`], [`AccountType`] - Wire enums
//! - [`KuCoinErrorCode`] - Response code table
//! - [`util`] - Client order IDs, timestamps and value coercion

pub mod enums;
pub mod error_codes;
pub mod symbol;
pub mod util;

// Re-export commonly used types
pub use enums::*;
pub use error_codes::*;
pub use symbol::*;
pub use util::generate_client_oid;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
