//! Example: signed REST calls against the KuCoin API
//!
//! This example demonstrates how to:
//! - Build a client from environment variables
//! - Read market data and account balances
//! - Walk a paginated collection
//! - Tell business errors apart from transport errors
//!
//! Run with: cargo run -p kucoin-rest --example rest_account
//!
//! NOTE: Set KUCOIN_API_KEY, KUCOIN_API_SECRET and KUCOIN_API_PASSPHRASE.
//! Set KUCOIN_ENVIRONMENT=sandbox to use the sandbox host.

use kucoin_rest::{ApiRequest, KuCoinRestClient, RestError};
use kucoin_types::OrderBookLevel;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("kucoin_rest=info".parse()?))
        .init();

    println!("=== KuCoin REST Example ===\n");

    let client = KuCoinRestClient::from_env()?;
    println!("Environment: {}\n", client.environment());

    // ========================================================================
    // MARKET DATA
    // ========================================================================

    println!("--- Market Data ---\n");

    match client.market().ticker("BTC-USDT").await {
        Ok(ticker) => {
            println!("  Last Price: {}", ticker["price"]);
            println!("  Best Bid:   {}", ticker["bestBid"]);
            println!("  Best Ask:   {}", ticker["bestAsk"]);
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    match client.market().order_book("BTC-USDT", OrderBookLevel::Level2Top20).await {
        Ok(book) => {
            let bids = book["bids"].as_array().map(Vec::len).unwrap_or(0);
            let asks = book["asks"].as_array().map(Vec::len).unwrap_or(0);
            println!("  Order book: {} bids, {} asks", bids, asks);
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    // ========================================================================
    // ACCOUNT
    // ========================================================================

    println!("--- Accounts ---\n");

    match client.account().list(None, None).await {
        Ok(accounts) => {
            for account in accounts.as_array().into_iter().flatten() {
                println!(
                    "  {:<8} {:<10} balance {}",
                    account["currency"].as_str().unwrap_or("?"),
                    account["type"].as_str().unwrap_or("?"),
                    account["balance"].as_str().unwrap_or("0"),
                );
            }
        }
        Err(RestError::Business { code, message }) => {
            println!("  Rejected by KuCoin: {} ({})", message, code);
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    // ========================================================================
    // PAGINATION
    // ========================================================================

    println!("--- Done Orders (all pages) ---\n");

    let request = ApiRequest::get("/api/v1/orders")
        .query("symbol", "BTC-USDT")
        .query("status", "done");
    match client.fetch_all_pages(request, "items").await {
        Ok(orders) => println!("  {} orders", orders.len()),
        Err(e) => println!("  Error: {}", e),
    }

    Ok(())
}
