//! Example: polling for a price alert and balance changes
//!
//! Polls every 10 seconds and prints events as they fire. The poll state
//! is kept in memory here; serialize it to keep it across restarts.
//!
//! Run with: cargo run -p kucoin-rest --example price_alert -- BTC-USDT 50000

use std::env;
use std::time::Duration;

use kucoin_rest::{AlertDirection, KuCoinRestClient, PollState};
use kucoin_types::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| "BTC-USDT".to_string());
    let threshold: Decimal = args.next().unwrap_or_else(|| "50000".to_string()).parse()?;

    let client = KuCoinRestClient::from_env()?;
    let poller = client.poller();
    let mut alert_state = PollState::default();
    let mut balance_state = PollState::default();

    println!("Watching {} above {}\n", symbol, threshold);

    let mut interval = tokio::time::interval(Duration::from_secs(10));
    loop {
        interval.tick().await;

        match poller
            .price_alert(&mut alert_state, &symbol, AlertDirection::Above, threshold)
            .await
        {
            Ok(events) => {
                for event in events {
                    println!("ALERT {} at {}", event["symbol"], event["currentPrice"]);
                }
            }
            Err(e) => println!("price poll failed: {}", e),
        }

        match poller.balance_changes(&mut balance_state, None).await {
            Ok(changes) => {
                for change in changes {
                    println!(
                        "BALANCE {} {} -> {} ({})",
                        change["currency"], change["previousBalance"], change["balance"], change["changeAmount"]
                    );
                }
            }
            Err(e) => println!("balance poll failed: {}", e),
        }
    }
}
