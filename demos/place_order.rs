//! Example: build, sign and submit a limit order, then cancel it.
//!
//! Run with: cargo run --example place_order
//!
//! Places a real order. Only runs when `JOJO_PLACE_ORDER` is set.

use std::env;

use jojo_api_client::Side;
use jojo_api_client::rest::{JojoRestClientBuilder, OrderQuery, OrderRequest, PlaceOrderOutcome};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if env::var("JOJO_PLACE_ORDER").is_err() {
        println!("Set JOJO_PLACE_ORDER=1 to place a live order.");
        return Ok(());
    }

    let client = JojoRestClientBuilder::from_env()?.build()?;

    let order = OrderRequest::limit("ethusdc", Side::Buy, "0.5".parse()?, Decimal::from(1800));
    let response = match client.place_order(&order).await? {
        PlaceOrderOutcome::Submitted(response) => response,
        PlaceOrderOutcome::Rejected(response) => {
            println!("Exchange refused to build the order: {response}");
            return Ok(());
        }
    };
    println!("Submitted: {response}");

    if let Some(order_id) = response.get("id").and_then(|id| id.as_str()) {
        let cancelled = client
            .cancel_order(&OrderQuery::new("ethusdc", order_id))
            .await?;
        println!("Cancel: HTTP {} {}", cancelled.status, cancelled.body);
    }

    Ok(())
}
