//! Example: account queries with signed requests.
//!
//! Run with: cargo run --example account
//!
//! Set `JOJO_SUB_ACCOUNT` to query an account you are authorized to act for.

use std::env;

use jojo_api_client::rest::{AccountQuery, JojoRestClientBuilder, MarketQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let builder = match JojoRestClientBuilder::from_env() {
        Ok(builder) => builder,
        Err(e) => {
            println!("Set JOJO_API_BASE_URL and ACCOUNT_PRIVATE_KEY to run this example ({e}).");
            return Ok(());
        }
    };
    let client = builder.build()?;
    println!("Signing as {}", client.account());

    let query = env::var("JOJO_SUB_ACCOUNT").ok().map(AccountQuery::for_account);

    println!("=== Server Time ===");
    println!("{}", client.get_time().await?);

    println!("\n=== Account ===");
    println!("{}", client.get_account(query.as_ref()).await?);

    println!("\n=== Balances ===");
    println!("{}", client.get_balances(query.as_ref()).await?);

    println!("\n=== Positions ===");
    println!("{}", client.get_positions(query.as_ref()).await?);

    println!("\n=== Open Orders ===");
    let mut orders = MarketQuery::market("ethusdc");
    orders.account = query.and_then(|q| q.account);
    println!("{}", client.get_open_orders(&orders).await?);

    Ok(())
}
