//! # JOJO Client
//!
//! An async Rust client for the JOJO decentralized derivatives exchange REST API.
//!
//! JOJO authenticates requests with an Ethereum signature instead of an API
//! key: every private call carries the caller's `account`, a millisecond
//! `timestamp` and a personal-sign signature over the key-sorted,
//! form-encoded parameters.
//!
//! ## Features
//!
//! - Deterministic canonical encoding and EIP-191 request signing
//! - Two-round order placement (exchange-built order, client-signed hash)
//! - Sub-account support through an explicit `account` parameter
//! - Pluggable transport, signer and clock for offline testing
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jojo_api_client::rest::{JojoRestClientBuilder, OrderRequest, PlaceOrderOutcome};
//! use jojo_api_client::Side;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads JOJO_API_BASE_URL and ACCOUNT_PRIVATE_KEY.
//!     let client = JojoRestClientBuilder::from_env()?.build()?;
//!
//!     let order = OrderRequest::limit("ethusdc", Side::Buy, "0.5".parse()?, Decimal::from(1800));
//!     match client.place_order(&order).await? {
//!         PlaceOrderOutcome::Submitted(response) => println!("Placed: {response}"),
//!         PlaceOrderOutcome::Rejected(response) => println!("Rejected: {response}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::JojoError;
pub use types::common::{OrderType, Side, TimeInForce};

/// Result type alias using JojoError
pub type Result<T> = std::result::Result<T, JojoError>;
