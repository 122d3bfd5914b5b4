//! Typed request parameters for the JOJO REST API.
//!
//! Each struct fixes the parameter names an endpoint accepts. Fields left as
//! `None` are not sent. Any request with an `account` field acts for that
//! account instead of the signer's own address; whether the signer is
//! authorized to do so is checked by the exchange.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::common::{OrderType, Side, TimeInForce};

// Order Requests

/// Parameters to build (and place) an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Market identifier (e.g., "ethusdc")
    pub market_id: String,
    /// Order side
    pub side: Side,
    /// Order type
    pub order_type: OrderType,
    /// Order amount in base asset
    pub amount: Decimal,
    /// Limit price (required for limit orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Time in force
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Sub-account to trade for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl OrderRequest {
    /// Create a good-till-cancelled limit order request.
    pub fn limit(
        market_id: impl Into<String>,
        side: Side,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            market_id: market_id.into(),
            side,
            order_type: OrderType::Limit,
            amount,
            price: Some(price),
            time_in_force: Some(TimeInForce::Gtc),
            account: None,
        }
    }

    /// Create a market order request.
    pub fn market(market_id: impl Into<String>, side: Side, amount: Decimal) -> Self {
        Self {
            market_id: market_id.into(),
            side,
            order_type: OrderType::Market,
            amount,
            price: None,
            time_in_force: None,
            account: None,
        }
    }

    /// Set the time in force.
    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    /// Act for another account.
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }
}

/// Identifies a single order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    /// Market identifier
    pub market_id: String,
    /// Exchange order ID
    pub order_id: String,
    /// Sub-account owning the order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl OrderQuery {
    /// Create a new order query.
    pub fn new(market_id: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            market_id: market_id.into(),
            order_id: order_id.into(),
            account: None,
        }
    }

    /// Act for another account.
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }
}

// Query Requests

/// Market-scoped, time-windowed query used by the list endpoints
/// (open orders, trades, history, incomes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuery {
    /// Market identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_id: Option<String>,
    /// Start of the window in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    /// End of the window in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    /// Maximum number of rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Sub-account to query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl MarketQuery {
    /// Query a single market.
    pub fn market(market_id: impl Into<String>) -> Self {
        Self {
            market_id: Some(market_id.into()),
            ..Self::default()
        }
    }

    /// Restrict to a time window (milliseconds).
    pub fn window(mut self, start_time: u64, end_time: u64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    /// Limit the number of rows.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Act for another account.
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }
}

/// Account-only query (balances, positions, account info).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountQuery {
    /// Sub-account to query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl AccountQuery {
    /// Query for another account.
    pub fn for_account(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
        }
    }
}

/// Candlestick query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KlinesRequest {
    /// Market identifier
    pub market_id: String,
    /// Candle interval (e.g., "1M", "1H", "1D")
    pub interval: String,
    /// Start time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    /// End time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    /// Maximum number of candles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl KlinesRequest {
    /// Create a new klines request.
    pub fn new(market_id: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            market_id: market_id.into(),
            interval: interval.into(),
            start_time: None,
            end_time: None,
            limit: None,
        }
    }

    /// Limit the number of candles.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Funding rate history query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRateRequest {
    /// Market identifier
    pub market_id: String,
    /// Start time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    /// End time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    /// Maximum number of rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl FundingRateRequest {
    /// Create a new funding rate request.
    pub fn new(market_id: impl Into<String>) -> Self {
        Self {
            market_id: market_id.into(),
            start_time: None,
            end_time: None,
            limit: None,
        }
    }

    /// Limit the number of rows.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Order book depth query (public, unsigned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderbookRequest {
    /// Market identifier
    pub market_id: String,
    /// Number of levels per side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl OrderbookRequest {
    /// Create a new order book request.
    pub fn new(market_id: impl Into<String>) -> Self {
        Self {
            market_id: market_id.into(),
            limit: None,
        }
    }
}
