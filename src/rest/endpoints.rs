//! JOJO REST API endpoint constants.

/// Environment variable holding the API base URL.
///
/// JOJO runs separate deployments per chain, so there is no built-in default.
pub const BASE_URL_VAR: &str = "JOJO_API_BASE_URL";

/// The user agent sent when none is configured.
pub fn default_user_agent() -> String {
    format!("jojo-api-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Public endpoints (no signature, no account).
pub mod public {
    /// Server time.
    pub const TIME: &str = "/v1/time";

    /// Markets, assets and exchange limits.
    pub const EXCHANGE_INFO: &str = "/v1/exchangeInfo";

    /// Order book depth for a market.
    pub const ORDERBOOK: &str = "/v1/orderbook";
}

/// Authenticated endpoints (signed, account auto-filled).
pub mod private {
    /// Register (POST) or query (GET) the account.
    pub const ACCOUNT: &str = "/v1/account";

    /// Build an unsigned order and obtain its hash.
    pub const ORDER_BUILD: &str = "/v1/order/build";

    /// Submit (POST), query (GET) or cancel (DELETE) an order.
    pub const ORDER: &str = "/v1/order";

    /// A single open order.
    pub const OPEN_ORDER: &str = "/v1/openOrder";

    /// All open orders in a market.
    pub const OPEN_ORDERS: &str = "/v1/openOrders";

    /// Cancel every open order in a market.
    pub const ALL_OPEN_ORDERS: &str = "/v1/allOpenOrders";

    /// The account's own trades.
    pub const USER_TRADES: &str = "/v1/userTrades";

    /// Closed and cancelled orders.
    pub const HISTORY_ORDERS: &str = "/v1/historyOrders";

    /// Older public trades.
    pub const HISTORICAL_TRADES: &str = "/v1/historicalTrades";

    /// Realized PnL, funding and fee incomes.
    pub const INCOMES: &str = "/v1/incomes";

    /// Account balances.
    pub const BALANCES: &str = "/v1/balances";

    /// Open positions.
    pub const POSITIONS: &str = "/v1/positions";

    /// Recent public trades.
    pub const TRADES: &str = "/v1/trades";

    /// Candlesticks.
    pub const KLINES: &str = "/v1/klines";

    /// Off-chain mark price candlesticks with volume.
    pub const MARK_PRICE_KLINES: &str = "/v1/offchainMarkPriceWithVolKlines";

    /// Funding rate history.
    pub const FUNDING_RATE: &str = "/v1/fundingRate";

    /// Accounts close to liquidation.
    pub const RISKY_ACCOUNTS: &str = "/v1/riskyAccounts";
}
