//! JOJO REST API client implementation.

use std::sync::Arc;

use alloy_primitives::Address;
use serde_json::Value;

use crate::auth::{
    Credentials, HashSigner, KeyMaterial, Payload, SystemClock, TimestampProvider,
};
use crate::error::JojoError;
use crate::rest::authenticator::{AuthenticatedResponse, RequestAuthenticator};
use crate::rest::endpoints::{BASE_URL_VAR, default_user_agent, private, public};
use crate::rest::order_flow::{BuildOutcome, OrderSigningFlow, PlaceOrderOutcome};
use crate::rest::requests::{
    AccountQuery, FundingRateRequest, KlinesRequest, MarketQuery, OrderQuery, OrderRequest,
    OrderbookRequest,
};
use crate::rest::transport::{HttpMethod, HttpRequest, HttpTransport, RawResponse, Transport};

/// The JOJO REST API client.
///
/// Every private call is signed with the account key; see
/// [`RequestAuthenticator`] for the exact wire format.
///
/// # Example
///
/// ```rust,no_run
/// use jojo_api_client::auth::Credentials;
/// use jojo_api_client::rest::JojoRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = JojoRestClient::builder()
///         .base_url("https://api.example.jojo")
///         .credentials(Credentials::new("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"))
///         .build()?;
///
///     let balances = client.get_balances(None).await?;
///     println!("Balances: {balances}");
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct JojoRestClient<T = HttpTransport> {
    authenticator: RequestAuthenticator<T>,
}

impl JojoRestClient<HttpTransport> {
    /// Create a new client builder.
    pub fn builder() -> JojoRestClientBuilder<HttpTransport> {
        JojoRestClientBuilder::new()
    }
}

impl<T: Transport> JojoRestClient<T> {
    /// Create a client over an existing authenticator.
    pub fn from_authenticator(authenticator: RequestAuthenticator<T>) -> Self {
        Self { authenticator }
    }

    /// The account address derived from the client's key.
    pub fn account(&self) -> Address {
        self.authenticator.account()
    }

    /// The authenticator used for signed calls.
    pub fn authenticator(&self) -> &RequestAuthenticator<T> {
        &self.authenticator
    }

    /// Make a signed call to any endpoint.
    ///
    /// GET and POST responses are decoded as JSON, DELETE responses are
    /// returned raw.
    pub async fn authenticated(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Payload,
    ) -> Result<AuthenticatedResponse, JojoError> {
        self.authenticator.request(method, path, payload).await
    }

    /// Make an unsigned GET request.
    async fn public_get(&self, endpoint: &str, query: Option<String>) -> Result<Value, JojoError> {
        let url = match query {
            Some(query) if !query.is_empty() => {
                format!("{}{}?{}", self.authenticator.base_url(), endpoint, query)
            }
            _ => format!("{}{}", self.authenticator.base_url(), endpoint),
        };
        let request = HttpRequest {
            method: HttpMethod::Get,
            url,
            body: None,
        };
        self.authenticator.transport().send(request).await?.json()
    }

    async fn signed_get<Q>(&self, endpoint: &str, query: &Q) -> Result<Value, JojoError>
    where
        Q: serde::Serialize + ?Sized,
    {
        self.authenticator
            .get(endpoint, Payload::from_request(query)?)
            .await
    }

    async fn signed_delete<Q>(&self, endpoint: &str, query: &Q) -> Result<RawResponse, JojoError>
    where
        Q: serde::Serialize + ?Sized,
    {
        self.authenticator
            .delete(endpoint, Payload::from_request(query)?)
            .await
    }

    // Public endpoints.

    /// Get the server time.
    pub async fn get_time(&self) -> Result<Value, JojoError> {
        self.public_get(public::TIME, None).await
    }

    /// Get markets, assets and exchange limits.
    pub async fn get_exchange_info(&self) -> Result<Value, JojoError> {
        self.public_get(public::EXCHANGE_INFO, None).await
    }

    /// Get order book depth for a market.
    pub async fn get_orderbook(&self, request: &OrderbookRequest) -> Result<Value, JojoError> {
        let query = serde_urlencoded::to_string(request)
            .map_err(|e| JojoError::InvalidInput(e.to_string()))?;
        self.public_get(public::ORDERBOOK, Some(query)).await
    }

    // Private endpoints: account.

    /// Register the account with the exchange.
    pub async fn register_account(&self, query: Option<&AccountQuery>) -> Result<Value, JojoError> {
        let payload = Payload::from_request(&query)?;
        self.authenticator.post(private::ACCOUNT, payload).await
    }

    /// Get account information.
    pub async fn get_account(&self, query: Option<&AccountQuery>) -> Result<Value, JojoError> {
        self.signed_get(private::ACCOUNT, &query).await
    }

    /// Get account balances.
    pub async fn get_balances(&self, query: Option<&AccountQuery>) -> Result<Value, JojoError> {
        self.signed_get(private::BALANCES, &query).await
    }

    /// Get open positions.
    pub async fn get_positions(&self, query: Option<&AccountQuery>) -> Result<Value, JojoError> {
        self.signed_get(private::POSITIONS, &query).await
    }

    /// Get realized PnL, funding and fee incomes.
    pub async fn get_incomes(&self, query: &MarketQuery) -> Result<Value, JojoError> {
        self.signed_get(private::INCOMES, query).await
    }

    // Private endpoints: trading.

    /// Ask the exchange to build an order without submitting it.
    pub async fn build_order(&self, request: &OrderRequest) -> Result<BuildOutcome, JojoError> {
        OrderSigningFlow::new(&self.authenticator).build(request).await
    }

    /// Build, sign and submit an order.
    ///
    /// If the exchange declines to build the order, its response is returned
    /// as [`PlaceOrderOutcome::Rejected`] and nothing is submitted.
    pub async fn place_order(
        &self,
        request: &OrderRequest,
    ) -> Result<PlaceOrderOutcome, JojoError> {
        OrderSigningFlow::new(&self.authenticator).place(request).await
    }

    /// Cancel an order.
    pub async fn cancel_order(&self, query: &OrderQuery) -> Result<RawResponse, JojoError> {
        self.signed_delete(private::ORDER, query).await
    }

    /// Cancel every open order in a market.
    pub async fn cancel_all_open_orders(
        &self,
        query: &MarketQuery,
    ) -> Result<RawResponse, JojoError> {
        self.signed_delete(private::ALL_OPEN_ORDERS, query).await
    }

    /// Get an order.
    pub async fn get_order(&self, query: &OrderQuery) -> Result<Value, JojoError> {
        self.signed_get(private::ORDER, query).await
    }

    /// Get an open order.
    pub async fn get_open_order(&self, query: &OrderQuery) -> Result<Value, JojoError> {
        self.signed_get(private::OPEN_ORDER, query).await
    }

    /// Get all open orders in a market.
    pub async fn get_open_orders(&self, query: &MarketQuery) -> Result<Value, JojoError> {
        self.signed_get(private::OPEN_ORDERS, query).await
    }

    /// Get closed and cancelled orders.
    pub async fn get_history_orders(&self, query: &MarketQuery) -> Result<Value, JojoError> {
        self.signed_get(private::HISTORY_ORDERS, query).await
    }

    /// Get the account's own trades.
    pub async fn get_user_trades(&self, query: &MarketQuery) -> Result<Value, JojoError> {
        self.signed_get(private::USER_TRADES, query).await
    }

    // Private endpoints: market data.

    /// Get recent trades.
    pub async fn get_trades(&self, query: &MarketQuery) -> Result<Value, JojoError> {
        self.signed_get(private::TRADES, query).await
    }

    /// Get older trades.
    pub async fn get_historical_trades(&self, query: &MarketQuery) -> Result<Value, JojoError> {
        self.signed_get(private::HISTORICAL_TRADES, query).await
    }

    /// Get candlesticks.
    pub async fn get_klines(&self, request: &KlinesRequest) -> Result<Value, JojoError> {
        self.signed_get(private::KLINES, request).await
    }

    /// Get off-chain mark price candlesticks with volume.
    pub async fn get_mark_price_klines(&self, request: &KlinesRequest) -> Result<Value, JojoError> {
        self.signed_get(private::MARK_PRICE_KLINES, request).await
    }

    /// Get funding rate history.
    pub async fn get_funding_rate(&self, request: &FundingRateRequest) -> Result<Value, JojoError> {
        self.signed_get(private::FUNDING_RATE, request).await
    }

    /// Get accounts close to liquidation.
    pub async fn get_risky_accounts(&self, query: &MarketQuery) -> Result<Value, JojoError> {
        self.signed_get(private::RISKY_ACCOUNTS, query).await
    }
}

impl<T> std::fmt::Debug for JojoRestClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JojoRestClient")
            .field("authenticator", &self.authenticator)
            .finish()
    }
}

/// Builder for [`JojoRestClient`].
pub struct JojoRestClientBuilder<T = HttpTransport> {
    base_url: Option<String>,
    credentials: Option<Credentials>,
    signer: Option<Arc<dyn HashSigner>>,
    timestamp_provider: Option<Arc<dyn TimestampProvider>>,
    transport: T,
}

impl JojoRestClientBuilder<HttpTransport> {
    /// Create a new builder with the default HTTP transport.
    pub fn new() -> Self {
        Self {
            base_url: None,
            credentials: None,
            signer: None,
            timestamp_provider: None,
            transport: HttpTransport::new(&default_user_agent()),
        }
    }

    /// Read the base URL from `JOJO_API_BASE_URL` and the key from
    /// `ACCOUNT_PRIVATE_KEY`.
    pub fn from_env() -> Result<Self, JojoError> {
        let base_url = std::env::var(BASE_URL_VAR).map_err(|_| {
            JojoError::MissingConfig(format!("environment variable {BASE_URL_VAR} not set"))
        })?;
        Ok(Self::new()
            .base_url(base_url)
            .credentials(Credentials::from_env()?))
    }

    /// Set a custom user agent.
    ///
    /// A value that is not a valid HTTP header (e.g. one containing a
    /// newline) is replaced with
    /// [`FALLBACK_USER_AGENT`](crate::rest::FALLBACK_USER_AGENT) and logged as a
    /// warning.
    pub fn user_agent(mut self, user_agent: impl AsRef<str>) -> Self {
        self.transport = HttpTransport::new(user_agent.as_ref());
        self
    }
}

impl<T: Transport> JojoRestClientBuilder<T> {
    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the account private key.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sign with a custom signer instead of a local key.
    ///
    /// Takes precedence over [`credentials`](Self::credentials).
    pub fn signer(mut self, signer: Arc<dyn HashSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Set a custom timestamp source.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamp_provider = Some(provider);
        self
    }

    /// Send requests through a custom transport.
    pub fn transport<U: Transport>(self, transport: U) -> JojoRestClientBuilder<U> {
        JojoRestClientBuilder {
            base_url: self.base_url,
            credentials: self.credentials,
            signer: self.signer,
            timestamp_provider: self.timestamp_provider,
            transport,
        }
    }

    /// Build the client.
    ///
    /// Fails if the base URL is missing or invalid, or if no usable key was
    /// supplied.
    pub fn build(self) -> Result<JojoRestClient<T>, JojoError> {
        let base_url = self
            .base_url
            .ok_or_else(|| JojoError::MissingConfig("base URL not set".to_string()))?;
        url::Url::parse(&base_url)?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let signer: Arc<dyn HashSigner> = match (self.signer, self.credentials) {
            (Some(signer), _) => signer,
            (None, Some(credentials)) => Arc::new(KeyMaterial::from_credentials(&credentials)?),
            (None, None) => {
                return Err(JojoError::MissingConfig("credentials not set".to_string()));
            }
        };

        let clock = self
            .timestamp_provider
            .unwrap_or_else(|| Arc::new(SystemClock::new()));

        let authenticator = RequestAuthenticator::new(self.transport, signer, clock, base_url);
        Ok(JojoRestClient { authenticator })
    }
}

impl Default for JojoRestClientBuilder<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::FixedClock;
    use crate::auth::key::tests::{TEST_ADDRESS, TEST_PRIVATE_KEY};
    use crate::rest::testing::RecordingTransport;

    fn client(transport: RecordingTransport) -> JojoRestClient<RecordingTransport> {
        JojoRestClient::builder()
            .base_url("https://api.test/")
            .credentials(Credentials::new(TEST_PRIVATE_KEY))
            .timestamp_provider(Arc::new(FixedClock(1_700_000_000_000)))
            .transport(transport)
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_requires_base_url() {
        let err = JojoRestClient::builder()
            .credentials(Credentials::new(TEST_PRIVATE_KEY))
            .build()
            .unwrap_err();
        assert!(matches!(err, JojoError::MissingConfig(_)));
    }

    #[test]
    fn test_build_rejects_bad_url() {
        let err = JojoRestClient::builder()
            .base_url("not a url")
            .credentials(Credentials::new(TEST_PRIVATE_KEY))
            .build()
            .unwrap_err();
        assert!(matches!(err, JojoError::Url(_)));
    }

    #[test]
    fn test_build_rejects_bad_key() {
        let err = JojoRestClient::builder()
            .base_url("https://api.test")
            .credentials(Credentials::new("0x1234"))
            .build()
            .unwrap_err();
        assert!(matches!(err, JojoError::InvalidKey(_)));
    }

    #[test]
    fn test_build_requires_credentials() {
        let err = JojoRestClient::builder()
            .base_url("https://api.test")
            .build()
            .unwrap_err();
        assert!(matches!(err, JojoError::MissingConfig(_)));
    }

    #[test]
    fn test_account_and_debug() {
        let client = client(RecordingTransport::new());
        assert_eq!(client.account().to_checksum(None), TEST_ADDRESS);

        let debug_str = format!("{client:?}");
        assert!(debug_str.contains("https://api.test"));
        assert!(!debug_str.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
    }

    #[tokio::test]
    async fn test_public_get_is_unsigned() {
        let transport = RecordingTransport::new().respond(200, r#"{"bids":[],"asks":[]}"#);
        let client = client(transport.clone());

        let mut request = OrderbookRequest::new("btcusdc");
        request.limit = Some(10);
        client.get_orderbook(&request).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].url, "https://api.test/v1/orderbook?marketId=btcusdc&limit=10");
        assert!(sent[0].body.is_none());
    }

    #[tokio::test]
    async fn test_time_has_no_query() {
        let transport = RecordingTransport::new().respond(200, r#"{"serverTime":1700000000000}"#);
        let client = client(transport.clone());

        let time = client.get_time().await.unwrap();
        assert_eq!(time["serverTime"], 1_700_000_000_000u64);
        assert_eq!(transport.requests()[0].url, "https://api.test/v1/time");
    }

    #[tokio::test]
    async fn test_sub_account_query() {
        let sub_account = "0x73B14CD04Ef491407C9667D1e02d985cCeAB8270";
        let transport = RecordingTransport::new().respond(200, "[]");
        let client = client(transport.clone());

        client
            .get_positions(Some(&AccountQuery::for_account(sub_account)))
            .await
            .unwrap();

        let body = transport.requests()[0].body.clone().unwrap();
        assert!(body.starts_with(&format!("account={sub_account}&timestamp=")));
    }

    #[tokio::test]
    async fn test_cancel_all_returns_raw() {
        let transport = RecordingTransport::new().respond(204, "");
        let client = client(transport.clone());

        let response = client
            .cancel_all_open_orders(&MarketQuery::market("ethusdc"))
            .await
            .unwrap();
        assert_eq!(response.status, 204);
        assert!(response.body.is_empty());

        let sent = transport.requests();
        assert_eq!(sent[0].method, HttpMethod::Delete);
        assert!(sent[0].url.starts_with("https://api.test/v1/allOpenOrders?account="));
    }
}
