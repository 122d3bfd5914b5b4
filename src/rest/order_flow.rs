//! Two-round order placement.
//!
//! JOJO orders are built by the exchange, not the client:
//!
//! 1. `POST /v1/order/build` with the order parameters. The exchange answers
//!    with an `orderHash`, the encoded `order.info` and a `gasFeeQuotation`.
//! 2. The client signs `orderHash` as-is (no personal-sign prefix) and posts
//!    the build parameters plus `info`, `gasFeeQuotation` and
//!    `orderSignature` to `POST /v1/order`.
//!
//! A build response without `orderHash` is the exchange's rejection of the
//! order and is handed back untouched. Each placement carries its own hash
//! from [`BuiltOrder`] to [`SignedOrder`]; nothing is shared between flows.

use alloy_primitives::B256;
use serde_json::Value;

use crate::auth::{HashSigner, Payload, signature_hex};
use crate::error::JojoError;
use crate::rest::authenticator::RequestAuthenticator;
use crate::rest::endpoints::private;
use crate::rest::requests::OrderRequest;
use crate::rest::transport::Transport;

/// Wire name of the attached order signature.
pub const ORDER_SIGNATURE_KEY: &str = "orderSignature";

/// Final result of [`OrderSigningFlow::place`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOrderOutcome {
    /// The build step returned no `orderHash`; this is its response verbatim.
    Rejected(Value),
    /// Response of the submission step, whether accepted or not.
    Submitted(Value),
}

impl PlaceOrderOutcome {
    /// Whether the order reached the submission step.
    pub fn is_submitted(&self) -> bool {
        matches!(self, PlaceOrderOutcome::Submitted(_))
    }

    /// The response body of whichever step ended the flow.
    pub fn response(&self) -> &Value {
        match self {
            PlaceOrderOutcome::Rejected(value) | PlaceOrderOutcome::Submitted(value) => value,
        }
    }
}

/// Result of the build step.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// The exchange built the order.
    Built(BuiltOrder),
    /// No `orderHash`; the build response verbatim.
    Rejected(Value),
}

/// An order the exchange has built but that is not yet signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltOrder {
    params: Payload,
    order_hash: B256,
    info: String,
    gas_fee_quotation: String,
}

impl BuiltOrder {
    /// Interpret a build response for the given order parameters.
    ///
    /// Returns `Ok(None)` when the response has no `orderHash`.
    pub fn from_build_response(
        params: Payload,
        response: &Value,
    ) -> Result<Option<Self>, JojoError> {
        let order_hash = match response.get("orderHash") {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(hash)) => parse_order_hash(hash)?,
            Some(other) => {
                return Err(JojoError::InvalidInput(format!(
                    "orderHash must be a hex string, got {other}"
                )));
            }
        };

        let info = response
            .get("order")
            .and_then(|order| order.get("info"))
            .map(scalar_text)
            .ok_or_else(|| {
                JojoError::MalformedResponse("order build response lacks order.info".to_string())
            })?;
        let gas_fee_quotation = response
            .get("gasFeeQuotation")
            .map(scalar_text)
            .ok_or_else(|| {
                JojoError::MalformedResponse(
                    "order build response lacks gasFeeQuotation".to_string(),
                )
            })?;

        Ok(Some(Self {
            params,
            order_hash,
            info,
            gas_fee_quotation,
        }))
    }

    /// The hash issued by the exchange for this order.
    pub fn order_hash(&self) -> B256 {
        self.order_hash
    }

    /// The encoded order info issued by the exchange.
    pub fn info(&self) -> &str {
        &self.info
    }

    /// The gas fee quotation issued by the exchange.
    pub fn gas_fee_quotation(&self) -> &str {
        &self.gas_fee_quotation
    }

    /// Sign the order hash directly and attach the build artifacts.
    pub fn sign<S>(self, signer: &S) -> Result<SignedOrder, JojoError>
    where
        S: HashSigner + ?Sized,
    {
        let signature = signer.sign(self.order_hash.as_slice())?;

        let mut payload = self.params;
        payload.insert("info", self.info);
        payload.insert("gasFeeQuotation", self.gas_fee_quotation);
        payload.insert(ORDER_SIGNATURE_KEY, signature_hex(&signature));

        Ok(SignedOrder {
            order_hash: self.order_hash,
            payload,
        })
    }
}

/// A signed order, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedOrder {
    order_hash: B256,
    payload: Payload,
}

impl SignedOrder {
    /// The hash that was signed.
    pub fn order_hash(&self) -> B256 {
        self.order_hash
    }

    /// The submission payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// Drives build, sign and submit for one order at a time.
pub struct OrderSigningFlow<'a, T> {
    authenticator: &'a RequestAuthenticator<T>,
}

impl<'a, T: Transport> OrderSigningFlow<'a, T> {
    /// Create a flow over an authenticator.
    pub fn new(authenticator: &'a RequestAuthenticator<T>) -> Self {
        Self { authenticator }
    }

    /// Ask the exchange to build the order.
    pub async fn build(&self, request: &OrderRequest) -> Result<BuildOutcome, JojoError> {
        let params = Payload::from_request(request)?;
        tracing::debug!(market = %request.market_id, "building order");

        let response = self
            .authenticator
            .post(private::ORDER_BUILD, params.clone())
            .await?;

        match BuiltOrder::from_build_response(params, &response)? {
            Some(order) => Ok(BuildOutcome::Built(order)),
            None => {
                tracing::warn!("order build rejected: {}", response);
                Ok(BuildOutcome::Rejected(response))
            }
        }
    }

    /// Submit a signed order.
    pub async fn submit(&self, order: SignedOrder) -> Result<Value, JojoError> {
        tracing::debug!(order_hash = %order.order_hash, "submitting signed order");
        self.authenticator.post(private::ORDER, order.payload).await
    }

    /// Build, sign and submit an order.
    pub async fn place(&self, request: &OrderRequest) -> Result<PlaceOrderOutcome, JojoError> {
        let built = match self.build(request).await? {
            BuildOutcome::Built(order) => order,
            BuildOutcome::Rejected(response) => return Ok(PlaceOrderOutcome::Rejected(response)),
        };

        let signed = built.sign(self.authenticator.signer())?;
        let response = self.submit(signed).await?;
        Ok(PlaceOrderOutcome::Submitted(response))
    }
}

fn parse_order_hash(hash: &str) -> Result<B256, JojoError> {
    let bytes = hex::decode(hash.trim_start_matches("0x"))
        .map_err(|e| JojoError::InvalidInput(format!("orderHash is not hex: {e}")))?;
    if bytes.len() != 32 {
        return Err(JojoError::InvalidInput(format!(
            "orderHash must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(B256::from_slice(&bytes))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
