//! Signed request construction and dispatch.
//!
//! Every authenticated call goes through the same pipeline:
//!
//! ```text
//! payload -> account auto-fill -> canonicalize(+timestamp) -> personal-sign
//!         -> canonical + "&signature=<hex>" -> transport
//! ```
//!
//! GET and POST carry the signed string as a form body and decode the reply
//! as JSON. DELETE carries it in the query string and hands back the raw
//! response, since JOJO's delete endpoints only read query parameters.

use std::sync::Arc;

use alloy_primitives::{Address, Signature};
use serde_json::Value;

use crate::auth::{
    ACCOUNT_KEY, HashSigner, Payload, SIGNATURE_KEY, TimestampProvider, canonicalize, sign_params,
    signature_hex,
};
use crate::error::JojoError;
use crate::rest::transport::{HttpMethod, HttpRequest, RawResponse, Transport};

/// A signed request, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedRequest {
    /// Request method
    pub method: HttpMethod,
    /// Endpoint path (e.g., "/v1/account")
    pub path: String,
    /// Canonical parameter string that was signed
    pub canonical: String,
    /// Signature over the personal-sign framing of `canonical`
    pub signature: Signature,
}

impl AuthenticatedRequest {
    /// The canonical string with the signature appended.
    pub fn signed_params(&self) -> String {
        format!(
            "{}&{}={}",
            self.canonical,
            SIGNATURE_KEY,
            signature_hex(&self.signature)
        )
    }

    /// Lay the signed parameters out for the wire.
    pub fn to_http_request(&self, base_url: &str) -> HttpRequest {
        let url = format!("{}{}", base_url, self.path);
        let params = self.signed_params();
        match self.method {
            HttpMethod::Delete => HttpRequest {
                method: self.method,
                url: format!("{url}?{params}"),
                body: None,
            },
            HttpMethod::Get | HttpMethod::Post => HttpRequest {
                method: self.method,
                url,
                body: Some(params),
            },
        }
    }
}

/// Response of an authenticated call made through
/// [`RequestAuthenticator::request`].
#[derive(Debug, Clone, PartialEq)]
pub enum AuthenticatedResponse {
    /// Decoded body of a GET or POST
    Json(Value),
    /// Undecoded DELETE response
    Raw(RawResponse),
}

/// Signs payloads with the client's key and sends them over a [`Transport`].
#[derive(Clone)]
pub struct RequestAuthenticator<T> {
    transport: T,
    signer: Arc<dyn HashSigner>,
    clock: Arc<dyn TimestampProvider>,
    base_url: String,
}

impl<T: Transport> RequestAuthenticator<T> {
    /// Create a new authenticator.
    ///
    /// `base_url` is prepended verbatim to every endpoint path.
    pub fn new(
        transport: T,
        signer: Arc<dyn HashSigner>,
        clock: Arc<dyn TimestampProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            signer,
            clock,
            base_url: base_url.into(),
        }
    }

    /// The signer's own account address.
    pub fn account(&self) -> Address {
        self.signer.address()
    }

    /// The API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The signing capability.
    pub fn signer(&self) -> &dyn HashSigner {
        self.signer.as_ref()
    }

    /// Fill in the account, canonicalize and sign a payload.
    ///
    /// An explicit `account` is left as given; otherwise the signer's own
    /// checksummed address is used. A payload that already carries a
    /// `signature` is rejected with [`JojoError::InvalidInput`].
    pub fn prepare(
        &self,
        method: HttpMethod,
        path: &str,
        mut payload: Payload,
    ) -> Result<AuthenticatedRequest, JojoError> {
        if payload.contains_key(SIGNATURE_KEY) {
            return Err(JojoError::InvalidInput(format!(
                "`{SIGNATURE_KEY}` is reserved and cannot be part of a signed payload"
            )));
        }
        if !payload.contains_key(ACCOUNT_KEY) {
            payload.insert(ACCOUNT_KEY, self.signer.address().to_checksum(None));
        }

        let canonical = canonicalize(&payload, self.clock.now_millis())?;
        let signed = sign_params(self.signer.as_ref(), &canonical)?;

        Ok(AuthenticatedRequest {
            method,
            path: path.to_string(),
            canonical,
            signature: signed.signature,
        })
    }

    /// Send a prepared request.
    pub async fn dispatch(&self, request: &AuthenticatedRequest) -> Result<RawResponse, JojoError> {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            "dispatching authenticated request"
        );
        self.transport
            .send(request.to_http_request(&self.base_url))
            .await
    }

    /// Sign and send a request, decoding according to the method.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Payload,
    ) -> Result<AuthenticatedResponse, JojoError> {
        let request = self.prepare(method, path, payload)?;
        let response = self.dispatch(&request).await?;
        match method {
            HttpMethod::Delete => Ok(AuthenticatedResponse::Raw(response)),
            HttpMethod::Get | HttpMethod::Post => Ok(AuthenticatedResponse::Json(response.json()?)),
        }
    }

    /// Signed GET, decoded as JSON.
    pub async fn get(&self, path: &str, payload: Payload) -> Result<Value, JojoError> {
        let request = self.prepare(HttpMethod::Get, path, payload)?;
        self.dispatch(&request).await?.json()
    }

    /// Signed POST, decoded as JSON.
    pub async fn post(&self, path: &str, payload: Payload) -> Result<Value, JojoError> {
        let request = self.prepare(HttpMethod::Post, path, payload)?;
        self.dispatch(&request).await?.json()
    }

    /// Signed DELETE, returned undecoded.
    pub async fn delete(&self, path: &str, payload: Payload) -> Result<RawResponse, JojoError> {
        let request = self.prepare(HttpMethod::Delete, path, payload)?;
        self.dispatch(&request).await
    }
}

impl<T> std::fmt::Debug for RequestAuthenticator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAuthenticator")
            .field("base_url", &self.base_url)
            .field("account", &self.signer.address())
            .finish()
    }
}
