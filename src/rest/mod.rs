//! JOJO REST API client.
//!
//! The pieces compose leaf-first:
//! - [`Transport`]: sends fully built HTTP requests ([`HttpTransport`] by default)
//! - [`RequestAuthenticator`]: account auto-fill, canonicalization, signing, dispatch
//! - [`OrderSigningFlow`]: build, sign the order hash, submit
//! - [`JojoRestClient`]: one typed method per endpoint

mod authenticator;
mod client;
mod endpoints;
mod order_flow;
mod requests;
#[cfg(test)]
mod testing;
mod transport;

pub use authenticator::{AuthenticatedRequest, AuthenticatedResponse, RequestAuthenticator};
pub use client::{JojoRestClient, JojoRestClientBuilder};
pub use endpoints::*;
pub use order_flow::{
    BuildOutcome, BuiltOrder, ORDER_SIGNATURE_KEY, OrderSigningFlow, PlaceOrderOutcome,
    SignedOrder,
};
pub use requests::*;
pub use transport::{
    FALLBACK_USER_AGENT, FORM_CONTENT_TYPE, HttpMethod, HttpRequest, HttpTransport, RawResponse,
    Transport,
};
