//! HTTP transport capability.
//!
//! The authenticator never talks to reqwest directly; it hands fully built
//! requests to a [`Transport`]. The default [`HttpTransport`] is a reqwest
//! client with tracing middleware. No retry middleware is installed: network
//! failures surface to the caller unchanged.

use std::future::Future;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;

use crate::error::JojoError;

/// Content type sent with every request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// User agent sent when a configured one is not a valid header value.
pub const FALLBACK_USER_AGENT: &str = "jojo-api-client";

/// HTTP methods used by the JOJO API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method
    pub method: HttpMethod,
    /// Absolute URL, including any query string
    pub url: String,
    /// Form-encoded body, if any
    pub body: Option<String>,
}

/// An undecoded HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Whether the status code is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// The status code is not interpreted: an error status with a JSON body
    /// decodes like any other response.
    pub fn json(&self) -> Result<Value, JojoError> {
        serde_json::from_str(&self.body).map_err(|e| {
            JojoError::MalformedResponse(format!(
                "HTTP {}: expected JSON ({e}). Body: {}",
                self.status, self.body
            ))
        })
    }
}

/// Capability to send HTTP requests.
///
/// Implement this to route requests through a custom client, impose
/// timeouts, or record requests in tests.
pub trait Transport: Send + Sync {
    /// Send a request and return the undecoded response.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<RawResponse, JojoError>> + Send;
}

/// The default reqwest-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    http_client: ClientWithMiddleware,
}

impl HttpTransport {
    /// Create a transport that sends the given user agent and the form
    /// content type on every request.
    ///
    /// A user agent that is not a valid header value is replaced with
    /// [`FALLBACK_USER_AGENT`].
    pub fn new(user_agent: &str) -> Self {
        let mut headers = HeaderMap::new();
        let header_value = HeaderValue::from_str(user_agent).unwrap_or_else(|_| {
            tracing::warn!(
                user_agent,
                "invalid user agent, sending {FALLBACK_USER_AGENT} instead"
            );
            HeaderValue::from_static(FALLBACK_USER_AGENT)
        });
        headers.insert(USER_AGENT, header_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Self {
            http_client: client,
        }
    }

    /// Wrap an existing middleware client, e.g. one with a timeout configured.
    ///
    /// The caller is responsible for its default headers.
    pub fn from_client(http_client: ClientWithMiddleware) -> Self {
        Self { http_client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(&crate::rest::endpoints::default_user_agent())
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, JojoError> {
        let builder = match request.method {
            HttpMethod::Get => self.http_client.get(&request.url),
            HttpMethod::Post => self.http_client.post(&request.url),
            HttpMethod::Delete => self.http_client.delete(&request.url),
        };
        let builder = match request.body {
            Some(body) => builder.body(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
