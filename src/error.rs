//! Error types for the JOJO client library.

use thiserror::Error;

/// The main error type for all JOJO client operations.
///
/// A build-order rejection is deliberately absent here: the exchange answers
/// a bad order with a JSON body that still carries diagnostics, so it is
/// returned as [`PlaceOrderOutcome::Rejected`](crate::rest::PlaceOrderOutcome::Rejected).
#[derive(Error, Debug)]
pub enum JojoError {
    /// The private signing key could not be parsed
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// A hash, payload value or request could not be encoded for signing
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The response body was not the JSON shape the call expected
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A required configuration value is missing
    #[error("Missing configuration: {0}")]
    MissingConfig(String),
}

impl JojoError {
    /// Whether this error came from the network layer rather than from
    /// signing or decoding.
    pub fn is_transport(&self) -> bool {
        matches!(self, JojoError::Http(_) | JojoError::HttpMiddleware(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = JojoError::InvalidInput("hash must be 32 bytes, got 31".to_string());
        assert_eq!(error.to_string(), "Invalid input: hash must be 32 bytes, got 31");

        let error = JojoError::MalformedResponse("expected JSON".to_string());
        assert_eq!(error.to_string(), "Malformed response: expected JSON");
    }

    #[test]
    fn test_url_error_is_not_transport() {
        let error = JojoError::from(url::Url::parse("not a url").unwrap_err());
        assert!(!error.is_transport());
        assert!(error.to_string().starts_with("URL parsing error"));
    }
}
