//! Canonical parameter encoding.
//!
//! The server rebuilds the canonical string from the parameters it receives
//! and checks the signature against it, so the encoding here must be
//! byte-for-byte reproducible:
//!
//! ```text
//! payload + timestamp -> sort keys (byte order) -> form-encode -> k1=v1&k2=v2&...
//! ```

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::error::JojoError;

/// Parameter injected into every signed payload.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Parameter naming the account a request acts for.
pub const ACCOUNT_KEY: &str = "account";

/// Parameter appended after the canonical string; never part of a payload.
pub const SIGNATURE_KEY: &str = "signature";

/// Request parameters, keyed by wire name.
///
/// Keys are kept in byte order so iteration always yields the canonical
/// order, regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    params: BTreeMap<String, String>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a typed request into a payload.
    ///
    /// `request` must serialize to a flat object of scalars. `None` fields are
    /// skipped, numbers and booleans are rendered as text. Nested arrays or
    /// objects fail with [`JojoError::InvalidInput`].
    pub fn from_request<T>(request: &T) -> Result<Self, JojoError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(request)
            .map_err(|e| JojoError::InvalidInput(format!("request does not serialize: {e}")))?;

        let object = match value {
            Value::Object(object) => object,
            Value::Null => return Ok(Self::new()),
            other => {
                return Err(JojoError::InvalidInput(format!(
                    "request must serialize to an object, got {other}"
                )));
            }
        };

        let mut payload = Self::new();
        for (key, value) in object {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(JojoError::InvalidInput(format!(
                        "parameter {key} must be a scalar value"
                    )));
                }
            };
            payload.params.insert(key, text);
        }
        Ok(payload)
    }

    /// Set a parameter, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) -> Option<String> {
        self.params.insert(key.into(), value.to_string())
    }

    /// Builder-style [`Payload::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Whether a parameter is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Remove a parameter.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the payload has no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate parameters in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Payload
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Self::new();
        for (key, value) in iter {
            payload.insert(key, value);
        }
        payload
    }
}

/// Encode a payload into its canonical string.
///
/// `timestamp` is injected (overwriting any caller-supplied value), keys are
/// sorted by byte order and each pair is form-encoded and joined with `&`.
/// An empty payload yields `timestamp=<ms>`.
pub fn canonicalize(payload: &Payload, timestamp_ms: u64) -> Result<String, JojoError> {
    let mut params = payload.params.clone();
    params.insert(TIMESTAMP_KEY.to_string(), timestamp_ms.to_string());

    serde_urlencoded::to_string(&params)
        .map_err(|e| JojoError::InvalidInput(format!("payload is not form-encodable: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const TS: u64 = 1_700_000_000_000;

    #[test]
    fn test_empty_payload_yields_timestamp_only() {
        let canonical = canonicalize(&Payload::new(), TS).unwrap();
        assert_eq!(canonical, "timestamp=1700000000000");
    }

    #[test]
    fn test_keys_sorted_with_timestamp() {
        let payload = Payload::new().with("b", 2).with("a", 1);
        let canonical = canonicalize(&payload, TS).unwrap();
        assert_eq!(canonical, "a=1&b=2&timestamp=1700000000000");
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let first = Payload::new()
            .with("marketId", "ethusdc")
            .with("side", "BUY")
            .with("amount", "0.5");
        let second = Payload::new()
            .with("amount", "0.5")
            .with("marketId", "ethusdc")
            .with("side", "BUY");

        assert_eq!(
            canonicalize(&first, TS).unwrap(),
            canonicalize(&second, TS).unwrap()
        );
    }

    #[test]
    fn test_byte_order_not_locale_order() {
        let payload = Payload::new().with("marketId", "x").with("Zeta", "y").with("account", "z");
        let canonical = canonicalize(&payload, TS).unwrap();
        assert_eq!(canonical, "Zeta=y&account=z&marketId=x&timestamp=1700000000000");
    }

    #[test]
    fn test_caller_timestamp_overwritten() {
        let payload = Payload::new().with("timestamp", 1);
        let canonical = canonicalize(&payload, TS).unwrap();
        assert_eq!(canonical, "timestamp=1700000000000");
    }

    #[test]
    fn test_values_form_encoded() {
        let payload = Payload::new().with("note", "a&b=c d").with("path", "/v1/x");
        let canonical = canonicalize(&payload, TS).unwrap();
        assert_eq!(
            canonical,
            "note=a%26b%3Dc+d&path=%2Fv1%2Fx&timestamp=1700000000000"
        );
    }

    #[test]
    fn test_from_request_flattens_scalars() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Request {
            market_id: &'static str,
            amount: Decimal,
            limit: u32,
            reduce_only: bool,
            account: Option<String>,
        }

        let payload = Payload::from_request(&Request {
            market_id: "btcusdc",
            amount: "0.25".parse().unwrap(),
            limit: 500,
            reduce_only: false,
            account: None,
        })
        .unwrap();

        assert_eq!(payload.get("marketId"), Some("btcusdc"));
        assert_eq!(payload.get("amount"), Some("0.25"));
        assert_eq!(payload.get("limit"), Some("500"));
        assert_eq!(payload.get("reduceOnly"), Some("false"));
        assert!(!payload.contains_key("account"));
    }

    #[test]
    fn test_from_request_rejects_nested_values() {
        #[derive(Serialize)]
        struct Request {
            ids: Vec<u64>,
        }

        let err = Payload::from_request(&Request { ids: vec![1, 2] }).unwrap_err();
        assert!(matches!(err, JojoError::InvalidInput(_)));

        let err = Payload::from_request(&42u32).unwrap_err();
        assert!(matches!(err, JojoError::InvalidInput(_)));
    }

    #[test]
    fn test_from_iterator() {
        let payload: Payload = [("b", "2"), ("a", "1")].into_iter().collect();
        let keys: Vec<_> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
