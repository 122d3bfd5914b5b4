//! Credential management for JOJO API authentication.

use secrecy::{ExposeSecret, SecretString};

use crate::error::JojoError;

/// Environment variable holding the hex-encoded account private key.
pub const PRIVATE_KEY_VAR: &str = "ACCOUNT_PRIVATE_KEY";

/// The account private key, held as a secret.
///
/// Nothing is read from the process environment unless one of the `from_env`
/// constructors is called explicitly.
#[derive(Clone)]
pub struct Credentials {
    private_key: SecretString,
}

impl Credentials {
    /// Create credentials from a hex-encoded private key.
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: SecretString::from(private_key.into()),
        }
    }

    /// Read the private key from `ACCOUNT_PRIVATE_KEY`.
    pub fn from_env() -> Result<Self, JojoError> {
        Self::from_env_var(PRIVATE_KEY_VAR)
    }

    /// Read the private key from a custom environment variable.
    pub fn from_env_var(key_var: &str) -> Result<Self, JojoError> {
        Self::try_from_env_var(key_var).ok_or_else(|| {
            JojoError::MissingConfig(format!("environment variable {key_var} not set"))
        })
    }

    /// Read the private key from `ACCOUNT_PRIVATE_KEY`.
    ///
    /// Returns `None` if the variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_var(PRIVATE_KEY_VAR)
    }

    /// Read the private key from a custom environment variable.
    ///
    /// Returns `None` if the variable is not set or empty.
    pub fn try_from_env_var(key_var: &str) -> Option<Self> {
        let private_key = std::env::var(key_var).ok()?;
        if private_key.trim().is_empty() {
            return None;
        }
        Some(Self::new(private_key))
    }

    /// Get the private key for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.private_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("0xsuper_secret");
        let debug_str = format!("{:?}", creds);
        assert!(!debug_str.contains("super_secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_expose_secret() {
        let creds = Credentials::new("0xabc");
        assert_eq!(creds.expose_secret(), "0xabc");
    }

    #[test]
    fn test_missing_env_var() {
        let var = "JOJO_TEST_PRIVATE_KEY_THAT_IS_NEVER_SET";
        assert!(Credentials::try_from_env_var(var).is_none());
        match Credentials::from_env_var(var) {
            Err(JojoError::MissingConfig(message)) => assert!(message.contains(var)),
            other => panic!("expected MissingConfig, got {other:?}"),
        }
    }
}
