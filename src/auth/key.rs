//! Private key custody and raw hash signing.

use std::str::FromStr;

use alloy_primitives::{Address, B256, Signature};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

use crate::auth::Credentials;
use crate::error::JojoError;

/// Capability to sign 32-byte hashes on behalf of an account.
///
/// [`KeyMaterial`] is the production implementation. The request pipeline
/// only depends on this trait, so signing can be exercised without a network
/// and replaced by a remote signer.
pub trait HashSigner: Send + Sync {
    /// The account address derived from the signing key.
    fn address(&self) -> Address;

    /// Sign a prehashed 32-byte message.
    ///
    /// Fails with [`JojoError::InvalidInput`] if `hash` is not exactly 32 bytes.
    fn sign(&self, hash: &[u8]) -> Result<Signature, JojoError>;
}

/// A secp256k1 private key and the address derived from it.
///
/// Loaded once at client construction and never mutated afterwards, so it can
/// be shared across tasks behind an `Arc`.
#[derive(Clone)]
pub struct KeyMaterial {
    signer: PrivateKeySigner,
    address: Address,
}

impl KeyMaterial {
    /// Create key material from a hex-encoded private key.
    ///
    /// The key must be 64 hex characters, optionally prefixed with `0x`.
    pub fn from_private_key(key: &str) -> Result<Self, JojoError> {
        let key_clean = key.trim().trim_start_matches("0x");

        let signer = PrivateKeySigner::from_str(key_clean)
            .map_err(|e| JojoError::InvalidKey(format!("expected 64 hex characters: {e}")))?;
        let address = signer.address();

        Ok(Self { signer, address })
    }

    /// Create key material from stored credentials.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self, JojoError> {
        Self::from_private_key(credentials.expose_secret())
    }

    /// The derived account address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The derived account address as an EIP-55 checksummed string.
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }

    /// Sign a 32-byte hash directly, without any message prefix.
    pub fn sign_hash(&self, hash: &B256) -> Result<Signature, JojoError> {
        self.signer
            .sign_hash_sync(hash)
            .map_err(|e| JojoError::InvalidInput(format!("failed to sign hash: {e}")))
    }
}

impl HashSigner for KeyMaterial {
    fn address(&self) -> Address {
        self.address
    }

    fn sign(&self, hash: &[u8]) -> Result<Signature, JojoError> {
        if hash.len() != 32 {
            return Err(JojoError::InvalidInput(format!(
                "hash must be 32 bytes, got {}",
                hash.len()
            )));
        }
        self.sign_hash(&B256::from_slice(hash))
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("address", &self.address_string())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Recover the address that produced `signature` over `hash`.
pub fn recover_address(signature: &Signature, hash: &B256) -> Result<Address, JojoError> {
    signature
        .recover_address_from_prehash(hash)
        .map_err(|e| JojoError::InvalidInput(format!("signature does not recover: {e}")))
}

/// Wire encoding of a signature: lowercase hex of the 65 raw bytes, no `0x`.
pub fn signature_hex(signature: &Signature) -> String {
    hex::encode(signature.as_bytes())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    // Well-known development key; never holds funds.
    pub(crate) const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    pub(crate) const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_address_derivation() {
        let key = KeyMaterial::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(key.address_string(), TEST_ADDRESS);

        let bare =
            KeyMaterial::from_private_key(TEST_PRIVATE_KEY.trim_start_matches("0x")).unwrap();
        assert_eq!(bare.address(), key.address());
    }

    #[test]
    fn test_malformed_key_rejected() {
        for bad in [
            "",
            "0x1234",
            "not-a-valid-key",
            "zz0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ] {
            match KeyMaterial::from_private_key(bad) {
                Err(JojoError::InvalidKey(_)) => {}
                other => panic!("expected InvalidKey for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_signature_recovers_signer() {
        let key = KeyMaterial::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let hash = keccak256(b"marketId=ethusdc&timestamp=1700000000000");

        let first = key.sign(hash.as_slice()).unwrap();
        let second = key.sign(hash.as_slice()).unwrap();

        assert_eq!(recover_address(&first, &hash).unwrap(), key.address());
        assert_eq!(recover_address(&second, &hash).unwrap(), key.address());
    }

    #[test]
    fn test_wrong_hash_length_rejected() {
        let key = KeyMaterial::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let err = key.sign(&[0u8; 31]).unwrap_err();
        assert!(matches!(err, JojoError::InvalidInput(_)));
        let err = key.sign(&[0u8; 33]).unwrap_err();
        assert!(matches!(err, JojoError::InvalidInput(_)));
    }

    #[test]
    fn test_signature_hex_encoding() {
        let key = KeyMaterial::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let signature = key.sign(keccak256(b"hello").as_slice()).unwrap();
        let encoded = signature_hex(&signature);

        assert_eq!(encoded.len(), 130);
        assert!(!encoded.starts_with("0x"));
        assert_eq!(encoded, encoded.to_lowercase());
    }

    #[test]
    fn test_debug_does_not_expose_key() {
        let key = KeyMaterial::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let debug_str = format!("{key:?}");
        assert!(debug_str.contains(TEST_ADDRESS));
        assert!(!debug_str.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
    }
}
