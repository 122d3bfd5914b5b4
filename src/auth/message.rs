//! Personal-sign message construction for request authentication.
//!
//! Every authenticated request is signed over the canonical parameter string
//! wrapped in the EIP-191 "personal sign" envelope:
//!
//! ```text
//! keccak256("\x19Ethereum Signed Message:\n" + len(canonical) + canonical)
//! ```
//!
//! `len` is the decimal byte length of the canonical string.

use alloy_primitives::{B256, Signature, keccak256};

use crate::auth::HashSigner;
use crate::error::JojoError;

/// Prefix of every personal-sign message.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// A signature together with the hash it was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedMessage {
    /// The keccak-256 hash of the framed message
    pub hash: B256,
    /// Signature over `hash`
    pub signature: Signature,
}

/// Frame a canonical parameter string as a personal-sign message.
pub fn personal_message(canonical: &str) -> Vec<u8> {
    let length = canonical.len().to_string();
    let mut message =
        Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + length.len() + canonical.len());
    message.extend_from_slice(PERSONAL_MESSAGE_PREFIX.as_bytes());
    message.extend_from_slice(length.as_bytes());
    message.extend_from_slice(canonical.as_bytes());
    message
}

/// Hash of the personal-sign framing of `canonical`.
pub fn personal_message_hash(canonical: &str) -> B256 {
    keccak256(personal_message(canonical))
}

/// Sign a canonical parameter string for request authentication.
pub fn sign_params<S>(signer: &S, canonical: &str) -> Result<SignedMessage, JojoError>
where
    S: HashSigner + ?Sized,
{
    let hash = personal_message_hash(canonical);
    let signature = signer.sign(hash.as_slice())?;
    Ok(SignedMessage { hash, signature })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::key::tests::TEST_PRIVATE_KEY;
    use crate::auth::{KeyMaterial, recover_address};
    use alloy_primitives::eip191_hash_message;

    #[test]
    fn test_message_framing() {
        let message = personal_message("a=1");
        assert_eq!(message, b"\x19Ethereum Signed Message:\n3a=1".to_vec());
    }

    #[test]
    fn test_length_is_decimal_without_padding() {
        let canonical = "a".repeat(123);
        let message = personal_message(&canonical);
        let expected = format!("\x19Ethereum Signed Message:\n123{canonical}");
        assert_eq!(message, expected.into_bytes());
    }

    #[test]
    fn test_length_counts_bytes() {
        // Two characters, four bytes.
        let message = personal_message("éé");
        assert_eq!(message, "\x19Ethereum Signed Message:\n4éé".as_bytes().to_vec());
    }

    #[test]
    fn test_hash_matches_eip191() {
        let canonical = "account=0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266&timestamp=1700000000000";
        assert_eq!(personal_message_hash(canonical), eip191_hash_message(canonical));
    }

    #[test]
    fn test_hash_differs_from_raw_keccak() {
        let canonical = "a=1&timestamp=1700000000000";
        assert_ne!(personal_message_hash(canonical), keccak256(canonical));
    }

    #[test]
    fn test_sign_params_recovers_signer() {
        let key = KeyMaterial::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let signed = sign_params(&key, "a=1&b=2&timestamp=1700000000000").unwrap();

        assert_eq!(signed.hash, personal_message_hash("a=1&b=2&timestamp=1700000000000"));
        assert_eq!(recover_address(&signed.signature, &signed.hash).unwrap(), key.address());
        assert_eq!(
            signed
                .signature
                .recover_address_from_msg("a=1&b=2&timestamp=1700000000000")
                .unwrap(),
            key.address()
        );
    }
}
