//! Authentication module for the JOJO API.
//!
//! This module provides:
//! - Key custody with address derivation and raw hash signing
//! - Canonical, key-sorted form encoding of request parameters
//! - Personal-sign (EIP-191) message signing for authenticated requests
//! - A pluggable timestamp source

mod canonical;
mod clock;
mod credentials;
pub(crate) mod key;
mod message;

pub use canonical::{ACCOUNT_KEY, Payload, SIGNATURE_KEY, TIMESTAMP_KEY, canonicalize};
pub use clock::{FixedClock, SystemClock, TimestampProvider};
pub use credentials::{Credentials, PRIVATE_KEY_VAR};
pub use key::{HashSigner, KeyMaterial, recover_address, signature_hex};
pub use message::{
    PERSONAL_MESSAGE_PREFIX, SignedMessage, personal_message, personal_message_hash, sign_params,
};
