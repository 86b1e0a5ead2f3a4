//! PTB Cryptography
//!
//! Hashing, signature schemes and intent framing used to sign programmable
//! transactions:
//! - BLAKE2b-256 digests and SHA-256
//! - Ed25519, secp256k1 and secp256r1 signatures (all deterministic)
//! - The three byte intent prefix that domain-separates signed payloads

pub mod ecdsa;
pub mod ed25519;
pub mod hash;
pub mod intent;
pub mod scheme;

pub use ecdsa::{Secp256k1, Secp256r1};
pub use ed25519::Ed25519;
pub use hash::{blake2b256, blake2b256_concat, sha256};
pub use intent::{AppId, Intent, IntentScope, IntentVersion};
pub use scheme::SignatureScheme;

use thiserror::Error;

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Cryptography-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Unsupported signature scheme flag: {0:#04x}")]
    UnsupportedScheme(u8),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Invalid intent: {0}")]
    InvalidIntent(String),
}
