//! PTB Wallets Library
//!
//! This crate provides the signing side of the transaction pipeline:
//! - Key pairs for Ed25519, secp256k1 and secp256r1, with base64 import/export
//! - Intent signing of canonical transaction bytes
//! - Single-key signature envelopes
//! - Weighted multisig key sets, addresses and signature aggregation

pub mod envelope;
pub mod generic_signature;
pub mod key_pair;
pub mod multisig;
pub mod signer;

// Re-export main types
pub use envelope::SignatureEnvelope;
pub use generic_signature::GenericSignature;
pub use key_pair::{public_key_address, KeyPair};
pub use multisig::{AggregatedSignature, MultiSigPublicKey, WeightedPublicKey};
pub use signer::{sign, sign_transaction, TransactionSigner};

use thiserror::Error;

/// Result type for wallet operations
pub type WalletResult<T> = std::result::Result<T, WalletError>;

/// Wallet-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Base64 decode error: {0}")]
    Base64Decode(String),

    #[error("Invalid signature envelope: {0}")]
    InvalidEnvelope(String),

    #[error("Invalid signature from {0}")]
    InvalidSignature(String),

    #[error("Invalid multisig key set: {0}")]
    InvalidKeySet(String),

    #[error("Public key {0} is not part of the multisig key set")]
    UnknownKey(String),

    #[error("Key {0} signed more than once")]
    DuplicateSignature(String),

    #[error("Signature weight {weight} is below threshold {threshold}")]
    ThresholdNotMet { weight: u32, threshold: u16 },

    #[error("Cryptography error: {0}")]
    Cryptography(#[from] ptb_cryptography::Error),

    #[error("Malformed signature bytes: {0}")]
    Io(#[from] ptb_io::IoError),
}
