//! Signature scheme flags and per-scheme dispatch.

use crate::ecdsa::{Secp256k1, Secp256r1};
use crate::ed25519::Ed25519;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signature schemes, identified on the wire by their one-byte flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureScheme {
    Ed25519 = 0x00,
    Secp256k1 = 0x01,
    Secp256r1 = 0x02,
    MultiSig = 0x03,
}

impl SignatureScheme {
    pub fn flag(&self) -> u8 {
        *self as u8
    }

    pub fn from_flag(flag: u8) -> Result<Self> {
        match flag {
            0x00 => Ok(SignatureScheme::Ed25519),
            0x01 => Ok(SignatureScheme::Secp256k1),
            0x02 => Ok(SignatureScheme::Secp256r1),
            0x03 => Ok(SignatureScheme::MultiSig),
            other => Err(Error::UnsupportedScheme(other)),
        }
    }

    /// Length of a raw public key for single-key schemes.
    pub fn public_key_length(&self) -> Result<usize> {
        match self {
            SignatureScheme::Ed25519 => Ok(Ed25519::PUBLIC_KEY_LENGTH),
            SignatureScheme::Secp256k1 => Ok(Secp256k1::PUBLIC_KEY_LENGTH),
            SignatureScheme::Secp256r1 => Ok(Secp256r1::PUBLIC_KEY_LENGTH),
            SignatureScheme::MultiSig => Err(Error::UnsupportedScheme(self.flag())),
        }
    }

    /// Length of a raw signature for single-key schemes.
    pub fn signature_length(&self) -> Result<usize> {
        match self {
            SignatureScheme::Ed25519 => Ok(Ed25519::SIGNATURE_LENGTH),
            SignatureScheme::Secp256k1 => Ok(Secp256k1::SIGNATURE_LENGTH),
            SignatureScheme::Secp256r1 => Ok(Secp256r1::SIGNATURE_LENGTH),
            SignatureScheme::MultiSig => Err(Error::UnsupportedScheme(self.flag())),
        }
    }

    pub fn generate_key_pair(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        match self {
            SignatureScheme::Ed25519 => Ok(Ed25519::generate_key_pair()),
            SignatureScheme::Secp256k1 => Ok(Secp256k1::generate_key_pair()),
            SignatureScheme::Secp256r1 => Ok(Secp256r1::generate_key_pair()),
            SignatureScheme::MultiSig => Err(Error::UnsupportedScheme(self.flag())),
        }
    }

    pub fn private_key_to_public_key(&self, private_key: &[u8]) -> Result<Vec<u8>> {
        match self {
            SignatureScheme::Ed25519 => Ed25519::private_key_to_public_key(private_key),
            SignatureScheme::Secp256k1 => Secp256k1::private_key_to_public_key(private_key),
            SignatureScheme::Secp256r1 => Secp256r1::private_key_to_public_key(private_key),
            SignatureScheme::MultiSig => Err(Error::UnsupportedScheme(self.flag())),
        }
    }

    pub fn sign(&self, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        match self {
            SignatureScheme::Ed25519 => Ed25519::sign(private_key, message),
            SignatureScheme::Secp256k1 => Secp256k1::sign(private_key, message),
            SignatureScheme::Secp256r1 => Secp256r1::sign(private_key, message),
            SignatureScheme::MultiSig => Err(Error::UnsupportedScheme(self.flag())),
        }
    }

    pub fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        match self {
            SignatureScheme::Ed25519 => Ed25519::verify(public_key, message, signature),
            SignatureScheme::Secp256k1 => Secp256k1::verify(public_key, message, signature),
            SignatureScheme::Secp256r1 => Secp256r1::verify(public_key, message, signature),
            SignatureScheme::MultiSig => false,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureScheme::Ed25519 => write!(f, "ed25519"),
            SignatureScheme::Secp256k1 => write!(f, "secp256k1"),
            SignatureScheme::Secp256r1 => write!(f, "secp256r1"),
            SignatureScheme::MultiSig => write!(f, "multisig"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_round_trip() {
        for scheme in [
            SignatureScheme::Ed25519,
            SignatureScheme::Secp256k1,
            SignatureScheme::Secp256r1,
            SignatureScheme::MultiSig,
        ] {
            assert_eq!(SignatureScheme::from_flag(scheme.flag()).unwrap(), scheme);
        }
        assert_eq!(
            SignatureScheme::from_flag(0x05),
            Err(Error::UnsupportedScheme(0x05))
        );
    }

    #[test]
    fn test_multisig_cannot_sign_directly() {
        assert!(SignatureScheme::MultiSig.sign(&[1u8; 32], b"x").is_err());
        assert!(SignatureScheme::MultiSig.public_key_length().is_err());
    }
}
