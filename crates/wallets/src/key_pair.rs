//! Key pairs for every single-key signature scheme.

use crate::{WalletError, WalletResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ptb_core::Address;
use ptb_cryptography::{blake2b256_concat, SignatureScheme};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Derives the address of a single public key: `blake2b256(flag || public_key)`.
pub fn public_key_address(scheme: SignatureScheme, public_key: &[u8]) -> Address {
    Address::new(blake2b256_concat(&[&[scheme.flag()], public_key]))
}

/// A private key with its scheme and derived public key.
///
/// The private key is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    #[zeroize(skip)]
    scheme: SignatureScheme,
    private_key: Vec<u8>,
    public_key: Vec<u8>,
}

impl KeyPair {
    /// Generates a fresh key pair.
    pub fn generate(scheme: SignatureScheme) -> WalletResult<Self> {
        let (private_key, public_key) = scheme.generate_key_pair()?;
        Ok(Self {
            scheme,
            private_key,
            public_key,
        })
    }

    pub fn from_private_key(scheme: SignatureScheme, private_key: &[u8]) -> WalletResult<Self> {
        let public_key = scheme
            .private_key_to_public_key(private_key)
            .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self {
            scheme,
            private_key: private_key.to_vec(),
            public_key,
        })
    }

    /// Loads a key exported as base64 `flag || private_key`.
    ///
    /// The flag byte is stripped and selects the scheme.
    pub fn from_base64(encoded: &str) -> WalletResult<Self> {
        let mut bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| WalletError::Base64Decode(e.to_string()))?;
        let result = match bytes.split_first() {
            Some((&flag, private_key)) => {
                let scheme = SignatureScheme::from_flag(flag)?;
                if scheme == SignatureScheme::MultiSig {
                    Err(WalletError::InvalidPrivateKey(
                        "a multisig flag has no private key".to_string(),
                    ))
                } else {
                    Self::from_private_key(scheme, private_key)
                }
            }
            None => Err(WalletError::InvalidPrivateKey("empty key".to_string())),
        };
        bytes.zeroize();
        result
    }

    /// Exports as base64 `flag || private_key`.
    pub fn to_base64(&self) -> String {
        let mut bytes = Vec::with_capacity(1 + self.private_key.len());
        bytes.push(self.scheme.flag());
        bytes.extend_from_slice(&self.private_key);
        let encoded = STANDARD.encode(&bytes);
        bytes.zeroize();
        encoded
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    pub fn address(&self) -> Address {
        public_key_address(self.scheme, &self.public_key)
    }

    /// Signs raw bytes. Transactions go through [`crate::signer`] instead.
    pub fn sign(&self, message: &[u8]) -> WalletResult<Vec<u8>> {
        Ok(self.scheme.sign(&self.private_key, message)?)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("scheme", &self.scheme)
            .field("public_key", &hex::encode(&self.public_key))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.public_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip_strips_flag() {
        let key = KeyPair::generate(SignatureScheme::Ed25519).unwrap();
        let exported = key.to_base64();
        let raw = STANDARD.decode(&exported).unwrap();
        assert_eq!(raw[0], 0x00);
        assert_eq!(&raw[1..], key.private_key());

        let imported = KeyPair::from_base64(&exported).unwrap();
        assert_eq!(imported, key);
        assert_eq!(imported.address(), key.address());
    }

    #[test]
    fn test_base64_rejects_bad_input() {
        assert!(matches!(
            KeyPair::from_base64("not base64!"),
            Err(WalletError::Base64Decode(_))
        ));
        assert!(KeyPair::from_base64("").is_err());
        let multisig = STANDARD.encode([0x03u8; 33]);
        assert!(KeyPair::from_base64(&multisig).is_err());
        let unknown = STANDARD.encode([0x09u8; 33]);
        assert!(KeyPair::from_base64(&unknown).is_err());
    }

    #[test]
    fn test_debug_hides_private_key() {
        let key = KeyPair::from_private_key(SignatureScheme::Ed25519, &[7u8; 32]).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains(&hex::encode([7u8; 32])));
    }

    #[test]
    fn test_address_depends_on_scheme() {
        let pk = [2u8; 33];
        assert_ne!(
            public_key_address(SignatureScheme::Secp256k1, &pk),
            public_key_address(SignatureScheme::Secp256r1, &pk)
        );
    }
}
