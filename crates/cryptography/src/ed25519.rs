//! Ed25519 implementation.
//!
//! This module provides Ed25519 signature functionality.

use crate::{Error, Result};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

/// Provides Ed25519 signature functionality.
pub struct Ed25519;

impl Ed25519 {
    pub const PRIVATE_KEY_LENGTH: usize = 32;
    pub const PUBLIC_KEY_LENGTH: usize = 32;
    pub const SIGNATURE_LENGTH: usize = 64;

    /// Generates a new Ed25519 key pair.
    ///
    /// # Returns
    ///
    /// A tuple containing the private key and public key
    pub fn generate_key_pair() -> (Vec<u8>, Vec<u8>) {
        let signing_key = SigningKey::generate(&mut OsRng);

        (
            signing_key.to_bytes().to_vec(),
            signing_key.verifying_key().to_bytes().to_vec(),
        )
    }

    fn signing_key(private_key: &[u8]) -> Result<SigningKey> {
        let bytes: [u8; 32] = private_key
            .try_into()
            .map_err(|_| Error::InvalidKey("Invalid private key length".to_string()))?;
        Ok(SigningKey::from_bytes(&bytes))
    }

    /// Derives a public key from a private key.
    ///
    /// # Arguments
    ///
    /// * `private_key` - The private key
    ///
    /// # Returns
    ///
    /// The derived public key or an error
    pub fn private_key_to_public_key(private_key: &[u8]) -> Result<Vec<u8>> {
        let signing_key = Self::signing_key(private_key)?;
        Ok(signing_key.verifying_key().to_bytes().to_vec())
    }

    /// Signs a message using Ed25519.
    ///
    /// # Arguments
    ///
    /// * `private_key` - The private key to sign with
    /// * `message` - The message to sign
    ///
    /// # Returns
    ///
    /// The signature or an error
    pub fn sign(private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        let signing_key = Self::signing_key(private_key)?;
        let signature: Signature = signing_key.sign(message);
        Ok(signature.to_bytes().to_vec())
    }

    /// Verifies an Ed25519 signature.
    ///
    /// # Returns
    ///
    /// `true` if the signature is valid, `false` otherwise
    pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        let Ok(public_key) = <[u8; 32]>::try_from(public_key) else {
            return false;
        };
        let Ok(signature) = <[u8; 64]>::try_from(signature) else {
            return false;
        };

        let public_key = match VerifyingKey::from_bytes(&public_key) {
            Ok(pk) => pk,
            Err(_) => return false,
        };

        let signature = Signature::from_bytes(&signature);
        public_key.verify(message, &signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc8032_test_vector_1() {
        let private_key =
            hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60")
                .unwrap();
        let public_key = Ed25519::private_key_to_public_key(&private_key).unwrap();
        assert_eq!(
            hex::encode(&public_key),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );

        let signature = Ed25519::sign(&private_key, b"").unwrap();
        assert_eq!(
            hex::encode(&signature),
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );
        assert!(Ed25519::verify(&public_key, b"", &signature));
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert!(Ed25519::sign(&[0u8; 31], b"msg").is_err());
        assert!(!Ed25519::verify(&[0u8; 32], b"msg", &[0u8; 63]));
    }

    #[test]
    fn test_generated_pair_signs_and_verifies() {
        let (private_key, public_key) = Ed25519::generate_key_pair();
        let signature = Ed25519::sign(&private_key, b"ptb").unwrap();
        assert!(Ed25519::verify(&public_key, b"ptb", &signature));
        assert!(!Ed25519::verify(&public_key, b"other", &signature));
    }
}
