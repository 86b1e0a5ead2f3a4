//! ECDSA over secp256k1 and secp256r1.
//!
//! Messages are pre-hashed with SHA-256 and nonces are derived per RFC 6979,
//! so signing is deterministic. Signatures are 64-byte `r || s` with `s`
//! normalized to the lower half of the curve order; public keys are 33-byte
//! compressed SEC1 points.

use crate::{Error, Result};
use rand::rngs::OsRng;

macro_rules! ecdsa_curve {
    ($(#[$meta:meta])* $name:ident, $curve:ident) => {
        $(#[$meta])*
        pub struct $name;

        impl $name {
            pub const PRIVATE_KEY_LENGTH: usize = 32;
            pub const PUBLIC_KEY_LENGTH: usize = 33;
            pub const SIGNATURE_LENGTH: usize = 64;

            fn signing_key(private_key: &[u8]) -> Result<$curve::ecdsa::SigningKey> {
                if private_key.len() != Self::PRIVATE_KEY_LENGTH {
                    return Err(Error::InvalidKey("Invalid private key length".to_string()));
                }
                $curve::ecdsa::SigningKey::from_slice(private_key)
                    .map_err(|e| Error::InvalidKey(format!("Invalid private key: {e}")))
            }

            /// Generates a new key pair as `(private_key, compressed_public_key)`.
            pub fn generate_key_pair() -> (Vec<u8>, Vec<u8>) {
                let signing_key = $curve::ecdsa::SigningKey::random(&mut OsRng);
                let public_key = signing_key
                    .verifying_key()
                    .to_encoded_point(true)
                    .as_bytes()
                    .to_vec();
                (signing_key.to_bytes().to_vec(), public_key)
            }

            /// Derives the compressed public key from a private key.
            pub fn private_key_to_public_key(private_key: &[u8]) -> Result<Vec<u8>> {
                let signing_key = Self::signing_key(private_key)?;
                Ok(signing_key
                    .verifying_key()
                    .to_encoded_point(true)
                    .as_bytes()
                    .to_vec())
            }

            /// Signs a message, returning a low-s `r || s` signature.
            pub fn sign(private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
                use $curve::ecdsa::signature::Signer;

                let signing_key = Self::signing_key(private_key)?;
                let signature: $curve::ecdsa::Signature = signing_key
                    .try_sign(message)
                    .map_err(|e| Error::SigningFailed(e.to_string()))?;
                let signature = signature.normalize_s().unwrap_or(signature);
                Ok(signature.to_bytes().to_vec())
            }

            /// Verifies a signature; high-s signatures are rejected.
            pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
                use $curve::ecdsa::signature::Verifier;

                if public_key.len() != Self::PUBLIC_KEY_LENGTH
                    || signature.len() != Self::SIGNATURE_LENGTH
                {
                    return false;
                }
                let Ok(verifying_key) = $curve::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
                else {
                    return false;
                };
                let Ok(signature) = $curve::ecdsa::Signature::from_slice(signature) else {
                    return false;
                };
                if signature.normalize_s().is_some() {
                    return false;
                }
                verifying_key.verify(message, &signature).is_ok()
            }
        }
    };
}

ecdsa_curve!(
    /// ECDSA over secp256k1.
    Secp256k1,
    k256
);

ecdsa_curve!(
    /// ECDSA over secp256r1 (NIST P-256).
    Secp256r1,
    p256
);
