//! Single-key signature envelopes: `flag || signature || public_key`.

use crate::key_pair::public_key_address;
use crate::{WalletError, WalletResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ptb_core::Address;
use ptb_cryptography::{Intent, SignatureScheme};

/// A signature over a transaction with the key that made it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureEnvelope {
    scheme: SignatureScheme,
    signature: Vec<u8>,
    public_key: Vec<u8>,
}

impl SignatureEnvelope {
    pub fn new(
        scheme: SignatureScheme,
        signature: Vec<u8>,
        public_key: Vec<u8>,
    ) -> WalletResult<Self> {
        let signature_length = scheme.signature_length()?;
        let public_key_length = scheme.public_key_length()?;
        if signature.len() != signature_length {
            return Err(WalletError::InvalidEnvelope(format!(
                "{} signature must be {} bytes, got {}",
                scheme,
                signature_length,
                signature.len()
            )));
        }
        if public_key.len() != public_key_length {
            return Err(WalletError::InvalidEnvelope(format!(
                "{} public key must be {} bytes, got {}",
                scheme,
                public_key_length,
                public_key.len()
            )));
        }
        Ok(Self {
            scheme,
            signature,
            public_key,
        })
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Address of the signing key.
    pub fn address(&self) -> Address {
        public_key_address(self.scheme, &self.public_key)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + self.signature.len() + self.public_key.len());
        bytes.push(self.scheme.flag());
        bytes.extend_from_slice(&self.signature);
        bytes.extend_from_slice(&self.public_key);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> WalletResult<Self> {
        let (&flag, rest) = bytes
            .split_first()
            .ok_or_else(|| WalletError::InvalidEnvelope("empty envelope".to_string()))?;
        let scheme = SignatureScheme::from_flag(flag)?;
        let signature_length = scheme.signature_length()?;
        if rest.len() != signature_length + scheme.public_key_length()? {
            return Err(WalletError::InvalidEnvelope(format!(
                "{} envelope has {} bytes after the flag",
                scheme,
                rest.len()
            )));
        }
        let (signature, public_key) = rest.split_at(signature_length);
        Self::new(scheme, signature.to_vec(), public_key.to_vec())
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    pub fn from_base64(encoded: &str) -> WalletResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| WalletError::Base64Decode(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Checks the signature against the intent digest of `tx_bytes`.
    pub fn verify(&self, tx_bytes: &[u8]) -> WalletResult<()> {
        let digest = Intent::transaction_data().digest(tx_bytes);
        if self.verify_digest(&digest) {
            Ok(())
        } else {
            Err(WalletError::InvalidSignature(self.address().to_string()))
        }
    }

    pub(crate) fn verify_digest(&self, digest: &[u8; 32]) -> bool {
        self.scheme
            .verify(&self.public_key, digest, &self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyPair;

    #[test]
    fn test_envelope_layout() {
        let key = KeyPair::generate(SignatureScheme::Secp256k1).unwrap();
        let envelope =
            SignatureEnvelope::new(key.scheme(), vec![9u8; 64], key.public_key().to_vec())
                .unwrap();
        let bytes = envelope.to_bytes();
        assert_eq!(bytes.len(), 1 + 64 + 33);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(&bytes[1..65], &[9u8; 64]);
        assert_eq!(SignatureEnvelope::from_bytes(&bytes).unwrap(), envelope);
    }

    #[test]
    fn test_envelope_rejects_wrong_sizes() {
        assert!(SignatureEnvelope::from_bytes(&[]).is_err());
        assert!(SignatureEnvelope::from_bytes(&[0x00; 96]).is_err());
        assert!(SignatureEnvelope::new(SignatureScheme::Ed25519, vec![0; 64], vec![0; 33]).is_err());
        assert!(SignatureEnvelope::new(SignatureScheme::MultiSig, vec![], vec![]).is_err());
    }
}
