//! Either kind of signature a transaction can carry.

use crate::envelope::SignatureEnvelope;
use crate::multisig::AggregatedSignature;
use crate::{WalletError, WalletResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ptb_core::Address;
use ptb_cryptography::SignatureScheme;

/// A single-key envelope or an aggregated multisig, told apart by the
/// leading flag byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenericSignature {
    Single(SignatureEnvelope),
    MultiSig(AggregatedSignature),
}

impl GenericSignature {
    /// Address the signature authorizes: the key's or the key set's.
    pub fn address(&self) -> Address {
        match self {
            GenericSignature::Single(envelope) => envelope.address(),
            GenericSignature::MultiSig(aggregated) => aggregated.address(),
        }
    }

    pub fn verify(&self, tx_bytes: &[u8]) -> WalletResult<()> {
        match self {
            GenericSignature::Single(envelope) => envelope.verify(tx_bytes),
            GenericSignature::MultiSig(aggregated) => aggregated.verify(tx_bytes),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            GenericSignature::Single(envelope) => envelope.to_bytes(),
            GenericSignature::MultiSig(aggregated) => aggregated.to_bytes(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> WalletResult<Self> {
        match bytes.first() {
            Some(&flag) if flag == SignatureScheme::MultiSig.flag() => {
                Ok(GenericSignature::MultiSig(AggregatedSignature::from_bytes(bytes)?))
            }
            Some(_) => Ok(GenericSignature::Single(SignatureEnvelope::from_bytes(bytes)?)),
            None => Err(WalletError::InvalidEnvelope("empty signature".to_string())),
        }
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
}

impl From<SignatureEnvelope> for GenericSignature {
    fn from(envelope: SignatureEnvelope) -> Self {
        GenericSignature::Single(envelope)
    }
}

impl From<AggregatedSignature> for GenericSignature {
    fn from(aggregated: AggregatedSignature) -> Self {
        GenericSignature::MultiSig(aggregated)
    }
}
