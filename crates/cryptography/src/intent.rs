//! Intent framing for signed payloads.
//!
//! Every signed payload is prefixed with a three byte intent
//! `[scope, version, app_id]` before hashing, so a signature over transaction
//! bytes can never be replayed as a signature over another kind of message.

use crate::hash::blake2b256_concat;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// What kind of payload is being signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IntentScope {
    TransactionData = 0,
    TransactionEffects = 1,
    CheckpointSummary = 2,
    PersonalMessage = 3,
}

impl TryFrom<u8> for IntentScope {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(IntentScope::TransactionData),
            1 => Ok(IntentScope::TransactionEffects),
            2 => Ok(IntentScope::CheckpointSummary),
            3 => Ok(IntentScope::PersonalMessage),
            other => Err(Error::InvalidIntent(format!("unknown scope {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IntentVersion {
    V0 = 0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AppId {
    Sui = 0,
    Narwhal = 1,
    Consensus = 2,
}

/// The three byte domain separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    pub scope: IntentScope,
    pub version: IntentVersion,
    pub app_id: AppId,
}

impl Intent {
    pub const LENGTH: usize = 3;

    /// The intent used for transaction data: `[0, 0, 0]`.
    pub const fn transaction_data() -> Self {
        Self {
            scope: IntentScope::TransactionData,
            version: IntentVersion::V0,
            app_id: AppId::Sui,
        }
    }

    pub const fn personal_message() -> Self {
        Self {
            scope: IntentScope::PersonalMessage,
            version: IntentVersion::V0,
            app_id: AppId::Sui,
        }
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        [self.scope as u8, self.version as u8, self.app_id as u8]
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [scope, version, app_id]: [u8; 3] = bytes
            .try_into()
            .map_err(|_| Error::InvalidIntent(format!("expected 3 bytes, got {}", bytes.len())))?;
        let version = match version {
            0 => IntentVersion::V0,
            other => return Err(Error::InvalidIntent(format!("unknown version {}", other))),
        };
        let app_id = match app_id {
            0 => AppId::Sui,
            1 => AppId::Narwhal,
            2 => AppId::Consensus,
            other => return Err(Error::InvalidIntent(format!("unknown app id {}", other))),
        };
        Ok(Self {
            scope: IntentScope::try_from(scope)?,
            version,
            app_id,
        })
    }

    /// Hashes `intent || message` with BLAKE2b-256.
    ///
    /// This is the digest that gets signed, and the digest a node reports
    /// back for an executed transaction.
    pub fn digest(&self, message: &[u8]) -> [u8; 32] {
        blake2b256_concat(&[&self.to_bytes(), message])
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::transaction_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::blake2b256;

    #[test]
    fn test_transaction_intent_is_three_zero_bytes() {
        assert_eq!(Intent::transaction_data().to_bytes(), [0, 0, 0]);
        assert_eq!(Intent::personal_message().to_bytes(), [3, 0, 0]);
    }

    #[test]
    fn test_digest_prefixes_intent() {
        let message = b"tx-bytes";
        let mut framed = vec![0u8, 0, 0];
        framed.extend_from_slice(message);
        assert_eq!(Intent::transaction_data().digest(message), blake2b256(&framed));
        assert_ne!(
            Intent::transaction_data().digest(message),
            Intent::personal_message().digest(message)
        );
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(
            Intent::from_bytes(&[0, 0, 0]).unwrap(),
            Intent::transaction_data()
        );
        assert!(Intent::from_bytes(&[9, 0, 0]).is_err());
        assert!(Intent::from_bytes(&[0, 0]).is_err());
    }
}
