//! Intent signing of canonical transaction bytes.

use crate::envelope::SignatureEnvelope;
use crate::key_pair::KeyPair;
use crate::WalletResult;
use ptb_core::{Address, FrozenTransaction};
use ptb_cryptography::Intent;
use tracing::debug;

/// Something that can sign transactions, such as an in-memory key or a
/// handle into external key storage.
pub trait TransactionSigner {
    /// Address the signatures are attributed to.
    fn address(&self) -> Address;

    /// Signs the intent digest of `tx_bytes`.
    fn sign_transaction_bytes(&self, tx_bytes: &[u8]) -> WalletResult<SignatureEnvelope>;
}

impl TransactionSigner for KeyPair {
    fn address(&self) -> Address {
        KeyPair::address(self)
    }

    fn sign_transaction_bytes(&self, tx_bytes: &[u8]) -> WalletResult<SignatureEnvelope> {
        sign(tx_bytes, self)
    }
}

/// Signs canonical transaction bytes.
///
/// The signed message is `blake2b256([0, 0, 0] || tx_bytes)`; every scheme
/// is deterministic, so the same bytes and key give the same envelope.
pub fn sign(tx_bytes: &[u8], key: &KeyPair) -> WalletResult<SignatureEnvelope> {
    let digest = Intent::transaction_data().digest(tx_bytes);
    let signature = key.sign(&digest)?;
    debug!(
        signer = %key.address(),
        scheme = %key.scheme(),
        "signed transaction"
    );
    SignatureEnvelope::new(key.scheme(), signature, key.public_key().to_vec())
}

/// Signs a frozen transaction with any signer.
pub fn sign_transaction<S: TransactionSigner + ?Sized>(
    transaction: &FrozenTransaction,
    signer: &S,
) -> WalletResult<SignatureEnvelope> {
    signer.sign_transaction_bytes(transaction.bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptb_cryptography::SignatureScheme;

    #[test]
    fn test_sign_is_deterministic() {
        for scheme in [
            SignatureScheme::Ed25519,
            SignatureScheme::Secp256k1,
            SignatureScheme::Secp256r1,
        ] {
            let key = KeyPair::generate(scheme).unwrap();
            let first = sign(b"tx", &key).unwrap();
            let second = sign(b"tx", &key).unwrap();
            assert_eq!(first, second);
            assert!(first.verify(b"tx").is_ok());
            assert!(first.verify(b"other tx").is_err());
        }
    }

    #[test]
    fn test_signature_is_over_intent_digest() {
        let key = KeyPair::from_private_key(SignatureScheme::Ed25519, &[1u8; 32]).unwrap();
        let envelope = sign(b"payload", &key).unwrap();
        let raw = key.sign(b"payload").unwrap();
        assert_ne!(envelope.signature(), raw.as_slice());

        let digest = Intent::transaction_data().digest(b"payload");
        assert_eq!(envelope.signature(), key.sign(&digest).unwrap().as_slice());
    }
}
