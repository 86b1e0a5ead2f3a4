//! Weighted multisig: key sets, addresses and signature aggregation.
//!
//! An aggregated signature is encoded as
//!
//! ```text
//! 0x03 | bitmap (u16 LE) | count (ULEB128) | (flag | 64-byte sig)* | key set | threshold (u16 LE)
//! ```
//!
//! where the key set is a ULEB128 count of `flag | public_key | weight`
//! entries. Bit `i` of the bitmap is set iff key `i` signed, and signatures
//! appear in ascending key order.

use crate::envelope::SignatureEnvelope;
use crate::{WalletError, WalletResult};
use ptb_config::MAX_SIGNERS_IN_MULTISIG;
use ptb_core::Address;
use ptb_cryptography::{blake2b256, Intent, SignatureScheme};
use ptb_io::{BinaryWriter, MemoryReader};
use std::collections::HashSet;
use tracing::debug;

/// One member of a multisig key set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeightedPublicKey {
    pub scheme: SignatureScheme,
    pub public_key: Vec<u8>,
    pub weight: u8,
}

impl WeightedPublicKey {
    pub fn new(scheme: SignatureScheme, public_key: Vec<u8>, weight: u8) -> Self {
        Self {
            scheme,
            public_key,
            weight,
        }
    }
}

/// An ordered, validated set of weighted keys with a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiSigPublicKey {
    keys: Vec<WeightedPublicKey>,
    threshold: u16,
}

impl MultiSigPublicKey {
    /// Validates the key set: 1 to 10 distinct keys, every weight at least
    /// 1, and a threshold between 1 and the total weight.
    pub fn new(keys: Vec<WeightedPublicKey>, threshold: u16) -> WalletResult<Self> {
        if keys.is_empty() || keys.len() > MAX_SIGNERS_IN_MULTISIG {
            return Err(WalletError::InvalidKeySet(format!(
                "expected 1 to {} keys, got {}",
                MAX_SIGNERS_IN_MULTISIG,
                keys.len()
            )));
        }

        let mut seen = HashSet::new();
        for key in &keys {
            let expected = key.scheme.public_key_length()?;
            if key.public_key.len() != expected {
                return Err(WalletError::InvalidKeySet(format!(
                    "{} key must be {} bytes, got {}",
                    key.scheme,
                    expected,
                    key.public_key.len()
                )));
            }
            if key.weight == 0 {
                return Err(WalletError::InvalidKeySet(format!(
                    "key {} has zero weight",
                    hex::encode(&key.public_key)
                )));
            }
            if !seen.insert(key.public_key.as_slice()) {
                return Err(WalletError::InvalidKeySet(format!(
                    "duplicate key {}",
                    hex::encode(&key.public_key)
                )));
            }
        }

        let total: u32 = keys.iter().map(|key| key.weight as u32).sum();
        if threshold == 0 || threshold as u32 > total {
            return Err(WalletError::InvalidKeySet(format!(
                "threshold {} outside 1..={}",
                threshold, total
            )));
        }

        Ok(Self { keys, threshold })
    }

    pub fn keys(&self) -> &[WeightedPublicKey] {
        &self.keys
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// `blake2b256(0x03 || threshold_le16 || Σ(flag || public_key || weight))`
    pub fn address(&self) -> Address {
        let mut preimage = BinaryWriter::new();
        preimage.write_u8(SignatureScheme::MultiSig.flag());
        preimage.write_u16(self.threshold);
        for key in &self.keys {
            preimage.write_u8(key.scheme.flag());
            preimage.write_bytes(&key.public_key);
            preimage.write_u8(key.weight);
        }
        Address::new(blake2b256(preimage.as_slice()))
    }

    fn position(&self, envelope: &SignatureEnvelope) -> Option<usize> {
        self.keys.iter().position(|key| {
            key.scheme == envelope.scheme() && key.public_key == envelope.public_key()
        })
    }

    /// Combines partial signatures into one aggregated signature.
    pub fn combine(&self, partials: &[SignatureEnvelope]) -> WalletResult<AggregatedSignature> {
        let mut bitmap: u16 = 0;
        let mut weight: u32 = 0;
        let mut signatures = Vec::with_capacity(partials.len());

        for partial in partials {
            let index = self
                .position(partial)
                .ok_or_else(|| WalletError::UnknownKey(hex::encode(partial.public_key())))?;
            if bitmap & (1 << index) != 0 {
                return Err(WalletError::DuplicateSignature(hex::encode(
                    partial.public_key(),
                )));
            }
            bitmap |= 1 << index;
            weight += self.keys[index].weight as u32;
            signatures.push((index, partial.scheme(), partial.signature().to_vec()));
        }

        if weight < self.threshold as u32 {
            return Err(WalletError::ThresholdNotMet {
                weight,
                threshold: self.threshold,
            });
        }

        signatures.sort_by_key(|(index, _, _)| *index);
        debug!(
            address = %self.address(),
            signers = signatures.len(),
            weight,
            threshold = self.threshold,
            "combined multisig signature"
        );
        Ok(AggregatedSignature {
            bitmap,
            signatures: signatures
                .into_iter()
                .map(|(_, scheme, signature)| (scheme, signature))
                .collect(),
            key_set: self.clone(),
        })
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_uleb128(self.keys.len() as u64);
        for key in &self.keys {
            writer.write_u8(key.scheme.flag());
            writer.write_bytes(&key.public_key);
            writer.write_u8(key.weight);
        }
        writer.write_u16(self.threshold);
    }

    fn read(reader: &mut MemoryReader) -> WalletResult<Self> {
        let count = reader.read_uleb128(MAX_SIGNERS_IN_MULTISIG as u64)? as usize;
        let mut keys = Vec::with_capacity(count);
        for _ in 0..count {
            let scheme = SignatureScheme::from_flag(reader.read_u8()?)?;
            let length = scheme.public_key_length()?;
            let public_key = reader.read_memory(length)?.to_vec();
            let weight = reader.read_u8()?;
            keys.push(WeightedPublicKey::new(scheme, public_key, weight));
        }
        let threshold = reader.read_u16()?;
        Self::new(keys, threshold)
    }
}

/// A threshold-meeting set of signatures from one key set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregatedSignature {
    bitmap: u16,
    signatures: Vec<(SignatureScheme, Vec<u8>)>,
    key_set: MultiSigPublicKey,
}

impl AggregatedSignature {
    pub fn bitmap(&self) -> u16 {
        self.bitmap
    }

    pub fn key_set(&self) -> &MultiSigPublicKey {
        &self.key_set
    }

    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    pub fn address(&self) -> Address {
        self.key_set.address()
    }

    /// Indices of the contributing keys, ascending.
    fn signer_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.key_set.keys.len()).filter(|i| self.bitmap & (1 << i) != 0)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        writer.write_u8(SignatureScheme::MultiSig.flag());
        writer.write_u16(self.bitmap);
        writer.write_uleb128(self.signatures.len() as u64);
        for (scheme, signature) in &self.signatures {
            writer.write_u8(scheme.flag());
            writer.write_bytes(signature);
        }
        self.key_set.write(&mut writer);
        writer.into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> WalletResult<Self> {
        let mut reader = MemoryReader::new(bytes);
        if reader.read_u8()? != SignatureScheme::MultiSig.flag() {
            return Err(WalletError::InvalidEnvelope(
                "not a multisig envelope".to_string(),
            ));
        }
        let bitmap = reader.read_u16()?;
        let count = reader.read_uleb128(MAX_SIGNERS_IN_MULTISIG as u64)? as usize;
        let mut signatures = Vec::with_capacity(count);
        for _ in 0..count {
            let scheme = SignatureScheme::from_flag(reader.read_u8()?)?;
            let length = scheme.signature_length()?;
            signatures.push((scheme, reader.read_memory(length)?.to_vec()));
        }
        let key_set = MultiSigPublicKey::read(&mut reader)?;
        reader.ensure_end()?;

        let aggregated = Self {
            bitmap,
            signatures,
            key_set,
        };
        let signers: Vec<usize> = aggregated.signer_indices().collect();
        if bitmap >> aggregated.key_set.keys.len() != 0 || signers.len() != count {
            return Err(WalletError::InvalidEnvelope(format!(
                "bitmap {:#06x} does not match {} signatures",
                bitmap, count
            )));
        }
        for (index, (scheme, _)) in signers.iter().zip(&aggregated.signatures) {
            if aggregated.key_set.keys[*index].scheme != *scheme {
                return Err(WalletError::InvalidEnvelope(format!(
                    "signature {} uses {} but key {} is {}",
                    index, scheme, index, aggregated.key_set.keys[*index].scheme
                )));
            }
        }
        Ok(aggregated)
    }

    /// Verifies every contained signature against the intent digest of
    /// `tx_bytes` and checks the threshold.
    pub fn verify(&self, tx_bytes: &[u8]) -> WalletResult<()> {
        let digest = Intent::transaction_data().digest(tx_bytes);
        let mut weight: u32 = 0;
        for (index, (scheme, signature)) in self.signer_indices().zip(&self.signatures) {
            let key = &self.key_set.keys[index];
            if !scheme.verify(&key.public_key, &digest, signature) {
                return Err(WalletError::InvalidSignature(format!(
                    "multisig member {} of {}",
                    index,
                    self.address()
                )));
            }
            weight += key.weight as u32;
        }
        if weight < self.key_set.threshold as u32 {
            return Err(WalletError::ThresholdNotMet {
                weight,
                threshold: self.key_set.threshold,
            });
        }
        Ok(())
    }
}
