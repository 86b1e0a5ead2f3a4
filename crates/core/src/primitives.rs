//! Addresses, object references and digests.

use crate::{CoreError, CoreResult};
use ptb_config::{ADDRESS_LENGTH, DIGEST_LENGTH};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 32-byte account or object address.
///
/// Parsed from `0x`-prefixed hex. Short forms are left-padded, so `0x2`
/// is the framework package `0x00..02`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

/// Objects share the address space.
pub type ObjectId = Address;

impl Address {
    pub const LENGTH: usize = ADDRESS_LENGTH;
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Builds the address whose last bytes hold `value` big-endian, e.g. `0x2`.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|_| {
            CoreError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Full 64-digit hex with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() || digits.len() > ADDRESS_LENGTH * 2 {
            return Err(CoreError::InvalidAddress(s.to_string()));
        }
        let padded = format!("{:0>width$}", digits, width = ADDRESS_LENGTH * 2);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|_| CoreError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

macro_rules! digest_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name([u8; DIGEST_LENGTH]);

        impl $name {
            pub const LENGTH: usize = DIGEST_LENGTH;

            pub const fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(bytes: &[u8]) -> CoreResult<Self> {
                let bytes: [u8; DIGEST_LENGTH] = bytes.try_into().map_err(|_| {
                    CoreError::InvalidDigest(format!(
                        "expected {} bytes, got {}",
                        DIGEST_LENGTH,
                        bytes.len()
                    ))
                })?;
                Ok(Self(bytes))
            }

            pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
                &self.0
            }

            pub fn into_inner(self) -> [u8; DIGEST_LENGTH] {
                self.0
            }

            pub fn to_base58(&self) -> String {
                bs58::encode(self.0).into_string()
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> CoreResult<Self> {
                let bytes = bs58::decode(s)
                    .into_vec()
                    .map_err(|e| CoreError::InvalidDigest(format!("{}: {}", s, e)))?;
                Self::from_slice(&bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_base58())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_base58())
            }
        }

        impl From<[u8; DIGEST_LENGTH]> for $name {
            fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
                Self(bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_base58())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

digest_type!(
    /// Digest of an object's current contents, changes on every mutation.
    ObjectDigest
);

digest_type!(
    /// Intent-scoped BLAKE2b-256 digest of a transaction's canonical bytes.
    TransactionDigest
);

/// A resolved reference to an owned or immutable object.
///
/// A reference pins one version; reusing it after the object changed makes
/// the node reject the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: ObjectDigest,
}

impl ObjectRef {
    pub fn new(object_id: ObjectId, version: u64, digest: ObjectDigest) -> Self {
        Self {
            object_id,
            version,
            digest,
        }
    }
}

/// Who owns an object, as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    AddressOwner(Address),
    ObjectOwner(Address),
    Shared { initial_shared_version: u64 },
    Immutable,
}

impl Owner {
    pub fn is_shared(&self) -> bool {
        matches!(self, Owner::Shared { .. })
    }
}

/// How an object is passed into a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectArg {
    /// Owned or immutable object pinned at a version
    ImmOrOwned(ObjectRef),
    /// Shared object, sequenced by consensus from its initial version
    Shared {
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },
}

impl ObjectArg {
    pub fn id(&self) -> ObjectId {
        match self {
            ObjectArg::ImmOrOwned(object_ref) => object_ref.object_id,
            ObjectArg::Shared { id, .. } => *id,
        }
    }
}

impl From<ObjectRef> for ObjectArg {
    fn from(object_ref: ObjectRef) -> Self {
        ObjectArg::ImmOrOwned(object_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address_is_left_padded() {
        let two: Address = "0x2".parse().unwrap();
        assert_eq!(two, Address::from_u64(2));
        assert_eq!(
            two.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
        assert_eq!(two.to_string().parse::<Address>().unwrap(), two);
    }

    #[test]
    fn test_invalid_addresses() {
        assert!("0x".parse::<Address>().is_err());
        assert!("0xzz".parse::<Address>().is_err());
        assert!(format!("0x{}", "1".repeat(65)).parse::<Address>().is_err());
        assert!(Address::from_slice(&[0u8; 20]).is_err());
    }

    #[test]
    fn test_digest_base58() {
        let digest = TransactionDigest::new([7u8; 32]);
        let text = digest.to_string();
        assert_eq!(text.parse::<TransactionDigest>().unwrap(), digest);
        assert!("0OIl".parse::<TransactionDigest>().is_err());
        assert!(bs58::encode([1u8; 31])
            .into_string()
            .parse::<ObjectDigest>()
            .is_err());
    }

    #[test]
    fn test_owner_json_shape() {
        let shared: Owner =
            serde_json::from_str(r#"{"Shared":{"initial_shared_version":5}}"#).unwrap();
        assert_eq!(
            shared,
            Owner::Shared {
                initial_shared_version: 5
            }
        );
        let immutable: Owner = serde_json::from_str(r#""Immutable""#).unwrap();
        assert_eq!(immutable, Owner::Immutable);
        let owned: Owner = serde_json::from_str(r#"{"AddressOwner":"0x2"}"#).unwrap();
        assert_eq!(owned, Owner::AddressOwner(Address::from_u64(2)));
    }
}
