//! Object data reported by a node.

use ptb_core::{ObjectDigest, ObjectId, ObjectRef, Owner};
use serde::{Deserialize, Deserializer, Serialize};

/// An object's current reference, owner and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    pub object_id: ObjectId,
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub version: u64,
    pub digest: ObjectDigest,
    pub owner: Owner,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
}

impl ObjectInfo {
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef::new(self.object_id, self.version, self.digest)
    }
}

/// Nodes send versions as decimal strings; accept plain numbers too.
fn u64_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Number(u64),
        Text(String),
    }

    match Version::deserialize(deserializer)? {
        Version::Number(n) => Ok(n),
        Version::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// `result` of `sui_getObject`: either `data` or an `error`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GetObjectResponse {
    #[serde(default)]
    pub data: Option<ObjectInfo>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptb_core::Address;
    use serde_json::json;

    #[test]
    fn test_object_info_from_node_json() {
        let digest = ObjectDigest::new([4u8; 32]);
        let info: ObjectInfo = serde_json::from_value(json!({
            "objectId": "0x6",
            "version": "12",
            "digest": digest.to_string(),
            "type": "0x2::clock::Clock",
            "owner": {"Shared": {"initial_shared_version": 1}}
        }))
        .unwrap();
        assert_eq!(info.object_id, Address::from_u64(6));
        assert_eq!(info.version, 12);
        assert!(info.owner.is_shared());
        assert_eq!(info.object_ref().digest, digest);
    }
}
