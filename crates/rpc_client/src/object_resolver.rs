//! Resolves object ids to current references before a transaction is built.

use crate::error::{RpcError, RpcResult};
use crate::models::ObjectInfo;
use crate::network::NetworkService;
use futures::future::try_join_all;
use ptb_core::{ObjectArg, ObjectId, ObjectRef, Owner};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Looks up object versions and digests, caching them for one session.
///
/// Cached entries go stale once a transaction touching the object executes;
/// call [`ObjectResolver::invalidate`] afterwards. Failures are never retried
/// here; [`RpcError::is_retryable`] tells the caller whether to try again.
pub struct ObjectResolver {
    network: Arc<dyn NetworkService>,
    cache: HashMap<ObjectId, ObjectInfo>,
}

impl ObjectResolver {
    pub fn new(network: Arc<dyn NetworkService>) -> Self {
        Self {
            network,
            cache: HashMap::new(),
        }
    }

    /// Fetches full object info, from the cache when present.
    pub async fn object_info(&mut self, id: ObjectId) -> RpcResult<ObjectInfo> {
        if let Some(info) = self.cache.get(&id) {
            debug!(object = %id, "object resolved from cache");
            return Ok(info.clone());
        }
        let info = self.network.fetch_object(id).await?;
        self.check_identity(id, &info)?;
        self.cache.insert(id, info.clone());
        Ok(info)
    }

    /// Resolves an id to its current (id, version, digest).
    pub async fn resolve(&mut self, id: ObjectId) -> RpcResult<ObjectRef> {
        Ok(self.object_info(id).await?.object_ref())
    }

    /// Resolves several ids, fetching the uncached ones concurrently.
    ///
    /// Results keep the order of `ids`. The first failure aborts the batch.
    pub async fn resolve_many(&mut self, ids: &[ObjectId]) -> RpcResult<Vec<ObjectRef>> {
        let mut missing: Vec<ObjectId> = ids
            .iter()
            .copied()
            .filter(|id| !self.cache.contains_key(id))
            .collect();
        missing.sort();
        missing.dedup();

        if !missing.is_empty() {
            debug!(count = missing.len(), "fetching objects");
            let network = &self.network;
            let fetched = try_join_all(missing.iter().map(|id| network.fetch_object(*id))).await?;
            for (id, info) in missing.into_iter().zip(fetched) {
                self.check_identity(id, &info)?;
                self.cache.insert(id, info);
            }
        }

        ids.iter()
            .map(|id| {
                self.cache
                    .get(id)
                    .map(ObjectInfo::object_ref)
                    .ok_or(RpcError::ObjectNotFound(*id))
            })
            .collect()
    }

    /// Builds the input form of an object from its owner.
    ///
    /// Shared objects carry their initial shared version and the requested
    /// mutability; everything else is passed by reference.
    pub async fn resolve_object_arg(&mut self, id: ObjectId, mutable: bool) -> RpcResult<ObjectArg> {
        let info = self.object_info(id).await?;
        Ok(match info.owner {
            Owner::Shared {
                initial_shared_version,
            } => ObjectArg::Shared {
                id,
                initial_shared_version,
                mutable,
            },
            _ => ObjectArg::ImmOrOwned(info.object_ref()),
        })
    }

    /// Drops a cached entry so the next lookup hits the network.
    pub fn invalidate(&mut self, id: &ObjectId) {
        self.cache.remove(id);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn check_identity(&self, id: ObjectId, info: &ObjectInfo) -> RpcResult<()> {
        if info.object_id != id {
            return Err(RpcError::InvalidResponse(format!(
                "Asked for object {} but node returned {}",
                id, info.object_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryNetwork, SubmitOutcome};
    use ptb_core::Address;

    fn network() -> Arc<InMemoryNetwork> {
        let network = Arc::new(InMemoryNetwork::new());
        network.add_object(
            ObjectId::from_u64(1),
            4,
            Owner::AddressOwner(Address::from_u64(0xA11CE)),
        );
        network.add_object(
            ObjectId::from_u64(6),
            9,
            Owner::Shared {
                initial_shared_version: 1,
            },
        );
        network
    }

    #[tokio::test]
    async fn test_resolve_uses_cache() {
        let network = network();
        let mut resolver = ObjectResolver::new(network.clone());

        let first = resolver.resolve(ObjectId::from_u64(1)).await.unwrap();
        let second = resolver.resolve(ObjectId::from_u64(1)).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.version, 4);
        assert_eq!(network.fetch_count(), 1);

        resolver.invalidate(&ObjectId::from_u64(1));
        resolver.resolve(ObjectId::from_u64(1)).await.unwrap();
        assert_eq!(network.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_resolve_missing_object() {
        let mut resolver = ObjectResolver::new(network());
        let missing = ObjectId::from_u64(404);
        let error = resolver.resolve(missing).await.unwrap_err();
        assert_eq!(error, RpcError::ObjectNotFound(missing));
        assert!(!error.is_retryable());
    }

    #[tokio::test]
    async fn test_transient_failure_is_not_retried() {
        let network = network();
        network.set_outcome(SubmitOutcome::Unreachable);
        let mut resolver = ObjectResolver::new(network.clone());

        let error = resolver.resolve(ObjectId::from_u64(1)).await.unwrap_err();
        assert!(error.is_retryable());
        assert_eq!(network.fetch_count(), 1);
        assert_eq!(resolver.cached_len(), 0);
    }

    #[tokio::test]
    async fn test_resolve_many_keeps_order() {
        let network = network();
        let mut resolver = ObjectResolver::new(network.clone());
        let ids = [
            ObjectId::from_u64(6),
            ObjectId::from_u64(1),
            ObjectId::from_u64(6),
        ];

        let refs = resolver.resolve_many(&ids).await.unwrap();
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].object_id, ids[0]);
        assert_eq!(refs[1].object_id, ids[1]);
        assert_eq!(refs[0], refs[2]);
        assert_eq!(network.fetch_count(), 2);

        let failed = resolver
            .resolve_many(&[ObjectId::from_u64(1), ObjectId::from_u64(77)])
            .await;
        assert_eq!(failed, Err(RpcError::ObjectNotFound(ObjectId::from_u64(77))));
    }

    #[tokio::test]
    async fn test_object_arg_follows_owner() {
        let mut resolver = ObjectResolver::new(network());

        let shared = resolver
            .resolve_object_arg(ObjectId::from_u64(6), true)
            .await
            .unwrap();
        assert_eq!(
            shared,
            ObjectArg::Shared {
                id: ObjectId::from_u64(6),
                initial_shared_version: 1,
                mutable: true,
            }
        );

        let owned = resolver
            .resolve_object_arg(ObjectId::from_u64(1), true)
            .await
            .unwrap();
        assert!(matches!(owned, ObjectArg::ImmOrOwned(r) if r.version == 4));
    }
}
