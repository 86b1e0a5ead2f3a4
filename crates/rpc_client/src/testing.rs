//! An in-memory node for tests.

use crate::error::{RpcError, RpcResult};
use crate::models::{ExecutionResponse, ExecutionStatus, ObjectInfo};
use crate::network::NetworkService;
use async_trait::async_trait;
use ptb_config::ExecutionMode;
use ptb_core::{ObjectDigest, ObjectId, Owner, TransactionDigest};
use ptb_cryptography::Intent;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// How the node answers the next submissions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitOutcome {
    #[default]
    Success,
    /// Executes and fails with this error string
    Failure(String),
    /// Reports a digest other than the one of the submitted bytes
    WrongDigest(TransactionDigest),
    /// Refuses the request at the transport level
    Unreachable,
}

/// A submission as the node received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub tx_bytes: Vec<u8>,
    pub signatures: Vec<Vec<u8>>,
    pub mode: ExecutionMode,
}

/// [`NetworkService`] backed by a map of objects.
#[derive(Default)]
pub struct InMemoryNetwork {
    objects: Mutex<HashMap<ObjectId, ObjectInfo>>,
    outcome: Mutex<SubmitOutcome>,
    submissions: Mutex<Vec<Submission>>,
    fetches: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_object(&self, info: ObjectInfo) {
        lock(&self.objects).insert(info.object_id, info);
    }

    /// Adds an object with a digest derived from its id and version.
    pub fn add_object(&self, id: ObjectId, version: u64, owner: Owner) -> ObjectInfo {
        let mut digest = *id.as_bytes();
        digest[..8].copy_from_slice(&version.to_le_bytes());
        let info = ObjectInfo {
            object_id: id,
            version,
            digest: ObjectDigest::new(digest),
            owner,
            object_type: None,
        };
        self.insert_object(info.clone());
        info
    }

    pub fn set_outcome(&self, outcome: SubmitOutcome) {
        *lock(&self.outcome) = outcome;
    }

    pub fn submissions(&self) -> Vec<Submission> {
        lock(&self.submissions).clone()
    }

    /// Number of `fetch_object` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkService for InMemoryNetwork {
    async fn fetch_object(&self, id: ObjectId) -> RpcResult<ObjectInfo> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if *lock(&self.outcome) == SubmitOutcome::Unreachable {
            return Err(RpcError::Transient("connection refused".to_string()));
        }
        lock(&self.objects)
            .get(&id)
            .cloned()
            .ok_or(RpcError::ObjectNotFound(id))
    }

    async fn submit_transaction(
        &self,
        tx_bytes: &[u8],
        signatures: &[Vec<u8>],
        mode: ExecutionMode,
    ) -> RpcResult<ExecutionResponse> {
        let outcome = lock(&self.outcome).clone();
        if outcome == SubmitOutcome::Unreachable {
            return Err(RpcError::Transient("connection refused".to_string()));
        }
        lock(&self.submissions).push(Submission {
            tx_bytes: tx_bytes.to_vec(),
            signatures: signatures.to_vec(),
            mode,
        });

        let digest = TransactionDigest::new(Intent::transaction_data().digest(tx_bytes));
        let (digest, status) = match outcome {
            SubmitOutcome::Failure(error) => (digest, ExecutionStatus::Failure { error }),
            SubmitOutcome::WrongDigest(other) => (other, ExecutionStatus::Success),
            _ => (digest, ExecutionStatus::Success),
        };
        let effects = json!({
            "status": serde_json::to_value(&status)?,
            "transactionDigest": digest.to_string(),
        });
        Ok(ExecutionResponse {
            digest,
            status,
            effects,
        })
    }
}
