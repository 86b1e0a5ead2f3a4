//! The abstract network boundary.
//!
//! Everything above this trait is pure; everything below it talks to a node.

use crate::error::RpcResult;
use crate::models::{ExecutionResponse, ObjectInfo};
use async_trait::async_trait;
use ptb_config::ExecutionMode;
use ptb_core::ObjectId;

/// A node that can report object state and execute signed transactions.
#[async_trait]
pub trait NetworkService: Send + Sync {
    /// Fetches the latest version, digest and owner of an object.
    async fn fetch_object(&self, id: ObjectId) -> RpcResult<ObjectInfo>;

    /// Submits canonical transaction bytes with serialized signatures.
    async fn submit_transaction(
        &self,
        tx_bytes: &[u8],
        signatures: &[Vec<u8>],
        mode: ExecutionMode,
    ) -> RpcResult<ExecutionResponse>;
}
