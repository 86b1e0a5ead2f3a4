//! PTB RPC Client
//!
//! The network side of the transaction pipeline: the [`NetworkService`]
//! boundary, a JSON-RPC implementation of it, an object resolver with a
//! per-session cache, and the executor that submits signed transactions and
//! reconciles the digest the node reports.

pub mod error;
pub mod models;
pub mod network;
pub mod object_resolver;
pub mod rpc_client;
pub mod transaction_executor;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{RpcError, RpcResult};
pub use models::{ExecutionResponse, ExecutionStatus, ObjectInfo};
pub use network::NetworkService;
pub use object_resolver::ObjectResolver;
pub use rpc_client::RpcClient;
pub use transaction_executor::{
    ExecutedTransaction, ExecutionError, ExecutionResult, ExecutionState, TransactionExecutor,
};
