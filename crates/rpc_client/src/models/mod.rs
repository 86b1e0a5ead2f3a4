//! Request and response models.

pub mod execution;
pub mod object;
pub mod rpc_request;

pub use execution::{ExecutionResponse, ExecutionStatus};
pub use object::ObjectInfo;
pub use rpc_request::{RpcRequest, RpcResponse, RpcResponseError};
