// Copyright (C) 2024-2025 R3E Network.
//
// error.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use ptb_core::ObjectId;
use thiserror::Error;

/// Result type for network operations
pub type RpcResult<T> = std::result::Result<T, RpcError>;

/// Errors raised at the network boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// The node has no object with this id
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// Connectivity or timeout failure; the caller may retry
    #[error("Transient network error: {0}")]
    Transient(String),

    /// The node answered with a JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RpcError {
    /// Whether retrying the same call may succeed. Nothing retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RpcError::Transient(_))
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() || error.is_connect() || error.is_request() {
            RpcError::Transient(error.to_string())
        } else if error.is_decode() {
            RpcError::InvalidResponse(error.to_string())
        } else if let Some(status) = error.status().filter(|s| s.is_server_error()) {
            RpcError::Transient(format!("HTTP {}", status))
        } else {
            RpcError::InvalidResponse(error.to_string())
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(error: serde_json::Error) -> Self {
        RpcError::InvalidResponse(error.to_string())
    }
}
