// Copyright (C) 2024-2025 R3E Network.
//
// rpc_client.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{RpcError, RpcResult};
use crate::models::execution::ExecuteResponse;
use crate::models::object::GetObjectResponse;
use crate::models::{ExecutionResponse, ExecutionStatus, ObjectInfo, RpcRequest, RpcResponse};
use crate::network::NetworkService;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use ptb_config::{ExecutionMode, RpcConfig};
use ptb_core::ObjectId;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// JSON-RPC client for a full node
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a client for `url` with the given request timeout
    pub fn new(url: Url, timeout: Duration) -> RpcResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::InvalidResponse(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self::with_client(http_client, url))
    }

    /// Creates a client with an existing HTTP client
    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            base_address: url,
            http_client: client,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn from_config(config: &RpcConfig) -> RpcResult<Self> {
        let url = Url::parse(config.endpoint())
            .map_err(|e| RpcError::InvalidResponse(format!("Invalid endpoint: {}", e)))?;
        Self::new(url, Duration::from_secs(config.request_timeout_secs))
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    fn as_rpc_request(&self, method: &str, params: Vec<Value>) -> RpcRequest {
        RpcRequest::new(self.next_id.fetch_add(1, Ordering::Relaxed), method, params)
    }

    /// Sends a request and returns the raw response envelope
    pub async fn send_async(&self, request: RpcRequest) -> RpcResult<RpcResponse> {
        trace!(method = %request.method, id = request.id, "sending RPC request");
        let response = self
            .http_client
            .post(self.base_address.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(RpcError::Transient(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(RpcError::InvalidResponse(format!("HTTP {}", status)));
        }

        Ok(response.json::<RpcResponse>().await?)
    }

    /// Calls `method` and returns its `result`, mapping JSON-RPC errors
    pub async fn rpc_send_async(&self, method: &str, params: Vec<Value>) -> RpcResult<Value> {
        let response = self.send_async(self.as_rpc_request(method, params)).await?;
        if let Some(error) = response.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| RpcError::InvalidResponse(format!("{} returned no result", method)))
    }
}

#[async_trait]
impl NetworkService for RpcClient {
    async fn fetch_object(&self, id: ObjectId) -> RpcResult<ObjectInfo> {
        let result = self
            .rpc_send_async(
                "sui_getObject",
                vec![json!(id.to_string()), json!({ "showOwner": true, "showType": true })],
            )
            .await?;
        let response: GetObjectResponse = serde_json::from_value(result)?;
        match (response.data, response.error) {
            (Some(info), _) => {
                debug!(object = %id, version = info.version, "fetched object");
                Ok(info)
            }
            (None, Some(error)) if error.get("code").and_then(Value::as_str) == Some("notExists") => {
                Err(RpcError::ObjectNotFound(id))
            }
            (None, Some(error)) => Err(RpcError::InvalidResponse(error.to_string())),
            (None, None) => Err(RpcError::ObjectNotFound(id)),
        }
    }

    async fn submit_transaction(
        &self,
        tx_bytes: &[u8],
        signatures: &[Vec<u8>],
        mode: ExecutionMode,
    ) -> RpcResult<ExecutionResponse> {
        let encoded_signatures: Vec<Value> = signatures
            .iter()
            .map(|s| json!(general_purpose::STANDARD.encode(s)))
            .collect();
        let result = self
            .rpc_send_async(
                "sui_executeTransactionBlock",
                vec![
                    json!(general_purpose::STANDARD.encode(tx_bytes)),
                    Value::Array(encoded_signatures),
                    json!({ "showEffects": true }),
                    json!(mode.as_request_type()),
                ],
            )
            .await?;

        let response: ExecuteResponse = serde_json::from_value(result)?;
        let status: ExecutionStatus = serde_json::from_value(
            response
                .effects
                .get("status")
                .cloned()
                .ok_or_else(|| RpcError::InvalidResponse("Effects carry no status".into()))?,
        )?;
        debug!(digest = %response.digest, success = status.is_success(), "transaction executed");
        Ok(ExecutionResponse {
            digest: response.digest,
            status,
            effects: response.effects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_increase() {
        let client = RpcClient::with_client(
            Client::new(),
            Url::parse("http://127.0.0.1:9000").unwrap(),
        );
        let first = client.as_rpc_request("sui_getObject", vec![]);
        let second = client.as_rpc_request("sui_getObject", vec![]);
        assert_eq!(first.jsonrpc, "2.0");
        assert!(second.id > first.id);
    }

    #[test]
    fn test_from_config_uses_endpoint() {
        let config = RpcConfig {
            url: Some("http://localhost:9000".to_string()),
            ..RpcConfig::default()
        };
        let client = RpcClient::from_config(&config).unwrap();
        assert_eq!(client.base_address().as_str(), "http://localhost:9000/");
    }
}
