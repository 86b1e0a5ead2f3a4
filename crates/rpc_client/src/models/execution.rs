//! Execution responses.

use ptb_core::TransactionDigest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome reported in the transaction effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Failure { error: String },
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionStatus::Success)
    }

    /// The Move abort code, when the failure was an abort.
    ///
    /// Failure strings look like
    /// `MoveAbort(MoveLocation { .. }, 7) in command 2`.
    pub fn abort_code(&self) -> Option<u64> {
        let ExecutionStatus::Failure { error } = self else {
            return None;
        };
        let start = error.find("MoveAbort(")? + "MoveAbort(".len();
        let rest = &error[start..];
        let end = rest.find(") in command").or_else(|| rest.rfind(')'))?;
        rest[..end].rsplit(", ").next()?.trim().parse().ok()
    }
}

/// What a node returns after executing a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResponse {
    pub digest: TransactionDigest,
    pub status: ExecutionStatus,
    /// Raw effects as returned by the node
    pub effects: Value,
}

/// `result` of `sui_executeTransactionBlock`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExecuteResponse {
    pub digest: TransactionDigest,
    #[serde(default)]
    pub effects: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_abort_code_parsing() {
        let status = ExecutionStatus::Failure {
            error: "MoveAbort(MoveLocation { module: ModuleId { address: 0000000000000000000000000000000000000000000000000000000000000002, name: Identifier(\"coin\") }, function: 3, instruction: 12, function_name: Some(\"split\") }, 7) in command 2".to_string(),
        };
        assert_eq!(status.abort_code(), Some(7));

        let unused = ExecutionStatus::Failure {
            error: "UnusedValueWithoutDrop { result_idx: 0, secondary_idx: 1 }".to_string(),
        };
        assert_eq!(unused.abort_code(), None);
        assert_eq!(ExecutionStatus::Success.abort_code(), None);
    }

    #[test]
    fn test_status_json() {
        let ok: ExecutionStatus = serde_json::from_value(json!({"status": "success"})).unwrap();
        assert!(ok.is_success());
        let failed: ExecutionStatus =
            serde_json::from_value(json!({"status": "failure", "error": "InsufficientGas"}))
                .unwrap();
        assert_eq!(
            failed,
            ExecutionStatus::Failure {
                error: "InsufficientGas".to_string()
            }
        );
    }
}
