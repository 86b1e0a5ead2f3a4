// Copyright (C) 2024-2025 R3E Network.
//
// transaction_executor.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Submits signed transactions and reconciles what the node reports.

use crate::error::RpcError;
use crate::models::ExecutionStatus;
use crate::network::NetworkService;
use ptb_config::ExecutionMode;
use ptb_core::{Address, FrozenTransaction, TransactionDigest};
use ptb_wallets::{GenericSignature, WalletError};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Lifecycle of a transaction on its way through the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionState {
    Built,
    Signed,
    Submitted,
    Confirmed,
    Rejected,
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionState::Built => "built",
            ExecutionState::Signed => "signed",
            ExecutionState::Submitted => "submitted",
            ExecutionState::Confirmed => "confirmed",
            ExecutionState::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("No signature for required signer {signer}")]
    MissingSignature { signer: Address },

    #[error("More than one signature for {signer}")]
    DuplicateSignature { signer: Address },

    #[error("Signature for {signer} does not belong to this transaction")]
    UnexpectedSignature { signer: Address },

    #[error("Signature for {signer} failed verification: {source}")]
    InvalidSignature {
        signer: Address,
        #[source]
        source: WalletError,
    },

    /// The node executed something other than what was signed locally
    #[error("Digest mismatch: local {local}, returned {returned}")]
    DigestMismatch {
        local: TransactionDigest,
        returned: TransactionDigest,
    },

    #[error("Transaction {digest} aborted: {reason}")]
    ExecutionAborted {
        digest: TransactionDigest,
        abort_code: Option<u64>,
        reason: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] RpcError),
}

impl ExecutionError {
    /// State the transaction was left in when this error was raised.
    pub fn state(&self) -> ExecutionState {
        match self {
            ExecutionError::MissingSignature { .. }
            | ExecutionError::DuplicateSignature { .. }
            | ExecutionError::UnexpectedSignature { .. }
            | ExecutionError::InvalidSignature { .. } => ExecutionState::Built,
            ExecutionError::Network(_) => ExecutionState::Signed,
            ExecutionError::DigestMismatch { .. } | ExecutionError::ExecutionAborted { .. } => {
                ExecutionState::Rejected
            }
        }
    }
}

pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// A transaction the node confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedTransaction {
    pub digest: TransactionDigest,
    pub state: ExecutionState,
    pub effects: Value,
}

/// Checks signatures, submits, and reconciles the returned digest.
pub struct TransactionExecutor {
    network: Arc<dyn NetworkService>,
    mode: ExecutionMode,
}

impl TransactionExecutor {
    pub fn new(network: Arc<dyn NetworkService>, mode: ExecutionMode) -> Self {
        Self { network, mode }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Verifies that `signatures` authorize `frozen`, with no network access.
    ///
    /// Every required signer needs exactly one matching signature, and no
    /// signature may come from an address the transaction does not name.
    pub fn check_signatures(
        frozen: &FrozenTransaction,
        signatures: &[GenericSignature],
    ) -> ExecutionResult<()> {
        let required = frozen.required_signers();
        for signer in &required {
            if !signatures.iter().any(|s| s.address() == *signer) {
                return Err(ExecutionError::MissingSignature { signer: *signer });
            }
        }
        let mut seen = HashSet::new();
        for signature in signatures {
            let signer = signature.address();
            if !required.contains(&signer) {
                return Err(ExecutionError::UnexpectedSignature { signer });
            }
            if !seen.insert(signer) {
                return Err(ExecutionError::DuplicateSignature { signer });
            }
            signature
                .verify(frozen.bytes())
                .map_err(|source| ExecutionError::InvalidSignature { signer, source })?;
        }
        Ok(())
    }

    /// Fails unless the node reports the digest computed before submission.
    pub fn verify_digest(
        local: TransactionDigest,
        returned: TransactionDigest,
    ) -> ExecutionResult<()> {
        if local != returned {
            error!(%local, %returned, "node returned a different transaction digest");
            return Err(ExecutionError::DigestMismatch { local, returned });
        }
        Ok(())
    }

    /// Submits a signed transaction and waits for the node's verdict.
    ///
    /// A mismatched digest is reported before the execution status, since
    /// the status then describes some other transaction.
    pub async fn execute(
        &self,
        frozen: &FrozenTransaction,
        signatures: &[GenericSignature],
    ) -> ExecutionResult<ExecutedTransaction> {
        let local = frozen.digest();
        Self::check_signatures(frozen, signatures)?;
        debug!(digest = %local, state = %ExecutionState::Signed, signatures = signatures.len());

        let encoded: Vec<Vec<u8>> = signatures.iter().map(GenericSignature::to_bytes).collect();
        info!(digest = %local, mode = %self.mode, "submitting transaction");
        let response = self
            .network
            .submit_transaction(frozen.bytes(), &encoded, self.mode)
            .await?;
        debug!(digest = %local, state = %ExecutionState::Submitted);

        Self::verify_digest(local, response.digest)?;

        let abort_code = response.status.abort_code();
        match response.status {
            ExecutionStatus::Success => {
                info!(digest = %local, "transaction confirmed");
                Ok(ExecutedTransaction {
                    digest: local,
                    state: ExecutionState::Confirmed,
                    effects: response.effects,
                })
            }
            ExecutionStatus::Failure { error } => {
                warn!(digest = %local, ?abort_code, reason = %error, "transaction rejected");
                Err(ExecutionError::ExecutionAborted {
                    digest: local,
                    abort_code,
                    reason: error,
                })
            }
        }
    }
}
