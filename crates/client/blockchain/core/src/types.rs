//! Common types for batched chain calls.

use ethers_core::types::{Address, Bytes, H256, U256};
use serde::{Deserialize, Serialize};

/// One pending contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Contract (or account) the call is sent to.
    pub target: Address,

    /// Native value attached to the call, in wei.
    pub value: U256,

    /// ABI-encoded calldata.
    pub payload: Bytes,

    /// Human-readable summary shown before signing.
    pub description: String,
}

impl Operation {
    pub fn new(
        target: Address,
        value: U256,
        payload: impl Into<Bytes>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            target,
            value,
            payload: payload.into(),
            description: description.into(),
        }
    }

    /// A call that carries no native value.
    pub fn call(target: Address, payload: impl Into<Bytes>, description: impl Into<String>) -> Self {
        Self::new(target, U256::zero(), payload, description)
    }
}

/// Validation and cost summary of the queued batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPreview {
    pub operations: Vec<Operation>,

    /// Fixed per-operation heuristic, not an RPC estimate.
    pub estimated_gas_total: U256,

    /// Whether a paymaster may sponsor the batch.
    pub eligible_for_sponsorship: bool,

    /// Every violation found, each prefixed with its operation index.
    pub validation_errors: Vec<String>,
}

impl BatchPreview {
    pub fn is_valid(&self) -> bool {
        self.validation_errors.is_empty()
    }
}

/// Outcome of one `execute_batch` call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub succeeded: bool,

    /// Set whenever the transaction reached the chain.
    pub transaction_hash: Option<H256>,

    pub error: Option<String>,

    /// Indices (in the submitted batch) of sub-calls that reverted.
    pub failed_operation_indices: Vec<usize>,
}

impl BatchResult {
    pub fn success(transaction_hash: H256) -> Self {
        Self {
            succeeded: true,
            transaction_hash: Some(transaction_hash),
            ..Self::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// What the chain-submission collaborator reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub transaction_hash: H256,

    /// Indices of sub-calls that reverted inside the batch transaction.
    /// Empty when the receipt shows every call succeeded.
    pub failed_calls: Vec<usize>,
}

impl SubmissionReceipt {
    pub fn confirmed(transaction_hash: H256) -> Self {
        Self {
            transaction_hash,
            failed_calls: Vec::new(),
        }
    }

    pub fn is_partial_failure(&self) -> bool {
        !self.failed_calls.is_empty()
    }
}
