//! Submitter that never leaves the process.
//!
//! Used when no wallet is configured: the batch is logged and a
//! deterministic pseudo transaction hash is returned.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use ethers_core::types::H256;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::traits::{ChainSubmitter, TransportError};
use crate::types::{Operation, SubmissionReceipt};

#[derive(Debug, Default)]
pub struct DryRunSubmitter {
    nonce: AtomicU64,
}

impl DryRunSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash over the nonce and every call's target, value and payload.
    pub fn batch_hash(nonce: u64, operations: &[Operation]) -> H256 {
        let mut hasher = Sha256::new();
        hasher.update(nonce.to_be_bytes());
        for op in operations {
            hasher.update(op.target.as_bytes());
            let mut value = [0u8; 32];
            op.value.to_big_endian(&mut value);
            hasher.update(value);
            hasher.update((op.payload.len() as u64).to_be_bytes());
            hasher.update(&op.payload);
        }
        H256::from_slice(&hasher.finalize())
    }
}

#[async_trait]
impl ChainSubmitter for DryRunSubmitter {
    async fn submit(&self, operations: &[Operation]) -> Result<SubmissionReceipt, TransportError> {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        for (index, op) in operations.iter().enumerate() {
            info!(
                index,
                target = ?op.target,
                value = %op.value,
                calldata = %op.payload,
                "dry-run call: {}", op.description
            );
        }
        Ok(SubmissionReceipt::confirmed(Self::batch_hash(
            nonce, operations,
        )))
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
