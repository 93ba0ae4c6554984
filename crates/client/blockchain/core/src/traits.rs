//! Boundary traits and their error types.
//!
//! The queue never talks to a wallet or RPC node directly; it hands the
//! validated batch to a [`ChainSubmitter`].

use async_trait::async_trait;

use crate::types::{Operation, SubmissionReceipt};

// ============================================================================
// Error Types
// ============================================================================

/// Submission failures. All of them leave the queued operations in place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request rejected by user: {0}")]
    Rejected(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Transaction underpriced: {0}")]
    Underpriced(String),
}

impl TransportError {
    /// Whether retrying the same batch unchanged can succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Underpriced(_))
    }
}

// ============================================================================
// Chain Submission
// ============================================================================

/// Sends a batch of calls as one transaction.
#[async_trait]
pub trait ChainSubmitter: Send + Sync {
    /// Submit all operations as a single atomic transaction.
    async fn submit(&self, operations: &[Operation]) -> Result<SubmissionReceipt, TransportError>;

    /// Short name for logs (e.g. "smart-wallet", "dry-run").
    fn name(&self) -> &str;
}
