//! Batch operation queue.
//!
//! Pending chain calls accumulate here until the caller commits them as one
//! transaction.
//!
//! ```text
//! Empty ──add──▶ Filled(n) ──preview*──▶ Executing ──ok──▶ Empty
//!                    ▲                        │
//!                    └──── error recorded ◀───┘
//! ```
//!
//! Operations are never dropped on failure: validation errors, transport
//! errors and reverted sub-calls all leave the affected calls queued so the
//! caller can fix or retry them.

use ethers_core::types::{H256, U256};
use tracing::{debug, info, warn};

use crate::config::BatchConfig;
use crate::traits::{ChainSubmitter, TransportError};
use crate::types::{BatchPreview, BatchResult, Operation};

/// Queue errors. The most recent one is also kept on the queue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("batch is empty")]
    EmptyBatch,

    #[error("batch validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("operation index {index} out of range (batch has {len} operations)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("a batch execution is already in flight")]
    ExecutionInFlight,

    #[error("submission failed: {0}")]
    Submission(#[from] TransportError),

    #[error("transaction {transaction_hash:?} reverted sub-calls {failed:?}")]
    PartialFailure {
        transaction_hash: H256,
        failed: Vec<usize>,
    },
}

/// Accumulates operations and submits them as a single transaction.
///
/// Owned by one caller; wrap it in [`crate::SharedBatchQueue`] to share it
/// between tasks.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationQueue {
    operations: Vec<Operation>,
    last_error: Option<BatchError>,
    config: BatchConfig,
}

impl BatchOperationQueue {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            operations: Vec::new(),
            last_error: None,
            config,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Most recent error, cleared by `add_operation` and `clear_batch`.
    pub fn last_error(&self) -> Option<&BatchError> {
        self.last_error.as_ref()
    }

    /// Appends an operation. Validation is deferred to preview/execute.
    pub fn add_operation(&mut self, operation: Operation) {
        debug!(
            index = self.operations.len(),
            description = %operation.description,
            "Queued batch operation"
        );
        self.operations.push(operation);
        self.last_error = None;
    }

    pub fn remove_operation(&mut self, index: usize) -> Result<Operation, BatchError> {
        if index >= self.operations.len() {
            return Err(self.record(BatchError::IndexOutOfRange {
                index,
                len: self.operations.len(),
            }));
        }
        let removed = self.operations.remove(index);
        debug!(index, remaining = self.operations.len(), "Removed batch operation");
        Ok(removed)
    }

    /// Returns an owned copy of the queued operations, in insertion order.
    pub fn get_batch(&self) -> Vec<Operation> {
        self.operations.clone()
    }

    pub fn clear_batch(&mut self) {
        self.operations.clear();
        self.last_error = None;
    }

    /// Validates every operation and estimates the batch cost.
    ///
    /// All violations are collected; nothing short-circuits.
    pub fn preview_batch(&self) -> BatchPreview {
        let mut validation_errors = Vec::new();
        for (index, op) in self.operations.iter().enumerate() {
            if op.target.is_zero() {
                validation_errors.push(format!("operation {index}: target is the zero address"));
            }
            if op.payload.is_empty() {
                validation_errors.push(format!("operation {index}: payload is empty"));
            }
            if op.description.trim().is_empty() {
                validation_errors.push(format!("operation {index}: description is empty"));
            }
        }

        let count = self.operations.len();
        let estimated_gas_total = self
            .config
            .gas_per_operation
            .saturating_mul(U256::from(count as u64));

        let mut eligible_for_sponsorship = count > 0 && validation_errors.is_empty();
        if eligible_for_sponsorship {
            let violations = self
                .config
                .sponsorship
                .check(&self.operations, estimated_gas_total);
            for violation in &violations {
                debug!("Batch not sponsorable: {}", violation);
            }
            eligible_for_sponsorship = violations.is_empty();
        }

        BatchPreview {
            operations: self.operations.clone(),
            estimated_gas_total,
            eligible_for_sponsorship,
            validation_errors,
        }
    }

    /// Validates and submits the whole batch as one transaction.
    ///
    /// - Empty or invalid batches fail with an error and the submitter is not called.
    /// - A transport failure returns `succeeded: false` and keeps every operation.
    /// - Reverted sub-calls return `succeeded: false`; only the reverted
    ///   operations stay queued since the rest already landed.
    /// - Full success clears the queue.
    pub async fn execute_batch<S>(&mut self, submitter: &S) -> Result<BatchResult, BatchError>
    where
        S: ChainSubmitter + ?Sized,
    {
        if self.operations.is_empty() {
            return Err(self.record(BatchError::EmptyBatch));
        }

        let preview = self.preview_batch();
        if !preview.is_valid() {
            warn!(
                errors = preview.validation_errors.len(),
                "Batch failed validation, not submitting"
            );
            return Err(self.record(BatchError::Validation(preview.validation_errors)));
        }

        info!(
            submitter = submitter.name(),
            operations = self.operations.len(),
            estimated_gas = %preview.estimated_gas_total,
            sponsored = preview.eligible_for_sponsorship,
            "Submitting batch"
        );

        let receipt = match submitter.submit(&self.operations).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(
                    transient = e.is_transient(),
                    "Batch submission failed: {}. Operations kept for retry.", e
                );
                let result = BatchResult::failure(e.to_string());
                self.record(BatchError::Submission(e));
                return Ok(result);
            }
        };

        let failed = self.failed_indices(&receipt.failed_calls);
        if failed.is_empty() {
            info!(tx = ?receipt.transaction_hash, "Batch confirmed");
            self.clear_batch();
            return Ok(BatchResult::success(receipt.transaction_hash));
        }

        self.retain_failed(&failed);
        warn!(
            tx = ?receipt.transaction_hash,
            failed = ?failed,
            "Batch landed with reverted sub-calls"
        );
        let error = self.record(BatchError::PartialFailure {
            transaction_hash: receipt.transaction_hash,
            failed: failed.clone(),
        });

        Ok(BatchResult {
            succeeded: false,
            transaction_hash: Some(receipt.transaction_hash),
            error: Some(error.to_string()),
            failed_operation_indices: failed,
        })
    }

    /// Sorted, de-duplicated failure indices that name a queued operation.
    fn failed_indices(&self, failed_calls: &[usize]) -> Vec<usize> {
        let len = self.operations.len();
        let mut failed: Vec<usize> = failed_calls
            .iter()
            .copied()
            .filter(|&index| {
                let in_range = index < len;
                if !in_range {
                    warn!(index, len, "Receipt reported an unknown sub-call index");
                }
                in_range
            })
            .collect();
        failed.sort_unstable();
        failed.dedup();
        failed
    }

    /// Drops operations that landed and keeps the reverted ones in order.
    fn retain_failed(&mut self, failed: &[usize]) {
        let mut position = 0;
        self.operations.retain(|_| {
            let keep = failed.binary_search(&position).is_ok();
            position += 1;
            keep
        });
    }

    fn record(&mut self, error: BatchError) -> BatchError {
        self.last_error = Some(error.clone());
        error
    }
}

#[cfg(test)]
mod tests {
    use ethers_core::types::Address;

    use super::*;
    use crate::mock::MockChainSubmitter;
    use crate::policy::SponsorshipPolicy;

    fn op(n: u8) -> Operation {
        Operation::call(
            Address::repeat_byte(n),
            vec![0xab, n],
            format!("operation #{n}"),
        )
    }

    fn filled(n: u8) -> BatchOperationQueue {
        let mut queue = BatchOperationQueue::default();
        for i in 1..=n {
            queue.add_operation(op(i));
        }
        queue
    }

    #[test]
    fn keeps_insertion_order() {
        let queue = filled(4);
        let batch = queue.get_batch();
        assert_eq!(batch.len(), 4);
        assert_eq!(batch, vec![op(1), op(2), op(3), op(4)]);
    }

    #[test]
    fn snapshot_does_not_alias() {
        let queue = filled(2);
        let mut snapshot = queue.get_batch();
        snapshot.clear();
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn remove_out_of_range_records_error() {
        let mut queue = filled(2);
        let err = queue.remove_operation(2).unwrap_err();
        assert_eq!(err, BatchError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(queue.last_error(), Some(&err));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.remove_operation(0).unwrap(), op(1));
        assert_eq!(queue.get_batch(), vec![op(2)]);

        queue.add_operation(op(3));
        assert!(queue.last_error().is_none());
    }

    #[test]
    fn clear_resets_queue_and_error() {
        let mut queue = filled(3);
        let _ = queue.remove_operation(10);
        queue.clear_batch();
        assert!(queue.is_empty());
        assert!(queue.last_error().is_none());
    }

    #[test]
    fn preview_aggregates_all_violations() {
        let mut queue = BatchOperationQueue::default();
        queue.add_operation(Operation::call(Address::zero(), vec![1u8], "zero target"));
        queue.add_operation(Operation::call(Address::repeat_byte(1), Vec::<u8>::new(), "no payload"));
        queue.add_operation(Operation::call(Address::repeat_byte(2), vec![1u8], "  "));

        let preview = queue.preview_batch();
        assert_eq!(preview.validation_errors.len(), 3);
        assert!(preview.validation_errors[0].starts_with("operation 0:"));
        assert!(preview.validation_errors[1].starts_with("operation 1:"));
        assert!(preview.validation_errors[2].starts_with("operation 2:"));
        assert!(!preview.eligible_for_sponsorship);
    }

    #[test]
    fn preview_estimates_flat_gas() {
        let queue = filled(3);
        let preview = queue.preview_batch();
        assert!(preview.is_valid());
        assert_eq!(preview.estimated_gas_total, U256::from(150_000u64));
        assert!(preview.eligible_for_sponsorship);
        assert_eq!(preview.operations.len(), 3);
    }

    #[test]
    fn empty_preview_is_not_sponsorable() {
        let preview = BatchOperationQueue::default().preview_batch();
        assert!(preview.is_valid());
        assert_eq!(preview.estimated_gas_total, U256::zero());
        assert!(!preview.eligible_for_sponsorship);
    }

    #[test]
    fn policy_violation_only_blocks_sponsorship() {
        let config = BatchConfig::new(
            U256::from(50_000u64),
            SponsorshipPolicy::unrestricted().with_max_operations(2),
        );
        let mut queue = BatchOperationQueue::new(config);
        for i in 1..=3 {
            queue.add_operation(op(i));
        }

        let preview = queue.preview_batch();
        assert!(preview.is_valid());
        assert!(!preview.eligible_for_sponsorship);
    }

    #[tokio::test]
    async fn successful_execute_clears_queue() {
        let submitter = MockChainSubmitter::new();
        let mut queue = filled(3);

        let result = queue.execute_batch(&submitter).await.unwrap();
        assert!(result.succeeded);
        assert!(result.transaction_hash.is_some());
        assert!(result.error.is_none());
        assert!(queue.get_batch().is_empty());
        assert_eq!(submitter.submissions(), vec![vec![op(1), op(2), op(3)]]);
    }

    #[tokio::test]
    async fn empty_execute_never_submits() {
        let submitter = MockChainSubmitter::new();
        let mut queue = BatchOperationQueue::default();

        let err = queue.execute_batch(&submitter).await.unwrap_err();
        assert_eq!(err, BatchError::EmptyBatch);
        assert_eq!(submitter.call_count(), 0);
        assert_eq!(queue.last_error(), Some(&BatchError::EmptyBatch));
    }

    #[tokio::test]
    async fn invalid_execute_keeps_operations() {
        let submitter = MockChainSubmitter::new();
        let mut queue = filled(1);
        queue.add_operation(Operation::call(Address::zero(), Vec::<u8>::new(), ""));

        let err = queue.execute_batch(&submitter).await.unwrap_err();
        let BatchError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.starts_with("operation 1:")));
        assert_eq!(queue.len(), 2);
        assert_eq!(submitter.call_count(), 0);
    }

    #[tokio::test]
    async fn transport_failure_keeps_operations_for_retry() {
        let submitter = MockChainSubmitter::new();
        submitter.fail_next(TransportError::Network("connection reset".into()));
        let mut queue = filled(3);
        let before = queue.get_batch();

        let result = queue.execute_batch(&submitter).await.unwrap();
        assert!(!result.succeeded);
        assert!(result.transaction_hash.is_none());
        assert!(result.error.unwrap().contains("connection reset"));
        assert_eq!(queue.get_batch(), before);
        assert!(matches!(
            queue.last_error(),
            Some(BatchError::Submission(TransportError::Network(_)))
        ));

        let retry = queue.execute_batch(&submitter).await.unwrap();
        assert!(retry.succeeded);
        assert!(queue.is_empty());
        assert_eq!(submitter.call_count(), 2);
    }

    #[tokio::test]
    async fn reverted_sub_calls_stay_queued() {
        let submitter = MockChainSubmitter::new();
        submitter.revert_next(vec![2, 0, 9]);
        let mut queue = filled(4);

        let result = queue.execute_batch(&submitter).await.unwrap();
        assert!(!result.succeeded);
        assert!(result.transaction_hash.is_some());
        assert_eq!(result.failed_operation_indices, vec![0, 2]);
        assert_eq!(queue.get_batch(), vec![op(1), op(3)]);
        assert!(matches!(
            queue.last_error(),
            Some(BatchError::PartialFailure { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_sub_call_indices_count_as_success() {
        let submitter = MockChainSubmitter::new();
        submitter.revert_next(vec![9]);
        let mut queue = filled(4);

        let result = queue.execute_batch(&submitter).await.unwrap();
        assert!(result.succeeded);
        assert!(result.transaction_hash.is_some());
        assert!(result.failed_operation_indices.is_empty());
        assert!(queue.is_empty());
        assert!(queue.last_error().is_none());
    }
}
