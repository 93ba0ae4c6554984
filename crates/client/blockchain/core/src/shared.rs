//! Queue handle shared between tasks.
//!
//! Every call takes the queue lock, so an `add_operation` racing an in-flight
//! execution lands after it finishes and is never submitted half-way. A
//! second `execute_batch` while one is running is rejected instead of
//! queueing a duplicate submission.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::batch::{BatchError, BatchOperationQueue};
use crate::config::BatchConfig;
use crate::traits::ChainSubmitter;
use crate::types::{BatchPreview, BatchResult, Operation};

#[derive(Clone, Default)]
pub struct SharedBatchQueue {
    queue: Arc<Mutex<BatchOperationQueue>>,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag even if the execute future is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SharedBatchQueue {
    pub fn new(config: BatchConfig) -> Self {
        Self::from_queue(BatchOperationQueue::new(config))
    }

    pub fn from_queue(queue: BatchOperationQueue) -> Self {
        Self {
            queue: Arc::new(Mutex::new(queue)),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_executing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn add_operation(&self, operation: Operation) {
        self.queue.lock().await.add_operation(operation);
    }

    pub async fn remove_operation(&self, index: usize) -> Result<Operation, BatchError> {
        self.queue.lock().await.remove_operation(index)
    }

    pub async fn get_batch(&self) -> Vec<Operation> {
        self.queue.lock().await.get_batch()
    }

    pub async fn clear_batch(&self) {
        self.queue.lock().await.clear_batch();
    }

    pub async fn preview_batch(&self) -> BatchPreview {
        self.queue.lock().await.preview_batch()
    }

    pub async fn last_error(&self) -> Option<BatchError> {
        self.queue.lock().await.last_error().cloned()
    }

    /// Single-flight execute: a concurrent second call fails fast.
    ///
    /// The queue lock is held for the whole in-flight execution, so
    /// `ExecutionInFlight` is returned without touching the queue and never
    /// shows up in [`SharedBatchQueue::last_error`].
    pub async fn execute_batch<S>(&self, submitter: &S) -> Result<BatchResult, BatchError>
    where
        S: ChainSubmitter + ?Sized,
    {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("Rejected concurrent batch execution");
            return Err(BatchError::ExecutionInFlight);
        }
        let _guard = InFlightGuard(self.in_flight.as_ref());

        self.queue.lock().await.execute_batch(submitter).await
    }
}
