//! Mock chain submitter for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ethers_core::types::H256;

use crate::traits::{ChainSubmitter, TransportError};
use crate::types::{Operation, SubmissionReceipt};

/// Scripted outcome for one future `submit` call.
#[derive(Debug, Clone)]
enum Scripted {
    Fail(TransportError),
    Revert(Vec<usize>),
}

/// Mock submitter for testing without network.
///
/// Records every batch it receives and confirms it, unless an outcome was
/// scripted with [`MockChainSubmitter::fail_next`] or
/// [`MockChainSubmitter::revert_next`].
#[derive(Clone, Default)]
pub struct MockChainSubmitter {
    submissions: Arc<Mutex<Vec<Vec<Operation>>>>,
    script: Arc<Mutex<VecDeque<Scripted>>>,
}

impl MockChainSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next submission fail at the transport layer.
    pub fn fail_next(&self, error: TransportError) {
        self.script.lock().unwrap().push_back(Scripted::Fail(error));
    }

    /// Makes the next submission land with the given sub-calls reverted.
    pub fn revert_next(&self, failed_calls: Vec<usize>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Revert(failed_calls));
    }

    /// Every batch passed to `submit`, including failed attempts.
    pub fn submissions(&self) -> Vec<Vec<Operation>> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    fn next_tx_hash(count: usize) -> H256 {
        H256::from_low_u64_be(count as u64)
    }
}

#[async_trait]
impl ChainSubmitter for MockChainSubmitter {
    async fn submit(&self, operations: &[Operation]) -> Result<SubmissionReceipt, TransportError> {
        let count = {
            let mut submissions = self.submissions.lock().unwrap();
            submissions.push(operations.to_vec());
            submissions.len()
        };

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted::Fail(error)) => Err(error),
            Some(Scripted::Revert(failed_calls)) => Ok(SubmissionReceipt {
                transaction_hash: Self::next_tx_hash(count),
                failed_calls,
            }),
            None => Ok(SubmissionReceipt::confirmed(Self::next_tx_hash(count))),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
