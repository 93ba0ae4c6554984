//! Batched chain calls for saving game progress.
//!
//! # Architecture
//!
//! ```text
//! SharedBatchQueue (single-flight, lock-guarded handle)
//!          └── BatchOperationQueue (add / remove / preview / execute)
//!                   ├── SponsorshipPolicy (paymaster eligibility)
//!                   └── ChainSubmitter (wallet / RPC boundary)
//! ```
//!
//! The queue owns its operations and never touches the network itself; the
//! submitter is injected per execution.
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_core::{BatchOperationQueue, DryRunSubmitter, ProgressContract};
//!
//! let mut queue = BatchOperationQueue::default();
//! queue.add_operation(contract.save_progress(&completion));
//! let preview = queue.preview_batch();
//! let result = queue.execute_batch(&DryRunSubmitter::new()).await?;
//! ```

pub mod batch;
pub mod config;
pub mod dry_run;
pub mod policy;
pub mod progress;
pub mod shared;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use batch::{BatchError, BatchOperationQueue};
pub use config::BatchConfig;
pub use dry_run::DryRunSubmitter;
pub use policy::{PolicyViolation, SponsorshipPolicy};
pub use progress::{COMPLETE_LEVEL_SIGNATURE, ProgressContract};
pub use shared::SharedBatchQueue;
pub use traits::{ChainSubmitter, TransportError};
pub use types::{BatchPreview, BatchResult, Operation, SubmissionReceipt};

// EVM primitives used throughout the public API
pub use ethers_core::types::{Address, Bytes, H256, U256};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockChainSubmitter;
