//! Gas sponsorship policy.
//!
//! A paymaster only covers batches that stay inside its limits. Violations
//! never fail a preview; they only make the batch ineligible for
//! sponsorship, so the user can still pay gas themselves.

use std::collections::HashSet;

use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::types::Operation;

/// Reason a batch falls outside the sponsorship policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    #[error("batch has {count} operations, sponsor allows {max}")]
    TooManyOperations { count: usize, max: usize },

    #[error("estimated gas {estimated} exceeds sponsor limit {max}")]
    GasLimitExceeded { estimated: U256, max: U256 },

    #[error("operation {index}: value {value} exceeds sponsor limit {max}")]
    ValueTooHigh { index: usize, value: U256, max: U256 },

    #[error("operation {index}: target {target:?} is not on the sponsor allow-list")]
    TargetNotAllowed { index: usize, target: Address },
}

/// Limits a paymaster applies before sponsoring a batch.
///
/// Every limit is optional; [`SponsorshipPolicy::default`] accepts any batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorshipPolicy {
    pub max_operations: Option<usize>,
    pub max_gas: Option<U256>,
    pub max_value_per_call: Option<U256>,
    pub allowed_targets: Option<HashSet<Address>>,
}

impl SponsorshipPolicy {
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn with_max_operations(mut self, max: usize) -> Self {
        self.max_operations = Some(max);
        self
    }

    pub fn with_max_gas(mut self, max: U256) -> Self {
        self.max_gas = Some(max);
        self
    }

    pub fn with_max_value_per_call(mut self, max: U256) -> Self {
        self.max_value_per_call = Some(max);
        self
    }

    pub fn allow_target(mut self, target: Address) -> Self {
        self.allowed_targets
            .get_or_insert_with(HashSet::new)
            .insert(target);
        self
    }

    /// Collects every way the batch breaks this policy.
    pub fn check(&self, operations: &[Operation], estimated_gas: U256) -> Vec<PolicyViolation> {
        let mut violations = Vec::new();

        if let Some(max) = self.max_operations.filter(|&max| operations.len() > max) {
            violations.push(PolicyViolation::TooManyOperations {
                count: operations.len(),
                max,
            });
        }

        if let Some(max) = self.max_gas.filter(|&max| estimated_gas > max) {
            violations.push(PolicyViolation::GasLimitExceeded {
                estimated: estimated_gas,
                max,
            });
        }

        for (index, op) in operations.iter().enumerate() {
            if let Some(max) = self.max_value_per_call.filter(|&max| op.value > max) {
                violations.push(PolicyViolation::ValueTooHigh {
                    index,
                    value: op.value,
                    max,
                });
            }
            let allowed = self.allowed_targets.as_ref();
            if allowed.is_some_and(|allowed| !allowed.contains(&op.target)) {
                violations.push(PolicyViolation::TargetNotAllowed {
                    index,
                    target: op.target,
                });
            }
        }

        violations
    }
}
