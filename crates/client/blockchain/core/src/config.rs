//! Batch queue configuration and loaders.
use std::env;

use ethers_core::types::{Address, U256};

use crate::policy::SponsorshipPolicy;

/// Tunables for [`crate::BatchOperationQueue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Flat gas charged per queued operation in previews.
    pub gas_per_operation: U256,

    pub sponsorship: SponsorshipPolicy,
}

impl BatchConfig {
    pub const DEFAULT_GAS_PER_OPERATION: u64 = 50_000;

    pub fn new(gas_per_operation: U256, sponsorship: SponsorshipPolicy) -> Self {
        Self {
            gas_per_operation,
            sponsorship,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATCH_GAS_PER_OPERATION` - Gas per operation in previews (default: 50000)
    /// - `SPONSOR_MAX_OPERATIONS` - Largest batch a sponsor covers (default: unlimited)
    /// - `SPONSOR_MAX_GAS` - Gas ceiling for sponsored batches (default: unlimited)
    /// - `SPONSOR_MAX_VALUE_WEI` - Per-call value ceiling in wei (default: unlimited)
    /// - `SPONSOR_ALLOWED_TARGETS` - Comma-separated allow-list of target addresses
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(gas) = read_env::<u64>("BATCH_GAS_PER_OPERATION") {
            config.gas_per_operation = U256::from(gas);
        }

        let policy = &mut config.sponsorship;
        policy.max_operations = read_env::<usize>("SPONSOR_MAX_OPERATIONS");
        policy.max_gas = read_env::<u64>("SPONSOR_MAX_GAS").map(U256::from);
        policy.max_value_per_call = read_env::<u64>("SPONSOR_MAX_VALUE_WEI").map(U256::from);

        if let Ok(list) = env::var("SPONSOR_ALLOWED_TARGETS") {
            let targets = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| match s.parse::<Address>() {
                    Ok(address) => Some(address),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid sponsor target address: {}", s);
                        None
                    }
                })
                .collect();
            policy.allowed_targets = Some(targets);
        }

        config
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(
            U256::from(Self::DEFAULT_GAS_PER_OPERATION),
            SponsorshipPolicy::default(),
        )
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
