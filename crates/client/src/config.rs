//! Client configuration structures and loaders.
use std::env;

use client_blockchain_core::Address;
use game_core::LevelConfig;

/// Configuration for a headless play session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub start_level: u32,
    pub level_count: u32,
    pub game_seed: u64,
    pub attempt: u32,
    /// Progress contract; when unset, completed levels are not queued.
    pub progress_contract: Option<Address>,
}

impl ClientConfig {
    pub const fn new(start_level: u32, level_count: u32, game_seed: u64) -> Self {
        Self {
            start_level,
            level_count,
            game_seed,
            attempt: 0,
            progress_contract: None,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MEMORY_LEVEL` - First level to play (default: 1)
    /// - `MEMORY_LEVEL_COUNT` - Number of consecutive levels (default: 1)
    /// - `MEMORY_GAME_SEED` - Seed for board replay (default: 0)
    /// - `MEMORY_ATTEMPT` - Attempt number mixed into the seed (default: 0)
    /// - `PROGRESS_CONTRACT_ADDRESS` - Hex address of the progress contract
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(level) = read_env::<u32>("MEMORY_LEVEL") {
            config.start_level = level;
        }
        if let Some(count) = read_env::<u32>("MEMORY_LEVEL_COUNT") {
            config.level_count = count.max(1);
        }
        if let Some(seed) = read_env::<u64>("MEMORY_GAME_SEED") {
            config.game_seed = seed;
        }
        if let Some(attempt) = read_env::<u32>("MEMORY_ATTEMPT") {
            config.attempt = attempt;
        }

        config.progress_contract = match env::var("PROGRESS_CONTRACT_ADDRESS") {
            Ok(raw) => match raw.trim().parse::<Address>() {
                Ok(address) => Some(address),
                Err(e) => {
                    tracing::warn!("Invalid PROGRESS_CONTRACT_ADDRESS {}: {}", raw, e);
                    None
                }
            },
            Err(_) => None,
        };

        config
    }

    /// Levels this session plays, stopping at the last supported level.
    pub fn levels(&self) -> std::ops::Range<u32> {
        let end = self
            .start_level
            .saturating_add(self.level_count)
            .min(LevelConfig::MAX_LEVEL + 1);
        self.start_level..end
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(LevelConfig::MIN_LEVEL, 1, 0)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_stop_at_max_level() {
        let config = ClientConfig::new(98, 5, 0);
        assert_eq!(config.levels().collect::<Vec<_>>(), vec![98, 99, 100]);
    }

    #[test]
    fn default_plays_first_level_once() {
        let config = ClientConfig::default();
        assert_eq!(config.levels().collect::<Vec<_>>(), vec![1]);
        assert!(config.progress_contract.is_none());
    }
}
