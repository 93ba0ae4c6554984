//! Level tiers and the difficulty parameters derived from them.
//!
//! Nothing here is stored: a [`LevelConfig`] is recomputed from the level
//! number whenever it is needed.

use strum::{Display, EnumIter};

use crate::error::{ErrorSeverity, GameError};

/// Side length of the square board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridSize {
    #[strum(to_string = "4x4")]
    Four,
    #[strum(to_string = "6x6")]
    Six,
    #[strum(to_string = "8x8")]
    Eight,
}

impl GridSize {
    /// Number of cards along one edge.
    pub const fn side(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Six => 6,
            Self::Eight => 8,
        }
    }

    /// Total number of cards on the board.
    pub const fn card_count(self) -> usize {
        self.side() * self.side()
    }

    /// Number of distinct symbols (pairs) the board needs.
    pub const fn pairs(self) -> usize {
        self.card_count() / 2
    }

    /// Maps a raw side length back to a grid size.
    pub const fn from_side(side: usize) -> Option<Self> {
        match side {
            4 => Some(Self::Four),
            6 => Some(Self::Six),
            8 => Some(Self::Eight),
            _ => None,
        }
    }
}

/// Star rating awarded for finishing a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StarRating {
    One = 1,
    Two = 2,
    Three = 3,
}

impl StarRating {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Level lookup errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("level {level} is outside the supported range {min}..={max}")]
    OutOfRange { level: u32, min: u32, max: u32 },
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "level_out_of_range",
        }
    }
}

/// Difficulty parameters for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelConfig {
    pub level: u32,
    pub grid_size: GridSize,
    pub time_limit_secs: u32,
    /// Moves at or under this count earn three stars.
    pub optimal_moves: u32,
    /// Moves at or under this count earn two stars.
    pub acceptable_moves: u32,
}

impl LevelConfig {
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 100;

    /// Last level of the 4x4 tier.
    pub const EASY_MAX_LEVEL: u32 = 25;
    /// Last level of the 6x6 tier.
    pub const MEDIUM_MAX_LEVEL: u32 = 60;

    /// Derives the configuration for `level`.
    ///
    /// Levels outside `MIN_LEVEL..=MAX_LEVEL` are rejected instead of being
    /// folded into the hardest tier.
    pub fn for_level(level: u32) -> Result<Self, LevelError> {
        if !(Self::MIN_LEVEL..=Self::MAX_LEVEL).contains(&level) {
            return Err(LevelError::OutOfRange {
                level,
                min: Self::MIN_LEVEL,
                max: Self::MAX_LEVEL,
            });
        }
        Ok(Self::tier(level))
    }

    /// Like [`LevelConfig::for_level`], but clamps into the supported range.
    pub fn clamped(level: u32) -> Self {
        Self::tier(level.clamp(Self::MIN_LEVEL, Self::MAX_LEVEL))
    }

    fn tier(level: u32) -> Self {
        let (grid_size, time_limit_secs, optimal_moves, acceptable_moves) = match level {
            ..=Self::EASY_MAX_LEVEL => (GridSize::Four, 60, 12, 16),
            ..=Self::MEDIUM_MAX_LEVEL => (GridSize::Six, 90, 24, 32),
            _ => (GridSize::Eight, 120, 40, 52),
        };
        Self {
            level,
            grid_size,
            time_limit_secs,
            optimal_moves,
            acceptable_moves,
        }
    }

    /// Rates a finished level by its move count.
    pub fn rate(&self, moves: u32) -> StarRating {
        if moves <= self.optimal_moves {
            StarRating::Three
        } else if moves <= self.acceptable_moves {
            StarRating::Two
        } else {
            StarRating::One
        }
    }

    pub fn is_within_time(&self, elapsed_secs: u32) -> bool {
        elapsed_secs <= self.time_limit_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn tiers_switch_at_boundaries() {
        let cases = [
            (1, GridSize::Four, 60, 12, 16),
            (25, GridSize::Four, 60, 12, 16),
            (26, GridSize::Six, 90, 24, 32),
            (60, GridSize::Six, 90, 24, 32),
            (61, GridSize::Eight, 120, 40, 52),
            (100, GridSize::Eight, 120, 40, 52),
        ];

        for (level, grid, time, optimal, acceptable) in cases {
            let config = LevelConfig::for_level(level).unwrap();
            assert_eq!(config.level, level);
            assert_eq!(config.grid_size, grid, "level {level}");
            assert_eq!(config.time_limit_secs, time);
            assert_eq!(config.optimal_moves, optimal);
            assert_eq!(config.acceptable_moves, acceptable);
        }
    }

    #[test]
    fn out_of_range_levels_are_rejected() {
        assert_eq!(
            LevelConfig::for_level(0),
            Err(LevelError::OutOfRange {
                level: 0,
                min: 1,
                max: 100
            })
        );
        let err = LevelConfig::for_level(101).unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "level_out_of_range");
    }

    #[test]
    fn clamped_pins_to_edges() {
        assert_eq!(LevelConfig::clamped(0).level, 1);
        assert_eq!(LevelConfig::clamped(500).level, 100);
        assert_eq!(LevelConfig::clamped(500).grid_size, GridSize::Eight);
    }

    #[test]
    fn rating_uses_move_thresholds() {
        let config = LevelConfig::for_level(1).unwrap();
        assert_eq!(config.rate(8), StarRating::Three);
        assert_eq!(config.rate(12), StarRating::Three);
        assert_eq!(config.rate(13), StarRating::Two);
        assert_eq!(config.rate(16), StarRating::Two);
        assert_eq!(config.rate(17), StarRating::One);
    }

    #[test]
    fn time_limit_is_inclusive() {
        let config = LevelConfig::for_level(30).unwrap();
        assert!(config.is_within_time(90));
        assert!(!config.is_within_time(91));
    }

    #[test]
    fn every_grid_has_whole_pairs() {
        for grid in GridSize::iter() {
            assert_eq!(grid.card_count() % 2, 0);
            assert_eq!(GridSize::from_side(grid.side()), Some(grid));
        }
        assert_eq!(GridSize::Eight.pairs(), 32);
        assert_eq!(GridSize::Six.to_string(), "6x6");
        assert_eq!(GridSize::from_side(5), None);
    }
}
