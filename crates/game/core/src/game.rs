//! Flip/match state machine for one level attempt.
//!
//! A move is two flips. Matched pairs stay face up; a mismatched pair stays
//! visible until the next flip (or [`MemoryGame::hide_mismatched`]) turns it
//! back over.

use crate::board::Board;
use crate::card::Card;
use crate::config::{LevelConfig, StarRating};
use crate::error::{ErrorSeverity, GameError};

/// Errors raised by [`MemoryGame::flip`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlipError {
    #[error("card index {index} out of range (board has {len} cards)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("card {index} is already matched")]
    AlreadyMatched { index: usize },

    #[error("card {index} is already face up")]
    AlreadyFaceUp { index: usize },

    #[error("level is already complete")]
    GameOver,
}

impl GameError for FlipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyFaceUp { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "flip_index_out_of_range",
            Self::AlreadyMatched { .. } => "flip_already_matched",
            Self::AlreadyFaceUp { .. } => "flip_already_face_up",
            Self::GameOver => "flip_game_over",
        }
    }
}

/// What a single flip did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlipOutcome {
    /// First card of a move is now face up.
    FirstFlipped { index: usize },
    /// Second card matched the first.
    Matched { first: usize, second: usize },
    /// Second card did not match; both stay up until the next flip.
    Mismatched { first: usize, second: usize },
    /// Last pair matched.
    Completed { moves: u32, stars: StarRating },
}

/// Summary of a finished level, ready to be saved on-chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelCompletion {
    pub level: u32,
    pub moves: u32,
    pub elapsed_secs: u32,
    pub stars: StarRating,
}

#[derive(Clone, Debug)]
pub struct MemoryGame {
    config: LevelConfig,
    board: Board,
    /// Face-up card waiting for its partner.
    pending: Option<usize>,
    /// Mismatched pair still on display.
    mismatched: Option<(usize, usize)>,
    moves: u32,
    matched_pairs: usize,
}

impl MemoryGame {
    pub fn new(config: LevelConfig, board: Board) -> Self {
        Self {
            config,
            board,
            pending: None,
            mismatched: None,
            moves: 0,
            matched_pairs: 0,
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn cards(&self) -> &[Card] {
        self.board.cards()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> usize {
        self.board.len() / 2
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs()
    }

    /// Turns a displayed mismatch back face down.
    pub fn hide_mismatched(&mut self) {
        if let Some((first, second)) = self.mismatched.take() {
            let cards = self.board.cards_mut();
            cards[first].is_face_up = false;
            cards[second].is_face_up = false;
        }
    }

    pub fn flip(&mut self, index: usize) -> Result<FlipOutcome, FlipError> {
        if self.is_complete() {
            return Err(FlipError::GameOver);
        }
        let len = self.board.len();
        if index >= len {
            return Err(FlipError::IndexOutOfRange { index, len });
        }

        // A card in the displayed mismatch is about to be hidden, so it may be flipped again.
        let hiding = self
            .mismatched
            .is_some_and(|(first, second)| index == first || index == second);
        let card = &self.board.cards()[index];
        if card.is_matched {
            return Err(FlipError::AlreadyMatched { index });
        }
        if card.is_face_up && !hiding {
            return Err(FlipError::AlreadyFaceUp { index });
        }

        self.hide_mismatched();
        self.board.cards_mut()[index].is_face_up = true;

        let Some(first) = self.pending.take() else {
            self.pending = Some(index);
            return Ok(FlipOutcome::FirstFlipped { index });
        };

        self.moves += 1;
        let cards = self.board.cards_mut();
        if cards[first].pairs_with(&cards[index]) {
            cards[first].is_matched = true;
            cards[index].is_matched = true;
            self.matched_pairs += 1;

            if self.is_complete() {
                return Ok(FlipOutcome::Completed {
                    moves: self.moves,
                    stars: self.config.rate(self.moves),
                });
            }
            Ok(FlipOutcome::Matched {
                first,
                second: index,
            })
        } else {
            self.mismatched = Some((first, index));
            Ok(FlipOutcome::Mismatched {
                first,
                second: index,
            })
        }
    }

    /// Returns the level summary once every pair is matched.
    pub fn completion(&self, elapsed_secs: u32) -> Option<LevelCompletion> {
        self.is_complete().then(|| LevelCompletion {
            level: self.config.level,
            moves: self.moves,
            elapsed_secs,
            stars: self.config.rate(self.moves),
        })
    }
}
