//! Deterministic rules of the memory-matching game.
//!
//! `game-core` derives level difficulty, deals paired boards and tracks the
//! flip/match state of a level attempt. It is pure: randomness is injected by
//! the caller and no I/O happens here, so the same seed always replays the
//! same board.
pub mod board;
pub mod card;
pub mod config;
pub mod error;
pub mod game;
pub mod rng;
pub mod symbol;

pub use board::{Board, BoardError, fisher_yates, generate_board, generate_level_board};
pub use card::{Card, CardId, Symbol, SymbolId};
pub use config::{GridSize, LevelConfig, LevelError, StarRating};
pub use error::{ErrorSeverity, GameError};
pub use game::{FlipError, FlipOutcome, LevelCompletion, MemoryGame};
pub use rng::{PcgRng, level_rng, level_seed};
pub use symbol::default_catalog;
