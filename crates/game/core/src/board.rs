//! Board generation: pick symbols, deal pairs, shuffle positions.

use rand::Rng;

use crate::card::{Card, CardId, Symbol};
use crate::config::{GridSize, LevelConfig, LevelError};
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while dealing a board.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("insufficient symbols: board needs {required}, pool has {available}")]
    InsufficientSymbols { required: usize, available: usize },

    #[error(transparent)]
    Level(#[from] LevelError),
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientSymbols { .. } => ErrorSeverity::Fatal,
            Self::Level(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientSymbols { .. } => "insufficient_symbols",
            Self::Level(err) => err.error_code(),
        }
    }
}

/// A dealt board, cards in row-major position order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    grid_size: GridSize,
    cards: Vec<Card>,
}

impl Board {
    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub(crate) fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }
}

/// In-place Fisher-Yates shuffle.
///
/// Walks from the last index down to 1 and swaps each slot with a uniformly
/// chosen index in `0..=i`, so every permutation is equally likely.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Deals a shuffled board of face-down pairs.
///
/// Symbols are chosen uniformly without replacement from `symbols`; the
/// resulting cards are then shuffled a second time to randomize positions.
/// Fails without producing a partial board when the pool is too small.
pub fn generate_board<R: Rng + ?Sized>(
    grid_size: GridSize,
    symbols: &[Symbol],
    rng: &mut R,
) -> Result<Board, BoardError> {
    let card_count = grid_size.card_count();
    debug_assert!(card_count % 2 == 0, "board must hold whole pairs");
    let pairs_needed = card_count / 2;

    if symbols.len() < pairs_needed {
        return Err(BoardError::InsufficientSymbols {
            required: pairs_needed,
            available: symbols.len(),
        });
    }

    let mut pool: Vec<&Symbol> = symbols.iter().collect();
    fisher_yates(&mut pool, rng);

    let mut cards = Vec::with_capacity(card_count);
    for symbol in &pool[..pairs_needed] {
        for _ in 0..2 {
            let id = CardId::from_serial(cards.len());
            cards.push(Card::face_down(id, symbol.id.clone()));
        }
    }

    fisher_yates(&mut cards, rng);

    Ok(Board { grid_size, cards })
}

/// Looks up the level tier, then deals its board.
pub fn generate_level_board<R: Rng + ?Sized>(
    level: u32,
    symbols: &[Symbol],
    rng: &mut R,
) -> Result<(LevelConfig, Board), BoardError> {
    let config = LevelConfig::for_level(level)?;
    let board = generate_board(config.grid_size, symbols, rng)?;
    Ok((config, board))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::symbol::default_catalog;

    fn symbols(count: usize) -> Vec<Symbol> {
        (0..count)
            .map(|i| Symbol::new(format!("sym-{i}"), format!("Symbol {i}")))
            .collect()
    }

    #[test]
    fn fisher_yates_keeps_every_element() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut values: Vec<u32> = (0..64).collect();
        fisher_yates(&mut values, &mut rng);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn fisher_yates_handles_tiny_slices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = Vec::new();
        fisher_yates(&mut empty, &mut rng);
        let mut single = vec![9];
        fisher_yates(&mut single, &mut rng);
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn fisher_yates_reaches_every_permutation_of_three() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..6000 {
            let mut items = vec![0u8, 1, 2];
            fisher_yates(&mut items, &mut rng);
            *seen.entry(items).or_default() += 1;
        }
        assert_eq!(seen.len(), 6);
        // Expected 1000 each; a biased shuffle drifts far outside this band.
        for count in seen.values() {
            assert!((800..1200).contains(count), "skewed count {count}");
        }
    }

    #[test]
    fn exact_pool_uses_every_symbol() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = symbols(8);
        let board = generate_board(GridSize::Four, &pool, &mut rng).unwrap();

        let mut counts: HashMap<_, usize> = HashMap::new();
        for card in board.cards() {
            *counts.entry(card.symbol_id.clone()).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&c| c == 2));
    }

    #[test]
    fn insufficient_pool_is_fatal() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = generate_board(GridSize::Six, &symbols(17), &mut rng).unwrap_err();
        assert_eq!(
            err,
            BoardError::InsufficientSymbols {
                required: 18,
                available: 17
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.error_code(), "insufficient_symbols");
    }

    #[test]
    fn level_board_follows_tier() {
        let mut rng = StdRng::seed_from_u64(11);
        let (config, board) = generate_level_board(40, &default_catalog(), &mut rng).unwrap();
        assert_eq!(config.grid_size, GridSize::Six);
        assert_eq!(board.len(), 36);
        assert_eq!(board.grid_size(), GridSize::Six);
    }

    #[test]
    fn level_board_rejects_unknown_level() {
        let mut rng = StdRng::seed_from_u64(11);
        let err = generate_level_board(0, &default_catalog(), &mut rng).unwrap_err();
        assert!(matches!(err, BoardError::Level(LevelError::OutOfRange { .. })));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }
}
