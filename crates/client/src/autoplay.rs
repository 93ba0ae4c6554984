//! Headless player with perfect memory.
//!
//! It remembers every symbol it has seen. When it already knows both cards of
//! a pair it takes them; otherwise it explores the lowest unseen card and
//! pairs it with a remembered partner when it can.

use std::collections::HashMap;

use anyhow::{Result, bail};
use game_core::{FlipOutcome, MemoryGame, SymbolId};

#[derive(Debug, Default)]
pub struct AutoPlayer {
    seen: HashMap<usize, SymbolId>,
}

impl AutoPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays until every pair is matched and returns the move count.
    pub fn play(&mut self, game: &mut MemoryGame) -> Result<u32> {
        // Each move either matches a pair or reveals at least one new card.
        let max_moves = game.cards().len() * 2;

        for _ in 0..max_moves {
            let (first, second) = self.choose(game)?;
            self.flip(game, first)?;
            let second = match second {
                Some(index) => index,
                None => self.follow_up(game, first)?,
            };

            match self.flip(game, second)? {
                FlipOutcome::Completed { moves, stars } => {
                    tracing::debug!(moves, %stars, "Level cleared");
                    return Ok(moves);
                }
                FlipOutcome::Matched { first, second } => {
                    self.seen.remove(&first);
                    self.seen.remove(&second);
                }
                _ => {}
            }
        }
        bail!("auto-player did not finish within {max_moves} moves")
    }

    fn flip(&mut self, game: &mut MemoryGame, index: usize) -> Result<FlipOutcome> {
        let outcome = game.flip(index)?;
        self.seen
            .insert(index, game.cards()[index].symbol_id.clone());
        Ok(outcome)
    }

    /// Picks a remembered pair, or the next card to explore.
    fn choose(&self, game: &MemoryGame) -> Result<(usize, Option<usize>)> {
        if let Some(pair) = self.known_pair() {
            return Ok((pair.0, Some(pair.1)));
        }
        let unseen = self.next_unseen(game, None)?;
        Ok((unseen, None))
    }

    /// After exploring `first`, take its remembered partner or explore again.
    fn follow_up(&self, game: &MemoryGame, first: usize) -> Result<usize> {
        let symbol = &game.cards()[first].symbol_id;
        let partner = self
            .seen
            .iter()
            .find(|&(&index, seen)| index != first && seen == symbol)
            .map(|(&index, _)| index);
        match partner {
            Some(index) => Ok(index),
            None => self.next_unseen(game, Some(first)),
        }
    }

    fn known_pair(&self) -> Option<(usize, usize)> {
        let mut by_symbol: HashMap<&SymbolId, usize> = HashMap::new();
        let mut indices: Vec<_> = self.seen.keys().copied().collect();
        indices.sort_unstable();
        for index in indices {
            let symbol = &self.seen[&index];
            if let Some(&other) = by_symbol.get(symbol) {
                return Some((other, index));
            }
            by_symbol.insert(symbol, index);
        }
        None
    }

    fn next_unseen(&self, game: &MemoryGame, skip: Option<usize>) -> Result<usize> {
        game.cards()
            .iter()
            .enumerate()
            .position(|(index, card)| {
                !card.is_matched && Some(index) != skip && !self.seen.contains_key(&index)
            })
            .ok_or_else(|| anyhow::anyhow!("no unseen card left to explore"))
    }
}
