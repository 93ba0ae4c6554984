//! Cards and the symbols printed on them.

use std::fmt;

/// Identifier of a symbol in the catalog (e.g. `"anchor"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolId(pub String);

impl SymbolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A face design that can be dealt onto a pair of cards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    pub id: SymbolId,
    pub label: String,
}

impl Symbol {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: SymbolId::new(id),
            label: label.into(),
        }
    }
}

/// Unique identifier of a single card instance on a board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardId(pub String);

impl CardId {
    /// Builds the id of the `serial`-th card dealt onto a board.
    pub fn from_serial(serial: usize) -> Self {
        Self(format!("card-{serial}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: CardId,
    pub symbol_id: SymbolId,
    pub is_face_up: bool,
    pub is_matched: bool,
}

impl Card {
    /// Creates a face-down, unmatched card.
    pub fn face_down(id: CardId, symbol_id: SymbolId) -> Self {
        Self {
            id,
            symbol_id,
            is_face_up: false,
            is_matched: false,
        }
    }

    /// True when this card shares a symbol with `other` but is a different instance.
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.symbol_id == other.symbol_id
    }
}
