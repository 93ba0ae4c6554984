//! Built-in symbol catalog.
//!
//! The catalog carries one entry per pair on the largest board, so any level
//! can be dealt from it.

use crate::card::Symbol;
use crate::config::GridSize;

const CATALOG: [(&str, &str); 32] = [
    ("anchor", "Anchor"),
    ("apple", "Apple"),
    ("bell", "Bell"),
    ("bolt", "Bolt"),
    ("book", "Book"),
    ("cactus", "Cactus"),
    ("camera", "Camera"),
    ("castle", "Castle"),
    ("cloud", "Cloud"),
    ("comet", "Comet"),
    ("compass", "Compass"),
    ("crown", "Crown"),
    ("diamond", "Diamond"),
    ("dolphin", "Dolphin"),
    ("drum", "Drum"),
    ("feather", "Feather"),
    ("flame", "Flame"),
    ("gear", "Gear"),
    ("globe", "Globe"),
    ("guitar", "Guitar"),
    ("heart", "Heart"),
    ("key", "Key"),
    ("leaf", "Leaf"),
    ("lighthouse", "Lighthouse"),
    ("moon", "Moon"),
    ("mushroom", "Mushroom"),
    ("owl", "Owl"),
    ("planet", "Planet"),
    ("rocket", "Rocket"),
    ("shell", "Shell"),
    ("star", "Star"),
    ("sun", "Sun"),
];

/// Returns the full built-in catalog in a stable order.
pub fn default_catalog() -> Vec<Symbol> {
    CATALOG
        .iter()
        .map(|(id, label)| Symbol::new(*id, *label))
        .collect()
}

/// Number of symbols the largest board consumes.
pub const fn max_pairs() -> usize {
    GridSize::Eight.pairs()
}
