//! Transposition table keyed by the board's placement string.

use std::collections::HashMap;

use chess_core::Move;

/// What the search learned about one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    /// Remaining search depth below the node when the value was stored
    pub depth: u32,
    /// Value from the root player's point of view
    pub value: i32,
    /// The move that produced the cutoff, tried first on a shallower revisit
    pub best_move: Option<Move>,
}

/// Keys ignore side to move and castling state, so positions that render
/// identically share an entry.
#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<String, TableEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&TableEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Overwrites any previous entry for `key`.
    pub fn insert(&mut self, key: String, entry: TableEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
