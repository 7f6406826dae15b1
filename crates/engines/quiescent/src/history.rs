//! History heuristic: moves that caused cutoffs earn a score that persists
//! across turns.

use std::collections::HashMap;

use chess_core::Move;

/// Cutoff scores keyed by move.
///
/// A move's first recorded cutoff only creates its entry at zero; later
/// cutoffs add `2^remaining_depth`, so shallow-rooted cutoffs weigh more.
#[derive(Debug, Clone, Default)]
pub struct HistoryTable {
    scores: HashMap<Move, i64>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, mv: Move) -> Option<i64> {
        self.scores.get(&mv).copied()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.scores.contains_key(&mv)
    }

    /// Adds `increment` to an existing entry, or creates the entry at zero.
    pub fn insert_or_increment(&mut self, mv: Move, increment: i64) {
        self.scores
            .entry(mv)
            .and_modify(|score| *score = score.saturating_add(increment))
            .or_insert(0);
    }

    /// Rewards `mv` for a cutoff with `remaining_depth` plies left below it.
    pub fn record_cutoff(&mut self, mv: Move, remaining_depth: u32) {
        self.insert_or_increment(mv, 1i64 << remaining_depth.min(62));
    }

    /// The candidate with a strictly positive score above every other
    /// candidate's, if there is exactly one.
    pub fn best_unique_positive(&self, candidates: &[Move]) -> Option<Move> {
        let mut best: Option<(Move, i64)> = None;
        let mut tied = false;
        for &mv in candidates {
            let Some(score) = self.score(mv) else {
                continue;
            };
            if score <= 0 {
                continue;
            }
            match best {
                Some((_, top)) if score < top => {}
                Some((_, top)) if score == top => tied = true,
                _ => {
                    best = Some((mv, score));
                    tied = false;
                }
            }
        }
        if tied {
            None
        } else {
            best.map(|(mv, _)| mv)
        }
    }

    /// Entries ordered by ascending score (ties by move).
    pub fn sorted(&self) -> Vec<(Move, i64)> {
        let mut entries: Vec<(Move, i64)> = self.scores.iter().map(|(m, s)| (*m, *s)).collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
