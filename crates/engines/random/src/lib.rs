//! Random Move Chess Engine
//!
//! Selects moves uniformly at random from all legal moves. The quiescent
//! engine falls back on [`pick_random`] when its search produces nothing
//! usable, and self-play uses [`RandomEngine`] as a baseline opponent.

use chess_core::{Board, Color, Engine, Move, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};


/// Uniform pick from `moves`; `None` when the slice is empty.
pub fn pick_random<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Option<Move> {
    moves.choose(rng).copied()
}

/// A chess engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    nodes: u64,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            nodes: 0,
        }
    }

    /// Deterministic engine for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            nodes: 0,
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn choose_move(&mut self, board: &Board, side: Color, _limits: SearchLimits) -> SearchResult {
        let moves = board.legal_moves(side);
        self.nodes = 1;

        SearchResult {
            best_move: pick_random(&moves, &mut self.rng),
            score: 0,
            depth: 1,
            nodes: self.nodes,
            stopped: false,
            from_history: false,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
