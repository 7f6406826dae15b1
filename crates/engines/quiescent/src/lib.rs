//! Quiescent Chess Engine
//!
//! Time-boxed iterative-deepening minimax with alpha-beta pruning. Search
//! keeps going past the nominal depth until the side to move is quiescent,
//! reuses values through a transposition table, and replays moves the
//! history table has come to favour.

pub mod config;
pub mod history;
pub mod quiescence;
pub mod search;
pub mod transposition;

use chess_core::{Board, Color, Engine, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use random_engine::pick_random;
use tracing::{info, warn};

pub use config::{ConfigError, EngineConfig};
pub use history::HistoryTable;
pub use quiescence::{is_quiescent, quiescence_score};
pub use search::{Searcher, SearchState, Timeout, INFINITY};
pub use transposition::{TableEntry, TranspositionTable};

/// Engine state that lives for a whole game: configuration and the
/// history and transposition tables.
#[derive(Debug, Clone)]
pub struct QuiescentEngine {
    config: EngineConfig,
    history: HistoryTable,
    table: TranspositionTable,
    rng: StdRng,
    nodes: u64,
}

impl QuiescentEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            history: HistoryTable::new(),
            table: TranspositionTable::new(),
            rng: StdRng::from_entropy(),
            nodes: 0,
        }
    }

    /// Seeds the random fallback so games can be replayed.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryTable {
        &mut self.history
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }
}

impl Default for QuiescentEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine for QuiescentEngine {
    fn choose_move(&mut self, board: &Board, side: Color, limits: SearchLimits) -> SearchResult {
        self.nodes = 0;

        let moves = board.legal_moves(side);
        if moves.is_empty() {
            return SearchResult::no_move();
        }

        if self.config.history_short_circuit {
            if let Some(mv) = self.history.best_unique_positive(&moves) {
                info!(%mv, score = ?self.history.score(mv), "replaying move from history");
                return SearchResult {
                    best_move: Some(mv),
                    score: 0,
                    depth: 0,
                    nodes: 0,
                    stopped: false,
                    from_history: true,
                };
            }
        }

        let budget = limits.turn_budget(self.config.time_fraction);
        let max_depth = limits.max_depth.min(self.config.max_depth).max(1);

        let mut searcher = Searcher::new(
            side,
            &self.config,
            &mut self.history,
            &mut self.table,
            budget,
        );
        let outcome = searcher.iterative_deepening(board, &moves, max_depth);
        self.nodes = searcher.nodes();
        let elapsed = searcher.elapsed();

        let best_move = match outcome.best_move {
            Some(mv) => Some(mv),
            None => {
                warn!(
                    depth = outcome.depth,
                    timed_out = outcome.timed_out,
                    "no move reproduced the root value, playing a random legal move"
                );
                pick_random(&moves, &mut self.rng)
            }
        };

        info!(
            best = ?best_move,
            score = outcome.value,
            depth = outcome.depth,
            nodes = self.nodes,
            elapsed_ms = elapsed.as_millis() as u64,
            "move chosen"
        );

        SearchResult {
            best_move,
            score: outcome.value,
            depth: outcome.depth,
            nodes: self.nodes,
            stopped: outcome.timed_out,
            from_history: false,
        }
    }

    fn name(&self) -> &str {
        "Quiescent v1.0"
    }

    fn new_game(&mut self) {
        self.history.clear();
        self.table.clear();
        self.nodes = 0;
    }
}
