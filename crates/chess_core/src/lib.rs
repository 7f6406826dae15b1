pub mod board;
pub mod error;
pub mod eval;
pub mod legality;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::ChessError;
pub use eval::{evaluate, material};
pub use movegen::{attacked_destinations, movable_destinations};
pub use perft::perft;
pub use time_control::*;
pub use types::*;

// =============================================================================
// Engine trait: implemented by the quiescent and random engines
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The move to play (None if the side to move has no legal moves)
    pub best_move: Option<Move>,
    /// Minimax value of the chosen line from the mover's perspective
    pub score: i32,
    /// Deepest fully completed iterative-deepening pass
    pub depth: u32,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the turn budget cut the search short
    pub stopped: bool,
    /// Whether the move came straight from the history table
    pub from_history: bool,
}

impl SearchResult {
    /// A result for a side with nothing to play.
    pub fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
            from_history: false,
        }
    }
}

/// Trait that all chess engines must implement.
///
/// Engines receive the authoritative board read-only and choose one move for
/// `side`; applying it is the caller's job.
pub trait Engine {
    /// Choose a move for `side` within the given limits.
    fn choose_move(&mut self, board: &Board, side: Color, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for logs and game records
    fn name(&self) -> &str;

    /// Reset internal state for a new game (clear history, transpositions, etc.)
    fn new_game(&mut self) {}
}
