//! The per-turn agent.

use std::time::Duration;

use chess_core::{Board, ChessError, Color, Engine, Move, SearchLimits, SearchResult};
use tracing::{debug, info};

/// Owns the authoritative board, the engine (and with it the long-lived
/// search tables), and the moves played so far.
pub struct Agent<E: Engine> {
    board: Board,
    engine: E,
    moves: Vec<Move>,
    relocate_castling_rook: bool,
}

impl<E: Engine> Agent<E> {
    pub fn new(engine: E, relocate_castling_rook: bool) -> Self {
        Self {
            board: Board::startpos().with_castling_rook_hop(relocate_castling_rook),
            engine,
            moves: Vec::new(),
            relocate_castling_rook,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Replaces the board. The engine's tables are kept.
    pub fn set_position(&mut self, placement: &str) -> Result<(), ChessError> {
        self.board =
            Board::from_placement(placement)?.with_castling_rook_hop(self.relocate_castling_rook);
        self.moves.clear();
        Ok(())
    }

    /// Start position, empty history and fresh engine tables.
    pub fn new_game(&mut self) {
        self.board = Board::startpos().with_castling_rook_hop(self.relocate_castling_rook);
        self.moves.clear();
        self.engine.new_game();
    }

    /// Applies the opponent's last move if a piece stands on its origin.
    /// Returns whether the move was applied.
    pub fn observe_opponent(&mut self, mv: Move) -> Result<bool, ChessError> {
        if self.board.is_empty(mv.from) {
            debug!(%mv, "opponent move has no piece on its origin, ignoring");
            return Ok(false);
        }
        self.board.make_move(mv)?;
        self.moves.push(mv);
        Ok(true)
    }

    /// Searches for `side`, applies the chosen move and records it.
    pub fn take_turn(
        &mut self,
        side: Color,
        clock_remaining: Duration,
    ) -> Result<SearchResult, ChessError> {
        self.board.recompute_attacked_squares(side);
        let result = self
            .engine
            .choose_move(&self.board, side, SearchLimits::clock(clock_remaining));

        if let Some(mv) = result.best_move {
            self.board.make_move(mv)?;
            self.moves.push(mv);
            info!(%side, %mv, ply = self.moves.len(), "played");
        } else {
            info!(%side, "no legal move");
        }
        Ok(result)
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod agent_tests;
