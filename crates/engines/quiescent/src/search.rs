//! Depth-limited minimax with alpha-beta pruning and a quiescence-gated
//! cutoff, driven by a time-boxed iterative-deepening loop.

use std::time::Duration;

use chess_core::{evaluate, Board, Color, Move, TimeControl};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::history::HistoryTable;
use crate::quiescence::is_quiescent;
use crate::transposition::{TableEntry, TranspositionTable};

/// Score bound used for the initial window and for nodes without moves.
pub const INFINITY: i32 = 99_999_999;

/// The turn budget ran out; unwinds the whole pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout;

/// Outcome of one complete pass at a fixed depth limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassResult {
    /// Root minimax value, from the root player's point of view
    pub value: i32,
    /// First root move whose own subtree reproduces `value`
    pub best_move: Option<Move>,
}

/// Iterative-deepening progress for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching(u32),
    TimedOut,
    Done(Option<Move>),
}

/// What the deepening loop settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeepeningResult {
    /// Move of the deepest completed pass; `None` means no pass produced one
    pub best_move: Option<Move>,
    pub value: i32,
    /// Deepest completed depth (0 if none finished)
    pub depth: u32,
    pub timed_out: bool,
}

/// One turn's search. Borrows the long-lived tables from the engine so they
/// survive across turns.
pub struct Searcher<'a> {
    root: Color,
    config: &'a EngineConfig,
    history: &'a mut HistoryTable,
    table: &'a mut TranspositionTable,
    clock: TimeControl,
    nodes: u64,
    node_limit: Option<u64>,
}

impl<'a> Searcher<'a> {
    pub fn new(
        root: Color,
        config: &'a EngineConfig,
        history: &'a mut HistoryTable,
        table: &'a mut TranspositionTable,
        budget: Option<Duration>,
    ) -> Self {
        let mut clock = TimeControl::new(budget);
        clock.start();
        Self {
            root,
            config,
            history,
            table,
            clock,
            nodes: 0,
            node_limit: None,
        }
    }

    /// Stops the turn once `limit` nodes have been entered, the same way an
    /// exhausted clock does.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Deepens from depth 1 until `max_depth`, the budget, or the predicted
    /// cost of the next pass says to stop.
    ///
    /// A pass interrupted by the clock is discarded and the previous pass's
    /// move stands.
    pub fn iterative_deepening(
        &mut self,
        board: &Board,
        moves: &[Move],
        max_depth: u32,
    ) -> DeepeningResult {
        let mut state = SearchState::Idle;
        let mut completed = DeepeningResult {
            best_move: None,
            value: 0,
            depth: 0,
            timed_out: false,
        };
        let mut previous_pass: Option<Duration> = None;

        loop {
            state = match state {
                SearchState::Idle => SearchState::Searching(1),
                SearchState::Searching(depth) => {
                    let pass_start = self.clock.elapsed();
                    match self.search_depth(board, moves, depth) {
                        Err(Timeout) => SearchState::TimedOut,
                        Ok(pass) => {
                            let took = self.clock.elapsed().saturating_sub(pass_start);
                            completed.best_move = pass.best_move;
                            completed.value = pass.value;
                            completed.depth = depth;
                            debug!(
                                depth,
                                value = pass.value,
                                best = ?pass.best_move,
                                nodes = self.nodes,
                                took_ms = took.as_millis() as u64,
                                "depth completed"
                            );

                            if depth >= max_depth || self.next_pass_overruns(took, previous_pass) {
                                SearchState::Done(completed.best_move)
                            } else {
                                previous_pass = Some(took);
                                SearchState::Searching(depth + 1)
                            }
                        }
                    }
                }
                SearchState::TimedOut => {
                    completed.timed_out = true;
                    debug!(depth = completed.depth, "turn budget spent mid-pass");
                    SearchState::Done(completed.best_move)
                }
                SearchState::Done(best_move) => {
                    completed.best_move = best_move;
                    return completed;
                }
            };
        }
    }

    /// Forecasts the next pass as this pass's duration scaled by its growth
    /// over the previous one.
    fn next_pass_overruns(&self, took: Duration, previous: Option<Duration>) -> bool {
        let Some(limit) = self.clock.time_limit() else {
            return false;
        };
        let elapsed = self.clock.elapsed();
        if elapsed >= limit {
            return true;
        }
        let predicted = match previous {
            Some(prev) if !prev.is_zero() => {
                took.mul_f64(took.as_secs_f64() / prev.as_secs_f64())
            }
            _ => took,
        };
        elapsed + predicted > limit
    }

    /// One full pass at `depth_limit`: the root value, then the first root
    /// move whose subtree reproduces it.
    pub fn search_depth(
        &mut self,
        board: &Board,
        moves: &[Move],
        depth_limit: u32,
    ) -> Result<PassResult, Timeout> {
        let value = self.max_value(board, 0, depth_limit, -INFINITY, INFINITY)?;

        for &mv in moves {
            let Ok(child) = board.after(mv) else {
                continue;
            };
            let score = self.min_value(&child, 1, depth_limit, -INFINITY, INFINITY)?;
            if score == value {
                return Ok(PassResult {
                    value,
                    best_move: Some(mv),
                });
            }
        }

        Ok(PassResult {
            value,
            best_move: None,
        })
    }

    fn max_value(
        &mut self,
        board: &Board,
        ply: u32,
        depth_limit: u32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<i32, Timeout> {
        let frame = match self.enter(board, self.root, ply, depth_limit)? {
            Node::Leaf(value) => return Ok(value),
            Node::Expand(frame) => frame,
        };

        let mut value = -INFINITY;
        for mv in frame.moves {
            let Ok(child) = board.after(mv) else {
                continue;
            };
            value = value.max(self.min_value(&child, ply + 1, depth_limit, alpha, beta)?);
            if value >= beta {
                self.record_cutoff(frame.key, mv, value, frame.remaining);
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    fn min_value(
        &mut self,
        board: &Board,
        ply: u32,
        depth_limit: u32,
        alpha: i32,
        mut beta: i32,
    ) -> Result<i32, Timeout> {
        let frame = match self.enter(board, self.root.other(), ply, depth_limit)? {
            Node::Leaf(value) => return Ok(value),
            Node::Expand(frame) => frame,
        };

        let mut value = INFINITY;
        for mv in frame.moves {
            let Ok(child) = board.after(mv) else {
                continue;
            };
            value = value.min(self.max_value(&child, ply + 1, depth_limit, alpha, beta)?);
            if value <= alpha {
                self.record_cutoff(frame.key, mv, value, frame.remaining);
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }

    /// Shared node prologue: clock, transposition lookup, recursion limit,
    /// cutoff test, then move ordering.
    fn enter(
        &mut self,
        board: &Board,
        mover: Color,
        ply: u32,
        depth_limit: u32,
    ) -> Result<Node, Timeout> {
        if self.node_limit.is_some_and(|limit| self.nodes >= limit) {
            self.clock.stop();
        }
        if self.clock.check_time() {
            return Err(Timeout);
        }
        self.nodes += 1;

        let remaining = depth_limit.saturating_sub(ply);
        let key = board.state_key();
        let mut priority = None;
        if let Some(entry) = self.table.get(&key) {
            if entry.depth >= remaining {
                return Ok(Node::Leaf(entry.value));
            }
            priority = entry.best_move;
        }

        if ply >= self.config.max_recursion_depth {
            trace!(ply, "recursion limit reached, evaluating directly");
            return Ok(Node::Leaf(evaluate(board, self.root)));
        }
        if self.cutoff(board, mover, ply, depth_limit) {
            return Ok(Node::Leaf(evaluate(board, self.root)));
        }

        let mut moves = board.legal_moves(mover);
        if let Some(first) = priority {
            if let Some(idx) = moves.iter().position(|&m| m == first) {
                let mv = moves.remove(idx);
                moves.insert(0, mv);
            }
        }

        Ok(Node::Expand(Frame {
            key,
            remaining,
            moves,
        }))
    }

    /// Stop at checkmate for either side, or at/after the depth limit once
    /// the side to move is quiescent.
    fn cutoff(&self, board: &Board, mover: Color, ply: u32, depth_limit: u32) -> bool {
        if board.is_in_checkmate(Color::White) || board.is_in_checkmate(Color::Black) {
            return true;
        }
        ply >= depth_limit && is_quiescent(board, mover, self.config.quiescence_threshold)
    }

    fn record_cutoff(&mut self, key: String, mv: Move, value: i32, remaining: u32) {
        self.history.record_cutoff(mv, remaining);
        self.table.insert(
            key,
            TableEntry {
                depth: remaining,
                value,
                best_move: Some(mv),
            },
        );
    }
}

enum Node {
    Leaf(i32),
    Expand(Frame),
}

struct Frame {
    key: String,
    remaining: u32,
    moves: Vec<Move>,
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
