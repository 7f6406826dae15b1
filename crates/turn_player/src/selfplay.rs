//! Self-play: the quiescent engine against itself or the random engine,
//! each side with its own game clock.

use std::time::{Duration, Instant};

use chess_core::{Board, ChessError, Color, Engine, Move, SearchLimits};
use clap::ValueEnum;
use quiescent_engine::{EngineConfig, QuiescentEngine};
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    Quiescent,
    Random,
}

/// Settings for one self-play game.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Plies to play before stopping (a game may end sooner)
    pub max_plies: usize,
    /// Engine playing Black; White is always the quiescent engine
    pub opponent: OpponentKind,
    /// Starting clock for each side
    pub clock: Duration,
    pub placement: String,
    pub seed: Option<u64>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_plies: 40,
            opponent: OpponentKind::Quiescent,
            clock: Duration::from_secs(60),
            placement: chess_core::START_PLACEMENT.to_string(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameOutcome {
    Checkmate { winner: Color },
    /// The side to move had no legal move without being in check
    NoMoves { side: Color },
    PlyLimit,
}

/// A finished game, as written out after self-play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub start_placement: String,
    pub moves: Vec<Move>,
    pub final_key: String,
    pub outcome: GameOutcome,
}

/// Plays one game and returns its record.
pub fn play_game(
    config: &SelfPlayConfig,
    engine_config: &EngineConfig,
) -> Result<GameRecord, ChessError> {
    let mut white = quiescent(engine_config, config.seed);
    let mut black: Box<dyn Engine> = match config.opponent {
        OpponentKind::Quiescent => {
            Box::new(quiescent(engine_config, config.seed.map(|s| s ^ 1)))
        }
        OpponentKind::Random => Box::new(match config.seed {
            Some(seed) => RandomEngine::with_seed(seed ^ 1),
            None => RandomEngine::new(),
        }),
    };

    let mut board = Board::from_placement(&config.placement)?
        .with_castling_rook_hop(engine_config.relocate_castling_rook);
    let mut clocks = [config.clock; 2];
    let mut moves = Vec::new();
    let mut side = Color::White;

    let outcome = loop {
        if moves.len() >= config.max_plies {
            break GameOutcome::PlyLimit;
        }

        board.recompute_attacked_squares(side);
        let engine: &mut dyn Engine = match side {
            Color::White => &mut white,
            Color::Black => black.as_mut(),
        };
        let started = Instant::now();
        let result = engine.choose_move(&board, side, SearchLimits::clock(clocks[side.idx()]));
        clocks[side.idx()] = clocks[side.idx()].saturating_sub(started.elapsed());

        let Some(mv) = result.best_move else {
            break if board.is_in_checkmate(side) {
                GameOutcome::Checkmate {
                    winner: side.other(),
                }
            } else {
                GameOutcome::NoMoves { side }
            };
        };

        debug!(ply = moves.len() + 1, %side, %mv, depth = result.depth, "selfplay move");
        board.make_move(mv)?;
        moves.push(mv);
        side = side.other();
    };

    info!(plies = moves.len(), ?outcome, "selfplay finished");
    Ok(GameRecord {
        white: white.name().to_string(),
        black: black.name().to_string(),
        start_placement: config.placement.clone(),
        moves,
        final_key: board.state_key(),
        outcome,
    })
}

fn quiescent(config: &EngineConfig, seed: Option<u64>) -> QuiescentEngine {
    match seed {
        Some(seed) => QuiescentEngine::with_seed(config.clone(), seed),
        None => QuiescentEngine::new(config.clone()),
    }
}

#[cfg(test)]
#[path = "selfplay_tests.rs"]
mod selfplay_tests;
