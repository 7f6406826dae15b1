//! Drives the quiescent engine through the line protocol for several turns.

use chess_core::{Board, Color, Move};
use quiescent_engine::{EngineConfig, QuiescentEngine};
use turn_player::{run_session, Agent};

fn agent() -> Agent<QuiescentEngine> {
    let config = EngineConfig {
        max_depth: 2,
        ..EngineConfig::default()
    };
    Agent::new(QuiescentEngine::with_seed(config, 99), true)
}

#[test]
fn engine_answers_each_turn_with_a_legal_move() {
    let mut agent = agent();
    let script = "go white 60\nopponent e7e5\ngo white 59\nopponent b8c6\ngo white 58\nquit\n";
    let mut out = Vec::new();
    run_session(&mut agent, script.as_bytes(), &mut out).unwrap();

    let replies: Vec<Move> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| line.strip_prefix("bestmove ").unwrap().parse().unwrap())
        .collect();
    assert_eq!(replies.len(), 3);

    // Replay the whole game and check each of our moves was legal when played.
    let mut board = Board::startpos();
    let mut side = Color::White;
    for mv in agent.moves() {
        if side == Color::White {
            assert!(board.legal_moves(side).contains(mv), "{mv} illegal\n{board}");
        }
        board.make_move(*mv).unwrap();
        side = side.other();
    }
    assert_eq!(agent.moves().len(), 5);
    assert_eq!(board.state_key(), agent.board().state_key());
}

#[test]
fn engine_takes_hanging_queen_over_the_protocol() {
    let mut agent = agent();
    let script = "position k7/8/8/3q4/8/8/8/3RK3\ngo white 60\n";
    let mut out = Vec::new();
    run_session(&mut agent, script.as_bytes(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "bestmove d1d5\n");
}
