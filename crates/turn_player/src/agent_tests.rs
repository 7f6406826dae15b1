use super::*;
use random_engine::RandomEngine;

fn mv(text: &str) -> Move {
    text.parse().unwrap()
}

#[test]
fn test_turn_applies_and_records_move() {
    let mut agent = Agent::new(RandomEngine::with_seed(1), true);
    let legal = agent.board().legal_moves(Color::White);

    let result = agent.take_turn(Color::White, Duration::from_secs(60)).unwrap();

    let played = result.best_move.unwrap();
    assert!(legal.contains(&played));
    assert_eq!(agent.moves(), &[played]);
    assert!(agent.board().is_empty(played.from));
}

#[test]
fn test_opponent_move_needs_a_piece_on_origin() {
    let mut agent = Agent::new(RandomEngine::with_seed(2), true);
    assert!(agent.observe_opponent(mv("e2e4")).unwrap());
    assert!(!agent.observe_opponent(mv("e2e4")).unwrap());
    assert_eq!(agent.moves(), &[mv("e2e4")]);
}

#[test]
fn test_set_position_rejects_bad_placement() {
    let mut agent = Agent::new(RandomEngine::with_seed(3), true);
    assert!(agent.set_position("8/8/8/8/8/8/8/4K2Z").is_err());
    // The previous board survives a failed load.
    assert_eq!(agent.board().piece_count(Color::White), 16);

    agent.set_position("4k3/8/8/8/8/8/8/4K2R").unwrap();
    assert_eq!(agent.board().piece_count(Color::White), 2);
    assert!(agent.moves().is_empty());
}

#[test]
fn test_rook_hop_setting_carries_to_new_boards() {
    let mut agent = Agent::new(RandomEngine::with_seed(4), false);
    agent.set_position("4k3/8/8/8/8/8/8/4K2R").unwrap();
    assert!(!agent.board().relocates_castling_rook());

    agent.new_game();
    assert!(!agent.board().relocates_castling_rook());
    assert_eq!(agent.board().piece_count(Color::Black), 16);
}

#[test]
fn test_no_move_when_mated() {
    let mut agent = Agent::new(RandomEngine::with_seed(5), true);
    agent
        .set_position("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR")
        .unwrap();
    let result = agent.take_turn(Color::Black, Duration::from_secs(10)).unwrap();
    assert!(result.best_move.is_none());
    assert!(agent.moves().is_empty());
}
