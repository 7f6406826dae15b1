use super::*;
use random_engine::RandomEngine;

fn session(script: &str) -> (Agent<RandomEngine>, String) {
    let mut agent = Agent::new(RandomEngine::with_seed(7), true);
    let mut out = Vec::new();
    run_session(&mut agent, script.as_bytes(), &mut out).unwrap();
    (agent, String::from_utf8(out).unwrap())
}

#[test]
fn test_parse_commands() {
    assert_eq!(Command::parse("   "), Ok(None));
    assert_eq!(
        Command::parse("position 4k3/8/8/8/8/8/8/4K2R w - - 0 1"),
        Ok(Some(Command::Position(
            "4k3/8/8/8/8/8/8/4K2R w - - 0 1".to_string()
        )))
    );
    assert_eq!(
        Command::parse("opponent e7e5"),
        Ok(Some(Command::Opponent("e7e5".parse().unwrap())))
    );
    assert_eq!(
        Command::parse("go black 12.5"),
        Ok(Some(Command::Go {
            side: Color::Black,
            clock: Duration::from_millis(12_500),
        }))
    );
    assert_eq!(Command::parse("quit"), Ok(Some(Command::Quit)));
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        Command::parse("castle"),
        Err(ProtocolError::UnknownCommand("castle".to_string()))
    );
    assert!(matches!(
        Command::parse("go white"),
        Err(ProtocolError::MissingArgument { command: "go", .. })
    ));
    assert!(matches!(
        Command::parse("go purple 10"),
        Err(ProtocolError::Chess(ChessError::InvalidColor { .. }))
    ));
    assert_eq!(
        Command::parse("go white -3"),
        Err(ProtocolError::InvalidClock("-3".to_string()))
    );
    assert!(matches!(
        Command::parse("opponent e9e4"),
        Err(ProtocolError::Chess(_))
    ));
}

#[test]
fn test_go_replies_with_a_legal_move() {
    let (agent, out) = session("go white 30\nquit\n");
    let reply = out.trim();
    let text = reply.strip_prefix("bestmove ").unwrap();
    let mv: Move = text.parse().unwrap();
    assert!(chess_core::Board::startpos()
        .legal_moves(Color::White)
        .contains(&mv));
    assert_eq!(agent.moves(), &[mv]);
}

#[test]
fn test_opponent_then_go() {
    let (agent, out) = session("opponent e2e4\ngo black 30\n");
    assert!(out.starts_with("bestmove "));
    assert_eq!(agent.moves().len(), 2);
    assert_eq!(agent.moves()[0], "e2e4".parse().unwrap());
}

#[test]
fn test_mated_side_answers_none() {
    let (_, out) = session(
        "position r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR\ngo black 30\n",
    );
    assert_eq!(out, "bestmove none\n");
}

#[test]
fn test_bad_line_is_reported_and_session_continues() {
    let (_, out) = session("hello\nboard\n");
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("error unknown command 'hello'"));
    assert_eq!(lines.next(), Some("  a b c d e f g h"));
}

#[test]
fn test_bad_placement_ends_session() {
    let mut agent = Agent::new(RandomEngine::with_seed(8), true);
    let err = run_session(&mut agent, "position 8/8/8\ngo white 5\n".as_bytes(), Vec::new())
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Position(ChessError::MalformedPlacement { .. })
    ));
}

#[test]
fn test_newgame_resets_board() {
    let (agent, _) = session("opponent e2e4\nnewgame\n");
    assert!(agent.moves().is_empty());
    assert!(agent.board().piece_at("e2".parse().unwrap()).is_some());
}
