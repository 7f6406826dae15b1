use super::*;

fn board(placement: &str) -> Board {
    Board::from_placement(placement).unwrap()
}

fn quiet_config() -> EngineConfig {
    EngineConfig {
        history_short_circuit: false,
        ..EngineConfig::default()
    }
}

struct Tables {
    history: HistoryTable,
    table: TranspositionTable,
}

impl Tables {
    fn new() -> Self {
        Self {
            history: HistoryTable::new(),
            table: TranspositionTable::new(),
        }
    }
}

#[test]
fn test_checkmated_root_is_not_expanded() {
    let mated = board("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR");
    let config = quiet_config();
    let mut tables = Tables::new();
    let mut searcher = Searcher::new(
        Color::Black,
        &config,
        &mut tables.history,
        &mut tables.table,
        None,
    );

    let pass = searcher.search_depth(&mated, &[], 3).unwrap();
    assert_eq!(pass.value, -1);
    assert_eq!(pass.best_move, None);
    assert_eq!(searcher.nodes(), 1);
}

#[test]
fn test_captures_hanging_queen() {
    let position = board("k7/8/8/3q4/8/8/8/3RK3");
    let moves = position.legal_moves(Color::White);
    let config = quiet_config();
    let mut tables = Tables::new();
    let mut searcher = Searcher::new(
        Color::White,
        &config,
        &mut tables.history,
        &mut tables.table,
        None,
    );

    let pass = searcher.search_depth(&position, &moves, 1).unwrap();
    assert_eq!(pass.best_move, Some("d1d5".parse().unwrap()));
    assert_eq!(pass.value, 5);
}

#[test]
fn test_recursion_limit_evaluates_directly() {
    // Black's queen hangs, so ply 1 is not quiescent; the ply cap stops it.
    let position = board("k7/8/8/3q4/8/8/8/3RK3");
    let moves = position.legal_moves(Color::White);
    let config = EngineConfig {
        max_recursion_depth: 1,
        ..quiet_config()
    };
    let mut tables = Tables::new();
    let mut searcher = Searcher::new(
        Color::White,
        &config,
        &mut tables.history,
        &mut tables.table,
        None,
    );

    searcher.search_depth(&position, &moves, 1).unwrap();
    // Root and each child once, then the matching scan over the children.
    let n = moves.len() as u64;
    assert!(searcher.nodes() > 1 + n);
    assert!(searcher.nodes() <= 1 + 2 * n);
    assert!(tables.table.is_empty());
}

#[test]
fn test_stored_value_is_reused_at_sufficient_depth() {
    let position = Board::startpos();
    let moves = position.legal_moves(Color::White);
    let config = quiet_config();
    let mut tables = Tables::new();
    tables.table.insert(
        position.state_key(),
        TableEntry {
            depth: 5,
            value: 42,
            best_move: None,
        },
    );
    let mut searcher = Searcher::new(
        Color::White,
        &config,
        &mut tables.history,
        &mut tables.table,
        None,
    );

    let pass = searcher.search_depth(&position, &moves, 2).unwrap();
    assert_eq!(pass.value, 42);
    // Material is level two plies out, so no root move reproduces 42.
    assert_eq!(pass.best_move, None);
}

#[test]
fn test_shallow_entry_orders_its_move_first() {
    let position = board("k7/8/8/3q4/8/8/8/3RK3");
    let capture: Move = "d1d5".parse().unwrap();
    let moves = position.legal_moves(Color::White);
    assert_ne!(moves[0], capture);
    let config = quiet_config();

    let mut plain = Tables::new();
    let plain_nodes = {
        let mut searcher = Searcher::new(
            Color::White,
            &config,
            &mut plain.history,
            &mut plain.table,
            None,
        );
        assert_eq!(searcher.max_value(&position, 0, 1, -INFINITY, 5), Ok(5));
        searcher.nodes()
    };

    let mut tables = Tables::new();
    tables.table.insert(
        position.state_key(),
        TableEntry {
            depth: 0,
            value: 0,
            best_move: Some(capture),
        },
    );
    let nodes = {
        let mut searcher = Searcher::new(
            Color::White,
            &config,
            &mut tables.history,
            &mut tables.table,
            None,
        );
        assert_eq!(searcher.max_value(&position, 0, 1, -INFINITY, 5), Ok(5));
        searcher.nodes()
    };

    // Root plus the capture, which fails high at once.
    assert_eq!(nodes, 2);
    assert!(plain_nodes > nodes);
    let entry = tables.table.get(&position.state_key()).unwrap();
    assert_eq!(entry.depth, 1);
    assert_eq!(entry.value, 5);
    assert_eq!(entry.best_move, Some(capture));
}

#[test]
fn test_cutoffs_fill_both_tables() {
    let position = Board::startpos();
    let moves = position.legal_moves(Color::White);
    let config = quiet_config();
    let mut tables = Tables::new();
    {
        let mut searcher = Searcher::new(
            Color::White,
            &config,
            &mut tables.history,
            &mut tables.table,
            None,
        );
        let pass = searcher.search_depth(&position, &moves, 2).unwrap();
        assert_eq!(pass.value, 0);
        assert!(pass.best_move.is_some_and(|mv| moves.contains(&mv)));
    }

    assert!(!tables.table.is_empty());
    assert!(!tables.history.is_empty());
    let after_e2e4 = position.after("e2e4".parse().unwrap()).unwrap();
    let black_replies = after_e2e4.legal_moves(Color::Black);
    if let Some(entry) = tables.table.get(&after_e2e4.state_key()) {
        let mv = entry.best_move.expect("cutoff entries carry their move");
        assert!(black_replies.contains(&mv));
    }
}

#[test]
fn test_zero_budget_times_out_immediately() {
    let position = Board::startpos();
    let moves = position.legal_moves(Color::White);
    let config = quiet_config();
    let mut tables = Tables::new();
    let mut searcher = Searcher::new(
        Color::White,
        &config,
        &mut tables.history,
        &mut tables.table,
        Some(Duration::ZERO),
    );

    assert_eq!(searcher.search_depth(&position, &moves, 1), Err(Timeout));

    let outcome = searcher.iterative_deepening(&position, &moves, 4);
    assert!(outcome.timed_out);
    assert_eq!(outcome.depth, 0);
    assert_eq!(outcome.best_move, None);
}

#[test]
fn test_interrupted_pass_keeps_previous_depth() {
    let position = board("k7/8/8/3q4/8/8/8/3RK3");
    let moves = position.legal_moves(Color::White);
    let config = quiet_config();

    let mut first = Tables::new();
    let depth_one_nodes = {
        let mut searcher = Searcher::new(
            Color::White,
            &config,
            &mut first.history,
            &mut first.table,
            None,
        );
        let outcome = searcher.iterative_deepening(&position, &moves, 1);
        assert_eq!(outcome.depth, 1);
        searcher.nodes()
    };

    // Room for the whole first pass and one node of the second.
    let mut tables = Tables::new();
    let mut searcher = Searcher::new(
        Color::White,
        &config,
        &mut tables.history,
        &mut tables.table,
        None,
    )
    .with_node_limit(depth_one_nodes + 1);

    let outcome = searcher.iterative_deepening(&position, &moves, 4);
    assert!(outcome.timed_out);
    assert_eq!(outcome.depth, 1);
    assert_eq!(outcome.best_move, Some("d1d5".parse().unwrap()));
    assert_eq!(outcome.value, 5);
    assert_eq!(searcher.nodes(), depth_one_nodes + 1);
}

#[test]
fn test_deepening_stops_at_max_depth() {
    let position = board("k7/8/8/3q4/8/8/8/3RK3");
    let moves = position.legal_moves(Color::White);
    let config = quiet_config();
    let mut tables = Tables::new();
    let mut searcher = Searcher::new(
        Color::White,
        &config,
        &mut tables.history,
        &mut tables.table,
        None,
    );

    let outcome = searcher.iterative_deepening(&position, &moves, 2);
    assert!(!outcome.timed_out);
    assert_eq!(outcome.depth, 2);
    assert_eq!(outcome.best_move, Some("d1d5".parse().unwrap()));
}

#[test]
fn test_prediction_without_clock_never_overruns() {
    let config = quiet_config();
    let mut tables = Tables::new();
    let searcher = Searcher::new(
        Color::White,
        &config,
        &mut tables.history,
        &mut tables.table,
        None,
    );
    assert!(!searcher.next_pass_overruns(
        Duration::from_secs(100),
        Some(Duration::from_millis(1))
    ));
}

#[test]
fn test_prediction_scales_by_growth_ratio() {
    let config = quiet_config();
    let mut tables = Tables::new();
    let searcher = Searcher::new(
        Color::White,
        &config,
        &mut tables.history,
        &mut tables.table,
        Some(Duration::from_secs(60)),
    );
    // 2s after 1s predicts 4s next: fits in a minute.
    assert!(!searcher.next_pass_overruns(
        Duration::from_secs(2),
        Some(Duration::from_secs(1))
    ));
    // 20s after 2s predicts 200s next: does not.
    assert!(searcher.next_pass_overruns(
        Duration::from_secs(20),
        Some(Duration::from_secs(2))
    ));
}
