//! Tests for the iterative-deepening driver: budgets, PV legality and
//! transposition-table carry-over.

use cozy_chess::Board;
use goshawk::eval::{LeafEvaluator, MaterialNet};
use goshawk::search::{
    iterative_search, search_to_depth, SearchControl, SearchLimits, MATE_BOUND,
};
use goshawk::transposition::TranspositionTable;
use goshawk::zobrist::ZOBRIST;

fn board(fen: &str) -> Board {
    fen.parse().expect("valid FEN")
}

const MIDGAME: &str = "5kr1/q4n2/2ppb3/4P3/1QP5/pP1BN3/P1K4R/8 b - - 2 42";

#[test]
fn depth_two_search_completes_with_legal_pv() {
    let root = board(MIDGAME);
    let mut tt = TranspositionTable::with_entry_count(1 << 16);
    let mut eval = LeafEvaluator::new(MaterialNet);
    let (score, pv) = search_to_depth(&root, &ZOBRIST, &mut tt, &mut eval, 2);

    assert!(score.abs() < MATE_BOUND, "no mate in this position: {score}");
    assert!(pv.len() <= 2, "PV cannot exceed the search depth");
    assert!(!pv.is_empty(), "a best move must be found");

    // Every PV move must be legal in the position it is played from.
    let mut position = root;
    for mv in &pv {
        let mut legal = false;
        position.generate_moves(|ml| {
            legal |= ml.into_iter().any(|m| m == *mv);
            legal
        });
        assert!(legal, "PV move {mv} is illegal in its position");
        position.play(*mv);
    }
}

#[test]
fn deeper_iterations_keep_reporting() {
    let root = Board::default();
    let mut tt = TranspositionTable::with_entry_count(1 << 16);
    let mut eval = LeafEvaluator::new(MaterialNet);
    let control = SearchControl::unbounded();
    let outcome = iterative_search(
        &root,
        &ZOBRIST,
        &mut tt,
        &mut eval,
        &control,
        &SearchLimits::depth(3),
    );

    assert_eq!(outcome.depth, 3, "all requested iterations completed");
    assert!(outcome.best_move().is_some());
    assert!(outcome.nodes > 0);
    assert!(
        outcome.score.abs() < 1000,
        "the starting position is roughly balanced: {}",
        outcome.score
    );
}

#[test]
fn node_cap_keeps_last_completed_iteration() {
    let root = board(MIDGAME);

    let mut tt = TranspositionTable::with_entry_count(1 << 16);
    let mut eval = LeafEvaluator::new(MaterialNet);
    let control = SearchControl::unbounded();
    let baseline = iterative_search(
        &root,
        &ZOBRIST,
        &mut tt,
        &mut eval,
        &control,
        &SearchLimits::depth(1),
    );

    // Enough budget for depth 1 but nowhere near depth 5.
    let limits = SearchLimits {
        depth: 5,
        max_nodes: Some(baseline.nodes * 2),
        movetime: None,
    };
    let mut tt = TranspositionTable::with_entry_count(1 << 16);
    let mut eval = LeafEvaluator::new(MaterialNet);
    let control = SearchControl::from_limits(&limits);
    let capped = iterative_search(&root, &ZOBRIST, &mut tt, &mut eval, &control, &limits);

    assert!(capped.depth < 5, "the cap must interrupt deepening");
    assert!(capped.depth >= 1, "the first iteration's result survives");
    assert!(
        capped.best_move().is_some(),
        "an interrupted search still recommends a move"
    );
}

#[test]
fn stop_request_halts_the_search() {
    let root = board(MIDGAME);
    let mut tt = TranspositionTable::with_entry_count(1 << 16);
    let mut eval = LeafEvaluator::new(MaterialNet);
    let control = SearchControl::unbounded();
    control.request_stop();

    let outcome = iterative_search(
        &root,
        &ZOBRIST,
        &mut tt,
        &mut eval,
        &control,
        &SearchLimits::depth(6),
    );
    assert_eq!(outcome.nodes, 0, "a pre-stopped search visits nothing");
    assert!(outcome.pv.is_empty());
}

#[test]
fn table_carry_over_prunes_the_second_search() {
    let root = board(MIDGAME);
    let mut tt = TranspositionTable::with_entry_count(1 << 16);

    let mut eval = LeafEvaluator::new(MaterialNet);
    let control = SearchControl::unbounded();
    let limits = SearchLimits::depth(3);
    let first = iterative_search(&root, &ZOBRIST, &mut tt, &mut eval, &control, &limits);
    let second = iterative_search(&root, &ZOBRIST, &mut tt, &mut eval, &control, &limits);

    assert_eq!(
        first.score, second.score,
        "carried-over entries must not change the answer"
    );
    assert!(
        second.nodes < first.nodes,
        "stored results prune the repeat search ({} vs {})",
        second.nodes,
        first.nodes
    );
}

#[test]
fn mate_stops_deepening_early() {
    let root = board("k7/8/1K6/8/8/8/8/7R w - - 0 1");
    let mut tt = TranspositionTable::with_entry_count(1 << 16);
    let mut eval = LeafEvaluator::new(MaterialNet);
    let control = SearchControl::unbounded();
    let outcome = iterative_search(
        &root,
        &ZOBRIST,
        &mut tt,
        &mut eval,
        &control,
        &SearchLimits::depth(8),
    );

    assert!(outcome.score >= MATE_BOUND, "mate in one must be found");
    assert!(
        outcome.depth < 8,
        "deepening stops once a mate score appears (stopped at {})",
        outcome.depth
    );
    assert_eq!(
        outcome.best_move().map(|m| m.to_string()).as_deref(),
        Some("h1h8")
    );
}
