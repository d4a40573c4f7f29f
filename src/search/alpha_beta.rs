//! Recursive negamax alpha-beta with PV search, null-move pruning and
//! transposition-table probe/store.
//!
//! The node pipeline, in order: transposition probe, horizon check
//! (quiescence), ply ceiling, draw check, null-move probe, ordered move
//! loop with principal-variation search, then a bounded store of the
//! result. Scores are always from the side to move's perspective; a
//! child is searched with the negated, swapped window and its score is
//! negated on return.

use cozy_chess::Move;

use crate::eval::{LeafEvaluator, NnueNetwork};
use crate::stack::SearchStack;
use crate::transposition::{Bound, TranspositionTable};
use crate::zobrist::ZobristKeys;

use super::iterative_deepening::SearchControl;
use super::ordering::{capture_priority, order_moves};
use super::quiescence::quiescence_search;
use super::{MAX_PLY, MIN_EVAL, NARROW_WINDOW, NULL_MOVE_REDUCTION};

/// Searches the position on top of `stack` to `depth` plies within the
/// `(alpha, beta)` window. `ply` is the distance from the root; `pv`
/// receives the principal variation found below this node.
///
/// The stack depth on return equals the depth on entry.
#[allow(clippy::too_many_arguments)]
pub fn alpha_beta_search<N: NnueNetwork>(
    stack: &mut SearchStack,
    zobrist: &ZobristKeys,
    tt: &mut TranspositionTable,
    eval: &mut LeafEvaluator<N>,
    control: &SearchControl,
    depth: i32,
    mut alpha: i32,
    beta: i32,
    ply: i32,
    pv: &mut Vec<Move>,
) -> i32 {
    // Cancellation hook. The driver discards the interrupted iteration,
    // so the sentinel value never reaches a caller that trusts it.
    if control.should_stop(stack.nodes) {
        return 0;
    }

    let key = stack.top_key();
    let probe = tt.get(key, depth, alpha, beta);
    if let Some(value) = probe.value {
        stack.nodes += 1;
        return value;
    }

    if depth <= 0 {
        let score = quiescence_search(stack, zobrist, eval, control, alpha, beta, ply);
        // The quiescence value is exact only inside the open window; a
        // clipped value must be stored as the bound it proves.
        let bound = if score <= alpha {
            Bound::Upper
        } else if score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        tt.store(key, 0, None, score, bound, 0);
        return score;
    }

    stack.nodes += 1;
    if ply >= MAX_PLY {
        return eval.evaluate(stack.current());
    }

    if ply > 0 && stack.is_draw() {
        return 0;
    }

    let in_check = !stack.current().checkers().is_empty();

    // Null-move pruning: give the opponent a free move at reduced
    // depth; if the score still exceeds beta the node is pruned.
    // Skipped at the root, in check, and inside another null sub-search.
    if ply > 0
        && depth >= NULL_MOVE_REDUCTION + 1
        && !in_check
        && stack.null_move_allowed()
        && stack.make_null(zobrist)
    {
        stack.set_null_move_allowed(false);
        let mut null_pv = Vec::new();
        let score = -alpha_beta_search(
            stack,
            zobrist,
            tt,
            eval,
            control,
            depth - 1 - NULL_MOVE_REDUCTION,
            -beta,
            -beta + NARROW_WINDOW,
            ply + 1,
            &mut null_pv,
        );
        stack.set_null_move_allowed(true);
        stack.unmake_move();
        if score > beta {
            return beta;
        }
    }

    let killers = stack.killers.at(ply);
    let ordered = order_moves(
        stack.current(),
        probe.best_move,
        Some(&killers),
        Some(&stack.history),
    );

    if ordered.is_empty() {
        // Mate is referenced to the root by the ply term so that
        // shorter mates score better.
        return if in_check { MIN_EVAL + ply } else { 0 };
    }

    let mut best_eval = alpha;
    let mut best_move: Option<Move> = None;
    let mut bound = Bound::Upper;
    let mut pv_found = false;
    let mut child_pv: Vec<Move> = Vec::new();

    for (_, mv) in ordered {
        stack.make_move(mv, zobrist);
        let mut score;
        if pv_found {
            // Zero-window probe around alpha; a score inside the open
            // window forces a full re-search.
            score = -alpha_beta_search(
                stack,
                zobrist,
                tt,
                eval,
                control,
                depth - 1,
                -alpha - NARROW_WINDOW,
                -alpha,
                ply + 1,
                &mut child_pv,
            );
            if alpha < score && score < beta {
                child_pv.clear();
                score = -alpha_beta_search(
                    stack,
                    zobrist,
                    tt,
                    eval,
                    control,
                    depth - 1,
                    -beta,
                    -alpha,
                    ply + 1,
                    &mut child_pv,
                );
            }
        } else {
            score = -alpha_beta_search(
                stack,
                zobrist,
                tt,
                eval,
                control,
                depth - 1,
                -beta,
                -alpha,
                ply + 1,
                &mut child_pv,
            );
        }
        stack.unmake_move();

        if score > best_eval {
            best_eval = score;
            best_move = Some(mv);
            pv.clear();
            pv.push(mv);
            pv.extend_from_slice(&child_pv);
        }
        if score >= beta {
            bound = Bound::Lower;
            if capture_priority(stack.current(), mv) == 0 {
                stack.killers.insert(ply, mv);
                stack.history.update(mv, depth);
            }
            break;
        }
        if score > alpha {
            bound = Bound::Exact;
            pv_found = true;
            alpha = score;
        }
        child_pv.clear();
    }

    // A node interrupted mid-loop holds partial results; keep them out
    // of the table.
    if control.should_stop(stack.nodes) {
        return best_eval;
    }

    tt.store(key, depth, best_move, best_eval, bound, 0);
    best_eval
}
