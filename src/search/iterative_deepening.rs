//! Iterative-deepening driver around the alpha-beta search.
//!
//! Each iteration searches one ply deeper with the full window, reusing
//! the transposition table filled by the previous iterations for move
//! ordering. When a budget runs out (depth, nodes, deadline, or an
//! external stop request) the driver keeps the result of the last
//! completed iteration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use cozy_chess::{Board, Move};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::eval::{LeafEvaluator, NnueNetwork};
use crate::stack::SearchStack;
use crate::transposition::TranspositionTable;
use crate::zobrist::ZobristKeys;

use super::alpha_beta::alpha_beta_search;
use super::{MATE_BOUND, MAX_EVAL, MIN_EVAL};

/// Search budgets. `depth` is the only mandatory limit; nodes and
/// movetime are optional caps on top of it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SearchLimits {
    pub depth: i32,
    pub max_nodes: Option<u64>,
    pub movetime: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            depth: 6,
            max_nodes: None,
            movetime: None,
        }
    }
}

impl SearchLimits {
    pub fn depth(depth: i32) -> Self {
        SearchLimits {
            depth,
            ..Self::default()
        }
    }
}

/// Cancellation and budget signals consulted at the top of every search
/// call. The stop flag is shared, so a host thread can end a running
/// search; deadline and node cap are fixed at construction.
pub struct SearchControl {
    stop: Arc<AtomicBool>,
    deadline: Option<Instant>,
    node_limit: u64,
}

impl Default for SearchControl {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl SearchControl {
    /// No deadline, no node cap; stops only on request.
    pub fn unbounded() -> Self {
        SearchControl {
            stop: Arc::new(AtomicBool::new(false)),
            deadline: None,
            node_limit: u64::MAX,
        }
    }

    pub fn from_limits(limits: &SearchLimits) -> Self {
        SearchControl {
            stop: Arc::new(AtomicBool::new(false)),
            deadline: limits.movetime.map(|budget| Instant::now() + budget),
            node_limit: limits.max_nodes.unwrap_or(u64::MAX),
        }
    }

    /// Handle a host can use to stop the search from another thread.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.stop.load(Ordering::Relaxed) || nodes >= self.node_limit {
            return true;
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

/// Result of a driver run: the score and principal variation of the
/// deepest completed iteration.
#[derive(Clone, Debug, Default)]
pub struct SearchOutcome {
    pub score: i32,
    pub pv: Vec<Move>,
    pub depth: i32,
    pub nodes: u64,
}

impl SearchOutcome {
    pub fn best_move(&self) -> Option<Move> {
        self.pv.first().copied()
    }
}

/// Runs iterative deepening from `root` up to `limits.depth` plies.
pub fn iterative_search<N: NnueNetwork>(
    root: &Board,
    zobrist: &ZobristKeys,
    tt: &mut TranspositionTable,
    eval: &mut LeafEvaluator<N>,
    control: &SearchControl,
    limits: &SearchLimits,
) -> SearchOutcome {
    let mut stack = SearchStack::new(root.clone(), zobrist);
    let mut outcome = SearchOutcome::default();
    let start = Instant::now();

    for depth in 1..=limits.depth {
        let mut pv = Vec::new();
        let score = alpha_beta_search(
            &mut stack,
            zobrist,
            tt,
            eval,
            control,
            depth,
            MIN_EVAL,
            MAX_EVAL,
            0,
            &mut pv,
        );

        if control.should_stop(stack.nodes) && outcome.depth > 0 {
            debug!(
                "search stopped during depth {depth}, keeping depth {} result",
                outcome.depth
            );
            break;
        }

        outcome.score = score;
        outcome.depth = depth;
        outcome.nodes = stack.nodes;
        if !pv.is_empty() {
            outcome.pv = pv;
        }

        let elapsed = start.elapsed().as_millis();
        let nps = if elapsed > 0 {
            (stack.nodes as u128 * 1000) / elapsed
        } else {
            0
        };
        info!(
            "depth {depth} score {score} nodes {} nps {nps} pv {}",
            stack.nodes,
            render_pv(&outcome.pv)
        );

        if score.abs() >= MATE_BOUND {
            debug!("mate found at depth {depth}");
            break;
        }
        if control.should_stop(stack.nodes) {
            break;
        }
    }

    outcome.nodes = stack.nodes;
    outcome
}

/// Depth-only entry point: searches `root` to `max_depth` plies and
/// returns the final score and principal variation.
pub fn search_to_depth<N: NnueNetwork>(
    root: &Board,
    zobrist: &ZobristKeys,
    tt: &mut TranspositionTable,
    eval: &mut LeafEvaluator<N>,
    max_depth: i32,
) -> (i32, Vec<Move>) {
    let control = SearchControl::unbounded();
    let outcome = iterative_search(
        root,
        zobrist,
        tt,
        eval,
        &control,
        &SearchLimits::depth(max_depth),
    );
    (outcome.score, outcome.pv)
}

fn render_pv(pv: &[Move]) -> String {
    pv.iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
