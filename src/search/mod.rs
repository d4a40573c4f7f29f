pub mod alpha_beta;
pub mod history;
pub mod iterative_deepening;
pub mod ordering;
pub mod quiescence;

pub use alpha_beta::alpha_beta_search;
pub use history::HistoryTable;
pub use iterative_deepening::{
    iterative_search, search_to_depth, SearchControl, SearchLimits, SearchOutcome,
};
pub use ordering::{capture_priority, order_moves, KillerTable};
pub use quiescence::quiescence_search;

/// Lower bound on every score the search can produce.
pub const MIN_EVAL: i32 = -100_000;
/// Upper bound on every score the search can produce.
pub const MAX_EVAL: i32 = 100_000;
/// Hard ceiling on search-tree depth in plies.
pub const MAX_PLY: i32 = 50;
/// Null-move depth reduction.
pub const NULL_MOVE_REDUCTION: i32 = 2;
/// Width of the narrow probing windows (null-move and PV zero-window),
/// in centipawns.
pub const NARROW_WINDOW: i32 = 100;
/// Scores at or beyond this magnitude are mate scores.
pub const MATE_BOUND: i32 = MAX_EVAL - MAX_PLY;
