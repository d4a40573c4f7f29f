//! Goshawk: a negamax alpha-beta search core for chess.
//!
//! The crate turns a position into a best-move recommendation and a
//! numerical evaluation within a requested depth budget. It owns the
//! search machinery only: Zobrist fingerprints, the transposition
//! table, move ordering, quiescence, and the iterative-deepening
//! alpha-beta driver. The rules of chess (legal move generation,
//! make-move, check detection) come from [`cozy_chess`], and leaf
//! evaluation is delegated to an NNUE-style network behind the
//! [`eval::NnueNetwork`] trait.
//!
//! # Example
//!
//! ```
//! use cozy_chess::Board;
//! use goshawk::eval::{LeafEvaluator, MaterialNet};
//! use goshawk::search::search_to_depth;
//! use goshawk::transposition::TranspositionTable;
//! use goshawk::zobrist::ZOBRIST;
//!
//! let board = Board::default();
//! let mut tt = TranspositionTable::new();
//! let mut eval = LeafEvaluator::new(MaterialNet);
//! let (score, pv) = search_to_depth(&board, &ZOBRIST, &mut tt, &mut eval, 3);
//! assert!(!pv.is_empty());
//! assert!(score.abs() < 1000);
//! ```

pub mod eval;
pub mod search;
pub mod stack;
pub mod transposition;
pub mod zobrist;
