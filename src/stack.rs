//! The search stack: positions, fingerprints, and per-search state.
//!
//! Every node the search visits pushes one frame (position plus
//! incrementally updated fingerprint) and pops it on the way back, so
//! the stack depth on return always equals the depth on entry. The
//! stack also carries the per-search mutable state the recursion needs:
//! killers, history, the node counter, and the flag that keeps null
//! moves from nesting.

use cozy_chess::Board;

use crate::search::{HistoryTable, KillerTable};
use crate::zobrist::ZobristKeys;

pub struct SearchStack {
    boards: Vec<Board>,
    keys: Vec<u64>,
    pub killers: KillerTable,
    pub history: HistoryTable,
    pub nodes: u64,
    null_move_allowed: bool,
}

impl SearchStack {
    /// Seeds the stack with the root position and its fingerprint.
    pub fn new(root: Board, zobrist: &ZobristKeys) -> Self {
        let key = zobrist.key_of(&root);
        SearchStack {
            boards: vec![root],
            keys: vec![key],
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            nodes: 0,
            null_move_allowed: true,
        }
    }

    pub fn current(&self) -> &Board {
        // The stack is seeded with the root and pops never remove it.
        &self.boards[self.boards.len() - 1]
    }

    pub fn top_key(&self) -> u64 {
        self.keys[self.keys.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Pushes the child reached by `mv`, updating the fingerprint
    /// incrementally.
    pub fn make_move(&mut self, mv: cozy_chess::Move, zobrist: &ZobristKeys) {
        let mut child = self.current().clone();
        child.play(mv);
        let key = zobrist.update_key(self.top_key(), self.current(), &child);
        self.boards.push(child);
        self.keys.push(key);
    }

    /// Pushes the side-to-move flip, if legal (not while in check).
    /// Returns false without touching the stack otherwise.
    pub fn make_null(&mut self, zobrist: &ZobristKeys) -> bool {
        match self.current().null_move() {
            Some(flipped) => {
                let key = zobrist.update_key(self.top_key(), self.current(), &flipped);
                self.boards.push(flipped);
                self.keys.push(key);
                true
            }
            None => false,
        }
    }

    pub fn unmake_move(&mut self) {
        debug_assert!(self.boards.len() > 1, "cannot pop the root frame");
        self.boards.pop();
        self.keys.pop();
    }

    pub fn null_move_allowed(&self) -> bool {
        self.null_move_allowed
    }

    pub fn set_null_move_allowed(&mut self, allowed: bool) {
        self.null_move_allowed = allowed;
    }

    /// Draw predicate consulted at every non-root node: fifty-move rule
    /// via the halfmove clock, and threefold repetition of the current
    /// fingerprint within this search path.
    pub fn is_draw(&self) -> bool {
        if self.current().halfmove_clock() >= 100 {
            return true;
        }
        let top = self.top_key();
        self.keys.iter().filter(|&&key| key == top).count() >= 3
    }
}
