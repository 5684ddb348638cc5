//! Transposition table keyed by the full Zobrist hash.
//!
//! ## Replacement
//!
//! A store overwrites an existing entry for the same hash only when the new
//! search depth is at least the stored depth.
//!
//! ## Capacity
//!
//! Past the soft limit the table logs once and keeps growing. Past the hard
//! limit the whole table is cleared before the next entry is inserted.
//!
//! ## Mate scores
//!
//! Mate scores are stored relative to the node rather than the root (see
//! [`score_to_tt`]) so an entry stays correct when reached along a path of
//! a different length.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::mem;

use sabre_core::Move;
use tracing::{debug, info};

use crate::score::MATE_THRESHOLD;

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is exact.
    Exact,
    /// The search failed high: the true score is at least the stored one.
    LowerBound,
    /// The search failed low: the true score is at most the stored one.
    UpperBound,
}

impl Bound {
    /// Classify a search result against the window it was searched with.
    ///
    /// `alpha` must be the lower bound the node started with, before any
    /// improvement during the move loop.
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Bound {
        if score <= alpha {
            Bound::UpperBound
        } else if score >= beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        }
    }
}

/// One stored search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    pub hash: u64,
    pub depth: i32,
    /// Node-relative score (see [`score_to_tt`]).
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// Outcome of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TtProbe {
    /// Set when the entry is deep enough and its bound settles the window.
    pub cutoff: Option<i32>,
    /// Best move of any stored entry for the position, for move ordering.
    pub best_move: Option<Move>,
}

/// Convert a root-relative score to its stored, node-relative form.
pub fn score_to_tt(score: i32, ply: u32) -> i32 {
    if score > MATE_THRESHOLD {
        score + ply as i32
    } else if score < -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Reverse of [`score_to_tt`] for a node `ply` plies from the root.
pub fn score_from_tt(score: i32, ply: u32) -> i32 {
    if score > MATE_THRESHOLD {
        score - ply as i32
    } else if score < -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

pub struct TranspositionTable {
    entries: HashMap<u64, TtEntry>,
    soft_limit: usize,
    hard_limit: usize,
    soft_limit_reported: bool,
}

impl TranspositionTable {
    /// Create an empty table with the given soft and hard entry limits.
    pub fn new(soft_limit: usize, hard_limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            soft_limit,
            hard_limit: hard_limit.max(1),
            soft_limit_reported: false,
        }
    }

    /// Look up `hash` for a node searched to `depth` with window `(alpha, beta)`.
    ///
    /// A cutoff score is returned when the entry is at least as deep as the
    /// request and its bound is exact, a lower bound at or above `beta`, or
    /// an upper bound at or below `alpha`. The stored best move is returned
    /// whenever an entry exists.
    pub fn probe(&self, hash: u64, depth: i32, alpha: i32, beta: i32, ply: u32) -> TtProbe {
        let Some(entry) = self.entries.get(&hash) else {
            return TtProbe::default();
        };

        let score = score_from_tt(entry.score, ply);
        let settles = match entry.bound {
            Bound::Exact => true,
            Bound::LowerBound => score >= beta,
            Bound::UpperBound => score <= alpha,
        };

        TtProbe {
            cutoff: (entry.depth >= depth && settles).then_some(score),
            best_move: entry.best_move,
        }
    }

    /// Best move stored for `hash`, if any.
    pub fn best_move(&self, hash: u64) -> Option<Move> {
        self.entries.get(&hash).and_then(|entry| entry.best_move)
    }

    /// Raw stored entry for `hash`.
    pub fn get(&self, hash: u64) -> Option<&TtEntry> {
        self.entries.get(&hash)
    }

    /// Record a search result for the node at `ply`.
    pub fn store(
        &mut self,
        hash: u64,
        depth: i32,
        score: i32,
        bound: Bound,
        best_move: Option<Move>,
        ply: u32,
    ) {
        let len = self.entries.len();
        if len >= self.hard_limit && !self.entries.contains_key(&hash) {
            info!(entries = len, limit = self.hard_limit, "transposition table full, clearing");
            self.clear();
        } else if len >= self.soft_limit && !self.soft_limit_reported {
            debug!(
                entries = len,
                limit = self.soft_limit,
                bytes = self.memory_bytes(),
                "transposition table past soft limit"
            );
            self.soft_limit_reported = true;
        }

        let entry = TtEntry {
            hash,
            depth,
            score: score_to_tt(score, ply),
            bound,
            best_move,
        };
        match self.entries.entry(hash) {
            Entry::Occupied(mut slot) => {
                if depth >= slot.get().depth {
                    slot.insert(entry);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.soft_limit_reported = false;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rough heap footprint: allocated slots times key plus entry size.
    pub fn memory_bytes(&self) -> usize {
        self.entries.capacity() * (mem::size_of::<u64>() + mem::size_of::<TtEntry>())
    }
}

impl fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("entries", &self.entries.len())
            .field("soft_limit", &self.soft_limit)
            .field("hard_limit", &self.hard_limit)
            .finish()
    }
}
