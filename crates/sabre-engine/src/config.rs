//! Search configuration.

/// Tunable limits for a [`crate::Searcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Entry count above which the table logs that it is getting large.
    pub tt_soft_limit: usize,
    /// Entry count above which the whole table is cleared.
    pub tt_hard_limit: usize,
    /// Quiescence stops extending past this many plies from the root.
    pub max_ply: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tt_soft_limit: 1_000_000,
            tt_hard_limit: 2_000_000,
            max_ply: 64,
        }
    }
}
