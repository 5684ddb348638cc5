//! Score scale shared by evaluation and search.
//!
//! Scores are centipawns from the side to move's point of view. A side that
//! is mated `ply` plies from the search root scores `-(MATE_SCORE - ply)`.

/// Bound no real score reaches.
pub const INF: i32 = 30_000;

/// Base score for checkmate.
pub const MATE_SCORE: i32 = 29_000;

/// Scores beyond this magnitude encode a forced mate.
pub const MATE_THRESHOLD: i32 = 28_000;

/// Plies until mate encoded in `score`, or `None` for an ordinary score.
///
/// Positive scores mean the side to move delivers the mate.
pub fn mate_in_plies(score: i32) -> Option<i32> {
    if score.abs() > MATE_THRESHOLD {
        Some(MATE_SCORE - score.abs())
    } else {
        None
    }
}
