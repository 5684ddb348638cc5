//! Search core for sabre: static evaluation, move ordering, negamax
//! alpha-beta with quiescence, and a transposition table.

pub mod eval;
pub mod search;

mod config;
mod engine;
mod guard;
mod score;

pub use config::SearchConfig;
pub use engine::Engine;
pub use eval::evaluate;
pub use guard::{MoveGuard, NullMoveGuard};
pub use score::{INF, MATE_SCORE, MATE_THRESHOLD, mate_in_plies};
pub use search::ordering::{order_moves, score_move};
pub use search::tt::{Bound, TranspositionTable, TtProbe};
pub use search::{SearchResult, Searcher};
