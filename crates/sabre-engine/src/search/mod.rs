//! Search: root move selection over negamax alpha-beta with quiescence.

mod negamax;
pub mod ordering;
pub mod tt;

use sabre_core::{Board, GameStatus, Move};
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::guard::MoveGuard;
use crate::score::{INF, MATE_SCORE};
use crate::search::ordering::order_moves;
use crate::search::tt::{Bound, TranspositionTable};

pub use negamax::{DELTA_MARGIN, EXCHANGE_MARGIN};

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the position is already decided.
    pub best_move: Option<Move>,
    /// Score of `best_move` for the side to move at the root. Mate scores
    /// count plies from the root to the mated position, so a forced mate
    /// in two moves reports `MATE_SCORE - 3`.
    pub score: i32,
    /// Positions visited by this search.
    pub nodes: u64,
    /// Requested depth in plies.
    pub depth: i32,
}

/// Search state that persists between searches: the transposition table
/// and the node counter.
#[derive(Debug)]
pub struct Searcher {
    tt: TranspositionTable,
    nodes: u64,
    config: SearchConfig,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            tt: TranspositionTable::new(config.tt_soft_limit, config.tt_hard_limit),
            nodes: 0,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Positions visited since the last root search began.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Pick the best move for the side to move, searching `depth` plies.
    ///
    /// Root moves are tried in ordered sequence, each with the full
    /// `(-MATE_SCORE, MATE_SCORE)` window. A move that mates immediately is
    /// returned without searching the rest. The first move reaching the
    /// highest score wins ties. Returns no move when the game is over.
    ///
    /// The node counter is reset at the start; the transposition table is kept.
    pub fn search(&mut self, board: &mut Board, depth: i32) -> SearchResult {
        self.nodes = 0;

        let mut moves = board.legal_moves();
        let status = board.status_with(&moves);
        if status.is_over() {
            debug!(?status, "no search: game over");
            return SearchResult {
                best_move: None,
                score: crate::eval::evaluate(board, 0),
                nodes: 0,
                depth,
            };
        }

        let hash = board.hash();
        order_moves(board, &mut moves, self.tt.best_move(hash));

        let mut best_move = None;
        let mut best_score = -INF;
        for &mv in moves.iter() {
            let mut child = MoveGuard::new(board, mv);
            let score = if child.status() == GameStatus::Checkmate {
                self.nodes += 1;
                MATE_SCORE - 1
            } else {
                -self.negamax(&mut child, depth - 1, -MATE_SCORE, MATE_SCORE, 1)
            };
            drop(child);
            trace!(%mv, score, "root move");

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score == MATE_SCORE - 1 {
                break;
            }
        }

        self.tt.store(hash, depth.max(0), best_score, Bound::Exact, best_move, 0);

        debug!(
            depth,
            score = best_score,
            best = ?best_move.map(|mv| mv.to_uci()),
            nodes = self.nodes,
            tt_entries = self.tt.len(),
            "search complete"
        );

        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes,
            depth,
        }
    }

    /// Best move at `depth`, or `None` when the game is over.
    pub fn best_move(&mut self, board: &mut Board, depth: i32) -> Option<Move> {
        self.search(board, depth).best_move
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(fen: &str, depth: i32) -> SearchResult {
        let mut board: Board = fen.parse().unwrap();
        let before = board.clone();
        let result = Searcher::default().search(&mut board, depth);
        assert_eq!(board, before, "search left the board changed");
        result
    }

    #[test]
    fn finds_mate_in_one() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        for depth in 1..=3 {
            let result = search(fen, depth);
            assert_eq!(result.best_move.map(|mv| mv.to_uci()).as_deref(), Some("h5f7"));
            assert_eq!(result.score, MATE_SCORE - 1);
        }
    }

    #[test]
    fn no_move_in_stalemate() {
        let result = search("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn no_move_when_mated() {
        let result = search("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1", 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE_SCORE);
    }

    #[test]
    fn single_legal_move_is_returned() {
        // Kg8 is black's only legal move.
        let result = search("7k/8/6K1/8/8/8/8/R7 b - - 0 1", 2);
        assert_eq!(result.best_move.map(|mv| mv.to_uci()).as_deref(), Some("h8g8"));
    }

    #[test]
    fn wins_hanging_queen() {
        let result = search("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", 2);
        assert_eq!(result.best_move.map(|mv| mv.to_uci()).as_deref(), Some("e4d5"));
        assert!(result.score > 0);
    }

    #[test]
    fn root_result_is_cached() {
        let mut board = Board::starting_position();
        let mut searcher = Searcher::default();
        let result = searcher.search(&mut board, 2);
        let entry = searcher.tt().get(board.hash()).copied().unwrap();
        assert_eq!(entry.bound, Bound::Exact);
        assert_eq!(entry.best_move, result.best_move);
    }
}
