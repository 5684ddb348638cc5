//! A board plus a searcher: the surface a driver or UI talks to.

use sabre_core::{Board, InvalidPositionError, Move, MoveParseError};
use tracing::debug;

use crate::config::SearchConfig;
use crate::search::{SearchResult, Searcher};

/// Holds the game position and the search state that persists across moves.
#[derive(Debug)]
pub struct Engine {
    board: Board,
    searcher: Searcher,
}

impl Engine {
    /// Engine at the starting position.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            board: Board::starting_position(),
            searcher: Searcher::new(config),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the position. The transposition table is kept.
    pub fn set_position(&mut self, fen: &str) -> Result<(), InvalidPositionError> {
        self.board = fen.parse()?;
        debug!(fen, "position set");
        Ok(())
    }

    /// Apply a move known to be legal in the current position.
    pub fn play(&mut self, mv: Move) {
        self.board.make_move(mv);
    }

    /// Parse and apply a move in UCI notation.
    pub fn play_uci(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let mv = self.board.parse_uci_move(text)?;
        self.play(mv);
        Ok(mv)
    }

    /// Take back the last move played, if it is `mv`.
    pub fn undo(&mut self, mv: Move) {
        self.board.unmake_move(mv);
    }

    /// Search the current position to `depth` plies.
    pub fn search(&mut self, depth: i32) -> SearchResult {
        self.searcher.search(&mut self.board, depth)
    }

    /// Best move at `depth`, or `None` when the game is over.
    pub fn best_move(&mut self, depth: i32) -> Option<Move> {
        self.search(depth).best_move
    }

    /// Positions visited by the most recent search.
    pub fn positions_searched(&self) -> u64 {
        self.searcher.nodes()
    }

    pub fn tt_len(&self) -> usize {
        self.searcher.tt().len()
    }

    /// Approximate transposition table footprint in bytes.
    pub fn tt_memory_bytes(&self) -> usize {
        self.searcher.tt().memory_bytes()
    }

    pub fn clear_tt(&mut self) {
        self.searcher.clear_tt();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
