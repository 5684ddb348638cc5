//! Game-over detection.

use crate::board::Board;
use crate::chess_move::Move;

/// Why a game ended in a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    InsufficientMaterial,
    FiftyMoveRule,
    Repetition,
}

/// Whether the game continues and, if not, how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is mated.
    Checkmate,
    /// The side to move has no legal move but is not in check.
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    #[inline]
    pub fn is_draw(self) -> bool {
        matches!(self, GameStatus::Stalemate | GameStatus::Draw(_))
    }
}

impl Board {
    /// Game status of the current position.
    pub fn status(&self) -> GameStatus {
        let moves = self.legal_moves();
        self.status_with(&moves)
    }

    /// Game status given the already-generated legal moves of this position.
    ///
    /// Mate and stalemate take precedence over the draw rules.
    pub fn status_with(&self, legal_moves: &[Move]) -> GameStatus {
        if legal_moves.is_empty() {
            return if self.in_check() {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            };
        }
        if self.is_insufficient_material() {
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        } else if self.halfmove_clock() >= 100 {
            GameStatus::Draw(DrawReason::FiftyMoveRule)
        } else if self.is_repetition() {
            GameStatus::Draw(DrawReason::Repetition)
        } else {
            GameStatus::Ongoing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(fen: &str) -> GameStatus {
        fen.parse::<Board>().unwrap().status()
    }

    #[test]
    fn terminal_positions() {
        assert_eq!(status("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1"), GameStatus::Checkmate);
        assert_eq!(status("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
        assert_eq!(
            status("4k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
        assert_eq!(
            status("4k3/8/8/8/8/8/8/R3K3 w - - 100 80"),
            GameStatus::Draw(DrawReason::FiftyMoveRule)
        );
        assert_eq!(status("4k3/8/8/8/8/8/8/R3K3 w - - 99 80"), GameStatus::Ongoing);
    }

    #[test]
    fn mate_outranks_the_fifty_move_rule() {
        assert_eq!(status("7k/6Q1/5K2/8/8/8/8/8 b - - 100 80"), GameStatus::Checkmate);
    }

    #[test]
    fn stalemate_counts_as_a_draw() {
        assert!(GameStatus::Stalemate.is_draw());
        assert!(!GameStatus::Checkmate.is_draw());
        assert!(GameStatus::Checkmate.is_over());
        assert!(!GameStatus::Ongoing.is_over());
    }
}
