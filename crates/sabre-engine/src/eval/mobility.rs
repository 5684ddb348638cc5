//! Mobility: the difference in legal move counts between the two sides.

use sabre_core::Board;

use crate::guard::NullMoveGuard;

/// Centipawns per legal move of difference.
pub const MOBILITY_WEIGHT: i32 = 5;

/// Mobility from the side to move's point of view.
///
/// `own_moves` is the legal move count of the side to move. The opponent's
/// count is taken after passing the turn. When the side to move is in check
/// a pass would leave the king capturable, so the term is zero.
pub fn mobility(board: &mut Board, own_moves: usize) -> i32 {
    if board.in_check() {
        return 0;
    }
    let their_moves = NullMoveGuard::new(board).legal_moves().len();
    (own_moves as i32 - their_moves as i32) * MOBILITY_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_even() {
        let mut board = Board::starting_position();
        let own = board.legal_moves().len();
        assert_eq!(mobility(&mut board, own), 0);
    }

    #[test]
    fn counts_are_relative_to_the_mover() {
        let mut board: Board = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        let before = board.clone();
        let own = board.legal_moves().len();
        let score = mobility(&mut board, own);
        assert!(score > 0);
        assert_eq!(board, before);

        let mut board: Board = "4k3/8/8/8/8/8/8/3QK3 b - - 0 1".parse().unwrap();
        let own = board.legal_moves().len();
        assert_eq!(mobility(&mut board, own), -score);
    }

    #[test]
    fn zero_in_check() {
        let mut board: Board = "4k3/8/8/8/8/8/8/4RK2 b - - 0 1".parse().unwrap();
        let own = board.legal_moves().len();
        assert_eq!(mobility(&mut board, own), 0);
    }
}
