//! Game phase detection.

use sabre_core::{Board, Color, PieceKind};

/// True once both queens are off the board.
///
/// Selects the endgame king table and enables the king-drive term.
pub fn is_endgame(board: &Board) -> bool {
    Color::ALL
        .iter()
        .all(|&color| board.count(PieceKind::Queen, color) == 0)
}
