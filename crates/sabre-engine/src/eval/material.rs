//! Material balance.
//!
//! Scores are from White's perspective (positive = White ahead).

use sabre_core::{Board, Color, PieceKind};

/// Piece values indexed by [`PieceKind::index()`]. The king carries no material value.
///
/// | Piece  | value |
/// |--------|-------|
/// | Pawn   |   100 |
/// | Knight |   320 |
/// | Bishop |   330 |
/// | Rook   |   500 |
/// | Queen  |   900 |
/// | King   |     0 |
pub const PIECE_VALUE: [i32; PieceKind::COUNT] = [100, 320, 330, 500, 900, 0];

/// Value of a piece kind in centipawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUE[kind.index()]
}

/// Sum of piece values, White minus Black.
pub fn material(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| match piece.color() {
            Color::White => piece_value(piece.kind()),
            Color::Black => -piece_value(piece.kind()),
        })
        .sum()
}
