//! Piece-square tables.
//!
//! All tables are from White's perspective in LERF order:
//! index 0 = A1, index 7 = H1, index 8 = A2, ..., index 63 = H8.
//! Black looks squares up through the rank-mirrored index.

use sabre_core::{Board, Color, PieceKind, Square};

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,   5,  10,  25,  25,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

/// King table while queens are on the board: stay sheltered behind the pawns.
#[rustfmt::skip]
const KING_MIDDLEGAME_PST: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

/// King table once the queens are gone: head for the centre.
#[rustfmt::skip]
const KING_ENDGAME_PST: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

/// Table value for a piece of `color` on `sq`.
#[inline]
pub fn pst_value(kind: PieceKind, color: Color, sq: Square, endgame: bool) -> i32 {
    let idx = match color {
        Color::White => sq.index(),
        Color::Black => sq.flip_rank().index(),
    };
    let table = match kind {
        PieceKind::Pawn => &PAWN_PST,
        PieceKind::Knight => &KNIGHT_PST,
        PieceKind::Bishop => &BISHOP_PST,
        PieceKind::Rook => &ROOK_PST,
        PieceKind::Queen => &QUEEN_PST,
        PieceKind::King if endgame => &KING_ENDGAME_PST,
        PieceKind::King => &KING_MIDDLEGAME_PST,
    };
    table[idx]
}

/// Placement score of every piece, White minus Black.
pub fn piece_squares(board: &Board, endgame: bool) -> i32 {
    board
        .pieces()
        .map(|(sq, piece)| {
            let value = pst_value(piece.kind(), piece.color(), sq, endgame);
            match piece.color() {
                Color::White => value,
                Color::Black => -value,
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn mirrored_squares_score_the_same() {
        for kind in PieceKind::ALL {
            for endgame in [false, true] {
                assert_eq!(
                    pst_value(kind, Color::White, sq("e4"), endgame),
                    pst_value(kind, Color::Black, sq("e5"), endgame),
                );
                assert_eq!(
                    pst_value(kind, Color::White, sq("b2"), endgame),
                    pst_value(kind, Color::Black, sq("b7"), endgame),
                );
            }
        }
    }

    #[test]
    fn starting_position_is_symmetric() {
        assert_eq!(piece_squares(&Board::starting_position(), false), 0);
    }

    #[test]
    fn central_knight_beats_rim_knight() {
        let centre = pst_value(PieceKind::Knight, Color::White, sq("d4"), false);
        let rim = pst_value(PieceKind::Knight, Color::White, sq("a4"), false);
        assert!(centre > rim);
    }

    #[test]
    fn king_prefers_shelter_then_centre() {
        let castled = pst_value(PieceKind::King, Color::White, sq("g1"), false);
        let central = pst_value(PieceKind::King, Color::White, sq("e4"), false);
        assert!(castled > central);

        let castled = pst_value(PieceKind::King, Color::White, sq("g1"), true);
        let central = pst_value(PieceKind::King, Color::White, sq("e4"), true);
        assert!(central > castled);
    }
}
