//! Move ordering: MVV-LVA for captures, promotion bonus, transposition-table move first.

use std::cmp::Reverse;

use sabre_core::{Board, Move, PieceKind};

use crate::eval::piece_value;

/// Score given to the transposition-table move so it is searched first.
const TT_MOVE_SCORE: i32 = 1_000_000;

/// Score of a quiet, non-promoting move. Below every capture score.
const QUIET_SCORE: i32 = -1_000;

/// Heuristic priority of `mv`; higher is searched earlier.
///
/// - Captures: victim value minus attacker value (king counts as zero).
/// - Promotions: add the promoted piece's value.
/// - Quiet moves: a fixed score below any capture.
/// - The transposition-table move outranks everything.
pub fn score_move(board: &Board, mv: Move, tt_move: Option<Move>) -> i32 {
    if tt_move == Some(mv) {
        return TT_MOVE_SCORE;
    }

    let promotion = mv.promotion_kind().map_or(0, piece_value);
    match board.captured_kind(mv) {
        Some(victim) => {
            let attacker = board.piece_on(mv.from()).map_or(PieceKind::Pawn, |p| p.kind());
            piece_value(victim) - piece_value(attacker) + promotion
        }
        None if mv.is_promotion() => promotion,
        None => QUIET_SCORE,
    }
}

/// Sort `moves` in place, best first. Ties keep generation order.
pub fn order_moves(board: &Board, moves: &mut [Move], tt_move: Option<Move>) {
    moves.sort_by_cached_key(|&mv| Reverse(score_move(board, mv, tt_move)));
}
