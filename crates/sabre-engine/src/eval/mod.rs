//! Static evaluation.
//!
//! Terms are summed from White's perspective and the total is negated when
//! Black is to move, so the result always favours the side to move.

pub mod king_drive;
pub mod material;
pub mod mobility;
pub mod phase;
pub mod pst;

use sabre_core::{Board, Color, GameStatus};

use crate::score::MATE_SCORE;

pub use material::piece_value;

/// Evaluate `board` for the side to move, `ply` plies from the search root.
///
/// Mated positions score `-(MATE_SCORE - ply)` so that nearer mates rank
/// higher; stalemate and rule draws score zero. Otherwise the score is
/// material, piece-square placement and mobility, plus the king drive
/// once the queens are off.
///
/// The board is mutated while counting the opponent's moves and is
/// restored before returning.
pub fn evaluate(board: &mut Board, ply: u32) -> i32 {
    let moves = board.legal_moves();
    match board.status_with(&moves) {
        GameStatus::Checkmate => return -(MATE_SCORE - ply as i32),
        GameStatus::Stalemate | GameStatus::Draw(_) => return 0,
        GameStatus::Ongoing => {}
    }

    let endgame = phase::is_endgame(board);
    let material = material::material(board);

    let mut score = material + pst::piece_squares(board, endgame);
    if endgame {
        score += king_drive::king_drive(board, material);
    }

    // Mobility is already relative to the side to move.
    let mobility = mobility::mobility(board, moves.len());

    match board.side_to_move() {
        Color::White => score + mobility,
        Color::Black => -score + mobility,
    }
}
