//! Perft node counting, used to verify move generation and make/unmake.

use crate::board::Board;

/// Count leaf nodes `depth` plies below the current position.
///
/// The board is restored before returning. Depth 1 bulk-counts the legal moves.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for &mv in moves.iter() {
        board.make_move(mv);
        nodes += perft(board, depth - 1);
        board.unmake_move(mv);
    }
    nodes
}

/// Per-root-move perft counts, sorted by UCI text.
pub fn divide(board: &mut Board, depth: u32) -> Vec<(String, u64)> {
    let moves = board.legal_moves();
    let mut counts: Vec<(String, u64)> = moves
        .iter()
        .map(|&mv| {
            board.make_move(mv);
            let count = perft(board, depth.saturating_sub(1));
            board.unmake_move(mv);
            (mv.to_uci(), count)
        })
        .collect();
    counts.sort();
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(fen: &str, depth: u32) -> u64 {
        let mut board: Board = fen.parse().unwrap();
        let before = board.clone();
        let nodes = perft(&mut board, depth);
        assert_eq!(board, before);
        nodes
    }

    #[test]
    fn starting_position() {
        let fen = crate::fen::STARTING_FEN;
        assert_eq!(run(fen, 1), 20);
        assert_eq!(run(fen, 2), 400);
        assert_eq!(run(fen, 3), 8_902);
    }

    #[test]
    fn kiwipete() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(run(fen, 1), 48);
        assert_eq!(run(fen, 2), 2_039);
        assert_eq!(run(fen, 3), 97_862);
    }

    #[test]
    fn rook_and_pawn_endgame() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(run(fen, 1), 14);
        assert_eq!(run(fen, 2), 191);
        assert_eq!(run(fen, 3), 2_812);
        assert_eq!(run(fen, 4), 43_238);
    }

    #[test]
    fn promotions_and_castling() {
        let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
        assert_eq!(run(fen, 1), 6);
        assert_eq!(run(fen, 2), 264);
        assert_eq!(run(fen, 3), 9_467);
    }

    #[test]
    fn discovered_checks() {
        let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
        assert_eq!(run(fen, 1), 44);
        assert_eq!(run(fen, 2), 1_486);
        assert_eq!(run(fen, 3), 62_379);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut board = Board::starting_position();
        let split = divide(&mut board, 2);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }
}
