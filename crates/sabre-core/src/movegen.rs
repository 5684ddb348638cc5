//! Legal move generation and attack detection on the mailbox.

use std::ops::{Deref, DerefMut};

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Upper bound on legal moves in any reachable position.
const MAX_MOVES: usize = 256;

/// A fixed-capacity list of moves that lives on the stack.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::quiet(Square::A1, Square::A1); MAX_MOVES],
            len: 0,
        }
    }

    /// Append a move.
    ///
    /// # Panics
    ///
    /// Panics if the list is full.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    /// Keep only the moves matching `keep`, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(Move) -> bool) {
        let mut kept = 0;
        for i in 0..self.len {
            let mv = self.moves[i];
            if keep(mv) {
                self.moves[kept] = mv;
                kept += 1;
            }
        }
        self.len = kept;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl Deref for MoveList {
    type Target = [Move];

    #[inline]
    fn deref(&self) -> &[Move] {
        &self.moves[..self.len]
    }
}

impl DerefMut for MoveList {
    #[inline]
    fn deref_mut(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Whether any piece of color `by` attacks `target`.
pub(crate) fn is_attacked(squares: &[Option<Piece>; 64], target: Square, by: Color) -> bool {
    let holds = |sq: Option<Square>, kinds: &[PieceKind]| {
        sq.and_then(|sq| squares[sq.index()])
            .is_some_and(|piece| piece.color() == by && kinds.contains(&piece.kind()))
    };

    // A pawn of `by` sits one rank behind the square it attacks.
    let pawn_rank = -by.forward();
    if holds(target.offset(-1, pawn_rank), &[PieceKind::Pawn])
        || holds(target.offset(1, pawn_rank), &[PieceKind::Pawn])
    {
        return true;
    }

    if KNIGHT_STEPS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), &[PieceKind::Knight]))
    {
        return true;
    }
    if KING_STEPS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), &[PieceKind::King]))
    {
        return true;
    }

    let ray_hits = |directions: &[(i8, i8)], kinds: &[PieceKind]| {
        directions.iter().any(|&(df, dr)| {
            let mut cursor = target.offset(df, dr);
            while let Some(sq) = cursor {
                if let Some(piece) = squares[sq.index()] {
                    return piece.color() == by && kinds.contains(&piece.kind());
                }
                cursor = sq.offset(df, dr);
            }
            false
        })
    };
    ray_hits(&ORTHOGONAL, &[PieceKind::Rook, PieceKind::Queen])
        || ray_hits(&DIAGONAL, &[PieceKind::Bishop, PieceKind::Queen])
}

impl Board {
    /// All legal moves for the side to move, in generation order.
    ///
    /// Generation order is deterministic: squares a1 to h8, and for each
    /// piece its fixed direction order.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let us = self.side_to_move();
        for (from, piece) in self.pieces() {
            if piece.color() != us {
                continue;
            }
            match piece.kind() {
                PieceKind::Pawn => self.pawn_moves(from, us, &mut moves),
                PieceKind::Knight => self.step_moves(from, us, &KNIGHT_STEPS, &mut moves),
                PieceKind::Bishop => self.slide_moves(from, us, &DIAGONAL, &mut moves),
                PieceKind::Rook => self.slide_moves(from, us, &ORTHOGONAL, &mut moves),
                PieceKind::Queen => {
                    self.slide_moves(from, us, &ORTHOGONAL, &mut moves);
                    self.slide_moves(from, us, &DIAGONAL, &mut moves);
                }
                PieceKind::King => {
                    self.step_moves(from, us, &KING_STEPS, &mut moves);
                    self.castle_moves(from, us, &mut moves);
                }
            }
        }
        moves.retain(|mv| self.keeps_king_safe(mv));
        moves
    }

    /// Target classification for a non-pawn move: `Some(capture?)`, or `None` if blocked by our own piece.
    fn target(&self, to: Square, us: Color) -> Option<bool> {
        match self.piece_on(to) {
            None => Some(false),
            Some(piece) if piece.color() != us => Some(true),
            Some(_) => None,
        }
    }

    fn push_piece_move(from: Square, to: Square, capture: bool, moves: &mut MoveList) {
        if capture {
            moves.push(Move::capture(from, to));
        } else {
            moves.push(Move::quiet(from, to));
        }
    }

    fn step_moves(&self, from: Square, us: Color, steps: &[(i8, i8)], moves: &mut MoveList) {
        for &(df, dr) in steps {
            let Some(to) = from.offset(df, dr) else { continue };
            if let Some(capture) = self.target(to, us) {
                Board::push_piece_move(from, to, capture, moves);
            }
        }
    }

    fn slide_moves(&self, from: Square, us: Color, directions: &[(i8, i8)], moves: &mut MoveList) {
        for &(df, dr) in directions {
            let mut cursor = from.offset(df, dr);
            while let Some(to) = cursor {
                match self.target(to, us) {
                    Some(false) => Board::push_piece_move(from, to, false, moves),
                    Some(true) => {
                        Board::push_piece_move(from, to, true, moves);
                        break;
                    }
                    None => break,
                }
                cursor = to.offset(df, dr);
            }
        }
    }

    fn pawn_moves(&self, from: Square, us: Color, moves: &mut MoveList) {
        let forward = us.forward();
        let promotes = |to: Square| to.rank() == us.promotion_rank();

        if let Some(to) = from.offset(0, forward).filter(|&to| self.piece_on(to).is_none()) {
            if promotes(to) {
                Board::push_promotions(from, to, false, moves);
            } else {
                moves.push(Move::quiet(from, to));
                if from.rank() == us.pawn_rank() {
                    if let Some(two) = to.offset(0, forward).filter(|&sq| self.piece_on(sq).is_none()) {
                        moves.push(Move::double_push(from, two));
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(to) = from.offset(df, forward) else { continue };
            match self.piece_on(to) {
                Some(piece) if piece.color() != us => {
                    if promotes(to) {
                        Board::push_promotions(from, to, true, moves);
                    } else {
                        moves.push(Move::capture(from, to));
                    }
                }
                None if self.en_passant() == Some(to) => moves.push(Move::en_passant(from, to)),
                _ => {}
            }
        }
    }

    fn push_promotions(from: Square, to: Square, capture: bool, moves: &mut MoveList) {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promotion(from, to, kind, capture));
        }
    }

    fn castle_moves(&self, from: Square, us: Color, moves: &mut MoveList) {
        let rank = us.back_rank();
        if from != Square::new(4, rank) || self.in_check() {
            return;
        }
        let rook = Piece::new(PieceKind::Rook, us);
        // (kingside, rook file, files that must be empty, file the king crosses)
        let sides: [(bool, u8, &[u8], u8); 2] = [(true, 7, &[5, 6], 5), (false, 0, &[1, 2, 3], 3)];
        for (kingside, rook_file, empty, crossed) in sides {
            if !self.castling().contains(CastleRights::for_side(us, kingside))
                || self.piece_on(Square::new(rook_file, rank)) != Some(rook)
                || empty.iter().any(|&file| self.piece_on(Square::new(file, rank)).is_some())
                || self.is_attacked(Square::new(crossed, rank), !us)
            {
                continue;
            }
            let to_file = if kingside { 6 } else { 2 };
            moves.push(Move::castle(from, Square::new(to_file, rank)));
        }
    }

    /// Play `mv` on a scratch copy of the squares and test our king.
    fn keeps_king_safe(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        let mut squares = *self.squares();
        let (from, to) = (mv.from(), mv.to());

        let moving = squares[from.index()].take();
        if mv.is_en_passant() {
            squares[Square::new(to.file(), from.rank()).index()] = None;
        }
        squares[to.index()] = moving;

        let king = if moving.is_some_and(|piece| piece.kind() == PieceKind::King) {
            to
        } else {
            self.king_square(us)
        };
        !is_attacked(&squares, king, !us)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;

    fn count(fen: &str) -> usize {
        fen.parse::<Board>().unwrap().legal_moves().len()
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        assert_eq!(Board::starting_position().legal_moves().len(), 20);
    }

    #[test]
    fn pinned_knight_cannot_move() {
        let board: Board = "4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1".parse().unwrap();
        assert!(board.legal_moves().iter().all(|mv| mv.from() != "e2".parse().unwrap()));
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let board: Board = "4k3/8/8/8/1b6/8/4r3/R3K3 w - - 0 1".parse().unwrap();
        let king = board.king_square(board.side_to_move());
        assert!(board.in_check());
        assert!(!board.legal_moves().is_empty());
        assert!(board.legal_moves().iter().all(|mv| mv.from() == king));
    }

    #[test]
    fn no_castling_through_attacked_square() {
        let board: Board = "4k3/8/8/8/8/8/5r2/4K2R w K - 0 1".parse().unwrap();
        assert!(board.legal_moves().iter().all(|mv| !mv.is_castle()));
        let board: Board = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();
        assert!(board.legal_moves().iter().any(|mv| mv.is_castle()));
    }

    #[test]
    fn en_passant_exposing_the_king_is_illegal() {
        let board: Board = "8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1".parse().unwrap();
        assert!(board.legal_moves().iter().all(|mv| !mv.is_en_passant()));
    }

    #[test]
    fn promotions_produce_four_moves() {
        let board: Board = "8/P3k3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let promos = board.legal_moves().iter().filter(|mv| mv.is_promotion()).count();
        assert_eq!(promos, 4);
    }

    #[test]
    fn checkmate_and_stalemate_have_no_moves() {
        assert_eq!(count("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1"), 0);
        assert_eq!(count("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1"), 0);
    }
}
