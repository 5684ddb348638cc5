//! Mailbox board with reversible in-place make/unmake.

use std::fmt;

use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::MoveParseError;
use crate::movegen::is_attacked;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;
use crate::zobrist;

/// State needed to take back one move (or pass).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Undo {
    /// `None` for a null move.
    mv: Option<Move>,
    captured: Option<Piece>,
    castling: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    /// Hash of the position before the move.
    hash: u64,
}

/// A chess position plus the history needed to undo moves and detect repetition.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    kings: [Square; 2],
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    hash: u64,
    history: Vec<Undo>,
}

impl Board {
    /// The standard initial position.
    pub fn starting_position() -> Board {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut squares = [None; 64];
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            squares[file] = Some(Piece::new(kind, Color::White));
            squares[8 + file] = Some(Piece::new(Pawn, Color::White));
            squares[48 + file] = Some(Piece::new(Pawn, Color::Black));
            squares[56 + file] = Some(Piece::new(kind, Color::Black));
        }
        Board::assemble(
            squares,
            [Square::E1, Square::E8],
            Color::White,
            CastleRights::ALL,
            None,
            0,
            1,
        )
    }

    /// Build a board from validated parts and compute its hash.
    pub(crate) fn assemble(
        squares: [Option<Piece>; 64],
        kings: [Square; 2],
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Board {
        let mut board = Board {
            squares,
            kings,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            hash: 0,
            history: Vec::new(),
        };
        board.hash = board.compute_hash();
        board
    }

    /// Hash computed from scratch, ignoring the incremental value.
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0;
        for (sq, piece) in self.pieces() {
            hash ^= zobrist::piece_square(piece, sq);
        }
        if self.side_to_move == Color::Black {
            hash ^= zobrist::side_to_move();
        }
        hash ^= zobrist::castling(self.castling);
        if let Some(ep) = self.en_passant {
            hash ^= zobrist::en_passant(ep.file());
        }
        hash
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// All occupied squares with their pieces, a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_on(sq).map(|piece| (sq, piece)))
    }

    /// Number of pieces of the given kind and color.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|piece| piece.is(kind, color))
            .count()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Zobrist hash of the current position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Number of moves (including passes) currently applied on top of the root position.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub(crate) fn squares(&self) -> &[Option<Piece>; 64] {
        &self.squares
    }

    /// Whether `by` attacks `sq` in the current position.
    #[inline]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        is_attacked(&self.squares, sq, by)
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move;
        self.is_attacked(self.king_square(us), !us)
    }

    #[inline]
    pub fn is_capture(&self, mv: Move) -> bool {
        mv.is_capture()
    }

    /// Kind of the piece `mv` removes from the board, if any.
    pub fn captured_kind(&self, mv: Move) -> Option<PieceKind> {
        if mv.is_en_passant() {
            Some(PieceKind::Pawn)
        } else if mv.is_capture() {
            self.piece_on(mv.to()).map(Piece::kind)
        } else {
            None
        }
    }

    /// Find the legal move matching a UCI string such as `e2e4` or `a7a8q`.
    pub fn parse_uci_move(&self, text: &str) -> Result<Move, MoveParseError> {
        let malformed = || MoveParseError::Malformed { text: text.to_string() };
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(malformed());
        }
        let from = Square::from_algebraic(&text[0..2]).ok_or_else(malformed)?;
        let to = Square::from_algebraic(&text[2..4]).ok_or_else(malformed)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_letter(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(malformed()),
            },
        };

        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_kind() == promotion)
            .ok_or_else(|| MoveParseError::Illegal { text: text.to_string() })
    }

    #[inline]
    fn put(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
        self.hash ^= zobrist::piece_square(piece, sq);
    }

    #[inline]
    fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index()].take()?;
        self.hash ^= zobrist::piece_square(piece, sq);
        Some(piece)
    }

    /// Rook source and destination for a castling king move.
    fn castle_rook_squares(mv: Move) -> (Square, Square) {
        let rank = mv.from().rank();
        if mv.to().file() > mv.from().file() {
            (Square::new(7, rank), Square::new(5, rank))
        } else {
            (Square::new(0, rank), Square::new(3, rank))
        }
    }

    /// Square of the pawn removed by an en passant capture.
    fn en_passant_victim(mv: Move) -> Square {
        Square::new(mv.to().file(), mv.from().rank())
    }

    /// Apply a legal move in place. Pair every call with [`Board::unmake_move`].
    ///
    /// # Panics
    ///
    /// Panics if the source square is empty.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());

        let mut undo = Undo {
            mv: Some(mv),
            captured: None,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            hash: self.hash,
        };

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= zobrist::en_passant(ep.file());
        }

        undo.captured = if mv.is_en_passant() {
            self.take(Board::en_passant_victim(mv))
        } else if mv.is_capture() {
            self.take(to)
        } else {
            None
        };

        let moving = self.take(from).expect("make_move: source square is empty");
        let placed = mv.promotion_kind().map_or(moving, |kind| Piece::new(kind, us));
        self.put(to, placed);

        if moving.kind() == PieceKind::King {
            self.kings[us.index()] = to;
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = Board::castle_rook_squares(mv);
            if let Some(rook) = self.take(rook_from) {
                self.put(rook_to, rook);
            }
        }

        let castling = self
            .castling
            .without(CastleRights::lost_by_touching(from))
            .without(CastleRights::lost_by_touching(to));
        if castling != self.castling {
            self.hash ^= zobrist::castling(self.castling) ^ zobrist::castling(castling);
            self.castling = castling;
        }

        // Only record a target when an enemy pawn could actually capture.
        if mv.is_double_push() && self.enemy_pawn_beside(to, us) {
            let ep = Square::new(from.file(), (from.rank() + to.rank()) / 2);
            self.en_passant = Some(ep);
            self.hash ^= zobrist::en_passant(ep.file());
        }

        if moving.kind() == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = !us;
        self.hash ^= zobrist::side_to_move();
        self.history.push(undo);
    }

    fn enemy_pawn_beside(&self, sq: Square, us: Color) -> bool {
        [-1, 1].into_iter().any(|df| {
            sq.offset(df, 0)
                .and_then(|side| self.piece_on(side))
                .is_some_and(|piece| piece.is(PieceKind::Pawn, !us))
        })
    }

    /// Take back `mv`, which must be the most recent move made.
    ///
    /// # Panics
    ///
    /// Panics if there is no move to take back.
    pub fn unmake_move(&mut self, mv: Move) {
        let undo = self.history.pop().expect("unmake_move: no move to take back");
        debug_assert_eq!(undo.mv, Some(mv), "unmake_move: moves taken back out of order");

        let us = !self.side_to_move;
        self.side_to_move = us;
        self.fullmove_number = undo.fullmove_number;

        let (from, to) = (mv.from(), mv.to());
        if mv.is_castle() {
            let (rook_from, rook_to) = Board::castle_rook_squares(mv);
            self.squares[rook_from.index()] = self.squares[rook_to.index()].take();
        }

        let placed = self.squares[to.index()].take();
        let moving = if mv.is_promotion() {
            Some(Piece::new(PieceKind::Pawn, us))
        } else {
            placed
        };
        self.squares[from.index()] = moving;
        if moving.is_some_and(|piece| piece.kind() == PieceKind::King) {
            self.kings[us.index()] = from;
        }

        if mv.is_en_passant() {
            self.squares[Board::en_passant_victim(mv).index()] = undo.captured;
        } else {
            self.squares[to.index()] = undo.captured;
        }

        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash = undo.hash;
    }

    /// Pass the turn without moving. Pair with [`Board::unmake_null_move`].
    pub fn make_null_move(&mut self) {
        self.history.push(Undo {
            mv: None,
            captured: None,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            hash: self.hash,
        });
        if let Some(ep) = self.en_passant.take() {
            self.hash ^= zobrist::en_passant(ep.file());
        }
        self.side_to_move = !self.side_to_move;
        self.hash ^= zobrist::side_to_move();
    }

    /// Undo the most recent [`Board::make_null_move`].
    ///
    /// # Panics
    ///
    /// Panics if there is no pass to take back.
    pub fn unmake_null_move(&mut self) {
        let undo = self.history.pop().expect("unmake_null_move: no pass to take back");
        debug_assert_eq!(undo.mv, None, "unmake_null_move: last entry is a real move");
        self.side_to_move = !self.side_to_move;
        self.en_passant = undo.en_passant;
        self.hash = undo.hash;
    }

    /// Whether the current position occurred at least twice before.
    ///
    /// Only positions since the last irreversible move are compared, and the
    /// scan stops at a pass.
    pub fn is_repetition(&self) -> bool {
        let window = (self.halfmove_clock as usize).min(self.history.len());
        let recent = &self.history[self.history.len() - window..];
        if recent.iter().any(|undo| undo.mv.is_none()) {
            return false;
        }
        recent
            .iter()
            .rev()
            .skip(1)
            .step_by(2)
            .filter(|undo| undo.hash == self.hash)
            .count()
            >= 2
    }

    /// Neither side has enough material to deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishop_shades = [false; 2];
        let mut knights = 0;
        for (sq, piece) in self.pieces() {
            match piece.kind() {
                PieceKind::King => {}
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_shades[sq.is_light() as usize] = true;
                }
                _ => return false,
            }
        }
        // Lone minor, or bishops all on one shade.
        minors <= 1 || (knights == 0 && !(bishop_shades[0] && bishop_shades[1]))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board({self})")?;
        for rank in (0..8).rev() {
            for file in 0..8 {
                let c = self
                    .piece_on(Square::new(file, rank))
                    .map_or('.', Piece::fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
