//! Moves packed into a u16.

use std::fmt;

use crate::piece::PieceKind;
use crate::square::Square;

const FROM_MASK: u16 = 0x003F;
const TO_SHIFT: u32 = 6;
const TO_MASK: u16 = 0x003F;
const FLAG_SHIFT: u32 = 12;

const QUIET: u16 = 0;
const DOUBLE_PUSH: u16 = 1;
const KING_CASTLE: u16 = 2;
const QUEEN_CASTLE: u16 = 3;
const CAPTURE: u16 = 4;
const EN_PASSANT: u16 = 5;
const PROMOTION: u16 = 8;
const CAPTURE_BIT: u16 = 4;
const PROMOTION_BIT: u16 = 8;

/// A move encoded in 16 bits.
///
/// ```text
/// bits  0-5:  source square
/// bits  6-11: destination square
/// bits 12-15: flags
///             0 quiet, 1 double push, 2 king castle, 3 queen castle,
///             4 capture, 5 en passant,
///             8-11 promotion to N/B/R/Q, 12-15 promotion with capture
/// ```
///
/// Castling is encoded as the king's two-square step.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    #[inline]
    const fn pack(from: Square, to: Square, flags: u16) -> Move {
        Move(from.index() as u16 | ((to.index() as u16) << TO_SHIFT) | (flags << FLAG_SHIFT))
    }

    pub const fn quiet(from: Square, to: Square) -> Move {
        Move::pack(from, to, QUIET)
    }

    pub const fn double_push(from: Square, to: Square) -> Move {
        Move::pack(from, to, DOUBLE_PUSH)
    }

    pub const fn capture(from: Square, to: Square) -> Move {
        Move::pack(from, to, CAPTURE)
    }

    pub const fn en_passant(from: Square, to: Square) -> Move {
        Move::pack(from, to, EN_PASSANT)
    }

    /// A castling move given as the king's source and destination.
    pub const fn castle(from: Square, to: Square) -> Move {
        let flags = if to.file() > from.file() { KING_CASTLE } else { QUEEN_CASTLE };
        Move::pack(from, to, flags)
    }

    /// A promotion to `kind`, which must be a knight, bishop, rook or queen.
    pub const fn promotion(from: Square, to: Square, kind: PieceKind, capture: bool) -> Move {
        let piece_bits = (kind.index() as u16).saturating_sub(1) & 3;
        let capture_bits = if capture { CAPTURE_BIT } else { 0 };
        Move::pack(from, to, PROMOTION | capture_bits | piece_bits)
    }

    #[inline]
    const fn flags(self) -> u16 {
        self.0 >> FLAG_SHIFT
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::new((self.0 & FROM_MASK) as u8 % 8, (self.0 & FROM_MASK) as u8 / 8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        let idx = ((self.0 >> TO_SHIFT) & TO_MASK) as u8;
        Square::new(idx % 8, idx / 8)
    }

    /// True for ordinary captures, en passant and capturing promotions.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.flags() & CAPTURE_BIT != 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flags() & PROMOTION_BIT != 0
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flags() == EN_PASSANT
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        self.flags() == DOUBLE_PUSH
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.flags(), KING_CASTLE | QUEEN_CASTLE)
    }

    /// The piece kind a promotion produces.
    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        if !self.is_promotion() {
            return None;
        }
        Some(match self.flags() & 3 {
            0 => PieceKind::Knight,
            1 => PieceKind::Bishop,
            2 => PieceKind::Rook,
            _ => PieceKind::Queen,
        })
    }

    /// Long algebraic notation as used by UCI, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(self) -> String {
        match self.promotion_kind() {
            Some(kind) => format!("{}{}{}", self.from(), self.to(), kind.letter()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}
