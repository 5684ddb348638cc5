//! Castling rights as a 4-bit set.

use std::fmt;

use crate::color::Color;
use crate::error::InvalidPositionError;
use crate::square::Square;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const WHITE_KINGSIDE: CastleRights = CastleRights(1);
    pub const WHITE_QUEENSIDE: CastleRights = CastleRights(2);
    pub const BLACK_KINGSIDE: CastleRights = CastleRights(4);
    pub const BLACK_QUEENSIDE: CastleRights = CastleRights(8);
    pub const ALL: CastleRights = CastleRights(15);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    #[inline]
    pub const fn without(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// The kingside or queenside right for `color`.
    pub const fn for_side(color: Color, kingside: bool) -> CastleRights {
        match (color, kingside) {
            (Color::White, true) => CastleRights::WHITE_KINGSIDE,
            (Color::White, false) => CastleRights::WHITE_QUEENSIDE,
            (Color::Black, true) => CastleRights::BLACK_KINGSIDE,
            (Color::Black, false) => CastleRights::BLACK_QUEENSIDE,
        }
    }

    /// Rights lost when a piece moves from or to `sq`.
    pub const fn lost_by_touching(sq: Square) -> CastleRights {
        match sq.index() {
            0 => CastleRights::WHITE_QUEENSIDE,
            4 => CastleRights(CastleRights::WHITE_KINGSIDE.0 | CastleRights::WHITE_QUEENSIDE.0),
            7 => CastleRights::WHITE_KINGSIDE,
            56 => CastleRights::BLACK_QUEENSIDE,
            60 => CastleRights(CastleRights::BLACK_KINGSIDE.0 | CastleRights::BLACK_QUEENSIDE.0),
            63 => CastleRights::BLACK_KINGSIDE,
            _ => CastleRights::NONE,
        }
    }

    /// Parse the FEN castling field (`"KQkq"`, `"-"`, ...).
    pub fn from_fen(field: &str) -> Result<CastleRights, InvalidPositionError> {
        if field == "-" {
            return Ok(CastleRights::NONE);
        }
        field.chars().try_fold(CastleRights::NONE, |rights, c| {
            let right = match c {
                'K' => CastleRights::WHITE_KINGSIDE,
                'Q' => CastleRights::WHITE_QUEENSIDE,
                'k' => CastleRights::BLACK_KINGSIDE,
                'q' => CastleRights::BLACK_QUEENSIDE,
                _ => return Err(InvalidPositionError::InvalidCastlingChar { character: c }),
            };
            Ok(rights.union(right))
        })
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("-");
        }
        for (right, c) in [
            (CastleRights::WHITE_KINGSIDE, 'K'),
            (CastleRights::WHITE_QUEENSIDE, 'Q'),
            (CastleRights::BLACK_KINGSIDE, 'k'),
            (CastleRights::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.contains(right) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}
