//! FEN parsing and serialization.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::InvalidPositionError;
use crate::movegen::is_attacked;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// FEN of the standard initial position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn parse_placement(field: &str) -> Result<[Option<Piece>; 64], InvalidPositionError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(InvalidPositionError::WrongRankCount { found: ranks.len() });
    }

    let mut squares = [None; 64];
    for (rank_index, text) in ranks.iter().enumerate() {
        let rank = 7 - rank_index as u8;
        let mut file = 0usize;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_fen_char(c)
                .ok_or(InvalidPositionError::InvalidPieceChar { character: c })?;
            if file < 8 {
                squares[Square::new(file as u8, rank).index()] = Some(piece);
            }
            file += 1;
        }
        if file != 8 {
            return Err(InvalidPositionError::BadRankLength { rank_index, length: file });
        }
    }
    Ok(squares)
}

fn parse_counter(field: Option<&str>, name: &'static str, default: u16) -> Result<u16, InvalidPositionError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| InvalidPositionError::InvalidMoveCounter {
            field: name,
            found: text.to_string(),
        }),
    }
}

impl FromStr for Board {
    type Err = InvalidPositionError;

    /// Parse a FEN string. The two move counters may be omitted.
    fn from_str(fen: &str) -> Result<Board, InvalidPositionError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(InvalidPositionError::WrongFieldCount { found: fields.len() });
        }

        let squares = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(InvalidPositionError::InvalidColor { found: other.to_string() }),
        };

        let claimed = CastleRights::from_fen(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            text => {
                let expected_rank = match side_to_move {
                    Color::White => 5,
                    Color::Black => 2,
                };
                let sq = Square::from_algebraic(text)
                    .filter(|sq| sq.rank() == expected_rank)
                    .ok_or_else(|| InvalidPositionError::InvalidEnPassant { found: text.to_string() })?;
                Some(sq)
            }
        };

        let halfmove_clock = parse_counter(fields.get(4).copied(), "halfmove clock", 0)?;
        let fullmove_number = parse_counter(fields.get(5).copied(), "fullmove number", 1)?.max(1);

        let mut kings = [Square::A1; 2];
        for color in Color::ALL {
            let found: Vec<Square> = Square::all()
                .filter(|sq| squares[sq.index()] == Some(Piece::new(PieceKind::King, color)))
                .collect();
            if found.len() != 1 {
                return Err(InvalidPositionError::InvalidKingCount { color, count: found.len() });
            }
            kings[color.index()] = found[0];
        }

        let pawn_on_back_rank = Square::all().any(|sq| {
            (sq.rank() == 0 || sq.rank() == 7)
                && squares[sq.index()].is_some_and(|piece| piece.kind() == PieceKind::Pawn)
        });
        if pawn_on_back_rank {
            return Err(InvalidPositionError::PawnOnBackRank);
        }

        let castling = playable_castling(&squares, claimed);

        let them = !side_to_move;
        if is_attacked(&squares, kings[them.index()], side_to_move) {
            return Err(InvalidPositionError::OpponentInCheck);
        }

        Ok(Board::assemble(
            squares,
            kings,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        ))
    }
}

/// Drop castling rights whose king or rook is not on its home square.
fn playable_castling(squares: &[Option<Piece>; 64], claimed: CastleRights) -> CastleRights {
    let mut rights = claimed;
    for color in Color::ALL {
        let rank = color.back_rank();
        let home = |file, kind| squares[Square::new(file, rank).index()] == Some(Piece::new(kind, color));
        let king_home = home(4, PieceKind::King);
        for (kingside, rook_file) in [(true, 7), (false, 0)] {
            if !king_home || !home(rook_file, PieceKind::Rook) {
                rights = rights.without(CastleRights::for_side(color, kingside));
            }
        }
    }
    if rights != claimed {
        trace!(%claimed, kept = %rights, "dropped castling rights without king and rook at home");
    }
    rights
}

impl fmt::Display for Board {
    /// Writes the position as a six-field FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_on(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }
        write!(f, " {} {} ", self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_fen_matches_constructor() {
        let parsed: Board = STARTING_FEN.parse().unwrap();
        assert_eq!(parsed, Board::starting_position());
        assert_eq!(parsed.to_string(), STARTING_FEN);
    }

    #[test]
    fn round_trip() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "8/8/8/8/8/8/8/K6k b - - 42 99",
        ] {
            let board: Board = fen.parse().unwrap();
            assert_eq!(board.to_string(), fen);
        }
    }

    #[test]
    fn unplayable_castling_rights_are_dropped() {
        let board: Board = "4k2r/8/8/8/8/8/8/R3K3 w KQkq - 0 1".parse().unwrap();
        assert_eq!(board.castling(), CastleRights::WHITE_QUEENSIDE.union(CastleRights::BLACK_KINGSIDE));
        assert_eq!(board.to_string(), "4k2r/8/8/8/8/8/8/R3K3 w Qk - 0 1");
    }

    #[test]
    fn counters_are_optional() {
        let board: Board = "8/8/8/8/8/8/8/K6k w - -".parse().unwrap();
        assert_eq!((board.halfmove_clock(), board.fullmove_number()), (0, 1));
    }

    #[test]
    fn rejects_malformed_input() {
        use InvalidPositionError::*;
        let cases: [(&str, fn(&InvalidPositionError) -> bool); 8] = [
            ("8/8/8 w - - 0 1", |e| matches!(e, WrongRankCount { .. })),
            ("9/8/8/8/8/8/8/K6k w - - 0 1", |e| matches!(e, InvalidPieceChar { .. })),
            ("7/8/8/8/8/8/8/K6k w - - 0 1", |e| matches!(e, BadRankLength { .. })),
            ("8/8/8/8/8/8/8/K6k x - - 0 1", |e| matches!(e, InvalidColor { .. })),
            ("8/8/8/8/8/8/8/K6k w Z - 0 1", |e| matches!(e, InvalidCastlingChar { .. })),
            ("8/8/8/8/8/8/8/K6k w - e4 0 1", |e| matches!(e, InvalidEnPassant { .. })),
            ("8/8/8/8/8/8/8/K7 w - - 0 1", |e| matches!(e, InvalidKingCount { .. })),
            ("k7/8/8/8/8/8/8/K6r b - - 0 1", |e| matches!(e, OpponentInCheck)),
        ];
        for (fen, check) in cases {
            let err = fen.parse::<Board>().unwrap_err();
            assert!(check(&err), "{fen}: unexpected {err:?}");
        }
        assert!(matches!(
            "P6k/8/8/8/8/8/8/K7 w - - 0 1".parse::<Board>(),
            Err(PawnOnBackRank)
        ));
        assert!(matches!("".parse::<Board>(), Err(WrongFieldCount { found: 0 })));
    }
}
