//! Error types for position setup and move parsing.

use crate::color::Color;

/// A FEN string that does not describe a usable position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPositionError {
    #[error("expected 4 to 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },

    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },

    /// Zero-based rank index counts from rank 8.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength { rank_index: usize, length: usize },

    #[error("invalid piece character '{character}'")]
    InvalidPieceChar { character: char },

    #[error("invalid active color \"{found}\", expected \"w\" or \"b\"")]
    InvalidColor { found: String },

    #[error("invalid castling character '{character}'")]
    InvalidCastlingChar { character: char },

    #[error("invalid en passant square \"{found}\"")]
    InvalidEnPassant { found: String },

    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter { field: &'static str, found: String },

    #[error("{color:?} has {count} kings, expected exactly one")]
    InvalidKingCount { color: Color, count: usize },

    #[error("pawn on the first or eighth rank")]
    PawnOnBackRank,

    #[error("the side not to move is in check")]
    OpponentInCheck,
}

/// A move string that cannot be played in the current position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("malformed move notation \"{text}\"")]
    Malformed { text: String },

    #[error("illegal move \"{text}\" in this position")]
    Illegal { text: String },
}
