//! Position oracle for the sabre engine: a mailbox board with legal move
//! generation, reversible make/unmake, Zobrist hashing and game-status rules.

mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod movegen;
mod perft;
mod piece;
mod square;
mod status;
mod zobrist;

pub use board::Board;
pub use castle_rights::CastleRights;
pub use chess_move::Move;
pub use color::Color;
pub use error::{InvalidPositionError, MoveParseError};
pub use fen::STARTING_FEN;
pub use movegen::MoveList;
pub use perft::{divide, perft};
pub use piece::{Piece, PieceKind};
pub use square::Square;
pub use status::{DrawReason, GameStatus};
