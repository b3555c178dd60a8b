//! A chess rules engine: board state, legal move generation, move application
//! with castling and promotion, and check / checkmate / stalemate detection.
//!
//! The engine is synchronous and holds no global state. A host owns a
//! [`Game`] and serializes access to it.
//!
//! Double pawn steps and en passant are not part of these rules.

pub mod board;
pub mod castling;
pub mod error;
pub mod game;
pub mod movegen;
pub mod piece;
pub mod position;

pub use board::Board;
pub use castling::{CastleSide, CastlingRights};
pub use error::{ChessError, InvalidMoveReason, Result};
pub use game::Game;
pub use piece::{Color, Piece, PieceType};
pub use position::{Move, Position};
