use thiserror::Error;

use crate::piece::Color;
use crate::position::{Move, Position};

pub type Result<T> = std::result::Result<T, ChessError>;

/// Why `Game::make_move` refused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidMoveReason {
    #[error("there is no piece on {0}")]
    EmptySquare(Position),
    #[error("that piece is {piece}, but it is {to_move}'s turn")]
    WrongTurn { piece: Color, to_move: Color },
    #[error("the piece cannot move there")]
    NotLegal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: Move, reason: InvalidMoveReason },

    /// Both kings must be on the board in any reachable position.
    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),
}

impl ChessError {
    pub(crate) fn invalid_move(mv: Move, reason: InvalidMoveReason) -> Self {
        ChessError::InvalidMove { mv, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_move_messages_name_the_cause() {
        let mv = Move::new(Position::new(2, 5).unwrap(), Position::new(3, 5).unwrap(), None);

        let empty = ChessError::invalid_move(mv, InvalidMoveReason::EmptySquare(mv.start()));
        assert_eq!(empty.to_string(), "invalid move e2 -> e3: there is no piece on e2");

        let turn = ChessError::invalid_move(
            mv,
            InvalidMoveReason::WrongTurn { piece: Color::Black, to_move: Color::White },
        );
        assert_eq!(turn.to_string(), "invalid move e2 -> e3: that piece is black, but it is white's turn");

        let illegal = ChessError::invalid_move(mv, InvalidMoveReason::NotLegal);
        assert!(illegal.to_string().ends_with("the piece cannot move there"));
    }

    #[test]
    fn missing_king_names_the_color() {
        assert_eq!(ChessError::MissingKing(Color::White).to_string(), "no white king on the board");
    }
}
