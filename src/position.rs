use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::PieceType;

pub const BOARD_SIZE: u8 = 8;

/// A square addressed by 1-indexed `(row, column)`; row 1 is white's home rank,
/// column 1 is the a-file.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    /// Returns `None` when either coordinate falls outside `1..=8`.
    pub fn new(row: u8, column: u8) -> Option<Self> {
        let on_board = |v: u8| (1..=BOARD_SIZE).contains(&v);
        if on_board(row) && on_board(column) {
            Some(Position { row, column })
        } else {
            None
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    /// The square `row_delta` ranks and `column_delta` files away, if it is on the board.
    pub fn offset(&self, row_delta: i8, column_delta: i8) -> Option<Position> {
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        Position::new(row, column)
    }

    /// Inverse of row-major order over the board, (1,1) at index 0.
    pub(crate) fn from_index(index: usize) -> Position {
        let size = BOARD_SIZE as usize;
        Position { row: (index / size) as u8 + 1, column: (index % size) as u8 + 1 }
    }
}

impl TryFrom<(u8, u8)> for Position {
    type Error = &'static str;

    fn try_from((row, column): (u8, u8)) -> Result<Self, Self::Error> {
        Position::new(row, column).ok_or("position off the board")
    }
}

impl From<Position> for (u8, u8) {
    fn from(position: Position) -> Self {
        (position.row, position.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.column - 1) as char;
        write!(f, "{}{}", file, self.row)
    }
}

/// A piece relocation. The promotion type is only present for pawn moves onto
/// the far rank; it takes part in equality.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    start: Position,
    end: Position,
    promotion: Option<PieceType>,
}

impl Move {
    pub fn new(start: Position, end: Position, promotion: Option<PieceType>) -> Self {
        Move { start, end, promotion }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn promotion(&self) -> Option<PieceType> {
        self.promotion
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.symbol().to_ascii_uppercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, column: u8) -> Position {
        Position::new(row, column).unwrap()
    }

    #[test]
    fn rejects_off_board_coordinates() {
        assert!(Position::new(0, 1).is_none());
        assert!(Position::new(1, 9).is_none());
        assert!(Position::new(8, 8).is_some());
    }

    #[test]
    fn offset_stops_at_the_edge() {
        assert_eq!(pos(1, 1).offset(1, 2), Some(pos(2, 3)));
        assert_eq!(pos(1, 1).offset(-1, 0), None);
        assert_eq!(pos(8, 8).offset(0, 1), None);
    }

    #[test]
    fn offset_with_extreme_deltas_is_off_board() {
        assert_eq!(pos(1, 8).offset(0, i8::MAX), None);
        assert_eq!(pos(8, 1).offset(i8::MAX, i8::MAX), None);
        assert_eq!(pos(1, 1).offset(i8::MIN, 0), None);
    }

    #[test]
    fn from_index_walks_the_board_row_major() {
        assert_eq!(Position::from_index(0), pos(1, 1));
        assert_eq!(Position::from_index(7), pos(1, 8));
        assert_eq!(Position::from_index(12), pos(2, 5));
        assert_eq!(Position::from_index(63), pos(8, 8));
    }

    #[test]
    fn promotion_tag_distinguishes_moves() {
        let plain = Move::new(pos(7, 1), pos(8, 1), None);
        let queen = Move::new(pos(7, 1), pos(8, 1), Some(PieceType::Queen));
        assert_ne!(plain, queen);
        assert_eq!(queen, Move::new(pos(7, 1), pos(8, 1), Some(PieceType::Queen)));
        assert_eq!(queen.to_string(), "a7 -> a8=Q");
    }

    #[test]
    fn position_serializes_as_row_column_pair() {
        let json = serde_json::to_string(&pos(2, 5)).unwrap();
        assert_eq!(json, "[2,5]");
        assert!(serde_json::from_str::<Position>("[9,1]").is_err());
    }
}
