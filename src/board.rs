use std::fmt;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{ChessError, Result};
use crate::piece::{Color, Piece, PieceType};
use crate::position::{Move, Position, BOARD_SIZE};

type Grid = [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook, PieceType::Knight, PieceType::Bishop, PieceType::Queen,
    PieceType::King, PieceType::Bishop, PieceType::Knight, PieceType::Rook,
];

// --- Precomputed Layout ---

lazy_static! {
    static ref STARTING_LAYOUT: Grid = compute_starting_layout();
}

fn compute_starting_layout() -> Grid {
    let mut grid: Grid = Default::default();
    for color in [Color::White, Color::Black] {
        let home = color.home_row() as usize - 1;
        let pawns = (color.home_row() as i8 + color.pawn_direction()) as usize - 1;
        for (file, kind) in BACK_RANK.iter().enumerate() {
            grid[home][file] = Some(Piece::new(color, *kind));
            grid[pawns][file] = Some(Piece::new(color, PieceType::Pawn));
        }
    }
    grid
}

/// An 8x8 grid of optional pieces. Pieces are plain values, so a cloned board
/// never shares state with the original.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: Grid,
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Board::default()
    }

    /// A board holding the standard starting layout.
    pub fn starting() -> Self {
        let mut board = Board::new();
        board.reset();
        board
    }

    /// Installs the standard starting layout. Every call copies the layout
    /// afresh, so boards reset from it never alias one another.
    pub fn reset(&mut self) {
        self.grid = *STARTING_LAYOUT;
    }

    /// Unconditionally writes `piece` to `position`, overwriting any occupant.
    pub fn place(&mut self, position: Position, piece: Piece) {
        *self.slot_mut(position) = Some(piece);
    }

    pub fn get(&self, position: Position) -> Option<Piece> {
        self.grid[position.row() as usize - 1][position.column() as usize - 1]
    }

    pub fn remove(&mut self, position: Position) -> Option<Piece> {
        self.slot_mut(position).take()
    }

    /// Swaps in a new piece value, returning the old one. Promotion goes
    /// through here rather than editing a piece in place.
    pub fn replace(&mut self, position: Position, piece: Piece) -> Option<Piece> {
        self.slot_mut(position).replace(piece)
    }

    /// Relocates whatever stands on `mv.start()` to `mv.end()` and returns the
    /// captured piece, if any. No legality checks, no castling or promotion.
    pub fn apply_move(&mut self, mv: &Move) -> Option<Piece> {
        match self.remove(mv.start()) {
            Some(moving) => self.replace(mv.end(), moving),
            None => None,
        }
    }

    /// All 64 squares, row-major from (1,1).
    pub fn squares(&self) -> impl Iterator<Item = (Position, Option<Piece>)> + '_ {
        (0..(BOARD_SIZE as usize * BOARD_SIZE as usize)).map(move |index| {
            let position = Position::from_index(index);
            (position, self.get(position))
        })
    }

    /// Occupied squares only.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares()
            .filter_map(|(position, piece)| piece.map(|p| (position, p)))
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.color() == color && p.kind() == PieceType::King)
            .map(|(position, _)| position)
    }

    /// Parses the debug rendering back into a board: eight `|`-delimited lines,
    /// rank 8 first, one character per file, space for empty.
    pub fn from_diagram(text: &str) -> Result<Board> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != BOARD_SIZE as usize {
            return Err(ChessError::InvalidDiagram(format!(
                "expected {} ranks, found {}",
                BOARD_SIZE,
                lines.len()
            )));
        }

        let mut board = Board::new();
        for (i, line) in lines.iter().enumerate() {
            let row = BOARD_SIZE - i as u8;
            let inner = line
                .strip_prefix('|')
                .and_then(|rest| rest.strip_suffix('|'))
                .ok_or_else(|| ChessError::InvalidDiagram(format!("rank {} is not |-delimited", row)))?;
            let cells: Vec<&str> = inner.split('|').collect();
            if cells.len() != BOARD_SIZE as usize {
                return Err(ChessError::InvalidDiagram(format!(
                    "rank {} has {} files",
                    row,
                    cells.len()
                )));
            }
            for (file, cell) in cells.iter().enumerate() {
                let mut chars = cell.chars();
                let c = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => {
                        return Err(ChessError::InvalidDiagram(format!(
                            "rank {} file {} must be one character",
                            row,
                            file + 1
                        )))
                    }
                };
                if c == ' ' {
                    continue;
                }
                let piece = Piece::from_char(c)
                    .ok_or_else(|| ChessError::InvalidDiagram(format!("unknown piece '{}'", c)))?;
                // Row and file both come from bounded loops.
                if let Some(position) = Position::new(row, file as u8 + 1) {
                    board.place(position, piece);
                }
            }
        }
        Ok(board)
    }

    fn slot_mut(&mut self, position: Position) -> &mut Option<Piece> {
        &mut self.grid[position.row() as usize - 1][position.column() as usize - 1]
    }
}

// Debug rendering, rank 8 on top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.iter().rev() {
            write!(f, "|")?;
            for square in row {
                match square {
                    Some(piece) => write!(f, "{}|", piece)?,
                    None => write!(f, " |")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
