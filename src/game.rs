use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use crate::board::Board;
use crate::castling::{CastleSide, CastlingRights, KING_HOME_COLUMN};
use crate::error::{ChessError, InvalidMoveReason, Result};
use crate::movegen;
use crate::piece::{Color, Piece, PieceType};
use crate::position::{Move, Position};

/// A game in progress: the board, the side to move, and castling rights.
///
/// All state changes go through [`Game::make_move`]. Legality probes work on
/// clones and never touch the live game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
    castling_rights: CastlingRights,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

// Castling rights are bookkeeping, not part of a game's identity.
impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.turn == other.turn && self.board == other.board
    }
}

impl Eq for Game {}

impl Game {
    /// Standard starting position, white to move, all castling rights intact.
    pub fn new() -> Self {
        Game::from_position(Board::starting(), Color::White)
    }

    /// Installs an arbitrary position. Castling rights start intact; castling
    /// is still only offered when king and rook stand on their home squares.
    pub fn from_position(board: Board, turn: Color) -> Self {
        Game::from_parts(board, turn, CastlingRights::initial())
    }

    pub fn from_parts(board: Board, turn: Color, castling_rights: CastlingRights) -> Self {
        Game { board, turn, castling_rights }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    // --- Move Queries ---

    /// Movement-rule moves for the piece on `position`, ignoring king safety.
    /// `None` when the square is empty.
    pub fn pseudo_legal_moves(&self, position: Position) -> Option<Vec<Move>> {
        self.board.get(position)?;
        Some(movegen::pseudo_legal_moves(&self.board, position))
    }

    /// Moves the piece on `position` may actually make: pseudo-legal moves
    /// that keep its own king safe, plus castling for a king.
    ///
    /// `Ok(None)` when the square is empty, `Ok(Some(vec![]))` when the piece
    /// is stuck.
    pub fn legal_moves(&self, position: Position) -> Result<Option<Vec<Move>>> {
        let Some(piece) = self.board.get(position) else {
            return Ok(None);
        };

        let mut moves = Vec::new();
        for mv in movegen::pseudo_legal_moves(&self.board, position) {
            if !self.puts_into_check(piece.color(), &mv)? {
                moves.push(mv);
            }
        }

        if piece.kind() == PieceType::King {
            moves.extend(self.castling_moves(position)?);
        }
        Ok(Some(moves))
    }

    /// Every legal move for the side to move.
    pub fn all_legal_moves(&self) -> Result<Vec<Move>> {
        let mut moves = Vec::new();
        for position in self.positions_of(self.turn) {
            moves.extend(self.legal_moves(position)?.unwrap_or_default());
        }
        Ok(moves)
    }

    /// Castling moves currently available to the king on `position`.
    ///
    /// A side is offered when its flag is set, the square the king crosses and
    /// the square it lands on are both empty, and neither is attacked. Attack
    /// probing uses direct moves only, so this never recurses into castling.
    ///
    /// Stricter than the flags alone: the king must stand on its home square
    /// and a same-colored rook on the corner, since the flags never notice a
    /// captured rook.
    pub fn castling_moves(&self, position: Position) -> Result<Vec<Move>> {
        let mut moves = Vec::new();
        let Some(king) = self.board.get(position).filter(|p| p.kind() == PieceType::King) else {
            return Ok(moves);
        };
        let color = king.color();
        if position.row() != color.home_row() || position.column() != KING_HOME_COLUMN {
            return Ok(moves);
        }

        for side in CastleSide::BOTH {
            if !self.castling_rights.allows(color, side) {
                continue;
            }
            let Some(rook_square) = Position::new(position.row(), side.rook_home_column()) else {
                continue;
            };
            if self.board.get(rook_square) != Some(Piece::new(color, PieceType::Rook)) {
                continue;
            }

            let direction = side.direction();
            let (Some(one_step), Some(two_step)) =
                (position.offset(0, direction), position.offset(0, 2 * direction))
            else {
                continue;
            };
            // Only the king's path must be empty; b1/b8 may stay occupied.
            if self.board.get(one_step).is_some() || self.board.get(two_step).is_some() {
                continue;
            }
            if self.puts_into_check(color, &Move::new(position, one_step, None))?
                || self.puts_into_check(color, &Move::new(position, two_step, None))?
            {
                continue;
            }
            moves.push(Move::new(position, two_step, None));
        }
        Ok(moves)
    }

    // --- Check Detection ---

    /// Whether `color`'s king is attacked. A missing king is reported as
    /// [`ChessError::MissingKing`], never as "not in check".
    pub fn is_in_check(&self, color: Color) -> Result<bool> {
        let king = self.board.find_king(color).ok_or_else(|| {
            error!(%color, "king not found on the board");
            ChessError::MissingKing(color)
        })?;
        Ok(movegen::is_square_attacked(&self.board, king, color.opponent()))
    }

    /// Plays `mv` on a throwaway copy and reports whether `color` ends up in check.
    fn puts_into_check(&self, color: Color, mv: &Move) -> Result<bool> {
        let mut probe = self.clone();
        probe.board.apply_move(mv);
        probe.is_in_check(color)
    }

    pub fn has_any_legal_move(&self, color: Color) -> Result<bool> {
        for position in self.positions_of(color) {
            if self.legal_moves(position)?.is_some_and(|moves| !moves.is_empty()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn is_in_checkmate(&self, color: Color) -> Result<bool> {
        Ok(self.is_in_check(color)? && !self.has_any_legal_move(color)?)
    }

    pub fn is_in_stalemate(&self, color: Color) -> Result<bool> {
        Ok(!self.is_in_check(color)? && !self.has_any_legal_move(color)?)
    }

    // --- Move Execution ---

    /// Validates and plays `mv` for the side to move.
    ///
    /// Castling also moves the rook, promotion swaps in the promoted piece,
    /// castling rights are updated and the turn passes to the opponent.
    #[instrument(level = "debug", skip(self), fields(turn = %self.turn))]
    pub fn make_move(&mut self, mv: &Move) -> Result<()> {
        let start = mv.start();
        let piece = self
            .board
            .get(start)
            .ok_or_else(|| reject(mv, InvalidMoveReason::EmptySquare(start)))?;
        if piece.color() != self.turn {
            return Err(reject(mv, InvalidMoveReason::WrongTurn { piece: piece.color(), to_move: self.turn }));
        }
        let legal = self.legal_moves(start)?.unwrap_or_default();
        if !legal.contains(mv) {
            return Err(reject(mv, InvalidMoveReason::NotLegal));
        }

        let captured = self.board.apply_move(mv);
        if let Some(captured) = captured {
            debug!(%captured, square = %mv.end(), "capture");
        }

        if piece.kind() == PieceType::King {
            self.relocate_castling_rook(mv);
        }
        self.update_castling_rights(mv, piece);

        if let Some(kind) = mv.promotion() {
            self.board.replace(mv.end(), piece.promoted_to(kind));
            debug!(square = %mv.end(), ?kind, "pawn promoted");
        }

        self.turn = self.turn.opponent();
        debug!(%mv, next = %self.turn, "move applied");
        Ok(())
    }

    /// A king travelling two files is castling; bring the rook to the square
    /// it just crossed.
    fn relocate_castling_rook(&mut self, mv: &Move) {
        let travel = mv.end().column() as i8 - mv.start().column() as i8;
        if travel.abs() != 2 {
            return;
        }
        let side = if travel > 0 { CastleSide::Kingside } else { CastleSide::Queenside };
        let rook_from = Position::new(mv.end().row(), side.rook_home_column());
        let rook_to = mv.end().offset(0, -side.direction());
        if let (Some(from), Some(to)) = (rook_from, rook_to) {
            self.board.apply_move(&Move::new(from, to, None));
            debug!(?side, rook_from = %from, rook_to = %to, "castled");
        }
    }

    /// Rights are cleared when a king moves, or when a knight leaves a rook's
    /// home file. Nothing else revokes them.
    fn update_castling_rights(&mut self, mv: &Move, mover: Piece) {
        let before = self.castling_rights;
        match mover.kind() {
            PieceType::King => self.castling_rights.king_moved(mover.color()),
            PieceType::Knight => {
                if let Some(side) = CastleSide::from_rook_column(mv.start().column()) {
                    self.castling_rights.revoke(mover.color(), side);
                }
            }
            _ => {}
        }
        if self.castling_rights != before {
            debug!(rights = ?self.castling_rights, "castling rights changed");
        }
    }

    fn positions_of(&self, color: Color) -> Vec<Position> {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.color() == color)
            .map(|(position, _)| position)
            .collect()
    }
}

fn reject(mv: &Move, reason: InvalidMoveReason) -> ChessError {
    warn!(%mv, %reason, "move rejected");
    ChessError::invalid_move(*mv, reason)
}
