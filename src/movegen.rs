//! Pseudo-legal move generation.
//!
//! Every piece except the pawn is described by a list of [`Behavior`]s and
//! walked by the same ray-casting loop. Pawns get their own routine because
//! advancing and capturing are not interchangeable for them.
//!
//! Nothing here knows about check; [`crate::game::Game`] filters on top.

use crate::board::Board;
use crate::piece::{Color, PieceType, PROMOTION_CHOICES};
use crate::position::{Move, Position};

/// One direction of travel with an optional step limit. `max_distance: None`
/// slides until blocked or off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Behavior {
    pub row_delta: i8,
    pub column_delta: i8,
    pub max_distance: Option<u8>,
}

impl Behavior {
    pub const fn step(row_delta: i8, column_delta: i8) -> Self {
        Behavior { row_delta, column_delta, max_distance: Some(1) }
    }

    pub const fn slide(row_delta: i8, column_delta: i8) -> Self {
        Behavior { row_delta, column_delta, max_distance: None }
    }
}

// --- Movement Tables ---

const KING_BEHAVIORS: [Behavior; 8] = [
    Behavior::step(1, 1), Behavior::step(-1, 1), Behavior::step(1, -1), Behavior::step(-1, -1),
    Behavior::step(1, 0), Behavior::step(-1, 0), Behavior::step(0, 1), Behavior::step(0, -1),
];

const QUEEN_BEHAVIORS: [Behavior; 8] = [
    Behavior::slide(1, 1), Behavior::slide(-1, 1), Behavior::slide(1, -1), Behavior::slide(-1, -1),
    Behavior::slide(1, 0), Behavior::slide(-1, 0), Behavior::slide(0, 1), Behavior::slide(0, -1),
];

const BISHOP_BEHAVIORS: [Behavior; 4] = [
    Behavior::slide(1, 1), Behavior::slide(-1, 1), Behavior::slide(1, -1), Behavior::slide(-1, -1),
];

const ROOK_BEHAVIORS: [Behavior; 4] = [
    Behavior::slide(1, 0), Behavior::slide(-1, 0), Behavior::slide(0, 1), Behavior::slide(0, -1),
];

const KNIGHT_BEHAVIORS: [Behavior; 8] = [
    Behavior::step(1, 2), Behavior::step(-1, 2), Behavior::step(1, -2), Behavior::step(-1, -2),
    Behavior::step(2, 1), Behavior::step(-2, 1), Behavior::step(2, -1), Behavior::step(-2, -1),
];

/// Movement profile of a piece type. Pawns have none.
pub fn behaviors(kind: PieceType) -> &'static [Behavior] {
    match kind {
        PieceType::King => &KING_BEHAVIORS,
        PieceType::Queen => &QUEEN_BEHAVIORS,
        PieceType::Bishop => &BISHOP_BEHAVIORS,
        PieceType::Rook => &ROOK_BEHAVIORS,
        PieceType::Knight => &KNIGHT_BEHAVIORS,
        PieceType::Pawn => &[],
    }
}

/// Moves the piece on `from` could make ignoring the safety of its own king.
/// Empty when the square is empty.
pub fn pseudo_legal_moves(board: &Board, from: Position) -> Vec<Move> {
    let mut moves = Vec::new();
    if let Some(piece) = board.get(from) {
        match piece.kind() {
            PieceType::Pawn => generate_pawn_moves(board, from, piece.color(), &mut moves),
            kind => walk(board, from, piece.color(), behaviors(kind), &mut moves),
        }
    }
    moves
}

/// Ray walk shared by all non-pawn pieces: empty squares extend the ray, an
/// enemy ends it after being added, a friend ends it before.
pub fn walk(board: &Board, from: Position, color: Color, behaviors: &[Behavior], moves: &mut Vec<Move>) {
    for behavior in behaviors {
        let mut current = from;
        let mut distance: u8 = 0;
        while behavior.max_distance.map_or(true, |max| distance < max) {
            let Some(next) = current.offset(behavior.row_delta, behavior.column_delta) else {
                break; // off the board
            };
            distance += 1;
            current = next;

            match board.get(next) {
                None => moves.push(Move::new(from, next, None)),
                Some(occupant) if occupant.color() != color => {
                    moves.push(Move::new(from, next, None));
                    break;
                }
                Some(_) => break,
            }
        }
    }
}

/// Single forward step onto an empty square, diagonal steps onto enemies only.
/// No double step and no en passant.
fn generate_pawn_moves(board: &Board, from: Position, color: Color, moves: &mut Vec<Move>) {
    let forward = color.pawn_direction();

    if let Some(ahead) = from.offset(forward, 0) {
        if board.get(ahead).is_none() {
            push_pawn_move(from, ahead, color, moves);
        }
    }

    for side in [-1, 1] {
        if let Some(diagonal) = from.offset(forward, side) {
            if board.get(diagonal).is_some_and(|p| p.color() != color) {
                push_pawn_move(from, diagonal, color, moves);
            }
        }
    }
}

fn push_pawn_move(from: Position, to: Position, color: Color, moves: &mut Vec<Move>) {
    if to.row() == color.promotion_row() {
        moves.extend(PROMOTION_CHOICES.iter().map(|kind| Move::new(from, to, Some(*kind))));
    } else {
        moves.push(Move::new(from, to, None));
    }
}

/// True if any `attacker` piece has a pseudo-legal move ending on `target`.
///
/// Only direct movement is considered, never castling, so this is safe to
/// call while deciding whether castling is available.
pub fn is_square_attacked(board: &Board, target: Position, attacker: Color) -> bool {
    board
        .pieces()
        .filter(|(_, piece)| piece.color() == attacker)
        .any(|(from, _)| pseudo_legal_moves(board, from).iter().any(|mv| mv.end() == target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use std::collections::HashSet;

    fn pos(row: u8, column: u8) -> Position {
        Position::new(row, column).unwrap()
    }

    fn ends(moves: &[Move]) -> HashSet<Position> {
        moves.iter().map(|mv| mv.end()).collect()
    }

    #[test]
    fn lone_rook_covers_its_rank_and_file() {
        let mut board = Board::new();
        board.place(pos(4, 4), Piece::new(Color::White, PieceType::Rook));
        let moves = pseudo_legal_moves(&board, pos(4, 4));
        assert_eq!(moves.len(), 14);
        assert!(moves.iter().all(|mv| mv.start() == pos(4, 4) && mv.promotion().is_none()));
    }

    #[test]
    fn slider_stops_on_enemy_and_before_friend() {
        let board = Board::from_diagram(
            "
            | | | | | | | | |
            | | | | | | | | |
            | | | |p| | | | |
            | | | | | | | | |
            | | | |B| | | | |
            | | | |Q| | | | |
            | | | | | | | | |
            | | | | | | | | |
            ",
        )
        .unwrap();
        let moves = pseudo_legal_moves(&board, pos(3, 4));
        let targets = ends(&moves);

        // Down the file to the edge.
        assert!(targets.contains(&pos(1, 4)));
        // Friendly bishop on d4 blocks the file upward.
        assert!(!targets.contains(&pos(4, 4)));
        assert!(!targets.contains(&pos(6, 4)));
        // Diagonals are open to the edge.
        assert!(targets.contains(&pos(7, 8)));
        assert!(targets.contains(&pos(1, 2)));

        let bishop = pseudo_legal_moves(&board, pos(4, 4));
        let bishop_targets = ends(&bishop);
        assert!(!bishop_targets.contains(&pos(3, 4)));
        assert_eq!(bishop.len(), 13);
    }

    #[test]
    fn ray_ends_on_first_enemy() {
        let board = Board::from_diagram(
            "
            | | | | | | | | |
            | | | | | | | | |
            | | | |p| | | | |
            | | | | | | | | |
            | | | |R| | | | |
            | | | | | | | | |
            | | | | | | | | |
            | | | | | | | | |
            ",
        )
        .unwrap();
        let targets = ends(&pseudo_legal_moves(&board, pos(4, 4)));
        assert!(targets.contains(&pos(5, 4)));
        assert!(targets.contains(&pos(6, 4)));
        assert!(!targets.contains(&pos(7, 4)));
        assert!(!targets.contains(&pos(8, 4)));
    }

    #[test]
    fn knight_jumps_and_skips_friends() {
        let board = Board::starting();
        let targets = ends(&pseudo_legal_moves(&board, pos(1, 2)));
        assert_eq!(targets, HashSet::from([pos(3, 1), pos(3, 3)]));
    }

    #[test]
    fn king_steps_once() {
        let mut board = Board::new();
        board.place(pos(1, 1), Piece::new(Color::Black, PieceType::King));
        let targets = ends(&pseudo_legal_moves(&board, pos(1, 1)));
        assert_eq!(targets, HashSet::from([pos(1, 2), pos(2, 1), pos(2, 2)]));
    }

    #[test]
    fn pawn_advances_only_onto_empty_square() {
        let board = Board::from_diagram(
            "
            | | | | | | | | |
            | | | | | | | | |
            | | | | | | | | |
            | | | | | | | | |
            | | | |n| | | | |
            | | | |P| | | | |
            | | | | | | | | |
            | | | | | | | | |
            ",
        )
        .unwrap();
        assert!(pseudo_legal_moves(&board, pos(3, 4)).is_empty());
    }

    #[test]
    fn pawn_captures_diagonally_only() {
        let board = Board::from_diagram(
            "
            | | | | | | | | |
            | | | | | | | | |
            | | | | | | | | |
            | | | | | | | | |
            | | |n| |N| | | |
            | | | |P| | | | |
            | | | | | | | | |
            | | | | | | | | |
            ",
        )
        .unwrap();
        let targets = ends(&pseudo_legal_moves(&board, pos(3, 4)));
        assert_eq!(targets, HashSet::from([pos(4, 4), pos(4, 3)]));
    }

    #[test]
    fn black_pawn_moves_down_the_board() {
        let board = Board::starting();
        let moves = pseudo_legal_moves(&board, pos(7, 3));
        assert_eq!(moves, vec![Move::new(pos(7, 3), pos(6, 3), None)]);
    }

    #[test]
    fn promotion_expands_into_four_moves() {
        let board = Board::from_diagram(
            "
            | |r| | | | | | |
            |P| | | | | | | |
            | | | | | | | | |
            | | | | | | | | |
            | | | | | | | | |
            | | | | | | | | |
            | | | | | | | | |
            | | | | | | | | |
            ",
        )
        .unwrap();
        let moves = pseudo_legal_moves(&board, pos(7, 1));
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|mv| mv.promotion().is_some()));
        for kind in PROMOTION_CHOICES {
            assert!(moves.contains(&Move::new(pos(7, 1), pos(8, 1), Some(kind))));
            assert!(moves.contains(&Move::new(pos(7, 1), pos(8, 2), Some(kind))));
        }
    }

    #[test]
    fn attacked_squares_follow_pseudo_legal_moves() {
        let board = Board::starting();
        assert!(is_square_attacked(&board, pos(3, 3), Color::White));
        assert!(!is_square_attacked(&board, pos(4, 3), Color::White));
        assert!(is_square_attacked(&board, pos(6, 1), Color::Black));
        // Own pieces are never "attacked" by their own side.
        assert!(!is_square_attacked(&board, pos(1, 2), Color::White));
    }
}
