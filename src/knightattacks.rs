//! Knight geometry.
//!
//! Knights jump, so there is no path to clear: the move is legal when the
//! offset is one of the eight L-shapes and the landing square is empty or hostile.

use crate::board::Board;
use crate::coords::Coords;
use crate::movegeneration::{step_onto, MovePlan, Movement};
use crate::piece::{Knight, Side};

pub(crate) const KNIGHT_DELTAS: [(i32, i32); 8] = [(1, 2), (1, -2), (-1, 2), (-1, -2), (2, 1), (2, -1), (-2, 1), (-2, -1)];

#[inline]
pub(crate) fn is_l_shaped_move(src: Coords, dest: Coords) -> bool {
    KNIGHT_DELTAS.contains(&(dest.row - src.row, dest.col - src.col))
}

impl Movement for Knight {
    fn plan(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> Option<MovePlan> {
        if is_l_shaped_move(src, dest) {
            step_onto(board, side, src, dest)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceType;
    use std::collections::BTreeSet;

    /// Tests that knight moves are exactly the in-bounds L-shapes not held by a friend
    #[test]
    fn test_knight_moves_match_l_shapes_everywhere() {
        for src in Coords::all() {
            let mut board = Board::from_placement("8/8/8/8/8/8/8/8", Side::White).unwrap();
            board.place(PieceType::Knight, Side::White, src).unwrap();
            // Friendly blocker on one target and an enemy on another, where they fit.
            let targets: Vec<Coords> = KNIGHT_DELTAS
                .iter()
                .map(|&(r, c)| src.offset(r, c))
                .filter(|c| c.in_bounds())
                .collect();
            if let Some(&friend) = targets.first() {
                board.place(PieceType::Pawn, Side::White, friend).unwrap();
            }
            if let Some(&enemy) = targets.get(1) {
                board.place(PieceType::Pawn, Side::Black, enemy).unwrap();
            }

            let moves = board.list_valid_moves(src);
            for dest in &moves {
                assert!(is_l_shaped_move(src, *dest), "{} -> {}", src, dest);
                assert!(dest.in_bounds());
                assert_ne!(board.piece_at(*dest).map(|p| p.side()), Some(Side::White));
            }
            assert_eq!(moves.len(), targets.len().saturating_sub(1), "from {}", src);
        }
    }

    #[test]
    fn test_corner_knight() {
        let mut board = Board::empty(Side::White);
        board.place(PieceType::Knight, Side::Black, Coords::new(0, 0)).unwrap();
        let moves = board.list_valid_moves(Coords::new(0, 0));
        let expected: BTreeSet<Coords> = [Coords::new(1, 2), Coords::new(2, 1)].into_iter().collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let mut board = Board::new(Side::White);
        // b1 knight reaches a3 and c3 over its own pawns.
        let moves = board.list_valid_moves(Coords::new(7, 1));
        let expected: BTreeSet<Coords> = [Coords::new(5, 0), Coords::new(5, 2)].into_iter().collect();
        assert_eq!(moves, expected);
    }
}
