//! Pawn moves, captures, en passant and promotion detection.
//!
//! "Forward" depends on the board: pawns of the perspective side advance
//! towards row 0, the other side's pawns towards row 7.

use crate::board::Board;
use crate::coords::Coords;
use crate::movegeneration::{MoveFlags, MovePlan, Movement};
use crate::piece::{EnPassant, Pawn, PieceKind, Side};

#[inline]
fn is_diagonal_step(board: &Board, side: Side, src: Coords, dest: Coords) -> bool {
    dest.row - src.row == board.forward(side) && (dest.col - src.col).abs() == 1
}

/// The square of an opposing pawn that can be taken en passant by a pawn of
/// `side` stepping diagonally from `src` to the empty square `dest`.
///
/// The passed pawn stands beside the capturer, on the capturer's row and the
/// destination's column.
pub(crate) fn en_passant_target(board: &Board, side: Side, src: Coords, dest: Coords) -> Option<Coords> {
    let passed = Coords::new(src.row, dest.col);
    let piece = board.piece_at(passed)?;
    match piece.kind() {
        PieceKind::Pawn(pawn) if piece.side() != side && pawn.en_passant == EnPassant::Eligible => Some(passed),
        _ => None,
    }
}

impl Movement for Pawn {
    fn plan(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> Option<MovePlan> {
        if !dest.in_bounds() {
            return None;
        }

        let forward = board.forward(side);
        let d_row = dest.row - src.row;
        let d_col = dest.col - src.col;

        let plan = if d_col == 0 && d_row == forward {
            if board.is_occupied(dest) {
                return None;
            }
            MovePlan::quiet(src, dest)
        } else if d_col == 0 && d_row == 2 * forward {
            // Double step: unmoved, from the starting rank, through and onto empty squares.
            if self.has_moved
                || src.row != board.pawn_row(side)
                || board.is_occupied(src.offset(forward, 0))
                || board.is_occupied(dest)
            {
                return None;
            }
            MovePlan::quiet(src, dest).with(MoveFlags::DOUBLE_STEP)
        } else if is_diagonal_step(board, side, src, dest) {
            match board.piece_at(dest) {
                Some(target) if target.side() != side => MovePlan::capturing(src, dest, dest),
                Some(_) => return None,
                None => {
                    let passed = en_passant_target(board, side, src, dest)?;
                    MovePlan::capturing(src, dest, passed).with(MoveFlags::EN_PASSANT)
                }
            }
        } else {
            return None;
        };

        if dest.row == board.promotion_row(side) {
            Some(plan.with(MoveFlags::PROMOTION))
        } else {
            Some(plan)
        }
    }

    /// Pawns attack only their two forward diagonals, whether or not anything
    /// stands there yet.
    fn can_attack_position(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> bool {
        dest.in_bounds()
            && is_diagonal_step(board, side, src, dest)
            && board.piece_at(dest).map_or(true, |target| target.side() != side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{coords_of, position_of};
    use std::collections::BTreeSet;

    fn at(board: &Board, position: &str) -> Coords {
        coords_of(position, board.perspective()).unwrap()
    }

    fn moves(board: &mut Board, position: &str) -> BTreeSet<String> {
        let src = at(board, position);
        let perspective = board.perspective();
        board
            .list_valid_moves(src)
            .into_iter()
            .map(|c| position_of(c, perspective))
            .collect()
    }

    fn set(positions: &[&str]) -> BTreeSet<String> {
        positions.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_and_double_step_from_start() {
        for perspective in [Side::White, Side::Black] {
            let mut board = Board::new(perspective);
            assert_eq!(moves(&mut board, "e2"), set(&["e3", "e4"]), "{}", perspective);
            assert_eq!(moves(&mut board, "d7"), set(&["d6", "d5"]), "{}", perspective);
        }
    }

    #[test]
    fn test_double_step_needs_clear_path() {
        let mut board = Board::from_placement("4k3/8/8/8/8/4n3/4P3/4K3", Side::White).unwrap();
        assert!(moves(&mut board, "e2").is_empty());

        let mut board = Board::from_placement("4k3/8/8/8/4n3/8/4P3/4K3", Side::White).unwrap();
        assert_eq!(moves(&mut board, "e2"), set(&["e3"]));
    }

    #[test]
    fn test_moved_pawn_has_no_double_step() {
        let mut board = Board::from_placement("4k3/8/8/8/8/4P3/8/4K3", Side::White).unwrap();
        assert_eq!(moves(&mut board, "e3"), set(&["e4"]));
    }

    #[test]
    fn test_pawn_captures_diagonally_only() {
        let mut board = Board::from_placement("4k3/8/8/3p1P2/4P3/8/8/4K3", Side::White).unwrap();
        // d5 is hostile, f5 is friendly.
        assert_eq!(moves(&mut board, "e4"), set(&["e5", "d5"]));
    }

    #[test]
    fn test_pawn_cannot_capture_forward() {
        let mut board = Board::from_placement("4k3/8/8/4p3/4P3/8/8/4K3", Side::White).unwrap();
        assert!(moves(&mut board, "e4").is_empty());
    }

    #[test]
    fn test_pawn_attacks_ignore_forward_squares() {
        let board = Board::from_placement("4k3/8/8/8/4p3/8/8/4K3", Side::White).unwrap();
        let pawn = at(&board, "e4");
        assert!(board.can_attack_position(pawn, at(&board, "d3")));
        assert!(board.can_attack_position(pawn, at(&board, "f3")));
        assert!(!board.can_attack_position(pawn, at(&board, "e3")));
        assert!(!board.can_attack_position(pawn, at(&board, "d5")));
    }

    #[test]
    fn test_en_passant_target_requires_eligible_pawn() {
        let mut board = Board::from_placement("4k3/8/8/3pP3/8/8/8/4K3", Side::White).unwrap();
        let src = at(&board, "e5");
        let dest = at(&board, "d6");
        assert_eq!(en_passant_target(&board, Side::White, src, dest), None);
        assert!(!moves(&mut board, "e5").contains("d6"));

        let passed = at(&board, "d5");
        let id = board.piece_id_at(passed).unwrap();
        if let PieceKind::Pawn(pawn) = &mut board.piece_mut(id).kind {
            pawn.en_passant = EnPassant::Eligible;
        }
        assert_eq!(en_passant_target(&board, Side::White, src, dest), Some(passed));
        assert!(moves(&mut board, "e5").contains("d6"));
    }

    #[test]
    fn test_promotion_flag_on_last_rank() {
        let mut board = Board::from_placement("4k3/P7/8/8/8/8/7p/4K3", Side::White).unwrap();
        let a7 = at(&board, "a7");
        let a8 = at(&board, "a8");
        assert!(board.is_promotion_move(a7, a8));
        let h2 = at(&board, "h2");
        let h1 = at(&board, "h1");
        assert!(board.is_promotion_move(h2, h1));
        assert!(!board.is_promotion_move(a7, at(&board, "a6")));
    }

    #[test]
    fn test_black_perspective_directions() {
        let mut board = Board::from_placement("4k3/P7/8/8/8/8/7p/4K3", Side::Black).unwrap();
        assert_eq!(moves(&mut board, "a7"), set(&["a8"]));
        assert_eq!(moves(&mut board, "h2"), set(&["h1"]));
    }
}
