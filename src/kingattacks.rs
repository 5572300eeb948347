//! King steps and castling.
//!
//! A king move is a single step in any direction, or a castling move of two
//! squares towards an unmoved rook on the same row. The step itself is checked
//! here; whether the king ends up attacked is settled by the trial in
//! `movegeneration`, and castling additionally requires the squares the king
//! starts on and passes through to be safe.

use log::trace;

use crate::board::Board;
use crate::coords::{Coords, BOARD_SIZE};
use crate::movegeneration::{step_onto, MoveFlags, MovePlan, Movement};
use crate::piece::{King, PieceKind, Side};

#[inline]
fn is_single_step(src: Coords, dest: Coords) -> bool {
    let d_row = (dest.row - src.row).abs();
    let d_col = (dest.col - src.col).abs();
    d_row <= 1 && d_col <= 1 && (d_row, d_col) != (0, 0)
}

impl King {
    /// Geometry and piece conditions for castling from `src` to `dest`.
    ///
    /// The king must be unmoved on its home square and step exactly two
    /// columns towards a corner holding an unmoved friendly rook, with every
    /// square between king and rook empty.
    fn castling_plan(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> Option<MovePlan> {
        if self.has_moved || src != board.king_home(side) || dest.row != src.row {
            return None;
        }
        let direction = match dest.col - src.col {
            2 => 1,
            -2 => -1,
            _ => return None,
        };

        let rook_src = Coords::new(src.row, if direction > 0 { BOARD_SIZE - 1 } else { 0 });
        let rook = board.piece_at(rook_src)?;
        match rook.kind() {
            PieceKind::Rook(r) if rook.side() == side && !r.has_moved => {}
            _ => return None,
        }

        let mut col = src.col + direction;
        while col != rook_src.col {
            if board.is_occupied(Coords::new(src.row, col)) {
                return None;
            }
            col += direction;
        }

        let rook_dest = Coords::new(src.row, dest.col - direction);
        Some(MovePlan {
            rook: Some((rook_src, rook_dest)),
            ..MovePlan::quiet(src, dest).with(MoveFlags::CASTLE)
        })
    }
}

impl Movement for King {
    fn plan(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> Option<MovePlan> {
        if is_single_step(src, dest) {
            step_onto(board, side, src, dest)
        } else {
            self.castling_plan(board, side, src, dest)
        }
    }

    /// A king only ever attacks the squares around it.
    fn can_attack_position(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> bool {
        is_single_step(src, dest) && step_onto(board, side, src, dest).is_some()
    }
}

impl Board {
    /// The king-safety half of castling: the king may not castle out of
    /// check or through an attacked square. The landing square is covered by
    /// the general trial that every move goes through.
    pub(crate) fn castling_is_safe(&mut self, side: Side, plan: &MovePlan) -> bool {
        if self.is_in_check(side) {
            return false;
        }
        let direction = (plan.dest.col - plan.src.col).signum();
        let mut col = plan.src.col + direction;
        while col != plan.dest.col + direction {
            let step = MovePlan::quiet(plan.src, Coords::new(plan.src.row, col));
            if !self.leaves_king_safe(side, &step) {
                trace!("castling path square {} is attacked", step.dest);
                return false;
            }
            col += direction;
        }
        true
    }
}
