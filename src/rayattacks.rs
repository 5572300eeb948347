//! Sliding pieces: rooks, bishops and queens.
//!
//! A slide is legal when the geometry matches the piece, the destination is
//! empty or hostile, and every square strictly between source and destination
//! is empty.

use crate::board::Board;
use crate::coords::Coords;
use crate::movegeneration::{step_onto, MovePlan, Movement};
use crate::piece::{Bishop, Queen, Rook, Side};

/// Same row or same column, but not both.
#[inline]
pub(crate) fn is_linear_move(src: Coords, dest: Coords) -> bool {
    (src.row == dest.row) ^ (src.col == dest.col)
}

#[inline]
pub(crate) fn is_diagonal_move(src: Coords, dest: Coords) -> bool {
    let d_row = (dest.row - src.row).abs();
    d_row != 0 && d_row == (dest.col - src.col).abs()
}

/// Whether every square strictly between `src` and `dest` is empty.
///
/// Only meaningful for squares on a shared row, column or diagonal.
pub(crate) fn is_clear_path(board: &Board, src: Coords, dest: Coords) -> bool {
    let d_row = (dest.row - src.row).signum();
    let d_col = (dest.col - src.col).signum();
    let distance = (dest.row - src.row).abs().max((dest.col - src.col).abs());

    (1..distance).all(|i| !board.is_occupied(src.offset(i * d_row, i * d_col)))
}

fn slide(board: &Board, side: Side, src: Coords, dest: Coords, geometry: bool) -> Option<MovePlan> {
    if !geometry {
        return None;
    }
    let plan = step_onto(board, side, src, dest)?;
    if is_clear_path(board, src, dest) {
        Some(plan)
    } else {
        None
    }
}

impl Movement for Rook {
    fn plan(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> Option<MovePlan> {
        slide(board, side, src, dest, is_linear_move(src, dest))
    }
}

impl Movement for Bishop {
    fn plan(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> Option<MovePlan> {
        slide(board, side, src, dest, is_diagonal_move(src, dest))
    }
}

impl Movement for Queen {
    fn plan(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> Option<MovePlan> {
        slide(board, side, src, dest, is_linear_move(src, dest) || is_diagonal_move(src, dest))
    }
}
