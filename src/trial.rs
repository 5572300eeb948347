//! Trial moves with guaranteed rollback.
//!
//! [`Board::trial`] applies a [`MovePlan`] to the live board and hands back a
//! [`Trial`] guard that dereferences to the board in its trial state. Dropping
//! the guard puts every touched square, moved piece and captured roster entry
//! back exactly as it was. The guard holds the only mutable borrow of the
//! board for its whole life, so trials cannot nest or interleave with other
//! mutation.

use std::ops::Deref;

use log::trace;

use crate::board::Board;
use crate::coords::Coords;
use crate::movegeneration::MovePlan;
use crate::piece::{Piece, PieceId, Side};

/// What [`Board::apply_plan`] changed, in enough detail to undo it.
#[derive(Debug, Default)]
pub(crate) struct Undo {
    /// Occupants of every touched square, captured before any change.
    squares: Vec<(Coords, Option<PieceId>)>,
    /// Moved pieces as they were before the move.
    pieces: Vec<(PieceId, Piece)>,
    /// Roster slot the captured piece was taken from.
    captured: Option<(Side, usize, PieceId)>,
}

/// A board with a move temporarily applied. Rolled back on drop.
pub struct Trial<'a> {
    board: &'a mut Board,
    undo: Option<Undo>,
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.rollback(undo);
        }
    }
}

impl Board {
    /// Applies `plan` until the returned guard is dropped.
    pub(crate) fn trial(&mut self, plan: &MovePlan) -> Trial<'_> {
        trace!("trial {} -> {}", plan.src, plan.dest);
        let undo = self.apply_plan(plan);
        Trial { board: self, undo: Some(undo) }
    }

    /// Performs the board part of a move: removes the captured piece from its
    /// square and roster, then relocates the mover and, when castling, the rook.
    ///
    /// Flags, en-passant state and promotion are left to the executor.
    pub(crate) fn apply_plan(&mut self, plan: &MovePlan) -> Undo {
        let mut undo = Undo::default();

        let mut touched = vec![plan.src, plan.dest];
        touched.extend(plan.capture);
        if let Some((rook_src, rook_dest)) = plan.rook {
            touched.push(rook_src);
            touched.push(rook_dest);
        }
        for coords in touched {
            undo.squares.push((coords, self.piece_id_at(coords)));
        }

        if let Some(captured_at) = plan.capture {
            if let Some(captured) = self.piece_id_at(captured_at) {
                self.set_occupant(captured_at, None);
                undo.captured = self
                    .remove_from_roster(captured)
                    .map(|(side, index)| (side, index, captured));
            }
        }

        let moves = std::iter::once((plan.src, plan.dest)).chain(plan.rook);
        for (from, to) in moves {
            if let Some(id) = self.piece_id_at(from) {
                undo.pieces.push((id, self.piece(id).clone()));
                self.relocate(id, to);
            }
        }

        undo
    }

    fn rollback(&mut self, undo: Undo) {
        for (id, piece) in undo.pieces.into_iter().rev() {
            *self.piece_mut(id) = piece;
        }
        for (coords, occupant) in undo.squares.into_iter().rev() {
            self.set_occupant(coords, occupant);
        }
        if let Some((side, index, id)) = undo.captured {
            self.restore_to_roster(side, index, id);
        }
        debug_assert!(self.is_consistent(), "rollback left the board inconsistent");
    }
}
