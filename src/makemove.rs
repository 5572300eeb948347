//! The move executor.
//!
//! A move is validated completely before anything on the board changes. Once
//! it is accepted the mutation order is fixed: the captured piece (the passed
//! pawn for en passant) is taken off, the mover and any castling rook are
//! relocated, moved-flags and en-passant eligibility are updated, and finally
//! a pawn reaching the last rank is promoted in place.

use log::debug;

use crate::board::Board;
use crate::coords::{coords_of, position_of, Coords};
use crate::error::ChessError;
use crate::movegeneration::MoveFlags;
use crate::piece::{EnPassant, PieceKind, PieceType, Promotion};

/// What an executed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub flags: MoveFlags,
    /// Type of the piece taken, if any.
    pub captured: Option<PieceType>,
    /// Type the pawn became, for promotions.
    pub promoted_to: Option<PieceType>,
}

impl Board {
    /// Executes the move of the piece on `src` to `dest`.
    ///
    /// # Arguments
    ///
    /// * `src` - Grid coordinates of the piece to move
    /// * `dest` - Grid coordinates of the destination square
    /// * `promotion` - The piece a pawn becomes on the last rank; ignored for other moves
    ///
    /// # Returns
    ///
    /// * The outcome of the move, or the reason it was rejected. A rejected
    ///   move leaves the board untouched.
    pub fn apply_move(&mut self, src: Coords, dest: Coords, promotion: Option<Promotion>) -> Result<MoveOutcome, ChessError> {
        let perspective = self.perspective();
        if !src.in_bounds() || !dest.in_bounds() {
            return Err(ChessError::IllegalMove {
                from: src.to_string(),
                to: dest.to_string(),
            });
        }
        let from = position_of(src, perspective);
        let to = position_of(dest, perspective);

        let mover = self.piece_id_at(src).ok_or_else(|| ChessError::NoPiece(from.clone()))?;
        let plan = match self.legal_plan(src, dest) {
            Some(plan) => plan,
            None => {
                debug!("rejected {} -> {}", from, to);
                return Err(ChessError::IllegalMove { from, to });
            }
        };
        let promotion = match (plan.flags.contains(MoveFlags::PROMOTION), promotion) {
            (true, None) => return Err(ChessError::PromotionRequired { from, to }),
            (true, Some(choice)) => Some(choice),
            (false, _) => None,
        };

        let captured = plan.capture.and_then(|at| self.piece_at(at)).map(|p| p.piece_type());
        let rook = plan.rook.and_then(|(rook_src, _)| self.piece_id_at(rook_src));

        self.apply_plan(&plan);

        self.piece_mut(mover).kind.mark_moved();
        if let Some(rook) = rook {
            self.piece_mut(rook).kind.mark_moved();
        }
        if plan.flags.contains(MoveFlags::DOUBLE_STEP) {
            if let PieceKind::Pawn(pawn) = &mut self.piece_mut(mover).kind {
                pawn.en_passant = EnPassant::Eligible;
            }
        }
        if let Some(choice) = promotion {
            self.piece_mut(mover).kind = choice.into_kind();
        }

        debug_assert!(self.is_consistent(), "{} -> {} left the board inconsistent", from, to);
        debug!("{} {} -> {} ({:?})", self.piece(mover).side(), from, to, plan.flags);

        Ok(MoveOutcome {
            flags: plan.flags,
            captured,
            promoted_to: promotion.map(Promotion::piece_type),
        })
    }

    /// Moves the piece on `src` to the square named by `dest_position`.
    ///
    /// Returns `false`, with the board unchanged, when the position string is
    /// malformed or the move is not legal.
    pub fn move_piece(&mut self, src: Coords, dest_position: &str, promotion: Option<Promotion>) -> bool {
        let result = coords_of(dest_position, self.perspective()).and_then(|dest| self.apply_move(src, dest, promotion));
        match result {
            Ok(_) => true,
            Err(err) => {
                debug!("move from {} refused: {}", src, err);
                false
            }
        }
    }
}
