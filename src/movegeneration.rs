//! Move legality for every piece, and the check detector.
//!
//! Legality is decided in two phases. The variant's [`Movement`] checks
//! geometry, occupancy and path and produces a [`MovePlan`]; then the plan is
//! tried on the board and rejected if it leaves the mover's own king attacked.

use std::collections::BTreeSet;

use bitflags::bitflags;
use log::trace;

use crate::board::Board;
use crate::coords::Coords;
use crate::piece::{PieceKind, Side};

bitflags! {
    /// What a move does besides relocating the moving piece.
    pub struct MoveFlags: u8 {
        const CAPTURE = 1 << 0;
        const EN_PASSANT = 1 << 1;
        const CASTLE = 1 << 2;
        const DOUBLE_STEP = 1 << 3;
        const PROMOTION = 1 << 4;
    }
}

/// A geometrically valid move, not yet checked for king safety.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub src: Coords,
    pub dest: Coords,
    /// Square of the captured piece. Differs from `dest` only for en passant.
    pub capture: Option<Coords>,
    /// Rook relocation for castling.
    pub rook: Option<(Coords, Coords)>,
    pub flags: MoveFlags,
}

impl MovePlan {
    pub(crate) fn quiet(src: Coords, dest: Coords) -> MovePlan {
        MovePlan {
            src,
            dest,
            capture: None,
            rook: None,
            flags: MoveFlags::empty(),
        }
    }

    pub(crate) fn capturing(src: Coords, dest: Coords, captured: Coords) -> MovePlan {
        MovePlan {
            capture: Some(captured),
            flags: MoveFlags::CAPTURE,
            ..MovePlan::quiet(src, dest)
        }
    }

    pub(crate) fn with(mut self, flags: MoveFlags) -> MovePlan {
        self.flags |= flags;
        self
    }
}

/// Behaviour shared by every piece variant.
pub(crate) trait Movement {
    /// Checks bounds, occupancy, geometry and path for a move by a piece of
    /// `side` standing on `src`. King safety is not considered here.
    fn plan(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> Option<MovePlan>;

    /// Whether a piece of `side` on `src` attacks `dest`.
    fn can_attack_position(&self, board: &Board, side: Side, src: Coords, dest: Coords) -> bool {
        self.plan(board, side, src, dest).is_some()
    }
}

/// Bounds and occupancy rule common to every variant: `dest` must be on the
/// board and either empty or held by the other side.
pub(crate) fn step_onto(board: &Board, side: Side, src: Coords, dest: Coords) -> Option<MovePlan> {
    if !dest.in_bounds() || src == dest {
        return None;
    }
    match board.piece_at(dest) {
        None => Some(MovePlan::quiet(src, dest)),
        Some(target) if target.side() != side => Some(MovePlan::capturing(src, dest, dest)),
        Some(_) => None,
    }
}

impl Board {
    /// Whether the piece on `src` attacks `dest` under its own geometry.
    pub fn can_attack_position(&self, src: Coords, dest: Coords) -> bool {
        match self.piece_at(src) {
            Some(piece) => piece.kind().movement().can_attack_position(self, piece.side(), src, dest),
            None => false,
        }
    }

    /// Whether any piece in `by`'s roster attacks `target`.
    pub fn is_attacked(&self, target: Coords, by: Side) -> bool {
        self.roster_pieces(by)
            .any(|piece| piece.kind().movement().can_attack_position(self, by, piece.coords(), target))
    }

    /// Whether `side`'s king is attacked by the roster its king points at.
    ///
    /// A side without a king on the board is never in check.
    pub fn is_in_check(&self, side: Side) -> bool {
        match self.king(side) {
            Some(king) => match king.kind() {
                PieceKind::King(k) => self.is_attacked(king.coords(), k.opponent),
                _ => false,
            },
            None => false,
        }
    }

    /// Whether the piece on `src` may legally move to `dest`.
    pub fn is_valid_move(&mut self, src: Coords, dest: Coords) -> bool {
        self.legal_plan(src, dest).is_some()
    }

    /// Every destination the piece on `src` may legally move to.
    ///
    /// Computed fresh on each call. The board is only touched through trials
    /// and is unchanged when this returns.
    pub fn list_valid_moves(&mut self, src: Coords) -> BTreeSet<Coords> {
        Coords::all().filter(|&dest| self.is_valid_move(src, dest)).collect()
    }

    /// Whether moving `src` to `dest` is legal and needs a promotion choice.
    pub fn is_promotion_move(&mut self, src: Coords, dest: Coords) -> bool {
        self.legal_plan(src, dest)
            .map_or(false, |plan| plan.flags.contains(MoveFlags::PROMOTION))
    }

    pub(crate) fn legal_plan(&mut self, src: Coords, dest: Coords) -> Option<MovePlan> {
        let piece = self.piece_at(src)?;
        let side = piece.side();
        let plan = piece.kind().movement().plan(self, side, src, dest)?;

        if plan.flags.contains(MoveFlags::CASTLE) && !self.castling_is_safe(side, &plan) {
            trace!("castling {} -> {} passes through check", src, dest);
            return None;
        }
        if !self.leaves_king_safe(side, &plan) {
            trace!("{} -> {} leaves the {} king attacked", src, dest, side);
            return None;
        }
        Some(plan)
    }

    /// Tries the plan and asks whether `side`'s king is attacked afterwards.
    pub(crate) fn leaves_king_safe(&mut self, side: Side, plan: &MovePlan) -> bool {
        let trial = self.trial(plan);
        !trial.is_in_check(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::coords_of;
    use crate::piece::PieceType;

    fn at(board: &Board, position: &str) -> Coords {
        coords_of(position, board.perspective()).unwrap()
    }

    fn positions(board: &Board, moves: &BTreeSet<Coords>) -> BTreeSet<String> {
        moves.iter().map(|&c| crate::coords::position_of(c, board.perspective())).collect()
    }

    #[test]
    fn test_start_position_move_counts() {
        let mut board = Board::new(Side::White);
        let total: usize = board
            .roster(Side::White)
            .to_vec()
            .into_iter()
            .map(|id| {
                let src = board.piece(id).coords();
                board.list_valid_moves(src).len()
            })
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn test_start_position_move_counts_black_perspective() {
        let mut board = Board::new(Side::Black);
        for side in [Side::White, Side::Black] {
            let total: usize = board
                .roster(side)
                .to_vec()
                .into_iter()
                .map(|id| {
                    let src = board.piece(id).coords();
                    board.list_valid_moves(src).len()
                })
                .sum();
            assert_eq!(total, 20, "{}", side);
        }
    }

    #[test]
    fn test_list_valid_moves_empty_square() {
        let mut board = Board::new(Side::White);
        assert!(board.list_valid_moves(Coords::new(4, 4)).is_empty());
    }

    #[test]
    fn test_list_valid_moves_leaves_board_unchanged() {
        let mut board = Board::from_placement("r3k2r/8/8/3pP3/8/8/8/R3K2R", Side::White).unwrap();
        let before = board.placement();
        for src in Coords::all() {
            board.list_valid_moves(src);
        }
        assert_eq!(board.placement(), before);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_pinned_piece_cannot_leave_line() {
        // The e2 knight shields the e1 king from the e8 rook.
        let mut board = Board::from_placement("4r2k/8/8/8/8/8/4N3/4K3", Side::White).unwrap();
        let knight = at(&board, "e2");
        assert!(board.list_valid_moves(knight).is_empty());
        // The geometry alone would allow it.
        assert!(board.can_attack_position(knight, at(&board, "c3")));
        assert!(!board.is_valid_move(knight, at(&board, "c3")));
    }

    #[test]
    fn test_pinned_rook_may_slide_along_pin() {
        let mut board = Board::from_placement("4r2k/8/8/8/8/8/4R3/4K3", Side::White).unwrap();
        let rook = at(&board, "e2");
        let moves = board.list_valid_moves(rook);
        let moves = positions(&board, &moves);
        let expected: BTreeSet<String> = ["e3", "e4", "e5", "e6", "e7", "e8"].iter().map(|s| s.to_string()).collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_must_resolve_check() {
        let mut board = Board::from_placement("4r2k/8/8/8/8/8/8/R3K3", Side::White).unwrap();
        assert!(board.is_in_check(Side::White));
        // Rook moves that do not block the e-file are rejected.
        assert!(!board.is_valid_move(at(&board, "a1"), at(&board, "a2")));
        assert!(!board.is_valid_move(at(&board, "a1"), at(&board, "b1")));
        assert!(board.is_valid_move(at(&board, "e1"), at(&board, "d2")));
        assert!(!board.is_valid_move(at(&board, "e1"), at(&board, "e2")));
    }

    #[test]
    fn test_is_attacked_by_each_piece_type() {
        let board = Board::from_placement("8/8/8/3q4/8/5n2/1p6/8", Side::White).unwrap();
        assert!(board.is_attacked(at(&board, "d1"), Side::Black)); // queen file
        assert!(board.is_attacked(at(&board, "g8"), Side::Black)); // queen diagonal
        assert!(!board.is_attacked(at(&board, "h1"), Side::Black)); // diagonal blocked by the knight
        assert!(board.is_attacked(at(&board, "e1"), Side::Black)); // knight
        assert!(board.is_attacked(at(&board, "a1"), Side::Black)); // pawn diagonal
        assert!(board.is_attacked(at(&board, "c1"), Side::Black)); // pawn diagonal
        assert!(!board.is_attacked(at(&board, "b1"), Side::Black)); // pawn forward is not an attack
        assert!(!board.is_attacked(at(&board, "a8"), Side::White));
    }

    #[test]
    fn test_no_king_means_no_check() {
        let board = Board::from_placement("8/8/8/8/8/8/8/r7", Side::White).unwrap();
        assert!(!board.is_in_check(Side::White));
    }

    #[test]
    fn test_king_destinations_are_never_attacked() {
        let mut board = Board::from_placement("3rk3/8/8/8/8/8/2n5/4K3", Side::White).unwrap();
        let king = at(&board, "e1");
        let moves = board.list_valid_moves(king);
        assert!(!moves.is_empty());
        for dest in moves {
            let mut probe = board.clone();
            probe.apply_move(king, dest, None).unwrap();
            assert!(!probe.is_attacked(dest, Side::Black), "king walked onto {}", dest);
        }
    }

    #[test]
    fn test_placed_king_counts_as_piece() {
        let mut board = Board::empty(Side::White);
        let id = board.place(PieceType::King, Side::White, Coords::new(7, 4)).unwrap();
        assert_eq!(board.list_valid_moves(board.piece(id).coords()).len(), 5);
    }
}
