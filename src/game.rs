//! Turn sequencing around a [`Board`].
//!
//! The board itself does not know whose move it is. `Game` adds that single
//! piece of state, refuses moves by the wrong side, and ticks the en-passant
//! windows of the side about to move.

use std::collections::BTreeSet;

use log::debug;

use crate::board::Board;
use crate::coords::{coords_of, Coords};
use crate::error::ChessError;
use crate::makemove::MoveOutcome;
use crate::piece::{Promotion, Side};

/// A game in progress: the board and the side to move.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Side,
}

impl Game {
    /// Creates a game in the standard starting position.
    ///
    /// # Arguments
    ///
    /// * `perspective` - The side shown at the bottom of the board
    ///
    /// # Returns
    ///
    /// * A new `Game` with white to move
    pub fn new(perspective: Side) -> Game {
        Game::from_board(Board::new(perspective), Side::White)
    }

    /// Wraps an existing board, with `turn` to move.
    pub fn from_board(board: Board, turn: Side) -> Game {
        Game { board, turn }
    }

    /// The board being played on.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the board, bypassing turn order.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.board.is_in_check(self.turn)
    }

    /// Legal destinations for the piece on `src`, empty unless it belongs to
    /// the side to move.
    pub fn valid_moves(&mut self, src: Coords) -> BTreeSet<Coords> {
        let movable = self.board.piece_at(src).map_or(false, |piece| piece.side() == self.turn);
        if movable {
            self.board.list_valid_moves(src)
        } else {
            BTreeSet::new()
        }
    }

    /// Plays a move for the side to move, then hands the turn over.
    pub fn play(&mut self, src: Coords, dest: Coords, promotion: Option<Promotion>) -> Result<MoveOutcome, ChessError> {
        if let Some(piece) = self.board.piece_at(src) {
            if piece.side() != self.turn {
                return Err(ChessError::WrongTurn(piece.side().to_string()));
            }
        }
        let outcome = self.board.apply_move(src, dest, promotion)?;

        self.turn = self.turn.other();
        self.board.begin_turn(self.turn);
        debug!("{} to move", self.turn);
        Ok(outcome)
    }

    /// [`Game::play`] with both squares given in algebraic notation.
    pub fn play_positions(&mut self, src: &str, dest: &str, promotion: Option<Promotion>) -> Result<MoveOutcome, ChessError> {
        let perspective = self.board.perspective();
        let src = coords_of(src, perspective)?;
        let dest = coords_of(dest, perspective)?;
        self.play(src, dest, promotion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::EnPassant;

    fn en_passant_at(game: &Game, position: &str) -> Option<EnPassant> {
        let coords = coords_of(position, game.board().perspective()).unwrap();
        game.board().piece_at(coords).and_then(|p| p.en_passant())
    }

    #[test]
    fn test_white_moves_first() {
        for perspective in [Side::White, Side::Black] {
            let mut game = Game::new(perspective);
            assert_eq!(game.turn(), Side::White);
            assert_eq!(
                game.play_positions("e7", "e5", None),
                Err(ChessError::WrongTurn("black".to_string()))
            );
            game.play_positions("e2", "e4", None).unwrap();
            assert_eq!(game.turn(), Side::Black);
            assert!(game.play_positions("d2", "d4", None).is_err());
        }
    }

    #[test]
    fn test_valid_moves_only_for_side_to_move() {
        let mut game = Game::new(Side::White);
        let e7 = coords_of("e7", Side::White).unwrap();
        let e2 = coords_of("e2", Side::White).unwrap();
        assert!(game.valid_moves(e7).is_empty());
        assert_eq!(game.valid_moves(e2).len(), 2);
    }

    #[test]
    fn test_en_passant_window_lasts_one_reply() {
        let mut game = Game::new(Side::White);
        game.play_positions("e2", "e4", None).unwrap();
        game.play_positions("a7", "a6", None).unwrap();
        game.play_positions("e4", "e5", None).unwrap();
        game.play_positions("d7", "d5", None).unwrap();
        assert_eq!(en_passant_at(&game, "d5"), Some(EnPassant::Eligible));

        // White declines; the window closes when black's next turn begins.
        game.play_positions("h2", "h3", None).unwrap();
        assert_eq!(en_passant_at(&game, "d5"), Some(EnPassant::Expired));
        game.play_positions("a6", "a5", None).unwrap();
        assert!(game.play_positions("e5", "d6", None).is_err());
    }

    #[test]
    fn test_en_passant_taken_on_the_reply() {
        let mut game = Game::new(Side::Black);
        game.play_positions("e2", "e4", None).unwrap();
        game.play_positions("a7", "a6", None).unwrap();
        game.play_positions("e4", "e5", None).unwrap();
        game.play_positions("f7", "f5", None).unwrap();
        let outcome = game.play_positions("e5", "f6", None).unwrap();
        assert!(outcome.captured.is_some());
        assert_eq!(game.board().roster(Side::Black).len(), 15);
        assert_eq!(en_passant_at(&game, "f5"), None);
    }

    #[test]
    fn test_in_check_after_move() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/R3K3", Side::White).unwrap();
        let mut game = Game::from_board(board, Side::White);
        assert!(!game.in_check());
        game.play_positions("a1", "a8", None).unwrap();
        assert!(game.in_check());
        assert!(game.play_positions("e8", "e7", None).is_ok());
    }
}
