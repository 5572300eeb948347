//! A two-player chess rules engine.
//!
//! The [`Board`] owns the squares, the piece arena and the two side rosters.
//! Each piece variant decides its own geometry; every candidate move is then
//! tried on the board and rejected if it leaves the mover's king attacked.
//! [`Game`] adds the side to move on top, and `gui` puts an egui front end on that.

pub mod board;
pub mod coords;
pub mod error;
pub mod game;
pub mod gui;
pub mod kingattacks;
pub mod knightattacks;
pub mod makemove;
pub mod movegeneration;
pub mod pawnattacks;
pub mod piece;
pub mod rayattacks;
pub mod trial;
pub mod utils;

pub use board::{Board, Square, SquareColor};
pub use coords::{coords_of, position_of, Coords, BOARD_SIZE};
pub use error::ChessError;
pub use game::Game;
pub use makemove::MoveOutcome;
pub use movegeneration::{MoveFlags, MovePlan};
pub use piece::{EnPassant, Piece, PieceId, PieceKind, PieceType, Promotion, Side};
