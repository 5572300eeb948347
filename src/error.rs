//! Errors reported by the move executor and the board importers.
//!
//! Legality predicates never produce these; they answer yes/no. Only the
//! entry points that take strings or mutate the board return a `ChessError`.

/// Domain errors for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid square notation: '{0}'")]
    InvalidSquare(String),

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),

    #[error("no piece on {0}")]
    NoPiece(String),

    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: String, to: String },

    #[error("a promotion piece must be chosen for {from} -> {to}")]
    PromotionRequired { from: String, to: String },

    #[error("it is not {0}'s turn")]
    WrongTurn(String),
}
