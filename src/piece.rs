//! Piece data: sides, the closed set of piece variants and their per-variant state.
//!
//! Behaviour for each variant lives next to its geometry (`rayattacks`,
//! `knightattacks`, `pawnattacks`, `kingattacks`); this module only holds the
//! state that behaviour reads and the executor updates.

use std::fmt;

use crate::coords::{position_of, Coords};
use crate::movegeneration::Movement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Index of a piece in the board's piece arena.
pub type PieceId = usize;

/// The kind of a piece without any of its per-variant state.
#[derive(Debug, PartialEq, Copy, Clone, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    /// Lower-case FEN letter for this piece type.
    pub fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Rook => 'r',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceType> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'r' => Some(PieceType::Rook),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// The pieces a pawn may become on the final rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Promotion {
    Queen,
    Knight,
    Rook,
    Bishop,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [Promotion::Queen, Promotion::Knight, Promotion::Rook, Promotion::Bishop];

    pub fn piece_type(self) -> PieceType {
        match self {
            Promotion::Queen => PieceType::Queen,
            Promotion::Knight => PieceType::Knight,
            Promotion::Rook => PieceType::Rook,
            Promotion::Bishop => PieceType::Bishop,
        }
    }

    /// The variant that replaces the pawn.
    ///
    /// A promoted rook counts as moved so it can never take part in castling.
    pub(crate) fn into_kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen(Queen),
            Promotion::Knight => PieceKind::Knight(Knight),
            Promotion::Rook => PieceKind::Rook(Rook { has_moved: true }),
            Promotion::Bishop => PieceKind::Bishop(Bishop),
        }
    }
}

/// En-passant window of a pawn.
///
/// A pawn becomes `Eligible` on its double step and turns `Expired` at the
/// start of its own side's next turn, so the opponent gets exactly one reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnPassant {
    NotEligible,
    Eligible,
    Expired,
}

impl EnPassant {
    #[inline]
    pub(crate) fn tick(self) -> EnPassant {
        match self {
            EnPassant::Eligible => EnPassant::Expired,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct King {
    pub has_moved: bool,
    /// The side whose roster is scanned when asking whether this king is attacked.
    pub opponent: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Queen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rook {
    pub has_moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bishop;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Knight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pawn {
    pub has_moved: bool,
    pub en_passant: EnPassant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    King(King),
    Queen(Queen),
    Rook(Rook),
    Bishop(Bishop),
    Knight(Knight),
    Pawn(Pawn),
}

impl PieceKind {
    /// A fresh, unmoved piece of the given type for `side`.
    pub fn new(piece_type: PieceType, side: Side) -> PieceKind {
        match piece_type {
            PieceType::King => PieceKind::King(King { has_moved: false, opponent: side.other() }),
            PieceType::Queen => PieceKind::Queen(Queen),
            PieceType::Rook => PieceKind::Rook(Rook { has_moved: false }),
            PieceType::Bishop => PieceKind::Bishop(Bishop),
            PieceType::Knight => PieceKind::Knight(Knight),
            PieceType::Pawn => PieceKind::Pawn(Pawn { has_moved: false, en_passant: EnPassant::NotEligible }),
        }
    }

    pub fn piece_type(&self) -> PieceType {
        match self {
            PieceKind::King(_) => PieceType::King,
            PieceKind::Queen(_) => PieceType::Queen,
            PieceKind::Rook(_) => PieceType::Rook,
            PieceKind::Bishop(_) => PieceType::Bishop,
            PieceKind::Knight(_) => PieceType::Knight,
            PieceKind::Pawn(_) => PieceType::Pawn,
        }
    }

    /// The movement-history flag, for the variants that carry one.
    pub fn has_moved(&self) -> Option<bool> {
        match self {
            PieceKind::King(king) => Some(king.has_moved),
            PieceKind::Rook(rook) => Some(rook.has_moved),
            PieceKind::Pawn(pawn) => Some(pawn.has_moved),
            _ => None,
        }
    }

    pub(crate) fn mark_moved(&mut self) {
        match self {
            PieceKind::King(king) => king.has_moved = true,
            PieceKind::Rook(rook) => rook.has_moved = true,
            PieceKind::Pawn(pawn) => pawn.has_moved = true,
            _ => {}
        }
    }

    pub(crate) fn movement(&self) -> &dyn Movement {
        match self {
            PieceKind::King(king) => king,
            PieceKind::Queen(queen) => queen,
            PieceKind::Rook(rook) => rook,
            PieceKind::Bishop(bishop) => bishop,
            PieceKind::Knight(knight) => knight,
            PieceKind::Pawn(pawn) => pawn,
        }
    }
}

/// A piece on the board.
///
/// `coords` is in grid index space; `position` is the same square rendered
/// with the board's perspective and is kept in step with `coords` by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub(crate) kind: PieceKind,
    pub(crate) side: Side,
    pub(crate) coords: Coords,
    pub(crate) position: String,
}

impl Piece {
    pub(crate) fn new(kind: PieceKind, side: Side, coords: Coords, perspective: Side) -> Piece {
        Piece {
            kind,
            side,
            coords,
            position: position_of(coords, perspective),
        }
    }

    pub fn kind(&self) -> &PieceKind {
        &self.kind
    }

    pub fn piece_type(&self) -> PieceType {
        self.kind.piece_type()
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn has_moved(&self) -> Option<bool> {
        self.kind.has_moved()
    }

    pub fn en_passant(&self) -> Option<EnPassant> {
        match self.kind {
            PieceKind::Pawn(pawn) => Some(pawn.en_passant),
            _ => None,
        }
    }

    /// FEN letter: upper case for white, lower case for black.
    pub fn letter(&self) -> char {
        let letter = self.piece_type().letter();
        match self.side {
            Side::White => letter.to_ascii_uppercase(),
            Side::Black => letter,
        }
    }
}
