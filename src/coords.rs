//! Grid coordinates and their algebraic-notation form.
//!
//! The grid is stored the way it is drawn: row 0 is the top of the board as
//! seen by the side named by the perspective. Algebraic positions ("e4") are
//! derived from grid coordinates and that perspective, and converting back is
//! the exact inverse.

use std::fmt;

use crate::error::ChessError;
use crate::piece::Side;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: i32 = 8;

const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// A zero-based (row, column) pair in grid index space.
///
/// Signed so that geometry can step off the board and be rejected by
/// [`Coords::in_bounds`] instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coords {
    pub row: i32,
    pub col: i32,
}

impl Coords {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Coords {
        Coords::new(self.row + d_row, self.col + d_col)
    }

    /// Iterates over all 64 grid coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coords> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coords::new(row, col)))
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Renders grid coordinates as an algebraic position for the given perspective.
///
/// # Arguments
///
/// * `coords` - In-bounds grid coordinates
/// * `perspective` - The side whose viewpoint puts its own back rank on row 7
///
/// # Returns
///
/// * The position string, e.g. `"e4"`
pub fn position_of(coords: Coords, perspective: Side) -> String {
    debug_assert!(coords.in_bounds(), "position_of called with {}", coords);
    let (file, rank) = match perspective {
        Side::White => (coords.col, BOARD_SIZE - coords.row),
        Side::Black => (BOARD_SIZE - 1 - coords.col, coords.row + 1),
    };
    format!("{}{}", FILES[file as usize], rank)
}

/// Parses an algebraic position back into grid coordinates.
///
/// This is the inverse of [`position_of`]. Anything that is not a file letter
/// `a`-`h` followed by a rank digit `1`-`8` is rejected.
pub fn coords_of(position: &str, perspective: Side) -> Result<Coords, ChessError> {
    let invalid = || ChessError::InvalidSquare(position.to_string());

    let bytes = position.as_bytes();
    if bytes.len() != 2 {
        return Err(invalid());
    }

    let file = bytes[0].to_ascii_lowercase();
    if !(b'a'..=b'h').contains(&file) {
        return Err(invalid());
    }
    let rank = bytes[1];
    if !(b'1'..=b'8').contains(&rank) {
        return Err(invalid());
    }

    let file = (file - b'a') as i32;
    let rank = (rank - b'0') as i32;

    Ok(match perspective {
        Side::White => Coords::new(BOARD_SIZE - rank, file),
        Side::Black => Coords::new(rank - 1, BOARD_SIZE - 1 - file),
    })
}
