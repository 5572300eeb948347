//! Debug rendering helpers.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::coords::{position_of, Coords, BOARD_SIZE};

/// Renders the board as text, one grid row per line, top row first.
///
/// Pieces are shown by their FEN letter and empty squares by `.`. Each row is
/// prefixed with its rank and the files are listed underneath, both taken from
/// the board's perspective.
///
/// # Arguments
///
/// * `board` - The board to render
/// * `highlights` - Optional set of squares to highlight in the output
///
/// # Returns
///
/// * The rendered board
pub fn board_to_string(board: &Board, highlights: Option<&BTreeSet<Coords>>) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        let position = position_of(Coords::new(row, 0), board.perspective());
        out.push_str(&position[1..]);
        for col in 0..BOARD_SIZE {
            let coords = Coords::new(row, col);
            let symbol = board.piece_at(coords).map_or('.', |piece| piece.letter());
            out.push(' ');
            if highlights.map_or(false, |h| h.contains(&coords)) {
                out.push_str(&format!("\x1b[93m{}\x1b[0m", symbol));
            } else {
                out.push(symbol);
            }
        }
        out.push('\n');
    }

    out.push(' ');
    for col in 0..BOARD_SIZE {
        let position = position_of(Coords::new(0, col), board.perspective());
        out.push(' ');
        out.push_str(&position[..1]);
    }
    out.push('\n');
    out
}
