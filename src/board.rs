//! The 8x8 board: squares, the piece arena and the two side rosters.
//!
//! Squares hold the index of their occupant in the piece arena, and each side's
//! roster lists the indices of that side's live pieces. A captured piece stays
//! in the arena but leaves both its square and its roster.

use log::trace;

use crate::coords::{coords_of, position_of, Coords, BOARD_SIZE};
use crate::error::ChessError;
use crate::piece::{EnPassant, Piece, PieceId, PieceKind, PieceType, Side};

const STARTING_ORDER: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareColor {
    Light,
    Dark,
}

/// One cell of the grid. Its coordinates and color never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    coords: Coords,
    color: SquareColor,
    occupant: Option<PieceId>,
}

impl Square {
    fn new(coords: Coords) -> Square {
        let color = if (coords.row + coords.col) % 2 == 0 {
            SquareColor::Light
        } else {
            SquareColor::Dark
        };
        Square { coords, color, occupant: None }
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn color(&self) -> SquareColor {
        self.color
    }

    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Board state for one game.
#[derive(Debug, Clone)]
pub struct Board {
    perspective: Side,
    /// Row-major, 64 entries.
    squares: Vec<Square>,
    pieces: Vec<Piece>,
    rosters: [Vec<PieceId>; 2],
}

#[inline]
fn square_index(coords: Coords) -> usize {
    (coords.row * BOARD_SIZE + coords.col) as usize
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty(perspective: Side) -> Board {
        Board {
            perspective,
            squares: Coords::all().map(Square::new).collect(),
            pieces: Vec::with_capacity(32),
            rosters: [Vec::with_capacity(16), Vec::with_capacity(16)],
        }
    }

    /// The standard starting position.
    ///
    /// The perspective side sits on rows 6 and 7. Seen from black the files run
    /// h..a left to right, so the back rank order is mirrored to keep the kings
    /// on the e-file.
    pub fn new(perspective: Side) -> Board {
        let mut board = Board::empty(perspective);

        for side in [Side::White, Side::Black] {
            let back_row = board.back_row(side);
            let pawn_row = board.pawn_row(side);
            for col in 0..BOARD_SIZE {
                let piece_type = match perspective {
                    Side::White => STARTING_ORDER[col as usize],
                    Side::Black => STARTING_ORDER[(BOARD_SIZE - 1 - col) as usize],
                };
                board.spawn(PieceKind::new(piece_type, side), side, Coords::new(back_row, col));
                board.spawn(PieceKind::new(PieceType::Pawn, side), side, Coords::new(pawn_row, col));
            }
        }

        board
    }

    /// Builds a board from the piece-placement field of a FEN string.
    ///
    /// Ranks are listed from 8 down to 1 and mapped onto the grid through the
    /// given perspective. Pawns standing off their starting rank count as moved.
    pub fn from_placement(placement: &str, perspective: Side) -> Result<Board, ChessError> {
        let invalid = |reason: &str| ChessError::InvalidPlacement(format!("{} in '{}'", reason, placement));

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE as usize {
            return Err(invalid("wrong number of ranks"));
        }

        let mut board = Board::empty(perspective);
        for (i, rank) in ranks.iter().enumerate() {
            let rank_digit = BOARD_SIZE as usize - i;
            let mut file = 0usize;
            for ch in rank.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as usize;
                    if file > BOARD_SIZE as usize {
                        return Err(invalid("rank too long"));
                    }
                    continue;
                }
                let piece_type = PieceType::from_letter(ch).ok_or_else(|| invalid("unknown piece letter"))?;
                if file >= BOARD_SIZE as usize {
                    return Err(invalid("rank too long"));
                }
                let side = if ch.is_ascii_uppercase() { Side::White } else { Side::Black };
                let position = format!("{}{}", (b'a' + file as u8) as char, rank_digit);
                let coords = coords_of(&position, perspective)?;
                board.place(piece_type, side, coords)?;
                file += 1;
            }
            if file != BOARD_SIZE as usize {
                return Err(invalid("rank has the wrong width"));
            }
        }

        Ok(board)
    }

    /// Renders the piece-placement field of FEN for this board.
    pub fn placement(&self) -> String {
        let mut ranks = Vec::with_capacity(BOARD_SIZE as usize);
        for rank in (1..=BOARD_SIZE).rev() {
            let mut line = String::new();
            let mut empty = 0;
            for file in 0..BOARD_SIZE {
                let position = format!("{}{}", (b'a' + file as u8) as char, rank);
                let occupant = coords_of(&position, self.perspective).ok().and_then(|c| self.piece_at(c));
                match occupant {
                    Some(piece) => {
                        if empty > 0 {
                            line.push_str(&empty.to_string());
                            empty = 0;
                        }
                        line.push(piece.letter());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                line.push_str(&empty.to_string());
            }
            ranks.push(line);
        }
        ranks.join("/")
    }

    /// Puts a new piece on an empty square and adds it to its side's roster.
    pub fn place(&mut self, piece_type: PieceType, side: Side, coords: Coords) -> Result<PieceId, ChessError> {
        if !coords.in_bounds() {
            return Err(ChessError::InvalidPlacement(format!("{} is off the board", coords)));
        }
        if self.is_occupied(coords) {
            return Err(ChessError::InvalidPlacement(format!(
                "{} is already occupied",
                position_of(coords, self.perspective)
            )));
        }

        let mut kind = PieceKind::new(piece_type, side);
        if piece_type == PieceType::Pawn && coords.row != self.pawn_row(side) {
            kind.mark_moved();
        }
        Ok(self.spawn(kind, side, coords))
    }

    fn spawn(&mut self, kind: PieceKind, side: Side, coords: Coords) -> PieceId {
        let id = self.pieces.len();
        self.pieces.push(Piece::new(kind, side, coords, self.perspective));
        self.squares[square_index(coords)].occupant = Some(id);
        self.rosters[side.index()].push(id);
        id
    }

    /// The side whose back rank is drawn on row 7.
    pub fn perspective(&self) -> Side {
        self.perspective
    }

    /// Looks up a square of the grid.
    ///
    /// # Arguments
    ///
    /// * `coords` - Grid coordinates, possibly off the board
    ///
    /// # Returns
    ///
    /// * The square, or `None` when `coords` is out of bounds
    pub fn square_at(&self, coords: Coords) -> Option<&Square> {
        if coords.in_bounds() {
            Some(&self.squares[square_index(coords)])
        } else {
            None
        }
    }

    /// All 64 squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn piece_id_at(&self, coords: Coords) -> Option<PieceId> {
        self.square_at(coords).and_then(Square::occupant)
    }

    /// The piece standing on `coords`, if any.
    ///
    /// # Arguments
    ///
    /// * `coords` - Grid coordinates, possibly off the board
    ///
    /// # Returns
    ///
    /// * The occupant, or `None` for an empty or out-of-bounds square
    pub fn piece_at(&self, coords: Coords) -> Option<&Piece> {
        self.piece_id_at(coords).map(|id| &self.pieces[id])
    }

    /// A piece from the arena, including captured ones.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id]
    }

    pub fn is_occupied(&self, coords: Coords) -> bool {
        self.piece_id_at(coords).is_some()
    }

    /// Ids of `side`'s pieces still on the board.
    ///
    /// # Arguments
    ///
    /// * `side` - The side whose roster is wanted
    ///
    /// # Returns
    ///
    /// * The roster in placement order, without captured pieces
    pub fn roster(&self, side: Side) -> &[PieceId] {
        &self.rosters[side.index()]
    }

    /// Live pieces of `side`, in roster order.
    pub fn roster_pieces(&self, side: Side) -> impl Iterator<Item = &Piece> + '_ {
        self.rosters[side.index()].iter().map(move |&id| &self.pieces[id])
    }

    pub fn king(&self, side: Side) -> Option<&Piece> {
        self.roster_pieces(side).find(|p| p.piece_type() == PieceType::King)
    }

    /// Row direction in which `side`'s pawns advance.
    ///
    /// # Returns
    ///
    /// * `-1` for the perspective side, `1` for the other
    pub fn forward(&self, side: Side) -> i32 {
        if side == self.perspective {
            -1
        } else {
            1
        }
    }

    /// Grid row holding `side`'s pieces at the start: 7 for the perspective side, 0 otherwise.
    pub fn back_row(&self, side: Side) -> i32 {
        if side == self.perspective {
            BOARD_SIZE - 1
        } else {
            0
        }
    }

    /// Grid row `side`'s pawns start on, one step in front of the back row.
    pub fn pawn_row(&self, side: Side) -> i32 {
        self.back_row(side) + self.forward(side)
    }

    /// Grid row where `side`'s pawns promote, the opponent's back row.
    pub fn promotion_row(&self, side: Side) -> i32 {
        self.back_row(side.other())
    }

    /// Square the king of `side` starts on.
    pub fn king_home(&self, side: Side) -> Coords {
        let col = match self.perspective {
            Side::White => 4,
            Side::Black => 3,
        };
        Coords::new(self.back_row(side), col)
    }

    /// Advances the en-passant windows of `side`'s pawns.
    ///
    /// Called once at the start of each of `side`'s turns.
    pub fn begin_turn(&mut self, side: Side) {
        for &id in &self.rosters[side.index()] {
            let piece = &mut self.pieces[id];
            if let PieceKind::Pawn(pawn) = &mut piece.kind {
                if pawn.en_passant == EnPassant::Eligible {
                    trace!("en passant window closed for {}", piece.position);
                }
                pawn.en_passant = pawn.en_passant.tick();
            }
        }
    }

    /// Checks the roster/square bijection and the stored coordinates.
    ///
    /// Every rostered piece sits on exactly the square its coordinates name,
    /// with a matching position string, and every occupied square holds a
    /// piece from exactly one roster whose coordinates name that square.
    pub fn is_consistent(&self) -> bool {
        let mut seen = vec![0u8; self.pieces.len()];
        for side in [Side::White, Side::Black] {
            for &id in self.roster(side) {
                let Some(piece) = self.pieces.get(id) else {
                    return false;
                };
                if piece.side != side
                    || self.piece_id_at(piece.coords) != Some(id)
                    || piece.position != position_of(piece.coords, self.perspective)
                {
                    return false;
                }
                seen[id] += 1;
            }
        }

        self.squares.iter().all(|square| match square.occupant {
            Some(id) => seen.get(id) == Some(&1) && self.pieces[id].coords == square.coords,
            None => true,
        }) && seen.iter().all(|&count| count <= 1)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id]
    }

    pub(crate) fn set_occupant(&mut self, coords: Coords, occupant: Option<PieceId>) {
        self.squares[square_index(coords)].occupant = occupant;
    }

    /// Moves a piece between squares and updates its coordinates and position.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Coords) {
        let from = self.pieces[id].coords;
        self.set_occupant(from, None);
        self.set_occupant(to, Some(id));
        let perspective = self.perspective;
        let piece = &mut self.pieces[id];
        piece.coords = to;
        piece.position = position_of(to, perspective);
    }

    /// Drops a piece from its roster, returning where it was listed.
    pub(crate) fn remove_from_roster(&mut self, id: PieceId) -> Option<(Side, usize)> {
        let side = self.pieces[id].side;
        let roster = &mut self.rosters[side.index()];
        let index = roster.iter().position(|&entry| entry == id)?;
        roster.remove(index);
        Some((side, index))
    }

    pub(crate) fn restore_to_roster(&mut self, side: Side, index: usize, id: PieceId) {
        self.rosters[side.index()].insert(index, id);
    }
}
