//! Board model for the 5x4 variant
//!
//! In-memory grid of cells keyed by position. Each cell holds at most one
//! piece tag plus the transient highlight flags the renderer draws from.
//! The grid is built once from the fixed initial layout and mutated only by
//! confirmed authority responses; a reset rebuilds it from scratch.
//!
//! Addressing is direct row-major indexing by [`Coord`] - there is no
//! scanning for a cell by attribute, and a moved piece simply rewrites the
//! occupant of two fixed slots.

use crate::game::types::{CellColor, Coord, PieceColor, PieceKind, PieceTag, BOARD_COLS, BOARD_ROWS};

/// One slot of the board grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Occupying piece, if any
    pub piece: Option<PieceTag>,
    /// Marked as a legal destination of the current selection
    pub legal_marked: bool,
    /// Marked as a king in check
    pub check_marked: bool,
    /// Marked as the king cell of a finished game
    pub terminal_marked: bool,
}

const fn tag(kind: PieceKind, color: PieceColor) -> Option<PieceTag> {
    Some(PieceTag::new(kind, color))
}

/// Starting position of the variant: black across the top, white across the
/// bottom, one pawn each
const INITIAL_LAYOUT: [[Option<PieceTag>; BOARD_COLS as usize]; BOARD_ROWS as usize] = [
    [
        tag(PieceKind::King, PieceColor::Black),
        tag(PieceKind::Knight, PieceColor::Black),
        tag(PieceKind::Bishop, PieceColor::Black),
        tag(PieceKind::Rook, PieceColor::Black),
    ],
    [tag(PieceKind::Pawn, PieceColor::Black), None, None, None],
    [None, None, None, None],
    [None, None, None, tag(PieceKind::Pawn, PieceColor::White)],
    [
        tag(PieceKind::Rook, PieceColor::White),
        tag(PieceKind::Bishop, PieceColor::White),
        tag(PieceKind::Knight, PieceColor::White),
        tag(PieceKind::King, PieceColor::White),
    ],
];

/// The 5x4 grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardModel {
    cells: [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize],
}

impl Default for BoardModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardModel {
    /// Build the starting position
    pub fn new() -> Self {
        let mut cells = [[Cell::default(); BOARD_COLS as usize]; BOARD_ROWS as usize];
        for (row, layout_row) in INITIAL_LAYOUT.iter().enumerate() {
            for (col, piece) in layout_row.iter().enumerate() {
                cells[row][col].piece = *piece;
            }
        }
        Self { cells }
    }

    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[coord.row() as usize][coord.col() as usize]
    }

    pub fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        &mut self.cells[coord.row() as usize][coord.col() as usize]
    }

    /// Occupying piece of a cell, if any
    pub fn piece_at(&self, coord: Coord) -> Option<PieceTag> {
        self.cell(coord).piece
    }

    /// Move the occupant of `from` onto `to`, returning any replaced piece
    ///
    /// Captures are implicit replacement: whatever sat on `to` is simply
    /// overwritten. A move from an empty cell leaves the board untouched.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Option<PieceTag> {
        match self.cell_mut(from).piece.take() {
            Some(piece) => self.cell_mut(to).piece.replace(piece),
            None => None,
        }
    }

    /// Displayed color of a cell: terminal and check highlights override the
    /// parity-derived base color
    pub fn color_at(&self, coord: Coord) -> CellColor {
        let cell = self.cell(coord);
        if cell.terminal_marked {
            CellColor::Terminal
        } else if cell.check_marked {
            CellColor::Check
        } else {
            coord.base_color()
        }
    }

    /// Coordinate of the cell currently flagged as check, if any
    pub fn checked_cell(&self) -> Option<Coord> {
        Coord::all().find(|&coord| self.cell(coord).check_marked)
    }

    /// Coordinates currently carrying a legal-destination marker, in
    /// row-major order
    pub fn legal_marked_cells(&self) -> Vec<Coord> {
        Coord::all()
            .filter(|&coord| self.cell(coord).legal_marked)
            .collect()
    }

    /// Count of occupied cells for the given side
    pub fn piece_count(&self, color: PieceColor) -> usize {
        Coord::all()
            .filter_map(|coord| self.piece_at(coord))
            .filter(|piece| piece.color == color)
            .count()
    }
}
