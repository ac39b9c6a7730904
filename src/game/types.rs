//! Type definitions for the reduced 5x4 board
//!
//! Provides newtype patterns for board coordinates and piece tags to improve
//! type safety: a [`Coord`] can only be constructed in bounds, so no request
//! to the rule authority can ever carry an off-board square.

use std::fmt;

/// Number of rows on the reduced board
pub const BOARD_ROWS: u8 = 5;

/// Number of columns on the reduced board
pub const BOARD_COLS: u8 = 4;

/// Board coordinate (row, col), zero-indexed from the top-left corner
///
/// Always in bounds: `row` in 0..5, `col` in 0..4. Out-of-bounds pairs are
/// rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Create a coordinate, returning `None` when out of bounds
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let corner = Coord::new(4, 3).unwrap();
    /// assert!(Coord::new(5, 0).is_none());
    /// ```
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_ROWS && col < BOARD_COLS).then_some(Coord { row, col })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major index into a flattened board
    pub fn index(self) -> usize {
        self.row as usize * BOARD_COLS as usize + self.col as usize
    }

    /// Parity-derived base color: an even row+col sum is a light square
    pub fn base_color(self) -> CellColor {
        if (self.row + self.col) % 2 == 0 {
            CellColor::Light
        } else {
            CellColor::Dark
        }
    }

    /// Iterate every board coordinate in row-major order
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLS).filter_map(move |col| Coord::new(row, col)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rendered color of a board cell
///
/// `Light`/`Dark` are the parity-derived base colors; `Check` and `Terminal`
/// are the transient king highlights layered on top of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    Light,
    Dark,
    Check,
    Terminal,
}

/// Side a piece belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    /// One-letter wire suffix (`w`/`b`)
    pub fn suffix(self) -> char {
        match self {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
        }
    }

    fn from_suffix(c: char) -> Option<Self> {
        match c {
            'w' => Some(PieceColor::White),
            'b' => Some(PieceColor::Black),
            _ => None,
        }
    }
}

/// Piece kinds of the variant - there is no queen on the 5x4 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Knight,
    Bishop,
    Rook,
    Pawn,
}

impl PieceKind {
    /// Lowercase wire name (`king`, `knight`, ...)
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::King => "king",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Pawn => "pawn",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "king" => Some(PieceKind::King),
            "knight" => Some(PieceKind::Knight),
            "bishop" => Some(PieceKind::Bishop),
            "rook" => Some(PieceKind::Rook),
            "pawn" => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

/// Occupant of a cell, spelled `{type}-{color}` on the wire (`"pawn-w"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceTag {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl PieceTag {
    pub const fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// Parse a `{type}-{color}` tag, returning `None` for anything else
    pub fn parse(s: &str) -> Option<Self> {
        let (name, suffix) = s.rsplit_once('-')?;
        let mut chars = suffix.chars();
        let color = PieceColor::from_suffix(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self {
            kind: PieceKind::from_name(name)?,
            color,
        })
    }
}

impl fmt::Display for PieceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.name(), self.color.suffix())
    }
}
