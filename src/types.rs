// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SquareError;

// --- Constants ---
pub const BOARD_SIZE: usize = 8;

// Rows holding each side's pawns at the start (row 0 is rank 8)
pub const WHITE_PAWN_ROW: u8 = 6;
pub const BLACK_PAWN_ROW: u8 = 1;

// --- Enums and Basic Structs ---

/// Side of a piece. `White` is color A (ranks 1-2), `Black` is color B (ranks 7-8).
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color { White, Black }

impl Color {
    pub fn index(&self) -> usize { // Zobrist indexing
        match self { Color::White => 0, Color::Black => 1 }
    }
    /// Row delta of a single pawn step.
    pub fn pawn_direction(&self) -> i8 {
        match self { Color::White => -1, Color::Black => 1 }
    }
    pub fn pawn_start_row(&self) -> u8 {
        match self { Color::White => WHITE_PAWN_ROW, Color::Black => BLACK_PAWN_ROW }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceType { Pawn, Knight, Bishop, Rook, Queen, King }

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn, PieceType::Knight, PieceType::Bishop,
        PieceType::Rook, PieceType::Queen, PieceType::King,
    ];

    pub fn index(&self) -> usize {
        match self {
            PieceType::Pawn => 0, PieceType::Knight => 1, PieceType::Bishop => 2,
            PieceType::Rook => 3, PieceType::Queen => 4, PieceType::King => 5,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Self { Piece { kind, color } }

    pub fn value(&self) -> u32 {
        match self.kind {
            PieceType::Pawn => 1, PieceType::Knight => 3, PieceType::Bishop => 3,
            PieceType::Rook => 5, PieceType::Queen => 9, PieceType::King => 0,
        }
    }

    /// Uppercase letters are White, lowercase Black.
    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn, 'n' => PieceType::Knight, 'b' => PieceType::Bishop,
            'r' => PieceType::Rook, 'q' => PieceType::Queen, 'k' => PieceType::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }

    pub fn to_char(&self) -> char {
        let symbol = match self.kind {
            PieceType::Pawn => 'p', PieceType::Knight => 'n', PieceType::Bishop => 'b',
            PieceType::Rook => 'r', PieceType::Queen => 'q', PieceType::King => 'k',
        };
        match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        }
    }

    /// Unicode chess symbol, used by the shell's glyph rendering.
    pub fn glyph(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceType::King) => '♔', (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::Rook) => '♖', (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Knight) => '♘', (Color::White, PieceType::Pawn) => '♙',
            (Color::Black, PieceType::King) => '♚', (Color::Black, PieceType::Queen) => '♛',
            (Color::Black, PieceType::Rook) => '♜', (Color::Black, PieceType::Bishop) => '♝',
            (Color::Black, PieceType::Knight) => '♞', (Color::Black, PieceType::Pawn) => '♟',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

// --- Square ---

/// A board location. Row 0 is rank 8, column 0 is file 'a'.
///
/// Both coordinates are always in `0..8`; the only constructors are checked,
/// so an out-of-range square never reaches the rules. Serialize-only for the
/// same reason.
#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Square { row, col })
        } else {
            None
        }
    }

    pub fn row(&self) -> u8 { self.row }
    pub fn col(&self) -> u8 { self.col }

    /// Index 0-63 in row-major order (a8 = 0, h1 = 63).
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Square reached by stepping `(dr, dc)`, if it stays on the board.
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Square::new(row, col)
    }

    /// All 64 squares, row-major.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square { row, col }))
    }

    /// Parses "e2"-style notation: lowercase file 'a'-'h' then rank '1'-'8'.
    pub fn from_algebraic(s: &str) -> Result<Self, SquareError> {
        let mut chars = s.chars();
        let (file_char, rank_char) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(SquareError::BadLength(s.to_string())),
        };
        let col = match file_char { 'a'..='h' => file_char as u8 - b'a', _ => return Err(SquareError::BadFile(file_char)) };
        let rank = match rank_char { '1'..='8' => rank_char as u8 - b'0', _ => return Err(SquareError::BadRank(rank_char)) };
        Ok(Square { row: BOARD_SIZE as u8 - rank, col })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_char = (b'a' + self.col) as char;
        let rank_char = (b'0' + (BOARD_SIZE as u8 - self.row)) as char;
        write!(f, "{}{}", file_char, rank_char)
    }
}
