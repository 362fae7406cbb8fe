// src/board.rs
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use std::fmt;

use crate::error::BoardParseError;
use crate::types::{Color, Piece, PieceType, Square, BOARD_SIZE};

const ZOBRIST_SEED: u64 = 0xDEADBEEFCAFEBABE;

pub const INITIAL_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook, PieceType::Knight, PieceType::Bishop, PieceType::Queen,
    PieceType::King, PieceType::Bishop, PieceType::Knight, PieceType::Rook,
];

// --- Zobrist Hashing ---

lazy_static! {
    static ref ZOBRIST: ZobristTable = ZobristTable::new();
}

#[derive(Debug, Clone)]
struct ZobristTable {
    // piece[color][piece_type][square]
    piece_keys: [[[u64; 64]; 6]; 2],
}

impl ZobristTable {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut table = ZobristTable { piece_keys: [[[0; 64]; 6]; 2] };
        for color in 0..2 {
            for piece_type in 0..6 {
                for square in 0..64 {
                    table.piece_keys[color][piece_type][square] = rng.next_u64();
                }
            }
        }
        table
    }

    #[inline(always)]
    fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[piece.color.index()][piece.kind.index()][sq.index()]
    }
}

// --- Board ---

/// 8x8 grid of optional pieces, indexed `[row][col]` with row 0 = rank 8.
/// Holds no rules; see [`crate::rules`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self { Board::initial() }
}

impl Board {
    pub fn empty() -> Self {
        Board { cells: [[None; BOARD_SIZE]; BOARD_SIZE] }
    }

    /// Standard starting arrangement: White (color A) on ranks 1-2, Black on 7-8.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            board.cells[0][col] = Some(Piece::new(kind, Color::Black));
            board.cells[1][col] = Some(Piece::new(PieceType::Pawn, Color::Black));
            board.cells[6][col] = Some(Piece::new(PieceType::Pawn, Color::White));
            board.cells[7][col] = Some(Piece::new(kind, Color::White));
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Writes a piece (or emptiness) and returns what was there before.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.cells[sq.row() as usize][sq.col() as usize], piece)
    }

    /// Moves whatever stands on `from` to `to`, leaving `from` empty.
    /// Returns the previous occupant of `to`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mover = self.set(from, None);
        self.set(to, mover)
    }

    /// Read-only copy of the grid for renderers.
    pub fn snapshot(&self) -> [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        self.cells
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    pub fn zobrist_key(&self) -> u64 {
        let zob = &*ZOBRIST;
        self.pieces().fold(0, |key, (sq, piece)| key ^ zob.piece(piece, sq))
    }

    /// Parses the piece-placement field of a FEN string (rank 8 first).
    pub fn from_placement(text: &str) -> Result<Self, BoardParseError> {
        let ranks: Vec<&str> = text.trim().split('/').collect();
        if ranks.len() != BOARD_SIZE {
            return Err(BoardParseError::WrongRankCount(ranks.len()));
        }
        let mut board = Board::empty();
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col = 0usize;
            let mut after_digit = false;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    // One digit 1-8 per run of empty squares
                    if after_digit || !(1..=8).contains(&skip) {
                        return Err(BoardParseError::BadSkip(c));
                    }
                    after_digit = true;
                    col += skip as usize;
                    continue;
                }
                after_digit = false;
                let piece = Piece::from_char(c).ok_or(BoardParseError::BadPiece(c))?;
                if col < BOARD_SIZE {
                    board.cells[row][col] = Some(piece);
                }
                col += 1;
            }
            if col != BOARD_SIZE {
                return Err(BoardParseError::RankLength { rank: BOARD_SIZE - row, squares: col });
            }
        }
        Ok(board)
    }

    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for (row, cells) in self.cells.iter().enumerate() {
            let mut gap = 0;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if gap > 0 { out.push_str(&gap.to_string()); gap = 0; }
                        out.push(piece.to_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 { out.push_str(&gap.to_string()); }
            if row + 1 < BOARD_SIZE { out.push('/'); }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    a b c d e f g h")?;
        writeln!(f, "  +-----------------+")?;
        for (row, cells) in self.cells.iter().enumerate() {
            let rank = BOARD_SIZE - row;
            write!(f, "{} | ", rank)?;
            for cell in cells {
                match cell {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "| {}", rank)?;
        }
        writeln!(f, "  +-----------------+")?;
        write!(f, "    a b c d e f g h")
    }
}
