// src/error.rs
use std::error::Error;
use std::fmt;
use std::io;

use crate::types::{Piece, Square};

// --- Custom Error Types ---

/// Why a well-formed move request was rejected. The board is never touched
/// when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    EmptySource(Square),
    FriendlyOccupant(Square),
    ShapeInvalid { piece: Piece, from: Square, to: Square },
    PathBlocked { from: Square, to: Square, blocker: Square },
    DestinationInvalid { piece: Piece, to: Square },
}
impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::EmptySource(sq) => write!(f, "No piece found at {}", sq),
            MoveError::FriendlyOccupant(sq) => write!(f, "Can't capture own piece on {}", sq),
            MoveError::ShapeInvalid { piece, from, to } => write!(f, "{:?} {:?} can't move from {} to {}", piece.color, piece.kind, from, to),
            MoveError::PathBlocked { from, to, blocker } => write!(f, "Path from {} to {} is blocked at {}", from, to, blocker),
            MoveError::DestinationInvalid { piece, to } => match piece.kind {
                crate::types::PieceType::Pawn => write!(f, "Pawn can't move to {}: forward moves need an empty square, diagonal moves need a capture", to),
                _ => write!(f, "{:?} can't move to {}", piece.kind, to),
            },
        }
    }
}
impl Error for MoveError {}

/// Coordinate text that is not a square ("InputMalformed").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    BadLength(String),
    BadFile(char),
    BadRank(char),
}
impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::BadLength(s) => write!(f, "Invalid square '{}': use a file letter and a rank digit (e.g. e2)", s),
            SquareError::BadFile(c) => write!(f, "Invalid file '{}': expected a-h", c),
            SquareError::BadRank(c) => write!(f, "Invalid rank '{}': expected 1-8", c),
        }
    }
}
impl Error for SquareError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    WrongRankCount(usize),
    BadPiece(char),
    BadSkip(char),
    RankLength { rank: usize, squares: usize },
}
impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardParseError::WrongRankCount(n) => write!(f, "Expected 8 ranks separated by '/', found {}", n),
            BoardParseError::BadPiece(c) => write!(f, "Unknown piece character '{}'", c),
            BoardParseError::BadSkip(c) => write!(f, "Invalid empty-square count '{}': expected a single digit 1-8", c),
            BoardParseError::RankLength { rank, squares } => write!(f, "Rank {} describes {} squares instead of 8", rank, squares),
        }
    }
}
impl Error for BoardParseError {}

#[derive(Debug)]
pub enum SaveLoadError {
    Serialization(serde_json::Error),
    Io(String, io::Error),
}
impl fmt::Display for SaveLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveLoadError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SaveLoadError::Io(file, e) => write!(f, "I/O error with file '{}': {}", file, e),
        }
    }
}
impl Error for SaveLoadError {}

#[derive(Debug)]
pub enum CommandError {
    InvalidFormat(String),
    InvalidSquare(SquareError),
    MissingArgument(String),
}
impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidFormat(input) => write!(f, "Invalid move format '{}'. Use 'from to' (e.g., e2 e4).", input),
            CommandError::InvalidSquare(e) => write!(f, "Invalid move! {}", e),
            CommandError::MissingArgument(cmd) => write!(f, "Missing argument for command: '{}'", cmd),
        }
    }
}
impl Error for CommandError {}

impl From<SquareError> for CommandError {
    fn from(e: SquareError) -> Self { CommandError::InvalidSquare(e) }
}
