// src/rules.rs
//! Per-piece move legality on a board snapshot.
//!
//! Only movement shape, occupancy and path blocking are judged. There is no
//! notion of check, castling, en passant, promotion or whose turn it is.
//! A pawn's double step does not look at the square it passes over.

use crate::board::Board;
use crate::error::MoveError;
use crate::types::{Piece, PieceType, Square};

/// Checks a move and reports why it is illegal. Never mutates the board.
pub fn check_move(board: &Board, from: Square, to: Square) -> Result<(), MoveError> {
    let piece = board.piece_at(from).ok_or(MoveError::EmptySource(from))?;
    if let Some(target) = board.piece_at(to) {
        if target.color == piece.color {
            return Err(MoveError::FriendlyOccupant(to)); // Also covers from == to
        }
    }

    match piece.kind {
        PieceType::Pawn => check_pawn_move(board, piece, from, to),
        PieceType::Knight => check_shape(is_knight_shape(from, to), piece, from, to),
        PieceType::Bishop => {
            check_shape(is_diagonal(from, to), piece, from, to)?;
            check_path_clear(board, from, to)
        }
        PieceType::Rook => {
            check_shape(is_straight(from, to), piece, from, to)?;
            check_path_clear(board, from, to)
        }
        PieceType::Queen => {
            check_shape(is_straight(from, to) || is_diagonal(from, to), piece, from, to)?;
            check_path_clear(board, from, to)
        }
        PieceType::King => check_shape(is_king_shape(from, to), piece, from, to),
    }
}

pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
    check_move(board, from, to).is_ok()
}

/// Every destination the piece on `from` may legally move to, row-major.
/// Empty when `from` holds no piece.
pub fn legal_targets(board: &Board, from: Square) -> Vec<Square> {
    if board.is_empty(from) {
        return Vec::new();
    }
    Square::all().filter(|&to| is_legal(board, from, to)).collect()
}

#[inline]
fn check_shape(ok: bool, piece: Piece, from: Square, to: Square) -> Result<(), MoveError> {
    if ok { Ok(()) } else { Err(MoveError::ShapeInvalid { piece, from, to }) }
}

#[inline]
fn deltas(from: Square, to: Square) -> (i8, i8) {
    (to.row() as i8 - from.row() as i8, to.col() as i8 - from.col() as i8)
}

fn check_pawn_move(board: &Board, piece: Piece, from: Square, to: Square) -> Result<(), MoveError> {
    let dir = piece.color.pawn_direction();
    let (dr, dc) = deltas(from, to);
    let occupied = !board.is_empty(to);

    let single_step = dr == dir;
    let double_step = dr == 2 * dir && from.row() == piece.color.pawn_start_row();

    if dc == 0 && (single_step || double_step) {
        // Forward moves never capture
        return if occupied { Err(MoveError::DestinationInvalid { piece, to }) } else { Ok(()) };
    }
    if dc.abs() == 1 && single_step {
        // Diagonal moves only capture; own pieces were rejected above
        return if occupied { Ok(()) } else { Err(MoveError::DestinationInvalid { piece, to }) };
    }
    Err(MoveError::ShapeInvalid { piece, from, to })
}

fn is_knight_shape(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2))
}

fn is_king_shape(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    dr.abs() <= 1 && dc.abs() <= 1
}

/// Exactly one of the deltas is zero.
fn is_straight(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    (dr == 0) != (dc == 0)
}

fn is_diagonal(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    dr != 0 && dr.abs() == dc.abs()
}

/// Walks the squares strictly between `from` and `to` along the unit step
/// and fails on the first occupied one. Callers guarantee a straight or
/// diagonal line.
fn check_path_clear(board: &Board, from: Square, to: Square) -> Result<(), MoveError> {
    let (dr, dc) = deltas(from, to);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut current = from.offset(step_r, step_c);
    while let Some(sq) = current {
        if sq == to {
            break;
        }
        if !board.is_empty(sq) {
            return Err(MoveError::PathBlocked { from, to, blocker: sq });
        }
        current = sq.offset(step_r, step_c);
    }
    Ok(())
}
