// src/history.rs
use serde::Serialize;
use std::fmt;

use crate::board::Board;
use crate::types::{Piece, Square};

// --- Move Representation ---

/// An applied move, with whatever stood on `to` beforehand so it can be
/// reversed exactly.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
}

impl Move {
    pub fn new(from: Square, to: Square, captured: Option<Piece>) -> Self {
        Move { from, to, captured }
    }

    /// Coordinate notation, e.g. "e2e4".
    pub fn to_algebraic_string(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.captured {
            write!(f, "x{}", piece)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    Applied(Move),
    NothingToUndo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedoOutcome {
    Applied(Move),
    NothingToRedo,
}

// --- Undo/Redo Stacks ---

/// Linear undo/redo history. Recording a new move discards the redo stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    undo_stack: Vec<Move>,
    redo_stack: Vec<Move>,
}

impl MoveHistory {
    pub fn new() -> Self {
        MoveHistory::default()
    }

    pub fn record_and_clear_redo(&mut self, mv: Move) {
        self.undo_stack.push(mv);
        self.redo_stack.clear();
    }

    /// Takes back the most recent move: the piece returns to `from` and the
    /// captured piece (or emptiness) is put back on `to`.
    pub fn undo(&mut self, board: &mut Board) -> UndoOutcome {
        let Some(mv) = self.undo_stack.pop() else {
            return UndoOutcome::NothingToUndo;
        };
        let mover = board.set(mv.to, mv.captured);
        board.set(mv.from, mover);
        self.redo_stack.push(mv);
        UndoOutcome::Applied(mv)
    }

    /// Replays the most recently undone move, overwriting whatever is on `to`.
    pub fn redo(&mut self, board: &mut Board) -> RedoOutcome {
        let Some(mv) = self.redo_stack.pop() else {
            return RedoOutcome::NothingToRedo;
        };
        board.relocate(mv.from, mv.to);
        self.undo_stack.push(mv);
        RedoOutcome::Applied(mv)
    }

    pub fn undo_depth(&self) -> usize { self.undo_stack.len() }
    pub fn redo_depth(&self) -> usize { self.redo_stack.len() }

    /// Applied moves, oldest first.
    pub fn applied(&self) -> &[Move] {
        &self.undo_stack
    }

    /// Undone moves, next-to-redo last.
    pub fn undone(&self) -> &[Move] {
        &self.redo_stack
    }
}
