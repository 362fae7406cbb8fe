//! Chess board, per-piece move rules and a linear undo/redo history.
//!
//! [`GameSession`] is the entry point: it validates move requests with
//! [`rules::check_move`], applies them to its [`Board`] and records them in a
//! [`MoveHistory`]. Parsing of typed input lives in [`input`]; rendering and
//! the read loop belong to the binary.

pub mod board;
pub mod error;
pub mod history;
pub mod input;
pub mod rules;
pub mod session;
pub mod types;

pub use board::Board;
pub use error::{BoardParseError, CommandError, MoveError, SaveLoadError, SquareError};
pub use history::{Move, MoveHistory, RedoOutcome, UndoOutcome};
pub use session::GameSession;
pub use types::{Color, Piece, PieceType, Square};
