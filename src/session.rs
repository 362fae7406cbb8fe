// src/session.rs
use serde::Serialize;
use std::fs;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::error::{MoveError, SaveLoadError};
use crate::history::{Move, MoveHistory, RedoOutcome, UndoOutcome};
use crate::rules;
use crate::types::{Color, Piece, Square};

pub const DEFAULT_STATS_FILENAME: &str = "chess_session.json";

// --- Event Log ---

#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    pub mv_algebraic: String,
    pub player: Color,
    pub captured: Option<Piece>,
    pub time_taken: Duration,
    pub position_key: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum SessionEvent {
    Move(MoveRecord),
    Undo { mv_algebraic: String },
    Redo { mv_algebraic: String },
}

#[derive(Debug, Serialize)]
pub struct MoveStat {
    pub move_algebraic: String,
    pub time_taken: Duration,
    pub captured: Option<Piece>,
}

#[derive(Debug, Serialize)]
pub struct SessionStats {
    pub moves_applied: usize,
    pub undos: usize,
    pub redos: usize,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub total_move_time_secs: u64,
    pub white_moves: Vec<MoveStat>,
    pub black_moves: Vec<MoveStat>,
    pub captured_by_white: Vec<Piece>,
    pub captured_by_black: Vec<Piece>,
    pub final_placement: String,
    pub final_position_key: String,
    pub events: Vec<SessionEvent>,
}

// --- Game Session ---

/// Owns the board and its move history. Whose turn it is is not tracked:
/// any legal move for either color is accepted.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    history: MoveHistory,
    event_history: Vec<SessionEvent>,
    turn_start_time: Instant,
}

impl Default for GameSession {
    fn default() -> Self { GameSession::new() }
}

impl GameSession {
    /// Starts from the standard initial arrangement.
    pub fn new() -> Self {
        GameSession::from_board(Board::initial())
    }

    /// Starts from an arbitrary position with an empty history.
    pub fn from_board(board: Board) -> Self {
        GameSession {
            board,
            history: MoveHistory::new(),
            event_history: Vec::new(),
            turn_start_time: Instant::now(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[Move] {
        self.history.applied()
    }

    pub fn undo_depth(&self) -> usize { self.history.undo_depth() }
    pub fn redo_depth(&self) -> usize { self.history.redo_depth() }

    pub fn events(&self) -> &[SessionEvent] {
        &self.event_history
    }

    /// Validates and applies a move. On rejection nothing changes.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<Move, MoveError> {
        rules::check_move(&self.board, from, to)?;
        let mover = self.board.piece_at(from).ok_or(MoveError::EmptySource(from))?;

        let captured = self.board.relocate(from, to);
        let mv = Move::new(from, to, captured);
        self.history.record_and_clear_redo(mv);

        let record = MoveRecord {
            mv_algebraic: mv.to_algebraic_string(),
            player: mover.color,
            captured,
            time_taken: self.turn_start_time.elapsed(),
            position_key: self.board.zobrist_key(),
        };
        self.event_history.push(SessionEvent::Move(record));
        self.start_turn_timer();
        Ok(mv)
    }

    pub fn undo(&mut self) -> UndoOutcome {
        let outcome = self.history.undo(&mut self.board);
        if let UndoOutcome::Applied(mv) = outcome {
            self.event_history.push(SessionEvent::Undo { mv_algebraic: mv.to_algebraic_string() });
            self.start_turn_timer();
        }
        outcome
    }

    pub fn redo(&mut self) -> RedoOutcome {
        let outcome = self.history.redo(&mut self.board);
        if let RedoOutcome::Applied(mv) = outcome {
            self.event_history.push(SessionEvent::Redo { mv_algebraic: mv.to_algebraic_string() });
            self.start_turn_timer();
        }
        outcome
    }

    /// Legal destinations for the piece on `from`.
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        rules::legal_targets(&self.board, from)
    }

    /// Pieces currently captured, as (taken by White, taken by Black),
    /// each sorted by value. Undone captures are not counted.
    pub fn captured(&self) -> (Vec<Piece>, Vec<Piece>) {
        let mut by_white = Vec::new();
        let mut by_black = Vec::new();
        for piece in self.history.applied().iter().filter_map(|mv| mv.captured) {
            match piece.color {
                Color::Black => by_white.push(piece),
                Color::White => by_black.push(piece),
            }
        }
        by_white.sort_by_key(|p| p.value());
        by_black.sort_by_key(|p| p.value());
        (by_white, by_black)
    }

    fn start_turn_timer(&mut self) {
        self.turn_start_time = Instant::now();
    }

    // --- Stats Generation and Saving ---

    pub fn generate_stats(&self) -> SessionStats {
        let mut white_moves = Vec::new();
        let mut black_moves = Vec::new();
        let mut total_duration = Duration::ZERO;
        let (mut undos, mut redos) = (0, 0);

        for event in &self.event_history {
            match event {
                SessionEvent::Move(record) => {
                    let stat = MoveStat {
                        move_algebraic: record.mv_algebraic.clone(),
                        time_taken: record.time_taken,
                        captured: record.captured,
                    };
                    match record.player {
                        Color::White => white_moves.push(stat),
                        Color::Black => black_moves.push(stat),
                    }
                    total_duration += record.time_taken;
                }
                SessionEvent::Undo { .. } => undos += 1,
                SessionEvent::Redo { .. } => redos += 1,
            }
        }

        let (captured_by_white, captured_by_black) = self.captured();
        SessionStats {
            moves_applied: white_moves.len() + black_moves.len(),
            undos,
            redos,
            undo_depth: self.history.undo_depth(),
            redo_depth: self.history.redo_depth(),
            total_move_time_secs: total_duration.as_secs(),
            white_moves,
            black_moves,
            captured_by_white,
            captured_by_black,
            final_placement: self.board.placement(),
            final_position_key: format!("{:016x}", self.board.zobrist_key()),
            events: self.event_history.clone(),
        }
    }

    /// Saves the session statistics as pretty-printed JSON.
    pub fn save_stats_to_file(&self, filename: &str) -> Result<(), SaveLoadError> {
        let stats = self.generate_stats();

        let json_data = serde_json::to_string_pretty(&stats)
            .map_err(SaveLoadError::Serialization)?;

        fs::write(filename, json_data)
            .map_err(|e| SaveLoadError::Io(filename.to_string(), e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceType;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn rejected_move_leaves_everything_untouched() {
        let mut session = GameSession::new();
        let err = session.try_move(sq("e2"), sq("e5")).unwrap_err();
        assert!(matches!(err, MoveError::ShapeInvalid { .. }));
        assert_eq!(session.board(), &Board::initial());
        assert_eq!(session.undo_depth(), 0);
        assert!(session.events().is_empty());
    }

    #[test]
    fn accepted_move_records_capture_and_mover() {
        let board = Board::from_placement("8/8/8/3p4/4P3/8/8/8").unwrap();
        let mut session = GameSession::from_board(board);
        let mv = session.try_move(sq("e4"), sq("d5")).unwrap();
        assert_eq!(mv.captured, Some(Piece::new(PieceType::Pawn, Color::Black)));

        match &session.events()[0] {
            SessionEvent::Move(record) => {
                assert_eq!(record.mv_algebraic, "e4d5");
                assert_eq!(record.player, Color::White);
                assert_eq!(record.position_key, session.board().zobrist_key());
            }
            other => panic!("unexpected event {:?}", other),
        }
        let (by_white, by_black) = session.captured();
        assert_eq!(by_white, vec![Piece::new(PieceType::Pawn, Color::Black)]);
        assert!(by_black.is_empty());
    }

    #[test]
    fn undone_captures_are_not_counted() {
        let board = Board::from_placement("8/8/8/3p4/4P3/8/8/8").unwrap();
        let mut session = GameSession::from_board(board);
        session.try_move(sq("e4"), sq("d5")).unwrap();
        session.undo();
        assert_eq!(session.captured(), (vec![], vec![]));
    }

    #[test]
    fn no_turn_order_is_enforced() {
        let mut session = GameSession::new();
        assert!(session.try_move(sq("e2"), sq("e4")).is_ok());
        assert!(session.try_move(sq("d2"), sq("d4")).is_ok());
        assert!(session.try_move(sq("e7"), sq("e5")).is_ok());
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn stats_summarise_the_event_log() {
        let mut session = GameSession::new();
        session.try_move(sq("e2"), sq("e4")).unwrap();
        session.try_move(sq("d7"), sq("d5")).unwrap();
        session.try_move(sq("e4"), sq("d5")).unwrap();
        session.undo();
        session.redo();
        session.undo();
        assert_eq!(session.redo(), RedoOutcome::Applied(session.history()[2]));

        let stats = session.generate_stats();
        assert_eq!(stats.moves_applied, 3);
        assert_eq!((stats.undos, stats.redos), (2, 2));
        assert_eq!((stats.undo_depth, stats.redo_depth), (3, 0));
        assert_eq!(stats.white_moves.len(), 2);
        assert_eq!(stats.black_moves.len(), 1);
        assert_eq!(stats.captured_by_white, vec![Piece::new(PieceType::Pawn, Color::Black)]);
        assert_eq!(stats.final_placement, session.board().placement());
        assert_eq!(stats.events.len(), 7);
    }

    #[test]
    fn stats_serialize_to_json() {
        let mut session = GameSession::new();
        session.try_move(sq("g1"), sq("f3")).unwrap();
        session.undo();
        let json = serde_json::to_value(session.generate_stats()).unwrap();
        assert_eq!(json["moves_applied"], 1);
        assert_eq!(json["redo_depth"], 1);
        assert_eq!(json["events"][0]["type"], "Move");
        assert_eq!(json["events"][0]["details"]["mv_algebraic"], "g1f3");
        assert_eq!(json["events"][1]["type"], "Undo");
        assert_eq!(json["white_moves"][0]["move_algebraic"], "g1f3");
    }

    #[test]
    fn save_reports_io_errors() {
        let session = GameSession::new();
        let err = session.save_stats_to_file("/nonexistent-dir/stats.json").unwrap_err();
        assert!(matches!(err, SaveLoadError::Io(ref file, _) if file == "/nonexistent-dir/stats.json"));
    }

    #[test]
    fn save_writes_json_file() {
        let mut session = GameSession::new();
        session.try_move(sq("e2"), sq("e4")).unwrap();
        let path = std::env::temp_dir().join(format!("chess_session_test_{}.json", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        session.save_stats_to_file(&path_str).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["final_placement"], "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
    }
}
