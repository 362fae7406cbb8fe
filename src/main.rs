// src/main.rs
use std::env;
use std::error::Error;
use std::io::{self, Write};

use rust_chess_history::input::{parse_user_input, Command, UserInput};
use rust_chess_history::session::DEFAULT_STATS_FILENAME;
use rust_chess_history::types::BOARD_SIZE;
use rust_chess_history::{Board, GameSession, RedoOutcome, Square, UndoOutcome};

// --- Rendering ---

const SQUARE_MARKS: [char; 2] = ['⬜', '⬛'];

/// Glyph rendering with alternating square colors.
fn render_unicode(board: &Board) -> String {
    let mut out = String::from("x   a   b   c   d   e   f   g   h  x\n\n");
    for (row, cells) in board.snapshot().iter().enumerate() {
        let rank = BOARD_SIZE - row;
        out.push_str(&format!("{} ", rank));
        for (col, cell) in cells.iter().enumerate() {
            out.push(SQUARE_MARKS[(row + col) % 2]);
            match cell {
                Some(piece) => { out.push(piece.glyph()); out.push(' '); }
                None => out.push_str("  "),
            }
        }
        out.push_str(&format!(" {}\n\n", rank));
    }
    out.push_str("x   a   b   c   d   e   f   g   h  x");
    out
}

fn print_state(game: &GameSession, unicode: bool) {
    let (by_white, by_black) = game.captured();
    print!("Captured by White: ");
    for piece in &by_white { print!("{} ", piece); }
    println!();
    print!("Captured by Black: ");
    for piece in &by_black { print!("{} ", piece); }
    println!();
    println!("---------------------");
    if unicode {
        println!("{}", render_unicode(game.board()));
    } else {
        println!("{}", game.board());
    }
    println!("Undo: {}  Redo: {}", game.undo_depth(), game.redo_depth());
}

fn print_history(game: &GameSession) {
    if game.history().is_empty() {
        println!("No moves played.");
        return;
    }
    println!("Move History:");
    for (i, mv) in game.history().iter().enumerate() {
        println!("{:>3}. {}", i + 1, mv);
    }
}

fn print_targets(game: &GameSession, from: Square) {
    let targets = game.legal_targets(from);
    match game.board().piece_at(from) {
        None => println!("No piece on {}.", from),
        Some(_) if targets.is_empty() => println!("The piece on {} has no legal moves.", from),
        Some(piece) => {
            let names: Vec<String> = targets.iter().map(|sq| sq.to_string()).collect();
            println!("{:?} {:?} on {} can move to: {}", piece.color, piece.kind, from, names.join(" "));
        }
    }
}

fn save_before_quit(game: &GameSession, stats_file: &str) {
    match game.save_stats_to_file(stats_file) {
        Ok(()) => println!("Stats saved to {}.", stats_file),
        Err(e) => eprintln!("Warning: Failed to save stats before quitting: {}", e),
    }
}

// --- Main Loop ---

fn main() -> Result<(), Box<dyn Error>> {
    let mut unicode = false;
    let mut stats_file = DEFAULT_STATS_FILENAME.to_string();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--unicode" => unicode = true,
            "-h" | "--help" => {
                println!("Usage: rust_chess_history [--unicode] [STATS_FILE]");
                return Ok(());
            }
            _ => stats_file = arg,
        }
    }

    let mut game = GameSession::new();
    println!("==============================");
    println!("|        Rust Chess          |");
    println!("==============================");
    print_help();

    loop {
        println!("------------------------------------------");
        print_state(&game, unicode);
        print!("\nEnter move (e.g., e2 e4), 'undo', 'redo' or 'quit': ");
        io::stdout().flush()?;

        let mut input_line = String::new();
        match io::stdin().read_line(&mut input_line) {
            Ok(0) => {
                println!("\nEnd of input detected. Quitting game.");
                save_before_quit(&game, &stats_file);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}. Try again or use 'quit'.", e);
                continue;
            }
        }

        let input_trimmed = input_line.trim();
        if input_trimmed.is_empty() { continue; }

        match parse_user_input(input_trimmed) {
            Ok(UserInput::Move(from, to)) => match game.try_move(from, to) {
                Ok(mv) => match mv.captured {
                    Some(piece) => println!("Moved {} (captured {}).", mv.to_algebraic_string(), piece),
                    None => println!("Moved {}.", mv.to_algebraic_string()),
                },
                Err(e) => println!("Illegal move! {}", e),
            },
            Ok(UserInput::Command(command)) => match command {
                Command::Undo => {
                    if let UndoOutcome::NothingToUndo = game.undo() {
                        println!("No moves to undo!");
                    }
                }
                Command::Redo => {
                    if let RedoOutcome::NothingToRedo = game.redo() {
                        println!("No moves to redo!");
                    }
                }
                Command::History => print_history(&game),
                Command::Moves(from) => print_targets(&game, from),
                Command::SaveStats(filename) => match game.save_stats_to_file(&filename) {
                    Ok(()) => println!("Session stats saved to '{}'.", filename),
                    Err(e) => println!("Error saving session stats: {}", e),
                },
                Command::Help => print_help(),
                Command::Quit => {
                    save_before_quit(&game, &stats_file);
                    println!("Exiting game.");
                    break;
                }
            },
            Err(e) => println!("Input Error: {}", e),
        }
    }

    println!("\nGame session finished.");
    Ok(())
}

/// Prints available commands.
fn print_help() {
    println!("\nAvailable Commands:");
    println!("  <from> <to>      Move a piece, e.g. 'e2 e4', 'e2-e4' or 'e2e4'.");
    println!("                   Either color may move; there is no turn order,");
    println!("                   check, castling, en passant or promotion.");
    println!("  undo             Take back the last move.");
    println!("  redo             Replay the last undone move (cleared by a new move).");
    println!("  moves <square>   List legal destinations for the piece on a square.");
    println!("  history          Show the moves currently on the board.");
    println!("  savestats [file] Save session statistics (default: {}).", DEFAULT_STATS_FILENAME);
    println!("  help             Show this help message.");
    println!("  quit / exit      Exit (saves stats).");
    println!();
}
