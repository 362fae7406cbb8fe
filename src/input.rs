// src/input.rs
//! Turns a line typed at the prompt into a command or a pair of squares.
//! Coordinates are range-checked here, before anything reaches the rules.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::CommandError;
use crate::session::DEFAULT_STATS_FILENAME;
use crate::types::Square;

lazy_static! {
    // "e2 e4", "e2-e4", "e2 - e4"
    static ref SPLIT_MOVE_RE: Regex = Regex::new(r"^([^\s-]+)\s*(?:-|\s)\s*([^\s-]+)$").unwrap();
    // "e2e4"
    static ref COMPACT_MOVE_RE: Regex = Regex::new(r"^([A-Za-z][0-9])([A-Za-z][0-9])$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Move(Square, Square),
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Undo, Redo, History, Help, Quit,
    Moves(Square),
    SaveStats(String),
}

/// Parses one input line. Command words are case-insensitive.
pub fn parse_user_input(input: &str) -> Result<UserInput, CommandError> {
    let trimmed_input = input.trim();

    let mut parts = trimmed_input.splitn(2, char::is_whitespace);
    let command_word = parts.next().unwrap_or("").to_lowercase();
    let argument = parts.next().unwrap_or("").trim();

    match command_word.as_str() {
        "undo" if argument.is_empty() => return Ok(UserInput::Command(Command::Undo)),
        "redo" if argument.is_empty() => return Ok(UserInput::Command(Command::Redo)),
        "history" if argument.is_empty() => return Ok(UserInput::Command(Command::History)),
        "help" | "?" if argument.is_empty() => return Ok(UserInput::Command(Command::Help)),
        "quit" | "exit" if argument.is_empty() => return Ok(UserInput::Command(Command::Quit)),
        "moves" => {
            if argument.is_empty() {
                return Err(CommandError::MissingArgument("moves".to_string()));
            }
            return Ok(UserInput::Command(Command::Moves(Square::from_algebraic(argument)?)));
        }
        "savestats" => {
            let filename = if argument.is_empty() { DEFAULT_STATS_FILENAME } else { argument }.to_string();
            return Ok(UserInput::Command(Command::SaveStats(filename)));
        }
        _ => {}
    }

    parse_move(trimmed_input)
}

/// Parses "from to" coordinates into squares.
pub fn parse_move(input: &str) -> Result<UserInput, CommandError> {
    let trimmed = input.trim();
    let caps = SPLIT_MOVE_RE.captures(trimmed)
        .or_else(|| COMPACT_MOVE_RE.captures(trimmed))
        .ok_or_else(|| CommandError::InvalidFormat(trimmed.to_string()))?;

    let from = Square::from_algebraic(&caps[1])?;
    let to = Square::from_algebraic(&caps[2])?;
    Ok(UserInput::Move(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SquareError;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn move_forms() {
        let expected = UserInput::Move(sq("e2"), sq("e4"));
        for text in ["e2 e4", "e2-e4", "e2 - e4", "  e2   e4 ", "e2e4"] {
            assert_eq!(parse_user_input(text).unwrap(), expected, "{:?}", text);
        }
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_user_input("UNDO").unwrap(), UserInput::Command(Command::Undo));
        assert_eq!(parse_user_input("Redo").unwrap(), UserInput::Command(Command::Redo));
        assert_eq!(parse_user_input("quit").unwrap(), UserInput::Command(Command::Quit));
        assert_eq!(parse_user_input("Exit").unwrap(), UserInput::Command(Command::Quit));
        assert_eq!(parse_user_input("?").unwrap(), UserInput::Command(Command::Help));
        assert_eq!(parse_user_input("history").unwrap(), UserInput::Command(Command::History));
    }

    #[test]
    fn command_arguments() {
        assert_eq!(parse_user_input("moves g1").unwrap(), UserInput::Command(Command::Moves(sq("g1"))));
        assert!(matches!(parse_user_input("moves"), Err(CommandError::MissingArgument(_))));
        assert!(matches!(parse_user_input("moves z9"), Err(CommandError::InvalidSquare(SquareError::BadFile('z')))));
        assert_eq!(
            parse_user_input("savestats").unwrap(),
            UserInput::Command(Command::SaveStats(DEFAULT_STATS_FILENAME.to_string()))
        );
        assert_eq!(
            parse_user_input("savestats out.json").unwrap(),
            UserInput::Command(Command::SaveStats("out.json".to_string()))
        );
    }

    #[test]
    fn malformed_input() {
        assert!(matches!(parse_user_input("e2"), Err(CommandError::InvalidFormat(_))));
        assert!(matches!(parse_user_input("e2 e4 e6"), Err(CommandError::InvalidFormat(_))));
        assert!(matches!(parse_user_input("castle"), Err(CommandError::InvalidFormat(_))));
        // Not a command, so read as a move with bad squares
        assert!(matches!(parse_user_input("undo now"), Err(CommandError::InvalidSquare(SquareError::BadLength(_)))));
        for text in ["history now", "help me", "? x", "quit now", "exit 1"] {
            assert!(parse_user_input(text).is_err(), "{:?}", text);
        }
    }

    #[test]
    fn out_of_range_squares() {
        assert!(matches!(parse_user_input("e2 e9"), Err(CommandError::InvalidSquare(SquareError::BadRank('9')))));
        assert!(matches!(parse_user_input("i2i4"), Err(CommandError::InvalidSquare(SquareError::BadFile('i')))));
        assert!(matches!(parse_user_input("e22 e4"), Err(CommandError::InvalidSquare(SquareError::BadLength(_)))));
        assert!(matches!(parse_user_input("E2 E4"), Err(CommandError::InvalidSquare(SquareError::BadFile('E')))));
    }
}
