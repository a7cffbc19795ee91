use clap::Parser;
use thiserror::Error;

use crate::game::{GameEngine, MAX_PLAYERS, MIN_PLAYERS};

#[derive(Parser, Debug)]
#[command(author, version, about = "Place letters on a 5x5 grid and score the words you form", long_about = None)]
pub struct Args {
    /// Five-letter starting word laid across the middle row
    #[arg(long, conflicts_with = "random_word")]
    pub word: Option<String>,

    /// Pick the starting word at random from the dictionary
    #[arg(long)]
    pub random_word: bool,

    /// Number of players (2-4)
    #[arg(long)]
    pub players: Option<usize>,

    /// Word list to validate words against (overrides DICTIONARY_PATH)
    #[arg(long)]
    pub dictionary: Option<String>,

    /// Where to write the game log (overrides GAME_LOG_PATH)
    #[arg(long)]
    pub log: Option<String>,
}

/// One line of turn input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnInput {
    Skip,
    Place { row: usize, col: usize, letter: char },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("enter a row, a column and a letter, or -1 to skip")]
    Malformed,

    #[error("{0:?} is not a valid row or column")]
    BadCoordinate(String),

    #[error("{0:?} is not a single letter")]
    BadLetter(String),
}

/// Parse a turn such as `1 0 S`, `1,0,S` or `-1`.
pub fn parse_turn(input: &str) -> Result<TurnInput, InputError> {
    let tokens: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    match tokens.as_slice() {
        ["-1", ..] => Ok(TurnInput::Skip),
        [word] if word.eq_ignore_ascii_case("skip") => Ok(TurnInput::Skip),
        [row, col, letter] => {
            let row = parse_coordinate(row)?;
            let col = parse_coordinate(col)?;
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => Ok(TurnInput::Place { row, col, letter }),
                _ => Err(InputError::BadLetter(letter.to_string())),
            }
        }
        _ => Err(InputError::Malformed),
    }
}

fn parse_coordinate(token: &str) -> Result<usize, InputError> {
    token
        .parse()
        .map_err(|_| InputError::BadCoordinate(token.to_string()))
}

/// Player count from a prompt answer, if it is a number in range.
pub fn parse_player_count(input: &str) -> Option<usize> {
    input
        .trim()
        .parse()
        .ok()
        .filter(|n| (MIN_PLAYERS..=MAX_PLAYERS).contains(n))
}

/// "Player N score: S" lines, players numbered from 1.
pub fn score_lines(engine: &GameEngine) -> Vec<String> {
    engine
        .scores()
        .iter()
        .enumerate()
        .map(|(player, score)| format!("Player {} score: {}", player + 1, score))
        .collect()
}

/// Announcement for the player(s) holding the top score.
pub fn winner_line(engine: &GameEngine) -> String {
    let leaders: Vec<String> = engine
        .leaders()
        .iter()
        .map(|player| format!("Player {}", player + 1))
        .collect();

    match leaders.as_slice() {
        [single] => format!("{single} wins!"),
        _ => format!("Tie between {}", leaders.join(", ")),
    }
}
