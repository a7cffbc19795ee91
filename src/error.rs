use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while setting up a game or adjusting it administratively.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player count must be between 2 and 4, got {0}")]
    InvalidPlayerCount(usize),

    #[error("initial word must be exactly 5 letters, got {0:?}")]
    InvalidInitialWord(String),

    #[error("unable to open game log at {}", .path.display())]
    LogUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no player with index {0}")]
    UnknownPlayer(usize),
}

/// Reasons a placement attempt is rejected. The game state is untouched
/// whenever one of these is returned.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("({row}, {col}) already holds a letter")]
    Occupied { row: usize, col: usize },

    #[error("({row}, {col}) has no neighbouring letter")]
    NotAdjacent { row: usize, col: usize },

    #[error("{0:?} is not a letter")]
    NotALetter(char),
}
