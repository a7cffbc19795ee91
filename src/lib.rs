pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod game;

pub use dictionary::{Dictionary, Lexicon};
pub use error::{GameError, PlacementError};
pub use game::{GameEngine, GameOverReason, Grid, Position};
