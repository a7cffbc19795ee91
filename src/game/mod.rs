// Board, turn and scoring logic

pub mod engine;
pub mod grid;
pub mod journal;
pub mod scorer;
pub mod validator;

pub use engine::{GameEngine, GameOverReason, GameSummary, Placement, MAX_PLAYERS, MIN_PLAYERS};
pub use grid::{Grid, Position, GRID_SIZE};
pub use journal::{FileLog, GameLog, MemoryLog};
pub use scorer::{CreditedWord, Scorer, UsedWords};
pub use validator::PlacementValidator;
