use std::{path::Path, sync::Arc};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    dictionary::Lexicon,
    error::{GameError, PlacementError},
    game::{
        grid::{upper, Grid, Position, GRID_SIZE},
        journal::{FileLog, GameLog},
        scorer::{CreditedWord, Scorer, UsedWords},
        validator::PlacementValidator,
    },
};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Why a game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// Every cell holds a letter.
    BoardFull,
    /// Every player skipped in a row with no placement in between.
    Stalemate,
}

/// Outcome of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub player: usize,
    pub position: Position,
    pub letter: char,
    pub words: Vec<CreditedWord>,
    pub points: u32,
}

/// Final snapshot written to the game log when the game ends.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub game_id: Uuid,
    pub reason: Option<GameOverReason>,
    pub scores: Vec<u32>,
    pub used_words: Vec<String>,
    pub finished_at: DateTime<Utc>,
}

/// Owns the board and all turn state for one game.
pub struct GameEngine {
    game_id: Uuid,
    grid: Grid,
    lexicon: Arc<dyn Lexicon>,
    used_words: UsedWords,
    scores: Vec<u32>,
    current_player: usize,
    skip_streak: usize,
    log: Box<dyn GameLog>,
}

impl GameEngine {
    /// Start a game with `initial_word` across the middle row.
    ///
    /// The starting word is marked as used straight away, so it never scores
    /// when it turns up again as a run.
    pub fn new(
        initial_word: &str,
        lexicon: Arc<dyn Lexicon>,
        num_players: usize,
        log: Box<dyn GameLog>,
    ) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidPlayerCount(num_players));
        }

        if initial_word.chars().count() != GRID_SIZE
            || !initial_word.chars().all(char::is_alphabetic)
        {
            return Err(GameError::InvalidInitialWord(initial_word.to_string()));
        }

        let mut used_words = UsedWords::new();
        used_words.insert(initial_word);

        let mut engine = Self {
            game_id: Uuid::new_v4(),
            grid: Grid::with_middle_word(initial_word),
            lexicon,
            used_words,
            scores: vec![0; num_players],
            current_player: 0,
            skip_streak: 0,
            log,
        };

        tracing::info!(
            "Game {} started with {} players, initial word {}",
            engine.game_id,
            num_players,
            initial_word.to_uppercase()
        );
        engine.record(format!(
            "Game {} started at {} with {} players, initial word: {}",
            engine.game_id,
            Utc::now().to_rfc3339(),
            num_players,
            initial_word.to_uppercase()
        ));

        Ok(engine)
    }

    /// Like [`GameEngine::new`], logging to a freshly created file at `path`.
    pub fn with_log_file<P: AsRef<Path>>(
        initial_word: &str,
        lexicon: Arc<dyn Lexicon>,
        num_players: usize,
        path: P,
    ) -> Result<Self, GameError> {
        let log = FileLog::create(path)?;
        tracing::debug!("Game log opened at {}", log.path().display());
        Self::new(initial_word, lexicon, num_players, Box::new(log))
    }

    /// Try to place `letter` at (`row`, `col`) for the current player.
    ///
    /// Returns true if the letter went down and the turn passed on.
    pub fn place_letter(&mut self, row: usize, col: usize, letter: char) -> bool {
        self.play_letter(row, col, letter).is_ok()
    }

    /// Place a letter and report what it scored.
    ///
    /// On error nothing changes apart from a log line, and the same player
    /// is still to move.
    pub fn play_letter(
        &mut self,
        row: usize,
        col: usize,
        letter: char,
    ) -> Result<Placement, PlacementError> {
        let player = self.current_player;
        let position = Position::new(row, col);

        if let Err(err) = PlacementValidator::check(&self.grid, position, letter) {
            tracing::debug!("Player {} rejected at ({}, {}): {}", player + 1, row, col, err);
            self.record(format!(
                "Invalid placement by Player {} at ({}, {}): {}",
                player + 1,
                row,
                col,
                err
            ));
            return Err(err);
        }

        let letter = upper(letter);
        self.grid.set(position, letter);
        self.record(format!(
            "Player {} added letter '{}' at ({}, {})",
            player + 1,
            letter,
            row,
            col
        ));

        let words =
            Scorer::credit_new_words(&self.grid.runs(), &*self.lexicon, &mut self.used_words);
        let points = Scorer::total(&words);
        self.scores[player] = self.scores[player].saturating_add(points);

        for credited in &words {
            tracing::info!(
                "Player {} scored {} for {}",
                player + 1,
                credited.points,
                credited.word
            );
            self.record(format!(
                "Found valid word: {} - Player {} earns {} points",
                credited.word,
                player + 1,
                credited.points
            ));
        }

        self.skip_streak = 0;
        self.next_turn();

        Ok(Placement {
            player,
            position,
            letter,
            words,
            points,
        })
    }

    /// Pass the current player's turn without placing anything.
    pub fn skip_turn(&mut self) {
        tracing::debug!("Player {} skipped", self.current_player + 1);
        self.record(format!("Player {} skipped", self.current_player + 1));
        self.skip_streak += 1;
        self.next_turn();
    }

    fn next_turn(&mut self) {
        self.current_player = (self.current_player + 1) % self.scores.len();
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over_reason().is_some()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        if self.grid.is_full() {
            Some(GameOverReason::BoardFull)
        } else if self.skip_streak >= self.num_players() {
            Some(GameOverReason::Stalemate)
        } else {
            None
        }
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn num_players(&self) -> usize {
        self.scores.len()
    }

    pub fn score(&self, player: usize) -> Option<u32> {
        self.scores.get(player).copied()
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Overwrite a player's score, bypassing normal scoring.
    pub fn set_score(&mut self, player: usize, score: u32) -> Result<(), GameError> {
        let slot = self
            .scores
            .get_mut(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        *slot = score;
        self.record(format!("Score for Player {} set to {}", player + 1, score));
        Ok(())
    }

    pub fn skip_streak(&self) -> usize {
        self.skip_streak
    }

    pub fn used_words(&self) -> &UsedWords {
        &self.used_words
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    /// Player indices ordered by score, highest first. Ties keep seat order.
    pub fn standings(&self) -> Vec<(usize, u32)> {
        let mut standings: Vec<(usize, u32)> = self.scores.iter().copied().enumerate().collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        standings
    }

    /// Every player sharing the top score.
    pub fn leaders(&self) -> Vec<usize> {
        let best = self.scores.iter().copied().max().unwrap_or(0);
        self.scores
            .iter()
            .enumerate()
            .filter(|(_, score)| **score == best)
            .map(|(player, _)| player)
            .collect()
    }

    /// Write the current board to the game log.
    pub fn log_board(&mut self) {
        self.record("Board state:".to_string());
        for line in self.grid.render_rows() {
            self.record(line);
        }
    }

    /// Write every player's score to the game log.
    pub fn log_scores(&mut self) {
        for player in 0..self.num_players() {
            self.record(format!("Player {} score: {}", player + 1, self.scores[player]));
        }
    }

    /// Write the end-of-game reason and a JSON summary to the game log.
    pub fn log_game_over(&mut self) -> GameSummary {
        let reason = self.game_over_reason();
        match reason {
            Some(GameOverReason::BoardFull) => {
                self.record("Game over because all cells are filled.".to_string())
            }
            Some(GameOverReason::Stalemate) => {
                self.record("Game over because too many skips.".to_string())
            }
            None => self.record("Game stopped before it was over.".to_string()),
        }

        let summary = self.summary();
        tracing::info!("Game {} finished: {:?}", self.game_id, reason);
        match serde_json::to_string(&summary) {
            Ok(json) => self.record(json),
            Err(e) => tracing::error!("Failed to serialize game summary: {}", e),
        }
        summary
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            game_id: self.game_id,
            reason: self.game_over_reason(),
            scores: self.scores.clone(),
            used_words: self.used_words.sorted(),
            finished_at: Utc::now(),
        }
    }

    fn record(&mut self, line: String) {
        if let Err(e) = self.log.append_line(&line) {
            tracing::warn!("Failed to write game log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::game::journal::MemoryLog;

    fn lexicon(words: &[&str]) -> Arc<dyn Lexicon> {
        let set: HashSet<String> = words.iter().map(|w| w.to_uppercase()).collect();
        Arc::new(set)
    }

    fn engine(words: &[&str], players: usize) -> (GameEngine, MemoryLog) {
        let log = MemoryLog::new();
        let engine =
            GameEngine::new("HELLO", lexicon(words), players, Box::new(log.clone())).unwrap();
        (engine, log)
    }

    #[test]
    fn test_rejects_bad_player_counts() {
        for players in [0, 1, 5] {
            let err = GameEngine::new("HELLO", lexicon(&[]), players, Box::new(MemoryLog::new()))
                .err()
                .unwrap();
            assert!(matches!(err, GameError::InvalidPlayerCount(n) if n == players));
        }
    }

    #[test]
    fn test_rejects_bad_initial_word() {
        for word in ["HELL", "HELLOS", "HE1LO", ""] {
            let err = GameEngine::new(word, lexicon(&[]), 2, Box::new(MemoryLog::new()))
                .err()
                .unwrap();
            assert!(matches!(err, GameError::InvalidInitialWord(_)));
        }
    }

    #[test]
    fn test_initial_state() {
        let (engine, log) = engine(&["hello"], 3);
        assert_eq!(engine.current_player(), 0);
        assert_eq!(engine.num_players(), 3);
        assert_eq!(engine.scores(), &[0, 0, 0]);
        assert_eq!(engine.skip_streak(), 0);
        assert!(engine.used_words().contains("hello"));
        assert_eq!(engine.grid().filled_count(), 5);
        assert!(!engine.is_game_over());
        assert!(log.lines()[0].contains("initial word: HELLO"));
    }

    #[test]
    fn test_lowercase_initial_word_is_used() {
        let engine = GameEngine::new("hello", lexicon(&[]), 2, Box::new(MemoryLog::new())).unwrap();
        assert!(engine.used_words().contains("HELLO"));
        assert_eq!(engine.grid().get(Position::new(2, 0)), Some('H'));
    }

    #[test]
    fn test_placement_without_word_scores_nothing() {
        let (mut engine, _) = engine(&["he"], 2);
        assert!(engine.place_letter(1, 0, 'S'));
        assert_eq!(engine.scores(), &[0, 0]);
        assert_eq!(engine.current_player(), 1);
    }

    #[test]
    fn test_placement_scores_vertical_word() {
        let (mut engine, log) = engine(&["sh"], 2);
        let placement = engine.play_letter(1, 0, 's').unwrap();

        assert_eq!(placement.player, 0);
        assert_eq!(placement.letter, 'S');
        assert_eq!(placement.points, 2);
        assert_eq!(placement.words[0].word, "SH");
        assert_eq!(engine.score(0), Some(2));
        assert_eq!(engine.score(1), Some(0));
        assert!(log
            .lines()
            .iter()
            .any(|l| l == "Found valid word: SH - Player 1 earns 2 points"));
    }

    #[test]
    fn test_one_placement_scores_two_directions() {
        let (mut engine, _) = engine(&["at", "te"], 2);
        assert!(engine.place_letter(1, 0, 'A'));
        assert_eq!(engine.score(0), Some(0));

        // T at (1,1) completes "AT" across row 1 and "TE" down column 1.
        let placement = engine.play_letter(1, 1, 'T').unwrap();
        let words: Vec<&str> = placement.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["AT", "TE"]);
        assert_eq!(engine.score(1), Some(4));
    }

    #[test]
    fn test_word_is_credited_once() {
        let (mut engine, _) = engine(&["lo"], 2);

        // L above the O in column 4.
        assert!(engine.place_letter(1, 4, 'L'));
        assert_eq!(engine.score(0), Some(2));

        // O below the L in column 2 forms "LO" a second time.
        assert!(engine.place_letter(3, 2, 'O'));
        assert_eq!(engine.scores(), &[2, 0]);
    }

    #[test]
    fn test_initial_word_never_scores() {
        let (mut engine, _) = engine(&["hello"], 2);
        assert!(engine.place_letter(3, 0, 'X'));
        assert_eq!(engine.scores(), &[0, 0]);
        assert_eq!(engine.used_words().len(), 1);
    }

    #[test]
    fn test_invalid_placement_keeps_turn() {
        let (mut engine, log) = engine(&[], 2);

        assert_eq!(
            engine.play_letter(0, 0, 'A'),
            Err(PlacementError::NotAdjacent { row: 0, col: 0 })
        );
        assert_eq!(
            engine.play_letter(2, 2, 'A'),
            Err(PlacementError::Occupied { row: 2, col: 2 })
        );
        assert!(!engine.place_letter(9, 0, 'A'));

        assert_eq!(engine.current_player(), 0);
        assert_eq!(engine.grid().filled_count(), 5);
        assert!(log
            .lines()
            .iter()
            .any(|l| l.starts_with("Invalid placement by Player 1 at (0, 0)")));
    }

    #[test]
    fn test_placement_resets_skip_streak() {
        let (mut engine, _) = engine(&[], 3);
        engine.skip_turn();
        engine.skip_turn();
        assert_eq!(engine.skip_streak(), 2);
        assert!(engine.place_letter(1, 0, 'A'));
        assert_eq!(engine.skip_streak(), 0);
        assert_eq!(engine.current_player(), 0);
    }

    #[test]
    fn test_two_skips_end_two_player_game() {
        let (mut engine, _) = engine(&[], 2);
        engine.skip_turn();
        assert!(!engine.is_game_over());
        engine.skip_turn();
        assert!(engine.is_game_over());
        assert_eq!(engine.game_over_reason(), Some(GameOverReason::Stalemate));
    }

    #[test]
    fn test_full_board_ends_game() {
        let (mut engine, _) = engine(&[], 4);
        // Fill outward from the middle row so every placement has a neighbour.
        for row in [1, 0, 3, 4] {
            for col in 0..GRID_SIZE {
                assert!(engine.place_letter(row, col, 'Z'));
            }
        }
        assert!(engine.grid().is_full());
        assert_eq!(engine.game_over_reason(), Some(GameOverReason::BoardFull));

        // A full board outranks a stalemate once everyone has skipped too.
        for _ in 0..engine.num_players() {
            engine.skip_turn();
        }
        assert_eq!(engine.skip_streak(), 4);
        assert!(engine.is_game_over());
        assert_eq!(engine.game_over_reason(), Some(GameOverReason::BoardFull));
    }

    #[test]
    fn test_set_score() {
        let (mut engine, _) = engine(&[], 2);
        engine.set_score(1, 42).unwrap();
        assert_eq!(engine.score(1), Some(42));
        assert!(matches!(engine.set_score(2, 1), Err(GameError::UnknownPlayer(2))));
        assert_eq!(engine.score(2), None);
    }

    #[test]
    fn test_score_saturates_after_override() {
        let (mut engine, _) = engine(&["sh"], 2);
        engine.set_score(0, u32::MAX).unwrap();

        let placement = engine.play_letter(1, 0, 'S').unwrap();
        assert_eq!(placement.points, 2);
        assert_eq!(engine.score(0), Some(u32::MAX));
        assert_eq!(engine.current_player(), 1);
        assert!(engine.used_words().contains("SH"));
    }

    #[test]
    fn test_non_ascii_letter_stored_upper_case() {
        let (mut engine, _) = engine(&[], 2);
        let placement = engine.play_letter(1, 0, 'é').unwrap();
        assert_eq!(placement.letter, 'É');
        assert_eq!(engine.grid().get(Position::new(1, 0)), Some('É'));
    }

    #[test]
    fn test_standings_and_leaders() {
        let (mut engine, _) = engine(&[], 4);
        engine.set_score(0, 3).unwrap();
        engine.set_score(1, 7).unwrap();
        engine.set_score(3, 7).unwrap();

        assert_eq!(engine.standings(), vec![(1, 7), (3, 7), (0, 3), (2, 0)]);
        assert_eq!(engine.leaders(), vec![1, 3]);
    }

    #[test]
    fn test_board_and_score_reports() {
        let (mut engine, log) = engine(&[], 2);
        engine.log_board();
        engine.log_scores();

        let lines = log.lines();
        let board_at = lines.iter().position(|l| l == "Board state:").unwrap();
        assert_eq!(lines[board_at + 3], "H E L L O");
        assert!(lines.contains(&"Player 1 score: 0".to_string()));
        assert!(lines.contains(&"Player 2 score: 0".to_string()));
    }

    #[test]
    fn test_game_over_summary() {
        let (mut engine, log) = engine(&["sh"], 2);
        engine.place_letter(1, 0, 'S');
        engine.skip_turn();
        engine.skip_turn();

        let summary = engine.log_game_over();
        assert_eq!(summary.reason, Some(GameOverReason::Stalemate));
        assert_eq!(summary.scores, vec![2, 0]);
        assert_eq!(summary.used_words, vec!["HELLO".to_string(), "SH".to_string()]);

        let lines = log.lines();
        assert!(lines.contains(&"Game over because too many skips.".to_string()));
        let json: serde_json::Value = serde_json::from_str(lines.last().unwrap()).unwrap();
        assert_eq!(json["reason"], "stalemate");
        assert_eq!(json["game_id"], engine.game_id().to_string());
    }
}
