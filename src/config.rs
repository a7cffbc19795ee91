use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub dictionary_path: String,
    pub log_path: String,
    /// Player count to use instead of prompting, if set.
    pub default_players: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dictionary_path: "./engwords.txt".to_string(),
            log_path: "game_log.txt".to_string(),
            default_players: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = GameConfig::default();

        let game = GameConfig {
            dictionary_path: lookup("DICTIONARY_PATH").unwrap_or(defaults.dictionary_path),
            log_path: lookup("GAME_LOG_PATH").unwrap_or(defaults.log_path),
            default_players: lookup("DEFAULT_PLAYERS")
                .map(|value| value.trim().parse::<usize>())
                .transpose()
                .context("DEFAULT_PLAYERS must be a number")?,
        };

        Ok(Config { game })
    }
}
