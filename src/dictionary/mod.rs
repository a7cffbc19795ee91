use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::IndexedRandom;
use tokio::fs;

/// Word lookup consumed by the game engine.
///
/// Lookups are case-insensitive exact matches.
pub trait Lexicon: Send + Sync {
    fn contains(&self, word: &str) -> bool;
}

pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load dictionary from a file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read dictionary {}", path.display()))?;
        let dictionary = Self::parse(&content);

        tracing::info!("Loaded {} words into dictionary", dictionary.len());

        Ok(dictionary)
    }

    /// Build a dictionary from raw word-list text.
    ///
    /// Tokens are split on whitespace, stripped of anything that is not a
    /// letter and upper-cased. Tokens shorter than two letters are dropped.
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.split_whitespace())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| normalize(word.as_ref()))
            .filter(|word| word.chars().count() >= 2)
            .collect();

        Self { words }
    }

    /// Create an empty dictionary (for testing)
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Check if a word exists in the dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    /// Pick a random word with exactly `len` letters.
    pub fn random_word(&self, len: usize) -> Option<&str> {
        let candidates: Vec<&str> = self
            .words
            .iter()
            .filter(|word| word.chars().count() == len)
            .map(String::as_str)
            .collect();

        candidates.choose(&mut rand::rng()).copied()
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect()
}

impl Lexicon for Dictionary {
    fn contains(&self, word: &str) -> bool {
        Dictionary::contains(self, word)
    }
}

/// Plain sets of upper-case words, handy for tests and fixtures.
impl Lexicon for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, &word.to_uppercase())
    }
}
