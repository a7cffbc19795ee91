use std::collections::HashSet;

use serde::Serialize;

use crate::dictionary::Lexicon;

/// A word that earned points on a placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditedWord {
    pub word: String,
    pub points: u32,
}

/// Every word that has been credited during a game, keyed by its
/// upper-cased text. A word enters the set at most once.
#[derive(Debug, Clone, Default)]
pub struct UsedWords {
    words: HashSet<String>,
}

impl UsedWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `word`. Returns false if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_uppercase())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Recorded words in alphabetical order.
    pub fn sorted(&self) -> Vec<String> {
        let mut words: Vec<String> = self.words.iter().cloned().collect();
        words.sort();
        words
    }
}

pub struct Scorer;

impl Scorer {
    /// Points for a word: one per letter.
    pub fn word_points(word: &str) -> u32 {
        word.chars().count() as u32
    }

    /// Credit every candidate that the lexicon accepts and that has not been
    /// credited before. Accepted words are added to `used`.
    pub fn credit_new_words<L>(
        candidates: &[String],
        lexicon: &L,
        used: &mut UsedWords,
    ) -> Vec<CreditedWord>
    where
        L: Lexicon + ?Sized,
    {
        candidates
            .iter()
            .filter(|word| word.chars().count() >= 2)
            .filter(|word| lexicon.contains(word))
            .filter_map(|word| {
                used.insert(word).then(|| CreditedWord {
                    word: word.to_uppercase(),
                    points: Self::word_points(word),
                })
            })
            .collect()
    }

    /// Sum of the points in `credited`.
    pub fn total(credited: &[CreditedWord]) -> u32 {
        credited.iter().map(|c| c.points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_uppercase()).collect()
    }

    fn candidates(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_word_points() {
        assert_eq!(Scorer::word_points("AT"), 2);
        assert_eq!(Scorer::word_points("HELLO"), 5);
    }

    #[test]
    fn test_used_words_case_insensitive() {
        let mut used = UsedWords::new();
        assert!(used.insert("Hello"));
        assert!(!used.insert("HELLO"));
        assert!(used.contains("hello"));
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn test_credits_only_dictionary_words() {
        let lex = lexicon(&["at", "cat"]);
        let mut used = UsedWords::new();

        let credited = Scorer::credit_new_words(&candidates(&["CAT", "XQ", "AT"]), &lex, &mut used);

        assert_eq!(
            credited,
            vec![
                CreditedWord { word: "CAT".into(), points: 3 },
                CreditedWord { word: "AT".into(), points: 2 },
            ]
        );
        assert_eq!(Scorer::total(&credited), 5);
        assert!(!used.contains("XQ"));
    }

    #[test]
    fn test_never_credits_twice() {
        let lex = lexicon(&["at"]);
        let mut used = UsedWords::new();

        let first = Scorer::credit_new_words(&candidates(&["AT", "AT"]), &lex, &mut used);
        assert_eq!(Scorer::total(&first), 2);

        let second = Scorer::credit_new_words(&candidates(&["at"]), &lex, &mut used);
        assert!(second.is_empty());
    }

    #[test]
    fn test_used_words_sorted() {
        let mut used = UsedWords::new();
        used.insert("tea");
        used.insert("ant");
        assert_eq!(used.sorted(), vec!["ANT".to_string(), "TEA".to_string()]);
    }
}
