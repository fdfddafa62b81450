//! The valid-word set
//!
//! A `WordSet` holds every word a player may guess or be assigned. It offers
//! membership checks, a fixed canonical iteration order (the order words were
//! supplied in; the embedded list is sorted alphabetically), and uniform
//! random draws. The canonical order is what makes adversarial-mode
//! tie-breaking reproducible.

mod embedded;

pub use embedded::{WORDS, WORDS_COUNT};

use crate::core::Word;
use rand::prelude::IndexedRandom;
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Static collection of valid words
#[derive(Debug, Clone)]
pub struct WordSet {
    words: Vec<Word>,
    index: FxHashSet<[u8; 5]>,
}

impl WordSet {
    /// Create a word set from a list of words
    ///
    /// Duplicates are dropped; the first occurrence keeps its position in the
    /// canonical order.
    ///
    /// # Panics
    /// Panics if `words` contains no words. An empty set would make random
    /// draws and adversarial candidate initialization meaningless.
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        assert!(!words.is_empty(), "word set must not be empty");

        let mut index = FxHashSet::default();
        let mut unique = Vec::with_capacity(words.len());
        for word in words {
            if index.insert(*word.chars()) {
                unique.push(word);
            }
        }

        Self {
            words: unique,
            index,
        }
    }

    /// Build the word set embedded at compile time
    ///
    /// # Examples
    /// ```
    /// use worduel::words::WordSet;
    ///
    /// let words = WordSet::embedded();
    /// assert!(words.len() > 1000);
    /// ```
    #[must_use]
    pub fn embedded() -> Self {
        let words = WORDS
            .iter()
            .filter_map(|&s| Word::new(s).ok())
            .collect::<Vec<_>>();
        Self::new(words)
    }

    /// Load a word set from a file with one word per line
    ///
    /// Invalid lines are skipped; blank lines are ignored.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or `InvalidData` if
    /// it contains no valid words.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;

        let words: Vec<Word> = content
            .lines()
            .filter_map(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Word::new(trimmed).ok()
                }
            })
            .collect();

        if words.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "word list file contains no valid words",
            ));
        }

        Ok(Self::new(words))
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains(word.chars())
    }

    /// All words in canonical iteration order
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of words in the set
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false - construction rejects empty sets
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Draw a uniformly random word
    ///
    /// # Panics
    /// Will not panic - construction guarantees the set is non-empty.
    #[must_use]
    pub fn random(&self) -> &Word {
        self.words
            .choose(&mut rand::rng())
            .expect("word set is never empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_set() -> WordSet {
        let words = ["crane", "slate", "irate", "crate", "grate"]
            .iter()
            .map(|&s| Word::new(s).unwrap())
            .collect();
        WordSet::new(words)
    }

    #[test]
    fn embedded_words_are_valid() {
        for &word in &WORDS[..20] {
            assert_eq!(word.len(), 5, "Word '{word}' is not 5 letters");
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "Word '{word}' contains non-lowercase chars"
            );
        }
    }

    #[test]
    fn embedded_count_matches_const() {
        assert_eq!(WORDS.len(), WORDS_COUNT);
        assert_eq!(WordSet::embedded().len(), WORDS_COUNT);
    }

    #[test]
    fn embedded_canonical_order_is_sorted() {
        let words = WordSet::embedded();
        let texts: Vec<&str> = words.words().iter().map(Word::text).collect();
        let mut sorted = texts.clone();
        sorted.sort_unstable();
        assert_eq!(texts, sorted);
    }

    #[test]
    fn contains_is_case_normalized_via_word() {
        let words = small_set();
        assert!(words.contains(&Word::new("CRANE").unwrap()));
        assert!(words.contains(&Word::new("slate").unwrap()));
        assert!(!words.contains(&Word::new("zebra").unwrap()));
    }

    #[test]
    fn duplicates_are_dropped() {
        let words = WordSet::new(vec![
            Word::new("crane").unwrap(),
            Word::new("CRANE").unwrap(),
            Word::new("slate").unwrap(),
        ]);
        assert_eq!(words.len(), 2);
        assert_eq!(words.words()[0].text(), "crane");
    }

    #[test]
    fn random_draw_is_a_member() {
        let words = small_set();
        for _ in 0..20 {
            assert!(words.contains(words.random()));
        }
    }

    #[test]
    #[should_panic(expected = "word set must not be empty")]
    fn empty_set_rejected() {
        let _ = WordSet::new(Vec::new());
    }
}
