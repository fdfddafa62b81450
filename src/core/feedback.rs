//! Guess feedback scoring and representation
//!
//! Feedback records, for each guess position, whether the letter is a hit
//! (right letter, right spot), present (right letter, wrong spot) or a miss.
//! It also exposes a base-3 key (0-242) so feedback values can index maps
//! cheaply: each position contributes digit × 3^position, with miss = 0,
//! present = 1 and hit = 2.

use super::{WORD_LENGTH, Word};
use serde::{Deserialize, Serialize};

/// Per-letter outcome of a scored guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterState {
    /// Letter matches the answer at this exact position
    Hit,
    /// Letter occurs elsewhere in the answer (respecting letter counts)
    Present,
    /// Letter has no remaining unconsumed occurrence in the answer
    Miss,
}

/// Feedback for a full 5-letter guess
///
/// Serializes as an ordered array of letter states, e.g.
/// `["hit","miss","present","miss","hit"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feedback([LetterState; WORD_LENGTH]);

impl Feedback {
    /// All hits (guess equals answer)
    pub const PERFECT: Self = Self([LetterState::Hit; WORD_LENGTH]);

    /// Score `guess` against `answer`
    ///
    /// Implements the standard feedback rules, including proper handling of
    /// duplicate letters: one physical answer letter is never credited twice.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches as hits and consume them from the
    ///    answer's letter pool
    /// 2. Second pass: mark present-but-wrong-position letters from the
    ///    remaining pool, everything else is a miss
    ///
    /// # Examples
    /// ```
    /// use worduel::core::{Feedback, LetterState, Word};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let answer = Word::new("slate").unwrap();
    /// let feedback = Feedback::score(&guess, &answer);
    ///
    /// // C(miss) R(miss) A(hit) N(miss) E(hit)
    /// assert_eq!(
    ///     feedback.states(),
    ///     &[
    ///         LetterState::Miss,
    ///         LetterState::Miss,
    ///         LetterState::Hit,
    ///         LetterState::Miss,
    ///         LetterState::Hit,
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn score(guess: &Word, answer: &Word) -> Self {
        let mut result = [LetterState::Miss; WORD_LENGTH];
        let mut answer_available = answer.char_counts();

        // First pass: mark hits (exact position matches)
        // Allow: Index needed to access guess[i], answer[i], and set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if guess.chars()[i] == answer.chars()[i] {
                result[i] = LetterState::Hit;

                // Remove from available pool
                let letter = guess.chars()[i];
                if let Some(count) = answer_available.get_mut(&letter) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: mark present letters (wrong position, letter remains)
        // Allow: Index needed to access guess[i] and check/set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if result[i] == LetterState::Miss {
                let letter = guess.chars()[i];
                if let Some(count) = answer_available.get_mut(&letter)
                    && *count > 0
                {
                    result[i] = LetterState::Present;
                    *count -= 1;
                }
            }
        }

        Self(result)
    }

    /// Get the ordered letter states
    #[inline]
    #[must_use]
    pub const fn states(&self) -> &[LetterState; WORD_LENGTH] {
        &self.0
    }

    /// Check if this is a perfect score (all hits)
    #[inline]
    #[must_use]
    pub fn is_perfect(self) -> bool {
        self == Self::PERFECT
    }

    /// Encode as a base-3 key (0-242)
    ///
    /// Two feedback values are equal iff their keys are equal, so the key is
    /// usable as a compact partition-map index.
    #[must_use]
    pub fn key(self) -> u8 {
        let mut key = 0u8;
        let mut multiplier = 1u8;
        for state in self.0 {
            let digit = match state {
                LetterState::Miss => 0,
                LetterState::Present => 1,
                LetterState::Hit => 2,
            };
            key += digit * multiplier;
            multiplier = multiplier.wrapping_mul(3);
        }
        key
    }

    /// Count the number of hits
    #[must_use]
    pub fn count_hits(self) -> usize {
        self.0.iter().filter(|&&s| s == LetterState::Hit).count()
    }

    /// Count the number of present marks
    #[must_use]
    pub fn count_present(self) -> usize {
        self.0
            .iter()
            .filter(|&&s| s == LetterState::Present)
            .count()
    }
}
