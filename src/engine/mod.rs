//! Single-session game engine
//!
//! A `GameEngine` runs one player's game: it validates guesses, scores them,
//! and tracks win/loss state. The answer is either fixed up front, deferred
//! (multiplayer slot 0 before the opponent joins), or adversarial - in which
//! case the engine keeps a shrinking candidate set instead of a secret.
//!
//! The engine is the trust boundary holding the secret: snapshots withhold
//! the answer until the game reaches a terminal state.

pub mod adversarial;

use crate::core::{Feedback, Word, WordError};
use crate::error::GameError;
use crate::words::WordSet;
use serde::{Deserialize, Serialize};

/// Maximum number of guesses before the game is lost
pub const MAX_GUESSES: usize = 6;

/// Lifecycle state of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Win,
    Loss,
}

impl GameStatus {
    /// True once the game has been won or lost
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

/// Requested engine behavior for a new game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Fixed,
    Adversarial,
}

/// One validated, scored guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: Word,
    pub score: Feedback,
}

/// Serializable view of a game, safe to hand to clients
///
/// The answer is present only when the game is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: String,
    pub guesses: Vec<String>,
    pub results: Vec<Feedback>,
    pub status: GameStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// The engine's answer source
#[derive(Debug, Clone)]
enum Answer {
    /// Committed secret word
    Fixed(Word),
    /// No answer yet - assigned when the opposing player joins
    Deferred,
    /// No secret at all - the surviving candidate set is the state
    Adversarial { candidates: Vec<Word> },
}

/// A single player's game session
#[derive(Debug, Clone)]
pub struct GameEngine {
    id: String,
    answer: Answer,
    history: Vec<GuessRecord>,
    status: GameStatus,
}

impl GameEngine {
    /// Create a fixed-answer game with a known secret
    #[must_use]
    pub fn fixed(id: impl Into<String>, answer: Word) -> Self {
        Self {
            id: id.into(),
            answer: Answer::Fixed(answer),
            history: Vec::new(),
            status: GameStatus::Playing,
        }
    }

    /// Create a fixed-answer game with a random secret drawn from the set
    #[must_use]
    pub fn random(id: impl Into<String>, words: &WordSet) -> Self {
        Self::fixed(id, words.random().clone())
    }

    /// Create a deferred-answer game (multiplayer slot 0 before pairing)
    #[must_use]
    pub fn deferred(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            answer: Answer::Deferred,
            history: Vec::new(),
            status: GameStatus::Playing,
        }
    }

    /// Create an adversarial game seeded with every word in the set
    #[must_use]
    pub fn adversarial(id: impl Into<String>, words: &WordSet) -> Self {
        Self {
            id: id.into(),
            answer: Answer::Adversarial {
                candidates: words.words().to_vec(),
            },
            history: Vec::new(),
            status: GameStatus::Playing,
        }
    }

    /// Create an engine for the requested mode
    #[must_use]
    pub fn with_mode(id: impl Into<String>, mode: GameMode, words: &WordSet) -> Self {
        match mode {
            GameMode::Fixed => Self::random(id, words),
            GameMode::Adversarial => Self::adversarial(id, words),
        }
    }

    /// Commit a deferred engine to a fixed answer
    ///
    /// # Errors
    /// Returns `InvalidState` unless the engine is still waiting for its
    /// answer. A fixed answer is immutable once assigned.
    pub fn assign_answer(&mut self, answer: Word) -> Result<(), GameError> {
        match self.answer {
            Answer::Deferred => {
                self.answer = Answer::Fixed(answer);
                Ok(())
            }
            _ => Err(GameError::InvalidState(
                "This game already has an answer assigned",
            )),
        }
    }

    /// Engine id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current status
    #[inline]
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Scored guesses so far, oldest first
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// Surviving adversarial candidates, if this engine is adversarial
    #[must_use]
    pub fn candidate_count(&self) -> Option<usize> {
        match &self.answer {
            Answer::Adversarial { candidates } => Some(candidates.len()),
            _ => None,
        }
    }

    /// The answer to disclose, available only once the game is over
    ///
    /// For adversarial games there is no fixed secret; the first surviving
    /// candidate in canonical order is disclosed instead.
    #[must_use]
    pub fn revealed_answer(&self) -> Option<&str> {
        if !self.status.is_terminal() {
            return None;
        }
        match &self.answer {
            Answer::Fixed(answer) => Some(answer.text()),
            Answer::Adversarial { candidates } => candidates.first().map(Word::text),
            Answer::Deferred => None,
        }
    }

    /// Submit a guess
    ///
    /// Validation happens before any mutation, so a rejected guess leaves the
    /// engine untouched.
    ///
    /// # Errors
    /// - `InvalidState` if the game is over or still waiting for its answer
    /// - `InvalidLength` if the guess is not exactly 5 letters
    /// - `UnknownWord` if the guess is not in the word set
    pub fn submit_guess(&mut self, raw: &str, words: &WordSet) -> Result<GuessRecord, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::InvalidState("The game is already over"));
        }

        let guess = Word::new(raw).map_err(|e| match e {
            WordError::InvalidLength(len) => GameError::InvalidLength(len),
            WordError::NonAscii | WordError::InvalidCharacters => {
                GameError::UnknownWord(raw.to_lowercase())
            }
        })?;

        if !words.contains(&guess) {
            return Err(GameError::UnknownWord(guess.text().to_string()));
        }

        let (score, won) = match &mut self.answer {
            Answer::Deferred => {
                return Err(GameError::InvalidState(
                    "Waiting for an opponent before guesses can be scored",
                ));
            }
            Answer::Fixed(answer) => (Feedback::score(&guess, answer), guess == *answer),
            Answer::Adversarial { candidates } => {
                let groups = adversarial::partition(&guess, candidates);
                let (score, survivors) = adversarial::largest_group(groups);

                // The partition of a non-empty set is non-empty; anything
                // else is a bug, not a user error
                assert!(
                    !survivors.is_empty(),
                    "adversarial candidate set became empty"
                );

                let won = survivors.len() == 1 && survivors[0] == guess;
                *candidates = survivors;
                (score, won)
            }
        };

        let record = GuessRecord {
            guess,
            score,
        };
        self.history.push(record.clone());

        if won {
            self.status = GameStatus::Win;
        } else if self.history.len() >= MAX_GUESSES {
            self.status = GameStatus::Loss;
        }

        Ok(record)
    }

    /// Build a client-safe snapshot of this game
    ///
    /// Calling this twice without an intervening guess yields identical
    /// snapshots.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id.clone(),
            guesses: self
                .history
                .iter()
                .map(|r| r.guess.text().to_string())
                .collect(),
            results: self.history.iter().map(|r| r.score).collect(),
            status: self.status,
            answer: self.revealed_answer().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LetterState;

    fn test_words() -> WordSet {
        let words = [
            "crane", "slate", "irate", "crate", "grate", "trace", "brave", "zebra",
        ]
        .iter()
        .map(|&s| Word::new(s).unwrap())
        .collect();
        WordSet::new(words)
    }

    fn fixed_game(answer: &str) -> GameEngine {
        GameEngine::fixed("game-1", Word::new(answer).unwrap())
    }

    #[test]
    fn fixed_correct_guess_wins() {
        let words = test_words();
        let mut game = fixed_game("slate");

        let record = game.submit_guess("slate", &words).unwrap();
        assert!(record.score.is_perfect());
        assert_eq!(game.status(), GameStatus::Win);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn fixed_guess_is_case_insensitive() {
        let words = test_words();
        let mut game = fixed_game("slate");

        let record = game.submit_guess("SLATE", &words).unwrap();
        assert_eq!(record.guess.text(), "slate");
        assert_eq!(game.status(), GameStatus::Win);
    }

    #[test]
    fn fixed_win_halts_history_growth() {
        let words = test_words();
        let mut game = fixed_game("slate");

        game.submit_guess("slate", &words).unwrap();
        let err = game.submit_guess("crane", &words).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn fixed_six_wrong_guesses_lose_and_reveal() {
        let words = test_words();
        let mut game = fixed_game("slate");

        for _ in 0..MAX_GUESSES {
            game.submit_guess("crane", &words).unwrap();
        }

        assert_eq!(game.status(), GameStatus::Loss);
        assert_eq!(game.revealed_answer(), Some("slate"));
        assert_eq!(game.snapshot().answer.as_deref(), Some("slate"));
    }

    #[test]
    fn fixed_answer_withheld_while_playing() {
        let words = test_words();
        let mut game = fixed_game("slate");

        game.submit_guess("crane", &words).unwrap();
        assert_eq!(game.revealed_answer(), None);
        assert_eq!(game.snapshot().answer, None);
    }

    #[test]
    fn invalid_length_rejected_before_mutation() {
        let words = test_words();
        let mut game = fixed_game("slate");

        assert_eq!(
            game.submit_guess("abc", &words),
            Err(GameError::InvalidLength(3))
        );
        assert_eq!(
            game.submit_guess("toolong", &words),
            Err(GameError::InvalidLength(7))
        );
        assert!(game.history().is_empty());
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn unknown_word_rejected_before_mutation() {
        let words = test_words();
        let mut game = fixed_game("slate");

        assert_eq!(
            game.submit_guess("vouch", &words),
            Err(GameError::UnknownWord("vouch".to_string()))
        );
        assert!(game.history().is_empty());
    }

    #[test]
    fn malformed_word_reported_as_unknown() {
        let words = test_words();
        let mut game = fixed_game("slate");

        assert_eq!(
            game.submit_guess("cra3e", &words),
            Err(GameError::UnknownWord("cra3e".to_string()))
        );

        // Five letters but six bytes: still an unknown word, not a length error
        assert_eq!(
            game.submit_guess("crâne", &words),
            Err(GameError::UnknownWord("crâne".to_string()))
        );
    }

    #[test]
    fn deferred_engine_rejects_guesses_until_assigned() {
        let words = test_words();
        let mut game = GameEngine::deferred("p0");

        let err = game.submit_guess("crane", &words).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));

        game.assign_answer(Word::new("slate").unwrap()).unwrap();
        game.submit_guess("slate", &words).unwrap();
        assert_eq!(game.status(), GameStatus::Win);
    }

    #[test]
    fn assigned_answer_is_immutable() {
        let mut game = GameEngine::deferred("p0");
        game.assign_answer(Word::new("slate").unwrap()).unwrap();

        let err = game.assign_answer(Word::new("crane").unwrap()).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
        assert_eq!(game.snapshot().id, "p0");
    }

    #[test]
    fn adversarial_candidates_never_increase() {
        let words = test_words();
        let mut game = GameEngine::adversarial("adv", &words);
        assert_eq!(game.candidate_count(), Some(words.len()));

        let mut previous = words.len();
        for guess in ["crane", "slate", "trace"] {
            if game.status().is_terminal() {
                break;
            }
            game.submit_guess(guess, &words).unwrap();
            let current = game.candidate_count().unwrap();
            assert!(current <= previous);
            assert!(current >= 1);
            previous = current;
        }
    }

    #[test]
    fn adversarial_keeps_largest_group() {
        // Against CRANE the candidates split: {irate, grate} share a score,
        // everything else is alone - so two candidates must survive.
        let words = WordSet::new(
            ["crane", "slate", "irate", "grate"]
                .iter()
                .map(|&s| Word::new(s).unwrap())
                .collect(),
        );
        let mut game = GameEngine::adversarial("adv", &words);

        let record = game.submit_guess("crane", &words).unwrap();
        assert_eq!(game.candidate_count(), Some(2));
        assert_eq!(
            record.score.states(),
            &[
                LetterState::Miss,
                LetterState::Hit,
                LetterState::Hit,
                LetterState::Miss,
                LetterState::Hit,
            ]
        );
    }

    #[test]
    fn adversarial_win_requires_singleton_equal_to_guess() {
        let words = WordSet::new(
            ["crane", "slate", "irate", "grate"]
                .iter()
                .map(|&s| Word::new(s).unwrap())
                .collect(),
        );
        let mut game = GameEngine::adversarial("adv", &words);

        // Narrows to {irate, grate}
        game.submit_guess("crane", &words).unwrap();
        assert_eq!(game.status(), GameStatus::Playing);

        // Singleton groups tie; the first-scanned candidate (irate) survives
        // as a perfect match, which is the guess itself
        let record = game.submit_guess("irate", &words).unwrap();
        assert!(record.score.is_perfect());
        assert_eq!(game.candidate_count(), Some(1));
        assert_eq!(game.status(), GameStatus::Win);
    }

    #[test]
    fn adversarial_loss_reveals_a_surviving_candidate() {
        let words = test_words();
        let mut game = GameEngine::adversarial("adv", &words);

        for _ in 0..MAX_GUESSES {
            if game.status().is_terminal() {
                break;
            }
            game.submit_guess("zebra", &words).unwrap();
        }

        assert_eq!(game.status(), GameStatus::Loss);
        let revealed = game.revealed_answer().unwrap();
        let revealed = Word::new(revealed).unwrap();
        assert!(words.contains(&revealed));
    }

    #[test]
    fn snapshot_is_idempotent() {
        let words = test_words();
        let mut game = fixed_game("slate");
        game.submit_guess("crane", &words).unwrap();

        assert_eq!(game.snapshot(), game.snapshot());
    }

    #[test]
    fn snapshot_serializes_wire_shape() {
        let words = test_words();
        let mut game = fixed_game("slate");
        game.submit_guess("crane", &words).unwrap();

        let json = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(json["guesses"][0], "crane");
        assert_eq!(json["results"][0][2], "hit");
        assert_eq!(json["status"], "playing");
        assert!(json.get("answer").is_none());
    }
}
