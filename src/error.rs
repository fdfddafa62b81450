//! Game and room error types
//!
//! Every variant is a local, recoverable condition reported to the caller
//! that triggered it. Validation always precedes mutation, so a rejected
//! operation leaves engine and room state unchanged. Internal invariant
//! violations are asserts, not variants here.

use crate::core::WORD_LENGTH;
use std::fmt;

/// Errors reported by game engines and match rooms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The operation is not valid in the current game or room state
    InvalidState(&'static str),
    /// The guess does not have the required number of letters
    InvalidLength(usize),
    /// The guess is well-formed but not in the word set
    UnknownWord(String),
    /// A contributed opponent word is not in the word set
    InvalidWord(String),
    /// No room exists with the given id
    RoomNotFound(String),
    /// The room already has two players
    RoomFull,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState(reason) => write!(f, "{reason}"),
            Self::InvalidLength(len) => {
                write!(f, "Guess must be {WORD_LENGTH} letters long, got {len}")
            }
            Self::UnknownWord(word) => write!(f, "'{word}' is not a valid word"),
            Self::InvalidWord(word) => write!(f, "'{word}' is not in the word list"),
            Self::RoomNotFound(id) => write!(f, "Room '{id}' not found"),
            Self::RoomFull => write!(f, "Room is full"),
        }
    }
}

impl std::error::Error for GameError {}
