//! Core domain types
//!
//! This module contains the fundamental domain types with zero external state.
//! All types here are pure, testable, and have clear mathematical properties.

mod feedback;
mod word;

pub use feedback::{Feedback, LetterState};
pub use word::{WORD_LENGTH, Word, WordError};
