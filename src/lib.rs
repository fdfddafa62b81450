//! Worduel
//!
//! Word-duel game server core: letter-feedback scoring, fixed and
//! adversarial game engines, and real-time two-player match rooms.
//!
//! # Quick Start
//!
//! ```rust
//! use worduel::core::{Feedback, Word};
//!
//! let guess = Word::new("crane").unwrap();
//! let answer = Word::new("slate").unwrap();
//!
//! let feedback = Feedback::score(&guess, &answer);
//! assert_eq!(feedback.count_hits(), 2); // A and E
//! ```

// Core domain types
pub mod core;

// Single-session game engines
pub mod engine;

// Error types
pub mod error;

// Match rooms, pairing and broadcast
pub mod multiplayer;

// Wire protocol messages
pub mod protocol;

// Concurrent id-keyed stores
pub mod registry;

// WebSocket transport
pub mod server;

// The valid-word set
pub mod words;

pub use error::GameError;
