//! Wire protocol messages
//!
//! JSON message types exchanged with clients. Every message is tagged with a
//! `type` field; payload field names are camelCase to match the original web
//! client. The transport layer marshals these; game semantics live elsewhere.

use crate::engine::{GameMode, GameSnapshot, GuessRecord};
use crate::error::GameError;
use crate::multiplayer::MatchState;
use serde::{Deserialize, Serialize};

/// Messages a client may send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Start a single-player game
    CreateGame { mode: GameMode },
    /// Guess in a single-player game (with `gameId`) or the joined room
    Guess { payload: GuessPayload },
    /// Create a match room, optionally contributing the joiner's target word
    CreateRoom {
        #[serde(default)]
        word: Option<String>,
    },
    /// Join an existing room, optionally contributing the creator's target
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_id: String,
        #[serde(default)]
        word: Option<String>,
    },
}

/// Guess payload; `game_id` selects single-player mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    pub guess: String,
}

/// Scored guess plus the resulting game view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessReply {
    pub record: GuessRecord,
    pub state: GameSnapshot,
}

/// Messages the server sends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// First message on every connection: the client's assigned id
    #[serde(rename_all = "camelCase")]
    Connected { player_id: String },
    /// Sent to a room creator until the opponent arrives
    Waiting { message: String },
    /// Acknowledges a single-player game
    #[serde(rename_all = "camelCase")]
    GameCreated {
        game_id: String,
        word_length: usize,
        max_guesses: usize,
    },
    /// Reply to a single-player guess
    GameState { payload: GuessReply },
    /// Acknowledges room creation
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_id: String },
    /// First full broadcast once both players are paired
    GameStart { payload: MatchState },
    /// Broadcast after every accepted room guess
    GameUpdate { payload: MatchState },
    /// Recoverable error, delivered only to the offending sender
    Error { message: String },
}

impl ServerMessage {
    /// Wrap a game error for delivery to the caller that caused it
    #[must_use]
    pub fn from_error(error: &GameError) -> Self {
        Self::Error {
            message: error.to_string(),
        }
    }
}
