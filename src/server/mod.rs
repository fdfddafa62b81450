//! WebSocket transport
//!
//! A thin layer over the game core: it accepts connections, decodes JSON
//! requests, invokes engine/room operations through the registries, and
//! delivers replies through per-connection outbound queues. No game rules
//! live here.

mod connection;

use crate::core::Word;
use crate::engine::{GameEngine, GameMode};
use crate::error::GameError;
use crate::multiplayer::Room;
use crate::protocol::GuessReply;
use crate::registry::{Handle, Registry};
use crate::words::WordSet;
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use uuid::Uuid;

/// Shared server state: the word set and the live object registries
#[derive(Debug)]
pub struct AppState {
    words: WordSet,
    games: Registry<GameEngine>,
    rooms: Registry<Room>,
}

impl AppState {
    /// Create fresh state around a word set
    #[must_use]
    pub fn new(words: WordSet) -> Self {
        Self {
            words,
            games: Registry::new(),
            rooms: Registry::new(),
        }
    }

    /// The valid-word set
    #[inline]
    #[must_use]
    pub fn words(&self) -> &WordSet {
        &self.words
    }

    /// Start a single-player game, returning its id
    pub async fn create_game(&self, mode: GameMode) -> String {
        let game_id = Uuid::new_v4().to_string();
        let engine = GameEngine::with_mode(game_id.clone(), mode, &self.words);
        self.games.insert(game_id.clone(), engine).await;
        info!(game = %game_id, ?mode, "game created");
        game_id
    }

    /// Submit a guess to a single-player game
    ///
    /// # Errors
    /// `InvalidState` for unknown game ids, plus any engine validation error.
    pub async fn submit_solo_guess(
        &self,
        game_id: &str,
        raw: &str,
    ) -> Result<GuessReply, GameError> {
        let handle = self
            .games
            .get(game_id)
            .await
            .ok_or(GameError::InvalidState("No game found with that id"))?;

        let mut engine = handle.lock().await;
        let record = engine.submit_guess(raw, &self.words)?;
        Ok(GuessReply {
            record,
            state: engine.snapshot(),
        })
    }

    /// Create a match room, optionally holding a word for the future joiner
    ///
    /// # Errors
    /// `InvalidWord` if the contribution is not a word-set member.
    pub async fn create_room(
        &self,
        word: Option<&str>,
    ) -> Result<(String, Handle<Room>), GameError> {
        let contribution = self.validate_contribution(word)?;
        let room_id = Uuid::new_v4().to_string();
        let room = Room::new(room_id.clone(), contribution);
        let handle = self.rooms.insert(room_id.clone(), room).await;
        info!(room = %room_id, contributed = word.is_some(), "room created");
        Ok((room_id, handle))
    }

    /// Look up a room by id
    ///
    /// # Errors
    /// `RoomNotFound` if no such room exists.
    pub async fn find_room(&self, room_id: &str) -> Result<Handle<Room>, GameError> {
        self.rooms
            .get(room_id)
            .await
            .ok_or_else(|| GameError::RoomNotFound(room_id.to_string()))
    }

    /// Validate an optional contributed opponent word (case-insensitive)
    ///
    /// # Errors
    /// `InvalidWord` when the contribution is malformed or not in the set.
    pub fn validate_contribution(&self, word: Option<&str>) -> Result<Option<Word>, GameError> {
        match word {
            None => Ok(None),
            Some(raw) => {
                let word =
                    Word::new(raw).map_err(|_| GameError::InvalidWord(raw.to_lowercase()))?;
                if self.words.contains(&word) {
                    Ok(Some(word))
                } else {
                    Err(GameError::InvalidWord(word.text().to_string()))
                }
            }
        }
    }
}

/// The WebSocket game server
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Bind to an address
    ///
    /// # Errors
    /// Returns the underlying I/O error if binding fails.
    pub async fn bind(addr: &str, words: WordSet) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            state: Arc::new(AppState::new(words)),
        })
    }

    /// Accept and serve connections until the process exits
    ///
    /// # Errors
    /// Returns only fatal accept-loop I/O errors; per-connection failures
    /// are logged and absorbed.
    pub async fn run(self) -> io::Result<()> {
        info!(addr = %self.listener.local_addr()?, "listening");

        loop {
            let (stream, peer) = self.listener.accept().await?;
            let state = Arc::clone(&self.state);
            tokio::spawn(async move {
                if let Err(error) = connection::handle_connection(stream, state).await {
                    warn!(%peer, %error, "connection ended with error");
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameStatus;

    fn test_state() -> AppState {
        let words = ["crane", "slate", "irate", "grate", "brave"]
            .iter()
            .map(|&s| Word::new(s).unwrap())
            .collect();
        AppState::new(WordSet::new(words))
    }

    #[tokio::test]
    async fn solo_game_flow() {
        let state = test_state();
        let game_id = state.create_game(GameMode::Fixed).await;

        let reply = state.submit_solo_guess(&game_id, "crane").await.unwrap();
        assert_eq!(reply.state.guesses, vec!["crane"]);
        assert_eq!(reply.record.guess.text(), "crane");
    }

    #[tokio::test]
    async fn solo_adversarial_game_tracks_candidates() {
        let state = test_state();
        let game_id = state.create_game(GameMode::Adversarial).await;

        let reply = state.submit_solo_guess(&game_id, "crane").await.unwrap();
        assert_eq!(reply.state.status, GameStatus::Playing);
        assert!(reply.state.answer.is_none());
    }

    #[tokio::test]
    async fn unknown_game_id_rejected() {
        let state = test_state();
        let err = state.submit_solo_guess("missing", "crane").await.unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
    }

    #[tokio::test]
    async fn create_room_validates_contribution() {
        let state = test_state();

        let err = state.create_room(Some("zzzzz")).await.unwrap_err();
        assert_eq!(err, GameError::InvalidWord("zzzzz".to_string()));

        let err = state.create_room(Some("not a word")).await.unwrap_err();
        assert!(matches!(err, GameError::InvalidWord(_)));

        // Case-insensitive acceptance
        let (room_id, _) = state.create_room(Some("CRANE")).await.unwrap();
        assert!(state.find_room(&room_id).await.is_ok());
    }

    #[tokio::test]
    async fn missing_room_reported() {
        let state = test_state();
        let err = state.find_room("nope").await.unwrap_err();
        assert_eq!(err, GameError::RoomNotFound("nope".to_string()));
    }
}
