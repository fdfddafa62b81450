//! Match rooms and pairing
//!
//! A room pairs exactly two players. The creator attaches first with a
//! deferred-answer engine; word assignment is resolved once, atomically, when
//! the second player attaches. Resolving only at that point keeps early
//! guesses from leaking opponent information and allows zero-configuration
//! race play.

use crate::core::Word;
use crate::engine::{GameEngine, GuessRecord};
use crate::error::GameError;
use crate::multiplayer::PlayerSession;
use crate::protocol::ServerMessage;
use crate::words::WordSet;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// How the two targets were assigned, fixed permanently at pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
    /// Both players share one random target; fastest correct guess wins
    Race,
    /// Each player's target came from (or was drawn on behalf of) the opponent
    HeadToHead,
}

/// Occupancy state; word assignment stays pending until `Active`
#[derive(Debug)]
enum RoomPhase {
    /// Created, nobody attached yet
    Empty,
    /// Creator attached, engine deferred, waiting for an opponent
    Waiting(PlayerSession),
    /// Both players paired; game type and answers are final
    Active {
        players: [PlayerSession; 2],
        game_type: GameType,
    },
}

/// A two-player match room
#[derive(Debug)]
pub struct Room {
    id: String,
    /// Word contributed at creation, destined for whoever joins second
    word_for_joiner: Option<Word>,
    phase: RoomPhase,
}

impl Room {
    /// Create an empty room, optionally holding the creator's contribution
    /// for the future joiner
    #[must_use]
    pub fn new(id: impl Into<String>, word_for_joiner: Option<Word>) -> Self {
        Self {
            id: id.into(),
            word_for_joiner,
            phase: RoomPhase::Empty,
        }
    }

    /// Room id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The game type, available once pairing has completed
    #[must_use]
    pub fn game_type(&self) -> Option<GameType> {
        match &self.phase {
            RoomPhase::Active { game_type, .. } => Some(*game_type),
            _ => None,
        }
    }

    /// Sessions currently attached, slot 0 first
    #[must_use]
    pub fn sessions(&self) -> &[PlayerSession] {
        match &self.phase {
            RoomPhase::Empty => &[],
            RoomPhase::Waiting(session) => std::slice::from_ref(session),
            RoomPhase::Active { players, .. } => players,
        }
    }

    /// Attach the room creator
    ///
    /// Their engine stays deferred until the opponent arrives.
    ///
    /// # Errors
    /// Returns `InvalidState` unless the room is empty.
    pub fn attach_first(
        &mut self,
        player_id: impl Into<String>,
        outbound: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<(), GameError> {
        match self.phase {
            RoomPhase::Empty => {
                let player_id = player_id.into();
                let engine = GameEngine::deferred(player_id.clone());
                self.phase = RoomPhase::Waiting(PlayerSession::new(player_id, outbound, engine));
                Ok(())
            }
            _ => Err(GameError::InvalidState(
                "Room already has its first player",
            )),
        }
    }

    /// Attach the second player and finalize word assignment
    ///
    /// `word` is the joiner's contribution: the target the *creator* will
    /// guess. Resolution is permanent:
    /// - both sides contributed: head-to-head, each guesses the other's word
    /// - neither contributed: race, one random word shared by both
    /// - exactly one contributed: head-to-head, the missing side's target is
    ///   drawn randomly
    ///
    /// # Errors
    /// Returns `RoomFull` when the room is already paired, `InvalidState`
    /// when nobody has attached yet or the joiner is the creator itself.
    pub fn attach_second(
        &mut self,
        player_id: impl Into<String>,
        outbound: mpsc::UnboundedSender<ServerMessage>,
        word: Option<Word>,
        words: &WordSet,
    ) -> Result<(), GameError> {
        let player_id = player_id.into();
        match std::mem::replace(&mut self.phase, RoomPhase::Empty) {
            RoomPhase::Waiting(mut creator) => {
                // Guess routing is by player id, so the two slots must hold
                // distinct ids
                if creator.player_id() == player_id {
                    self.phase = RoomPhase::Waiting(creator);
                    return Err(GameError::InvalidState(
                        "Cannot join a room you created",
                    ));
                }

                let (game_type, creator_target, joiner_target) =
                    match (word, self.word_for_joiner.take()) {
                        (Some(for_creator), Some(for_joiner)) => {
                            (GameType::HeadToHead, for_creator, for_joiner)
                        }
                        (None, None) => {
                            let shared = words.random().clone();
                            (GameType::Race, shared.clone(), shared)
                        }
                        (for_creator, for_joiner) => (
                            GameType::HeadToHead,
                            for_creator.unwrap_or_else(|| words.random().clone()),
                            for_joiner.unwrap_or_else(|| words.random().clone()),
                        ),
                    };

                creator
                    .engine_mut()
                    .assign_answer(creator_target)
                    .expect("slot 0 engine stays deferred until pairing");

                let engine = GameEngine::fixed(player_id.clone(), joiner_target);
                let joiner = PlayerSession::new(player_id, outbound, engine);

                self.phase = RoomPhase::Active {
                    players: [creator, joiner],
                    game_type,
                };
                Ok(())
            }
            phase @ RoomPhase::Empty => {
                self.phase = phase;
                Err(GameError::InvalidState("Room has no first player yet"))
            }
            phase @ RoomPhase::Active { .. } => {
                self.phase = phase;
                Err(GameError::RoomFull)
            }
        }
    }

    /// Submit a guess on behalf of one attached player
    ///
    /// # Errors
    /// Returns `InvalidState` if the match has not started or the player is
    /// not attached here, plus any engine validation error.
    pub fn submit_guess(
        &mut self,
        player_id: &str,
        raw: &str,
        words: &WordSet,
    ) -> Result<GuessRecord, GameError> {
        match &mut self.phase {
            RoomPhase::Active { players, .. } => {
                let session = players
                    .iter_mut()
                    .find(|s| s.player_id() == player_id)
                    .ok_or(GameError::InvalidState("Player is not in this room"))?;
                session.engine_mut().submit_guess(raw, words)
            }
            _ => Err(GameError::InvalidState("The match has not started yet")),
        }
    }

    /// Enqueue a message on every attached player's connection
    ///
    /// Called while the room lock is held, so every recipient observes the
    /// same settled state.
    pub fn broadcast(&self, message: &ServerMessage) {
        for session in self.sessions() {
            session.send(message.clone());
        }
    }
}
