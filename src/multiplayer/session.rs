//! Player session
//!
//! Couples a paired player's identity, their exclusively-owned game engine,
//! and the outbound queue of their connection. State mutation never writes to
//! the socket directly; it enqueues messages that the connection's writer
//! task delivers.

use crate::engine::GameEngine;
use crate::protocol::ServerMessage;
use tokio::sync::mpsc;

/// One player's seat in a match room
#[derive(Debug)]
pub struct PlayerSession {
    player_id: String,
    outbound: mpsc::UnboundedSender<ServerMessage>,
    engine: GameEngine,
}

impl PlayerSession {
    /// Create a session wrapping an engine and a connection's outbound queue
    #[must_use]
    pub fn new(
        player_id: impl Into<String>,
        outbound: mpsc::UnboundedSender<ServerMessage>,
        engine: GameEngine,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            outbound,
            engine,
        }
    }

    /// The player's unique id
    #[inline]
    #[must_use]
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// The player's game
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Mutable access to the player's game
    #[inline]
    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    /// Enqueue a message for this player's connection
    ///
    /// A disconnected receiver drops the message; the opponent's match is
    /// never cancelled by a peer going away.
    pub fn send(&self, message: ServerMessage) {
        let _ = self.outbound.send(message);
    }
}
