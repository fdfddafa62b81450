//! Match snapshots and outcome determination
//!
//! A `MatchState` is the full, client-safe view of a room: every player's
//! game snapshot plus the overall match status. It is rebuilt after each
//! accepted mutation and fanned out to both occupants, so everyone sees the
//! same settled state.

use crate::engine::{GameSnapshot, GameStatus};
use crate::multiplayer::{GameType, Room};
use serde::{Deserialize, Serialize};

/// Overall status of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Creator attached, waiting for an opponent
    Waiting,
    /// Both players paired, at least one game still running
    Playing,
    /// Every player has won or lost
    Finished,
}

/// Derived, serializable view of a whole match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub room_id: String,
    pub status: MatchStatus,
    pub players: Vec<GameSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_type: Option<GameType>,
}

impl MatchState {
    /// Build the current snapshot of a room
    ///
    /// The match is finished once every player's status is terminal.
    #[must_use]
    pub fn snapshot(room: &Room) -> Self {
        let players: Vec<GameSnapshot> = room
            .sessions()
            .iter()
            .map(|session| session.engine().snapshot())
            .collect();

        let status = if players.len() < 2 {
            MatchStatus::Waiting
        } else if players.iter().all(|p| p.status.is_terminal()) {
            MatchStatus::Finished
        } else {
            MatchStatus::Playing
        };

        Self {
            room_id: room.id().to_string(),
            status,
            players,
            game_type: room.game_type(),
        }
    }
}

/// Describe the outcome of a finished match from one player's perspective
///
/// Returns `None` while the match is unfinished or the viewer is unknown.
/// Ties: both lost, or both won in the same number of guesses. Otherwise the
/// sole (or fewer-guess) winner wins; a losing viewer is shown the word they
/// failed to guess.
#[must_use]
pub fn match_outcome(state: &MatchState, viewer_id: &str) -> Option<String> {
    if state.status != MatchStatus::Finished {
        return None;
    }

    let me = state.players.iter().find(|p| p.id == viewer_id)?;
    let opponent = state.players.iter().find(|p| p.id != viewer_id)?;

    let i_won = me.status == GameStatus::Win;
    let opponent_won = opponent.status == GameStatus::Win;

    if (i_won && opponent_won && me.guesses.len() == opponent.guesses.len())
        || (!i_won && !opponent_won)
    {
        return Some("It's a Tie!".to_string());
    }

    if i_won && !opponent_won {
        return Some("You Win!".to_string());
    }

    if !i_won && opponent_won {
        let answer = me.answer.as_deref().unwrap_or("?").to_uppercase();
        return Some(format!("You Lose! The word was: {answer}"));
    }

    // Both won, in different round counts
    Some(if me.guesses.len() < opponent.guesses.len() {
        "You Win!".to_string()
    } else {
        "You Lose!".to_string()
    })
}
