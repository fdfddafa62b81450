//! Two-player match coordination
//!
//! Rooms pair players, negotiate word assignment, and broadcast settled
//! match snapshots to both occupants.

mod broadcast;
mod room;
mod session;

pub use broadcast::{MatchState, MatchStatus, match_outcome};
pub use room::{GameType, Room};
pub use session::PlayerSession;
