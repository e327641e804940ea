//! Player-facing event log and notifications.
//!
//! These are display-ready records of what an intent did. They are not
//! diagnostics; those go through the `log` facade.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// One display-ready line describing something that happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// The player the event is attributed to.
    pub player: PlayerId,

    /// Human-readable description.
    pub text: String,
}

impl LogEntry {
    #[must_use]
    pub fn new(player: PlayerId, text: impl Into<String>) -> Self {
        Self {
            player,
            text: text.into(),
        }
    }
}

/// A message addressed to a single player (burned card, fizzled spell,
/// rejected intent).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub for_player: PlayerId,
}

impl Notification {
    #[must_use]
    pub fn new(for_player: PlayerId, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            for_player,
        }
    }
}
