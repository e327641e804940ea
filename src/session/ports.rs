//! What a match needs from the outside world.
//!
//! Persistence and transport live outside the rules. A `Match` talks to
//! them only through these traits, so tests and servers plug in their own.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{GameResult, HeroDescriptor, Notification};
use crate::error::Result;
use crate::rules::PlayerView;

/// Identifies one match to the transport and the recorder.
pub type MatchId = u64;

/// Loads a player's deck and hero before the match starts.
pub trait DeckSource {
    /// The deck, in stored order. The match shuffles it.
    fn load_deck(&self, user: &str) -> Result<Vec<CardId>>;

    fn load_hero(&self, user: &str) -> Result<HeroDescriptor>;
}

/// Stores finished matches.
pub trait MatchRecorder {
    fn record_match_result(&mut self, summary: &MatchSummary) -> Result<()>;
}

/// Pushes state out to the two seats.
pub trait Transport {
    /// Send one seat its redacted view.
    fn broadcast_state(&mut self, match_id: MatchId, view: &PlayerView) -> Result<()>;

    /// Send one seat a message meant only for it.
    fn notify(&mut self, match_id: MatchId, notification: &Notification) -> Result<()>;
}

/// How a match ended, for the recorder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    /// Seat order: first player, second player.
    pub users: [String; 2],
    pub heroes: [HeroDescriptor; 2],
    /// `None` when the match was abandoned.
    pub result: Option<GameResult>,
    pub turns: u32,
    /// Accepted intents over the whole match.
    pub intents: usize,
    pub decks: [Vec<CardId>; 2],
    pub abandoned: bool,
}

impl MatchSummary {
    /// The winning seat's user, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        match self.result {
            Some(GameResult::Winner(p)) => Some(self.users[p.index()].as_str()),
            _ => None,
        }
    }
}
