//! In-memory ports, for local play and tests.

use rustc_hash::FxHashMap;

use crate::cards::CardId;
use crate::core::{HeroDescriptor, Notification, PlayerId};
use crate::error::{EngineError, Result};
use crate::rules::PlayerView;

use super::ports::{DeckSource, MatchId, MatchRecorder, MatchSummary, Transport};

/// Decks and heroes keyed by user.
#[derive(Clone, Debug, Default)]
pub struct MemoryDecks {
    decks: FxHashMap<String, (Vec<CardId>, HeroDescriptor)>,
}

impl MemoryDecks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, user: &str, deck: Vec<CardId>, hero: HeroDescriptor) -> Self {
        self.decks.insert(user.to_owned(), (deck, hero));
        self
    }

    fn entry(&self, user: &str) -> Result<&(Vec<CardId>, HeroDescriptor)> {
        self.decks
            .get(user)
            .ok_or_else(|| EngineError::Port(format!("no deck stored for {}", user)))
    }
}

impl DeckSource for MemoryDecks {
    fn load_deck(&self, user: &str) -> Result<Vec<CardId>> {
        Ok(self.entry(user)?.0.clone())
    }

    fn load_hero(&self, user: &str) -> Result<HeroDescriptor> {
        Ok(self.entry(user)?.1.clone())
    }
}

/// Keeps everything it is asked to send.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    pub views: Vec<(MatchId, PlayerView)>,
    pub notifications: Vec<(MatchId, Notification)>,
}

impl MemoryTransport {
    /// The most recent view sent to `viewer`.
    #[must_use]
    pub fn last_view(&self, viewer: PlayerId) -> Option<&PlayerView> {
        self.views.iter().rev().map(|(_, v)| v).find(|v| v.viewer == viewer)
    }
}

impl Transport for MemoryTransport {
    fn broadcast_state(&mut self, match_id: MatchId, view: &PlayerView) -> Result<()> {
        self.views.push((match_id, view.clone()));
        Ok(())
    }

    fn notify(&mut self, match_id: MatchId, notification: &Notification) -> Result<()> {
        self.notifications.push((match_id, notification.clone()));
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryRecorder {
    pub summaries: Vec<MatchSummary>,
}

impl MatchRecorder for MemoryRecorder {
    fn record_match_result(&mut self, summary: &MatchSummary) -> Result<()> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}
