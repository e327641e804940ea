//! Running matches against the outside world.
//!
//! The rules are pure state transitions. This module is the thin layer
//! that owns one match's authoritative state, feeds it intents one at a
//! time, and talks to persistence and transport through ports.
//!
//! ## Key Types
//!
//! - `Match`: single writer for one match
//! - `DeckSource`, `MatchRecorder`, `Transport`: collaborator ports
//! - `MatchSummary`: what gets recorded when a match ends
//! - `Snapshot`: bincode-serialisable match state
//!
//! ## Example
//!
//! ```
//! use hearthfire::cards::ids;
//! use hearthfire::core::{HeroAbility, HeroDescriptor, Intent, MatchConfig, PlayerId};
//! use hearthfire::rules::ActionEngine;
//! use hearthfire::session::{Match, MemoryDecks, MemoryRecorder, MemoryTransport};
//!
//! let hero = HeroDescriptor::new("Garrosh", HeroAbility::SteadyShot);
//! let decks = MemoryDecks::new()
//!     .with("alice", vec![ids::RIVER_RAPTOR; 20], hero.clone())
//!     .with("bob", vec![ids::OGRE_BRUTE; 20], hero);
//!
//! let mut game = Match::start(
//!     1,
//!     ActionEngine::standard(),
//!     ["alice", "bob"],
//!     &decks,
//!     MatchConfig::default(),
//!     MemoryTransport::default(),
//!     MemoryRecorder::default(),
//! )
//! .unwrap();
//!
//! game.deliver_intent(PlayerId::FIRST, &Intent::EndTurn).unwrap();
//! assert_eq!(game.state().current, PlayerId::SECOND);
//! ```

mod memory;
mod ports;
mod runner;
mod snapshot;

pub use memory::{MemoryDecks, MemoryRecorder, MemoryTransport};
pub use ports::{DeckSource, MatchId, MatchRecorder, MatchSummary, Transport};
pub use runner::Match;
pub use snapshot::Snapshot;
