//! # hearthfire
//!
//! Rules engine and AI opponent for a two-player collectible card game.
//!
//! ## Design Principles
//!
//! 1. **Intents in, snapshots out**: `ActionEngine::apply` takes a state by
//!    reference and returns the next one. A rejected intent leaves the
//!    caller's state exactly as it was.
//!
//! 2. **Registries over branches**: card behaviour lives in an
//!    `EffectRegistry` keyed by card identity, one handler list per trigger
//!    phase. Adding a card never touches the resolver.
//!
//! 3. **Deterministic**: every random choice draws from the seeded
//!    `GameRng` inside the state.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: hands, decks and boards are `im`
//!   vectors, so the AI can clone the state for every simulation.
//!
//! - **Secrets as a port**: combat and card play consult a
//!   `SecretResolver` handed to the engine, not a global lookup.
//!
//! ## Modules
//!
//! - `core`: Players, state, intents, RNG, configuration
//! - `cards`: Card definitions, instances, the catalogue
//! - `effects`: Effect registry and handlers
//! - `secrets`: Secret triggers and the default secret book
//! - `combat`: Attack validation and resolution, death sweep
//! - `rules`: The action engine, legal intents, setup, views
//! - `ai`: Lethal search and time-boxed decision making
//! - `session`: Match wrapper, ports, snapshots

pub mod ai;
pub mod cards;
pub mod combat;
pub mod core;
pub mod effects;
pub mod error;
pub mod rules;
pub mod secrets;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    GameResult, GameRng, GameRngState, GameState, HeroAbility, HeroDescriptor, Intent, LogEntry,
    MatchConfig, Notification, PlayerId, TargetRef,
};

pub use crate::cards::{ids, CardCatalog, CardDefinition, CardId, CardInstance, Unit};

pub use crate::effects::EffectRegistry;

pub use crate::secrets::{SecretBook, SecretEvent, SecretOutcome, SecretResolver, SecretTrigger};

pub use crate::rules::{view_for, ActionEngine, PlayerView, Resolution, RulesEngine};

pub use crate::ai::{AiConfig, AiPlayer, Archetype, SearchStats};

pub use crate::session::{Match, MatchSummary, Snapshot};

pub use crate::error::{EngineError, IllegalAction, Result};
