//! Core match types: players, state, intents, RNG, configuration.
//!
//! This module contains the data every other module operates on. It knows
//! nothing about individual cards' effects; those live in `effects`.

pub mod config;
pub mod intent;
pub mod journal;
pub mod player;
pub mod rng;
pub mod state;

pub use config::MatchConfig;
pub use intent::{Intent, IntentRecord, TargetRef};
pub use journal::{LogEntry, Notification};
pub use player::{PlayerId, SEATS};
pub use rng::{GameRng, GameRngState};
pub use state::{
    ArmedSecret, DrawOutcome, GameResult, GameState, Hero, HeroAbility, HeroDescriptor, Phase,
    Player,
};
