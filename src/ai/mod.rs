//! AI opponent.
//!
//! A synchronous, time-boxed decision engine that plays through the same
//! `RulesEngine` as everyone else, on forked copies of the state.
//!
//! ## Key Types
//!
//! - `AiPlayer`: picks one intent per call
//! - `AiConfig`: time budget, lethal depth, seed, archetype override
//! - `Archetype`: aggro / midrange / control, biases the evaluation
//! - `SearchStats`: what the last decision cost
//!
//! ## Usage
//!
//! ```rust
//! use hearthfire::ai::{AiConfig, AiPlayer};
//! use hearthfire::core::{GameState, Intent, PlayerId};
//! use hearthfire::rules::{ActionEngine, RulesEngine};
//!
//! fn play_out_turn(
//!     ai: &mut AiPlayer<ActionEngine>,
//!     engine: &ActionEngine,
//!     mut state: GameState,
//! ) -> GameState {
//!     let me = state.current;
//!     while !state.is_over() && state.current == me {
//!         let intent = ai.choose_intent(&state, me);
//!         match engine.apply(&state, me, &intent) {
//!             Ok(res) => state = res.state,
//!             Err(_) => state = engine.apply(&state, me, &Intent::EndTurn).unwrap().state,
//!         }
//!     }
//!     state
//! }
//! ```

pub mod config;
pub mod evaluate;
pub mod lethal;
pub mod search;
pub mod stats;

pub use config::AiConfig;
pub use evaluate::{evaluate, unit_value, Archetype, Weights};
pub use lethal::{damage_ceiling, find_lethal};
pub use search::{fallback, AiPlayer};
pub use stats::SearchStats;
