//! Rules: the action engine and what surrounds it.
//!
//! - `ActionEngine`: resolves intents into new states (`RulesEngine` impl)
//! - `legal`: legal intent enumeration and target checks
//! - `setup`: opening state of a match
//! - `view`: per-player redacted views

pub mod engine;
pub mod legal;
pub mod setup;
pub mod view;

pub use engine::{ActionEngine, Resolution, RulesEngine};
pub use legal::{legal_intents, valid_targets, validate_target};
pub use setup::new_match;
pub use view::{view_for, OpponentSide, OwnSide, PlayerView};
