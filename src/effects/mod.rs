//! Effect resolution registry.
//!
//! Card behaviour is data: each card identity maps to a list of handler
//! functions per trigger phase (on play, on attack, on being attacked, on
//! damage dealt, on death, on turn start, on spell cast). Resolution code
//! looks handlers up once and runs them in registration order.
//!
//! - `EffectRegistry`: the identity → handlers table
//! - `EffectContext`: what a handler receives (state, catalogue, actor)
//! - `PlayInfo` / `AttackInfo` / `DeathInfo`: per-phase event payloads
//!
//! The built-in handler sets live in `units`, `spells` and `abilities`.

pub mod abilities;
pub mod context;
pub mod registry;
pub mod spells;
pub mod units;

pub use abilities::precheck as ability_precheck;
pub use context::EffectContext;
pub use registry::{
    AbilityHandler, AttackHandler, AttackInfo, CardHandlers, DamageDealtHandler, DeathHandler,
    DeathInfo, EffectRegistry, PlayHandler, PlayInfo, UnitHandler,
};
