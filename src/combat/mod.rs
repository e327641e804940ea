//! Combat resolution.
//!
//! One attack, in order:
//!
//! 1. Re-check the attacker (a secret may have killed or frozen it)
//! 2. Taunt: if the defender controls a Taunt unit, the target must be one
//! 3. On-attack handlers for the attacker, on-attacked for the defender
//! 4. Damage: hero hits may miss or carry a bonus; unit fights exchange
//!    damage simultaneously, with Divine Shield absorbing one instance
//! 5. On-damage-dealt handlers, fed the health actually removed
//! 6. Death sweep, then the win check
//!
//! Validation (steps 1 and 2 against the declared intent) is exposed
//! separately so the engine can reject an attack before any secret fires.

mod resolver;
mod sweep;

pub use resolver::{resolve_attack, validate_attack, AttackReport};
pub use sweep::sweep_deaths;
