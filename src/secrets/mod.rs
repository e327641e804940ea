//! Secret trigger system.
//!
//! Secrets are armed face-down and react to the opponent's actions. Before
//! the engine commits a spell, a unit play or an attack it hands the event
//! to a `SecretResolver`, acting for the defending player. At most one
//! secret fires per event, and it may cancel or redirect the action.
//!
//! The resolver is an explicit interface on `ActionEngine`; `SecretBook` is
//! the default implementation for the built-in secrets.

mod book;

pub use book::{SecretBook, SecretCondition, SecretEffect, SecretRule};
pub use crate::cards::SecretTrigger;

use crate::cards::CardId;
use crate::effects::EffectContext;

/// An opposing action a secret may react to.
///
/// Slots on the acting side refer to the acting player's field; `defender`
/// refers to the secret owner's field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecretEvent {
    SpellPlayed { card: CardId },
    Attack { attacker: usize, defender: Option<usize> },
    UnitPlayed { slot: usize },
}

impl SecretEvent {
    /// The trigger type that listens for this event.
    #[must_use]
    pub const fn trigger(&self) -> SecretTrigger {
        match self {
            Self::SpellPlayed { .. } => SecretTrigger::SpellPlayed,
            Self::Attack { .. } => SecretTrigger::HeroAttack,
            Self::UnitPlayed { .. } => SecretTrigger::UnitPlayed,
        }
    }
}

/// What the engine does with the intercepted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecretOutcome {
    /// Carry on as declared.
    Continue,
    /// Stop; the action's primary effect does not happen.
    Cancel,
    /// Carry on against the defender's unit in this slot instead.
    Redirect(usize),
}

impl SecretOutcome {
    #[must_use]
    pub fn is_cancel(self) -> bool {
        matches!(self, Self::Cancel)
    }
}

/// Interception hook consulted by the engine.
///
/// `ctx.actor` is the secret owner (the player *not* taking the action).
pub trait SecretResolver: Send + Sync {
    fn intercept(&self, ctx: &mut EffectContext<'_>, event: &SecretEvent) -> SecretOutcome;
}

/// A resolver that never fires. Useful for tests and sandboxes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSecrets;

impl SecretResolver for NoSecrets {
    fn intercept(&self, _: &mut EffectContext<'_>, _: &SecretEvent) -> SecretOutcome {
        SecretOutcome::Continue
    }
}
