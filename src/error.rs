//! Error types for the rules engine.
//!
//! `IllegalAction` covers everything a player can get wrong; it never
//! changes match state and maps to a player-scoped notification.
//! `EngineError` adds the failures that abandon a match.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{Notification, PlayerId};

/// A rejected intent. The match state is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("the game is already over")]
    GameAlreadyOver,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("no card at hand position {0}")]
    InvalidCardIndex(usize),

    #[error("not enough mana: need {required}, have {available}")]
    InsufficientMana { required: u8, available: u8 },

    #[error("your board is full")]
    FieldFull,

    #[error("that card needs a target")]
    TargetRequired,

    #[error("invalid target")]
    InvalidTarget,

    #[error("the unit at position {0} cannot attack")]
    IllegalAttacker(usize),

    #[error("no enemy unit at position {0}")]
    IllegalTarget(usize),

    #[error("you must attack a unit with Taunt")]
    MustAttackTaunt,

    #[error("a unit with Taunt is protecting the hero")]
    TauntBlocksHero,

    #[error("hero ability already used this turn")]
    AbilityAlreadyUsed,

    #[error("that secret is already armed")]
    SecretAlreadyArmed,
}

impl IllegalAction {
    /// The message shown to the player who sent the intent.
    #[must_use]
    pub fn notification(&self, player: PlayerId) -> Notification {
        Notification::new(player, self.to_string())
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Illegal(#[from] IllegalAction),

    /// Corrupted state. Fatal for the match.
    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// A collaborator (persistence, transport) failed.
    #[error("port error: {0}")]
    Port(String),
}

impl EngineError {
    /// Whether this error ends the match rather than just rejecting an intent.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Invariant(_) | EngineError::UnknownCard(_))
    }

    /// The illegal action behind this error, if that is what it is.
    #[must_use]
    pub fn as_illegal(&self) -> Option<&IllegalAction> {
        match self {
            EngineError::Illegal(illegal) => Some(illegal),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_messages() {
        let err = IllegalAction::InsufficientMana { required: 6, available: 3 };
        assert_eq!(err.to_string(), "not enough mana: need 6, have 3");

        let note = IllegalAction::TauntBlocksHero.notification(PlayerId::FIRST);
        assert_eq!(note.for_player, PlayerId::FIRST);
        assert!(note.message.contains("Taunt"));
    }

    #[test]
    fn test_engine_error_classification() {
        let illegal: EngineError = IllegalAction::NotYourTurn.into();
        assert!(!illegal.is_fatal());
        assert_eq!(illegal.as_illegal(), Some(&IllegalAction::NotYourTurn));

        let fatal = EngineError::Invariant("unit with no definition".into());
        assert!(fatal.is_fatal());
        assert!(fatal.as_illegal().is_none());
    }
}
