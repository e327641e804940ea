//! Player intents: the four things a player can ask the engine to do.
//!
//! Intents carry positions (hand index, field index) rather than entity
//! handles, matching what a client sees on screen. The engine validates
//! every position against the current state before mutating anything.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Something a spell or effect can be pointed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetRef {
    /// A hero.
    Hero { owner: PlayerId },
    /// A unit on `owner`'s field at `index`.
    Unit { owner: PlayerId, index: usize },
}

impl TargetRef {
    /// Target `owner`'s hero.
    #[must_use]
    pub const fn hero(owner: PlayerId) -> Self {
        Self::Hero { owner }
    }

    /// Target the unit at `index` on `owner`'s field.
    #[must_use]
    pub const fn unit(owner: PlayerId, index: usize) -> Self {
        Self::Unit { owner, index }
    }

    /// The player whose hero or unit is targeted.
    #[must_use]
    pub const fn owner(self) -> PlayerId {
        match self {
            Self::Hero { owner } | Self::Unit { owner, .. } => owner,
        }
    }
}

/// A player intent.
///
/// ## Example
///
/// ```
/// use hearthfire::core::{Intent, PlayerId, TargetRef};
///
/// // Play the second card in hand at the left edge of the board
/// let play = Intent::play_at(1, 0);
///
/// // Cast the first card at the enemy hero
/// let bolt = Intent::play_targeted(0, TargetRef::hero(PlayerId::SECOND));
///
/// // Attack the enemy hero with the unit in slot 2
/// let swing = Intent::attack_hero(2);
/// assert!(matches!(swing, Intent::Attack { is_hero_target: true, .. }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    PlayCard {
        card_index: usize,
        #[serde(default)]
        target: Option<TargetRef>,
        #[serde(default)]
        destination_index: Option<usize>,
    },
    Attack {
        attacker_index: usize,
        #[serde(default)]
        target_index: Option<usize>,
        is_hero_target: bool,
    },
    UseHeroAbility,
    EndTurn,
}

impl Intent {
    /// Play a card with no target at the end of the board.
    #[must_use]
    pub const fn play(card_index: usize) -> Self {
        Self::PlayCard {
            card_index,
            target: None,
            destination_index: None,
        }
    }

    /// Play a unit card into a specific board slot.
    #[must_use]
    pub const fn play_at(card_index: usize, destination_index: usize) -> Self {
        Self::PlayCard {
            card_index,
            target: None,
            destination_index: Some(destination_index),
        }
    }

    /// Play a card pointed at a target.
    #[must_use]
    pub const fn play_targeted(card_index: usize, target: TargetRef) -> Self {
        Self::PlayCard {
            card_index,
            target: Some(target),
            destination_index: None,
        }
    }

    /// Attack the opposing hero.
    #[must_use]
    pub const fn attack_hero(attacker_index: usize) -> Self {
        Self::Attack {
            attacker_index,
            target_index: None,
            is_hero_target: true,
        }
    }

    /// Attack an opposing unit.
    #[must_use]
    pub const fn attack_unit(attacker_index: usize, target_index: usize) -> Self {
        Self::Attack {
            attacker_index,
            target_index: Some(target_index),
            is_hero_target: false,
        }
    }

    /// Short verb used in diagnostics.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::PlayCard { .. } => "play_card",
            Self::Attack { .. } => "attack",
            Self::UseHeroAbility => "use_hero_ability",
            Self::EndTurn => "end_turn",
        }
    }
}

/// An accepted intent with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// The player who acted.
    pub player: PlayerId,

    /// The intent that was accepted.
    pub intent: Intent,

    /// Turn number when the intent was accepted.
    pub turn: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            Intent::play(3),
            Intent::PlayCard { card_index: 3, target: None, destination_index: None }
        );
        assert_eq!(
            Intent::attack_unit(0, 2),
            Intent::Attack { attacker_index: 0, target_index: Some(2), is_hero_target: false }
        );
    }

    #[test]
    fn test_target_owner() {
        assert_eq!(TargetRef::hero(PlayerId::SECOND).owner(), PlayerId::SECOND);
        assert_eq!(TargetRef::unit(PlayerId::FIRST, 4).owner(), PlayerId::FIRST);
    }

    #[test]
    fn test_intent_json_shape() {
        let json = serde_json::to_string(&Intent::EndTurn).unwrap();
        assert_eq!(json, r#"{"type":"end_turn"}"#);

        let parsed: Intent =
            serde_json::from_str(r#"{"type":"attack","attacker_index":1,"is_hero_target":true}"#)
                .unwrap();
        assert_eq!(parsed, Intent::attack_hero(1));
    }
}
