//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical copy of a card sitting in a deck or hand.
//! `Unit` is a card that has entered the board, with live stats and status
//! flags.

use serde::{Deserialize, Serialize};

use super::definition::{CardBody, CardDefinition, CardId, Keywords};

/// Unique per-match handle for one copy of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

/// A copy of a card in a deck or hand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: InstanceId,

    /// Reference to the card definition.
    pub card: CardId,

    /// Current mana cost (may differ from the printed cost).
    pub cost: u8,
}

impl CardInstance {
    #[must_use]
    pub fn new(id: InstanceId, definition: &CardDefinition) -> Self {
        Self {
            id,
            card: definition.id,
            cost: definition.cost,
        }
    }
}

/// A unit on the board.
///
/// Invariant: `health <= max_health` unless an effect says otherwise, and
/// a unit with `health <= 0` is removed by the death sweep before the next
/// intent resolves.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub id: InstanceId,
    pub card: CardId,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,

    /// False during the turn the unit was played (unless it has Charge).
    pub can_attack: bool,

    /// Attacks made this turn.
    pub attacks_made: u8,

    pub frozen: bool,

    /// Set at the start of the owner's turn if the unit was already frozen;
    /// such a unit thaws when that turn ends.
    pub frozen_last_turn: bool,

    pub taunt: bool,
    pub divine_shield: bool,

    /// Remaining modifiers (charge, windfury, curse, blind chance, ...).
    pub keywords: Keywords,
}

impl Unit {
    /// Bring a unit definition onto the board.
    ///
    /// Returns `None` if the definition is not a unit.
    #[must_use]
    pub fn from_definition(id: InstanceId, definition: &CardDefinition) -> Option<Self> {
        let CardBody::Unit {
            attack,
            health,
            keywords,
        } = definition.body
        else {
            return None;
        };

        Some(Self {
            id,
            card: definition.id,
            attack,
            health,
            max_health: health,
            can_attack: keywords.charge,
            attacks_made: 0,
            frozen: false,
            frozen_last_turn: false,
            taunt: keywords.taunt,
            divine_shield: keywords.divine_shield,
            keywords,
        })
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Attacks allowed per turn.
    #[must_use]
    pub fn max_attacks(&self) -> u8 {
        if self.keywords.windfury {
            2
        } else {
            1
        }
    }

    /// True once the unit has used all of its attacks this turn.
    #[must_use]
    pub fn has_attacked(&self) -> bool {
        self.attacks_made >= self.max_attacks()
    }

    /// Whether the unit may declare an attack right now.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.can_attack
            && !self.frozen
            && !self.has_attacked()
            && self.attack > 0
            && !self.is_dead()
    }

    /// Apply one damage instance. Returns the health actually lost.
    ///
    /// A Divine Shield absorbs the whole instance and is consumed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        if self.divine_shield {
            self.divine_shield = false;
            return 0;
        }
        self.health -= amount;
        amount
    }

    /// Restore health up to `max_health`. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 || self.health >= self.max_health {
            return 0;
        }
        let restored = amount.min(self.max_health - self.health);
        self.health += restored;
        restored
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
        self.frozen_last_turn = false;
    }

    /// Reset per-turn bookkeeping at the start of the owner's turn.
    pub fn ready_for_turn(&mut self) {
        self.can_attack = true;
        self.attacks_made = 0;
        self.frozen_last_turn = self.frozen;
    }

    /// Thaw units that stayed frozen through a whole owner turn.
    pub fn end_owner_turn(&mut self) {
        if self.frozen && self.frozen_last_turn {
            self.frozen = false;
            self.frozen_last_turn = false;
        }
    }
}
