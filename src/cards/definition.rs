//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: name, cost,
//! rarity, text, art, and the body that says whether it is a unit, a spell
//! or a secret. Runtime data (current cost, damage taken, status flags)
//! lives in `CardInstance` and `Unit`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Firebolt"),
/// not a specific copy in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Free,
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// The opposing action that arms a secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretTrigger {
    /// The opponent casts a spell.
    SpellPlayed,
    /// The opponent declares an attack.
    HeroAttack,
    /// The opponent plays a unit.
    UnitPlayed,
}

/// What a targeted spell may be pointed at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRule {
    /// No target; the spell picks its own.
    #[default]
    None,
    /// A unit controlled by the opponent.
    EnemyUnit,
    /// Any unit on either side.
    AnyUnit,
    /// Any unit or hero.
    AnyCharacter,
}

/// How a card's printed cost is adjusted at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostScaling {
    #[default]
    Fixed,
    /// One less for each unit that has died this match.
    MinusDeaths,
}

/// Static keywords and modifiers a unit enters play with.
///
/// Effects may later set the same fields on a live `Unit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keywords {
    pub taunt: bool,
    pub divine_shield: bool,
    /// May attack on the turn it is played.
    pub charge: bool,
    /// May attack twice per turn.
    pub windfury: bool,
    /// Takes a second hit of the opponent's attack after each exchange.
    pub cursed: bool,
    /// Deals double damage to units.
    pub double_damage: bool,
    /// Gains +1 attack whenever any unit dies.
    pub grows_on_death: bool,
    /// Gains +1 attack whenever its owner casts a spell.
    pub grows_on_spell: bool,
    /// Percent chance that an attack on a hero misses.
    pub blind_chance: u8,
    /// Added to damage dealt to heroes (may be negative).
    pub hero_damage_bonus: i32,
}

/// Damage a spell deals when it resolves.
///
/// Handlers read their amounts from here, and lethal search reads the same
/// numbers without running anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Burn {
    /// Always lands on the enemy hero.
    pub face: i32,
    /// Lands on the chosen target.
    pub targeted: i32,
}

impl Burn {
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.face == 0 && self.targeted == 0
    }
}

/// Kind-specific body of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardBody {
    Unit {
        attack: i32,
        health: i32,
        keywords: Keywords,
    },
    Spell {
        target: TargetRule,
    },
    Secret {
        trigger: SecretTrigger,
    },
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use hearthfire::cards::{CardDefinition, CardId};
///
/// let squire = CardDefinition::unit(CardId::new(4), "Argent Squire", 1, 1, 1)
///     .divine_shield()
///     .with_text("Divine Shield");
///
/// assert!(squire.is_unit());
/// assert!(squire.keywords().map_or(false, |k| k.divine_shield));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display and logs).
    pub name: String,

    /// Printed mana cost.
    pub cost: u8,

    pub rarity: Rarity,

    /// Rules / flavor text.
    pub text: String,

    /// Art asset reference.
    pub art: String,

    pub cost_scaling: CostScaling,

    pub burn: Burn,

    /// Tokens are created by effects and never appear in constructed decks.
    pub token: bool,

    pub body: CardBody,
}

impl CardDefinition {
    fn with_body(id: CardId, name: impl Into<String>, cost: u8, body: CardBody) -> Self {
        let name = name.into();
        let art = format!("art/{}.png", name.to_lowercase().replace(' ', "_"));
        Self {
            id,
            name,
            cost,
            rarity: Rarity::default(),
            text: String::new(),
            art,
            cost_scaling: CostScaling::default(),
            burn: Burn::default(),
            token: false,
            body,
        }
    }

    /// Create a unit definition.
    #[must_use]
    pub fn unit(id: CardId, name: impl Into<String>, cost: u8, attack: i32, health: i32) -> Self {
        Self::with_body(
            id,
            name,
            cost,
            CardBody::Unit {
                attack,
                health,
                keywords: Keywords::default(),
            },
        )
    }

    /// Create an untargeted spell definition.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: u8) -> Self {
        Self::with_body(id, name, cost, CardBody::Spell { target: TargetRule::None })
    }

    /// Create a secret definition.
    #[must_use]
    pub fn secret(id: CardId, name: impl Into<String>, cost: u8, trigger: SecretTrigger) -> Self {
        Self::with_body(id, name, cost, CardBody::Secret { trigger })
    }

    // === Builders ===

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn token(mut self) -> Self {
        self.token = true;
        self
    }

    #[must_use]
    pub fn scales_with_deaths(mut self) -> Self {
        self.cost_scaling = CostScaling::MinusDeaths;
        self
    }

    /// Set the target rule of a spell. No effect on other kinds.
    #[must_use]
    pub fn targets(mut self, rule: TargetRule) -> Self {
        if let CardBody::Spell { target } = &mut self.body {
            *target = rule;
        }
        self
    }

    /// Damage dealt to the enemy hero on resolution.
    #[must_use]
    pub fn burns_face(mut self, amount: i32) -> Self {
        self.burn.face = amount;
        self
    }

    /// Damage dealt to the spell's target on resolution.
    #[must_use]
    pub fn burns_target(mut self, amount: i32) -> Self {
        self.burn.targeted = amount;
        self
    }

    fn keyword(mut self, apply: impl FnOnce(&mut Keywords)) -> Self {
        if let CardBody::Unit { keywords, .. } = &mut self.body {
            apply(keywords);
        }
        self
    }

    #[must_use]
    pub fn taunt(self) -> Self {
        self.keyword(|k| k.taunt = true)
    }

    #[must_use]
    pub fn divine_shield(self) -> Self {
        self.keyword(|k| k.divine_shield = true)
    }

    #[must_use]
    pub fn charge(self) -> Self {
        self.keyword(|k| k.charge = true)
    }

    #[must_use]
    pub fn windfury(self) -> Self {
        self.keyword(|k| k.windfury = true)
    }

    #[must_use]
    pub fn cursed(self) -> Self {
        self.keyword(|k| k.cursed = true)
    }

    #[must_use]
    pub fn double_damage(self) -> Self {
        self.keyword(|k| k.double_damage = true)
    }

    #[must_use]
    pub fn grows_on_death(self) -> Self {
        self.keyword(|k| k.grows_on_death = true)
    }

    #[must_use]
    pub fn grows_on_spell(self) -> Self {
        self.keyword(|k| k.grows_on_spell = true)
    }

    #[must_use]
    pub fn blind(self, percent: u8) -> Self {
        self.keyword(|k| k.blind_chance = percent)
    }

    #[must_use]
    pub fn hero_damage(self, bonus: i32) -> Self {
        self.keyword(|k| k.hero_damage_bonus = bonus)
    }

    // === Queries ===

    #[must_use]
    pub fn is_unit(&self) -> bool {
        matches!(self.body, CardBody::Unit { .. })
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.body, CardBody::Spell { .. })
    }

    #[must_use]
    pub fn is_secret(&self) -> bool {
        matches!(self.body, CardBody::Secret { .. })
    }

    /// Unit keywords, if this is a unit.
    #[must_use]
    pub fn keywords(&self) -> Option<&Keywords> {
        match &self.body {
            CardBody::Unit { keywords, .. } => Some(keywords),
            _ => None,
        }
    }

    /// Spell target rule; `TargetRule::None` for non-spells.
    #[must_use]
    pub fn target_rule(&self) -> TargetRule {
        match self.body {
            CardBody::Spell { target } => target,
            _ => TargetRule::None,
        }
    }

    /// Secret trigger, if this is a secret.
    #[must_use]
    pub fn secret_trigger(&self) -> Option<SecretTrigger> {
        match self.body {
            CardBody::Secret { trigger } => Some(trigger),
            _ => None,
        }
    }

    /// Cost after runtime scaling.
    #[must_use]
    pub fn scaled_cost(&self, deaths: u32) -> u8 {
        match self.cost_scaling {
            CostScaling::Fixed => self.cost,
            CostScaling::MinusDeaths => {
                let reduction = u8::try_from(deaths).unwrap_or(u8::MAX);
                self.cost.saturating_sub(reduction)
            }
        }
    }
}
