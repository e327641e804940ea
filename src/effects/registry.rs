//! Effect registry.
//!
//! Maps a card identity to an ordered list of handlers per trigger phase.
//! Resolution code asks the registry for a card's handlers once and runs
//! them in registration order; adding a card never touches resolver code.

use log::trace;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::{CardId, Unit};
use crate::core::{HeroAbility, PlayerId, TargetRef};

use super::context::EffectContext;

/// What an on-play handler learns about the play.
#[derive(Clone, Copy, Debug)]
pub struct PlayInfo {
    pub card: CardId,
    /// Board slot of the unit that was played (units only).
    pub slot: Option<usize>,
    pub target: Option<TargetRef>,
}

/// The two sides of an attack, by board position.
#[derive(Clone, Copy, Debug)]
pub struct AttackInfo {
    pub attacker_owner: PlayerId,
    pub attacker: usize,
    /// `None` when the hero is attacked.
    pub defender: Option<usize>,
}

/// A unit that has just been removed from the board.
#[derive(Clone, Debug)]
pub struct DeathInfo {
    pub owner: PlayerId,
    /// Slot it occupied before removal.
    pub slot: usize,
    pub unit: Unit,
}

pub type PlayHandler = fn(&mut EffectContext<'_>, &PlayInfo);
pub type AttackHandler = fn(&mut EffectContext<'_>, &AttackInfo);
/// Receives the dealing unit's slot and the health its hit removed.
pub type DamageDealtHandler = fn(&mut EffectContext<'_>, usize, i32);
pub type DeathHandler = fn(&mut EffectContext<'_>, &DeathInfo);
/// Receives the slot of the unit whose trigger fired.
pub type UnitHandler = fn(&mut EffectContext<'_>, usize);
pub type AbilityHandler = fn(&mut EffectContext<'_>);

/// Every handler registered for one card, by trigger phase.
#[derive(Clone, Debug, Default)]
pub struct CardHandlers {
    pub on_play: SmallVec<[PlayHandler; 1]>,
    /// Runs for the attacker before damage.
    pub on_attack: SmallVec<[AttackHandler; 1]>,
    /// Runs for the defending unit before damage.
    pub on_attacked: SmallVec<[AttackHandler; 1]>,
    pub on_damage_dealt: SmallVec<[DamageDealtHandler; 1]>,
    pub on_death: SmallVec<[DeathHandler; 1]>,
    pub on_turn_start: SmallVec<[UnitHandler; 1]>,
    /// Runs when the unit's owner casts a spell.
    pub on_spell_cast: SmallVec<[UnitHandler; 1]>,
}

/// Registry of card and hero-ability handlers.
///
/// ## Example
///
/// ```
/// use hearthfire::cards::CardId;
/// use hearthfire::effects::{EffectContext, EffectRegistry, PlayInfo};
///
/// fn ping(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
///     let enemy = ctx.opponent();
///     ctx.state.damage_hero(enemy, 1);
/// }
///
/// let mut registry = EffectRegistry::new();
/// registry.on_play(CardId::new(500), ping);
/// assert!(registry.handlers(CardId::new(500)).is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    cards: FxHashMap<CardId, CardHandlers>,
    abilities: FxHashMap<HeroAbility, AbilityHandler>,
}

impl EffectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers for the built-in card set and hero abilities.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        super::units::register(&mut registry);
        super::spells::register(&mut registry);
        super::abilities::register(&mut registry);
        registry
    }

    fn entry(&mut self, card: CardId) -> &mut CardHandlers {
        self.cards.entry(card).or_default()
    }

    // === Registration ===

    pub fn on_play(&mut self, card: CardId, handler: PlayHandler) -> &mut Self {
        self.entry(card).on_play.push(handler);
        self
    }

    pub fn on_attack(&mut self, card: CardId, handler: AttackHandler) -> &mut Self {
        self.entry(card).on_attack.push(handler);
        self
    }

    pub fn on_attacked(&mut self, card: CardId, handler: AttackHandler) -> &mut Self {
        self.entry(card).on_attacked.push(handler);
        self
    }

    pub fn on_damage_dealt(&mut self, card: CardId, handler: DamageDealtHandler) -> &mut Self {
        self.entry(card).on_damage_dealt.push(handler);
        self
    }

    pub fn on_death(&mut self, card: CardId, handler: DeathHandler) -> &mut Self {
        self.entry(card).on_death.push(handler);
        self
    }

    pub fn on_turn_start(&mut self, card: CardId, handler: UnitHandler) -> &mut Self {
        self.entry(card).on_turn_start.push(handler);
        self
    }

    pub fn on_spell_cast(&mut self, card: CardId, handler: UnitHandler) -> &mut Self {
        self.entry(card).on_spell_cast.push(handler);
        self
    }

    pub fn ability(&mut self, ability: HeroAbility, handler: AbilityHandler) -> &mut Self {
        self.abilities.insert(ability, handler);
        self
    }

    // === Lookup ===

    #[must_use]
    pub fn handlers(&self, card: CardId) -> Option<&CardHandlers> {
        self.cards.get(&card)
    }

    #[must_use]
    pub fn ability_handler(&self, ability: HeroAbility) -> Option<AbilityHandler> {
        self.abilities.get(&ability).copied()
    }

    // === Dispatch ===

    pub fn run_on_play(&self, ctx: &mut EffectContext<'_>, info: &PlayInfo) {
        if let Some(h) = self.handlers(info.card) {
            for handler in &h.on_play {
                trace!("on_play {}", info.card);
                handler(ctx, info);
            }
        }
    }

    /// Run the attacker's on-attack and the defender's on-attacked handlers.
    pub fn run_on_attack(&self, ctx: &mut EffectContext<'_>, info: &AttackInfo) {
        let attacker_card = ctx.state.unit(info.attacker_owner, info.attacker).map(|u| u.card);
        if let Some(h) = attacker_card.and_then(|c| self.handlers(c)) {
            let mut actx = ctx.for_player(info.attacker_owner);
            for handler in &h.on_attack {
                handler(&mut actx, info);
            }
        }

        let defender_owner = info.attacker_owner.opponent();
        let defender_card = info
            .defender
            .and_then(|slot| ctx.state.unit(defender_owner, slot))
            .map(|u| u.card);
        if let Some(h) = defender_card.and_then(|c| self.handlers(c)) {
            let mut dctx = ctx.for_player(defender_owner);
            for handler in &h.on_attacked {
                handler(&mut dctx, info);
            }
        }
    }

    pub fn run_on_damage_dealt(
        &self,
        ctx: &mut EffectContext<'_>,
        card: CardId,
        slot: usize,
        dealt: i32,
    ) {
        if let Some(h) = self.handlers(card) {
            for handler in &h.on_damage_dealt {
                trace!("on_damage_dealt {} dealt={}", card, dealt);
                handler(ctx, slot, dealt);
            }
        }
    }

    pub fn run_on_death(&self, ctx: &mut EffectContext<'_>, info: &DeathInfo) {
        if let Some(h) = self.handlers(info.unit.card) {
            for handler in &h.on_death {
                trace!("on_death {}", info.unit.card);
                handler(ctx, info);
            }
        }
    }

    /// Run on-turn-start handlers for every unit on the actor's field.
    pub fn run_turn_start(&self, ctx: &mut EffectContext<'_>) {
        let cards: Vec<CardId> = ctx.state.player(ctx.actor).field.iter().map(|u| u.card).collect();
        for (slot, card) in cards.into_iter().enumerate() {
            if let Some(h) = self.handlers(card) {
                for handler in &h.on_turn_start {
                    handler(ctx, slot);
                }
            }
        }
    }

    /// Grow `grows_on_spell` units, then run on-spell-cast handlers for
    /// every unit on the caster's field.
    pub fn run_spell_cast(&self, ctx: &mut EffectContext<'_>) {
        let me = ctx.actor;
        for unit in ctx.state.player_mut(me).field.iter_mut() {
            if unit.keywords.grows_on_spell {
                unit.attack += 1;
            }
        }
        let cards: Vec<CardId> = ctx.state.player(me).field.iter().map(|u| u.card).collect();
        for (slot, card) in cards.into_iter().enumerate() {
            if let Some(h) = self.handlers(card) {
                for handler in &h.on_spell_cast {
                    handler(ctx, slot);
                }
            }
        }
    }
}
