//! The built-in secrets.

use log::debug;
use rustc_hash::FxHashMap;

use crate::cards::{ids, CardId};
use crate::core::{GameState, PlayerId, TargetRef};
use crate::effects::EffectContext;

use super::{SecretEvent, SecretOutcome, SecretResolver};

/// Whether an armed secret qualifies for an event. Receives the owner.
pub type SecretCondition = fn(&GameState, PlayerId, &SecretEvent) -> bool;

/// Apply a fired secret. `ctx.actor` is the owner.
pub type SecretEffect = fn(&mut EffectContext<'_>, &SecretEvent) -> SecretOutcome;

#[derive(Clone, Copy, Debug)]
pub struct SecretRule {
    pub condition: SecretCondition,
    pub effect: SecretEffect,
}

/// Secret rules keyed by card identity.
///
/// Precedence: the owner's secrets are scanned in arming order and the
/// first unrevealed one whose trigger and condition match fires. Nothing
/// else fires for the same event.
#[derive(Clone, Debug, Default)]
pub struct SecretBook {
    rules: FxHashMap<CardId, SecretRule>,
}

impl SecretBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for the built-in secrets.
    #[must_use]
    pub fn standard() -> Self {
        let mut book = Self::new();
        book.register(ids::COUNTERSPELL, always, counterspell)
            .register(ids::VAPORIZE, hero_targeted, vaporize)
            .register(ids::EXPLOSIVE_TRAP, hero_targeted, explosive_trap)
            .register(ids::SNIPE, always, snipe)
            .register(ids::MIRROR_ENTITY, has_room, mirror_entity)
            .register(ids::NOBLE_SACRIFICE, has_room, noble_sacrifice);
        book
    }

    pub fn register(
        &mut self,
        card: CardId,
        condition: SecretCondition,
        effect: SecretEffect,
    ) -> &mut Self {
        self.rules.insert(card, SecretRule { condition, effect });
        self
    }

    #[must_use]
    pub fn rule(&self, card: CardId) -> Option<&SecretRule> {
        self.rules.get(&card)
    }
}

impl SecretResolver for SecretBook {
    fn intercept(&self, ctx: &mut EffectContext<'_>, event: &SecretEvent) -> SecretOutcome {
        let owner = ctx.actor;
        let trigger = event.trigger();

        let state: &GameState = ctx.state;
        let found = state
            .player(owner)
            .secrets
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_revealed && s.trigger == trigger)
            .find_map(|(i, s)| {
                let rule = self.rules.get(&s.card)?;
                (rule.condition)(state, owner, event).then_some((i, s.card, *rule))
            });

        let Some((index, card, rule)) = found else {
            return SecretOutcome::Continue;
        };

        if let Some(secret) = ctx.state.player_mut(owner).secrets.get_mut(index) {
            secret.is_revealed = true;
        }
        let name = ctx.name(card);
        debug!("{} reveals {} on {:?}", owner, name, event);
        ctx.log(format!("Secret revealed: {}!", name));

        (rule.effect)(ctx, event)
    }
}

// === Conditions ===

fn always(_: &GameState, _: PlayerId, _: &SecretEvent) -> bool {
    true
}

fn hero_targeted(_: &GameState, _: PlayerId, event: &SecretEvent) -> bool {
    matches!(event, SecretEvent::Attack { defender: None, .. })
}

fn has_room(state: &GameState, owner: PlayerId, _: &SecretEvent) -> bool {
    state.player(owner).field.len() < state.config.max_field
}

// === Effects ===

fn counterspell(ctx: &mut EffectContext<'_>, event: &SecretEvent) -> SecretOutcome {
    if let SecretEvent::SpellPlayed { card } = event {
        let name = ctx.name(*card);
        ctx.log(format!("{} is countered", name));
    }
    SecretOutcome::Cancel
}

fn vaporize(ctx: &mut EffectContext<'_>, event: &SecretEvent) -> SecretOutcome {
    let SecretEvent::Attack { attacker, .. } = *event else {
        return SecretOutcome::Continue;
    };
    let enemy = ctx.opponent();
    let Some(unit) = ctx.unit_mut(enemy, attacker) else {
        return SecretOutcome::Continue;
    };
    unit.health = 0;
    let card = unit.card;
    let name = ctx.name(card);
    ctx.log(format!("Vaporize destroys {}", name));
    SecretOutcome::Cancel
}

fn explosive_trap(ctx: &mut EffectContext<'_>, _: &SecretEvent) -> SecretOutcome {
    let enemy = ctx.opponent();
    ctx.damage_all_units(enemy, 2);
    ctx.damage(TargetRef::hero(enemy), 2);
    ctx.log("Explosive Trap deals 2 damage to all enemies");
    SecretOutcome::Continue
}

fn snipe(ctx: &mut EffectContext<'_>, event: &SecretEvent) -> SecretOutcome {
    if let SecretEvent::UnitPlayed { slot } = *event {
        let enemy = ctx.opponent();
        let lost = ctx.damage(TargetRef::unit(enemy, slot), 4);
        ctx.log(format!("Snipe deals {} damage", lost));
    }
    SecretOutcome::Continue
}

fn mirror_entity(ctx: &mut EffectContext<'_>, event: &SecretEvent) -> SecretOutcome {
    let SecretEvent::UnitPlayed { slot } = *event else {
        return SecretOutcome::Continue;
    };
    let (me, enemy) = (ctx.actor, ctx.opponent());
    if let Some(card) = ctx.unit(enemy, slot).map(|u| u.card) {
        if ctx.summon(me, card, None).is_some() {
            let name = ctx.name(card);
            ctx.log(format!("Mirror Entity copies {}", name));
        }
    }
    SecretOutcome::Continue
}

fn noble_sacrifice(ctx: &mut EffectContext<'_>, _: &SecretEvent) -> SecretOutcome {
    let me = ctx.actor;
    match ctx.summon(me, ids::LOYAL_DEFENDER, None) {
        Some(slot) => {
            ctx.log("A Loyal Defender steps in to take the blow");
            SecretOutcome::Redirect(slot)
        }
        None => SecretOutcome::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, SecretTrigger};
    use crate::core::{HeroAbility, HeroDescriptor, MatchConfig};

    fn setup() -> (GameState, CardCatalog) {
        let hero = HeroDescriptor::new("Jaina", HeroAbility::Fireblast);
        (GameState::new(MatchConfig::default(), [&hero, &hero]), CardCatalog::standard())
    }

    fn arm(state: &mut GameState, owner: PlayerId, card: CardId, trigger: SecretTrigger) {
        let id = state.alloc_instance();
        state.arm_secret(owner, id, card, trigger);
    }

    #[test]
    fn test_counterspell_cancels_and_reveals() {
        let (mut state, catalog) = setup();
        arm(&mut state, PlayerId::SECOND, ids::COUNTERSPELL, SecretTrigger::SpellPlayed);
        let book = SecretBook::standard();

        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::SECOND);
        let outcome = book.intercept(&mut ctx, &SecretEvent::SpellPlayed { card: ids::FIREBOLT });

        assert_eq!(outcome, SecretOutcome::Cancel);
        assert!(state.player(PlayerId::SECOND).secrets[0].is_revealed);

        // Revealed secrets never fire again
        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::SECOND);
        let outcome = book.intercept(&mut ctx, &SecretEvent::SpellPlayed { card: ids::FIREBOLT });
        assert_eq!(outcome, SecretOutcome::Continue);
    }

    #[test]
    fn test_first_armed_fires_first() {
        let (mut state, catalog) = setup();
        arm(&mut state, PlayerId::SECOND, ids::EXPLOSIVE_TRAP, SecretTrigger::HeroAttack);
        arm(&mut state, PlayerId::SECOND, ids::VAPORIZE, SecretTrigger::HeroAttack);
        state.summon(PlayerId::FIRST, ids::OGRE_BRUTE, None, &catalog);
        let book = SecretBook::standard();

        let event = SecretEvent::Attack { attacker: 0, defender: None };
        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::SECOND);
        let outcome = book.intercept(&mut ctx, &event);

        assert_eq!(outcome, SecretOutcome::Continue);
        let secrets = &state.player(PlayerId::SECOND).secrets;
        assert!(secrets[0].is_revealed);
        assert!(!secrets[1].is_revealed);
        assert_eq!(state.player(PlayerId::FIRST).hero.health, 28);
        assert_eq!(state.unit(PlayerId::FIRST, 0).unwrap().health, 5);
    }

    #[test]
    fn test_condition_filters_unit_attacks() {
        let (mut state, catalog) = setup();
        arm(&mut state, PlayerId::SECOND, ids::VAPORIZE, SecretTrigger::HeroAttack);
        state.summon(PlayerId::FIRST, ids::RIVER_RAPTOR, None, &catalog);
        state.summon(PlayerId::SECOND, ids::RECRUIT, None, &catalog);
        let book = SecretBook::standard();

        let event = SecretEvent::Attack { attacker: 0, defender: Some(0) };
        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::SECOND);
        assert_eq!(book.intercept(&mut ctx, &event), SecretOutcome::Continue);
        assert!(!state.player(PlayerId::SECOND).secrets[0].is_revealed);

        let event = SecretEvent::Attack { attacker: 0, defender: None };
        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::SECOND);
        assert_eq!(book.intercept(&mut ctx, &event), SecretOutcome::Cancel);
        assert!(state.unit(PlayerId::FIRST, 0).unwrap().is_dead());
    }

    #[test]
    fn test_noble_sacrifice_redirects() {
        let (mut state, catalog) = setup();
        arm(&mut state, PlayerId::SECOND, ids::NOBLE_SACRIFICE, SecretTrigger::HeroAttack);
        state.summon(PlayerId::FIRST, ids::RIVER_RAPTOR, None, &catalog);
        state.summon(PlayerId::SECOND, ids::RECRUIT, None, &catalog);
        let book = SecretBook::standard();

        let event = SecretEvent::Attack { attacker: 0, defender: None };
        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::SECOND);
        assert_eq!(book.intercept(&mut ctx, &event), SecretOutcome::Redirect(1));
        assert_eq!(state.unit(PlayerId::SECOND, 1).unwrap().card, ids::LOYAL_DEFENDER);
    }

    #[test]
    fn test_mirror_entity_copies_played_unit() {
        let (mut state, catalog) = setup();
        arm(&mut state, PlayerId::SECOND, ids::MIRROR_ENTITY, SecretTrigger::UnitPlayed);
        state.summon(PlayerId::FIRST, ids::OGRE_BRUTE, None, &catalog);
        let book = SecretBook::standard();

        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::SECOND);
        book.intercept(&mut ctx, &SecretEvent::UnitPlayed { slot: 0 });

        assert_eq!(state.unit(PlayerId::SECOND, 0).unwrap().card, ids::OGRE_BRUTE);
    }

    #[test]
    fn test_wrong_trigger_is_ignored() {
        let (mut state, catalog) = setup();
        arm(&mut state, PlayerId::SECOND, ids::SNIPE, SecretTrigger::UnitPlayed);
        let book = SecretBook::standard();

        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::SECOND);
        let outcome = book.intercept(&mut ctx, &SecretEvent::SpellPlayed { card: ids::FIREBOLT });
        assert_eq!(outcome, SecretOutcome::Continue);
        assert!(state.log.is_empty());
    }
}
