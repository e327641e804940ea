//! Unit handlers for the built-in set.

use crate::cards::ids;
use crate::core::{DrawOutcome, TargetRef};

use super::context::EffectContext;
use super::registry::{AttackInfo, DeathInfo, EffectRegistry, PlayInfo};

pub(crate) fn register(r: &mut EffectRegistry) {
    r.on_play(ids::FIRE_IMP, fire_imp)
        .on_play(ids::FROST_SPRITE, frost_sprite)
        .on_play(ids::NOVICE_SCRIBE, novice_scribe)
        .on_attack(ids::BATTLE_RAGER, battle_rager)
        .on_attacked(ids::SPIKED_TORTOISE, spiked_tortoise)
        .on_damage_dealt(ids::VAMPIRE_BAT, vampire_bat)
        .on_damage_dealt(ids::MANA_LEECH, mana_leech)
        .on_turn_start(ids::HEALING_SPRING, healing_spring)
        .on_death(ids::LOOT_GOBLIN, loot_goblin)
        .on_death(ids::EMBER_PHOENIX, ember_phoenix)
        .on_death(ids::TREASURE_GOBLIN, treasure_goblin)
        .on_death(ids::CURSED_REVENANT, cursed_revenant)
        .on_death(ids::MARTYR_OF_DAWN, martyr_of_dawn)
        .on_death(ids::GLACIAL_GOLEM, glacial_golem);
}

// === On play ===

fn fire_imp(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
    let enemy = ctx.opponent();
    let dealt = ctx.damage(TargetRef::hero(enemy), 2);
    ctx.log(format!("Fire Imp scorches {} for {}", enemy, dealt));
}

fn frost_sprite(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
    let enemy = ctx.opponent();
    if let Some(slot) = ctx.state.freeze_random_unit(enemy) {
        let name = ctx.unit(enemy, slot).map_or("a unit", |u| ctx.name(u.card));
        ctx.log(format!("Frost Sprite freezes {}", name));
    }
}

fn novice_scribe(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
    let me = ctx.actor;
    if let DrawOutcome::Drawn(_) = ctx.draw(me) {
        ctx.log("Novice Scribe draws a card");
    }
}

// === Reactions ===

fn battle_rager(ctx: &mut EffectContext<'_>, info: &AttackInfo) {
    if let Some(unit) = ctx.unit_mut(info.attacker_owner, info.attacker) {
        unit.attack += 1;
    }
    ctx.log("Battle Rager grows more enraged");
}

fn spiked_tortoise(ctx: &mut EffectContext<'_>, info: &AttackInfo) {
    let lost = ctx.damage(TargetRef::unit(info.attacker_owner, info.attacker), 1);
    if lost > 0 {
        ctx.log("Spiked Tortoise pricks its attacker");
    }
}

// === Damage dealt ===

fn vampire_bat(ctx: &mut EffectContext<'_>, _slot: usize, dealt: i32) {
    let me = ctx.actor;
    let healed = ctx.state.heal_hero(me, dealt);
    if healed > 0 {
        ctx.log(format!("Vampire Bat restores {} health", healed));
    }
}

fn mana_leech(ctx: &mut EffectContext<'_>, _slot: usize, dealt: i32) {
    let me = ctx.actor;
    let gain = u8::try_from(dealt).unwrap_or(0);
    if gain > 0 {
        ctx.state.gain_mana(me, gain);
        ctx.log(format!("Mana Leech siphons {} mana", gain));
    }
}

// === Turn start ===

fn healing_spring(ctx: &mut EffectContext<'_>, _slot: usize) {
    let me = ctx.actor;
    let healed = ctx.state.heal_hero(me, 2);
    if healed > 0 {
        ctx.log(format!("Healing Spring restores {} health", healed));
    }
}

// === On death ===

fn loot_goblin(ctx: &mut EffectContext<'_>, info: &DeathInfo) {
    if let DrawOutcome::Drawn(_) = ctx.draw(info.owner) {
        ctx.log("Loot Goblin drops a card");
    }
}

fn ember_phoenix(ctx: &mut EffectContext<'_>, info: &DeathInfo) {
    if ctx.summon(info.owner, ids::PHOENIX_EMBER, Some(info.slot)).is_some() {
        ctx.log("Ember Phoenix is reborn as a Phoenix Ember");
    }
}

fn treasure_goblin(ctx: &mut EffectContext<'_>, info: &DeathInfo) {
    let catalog = ctx.catalog;
    if ctx.state.shuffle_into_deck(info.owner, ids::GOLD_CACHE, catalog) {
        ctx.log("Treasure Goblin hides a Gold Cache in the deck");
    }
}

fn cursed_revenant(ctx: &mut EffectContext<'_>, info: &DeathInfo) {
    let dealt = ctx.state.damage_hero(info.owner, 3);
    ctx.log(format!("Cursed Revenant's curse deals {} to its master", dealt));
}

fn martyr_of_dawn(ctx: &mut EffectContext<'_>, info: &DeathInfo) {
    let max = ctx.state.player(info.owner).hero.max_health;
    ctx.state.heal_hero(info.owner, max);
    ctx.log("Martyr of Dawn restores its hero to full health");
}

fn glacial_golem(ctx: &mut EffectContext<'_>, info: &DeathInfo) {
    let enemy = info.owner.opponent();
    if let Some(slot) = ctx.state.freeze_random_unit(enemy) {
        let name = ctx.unit(enemy, slot).map_or("a unit", |u| ctx.name(u.card));
        ctx.log(format!("Glacial Golem shatters and freezes {}", name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, Unit};
    use crate::core::{GameState, HeroAbility, HeroDescriptor, MatchConfig, PlayerId};

    fn setup() -> (GameState, CardCatalog) {
        let hero = HeroDescriptor::new("Uther", HeroAbility::LesserHeal);
        (GameState::new(MatchConfig::default(), [&hero, &hero]), CardCatalog::standard())
    }

    fn dead(owner: PlayerId, card: crate::cards::CardId, catalog: &CardCatalog) -> DeathInfo {
        let def = catalog.get(card).unwrap();
        let unit = Unit::from_definition(crate::cards::InstanceId(99), def).unwrap();
        DeathInfo { owner, slot: 0, unit }
    }

    #[test]
    fn test_fire_imp_hits_enemy_face() {
        let (mut state, catalog) = setup();
        let registry = EffectRegistry::standard();
        let info = PlayInfo { card: ids::FIRE_IMP, slot: Some(0), target: None };

        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::FIRST);
        registry.run_on_play(&mut ctx, &info);

        assert_eq!(state.player(PlayerId::SECOND).hero.health, 28);
        assert_eq!(state.log.len(), 1);
    }

    #[test]
    fn test_phoenix_returns_in_same_slot() {
        let (mut state, catalog) = setup();
        state.summon(PlayerId::FIRST, ids::RIVER_RAPTOR, None, &catalog);
        let registry = EffectRegistry::standard();

        let info = dead(PlayerId::FIRST, ids::EMBER_PHOENIX, &catalog);
        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::FIRST);
        registry.run_on_death(&mut ctx, &info);

        let field = &state.player(PlayerId::FIRST).field;
        assert_eq!(field.len(), 2);
        assert_eq!(field[0].card, ids::PHOENIX_EMBER);
        assert_eq!((field[0].attack, field[0].health), (2, 1));
    }

    #[test]
    fn test_martyr_restores_full_health() {
        let (mut state, catalog) = setup();
        state.damage_hero(PlayerId::SECOND, 20);
        let registry = EffectRegistry::standard();

        let info = dead(PlayerId::SECOND, ids::MARTYR_OF_DAWN, &catalog);
        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::SECOND);
        registry.run_on_death(&mut ctx, &info);

        assert_eq!(state.player(PlayerId::SECOND).hero.health, 30);
    }

    #[test]
    fn test_treasure_goblin_shuffles_gold_cache() {
        let (mut state, catalog) = setup();
        let registry = EffectRegistry::standard();

        let info = dead(PlayerId::FIRST, ids::TREASURE_GOBLIN, &catalog);
        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::FIRST);
        registry.run_on_death(&mut ctx, &info);

        let deck = &state.player(PlayerId::FIRST).deck;
        assert_eq!(deck.len(), 1);
        assert_eq!(deck[0].card, ids::GOLD_CACHE);
    }

    #[test]
    fn test_vampire_bat_heals_only_what_was_dealt() {
        let (mut state, catalog) = setup();
        state.damage_hero(PlayerId::FIRST, 10);
        let registry = EffectRegistry::standard();

        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::FIRST);
        registry.run_on_damage_dealt(&mut ctx, ids::VAMPIRE_BAT, 0, 0);
        assert_eq!(state.player(PlayerId::FIRST).hero.health, 20);

        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::FIRST);
        registry.run_on_damage_dealt(&mut ctx, ids::VAMPIRE_BAT, 0, 3);
        assert_eq!(state.player(PlayerId::FIRST).hero.health, 23);
    }

    #[test]
    fn test_spellweaver_grows() {
        let (mut state, catalog) = setup();
        state.summon(PlayerId::FIRST, ids::SPELLWEAVER, None, &catalog);
        let registry = EffectRegistry::standard();

        let mut ctx = EffectContext::new(&mut state, &catalog, PlayerId::FIRST);
        registry.run_spell_cast(&mut ctx);

        assert_eq!(state.unit(PlayerId::FIRST, 0).unwrap().attack, 2);
    }
}
