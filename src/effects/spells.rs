//! Spell handlers for the built-in set.
//!
//! Target validity (right side, slot exists) is checked by the engine before
//! any handler runs, so handlers only pattern-match the target shape.

use crate::cards::ids;
use crate::core::TargetRef;

use super::context::EffectContext;
use super::registry::{EffectRegistry, PlayInfo};

pub(crate) fn register(r: &mut EffectRegistry) {
    r.on_play(ids::THE_COIN, the_coin)
        .on_play(ids::FIREBOLT, firebolt)
        .on_play(ids::PYROCLASM, pyroclasm)
        .on_play(ids::HEALING_LIGHT, healing_light)
        .on_play(ids::FROST_NOVA, frost_nova)
        .on_play(ids::FLAMESTRIKE, flamestrike)
        .on_play(ids::ARCANE_INSIGHT, arcane_insight)
        .on_play(ids::HOLY_NOVA, holy_nova)
        .on_play(ids::MIND_CONTROL, mind_control)
        .on_play(ids::WHIRLWIND, whirlwind)
        .on_play(ids::GOLD_CACHE, gold_cache)
        .on_play(ids::FROSTBOLT, frostbolt);
}

fn describe(ctx: &EffectContext<'_>, target: TargetRef) -> String {
    match target {
        TargetRef::Hero { owner } => format!("{}'s hero", owner),
        TargetRef::Unit { owner, index } => ctx
            .unit(owner, index)
            .map_or_else(|| "nothing".to_string(), |u| ctx.name(u.card).to_string()),
    }
}

fn the_coin(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
    let me = ctx.actor;
    ctx.state.gain_mana(me, 1);
    ctx.log("The Coin grants 1 mana");
}

fn firebolt(ctx: &mut EffectContext<'_>, info: &PlayInfo) {
    if let Some(target) = info.target {
        let what = describe(ctx, target);
        let amount = ctx.burn(info.card).targeted;
        ctx.damage(target, amount);
        ctx.log(format!("Firebolt hits {} for {}", what, amount));
    }
}

fn frostbolt(ctx: &mut EffectContext<'_>, info: &PlayInfo) {
    if let Some(target) = info.target {
        let what = describe(ctx, target);
        let amount = ctx.burn(info.card).targeted;
        ctx.damage(target, amount);
        if let TargetRef::Unit { owner, index } = target {
            if let Some(unit) = ctx.unit_mut(owner, index) {
                unit.freeze();
            }
        }
        ctx.log(format!("Frostbolt hits {} for {} and freezes it", what, amount));
    }
}

fn pyroclasm(ctx: &mut EffectContext<'_>, info: &PlayInfo) {
    let enemy = ctx.opponent();
    let amount = ctx.burn(info.card).face;
    let dealt = ctx.damage(TargetRef::hero(enemy), amount);
    ctx.log(format!("Pyroclasm deals {} damage to {}'s hero", dealt, enemy));
}

fn healing_light(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
    let me = ctx.actor;
    let healed = ctx.heal(TargetRef::hero(me), 8);
    ctx.log(format!("Healing Light restores {} health", healed));
}

fn frost_nova(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
    let enemy = ctx.opponent();
    for unit in ctx.state.player_mut(enemy).field.iter_mut() {
        unit.freeze();
    }
    ctx.log("Frost Nova freezes every enemy unit");
}

fn flamestrike(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
    let enemy = ctx.opponent();
    ctx.damage_all_units(enemy, 4);
    ctx.log("Flamestrike engulfs the enemy board");
}

fn whirlwind(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
    let (me, enemy) = (ctx.actor, ctx.opponent());
    ctx.damage_all_units(me, 1);
    ctx.damage_all_units(enemy, 1);
    ctx.log("Whirlwind deals 1 damage to every unit");
}

fn arcane_insight(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
    let me = ctx.actor;
    ctx.draw(me);
    ctx.draw(me);
    ctx.log("Arcane Insight draws 2 cards");
}

fn gold_cache(ctx: &mut EffectContext<'_>, _: &PlayInfo) {
    let me = ctx.actor;
    ctx.draw(me);
    ctx.log("Gold Cache draws a card");
}

fn holy_nova(ctx: &mut EffectContext<'_>, info: &PlayInfo) {
    let (me, enemy) = (ctx.actor, ctx.opponent());
    let amount = ctx.burn(info.card).face;
    ctx.damage_all_units(enemy, amount);
    ctx.damage(TargetRef::hero(enemy), amount);
    ctx.heal(TargetRef::hero(me), 2);
    for unit in ctx.state.player_mut(me).field.iter_mut() {
        unit.heal(2);
    }
    ctx.log("Holy Nova burns the enemy and mends allies");
}

fn mind_control(ctx: &mut EffectContext<'_>, info: &PlayInfo) {
    let Some(TargetRef::Unit { owner, index }) = info.target else {
        return;
    };
    let me = ctx.actor;
    if ctx.state.player(me).field.len() >= ctx.state.config.max_field {
        ctx.log("Mind Control fizzles: no room on the board");
        ctx.notify("Your board is full. Mind Control had no effect.");
        return;
    }
    if index >= ctx.state.player(owner).field.len() {
        return;
    }
    let mut unit = ctx.state.player_mut(owner).field.remove(index);
    unit.can_attack = unit.keywords.charge;
    unit.attacks_made = 0;
    let name = ctx.name(unit.card);
    ctx.state.place_unit(me, unit, None);
    ctx.log(format!("Mind Control takes {}", name));
}
