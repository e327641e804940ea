//! Hero ability handlers.

use crate::cards::ids;
use crate::core::{GameState, HeroAbility, PlayerId, TargetRef};
use crate::error::IllegalAction;

use super::context::EffectContext;
use super::registry::EffectRegistry;

pub(crate) fn register(r: &mut EffectRegistry) {
    r.ability(HeroAbility::Fireblast, fireblast)
        .ability(HeroAbility::SteadyShot, steady_shot)
        .ability(HeroAbility::LesserHeal, lesser_heal)
        .ability(HeroAbility::Reinforce, reinforce)
        .ability(HeroAbility::LifeTap, life_tap);
}

/// Ability-specific legality, checked before mana is paid.
pub fn precheck(
    state: &GameState,
    player: PlayerId,
    ability: HeroAbility,
) -> Result<(), IllegalAction> {
    match ability {
        HeroAbility::Reinforce if state.player(player).field.len() >= state.config.max_field => {
            Err(IllegalAction::FieldFull)
        }
        _ => Ok(()),
    }
}

fn fireblast(ctx: &mut EffectContext<'_>) {
    let enemy = ctx.opponent();
    ctx.damage(TargetRef::hero(enemy), 1);
    ctx.log("Fireblast deals 1 damage");
}

fn steady_shot(ctx: &mut EffectContext<'_>) {
    let enemy = ctx.opponent();
    ctx.damage(TargetRef::hero(enemy), 2);
    ctx.log("Steady Shot deals 2 damage");
}

fn lesser_heal(ctx: &mut EffectContext<'_>) {
    let me = ctx.actor;
    let healed = ctx.heal(TargetRef::hero(me), 2);
    ctx.log(format!("Lesser Heal restores {} health", healed));
}

fn reinforce(ctx: &mut EffectContext<'_>) {
    let me = ctx.actor;
    if ctx.summon(me, ids::RECRUIT, None).is_some() {
        ctx.log("Reinforce summons a Recruit");
    }
}

fn life_tap(ctx: &mut EffectContext<'_>) {
    let me = ctx.actor;
    ctx.draw(me);
    ctx.state.damage_hero(me, 2);
    ctx.log("Life Tap: draw a card, take 2 damage");
}
