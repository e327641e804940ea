//! Attack validation and damage exchange.

use log::trace;

use crate::core::{GameState, PlayerId};
use crate::effects::{AttackInfo, EffectContext, EffectRegistry};
use crate::error::IllegalAction;

use super::sweep::sweep_deaths;

/// How a resolved attack played out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackReport {
    /// Health the attacker's hit removed from its target.
    pub dealt: i32,
    /// Health the defender's counter-hit removed from the attacker.
    pub taken: i32,
    /// The attacker missed the hero.
    pub missed: bool,
    /// The attacker was gone or frozen by the time damage would resolve.
    pub fizzled: bool,
}

/// Check an attack declaration against the current board.
///
/// The attacker must exist and be ready (awake, unfrozen, attacks left,
/// attack above zero). If the defender has any Taunt unit the target must
/// be one of them.
pub fn validate_attack(
    state: &GameState,
    player: PlayerId,
    attacker: usize,
    target: Option<usize>,
    is_hero_target: bool,
) -> Result<(), IllegalAction> {
    let unit = state
        .unit(player, attacker)
        .ok_or(IllegalAction::IllegalAttacker(attacker))?;
    if !unit.is_ready() {
        return Err(IllegalAction::IllegalAttacker(attacker));
    }

    let defender = state.player(player.opponent());
    if is_hero_target {
        if defender.has_taunt() {
            return Err(IllegalAction::TauntBlocksHero);
        }
        return Ok(());
    }

    let index = target.ok_or(IllegalAction::TargetRequired)?;
    let target_unit = defender.field.get(index).ok_or(IllegalAction::IllegalTarget(index))?;
    if defender.has_taunt() && !target_unit.taunt {
        return Err(IllegalAction::MustAttackTaunt);
    }
    Ok(())
}

/// Resolve one attack by `ctx.actor`'s unit in slot `attacker`.
///
/// `defender` is a slot on the opposing field, or `None` for the hero. The
/// declaration has already been validated; this re-checks the attacker
/// because a secret may have killed or frozen it in between.
///
/// Runs on-attack handlers, exchanges damage, dispatches on-damage-dealt,
/// marks the attack, sweeps deaths and runs the win check. If an on-attack
/// handler ends the match, no damage is exchanged.
pub fn resolve_attack(
    ctx: &mut EffectContext<'_>,
    effects: &EffectRegistry,
    attacker: usize,
    defender: Option<usize>,
) -> AttackReport {
    let me = ctx.actor;
    let enemy = ctx.opponent();
    let mut report = AttackReport::default();

    let Some(attacker_id) = ctx
        .unit(me, attacker)
        .filter(|u| !u.is_dead() && !u.frozen)
        .map(|u| u.id)
    else {
        ctx.log("The attack fizzles");
        report.fizzled = true;
        sweep_deaths(ctx, effects);
        ctx.state.check_game_over();
        return report;
    };

    let info = AttackInfo { attacker_owner: me, attacker, defender };
    effects.run_on_attack(ctx, &info);
    if ctx.state.check_game_over().is_some() {
        report.fizzled = true;
        sweep_deaths(ctx, effects);
        return report;
    }

    let attacker_alive = ctx.unit(me, attacker).is_some_and(|u| !u.is_dead());
    let defender_alive = defender.map_or(true, |slot| {
        ctx.unit(enemy, slot).is_some_and(|u| !u.is_dead())
    });

    if attacker_alive && defender_alive {
        match defender {
            None => strike_hero(ctx, effects, attacker, &mut report),
            Some(slot) => exchange(ctx, effects, attacker, slot, &mut report),
        }
    } else {
        report.fizzled = true;
        ctx.log("The attack fizzles");
    }

    // The attacker still sits in its slot: nothing is removed before the sweep.
    if let Some(unit) = ctx.unit_mut(me, attacker).filter(|u| u.id == attacker_id) {
        unit.attacks_made = unit.attacks_made.saturating_add(1);
    }

    sweep_deaths(ctx, effects);
    ctx.state.check_game_over();
    report
}

fn strike_hero(
    ctx: &mut EffectContext<'_>,
    effects: &EffectRegistry,
    attacker: usize,
    report: &mut AttackReport,
) {
    let me = ctx.actor;
    let enemy = ctx.opponent();
    let Some(unit) = ctx.unit(me, attacker) else {
        return;
    };
    let (card, attack, keywords) = (unit.card, unit.attack, unit.keywords);
    let name = ctx.name(card);

    if keywords.blind_chance > 0 && ctx.state.rng.chance(keywords.blind_chance) {
        report.missed = true;
        ctx.log(format!("{} swings blindly and misses!", name));
        return;
    }

    let amount = (attack + keywords.hero_damage_bonus).max(0);
    let dealt = ctx.state.damage_hero(enemy, amount);
    report.dealt = dealt;
    trace!("{} hits hero for {}", card, dealt);
    ctx.log(format!("{} attacks {}'s hero for {}", name, enemy, dealt));

    effects.run_on_damage_dealt(ctx, card, attacker, dealt);
}

fn exchange(
    ctx: &mut EffectContext<'_>,
    effects: &EffectRegistry,
    attacker: usize,
    defender: usize,
    report: &mut AttackReport,
) {
    let me = ctx.actor;
    let enemy = ctx.opponent();
    let (Some(a), Some(d)) = (ctx.unit(me, attacker), ctx.unit(enemy, defender)) else {
        return;
    };
    let (a_card, a_keys) = (a.card, a.keywords);
    let (d_card, d_keys) = (d.card, d.keywords);
    let a_hit = if a_keys.double_damage { a.attack * 2 } else { a.attack };
    let d_hit = if d_keys.double_damage { d.attack * 2 } else { d.attack };

    // Simultaneous exchange; each side's shield absorbs its own first instance.
    let mut dealt = ctx.state.damage_unit(enemy, defender, a_hit);
    let mut taken = ctx.state.damage_unit(me, attacker, d_hit);

    // Cursed units take a second hit after the exchange.
    if a_keys.cursed {
        taken += ctx.state.damage_unit(me, attacker, d_hit);
    }
    if d_keys.cursed {
        dealt += ctx.state.damage_unit(enemy, defender, a_hit);
    }

    report.dealt = dealt;
    report.taken = taken;
    let (a_name, d_name) = (ctx.name(a_card), ctx.name(d_card));
    ctx.log(format!("{} attacks {}: deals {}, takes {}", a_name, d_name, dealt, taken));

    effects.run_on_damage_dealt(ctx, a_card, attacker, dealt);
    let mut dctx = ctx.for_player(enemy);
    effects.run_on_damage_dealt(&mut dctx, d_card, defender, taken);
}
