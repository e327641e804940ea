//! Death sweep.

use im::Vector;
use log::trace;

use crate::effects::{DeathInfo, EffectContext, EffectRegistry};

/// Remove every dead unit from both fields and resolve its death.
///
/// The current player's side is swept first, each side left to right. For
/// every pass: the global death counter grows, scaled costs refresh,
/// surviving units that grow on deaths gain +1 attack per death, and each
/// removed unit's on-death handlers run for its owner. Handlers may kill
/// more units, so the sweep repeats until a pass finds nobody dead.
///
/// Returns the total number of units removed.
pub fn sweep_deaths(ctx: &mut EffectContext<'_>, effects: &EffectRegistry) -> u32 {
    let mut total = 0;
    loop {
        let current = ctx.state.current;
        let mut dead: Vec<DeathInfo> = Vec::new();

        for owner in [current, current.opponent()] {
            let field = &mut ctx.state.player_mut(owner).field;
            if !field.iter().any(|u| u.is_dead()) {
                continue;
            }
            let mut survivors = Vector::new();
            for unit in field.iter() {
                if unit.is_dead() {
                    dead.push(DeathInfo {
                        owner,
                        slot: survivors.len(),
                        unit: unit.clone(),
                    });
                } else {
                    survivors.push_back(unit.clone());
                }
            }
            *field = survivors;
        }

        if dead.is_empty() {
            return total;
        }

        let count = dead.len() as u32;
        total += count;
        ctx.state.deaths += count;
        let catalog = ctx.catalog;
        ctx.state.refresh_costs(catalog);

        for owner in [current, current.opponent()] {
            for unit in ctx.state.player_mut(owner).field.iter_mut() {
                if unit.keywords.grows_on_death {
                    unit.attack += count as i32;
                }
            }
        }

        for info in &dead {
            let name = ctx.name(info.unit.card);
            trace!("{} dies ({}, slot {})", info.unit.card, info.owner, info.slot);
            let mut octx = ctx.for_player(info.owner);
            octx.log(format!("{} dies", name));
            effects.run_on_death(&mut octx, info);
        }
    }
}
