//! Legal intent enumeration and target checks.
//!
//! The engine validates with the same helpers, so anything listed here is
//! accepted by `ActionEngine::apply` for the same state.

use crate::cards::{CardBody, CardCatalog, TargetRule};
use crate::combat::validate_attack;
use crate::core::{GameState, Intent, PlayerId, TargetRef};
use crate::effects::ability_precheck;
use crate::error::IllegalAction;

/// Check a spell target against its rule.
pub fn validate_target(
    state: &GameState,
    player: PlayerId,
    rule: TargetRule,
    target: Option<TargetRef>,
) -> Result<(), IllegalAction> {
    if rule == TargetRule::None {
        return Ok(());
    }
    let target = target.ok_or(IllegalAction::TargetRequired)?;
    let ok = match (rule, target) {
        (TargetRule::EnemyUnit, TargetRef::Unit { owner, index }) => {
            owner != player && state.unit(owner, index).is_some()
        }
        (TargetRule::AnyUnit | TargetRule::AnyCharacter, TargetRef::Unit { owner, index }) => {
            state.unit(owner, index).is_some()
        }
        (TargetRule::AnyCharacter, TargetRef::Hero { .. }) => true,
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(IllegalAction::InvalidTarget)
    }
}

/// Every target `rule` allows for `player`, heroes first.
#[must_use]
pub fn valid_targets(state: &GameState, player: PlayerId, rule: TargetRule) -> Vec<TargetRef> {
    let enemy = player.opponent();
    let units = |owner: PlayerId| {
        (0..state.player(owner).field.len()).map(move |i| TargetRef::unit(owner, i))
    };
    match rule {
        TargetRule::None => Vec::new(),
        TargetRule::EnemyUnit => units(enemy).collect(),
        TargetRule::AnyUnit => units(enemy).chain(units(player)).collect(),
        TargetRule::AnyCharacter => [TargetRef::hero(enemy), TargetRef::hero(player)]
            .into_iter()
            .chain(units(enemy))
            .chain(units(player))
            .collect(),
    }
}

/// Enumerate all intents `player` may legally submit.
///
/// Order: card plays (hand order), attacks (board order, hero first),
/// hero ability, end turn. Empty when the game is over or it is not the
/// player's turn.
#[must_use]
pub fn legal_intents(state: &GameState, catalog: &CardCatalog, player: PlayerId) -> Vec<Intent> {
    if state.is_over() || state.current != player {
        return Vec::new();
    }

    let me = state.player(player);
    let mut intents = Vec::new();

    // === Card plays ===
    for (index, card) in me.hand.iter().enumerate() {
        if card.cost > me.mana {
            continue;
        }
        let Some(def) = catalog.get(card.card) else {
            continue;
        };
        match def.body {
            CardBody::Unit { .. } => {
                if me.field.len() < state.config.max_field {
                    intents.push(Intent::play(index));
                }
            }
            CardBody::Spell { target: TargetRule::None } => intents.push(Intent::play(index)),
            CardBody::Spell { target: rule } => intents.extend(
                valid_targets(state, player, rule)
                    .into_iter()
                    .map(|t| Intent::play_targeted(index, t)),
            ),
            CardBody::Secret { .. } => {
                if !me.armed_secrets().any(|s| s.card == card.card) {
                    intents.push(Intent::play(index));
                }
            }
        }
    }

    // === Attacks ===
    let enemy_units = state.player(player.opponent()).field.len();
    for attacker in 0..me.field.len() {
        if validate_attack(state, player, attacker, None, true).is_ok() {
            intents.push(Intent::attack_hero(attacker));
        }
        for target in 0..enemy_units {
            if validate_attack(state, player, attacker, Some(target), false).is_ok() {
                intents.push(Intent::attack_unit(attacker, target));
            }
        }
    }

    // === Hero ability ===
    let hero = &me.hero;
    if !hero.has_used_ability
        && hero.ability_cost <= me.mana
        && ability_precheck(state, player, hero.ability).is_ok()
    {
        intents.push(Intent::UseHeroAbility);
    }

    intents.push(Intent::EndTurn);
    intents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ids;
    use crate::core::{HeroAbility, HeroDescriptor, MatchConfig};

    fn state() -> (GameState, CardCatalog) {
        let hero = HeroDescriptor::new("Valeera", HeroAbility::Fireblast);
        (GameState::new(MatchConfig::default(), [&hero, &hero]), CardCatalog::standard())
    }

    #[test]
    fn test_only_end_turn_when_empty_handed() {
        let (state, catalog) = state();
        assert_eq!(legal_intents(&state, &catalog, PlayerId::FIRST), vec![Intent::EndTurn]);
        assert!(legal_intents(&state, &catalog, PlayerId::SECOND).is_empty());
    }

    #[test]
    fn test_targeted_spell_expands_targets() {
        let (mut state, catalog) = state();
        state.give_card(PlayerId::FIRST, ids::FIREBOLT, &catalog);
        state.summon(PlayerId::SECOND, ids::RECRUIT, None, &catalog);
        state.player_mut(PlayerId::FIRST).mana = 1;

        let intents = legal_intents(&state, &catalog, PlayerId::FIRST);
        // Two heroes, one unit, end turn
        assert_eq!(intents.len(), 4);
        assert_eq!(intents[0], Intent::play_targeted(0, TargetRef::hero(PlayerId::SECOND)));
    }

    #[test]
    fn test_taunt_limits_attacks() {
        let (mut state, catalog) = state();
        let slot = state.summon(PlayerId::FIRST, ids::RIVER_RAPTOR, None, &catalog).unwrap();
        state.unit_mut(PlayerId::FIRST, slot).unwrap().ready_for_turn();
        state.summon(PlayerId::SECOND, ids::RECRUIT, None, &catalog);
        state.summon(PlayerId::SECOND, ids::SHIELDBEARER, None, &catalog);

        let attacks: Vec<_> = legal_intents(&state, &catalog, PlayerId::FIRST)
            .into_iter()
            .filter(|i| matches!(i, Intent::Attack { .. }))
            .collect();
        assert_eq!(attacks, vec![Intent::attack_unit(0, 1)]);
    }

    #[test]
    fn test_enemy_unit_rule() {
        let (mut state, catalog) = state();
        state.summon(PlayerId::FIRST, ids::RECRUIT, None, &catalog);
        state.summon(PlayerId::SECOND, ids::RECRUIT, None, &catalog);

        let rule = TargetRule::EnemyUnit;
        let enemy = Some(TargetRef::unit(PlayerId::SECOND, 0));
        assert!(validate_target(&state, PlayerId::FIRST, rule, enemy).is_ok());
        assert_eq!(
            validate_target(
                &state,
                PlayerId::FIRST,
                rule,
                Some(TargetRef::unit(PlayerId::FIRST, 0))
            ),
            Err(IllegalAction::InvalidTarget)
        );
        assert_eq!(
            validate_target(&state, PlayerId::FIRST, rule, None),
            Err(IllegalAction::TargetRequired)
        );
    }
}
