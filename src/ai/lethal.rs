//! Exact lethal search.
//!
//! Depth-first search over damage-dealing intents, simulated through the
//! rules engine: attacks first (on the hero, or on Taunt units standing in
//! the way), then burn spells, then a damaging hero ability. A branch is
//! pruned as soon as the most damage still available cannot reach the
//! enemy hero's health.
//!
//! Interchangeable choices are searched once. Two ready units with the same
//! card and stats lead to the same positions whichever swings first, and
//! the same holds for two copies of a spell or two identical Taunt targets.
//!
//! Only certain damage counts. A unit that may miss the hero never attacks
//! it inside the search, so a reported line wins whatever the RNG does.

use std::time::Instant;

use rustc_hash::FxHashSet;

use crate::cards::{CardCatalog, CardId, Keywords, Unit};
use crate::core::{GameResult, GameState, Intent, PlayerId, TargetRef};
use crate::rules::RulesEngine;

use super::stats::SearchStats;

/// Find a sequence of intents that wins this turn.
///
/// Returns `None` if no sequence of at most `depth` intents kills the
/// enemy hero, or the deadline passes first.
pub fn find_lethal<E: RulesEngine>(
    engine: &E,
    state: &GameState,
    player: PlayerId,
    depth: u32,
    deadline: Instant,
    stats: &mut SearchStats,
) -> Option<Vec<Intent>> {
    let mut path = Vec::new();
    if dfs(engine, state, player, depth, deadline, stats, &mut path) && !path.is_empty() {
        Some(path)
    } else {
        None
    }
}

fn dfs<E: RulesEngine>(
    engine: &E,
    state: &GameState,
    player: PlayerId,
    depth: u32,
    deadline: Instant,
    stats: &mut SearchStats,
    path: &mut Vec<Intent>,
) -> bool {
    if let Some(result) = state.outcome {
        return result == GameResult::Winner(player);
    }
    if depth == 0 || Instant::now() >= deadline {
        return false;
    }
    let enemy_health = state.player(player.opponent()).hero.health;
    if damage_ceiling(state, engine.catalog(), player) < enemy_health {
        return false;
    }

    for intent in candidates(engine, state, player) {
        stats.lethal_nodes += 1;
        let Ok(res) = engine.apply(state, player, &intent) else {
            continue;
        };
        path.push(intent);
        if dfs(engine, &res.state, player, depth - 1, deadline, stats, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// An upper bound on the face damage `player` can still deal this turn.
///
/// Ignores mana and Taunt. Counts one extra point per attack for units
/// that grow as they swing, and one per spell in hand for units that grow
/// on spells. Units that may miss count for nothing.
#[must_use]
pub fn damage_ceiling(state: &GameState, catalog: &CardCatalog, player: PlayerId) -> i32 {
    let me = state.player(player);
    let is_spell = |card: CardId| catalog.get(card).is_some_and(|d| d.is_spell());
    let spells_in_hand = me.hand.iter().filter(|c| is_spell(c.card)).count() as i32;

    let attacks: i32 = me
        .field
        .iter()
        .filter(|u| u.can_attack && !u.frozen && !u.is_dead())
        .filter(|u| u.keywords.blind_chance == 0)
        .map(|u| {
            let swings = i32::from(u.max_attacks().saturating_sub(u.attacks_made));
            let mut per_swing = u.attack.max(0) + u.keywords.hero_damage_bonus.max(0) + 1;
            if u.keywords.grows_on_spell {
                per_swing += spells_in_hand;
            }
            per_swing * swings
        })
        .sum();

    let spells: i32 = me
        .hand
        .iter()
        .filter_map(|c| catalog.get(c.card))
        .map(|d| d.burn.face + d.burn.targeted)
        .sum();

    let ability = if me.hero.has_used_ability {
        0
    } else {
        me.hero.ability.face_damage()
    };

    attacks + spells + ability
}

/// Everything about a unit that lethal search can tell apart.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct UnitKey {
    card: CardId,
    attack: i32,
    health: i32,
    max_health: i32,
    attacks_made: u8,
    frozen: bool,
    taunt: bool,
    divine_shield: bool,
    keywords: Keywords,
}

impl UnitKey {
    fn of(unit: &Unit) -> Self {
        Self {
            card: unit.card,
            attack: unit.attack,
            health: unit.health,
            max_health: unit.max_health,
            attacks_made: unit.attacks_made,
            frozen: unit.frozen,
            taunt: unit.taunt,
            divine_shield: unit.divine_shield,
            keywords: unit.keywords,
        }
    }
}

#[derive(PartialEq, Eq, Hash)]
enum Aim {
    Hero,
    Unit(UnitKey),
    Untargeted,
}

#[derive(PartialEq, Eq, Hash)]
enum Choice {
    Attack(UnitKey, Aim),
    Spell(CardId, Aim),
}

/// Damage-relevant legal intents, in search order, one per distinct choice.
fn candidates<E: RulesEngine>(engine: &E, state: &GameState, player: PlayerId) -> Vec<Intent> {
    let catalog = engine.catalog();
    let enemy = player.opponent();
    let taunt = state.player(enemy).has_taunt();
    let taunt_key = |index: usize| {
        state
            .unit(enemy, index)
            .filter(|u| taunt && u.taunt)
            .map(UnitKey::of)
    };
    let me = state.player(player);
    let weaver_ready = me.field.iter().any(|u| u.keywords.grows_on_spell && u.can_attack);

    let mut seen = FxHashSet::default();
    let mut attacks = Vec::new();
    let mut spells = Vec::new();
    let mut abilities = Vec::new();

    for intent in engine.legal_intents(state, player) {
        match intent {
            Intent::Attack { attacker_index, target_index, is_hero_target } => {
                let Some(unit) = state.unit(player, attacker_index) else {
                    continue;
                };
                let aim = if is_hero_target {
                    if unit.keywords.blind_chance > 0 {
                        continue;
                    }
                    Aim::Hero
                } else {
                    match target_index.and_then(taunt_key) {
                        Some(key) => Aim::Unit(key),
                        None => continue,
                    }
                };
                if seen.insert(Choice::Attack(UnitKey::of(unit), aim)) {
                    attacks.push(intent);
                }
            }
            Intent::PlayCard { card_index, target, .. } => {
                let Some(def) = me.hand.get(card_index).and_then(|c| catalog.get(c.card)) else {
                    continue;
                };
                if !def.is_spell() {
                    continue;
                }
                let burns = def.burn.targeted > 0;
                let aim = match target {
                    None if def.burn.face > 0 || weaver_ready => Aim::Untargeted,
                    Some(TargetRef::Hero { owner }) if owner == enemy && burns => Aim::Hero,
                    Some(TargetRef::Unit { owner, index }) if owner == enemy && burns => {
                        match taunt_key(index) {
                            Some(key) => Aim::Unit(key),
                            None => continue,
                        }
                    }
                    _ => continue,
                };
                if seen.insert(Choice::Spell(def.id, aim)) {
                    spells.push(intent);
                }
            }
            Intent::UseHeroAbility if me.hero.ability.face_damage() > 0 => {
                abilities.push(intent);
            }
            _ => {}
        }
    }

    attacks.extend(spells);
    attacks.extend(abilities);
    attacks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ids;
    use crate::core::{HeroAbility, HeroDescriptor, MatchConfig};
    use crate::rules::ActionEngine;
    use std::time::Duration;

    fn setup(ability: HeroAbility) -> (ActionEngine, GameState) {
        let hero = HeroDescriptor::new("Hero", ability);
        (ActionEngine::standard(), GameState::new(MatchConfig::default(), [&hero, &hero]))
    }

    fn ready(state: &mut GameState, engine: &ActionEngine, card: CardId) {
        let slot = state.summon(PlayerId::FIRST, card, None, engine.catalog()).unwrap();
        state.unit_mut(PlayerId::FIRST, slot).unwrap().ready_for_turn();
    }

    fn deadline() -> Instant {
        Instant::now() + Duration::from_secs(5)
    }

    fn search(
        engine: &ActionEngine,
        state: &GameState,
        stats: &mut SearchStats,
    ) -> Option<Vec<Intent>> {
        find_lethal(engine, state, PlayerId::FIRST, 8, deadline(), stats)
    }

    #[test]
    fn test_two_attacks_are_lethal() {
        let (engine, mut state) = setup(HeroAbility::LesserHeal);
        ready(&mut state, &engine, ids::RIVER_RAPTOR);
        ready(&mut state, &engine, ids::RIVER_RAPTOR);
        state.player_mut(PlayerId::SECOND).hero.health = 6;

        let mut stats = SearchStats::new();
        let path = search(&engine, &state, &mut stats).unwrap();
        assert_eq!(path, vec![Intent::attack_hero(0), Intent::attack_hero(1)]);
    }

    #[test]
    fn test_ceiling_prunes_hopeless_turns() {
        let (engine, mut state) = setup(HeroAbility::Fireblast);
        ready(&mut state, &engine, ids::RIVER_RAPTOR);

        assert_eq!(damage_ceiling(&state, engine.catalog(), PlayerId::FIRST), 5);
        let mut stats = SearchStats::new();
        assert!(search(&engine, &state, &mut stats).is_none());
        assert_eq!(stats.lethal_nodes, 0);
    }

    #[test]
    fn test_burn_and_ability_complete_lethal() {
        let (engine, mut state) = setup(HeroAbility::SteadyShot);
        state.give_card(PlayerId::FIRST, ids::FIREBOLT, engine.catalog());
        state.player_mut(PlayerId::FIRST).mana = 3;
        state.player_mut(PlayerId::SECOND).hero.health = 5;

        let mut stats = SearchStats::new();
        let path = search(&engine, &state, &mut stats).unwrap();
        assert_eq!(
            path,
            vec![
                Intent::play_targeted(0, TargetRef::hero(PlayerId::SECOND)),
                Intent::UseHeroAbility
            ]
        );
    }

    #[test]
    fn test_attacks_through_taunt() {
        let (engine, mut state) = setup(HeroAbility::LesserHeal);
        ready(&mut state, &engine, ids::OGRE_BRUTE);
        ready(&mut state, &engine, ids::RIVER_RAPTOR);
        state.summon(PlayerId::SECOND, ids::SHIELDBEARER, None, engine.catalog());
        state.player_mut(PlayerId::SECOND).hero.health = 3;

        let mut stats = SearchStats::new();
        let path = search(&engine, &state, &mut stats).unwrap();
        assert_eq!(path, vec![Intent::attack_unit(0, 0), Intent::attack_hero(1)]);
    }

    #[test]
    fn test_spell_growth_counts_toward_lethal() {
        let (engine, mut state) = setup(HeroAbility::LesserHeal);
        ready(&mut state, &engine, ids::SPELLWEAVER);
        state.give_card(PlayerId::FIRST, ids::FIREBOLT, engine.catalog());
        state.give_card(PlayerId::FIRST, ids::FIREBOLT, engine.catalog());
        state.player_mut(PlayerId::FIRST).mana = 4;
        state.player_mut(PlayerId::SECOND).hero.health = 9;

        assert!(damage_ceiling(&state, engine.catalog(), PlayerId::FIRST) >= 9);
        let mut stats = SearchStats::new();
        let path = search(&engine, &state, &mut stats).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some(&Intent::attack_hero(0)));
    }

    #[test]
    fn test_blind_attacker_is_never_counted() {
        let (engine, mut state) = setup(HeroAbility::LesserHeal);
        ready(&mut state, &engine, ids::BLIND_OGRE);
        state.player_mut(PlayerId::SECOND).hero.health = 5;

        assert_eq!(damage_ceiling(&state, engine.catalog(), PlayerId::FIRST), 0);
        let mut stats = SearchStats::new();
        assert!(search(&engine, &state, &mut stats).is_none());
    }

    #[test]
    fn test_identical_attackers_are_searched_once() {
        let (engine, mut state) = setup(HeroAbility::LesserHeal);
        for _ in 0..7 {
            ready(&mut state, &engine, ids::RIVER_RAPTOR);
            state.summon(PlayerId::SECOND, ids::SHIELDBEARER, None, engine.catalog());
        }
        state.player_mut(PlayerId::SECOND).hero.health = 12;

        let choices = candidates(&engine, &state, PlayerId::FIRST);
        assert_eq!(choices, vec![Intent::attack_unit(0, 0)]);
        let mut stats = SearchStats::new();
        assert!(search(&engine, &state, &mut stats).is_none());
        assert!(stats.lethal_nodes <= 8);
    }
}
