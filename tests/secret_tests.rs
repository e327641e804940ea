//! Secret integration tests.
//!
//! Secrets armed through real card plays, fired by the opponent's
//! actions, and checked through the redacted views.

use hearthfire::cards::{ids, CardId, SecretTrigger};
use hearthfire::core::{
    GameResult, GameState, HeroAbility, HeroDescriptor, Intent, MatchConfig, PlayerId, TargetRef,
};
use hearthfire::effects::EffectContext;
use hearthfire::rules::{view_for, ActionEngine, RulesEngine};
use hearthfire::secrets::{SecretBook, SecretEvent, SecretOutcome, SecretResolver};

fn start() -> (ActionEngine, GameState) {
    let engine = ActionEngine::standard();
    let hero = HeroDescriptor::new("Rexxar", HeroAbility::SteadyShot);
    let deck = [ids::RECRUIT; 10];
    let config = MatchConfig::default().with_coin(false).with_opening_hands(0, 0);
    let state = engine.new_match([&deck, &deck], [&hero, &hero], config).unwrap();
    (engine, state)
}

/// Arm `card` for the second player directly.
fn arm(state: &mut GameState, card: CardId, trigger: SecretTrigger) {
    let id = state.alloc_instance();
    state.arm_secret(PlayerId::SECOND, id, card, trigger);
}

fn ready(state: &mut GameState, engine: &ActionEngine, card: CardId) -> usize {
    let slot = state.summon(PlayerId::FIRST, card, None, engine.catalog()).unwrap();
    state.unit_mut(PlayerId::FIRST, slot).unwrap().ready_for_turn();
    slot
}

// =============================================================================
// Arming and Hiding
// =============================================================================

#[test]
fn test_armed_secret_is_hidden_until_it_fires() {
    let (engine, state) = start();
    let mut state = engine.apply(&state, PlayerId::FIRST, &Intent::EndTurn).unwrap().state;
    state.give_card(PlayerId::SECOND, ids::COUNTERSPELL, engine.catalog());
    state.player_mut(PlayerId::SECOND).mana = 3;

    let state = engine.apply(&state, PlayerId::SECOND, &Intent::play(1)).unwrap().state;
    assert_eq!(state.player(PlayerId::SECOND).armed_secrets().count(), 1);

    let view = view_for(&state, PlayerId::FIRST);
    assert_eq!(view.opponent.hidden_secrets, 1);
    assert!(view.opponent.revealed_secrets.is_empty());
    let json = serde_json::to_string(&view.opponent).unwrap();
    assert!(!json.contains("spell_played"));

    // Next turn the first player's spell is countered
    let mut state = engine.apply(&state, PlayerId::SECOND, &Intent::EndTurn).unwrap().state;
    state.give_card(PlayerId::FIRST, ids::FIREBOLT, engine.catalog());
    let last = state.player(PlayerId::FIRST).hand.len() - 1;
    let intent = Intent::play_targeted(last, TargetRef::hero(PlayerId::SECOND));
    let res = engine.apply(&state, PlayerId::FIRST, &intent).unwrap();

    assert_eq!(res.state.player(PlayerId::SECOND).hero.health, 30);
    assert!(res.log.iter().any(|e| e.text.contains("Counterspell")));
    let view = view_for(&res.state, PlayerId::FIRST);
    assert_eq!(view.opponent.hidden_secrets, 0);
    assert_eq!(view.opponent.revealed_secrets, vec![ids::COUNTERSPELL]);
}

// =============================================================================
// Attack Secrets
// =============================================================================

#[test]
fn test_vaporize_destroys_hero_attacker() {
    let (engine, mut state) = start();
    ready(&mut state, &engine, ids::OGRE_BRUTE);
    arm(&mut state, ids::VAPORIZE, SecretTrigger::HeroAttack);

    let res = engine.apply(&state, PlayerId::FIRST, &Intent::attack_hero(0)).unwrap();
    assert!(res.state.player(PlayerId::FIRST).field.is_empty());
    assert_eq!(res.state.player(PlayerId::SECOND).hero.health, 30);
    assert_eq!(res.state.deaths, 1);
}

#[test]
fn test_vaporize_ignores_unit_attacks() {
    let (engine, mut state) = start();
    ready(&mut state, &engine, ids::RIVER_RAPTOR);
    state.summon(PlayerId::SECOND, ids::RECRUIT, None, engine.catalog());
    arm(&mut state, ids::VAPORIZE, SecretTrigger::HeroAttack);

    let res = engine.apply(&state, PlayerId::FIRST, &Intent::attack_unit(0, 0)).unwrap();
    assert_eq!(res.state.player(PlayerId::FIRST).field.len(), 1);
    assert_eq!(res.state.player(PlayerId::SECOND).armed_secrets().count(), 1);
}

#[test]
fn test_explosive_trap_kills_attacker_first() {
    let (engine, mut state) = start();
    ready(&mut state, &engine, ids::RIVER_RAPTOR);
    arm(&mut state, ids::EXPLOSIVE_TRAP, SecretTrigger::HeroAttack);

    let res = engine.apply(&state, PlayerId::FIRST, &Intent::attack_hero(0)).unwrap();
    assert!(res.state.player(PlayerId::FIRST).field.is_empty());
    assert_eq!(res.state.player(PlayerId::FIRST).hero.health, 28);
    assert_eq!(res.state.player(PlayerId::SECOND).hero.health, 30);
}

/// The trap kills the attacking player's hero before the swing, so the
/// defender wins outright instead of trading to a draw.
#[test]
fn test_explosive_trap_ends_match_before_swing() {
    let (engine, mut state) = start();
    ready(&mut state, &engine, ids::OGRE_BRUTE);
    arm(&mut state, ids::EXPLOSIVE_TRAP, SecretTrigger::HeroAttack);
    state.player_mut(PlayerId::FIRST).hero.health = 2;
    state.player_mut(PlayerId::SECOND).hero.health = 3;

    let res = engine.apply(&state, PlayerId::FIRST, &Intent::attack_hero(0)).unwrap();
    assert_eq!(res.state.outcome, Some(GameResult::Winner(PlayerId::SECOND)));
    assert_eq!(res.state.player(PlayerId::FIRST).hero.health, 0);
    assert_eq!(res.state.player(PlayerId::SECOND).hero.health, 3);
}

#[test]
fn test_noble_sacrifice_redirects() {
    let (engine, mut state) = start();
    ready(&mut state, &engine, ids::OGRE_BRUTE);
    arm(&mut state, ids::NOBLE_SACRIFICE, SecretTrigger::HeroAttack);

    let res = engine.apply(&state, PlayerId::FIRST, &Intent::attack_hero(0)).unwrap();
    assert_eq!(res.state.player(PlayerId::SECOND).hero.health, 30);
    assert!(res.state.player(PlayerId::SECOND).field.is_empty());
    // The 2/1 defender hit back
    assert_eq!(res.state.unit(PlayerId::FIRST, 0).unwrap().health, 5);
}

#[test]
fn test_first_armed_secret_wins() {
    let (engine, mut state) = start();
    ready(&mut state, &engine, ids::OGRE_BRUTE);
    arm(&mut state, ids::NOBLE_SACRIFICE, SecretTrigger::HeroAttack);
    arm(&mut state, ids::VAPORIZE, SecretTrigger::HeroAttack);

    let res = engine.apply(&state, PlayerId::FIRST, &Intent::attack_hero(0)).unwrap();
    let second = res.state.player(PlayerId::SECOND);
    assert!(second.secrets[0].is_revealed);
    assert!(!second.secrets[1].is_revealed);
    // Vaporize did not fire: the Ogre survives
    assert_eq!(res.state.player(PlayerId::FIRST).field.len(), 1);
}

// =============================================================================
// Unit Secrets
// =============================================================================

#[test]
fn test_snipe_hits_played_unit() {
    let (engine, mut state) = start();
    state.give_card(PlayerId::FIRST, ids::OGRE_BRUTE, engine.catalog());
    state.player_mut(PlayerId::FIRST).mana = 6;
    arm(&mut state, ids::SNIPE, SecretTrigger::UnitPlayed);

    let res = engine.apply(&state, PlayerId::FIRST, &Intent::play(0)).unwrap();
    assert_eq!(res.state.unit(PlayerId::FIRST, 0).unwrap().health, 3);
}

#[test]
fn test_mirror_entity_copies() {
    let (engine, mut state) = start();
    state.give_card(PlayerId::FIRST, ids::RIVER_RAPTOR, engine.catalog());
    state.player_mut(PlayerId::FIRST).mana = 2;
    arm(&mut state, ids::MIRROR_ENTITY, SecretTrigger::UnitPlayed);

    let res = engine.apply(&state, PlayerId::FIRST, &Intent::play(0)).unwrap();
    assert_eq!(res.state.unit(PlayerId::SECOND, 0).unwrap().card, ids::RIVER_RAPTOR);
    assert_eq!(res.state.player(PlayerId::FIRST).field.len(), 1);
}

// =============================================================================
// Custom Resolvers
// =============================================================================

/// Cancels every opposing spell, armed or not.
struct Silence;

impl SecretResolver for Silence {
    fn intercept(&self, _ctx: &mut EffectContext<'_>, event: &SecretEvent) -> SecretOutcome {
        match event {
            SecretEvent::SpellPlayed { .. } => SecretOutcome::Cancel,
            _ => SecretOutcome::Continue,
        }
    }
}

#[test]
fn test_custom_resolver_plugs_in() {
    let engine = ActionEngine::standard().with_secrets(Silence);
    let (_, mut state) = start();
    state.give_card(PlayerId::FIRST, ids::FIREBOLT, engine.catalog());

    let intent = Intent::play_targeted(0, TargetRef::hero(PlayerId::SECOND));
    let res = engine.apply(&state, PlayerId::FIRST, &intent).unwrap();
    assert_eq!(res.state.player(PlayerId::SECOND).hero.health, 30);
    assert!(res.state.player(PlayerId::FIRST).hand.is_empty());
}

#[test]
fn test_empty_book_never_fires() {
    let engine = ActionEngine::standard().with_secrets(SecretBook::new());
    let (_, mut state) = start();
    ready(&mut state, &engine, ids::RIVER_RAPTOR);
    arm(&mut state, ids::VAPORIZE, SecretTrigger::HeroAttack);

    let res = engine.apply(&state, PlayerId::FIRST, &Intent::attack_hero(0)).unwrap();
    assert_eq!(res.state.player(PlayerId::SECOND).hero.health, 27);
    assert_eq!(res.state.player(PlayerId::SECOND).armed_secrets().count(), 1);
}
