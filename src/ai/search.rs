//! Time-boxed decision making.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::core::{GameRng, GameState, Intent, PlayerId};
use crate::error::Result;
use crate::rules::RulesEngine;

use super::config::AiConfig;
use super::evaluate::{evaluate, Archetype};
use super::lethal::find_lethal;
use super::stats::SearchStats;

/// Lethal search gets `1 / LETHAL_SHARE` of the time budget.
const LETHAL_SHARE: u64 = 2;

/// A computer opponent.
///
/// Each call to `choose_intent` picks one intent for the current position:
///
/// 1. Exact lethal: if some sequence of attacks, burn and hero ability
///    wins this turn, return its first step.
/// 2. Greedy: simulate every legal intent once and keep the one whose
///    resulting state scores best for the deck's archetype, if it beats
///    the current position. Otherwise end the turn.
///
/// Simulations run on forked copies of the state and never touch the
/// caller's. Lethal search may use half of the time budget. The greedy
/// pass checks the deadline between simulations but always scores at least
/// one candidate, so a late start still plays something sensible.
///
/// ## Example
///
/// ```
/// use hearthfire::ai::{AiConfig, AiPlayer};
/// use hearthfire::cards::ids;
/// use hearthfire::core::{HeroAbility, HeroDescriptor, Intent, MatchConfig, PlayerId};
/// use hearthfire::rules::ActionEngine;
///
/// let engine = ActionEngine::standard();
/// let hero = HeroDescriptor::new("Thrall", HeroAbility::Reinforce);
/// let deck = vec![ids::RIVER_RAPTOR; 10];
/// let state = engine
///     .new_match([&deck, &deck], [&hero, &hero], MatchConfig::default())
///     .unwrap();
///
/// let mut ai = AiPlayer::new(engine, AiConfig::default());
/// // Not the second player's turn yet
/// let intent = ai.choose_intent(&state, PlayerId::SECOND);
/// assert_eq!(intent, Intent::EndTurn);
/// ```
pub struct AiPlayer<E: RulesEngine> {
    engine: E,
    config: AiConfig,
    rng: GameRng,
    stats: SearchStats,
}

impl<E: RulesEngine> AiPlayer<E> {
    pub fn new(engine: E, config: AiConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            engine,
            config,
            rng,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Statistics from the most recent decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick one intent for `player`.
    ///
    /// Returns `EndTurn` when the game is over or it is not `player`'s turn.
    pub fn choose_intent(&mut self, state: &GameState, player: PlayerId) -> Intent {
        let start = Instant::now();
        let deadline = start + Duration::from_millis(self.config.time_budget_ms);
        self.stats.reset();

        if state.is_over() || state.current != player {
            return Intent::EndTurn;
        }

        let mut root = state.clone();
        root.rng = self.rng.fork();
        let sim = root.fork();

        let intent = match self.search(&sim, player, start, deadline) {
            Ok(intent) => intent,
            Err(err) => {
                warn!("AI simulation failed for {}: {}; using fallback", player, err);
                self.stats.fallback = true;
                fallback(&self.engine, state, player)
            }
        };

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            "AI {} chose {:?} ({} candidates, {} lethal nodes, {}us)",
            player, intent, self.stats.candidates, self.stats.lethal_nodes, self.stats.time_us
        );
        intent
    }

    fn search(
        &mut self,
        state: &GameState,
        player: PlayerId,
        start: Instant,
        deadline: Instant,
    ) -> Result<Intent> {
        let depth = self.config.lethal_depth;
        let share = Duration::from_millis(self.config.time_budget_ms / LETHAL_SHARE);
        let stats = &mut self.stats;
        let lethal = find_lethal(&self.engine, state, player, depth, start + share, stats);
        if let Some(first) = lethal.and_then(|path| path.into_iter().next()) {
            self.stats.lethal_found = true;
            return Ok(first);
        }

        let archetype = self.config.archetype.unwrap_or_else(|| {
            let deck = state.player(player).original_deck.iter().copied();
            Archetype::classify(deck, self.engine.catalog())
        });
        let weights = archetype.weights();
        let baseline = evaluate(state, player, &weights);

        let mut best: Option<(f64, Intent)> = None;
        for intent in self.engine.legal_intents(state, player) {
            if intent == Intent::EndTurn {
                continue;
            }
            if Instant::now() >= deadline {
                self.stats.deadline_hit = true;
                if best.is_some() {
                    break;
                }
            }

            self.stats.candidates += 1;
            let res = match self.engine.apply(state, player, &intent) {
                Ok(res) => res,
                Err(err) if err.is_fatal() => return Err(err),
                Err(_) => continue,
            };
            let score = evaluate(&res.state, player, &weights);
            if best.as_ref().map_or(true, |(b, _)| score > *b) {
                best = Some((score, intent));
            }
        }

        Ok(match best {
            Some((score, intent)) if score > baseline => intent,
            _ => Intent::EndTurn,
        })
    }
}

/// The simple heuristic used when simulation fails: the first affordable
/// card, else the first eligible attack, else end the turn.
#[must_use]
pub fn fallback<E: RulesEngine>(engine: &E, state: &GameState, player: PlayerId) -> Intent {
    let intents = engine.legal_intents(state, player);
    intents
        .iter()
        .find(|i| matches!(i, Intent::PlayCard { .. }))
        .or_else(|| intents.iter().find(|i| matches!(i, Intent::Attack { .. })))
        .cloned()
        .unwrap_or(Intent::EndTurn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ids, CardId};
    use crate::core::{HeroAbility, HeroDescriptor, MatchConfig};
    use crate::rules::ActionEngine;

    fn setup() -> (ActionEngine, GameState) {
        let hero = HeroDescriptor::new("Rexxar", HeroAbility::LesserHeal);
        (ActionEngine::standard(), GameState::new(MatchConfig::default(), [&hero, &hero]))
    }

    fn ready(state: &mut GameState, engine: &ActionEngine, card: CardId) {
        let slot = state.summon(PlayerId::FIRST, card, None, engine.catalog()).unwrap();
        state.unit_mut(PlayerId::FIRST, slot).unwrap().ready_for_turn();
    }

    #[test]
    fn test_not_my_turn_ends_turn() {
        let (engine, state) = setup();
        let mut ai = AiPlayer::new(engine, AiConfig::default());
        assert_eq!(ai.choose_intent(&state, PlayerId::SECOND), Intent::EndTurn);
    }

    #[test]
    fn test_plays_a_unit_when_it_can() {
        let (engine, mut state) = setup();
        state.give_card(PlayerId::FIRST, ids::RIVER_RAPTOR, engine.catalog());
        state.player_mut(PlayerId::FIRST).mana = 2;

        let mut ai = AiPlayer::new(engine, AiConfig::default());
        assert_eq!(ai.choose_intent(&state, PlayerId::FIRST), Intent::play(0));
        assert!(ai.stats().candidates >= 1);
        assert!(!ai.stats().lethal_found);
    }

    #[test]
    fn test_prefers_lethal() {
        let (engine, mut state) = setup();
        ready(&mut state, &engine, ids::RIVER_RAPTOR);
        ready(&mut state, &engine, ids::RIVER_RAPTOR);
        state.give_card(PlayerId::FIRST, ids::OGRE_BRUTE, engine.catalog());
        state.player_mut(PlayerId::FIRST).mana = 10;
        state.player_mut(PlayerId::SECOND).hero.health = 6;

        let mut ai = AiPlayer::new(engine, AiConfig::default());
        assert_eq!(ai.choose_intent(&state, PlayerId::FIRST), Intent::attack_hero(0));
        assert!(ai.stats().lethal_found);
    }

    #[test]
    fn test_caller_state_untouched() {
        let (engine, mut state) = setup();
        ready(&mut state, &engine, ids::RIVER_RAPTOR);
        let before = state.player(PlayerId::SECOND).hero.health;

        let mut ai = AiPlayer::new(engine, AiConfig::default());
        ai.choose_intent(&state, PlayerId::FIRST);

        assert_eq!(state.player(PlayerId::SECOND).hero.health, before);
        assert!(state.history.is_empty());
        assert!(state.log.is_empty());
    }

    #[test]
    fn test_fallback_order() {
        let (engine, mut state) = setup();
        assert_eq!(fallback(&engine, &state, PlayerId::FIRST), Intent::EndTurn);

        ready(&mut state, &engine, ids::RIVER_RAPTOR);
        assert_eq!(fallback(&engine, &state, PlayerId::FIRST), Intent::attack_hero(0));

        state.give_card(PlayerId::FIRST, ids::RECRUIT, engine.catalog());
        state.player_mut(PlayerId::FIRST).mana = 1;
        assert_eq!(fallback(&engine, &state, PlayerId::FIRST), Intent::play(0));
    }

    #[test]
    fn test_wide_board_still_attacks() {
        let (engine, mut state) = setup();
        for _ in 0..7 {
            ready(&mut state, &engine, ids::RIVER_RAPTOR);
            state.summon(PlayerId::SECOND, ids::SHIELDBEARER, None, engine.catalog());
        }
        state.player_mut(PlayerId::SECOND).hero.health = 12;

        let mut ai = AiPlayer::new(engine, AiConfig::default());
        let intent = ai.choose_intent(&state, PlayerId::FIRST);

        assert!(matches!(intent, Intent::Attack { is_hero_target: false, .. }), "{:?}", intent);
        assert!(ai.stats().candidates > 0);
        assert!(!ai.stats().lethal_found);
        assert!(!ai.stats().deadline_hit);
    }

    #[test]
    fn test_late_start_still_scores_one_candidate() {
        let (engine, mut state) = setup();
        ready(&mut state, &engine, ids::RIVER_RAPTOR);

        let mut ai = AiPlayer::new(engine, AiConfig::default().with_time_budget(0));
        assert_eq!(ai.choose_intent(&state, PlayerId::FIRST), Intent::attack_hero(0));
        assert!(ai.stats().deadline_hit);
        assert_eq!(ai.stats().candidates, 1);
    }
}
