//! The action engine.
//!
//! `ActionEngine::apply` is the only way match state changes. It takes the
//! current state by reference, resolves the intent against a clone, and
//! returns the clone with its log, notification and outcome. A rejected
//! intent returns an error and the caller keeps the state it had.
//!
//! ## Intents
//!
//! - `PlayCard`: pay mana, leave the hand, then land the unit, cast the
//!   spell or arm the secret. Secrets of the opponent may react first.
//! - `Attack`: validate, consult secrets, hand over to `combat`.
//! - `UseHeroAbility`: once per turn, for the hero's ability cost.
//! - `EndTurn`: thaw, pass the turn, grow and refill mana, ready units,
//!   turn-start handlers, draw.
//!
//! Every accepted intent ends with a death sweep and the win check.

use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::cards::{CardBody, CardCatalog, CardId, Unit};
use crate::combat::{resolve_attack, sweep_deaths, validate_attack};
use crate::core::{
    GameResult, GameState, HeroDescriptor, Intent, IntentRecord, LogEntry, MatchConfig,
    Notification, PlayerId, TargetRef,
};
use crate::effects::{ability_precheck, EffectContext, EffectRegistry, PlayInfo};
use crate::error::{EngineError, IllegalAction, Result};
use crate::secrets::{SecretBook, SecretEvent, SecretOutcome, SecretResolver};

use super::legal::{legal_intents, validate_target};
use super::setup::new_match;

/// What an accepted intent produced.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// The next authoritative state.
    pub state: GameState,
    /// Display-ready log lines, in order.
    pub log: Vec<LogEntry>,
    pub notification: Option<Notification>,
    /// Set once either hero has fallen.
    pub outcome: Option<GameResult>,
}

impl Resolution {
    fn from_state(state: GameState) -> Self {
        Self {
            log: state.log.iter().cloned().collect(),
            notification: state.notification.clone(),
            outcome: state.outcome,
            state,
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }
}

/// The seam between rules and whoever drives them (sessions, the AI).
pub trait RulesEngine {
    /// Resolve one intent. The input state is never modified.
    fn apply(&self, state: &GameState, player: PlayerId, intent: &Intent) -> Result<Resolution>;

    /// Every intent `apply` would accept right now.
    fn legal_intents(&self, state: &GameState, player: PlayerId) -> Vec<Intent>;

    fn catalog(&self) -> &CardCatalog;

    /// Build the opening state for a new match.
    fn new_match(
        &self,
        decks: [&[CardId]; 2],
        heroes: [&HeroDescriptor; 2],
        config: MatchConfig,
    ) -> Result<GameState>;

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.outcome
    }
}

/// Rules for one card set: catalogue, effect handlers and secret resolver.
///
/// ## Example
///
/// ```
/// use hearthfire::cards::ids;
/// use hearthfire::core::{HeroAbility, HeroDescriptor, Intent, MatchConfig, PlayerId};
/// use hearthfire::rules::{ActionEngine, RulesEngine};
///
/// let engine = ActionEngine::standard();
/// let hero = HeroDescriptor::new("Jaina", HeroAbility::Fireblast);
/// let deck = vec![ids::RIVER_RAPTOR; 20];
///
/// let state = engine
///     .new_match([&deck, &deck], [&hero, &hero], MatchConfig::default())
///     .unwrap();
/// let next = engine.apply(&state, PlayerId::FIRST, &Intent::EndTurn).unwrap();
/// assert_eq!(next.state.current, PlayerId::SECOND);
/// ```
#[derive(Clone)]
pub struct ActionEngine {
    catalog: CardCatalog,
    effects: EffectRegistry,
    secrets: Arc<dyn SecretResolver>,
}

impl fmt::Debug for ActionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionEngine")
            .field("cards", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

impl ActionEngine {
    /// Create an engine with the given cards, handlers and the built-in secrets.
    #[must_use]
    pub fn new(catalog: CardCatalog, effects: EffectRegistry) -> Self {
        Self {
            catalog,
            effects,
            secrets: Arc::new(SecretBook::standard()),
        }
    }

    /// The built-in card set.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(CardCatalog::standard(), EffectRegistry::standard())
    }

    /// Replace the secret resolver.
    #[must_use]
    pub fn with_secrets(mut self, secrets: impl SecretResolver + 'static) -> Self {
        self.secrets = Arc::new(secrets);
        self
    }

    #[must_use]
    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    /// Set up a fresh match. See `rules::setup::new_match`.
    pub fn new_match(
        &self,
        decks: [&[CardId]; 2],
        heroes: [&HeroDescriptor; 2],
        config: MatchConfig,
    ) -> Result<GameState> {
        new_match(&self.catalog, decks, heroes, config)
    }

    // === Intents ===

    fn play_card(
        &self,
        state: &mut GameState,
        player: PlayerId,
        card_index: usize,
        target: Option<TargetRef>,
        destination: Option<usize>,
    ) -> Result<()> {
        let card = state
            .player(player)
            .hand
            .get(card_index)
            .cloned()
            .ok_or(IllegalAction::InvalidCardIndex(card_index))?;
        let def = self.catalog.get(card.card).ok_or(EngineError::UnknownCard(card.card))?;

        let available = state.player(player).mana;
        if card.cost > available {
            return Err(IllegalAction::InsufficientMana { required: card.cost, available }.into());
        }
        match def.body {
            CardBody::Unit { .. } => {
                if state.player(player).field.len() >= state.config.max_field {
                    return Err(IllegalAction::FieldFull.into());
                }
            }
            CardBody::Spell { target: rule } => validate_target(state, player, rule, target)?,
            CardBody::Secret { .. } => {
                if state.player(player).armed_secrets().any(|s| s.card == card.card) {
                    return Err(IllegalAction::SecretAlreadyArmed.into());
                }
            }
        }

        let p = state.player_mut(player);
        p.mana -= card.cost;
        p.hand.remove(card_index);

        let name = self.catalog.name(card.card);
        let mut ctx = EffectContext::new(state, &self.catalog, player);
        match def.body {
            CardBody::Unit { .. } => {
                let unit = Unit::from_definition(card.id, def)
                    .ok_or_else(|| {
                        EngineError::Invariant(format!("{} has no unit body", card.card))
                    })?;
                let slot = ctx.state.place_unit(player, unit, destination);
                ctx.log(format!("{} plays {}", player, name));

                let outcome = self.intercept(&mut ctx, SecretEvent::UnitPlayed { slot });
                if !outcome.is_cancel() && ctx.state.check_game_over().is_none() {
                    let info = PlayInfo { card: card.card, slot: Some(slot), target };
                    self.effects.run_on_play(&mut ctx, &info);
                }
            }
            CardBody::Spell { .. } => {
                ctx.log(format!("{} casts {}", player, name));

                let event = SecretEvent::SpellPlayed { card: card.card };
                let outcome = self.intercept(&mut ctx, event);
                if !outcome.is_cancel() && ctx.state.check_game_over().is_none() {
                    let info = PlayInfo { card: card.card, slot: None, target };
                    self.effects.run_on_play(&mut ctx, &info);
                    self.effects.run_spell_cast(&mut ctx);
                }
            }
            CardBody::Secret { trigger } => {
                ctx.state.arm_secret(player, card.id, card.card, trigger);
                ctx.log(format!("{} arms a secret", player));
            }
        }

        sweep_deaths(&mut ctx, &self.effects);
        Ok(())
    }

    fn attack(
        &self,
        state: &mut GameState,
        player: PlayerId,
        attacker: usize,
        target: Option<usize>,
        is_hero_target: bool,
    ) -> Result<()> {
        validate_attack(state, player, attacker, target, is_hero_target)?;
        let mut defender = if is_hero_target { None } else { target };

        let mut ctx = EffectContext::new(state, &self.catalog, player);
        let outcome = self.intercept(&mut ctx, SecretEvent::Attack { attacker, defender });
        // A secret that kills a hero ends the match before the swing lands.
        if ctx.state.check_game_over().is_some() {
            sweep_deaths(&mut ctx, &self.effects);
            return Ok(());
        }
        match outcome {
            SecretOutcome::Cancel => {
                if let Some(unit) = ctx.unit_mut(player, attacker) {
                    unit.attacks_made = unit.attacks_made.saturating_add(1);
                }
                ctx.log("The attack is stopped");
                sweep_deaths(&mut ctx, &self.effects);
                return Ok(());
            }
            SecretOutcome::Redirect(slot) => defender = Some(slot),
            SecretOutcome::Continue => {}
        }

        resolve_attack(&mut ctx, &self.effects, attacker, defender);
        Ok(())
    }

    fn use_hero_ability(&self, state: &mut GameState, player: PlayerId) -> Result<()> {
        let p = state.player(player);
        if p.hero.has_used_ability {
            return Err(IllegalAction::AbilityAlreadyUsed.into());
        }
        let (ability, cost, available) = (p.hero.ability, p.hero.ability_cost, p.mana);
        if cost > available {
            return Err(IllegalAction::InsufficientMana { required: cost, available }.into());
        }
        ability_precheck(state, player, ability)?;
        let handler = self
            .effects
            .ability_handler(ability)
            .ok_or_else(|| EngineError::Invariant(format!("no handler for {:?}", ability)))?;

        let p = state.player_mut(player);
        p.mana -= cost;
        p.hero.has_used_ability = true;

        let mut ctx = EffectContext::new(state, &self.catalog, player);
        handler(&mut ctx);
        sweep_deaths(&mut ctx, &self.effects);
        Ok(())
    }

    fn end_turn(&self, state: &mut GameState, player: PlayerId) {
        for unit in state.player_mut(player).field.iter_mut() {
            unit.end_owner_turn();
        }
        state.log(player, format!("{} ends the turn", player));

        let next = player.opponent();
        state.current = next;
        state.turn += 1;

        let cap = state.config.max_mana;
        let p = state.player_mut(next);
        p.max_mana = p.max_mana.saturating_add(1).min(cap);
        p.mana = p.max_mana;
        p.hero.has_used_ability = false;
        for unit in p.field.iter_mut() {
            unit.ready_for_turn();
        }

        let mut ctx = EffectContext::new(state, &self.catalog, next);
        self.effects.run_turn_start(&mut ctx);
        ctx.draw(next);
        sweep_deaths(&mut ctx, &self.effects);
    }

    /// Hand an event to the defending player's secrets.
    fn intercept(&self, ctx: &mut EffectContext<'_>, event: SecretEvent) -> SecretOutcome {
        let defender = ctx.opponent();
        let mut dctx = ctx.for_player(defender);
        self.secrets.intercept(&mut dctx, &event)
    }
}

impl RulesEngine for ActionEngine {
    fn apply(&self, state: &GameState, player: PlayerId, intent: &Intent) -> Result<Resolution> {
        if state.is_over() {
            return Err(IllegalAction::GameAlreadyOver.into());
        }
        if player != state.current {
            if *intent == Intent::EndTurn {
                // Ending someone else's turn is ignored, not rejected.
                debug!("{} tried to end {}'s turn", player, state.current);
                let mut same = state.clone();
                same.begin_intent();
                return Ok(Resolution::from_state(same));
            }
            return Err(IllegalAction::NotYourTurn.into());
        }

        let mut next = state.clone();
        next.begin_intent();
        match *intent {
            Intent::PlayCard { card_index, target, destination_index } => {
                self.play_card(&mut next, player, card_index, target, destination_index)?;
            }
            Intent::Attack { attacker_index, target_index, is_hero_target } => {
                self.attack(&mut next, player, attacker_index, target_index, is_hero_target)?;
            }
            Intent::UseHeroAbility => self.use_hero_ability(&mut next, player)?,
            Intent::EndTurn => self.end_turn(&mut next, player),
        }

        debug!("turn {}: {} {} ({} log lines)", state.turn, player, intent.verb(), next.log.len());
        next.history.push_back(IntentRecord {
            player,
            intent: intent.clone(),
            turn: state.turn,
        });
        if let Some(result) = next.check_game_over() {
            info!("match over after turn {}: {:?}", next.turn, result);
        }
        Ok(Resolution::from_state(next))
    }

    fn legal_intents(&self, state: &GameState, player: PlayerId) -> Vec<Intent> {
        legal_intents(state, &self.catalog, player)
    }

    fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    fn new_match(
        &self,
        decks: [&[CardId]; 2],
        heroes: [&HeroDescriptor; 2],
        config: MatchConfig,
    ) -> Result<GameState> {
        ActionEngine::new_match(self, decks, heroes, config)
    }
}
