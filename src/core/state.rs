//! Match state: heroes, players and the match as a whole.
//!
//! ## GameState
//!
//! The single unit of truth for one match. Hands, decks, fields and secrets
//! are `im` persistent vectors, so cloning a state shares structure with the
//! original. The engine clones, mutates the clone, and hands the clone back;
//! a rejected intent leaves the caller's state untouched.
//!
//! The helpers here are the primitive mutations every effect is built from
//! (damage, heal, draw, summon, freeze). They clamp hero health, enforce the
//! hand and field limits, and append to the pending log.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::MatchConfig;
use super::intent::IntentRecord;
use super::journal::{LogEntry, Notification};
use super::player::PlayerId;
use super::rng::GameRng;
use crate::cards::{CardCatalog, CardId, CardInstance, InstanceId, SecretTrigger, Unit};

/// The unique ability each hero can use once per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroAbility {
    /// Deal 1 damage to the enemy hero.
    Fireblast,
    /// Deal 2 damage to the enemy hero.
    SteadyShot,
    /// Restore 2 health to your hero.
    LesserHeal,
    /// Summon a 1/1 Recruit.
    Reinforce,
    /// Draw a card and take 2 damage.
    LifeTap,
}

impl HeroAbility {
    /// Damage this ability deals to the enemy hero, if any.
    #[must_use]
    pub const fn face_damage(self) -> i32 {
        match self {
            Self::Fireblast => 1,
            Self::SteadyShot => 2,
            _ => 0,
        }
    }
}

/// What persistence knows about a hero before the match starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroDescriptor {
    pub name: String,
    pub ability: HeroAbility,
}

impl HeroDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, ability: HeroAbility) -> Self {
        Self {
            name: name.into(),
            ability,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub ability: HeroAbility,
    pub ability_cost: u8,
    /// Reset at the start of each of the owner's turns.
    pub has_used_ability: bool,
}

impl Hero {
    #[must_use]
    pub fn new(descriptor: &HeroDescriptor, config: &MatchConfig) -> Self {
        Self {
            name: descriptor.name.clone(),
            health: config.max_hero_health,
            max_health: config.max_hero_health,
            ability: descriptor.ability,
            ability_cost: config.hero_ability_cost,
            has_used_ability: false,
        }
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// A secret sitting in a player's hidden zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmedSecret {
    pub instance: InstanceId,
    pub card: CardId,
    pub trigger: SecretTrigger,
    pub is_revealed: bool,
}

/// One seat's side of the match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub hero: Hero,

    /// Ordered hand.
    pub hand: Vector<CardInstance>,

    /// Ordered draw pile; the front is the top.
    pub deck: Vector<CardInstance>,

    /// Ordered board, left to right.
    pub field: Vector<Unit>,

    /// Secrets in arming order.
    pub secrets: Vector<ArmedSecret>,

    pub mana: u8,
    pub max_mana: u8,

    /// Damage taken by the last empty-deck draw; grows by one per draw.
    pub fatigue_damage: i32,

    /// The deck as loaded, for post-match bookkeeping.
    pub original_deck: Vector<CardId>,
}

impl Player {
    #[must_use]
    pub fn new(hero: Hero) -> Self {
        Self {
            hero,
            hand: Vector::new(),
            deck: Vector::new(),
            field: Vector::new(),
            secrets: Vector::new(),
            mana: 0,
            max_mana: 0,
            fatigue_damage: 0,
            original_deck: Vector::new(),
        }
    }

    /// Whether any unit on this side has Taunt.
    #[must_use]
    pub fn has_taunt(&self) -> bool {
        self.field.iter().any(|u| u.taunt)
    }

    /// Secrets that can still fire, in arming order.
    pub fn armed_secrets(&self) -> impl Iterator<Item = &ArmedSecret> {
        self.secrets.iter().filter(|s| !s.is_revealed)
    }
}

/// Final result of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// The two reachable phases of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    InProgress,
    GameOver,
}

/// Result of drawing one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn(CardId),
    /// Hand was full; the card was discarded.
    Burned(CardId),
    /// Deck was empty; the hero took this much fatigue damage.
    Fatigue(i32),
}

/// Complete state of one match.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: MatchConfig,

    players: [Player; 2],

    /// Whose turn it is.
    pub current: PlayerId,

    /// Turn counter (starts at 1, increments on every end of turn).
    pub turn: u32,

    pub outcome: Option<GameResult>,

    /// Units that have died this match (drives cost scaling).
    pub deaths: u32,

    /// Log entries produced by the intent being resolved.
    pub log: Vector<LogEntry>,

    /// At most one player-facing message per intent.
    pub notification: Option<Notification>,

    /// Accepted intents, oldest first.
    pub history: Vector<IntentRecord>,

    /// Deterministic RNG.
    pub rng: GameRng,

    next_instance: u32,
}

impl GameState {
    /// Create an empty match: both heroes at full health, no cards anywhere.
    ///
    /// `rules::setup` fills decks and hands.
    #[must_use]
    pub fn new(config: MatchConfig, heroes: [&HeroDescriptor; 2]) -> Self {
        Self {
            players: [
                Player::new(Hero::new(heroes[0], &config)),
                Player::new(Hero::new(heroes[1], &config)),
            ],
            current: PlayerId::FIRST,
            turn: 1,
            outcome: None,
            deaths: 0,
            log: Vector::new(),
            notification: None,
            history: Vector::new(),
            rng: GameRng::new(config.seed),
            next_instance: 1,
            config,
        }
    }

    /// Rebuild a state from stored parts (used by snapshots).
    #[must_use]
    pub(crate) fn from_parts(
        config: MatchConfig,
        players: [Player; 2],
        current: PlayerId,
        turn: u32,
        outcome: Option<GameResult>,
        deaths: u32,
        rng: GameRng,
        next_instance: u32,
    ) -> Self {
        Self {
            config,
            players,
            current,
            turn,
            outcome,
            deaths,
            log: Vector::new(),
            notification: None,
            history: Vector::new(),
            rng,
            next_instance,
        }
    }

    pub(crate) fn next_instance_raw(&self) -> u32 {
        self.next_instance
    }

    pub(crate) fn players_raw(&self) -> &[Player; 2] {
        &self.players
    }

    // === Access ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.outcome.is_some() {
            Phase::GameOver
        } else {
            Phase::InProgress
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Fork for a simulation branch: shares structure, forks the RNG,
    /// and starts with an empty log.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let mut copy = self.clone();
        copy.rng = self.rng.fork();
        copy.log = Vector::new();
        copy.notification = None;
        copy
    }

    /// Allocate a fresh instance handle.
    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    // === Log ===

    pub fn log(&mut self, player: PlayerId, text: impl Into<String>) {
        self.log.push_back(LogEntry::new(player, text));
    }

    /// Set the intent's notification. The first one set wins.
    pub fn notify(&mut self, player: PlayerId, message: impl Into<String>) {
        if self.notification.is_none() {
            self.notification = Some(Notification::new(player, message));
        }
    }

    /// Clear per-intent output before resolving a new intent.
    pub fn begin_intent(&mut self) {
        self.log = Vector::new();
        self.notification = None;
    }

    // === Heroes ===

    /// Damage a hero, clamping at 0. Returns health lost.
    pub fn damage_hero(&mut self, player: PlayerId, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let hero = &mut self.player_mut(player).hero;
        let before = hero.health;
        hero.health = (hero.health - amount).max(0);
        before - hero.health
    }

    /// Restore hero health, clamping at max. Returns health restored.
    pub fn heal_hero(&mut self, player: PlayerId, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let hero = &mut self.player_mut(player).hero;
        let before = hero.health;
        hero.health = (hero.health + amount).min(hero.max_health);
        hero.health - before
    }

    // === Mana ===

    /// Add mana for this turn only, capped at the crystal cap.
    pub fn gain_mana(&mut self, player: PlayerId, amount: u8) {
        let cap = self.config.max_mana;
        let p = self.player_mut(player);
        p.mana = p.mana.saturating_add(amount).min(cap);
    }

    // === Cards ===

    /// Draw the top card of `player`'s deck.
    ///
    /// An empty deck deals escalating fatigue damage. A full hand burns the
    /// drawn card and sets a notification.
    pub fn draw_card(&mut self, player: PlayerId, catalog: &CardCatalog) -> DrawOutcome {
        let max_hand = self.config.max_hand;
        let Some(card) = self.player_mut(player).deck.pop_front() else {
            let p = self.player_mut(player);
            p.fatigue_damage += 1;
            let damage = p.fatigue_damage;
            self.damage_hero(player, damage);
            self.log(player, format!("{} takes {} fatigue damage", player, damage));
            return DrawOutcome::Fatigue(damage);
        };

        let name = catalog.name(card.card).to_string();
        if self.player(player).hand.len() >= max_hand {
            self.log(player, format!("{}'s hand is full; {} was burned", player, name));
            self.notify(player, format!("Your hand is full. {} was burned.", name));
            return DrawOutcome::Burned(card.card);
        }

        let id = card.card;
        self.player_mut(player).hand.push_back(card);
        DrawOutcome::Drawn(id)
    }

    /// Put a new copy of `card` into `player`'s hand, if there is room.
    pub fn give_card(&mut self, player: PlayerId, card: CardId, catalog: &CardCatalog) -> bool {
        let Some(def) = catalog.get(card) else {
            return false;
        };
        if self.player(player).hand.len() >= self.config.max_hand {
            return false;
        }
        let instance = CardInstance::new(self.alloc_instance(), def);
        self.player_mut(player).hand.push_back(instance);
        true
    }

    /// Shuffle a new copy of `card` into a random position of the deck.
    pub fn shuffle_into_deck(
        &mut self,
        player: PlayerId,
        card: CardId,
        catalog: &CardCatalog,
    ) -> bool {
        let Some(def) = catalog.get(card) else {
            return false;
        };
        let instance = CardInstance::new(self.alloc_instance(), def);
        let len = self.player(player).deck.len();
        let pos = self.rng.below(len + 1);
        self.player_mut(player).deck.insert(pos, instance);
        true
    }

    /// Refresh scaled costs in both hands and decks after deaths change.
    pub fn refresh_costs(&mut self, catalog: &CardCatalog) {
        let deaths = self.deaths;
        for player in &mut self.players {
            for card in player.hand.iter_mut().chain(player.deck.iter_mut()) {
                if let Some(def) = catalog.get(card.card) {
                    card.cost = def.scaled_cost(deaths);
                }
            }
        }
    }

    /// Arm a secret face-down at the end of the player's secret zone.
    pub fn arm_secret(
        &mut self,
        player: PlayerId,
        instance: InstanceId,
        card: CardId,
        trigger: SecretTrigger,
    ) {
        self.player_mut(player).secrets.push_back(ArmedSecret {
            instance,
            card,
            trigger,
            is_revealed: false,
        });
    }

    // === Board ===

    /// Summon a fresh unit of `card` for `player` at `position` (clamped to
    /// the end of the field). Returns the slot, or `None` if the field is full.
    pub fn summon(
        &mut self,
        player: PlayerId,
        card: CardId,
        position: Option<usize>,
        catalog: &CardCatalog,
    ) -> Option<usize> {
        let def = catalog.get(card)?;
        if self.player(player).field.len() >= self.config.max_field {
            return None;
        }
        let unit = Unit::from_definition(self.alloc_instance(), def)?;
        Some(self.place_unit(player, unit, position))
    }

    /// Insert an existing unit. Caller checks the field limit.
    pub fn place_unit(&mut self, player: PlayerId, unit: Unit, position: Option<usize>) -> usize {
        let field = &mut self.player_mut(player).field;
        let slot = position.map_or(field.len(), |p| p.min(field.len()));
        field.insert(slot, unit);
        slot
    }

    #[must_use]
    pub fn unit(&self, player: PlayerId, index: usize) -> Option<&Unit> {
        self.player(player).field.get(index)
    }

    pub fn unit_mut(&mut self, player: PlayerId, index: usize) -> Option<&mut Unit> {
        self.player_mut(player).field.get_mut(index)
    }

    /// Deal one damage instance to a unit. Returns health lost.
    pub fn damage_unit(&mut self, player: PlayerId, index: usize, amount: i32) -> i32 {
        self.unit_mut(player, index).map_or(0, |u| u.take_damage(amount))
    }

    /// Freeze a uniformly random unit on `player`'s field. Returns its slot.
    pub fn freeze_random_unit(&mut self, player: PlayerId) -> Option<usize> {
        let candidates: Vec<usize> = self
            .player(player)
            .field
            .iter()
            .enumerate()
            .filter(|(_, u)| !u.is_dead())
            .map(|(i, _)| i)
            .collect();
        let pick = self.rng.pick_index(candidates.len())?;
        let slot = candidates[pick];
        if let Some(unit) = self.unit_mut(player, slot) {
            unit.freeze();
        }
        Some(slot)
    }

    /// Whether any unit on either side is at or below zero health.
    #[must_use]
    pub fn has_dead_units(&self) -> bool {
        self.players.iter().any(|p| p.field.iter().any(Unit::is_dead))
    }

    // === Win condition ===

    /// Record the outcome if either hero is dead. Returns the outcome.
    pub fn check_game_over(&mut self) -> Option<GameResult> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        let first_dead = self.player(PlayerId::FIRST).hero.is_dead();
        let second_dead = self.player(PlayerId::SECOND).hero.is_dead();
        let result = match (first_dead, second_dead) {
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(PlayerId::SECOND)),
            (false, true) => Some(GameResult::Winner(PlayerId::FIRST)),
            (false, false) => None,
        };
        if let Some(result) = result {
            self.outcome = Some(result);
            match result {
                GameResult::Winner(p) => self.log(p, format!("{} wins the match", p)),
                GameResult::Draw => self.log(self.current, "The match ends in a draw"),
            }
        }
        result
    }
}
