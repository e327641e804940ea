//! Deck archetypes and state scoring.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId, Unit};
use crate::core::{GameResult, GameState, PlayerId};

const WIN: f64 = 1_000_000.0;

/// How the AI reads its own deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Cheap units, go face.
    Aggro,
    Midrange,
    /// Expensive cards and spells; protect the hero, value the board.
    Control,
}

impl Archetype {
    /// Classify a deck by average cost and unit share.
    ///
    /// Average cost of at most 3 with at least 60% units is aggro; average
    /// cost of at least 4.5 or at least half non-units is control. An empty
    /// or unknown deck is midrange.
    #[must_use]
    pub fn classify(deck: impl IntoIterator<Item = CardId>, catalog: &CardCatalog) -> Self {
        let (mut count, mut units, mut cost) = (0u32, 0u32, 0u32);
        for def in deck.into_iter().filter_map(|id| catalog.get(id)) {
            count += 1;
            cost += u32::from(def.cost);
            if def.is_unit() {
                units += 1;
            }
        }
        if count == 0 {
            return Self::Midrange;
        }

        let avg = f64::from(cost) / f64::from(count);
        let unit_share = f64::from(units) / f64::from(count);
        if avg <= 3.0 && unit_share >= 0.6 {
            Self::Aggro
        } else if avg >= 4.5 || unit_share <= 0.5 {
            Self::Control
        } else {
            Self::Midrange
        }
    }

    #[must_use]
    pub fn weights(self) -> Weights {
        match self {
            Self::Aggro => Weights::new(1.6, 0.4, 0.9, 0.3, 1.0),
            Self::Midrange => Weights::new(1.0, 0.8, 1.1, 0.5, 1.5),
            Self::Control => Weights::new(0.6, 1.2, 1.2, 0.8, 2.0),
        }
    }
}

/// Scoring weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Per point of damage on the enemy hero.
    pub face: f64,
    /// Per point of own hero health.
    pub health: f64,
    /// Per point of board value difference.
    pub board: f64,
    /// Per card of hand size difference.
    pub hand: f64,
    /// Per own secret still armed.
    pub secrets: f64,
}

impl Weights {
    const fn new(face: f64, health: f64, board: f64, hand: f64, secrets: f64) -> Self {
        Self { face, health, board, hand, secrets }
    }
}

/// Rough worth of one unit on the board.
#[must_use]
pub fn unit_value(unit: &Unit) -> f64 {
    let mut value = f64::from(unit.attack.max(0)) + f64::from(unit.health.max(0));
    if unit.taunt {
        value += 1.0;
    }
    if unit.divine_shield {
        value += f64::from(unit.attack.max(1));
    }
    if unit.keywords.windfury {
        value += f64::from(unit.attack.max(0)) * 0.5;
    }
    if unit.frozen {
        value -= f64::from(unit.attack.max(0)) * 0.5;
    }
    value
}

/// Score `state` from `me`'s point of view. Higher is better.
#[must_use]
pub fn evaluate(state: &GameState, me: PlayerId, weights: &Weights) -> f64 {
    match state.outcome {
        Some(GameResult::Winner(p)) if p == me => return WIN,
        Some(GameResult::Winner(_)) => return -WIN,
        Some(GameResult::Draw) => return -WIN / 2.0,
        None => {}
    }

    let mine = state.player(me);
    let theirs = state.player(me.opponent());
    let board = |units: &im::Vector<Unit>| units.iter().map(unit_value).sum::<f64>();

    let face = f64::from(theirs.hero.max_health - theirs.hero.health);
    let health = f64::from(mine.hero.health);
    let board_diff = board(&mine.field) - board(&theirs.field);
    let hand_diff = mine.hand.len() as f64 - theirs.hand.len() as f64;
    let secrets = mine.armed_secrets().count() as f64;

    weights.face * face
        + weights.health * health
        + weights.board * board_diff
        + weights.hand * hand_diff
        + weights.secrets * secrets
}
