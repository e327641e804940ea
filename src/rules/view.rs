//! Per-player views.
//!
//! What a transport may send to one seat. The opponent's hand is a count,
//! and an unrevealed opponent secret is only counted, never named or typed.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardInstance, Unit};
use crate::core::{ArmedSecret, GameResult, GameState, Hero, PlayerId};

/// The viewer's own side, in full.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnSide {
    pub hero: Hero,
    pub hand: Vec<CardInstance>,
    pub deck_count: usize,
    pub field: Vec<Unit>,
    pub secrets: Vec<ArmedSecret>,
    pub mana: u8,
    pub max_mana: u8,
}

/// The opponent's side, redacted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentSide {
    pub hero: Hero,
    pub hand_count: usize,
    pub deck_count: usize,
    pub field: Vec<Unit>,
    /// Secrets that have already fired.
    pub revealed_secrets: Vec<CardId>,
    pub hidden_secrets: usize,
    pub mana: u8,
    pub max_mana: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub viewer: PlayerId,
    pub current: PlayerId,
    pub turn: u32,
    pub me: OwnSide,
    pub opponent: OpponentSide,
    pub outcome: Option<GameResult>,
}

/// Derive `viewer`'s view of the match.
#[must_use]
pub fn view_for(state: &GameState, viewer: PlayerId) -> PlayerView {
    let me = state.player(viewer);
    let them = state.player(viewer.opponent());

    PlayerView {
        viewer,
        current: state.current,
        turn: state.turn,
        me: OwnSide {
            hero: me.hero.clone(),
            hand: me.hand.iter().cloned().collect(),
            deck_count: me.deck.len(),
            field: me.field.iter().cloned().collect(),
            secrets: me.secrets.iter().cloned().collect(),
            mana: me.mana,
            max_mana: me.max_mana,
        },
        opponent: OpponentSide {
            hero: them.hero.clone(),
            hand_count: them.hand.len(),
            deck_count: them.deck.len(),
            field: them.field.iter().cloned().collect(),
            revealed_secrets: them
                .secrets
                .iter()
                .filter(|s| s.is_revealed)
                .map(|s| s.card)
                .collect(),
            hidden_secrets: them.armed_secrets().count(),
            mana: them.mana,
            max_mana: them.max_mana,
        },
        outcome: state.outcome,
    }
}
