//! Match snapshots.
//!
//! A `Snapshot` is everything needed to resume a match: both players,
//! turn bookkeeping and the RNG position. The pending log and notification
//! belong to the last intent and are not kept, and neither is the intent
//! history (internally tagged intents do not survive bincode).

use serde::{Deserialize, Serialize};

use crate::core::{
    GameResult, GameRng, GameRngState, GameState, MatchConfig, Player, PlayerId,
};
use crate::error::Result;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: MatchConfig,
    pub players: [Player; 2],
    pub current: PlayerId,
    pub turn: u32,
    pub outcome: Option<GameResult>,
    pub deaths: u32,
    pub rng: GameRngState,
    next_instance: u32,
}

impl Snapshot {
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            config: state.config,
            players: state.players_raw().clone(),
            current: state.current,
            turn: state.turn,
            outcome: state.outcome,
            deaths: state.deaths,
            rng: state.rng.state(),
            next_instance: state.next_instance_raw(),
        }
    }

    /// Rebuild the state. Continues exactly where the captured one left off.
    #[must_use]
    pub fn restore(self) -> GameState {
        GameState::from_parts(
            self.config,
            self.players,
            self.current,
            self.turn,
            self.outcome,
            self.deaths,
            GameRng::from_state(&self.rng),
            self.next_instance,
        )
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ids;
    use crate::core::{HeroAbility, HeroDescriptor, Intent};
    use crate::error::EngineError;
    use crate::rules::{ActionEngine, RulesEngine};

    fn started() -> (ActionEngine, GameState) {
        let engine = ActionEngine::standard();
        let hero = HeroDescriptor::new("Uther", HeroAbility::Reinforce);
        let deck = vec![
            ids::RIVER_RAPTOR,
            ids::FIREBOLT,
            ids::OGRE_BRUTE,
            ids::BLIND_OGRE,
            ids::RECRUIT,
        ];
        let state = engine
            .new_match([&deck, &deck], [&hero, &hero], MatchConfig::default().with_seed(7))
            .unwrap();
        (engine, state)
    }

    #[test]
    fn test_restore_continues_identically() {
        let (engine, state) = started();
        let state = engine.apply(&state, PlayerId::FIRST, &Intent::EndTurn).unwrap().state;

        let bytes = Snapshot::capture(&state).to_bytes().unwrap();
        let restored = Snapshot::from_bytes(&bytes).unwrap().restore();

        assert_eq!(restored.turn, state.turn);
        assert_eq!(restored.current, state.current);
        assert!(restored.history.is_empty());
        assert_eq!(restored.player(PlayerId::SECOND).hand, state.player(PlayerId::SECOND).hand);

        // Same RNG position and instance counter: the next draw matches
        let a = engine.apply(&state, PlayerId::SECOND, &Intent::EndTurn).unwrap().state;
        let b = engine.apply(&restored, PlayerId::SECOND, &Intent::EndTurn).unwrap().state;
        assert_eq!(a.player(PlayerId::FIRST).hand, b.player(PlayerId::FIRST).hand);
    }

    #[test]
    fn test_garbage_bytes_fail() {
        let err = Snapshot::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, EngineError::Snapshot(_)));
    }
}
