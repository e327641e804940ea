//! Match setup.

use crate::cards::{ids, CardCatalog, CardId, CardInstance};
use crate::core::{GameState, HeroDescriptor, MatchConfig, PlayerId};
use crate::error::{EngineError, Result};

/// Build the opening state of a match.
///
/// Each deck is validated against the catalogue and shuffled with the
/// match RNG. The first player draws `first_hand` cards, the second
/// `second_hand` plus The Coin (when enabled). The first player starts
/// turn 1 with one mana crystal.
pub fn new_match(
    catalog: &CardCatalog,
    decks: [&[CardId]; 2],
    heroes: [&HeroDescriptor; 2],
    config: MatchConfig,
) -> Result<GameState> {
    let mut state = GameState::new(config, heroes);

    for player in PlayerId::both() {
        let list = decks[player.index()];
        let mut cards = Vec::with_capacity(list.len());
        for &id in list {
            let def = catalog.get(id).ok_or(EngineError::UnknownCard(id))?;
            cards.push(CardInstance::new(state.alloc_instance(), def));
        }
        state.rng.shuffle(&mut cards);

        let p = state.player_mut(player);
        p.deck = cards.into_iter().collect();
        p.original_deck = list.iter().copied().collect();
    }

    for (player, count) in [
        (PlayerId::FIRST, config.first_hand),
        (PlayerId::SECOND, config.second_hand),
    ] {
        for _ in 0..count {
            state.draw_card(player, catalog);
        }
    }

    if config.give_coin && !state.give_card(PlayerId::SECOND, ids::THE_COIN, catalog) {
        return Err(EngineError::UnknownCard(ids::THE_COIN));
    }

    let first = state.player_mut(PlayerId::FIRST);
    first.max_mana = 1;
    first.mana = 1;
    state.log(PlayerId::FIRST, "The match begins");
    Ok(state)
}
