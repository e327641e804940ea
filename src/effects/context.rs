//! Effect context - what a handler gets to work with.
//!
//! Handlers receive the match state, the card catalogue, and the player
//! acting on the handler's behalf (the caster, or the owner of the unit whose
//! trigger fired). The helpers here attribute log lines to that player.

use crate::cards::{Burn, CardCatalog, CardId, Unit};
use crate::core::{DrawOutcome, GameState, PlayerId, TargetRef};

/// Mutable view handed to every effect handler.
pub struct EffectContext<'a> {
    pub state: &'a mut GameState,
    pub catalog: &'a CardCatalog,
    /// The player the effect acts for.
    pub actor: PlayerId,
}

impl<'a> EffectContext<'a> {
    pub fn new(state: &'a mut GameState, catalog: &'a CardCatalog, actor: PlayerId) -> Self {
        Self {
            state,
            catalog,
            actor,
        }
    }

    /// Re-borrow the same state and catalogue for another player.
    pub fn for_player(&mut self, actor: PlayerId) -> EffectContext<'_> {
        EffectContext {
            state: self.state,
            catalog: self.catalog,
            actor,
        }
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.actor.opponent()
    }

    #[must_use]
    pub fn name(&self, card: CardId) -> &'a str {
        self.catalog.name(card)
    }

    /// Printed burn of a card; zero for unknown ids.
    #[must_use]
    pub fn burn(&self, card: CardId) -> Burn {
        self.catalog.get(card).map_or_else(Burn::default, |c| c.burn)
    }

    /// Append a log line attributed to the actor.
    pub fn log(&mut self, text: impl Into<String>) {
        self.state.log(self.actor, text);
    }

    /// Notify the actor.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.state.notify(self.actor, message);
    }

    pub fn draw(&mut self, player: PlayerId) -> DrawOutcome {
        self.state.draw_card(player, self.catalog)
    }

    pub fn summon(
        &mut self,
        player: PlayerId,
        card: CardId,
        position: Option<usize>,
    ) -> Option<usize> {
        self.state.summon(player, card, position, self.catalog)
    }

    /// Deal damage to a hero or unit. Returns health lost.
    pub fn damage(&mut self, target: TargetRef, amount: i32) -> i32 {
        match target {
            TargetRef::Hero { owner } => self.state.damage_hero(owner, amount),
            TargetRef::Unit { owner, index } => self.state.damage_unit(owner, index, amount),
        }
    }

    /// Restore health to a hero or unit. Returns health restored.
    pub fn heal(&mut self, target: TargetRef, amount: i32) -> i32 {
        match target {
            TargetRef::Hero { owner } => self.state.heal_hero(owner, amount),
            TargetRef::Unit { owner, index } => {
                self.state.unit_mut(owner, index).map_or(0, |u| u.heal(amount))
            }
        }
    }

    /// Deal `amount` to every unit on `player`'s field, one instance each.
    pub fn damage_all_units(&mut self, player: PlayerId, amount: i32) {
        for unit in self.state.player_mut(player).field.iter_mut() {
            unit.take_damage(amount);
        }
    }

    pub fn unit(&self, player: PlayerId, index: usize) -> Option<&Unit> {
        self.state.unit(player, index)
    }

    pub fn unit_mut(&mut self, player: PlayerId, index: usize) -> Option<&mut Unit> {
        self.state.unit_mut(player, index)
    }
}
