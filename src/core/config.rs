//! Match configuration.
//!
//! `MatchConfig` holds the numeric limits of a match. It is `Copy` and is
//! carried inside `GameState`, so every rule helper sees the same limits.

use serde::{Deserialize, Serialize};

/// Numeric limits and setup parameters for one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Starting and maximum hero health.
    pub max_hero_health: i32,

    /// Mana crystal cap.
    pub max_mana: u8,

    /// Maximum cards in hand. Draws beyond this are burned.
    pub max_hand: usize,

    /// Maximum units on one side of the board.
    pub max_field: usize,

    /// Opening hand size for the first player.
    pub first_hand: usize,

    /// Opening hand size for the second player.
    pub second_hand: usize,

    /// Mana cost of every hero ability.
    pub hero_ability_cost: u8,

    /// Give the second player the coin at match start.
    pub give_coin: bool,

    /// Seed for the match RNG.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_hero_health: 30,
            max_mana: 10,
            max_hand: 10,
            max_field: 7,
            first_hand: 3,
            second_hand: 4,
            hero_ability_cost: 2,
            give_coin: true,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Set the match seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting hero health.
    #[must_use]
    pub fn with_hero_health(mut self, health: i32) -> Self {
        self.max_hero_health = health;
        self
    }

    /// Set the opening hand sizes.
    #[must_use]
    pub fn with_opening_hands(mut self, first: usize, second: usize) -> Self {
        self.first_hand = first;
        self.second_hand = second;
        self
    }

    /// Enable or disable the coin for the second player.
    #[must_use]
    pub fn with_coin(mut self, give_coin: bool) -> Self {
        self.give_coin = give_coin;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.max_hero_health, 30);
        assert_eq!(config.max_mana, 10);
        assert_eq!(config.max_hand, 10);
        assert_eq!(config.max_field, 7);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MatchConfig::default()
            .with_seed(7)
            .with_hero_health(20)
            .with_opening_hands(0, 0)
            .with_coin(false);

        assert_eq!(config.seed, 7);
        assert_eq!(config.max_hero_health, 20);
        assert_eq!(config.first_hand, 0);
        assert!(!config.give_coin);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MatchConfig = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.max_field, 7);
    }
}
