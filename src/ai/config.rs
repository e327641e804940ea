//! AI configuration parameters.

use serde::{Deserialize, Serialize};

use super::evaluate::Archetype;

/// AI configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Soft deadline for one decision, in milliseconds.
    /// Checked between candidate evaluations, never mid-simulation.
    pub time_budget_ms: u64,

    /// Maximum intents in a lethal sequence.
    pub lethal_depth: u32,

    /// Seed used to fork simulation RNGs.
    pub seed: u64,

    /// Force a play style instead of classifying the deck.
    pub archetype: Option<Archetype>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: 800,
            lethal_depth: 8,
            seed: 42,
            archetype: None,
        }
    }
}

impl AiConfig {
    #[must_use]
    pub fn with_time_budget(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    #[must_use]
    pub fn with_lethal_depth(mut self, depth: u32) -> Self {
        self.lethal_depth = depth;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = Some(archetype);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AiConfig::default();
        assert_eq!(config.time_budget_ms, 800);
        assert_eq!(config.lethal_depth, 8);
        assert!(config.archetype.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = AiConfig::default()
            .with_time_budget(50)
            .with_seed(123)
            .with_archetype(Archetype::Control);

        assert_eq!(config.time_budget_ms, 50);
        assert_eq!(config.seed, 123);
        assert_eq!(config.archetype, Some(Archetype::Control));
    }

    #[test]
    fn test_serialization() {
        let config = AiConfig::default().with_archetype(Archetype::Aggro);
        let json = serde_json::to_string(&config).unwrap();
        let back: AiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);

        let partial: AiConfig = serde_json::from_str(r#"{"lethal_depth": 4}"#).unwrap();
        assert_eq!(partial.lethal_depth, 4);
        assert_eq!(partial.time_budget_ms, 800);
    }
}
