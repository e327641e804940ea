//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Candidate intents scored by the greedy pass.
    pub candidates: u32,

    /// Simulated steps taken by the lethal search.
    pub lethal_nodes: u32,

    /// A lethal sequence was found.
    pub lethal_found: bool,

    /// The soft deadline cut the search short.
    pub deadline_hit: bool,

    /// The simple fallback heuristic picked the intent.
    pub fallback: bool,

    /// Total time spent deciding (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Simulations (greedy and lethal) per second.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.candidates + self.lethal_nodes) / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_rate() {
        let mut stats = SearchStats::new();
        stats.candidates = 600;
        stats.lethal_nodes = 400;
        stats.time_us = 1_000_000;
        assert_eq!(stats.simulations_per_second(), 1000.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.candidates = 10;
        stats.fallback = true;
        stats.reset();
        assert_eq!(stats, SearchStats::default());
    }
}
