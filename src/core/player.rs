//! Player identification for a two-seat match.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seat 0 moves first, seat 1 receives the coin.
//! Every match has exactly two seats, so `opponent()` is always defined.

use serde::{Deserialize, Serialize};

/// Number of seats in a match.
pub const SEATS: usize = 2;

/// Seat identifier (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who takes the first turn.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player who takes the second turn and receives the coin.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a new player ID.
    ///
    /// Panics if `id` is not a valid seat.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < SEATS, "seat index out of range");
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both seats in turn order.
    ///
    /// ```
    /// use hearthfire::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::both().collect();
    /// assert_eq!(seats, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn both() -> impl Iterator<Item = PlayerId> {
        (0..SEATS as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id() {
        let p = PlayerId::new(1);
        assert_eq!(p.index(), 1);
        assert_eq!(p, PlayerId::SECOND);
    }

    #[test]
    fn test_opponent_is_involution() {
        for p in PlayerId::both() {
            assert_ne!(p, p.opponent());
            assert_eq!(p, p.opponent().opponent());
        }
    }

    #[test]
    #[should_panic(expected = "seat index out of range")]
    fn test_invalid_seat_panics() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PlayerId::FIRST), "Player 1");
    }
}
