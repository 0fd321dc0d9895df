//! Node evaluations comparable from every player's perspective.

use std::cmp::Ordering;
use std::fmt;

use crate::game::PlayerId;

/// An evaluation of a search node.
///
/// Evaluations of one type are comparable from the perspective of any
/// player; `Greater` always means "better for that player". Two players
/// share a strategy when any evaluation ranks the same from both of
/// their perspectives.
pub trait NodeEval: Clone {
    fn compare(&self, other: &Self, perspective: PlayerId) -> Ordering;

    /// Whether both players try to optimize the evaluation in the same
    /// direction.
    fn same_strategy(&self, player1: PlayerId, player2: PlayerId) -> bool;

    fn is_better(&self, other: &Self, perspective: PlayerId) -> bool {
        self.compare(other, perspective) == Ordering::Greater
    }

    fn is_equal(&self, other: &Self, perspective: PlayerId) -> bool {
        self.compare(other, perspective) == Ordering::Equal
    }

    fn is_worse(&self, other: &Self, perspective: PlayerId) -> bool {
        self.compare(other, perspective) == Ordering::Less
    }
}

/// A value in `[0, 1]` with a single MAX player who prefers high values
/// while every other player prefers low ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParanoidScore {
    value: f64,
    max_player: PlayerId,
}

impl ParanoidScore {
    pub fn new(value: f64, max_player: PlayerId) -> ParanoidScore {
        debug_assert!((0.0..=1.0).contains(&value));

        ParanoidScore { value, max_player }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn max_player(&self) -> PlayerId {
        self.max_player
    }
}

impl NodeEval for ParanoidScore {
    fn compare(&self, other: &Self, perspective: PlayerId) -> Ordering {
        // Low values rank as better; the MAX player sees the reverse.
        let ordering = other.value.total_cmp(&self.value);

        if perspective == self.max_player {
            ordering.reverse()
        } else {
            ordering
        }
    }

    fn same_strategy(&self, player1: PlayerId, player2: PlayerId) -> bool {
        (player1 != self.max_player && player2 != self.max_player) || player1 == player2
    }
}

impl fmt::Display for ParanoidScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u8) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    #[test]
    fn max_player_prefers_high_values() {
        let low = ParanoidScore::new(0.2, player(1));
        let high = ParanoidScore::new(0.8, player(1));

        assert!(high.is_better(&low, player(1)));
        assert!(low.is_worse(&high, player(1)));
    }

    #[test]
    fn other_players_prefer_low_values() {
        let low = ParanoidScore::new(0.2, player(1));
        let high = ParanoidScore::new(0.8, player(1));

        assert!(low.is_better(&high, player(2)));
        assert!(low.is_better(&high, player(3)));
    }

    #[test]
    fn equal_values_compare_equal_from_any_perspective() {
        let a = ParanoidScore::new(0.5, player(1));
        let b = ParanoidScore::new(0.5, player(1));

        assert!(a.is_equal(&b, player(1)));
        assert!(a.is_equal(&b, player(2)));
    }

    #[test]
    fn strategy_groups_max_against_the_rest() {
        let eval = ParanoidScore::new(0.5, player(2));

        assert!(eval.same_strategy(player(1), player(3)));
        assert!(eval.same_strategy(player(2), player(2)));
        assert!(!eval.same_strategy(player(1), player(2)));
        assert!(!eval.same_strategy(player(2), player(3)));
    }
}
