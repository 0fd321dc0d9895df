//! Leaf evaluation policies.

use crate::game::{PlayerId, State};
use crate::search::eval::{NodeEval, ParanoidScore};

/// Evaluates states into some [`NodeEval`] type and knows the extreme
/// values of that type for every perspective.
pub trait Evaluate {
    type Eval: NodeEval;

    fn evaluate(&self, state: &State, max_player: PlayerId) -> Self::Eval;

    /// Worst possible evaluation from the given player's perspective.
    fn lower_bound(&self, perspective: PlayerId, max_player: PlayerId) -> Self::Eval;

    /// Best possible evaluation from the given player's perspective.
    fn upper_bound(&self, perspective: PlayerId, max_player: PlayerId) -> Self::Eval;
}

/// Scores a state by the MAX player's share of all stones on the board.
///
/// A deliberately cheap heuristic; it fulfills the evaluation contract
/// and orders states sensibly, nothing more.
#[derive(Debug, Clone, Default)]
pub struct StoneCountEvaluator;

impl StoneCountEvaluator {
    pub fn new() -> StoneCountEvaluator {
        StoneCountEvaluator
    }
}

impl Evaluate for StoneCountEvaluator {
    type Eval = ParanoidScore;

    fn evaluate(&self, state: &State, max_player: PlayerId) -> ParanoidScore {
        let tensor = state.board().tensor();

        let mut own = 0u32;
        let mut total = 0u32;

        for pos in state.board().positions() {
            let occupant = tensor.occupant(pos);

            if occupant.is_occupied() && !occupant.is_expansion_stone() {
                total += 1;
                if occupant.is_stone_of(max_player) {
                    own += 1;
                }
            }
        }

        let value = if total == 0 {
            0.0
        } else {
            f64::from(own) / f64::from(total)
        };

        ParanoidScore::new(value, max_player)
    }

    fn lower_bound(&self, perspective: PlayerId, max_player: PlayerId) -> ParanoidScore {
        if perspective == max_player {
            ParanoidScore::new(0.0, max_player)
        } else {
            ParanoidScore::new(1.0, max_player)
        }
    }

    fn upper_bound(&self, perspective: PlayerId, max_player: PlayerId) -> ParanoidScore {
        if perspective == max_player {
            ParanoidScore::new(1.0, max_player)
        } else {
            ParanoidScore::new(0.0, max_player)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_board;
    use crate::search::eval::NodeEval;

    fn player(id: u8) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    #[test]
    fn scores_stone_share() {
        let text = "2\n0\n0 1\n3 3\n\
                    1 1 1\n\
                    2 0 0\n\
                    0 0 0\n";
        let state = parse_board(text).unwrap().into_state();

        let eval = StoneCountEvaluator::new().evaluate(&state, player(1));
        assert_eq!(eval.value(), 0.75);
    }

    #[test]
    fn expansion_stones_do_not_count() {
        let text = "2\n0\n0 1\n1 4\n1 2 x x\n";
        let state = parse_board(text).unwrap().into_state();

        let eval = StoneCountEvaluator::new().evaluate(&state, player(1));
        assert_eq!(eval.value(), 0.5);
    }

    #[test]
    fn bounds_are_extreme_for_each_perspective() {
        let evaluator = StoneCountEvaluator::new();
        let max = player(1);

        let lower = evaluator.lower_bound(max, max);
        let upper = evaluator.upper_bound(max, max);
        assert!(upper.is_better(&lower, max));

        let lower = evaluator.lower_bound(player(2), max);
        let upper = evaluator.upper_bound(player(2), max);
        assert!(upper.is_better(&lower, player(2)));
    }
}
