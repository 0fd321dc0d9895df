//! Successor generation policies.

use crate::game::{PlayerId, State};
use crate::moves::Move;
use crate::search::context::{SearchCancelled, SearchContext};
use crate::search::eval::NodeEval;
use crate::search::evaluator::Evaluate;

/// Produces the ordered successors of a state.
///
/// The first successor is explored first, so a good ordering buys
/// pruning. Implementations may restrict the branching factor but must
/// never return an empty list for a state that has legal moves.
pub trait Generate<E: NodeEval> {
    fn generate(
        &self,
        state: &State,
        ctx: &SearchContext,
        max_player: PlayerId,
    ) -> Result<Vec<(Move, State)>, SearchCancelled>;
}

/// Executes all legal moves in move-key order, without any reordering.
#[derive(Debug, Clone, Default)]
pub struct SimpleGenerator;

impl SimpleGenerator {
    pub fn new() -> SimpleGenerator {
        SimpleGenerator
    }
}

impl<E: NodeEval> Generate<E> for SimpleGenerator {
    fn generate(
        &self,
        state: &State,
        _ctx: &SearchContext,
        _max_player: PlayerId,
    ) -> Result<Vec<(Move, State)>, SearchCancelled> {
        Ok(state
            .valid_moves()
            .iter()
            .map(|mv| (*mv, mv.execute(state)))
            .collect())
    }
}

/// Evaluates every successor with a proxy evaluator and yields them
/// best-first from the parent turn player's perspective.
#[derive(Debug, Clone)]
pub struct SortedGenerator<V> {
    evaluator: V,
    /// Cap on the number of moves that are executed and evaluated at
    /// all; moves beyond it are dropped unseen.
    max_moves: usize,
}

impl<V> SortedGenerator<V> {
    pub fn new(evaluator: V, max_moves: usize) -> SortedGenerator<V> {
        debug_assert!(max_moves > 0);

        SortedGenerator {
            evaluator,
            max_moves,
        }
    }
}

impl<V: Evaluate> SortedGenerator<V> {
    /// Like [`Generate::generate`], but keeps the proxy evaluation of
    /// each successor alongside it.
    fn generate_evaluated(
        &self,
        state: &State,
        ctx: &SearchContext,
        max_player: PlayerId,
    ) -> Result<Vec<(Move, State, V::Eval)>, SearchCancelled> {
        ctx.check()?;

        let turn = state.turn();
        let mut successors = Vec::new();

        for mv in state.valid_moves().iter().take(self.max_moves) {
            ctx.check()?;

            let succ = mv.execute(state);

            ctx.check()?;

            let eval = self.evaluator.evaluate(&succ, max_player);

            successors.push((*mv, succ, eval));
        }

        ctx.check()?;

        successors.sort_by(|a, b| b.2.compare(&a.2, turn));

        Ok(successors)
    }
}

impl<V: Evaluate> Generate<V::Eval> for SortedGenerator<V> {
    fn generate(
        &self,
        state: &State,
        ctx: &SearchContext,
        max_player: PlayerId,
    ) -> Result<Vec<(Move, State)>, SearchCancelled> {
        let successors = self.generate_evaluated(state, ctx, max_player)?;

        Ok(successors
            .into_iter()
            .map(|(mv, succ, _)| (mv, succ))
            .collect())
    }
}

/// Keeps only the best few successors of a [`SortedGenerator`] run.
///
/// The limit is the smaller of a fixed maximum and a percentage of the
/// full branching factor, but never below a fixed minimum.
#[derive(Debug, Clone)]
pub struct BestMovesOnlyGenerator<V> {
    sorted: SortedGenerator<V>,
    min_successors: usize,
    max_successors: usize,
    percentage: f64,
}

impl<V> BestMovesOnlyGenerator<V> {
    pub fn new(
        evaluator: V,
        min_successors: usize,
        max_successors: usize,
        percentage: f64,
        max_moves: usize,
    ) -> BestMovesOnlyGenerator<V> {
        debug_assert!(min_successors > 0);
        debug_assert!(max_successors >= min_successors);
        debug_assert!(percentage > 0.0 && percentage <= 1.0);

        BestMovesOnlyGenerator {
            sorted: SortedGenerator::new(evaluator, max_moves),
            min_successors,
            max_successors,
            percentage,
        }
    }
}

impl<V: Evaluate> Generate<V::Eval> for BestMovesOnlyGenerator<V> {
    fn generate(
        &self,
        state: &State,
        ctx: &SearchContext,
        max_player: PlayerId,
    ) -> Result<Vec<(Move, State)>, SearchCancelled> {
        let mut successors = self.sorted.generate(state, ctx, max_player)?;

        let percentage_limit = (successors.len() as f64 * self.percentage) as usize;
        let limit = self
            .max_successors
            .min(percentage_limit)
            .max(self.min_successors);

        ctx.check()?;

        successors.truncate(limit);

        Ok(successors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_board;
    use crate::search::evaluator::StoneCountEvaluator;

    fn player(id: u8) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    fn open_state() -> State {
        let text = "2\n0\n0 1\n4 4\n\
                    0 0 0 0\n\
                    0 1 2 0\n\
                    0 2 1 0\n\
                    0 0 0 0\n";
        parse_board(text).unwrap().into_state()
    }

    #[test]
    fn simple_generator_covers_all_moves() {
        let state = open_state();
        let generator = SimpleGenerator::new();
        let successors = <SimpleGenerator as Generate<crate::search::ParanoidScore>>::generate(
            &generator,
            &state,
            &SearchContext::unlimited(),
            player(1),
        )
        .unwrap();

        assert_eq!(successors.len(), state.valid_moves().len());
    }

    #[test]
    fn sorted_generator_orders_best_first() {
        let state = open_state();
        let generator = SortedGenerator::new(StoneCountEvaluator::new(), usize::MAX);

        let evaluated = generator
            .generate_evaluated(&state, &SearchContext::unlimited(), player(1))
            .unwrap();

        for pair in evaluated.windows(2) {
            assert!(!pair[1].2.is_better(&pair[0].2, state.turn()));
        }
    }

    #[test]
    fn best_moves_only_truncates_to_limit() {
        let state = open_state();
        let generator =
            BestMovesOnlyGenerator::new(StoneCountEvaluator::new(), 1, 2, 1.0, usize::MAX);

        let successors = generator
            .generate(&state, &SearchContext::unlimited(), player(1))
            .unwrap();

        assert_eq!(successors.len(), 2);
    }

    #[test]
    fn minimum_successor_count_is_enforced() {
        let state = open_state();
        // A tiny percentage would leave nothing; the minimum wins.
        let generator =
            BestMovesOnlyGenerator::new(StoneCountEvaluator::new(), 2, 10, 0.01, usize::MAX);

        let successors = generator
            .generate(&state, &SearchContext::unlimited(), player(1))
            .unwrap();

        assert_eq!(successors.len(), 2);
    }

    #[test]
    fn expired_deadline_cancels_generation() {
        use std::time::{Duration, Instant};

        let state = open_state();
        let generator = SortedGenerator::new(StoneCountEvaluator::new(), usize::MAX);
        let ctx = SearchContext::new(Some(Instant::now() - Duration::from_millis(1)));

        assert_eq!(
            generator.generate(&state, &ctx, player(1)).unwrap_err(),
            SearchCancelled
        );
    }
}
