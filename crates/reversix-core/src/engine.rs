//! The iterative-deepening driver around the game tree.

use std::time::{Duration, Instant};

use log::debug;

use crate::game::State;
use crate::moves::Move;
use crate::search::{
    AspirationWindow, Cutoff, Evaluate, GameTree, Generate, NodeEval, SearchContext,
};
use crate::time::TimeStrategy;

/// How a single tree is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAlgorithm {
    Minimax,
    AlphaBeta,
    AspirationWindows,
    /// Skip searching entirely and play the first legal move.
    FirstLegalMove,
}

/// The immutable policy bundle an [`Engine`] runs with.
pub struct SearchConfig<E: NodeEval> {
    pub algorithm: SearchAlgorithm,
    pub cutoff: Box<dyn Cutoff>,
    pub evaluator: Box<dyn Evaluate<Eval = E>>,
    pub generator: Box<dyn Generate<E>>,
    /// Only used by [`SearchAlgorithm::AspirationWindows`].
    pub window: Option<Box<dyn AspirationWindow<E>>>,
    pub time_strategy: Box<dyn TimeStrategy>,
}

/// Computes best moves for the turn player of its current state.
///
/// One engine follows one match: feed every executed move back in with
/// [`Engine::apply_move`] (or replace the state wholesale) and ask for
/// the next best move when it is our turn.
pub struct Engine<E: NodeEval> {
    state: State,
    config: SearchConfig<E>,
}

/// Safety margin subtracted from the watchdog deadline so the best move
/// can still be delivered after an interrupt.
const INTERRUPT_MARGIN: Duration = Duration::from_millis(500);

impl<E: NodeEval> Engine<E> {
    pub fn new(state: State, config: SearchConfig<E>) -> Engine<E> {
        Engine { state, config }
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }

    /// Advances the engine's state by an executed move.
    pub fn apply_move(&mut self, mv: &Move) {
        self.state = mv.execute(&self.state);
    }

    /// Computes the best move for the current state under the given
    /// budgets, either of which may be zero for "no limit".
    ///
    /// A first legal move is secured before any search starts, so the
    /// result never degrades below that even if the very first deepening
    /// round is cancelled. `threshold` scales the usable fraction of the
    /// time limit to leave room for the interrupt itself.
    ///
    /// Returns `None` only when the game is over.
    pub fn compute_best_move(
        &mut self,
        time_limit: Duration,
        max_depth: u32,
        threshold: f64,
    ) -> Option<Move> {
        let start = Instant::now();

        let mut best = *self.state.valid_moves().first()?;

        if self.config.algorithm == SearchAlgorithm::FirstLegalMove {
            return Some(best);
        }

        self.config.time_strategy.set_time_limit(time_limit);
        self.config.time_strategy.set_max_depth(max_depth);

        let deadline = if time_limit.is_zero() {
            None
        } else {
            let budget = time_limit
                .mul_f64(threshold)
                .saturating_sub(INTERRUPT_MARGIN);

            debug!("will interrupt computation after {} ms", budget.as_millis());

            Some(start + budget)
        };

        let ctx = SearchContext::new(deadline);

        let mut depth = self.config.time_strategy.next_search_depth();

        while depth > 0 {
            let tic = Instant::now();

            self.config.cutoff.set_max_depth(depth);

            let tree = GameTree::new(
                &self.state,
                &*self.config.cutoff,
                &*self.config.evaluator,
                &*self.config.generator,
                &ctx,
            );

            let result = match self.config.algorithm {
                SearchAlgorithm::Minimax => tree.minimax(),
                SearchAlgorithm::AlphaBeta => tree.alpha_beta(),
                SearchAlgorithm::AspirationWindows => match self.config.window.as_mut() {
                    Some(window) => tree.aspiration_windows(&mut **window),
                    None => {
                        debug_assert!(false, "aspiration windows need a window policy");
                        tree.alpha_beta()
                    }
                },
                SearchAlgorithm::FirstLegalMove => unreachable!(),
            };

            match result {
                Ok(Some(mv)) => best = mv,
                Ok(None) => {}
                Err(_) => {
                    debug!("timer interrupt on depth {depth}");
                    break;
                }
            }

            debug!("done search of depth {depth}");

            self.config.time_strategy.set_move_duration(start.elapsed());
            self.config
                .time_strategy
                .add_computation_metrics(tic.elapsed(), depth);

            depth = self.config.time_strategy.next_search_depth();
        }

        self.config.time_strategy.reset();

        if let Some(window) = self.config.window.as_mut() {
            window.reset();
        }

        Some(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_board;
    use crate::search::{
        DepthCutoff, HardDeltaWindow, ParanoidScore, SimpleGenerator, StoneCountEvaluator,
    };
    use crate::time::SimpleTimeStrategy;

    fn engine(text: &str, algorithm: SearchAlgorithm) -> Engine<ParanoidScore> {
        let state = parse_board(text).unwrap().into_state();

        Engine::new(
            state,
            SearchConfig {
                algorithm,
                cutoff: Box::new(DepthCutoff::new(1)),
                evaluator: Box::new(StoneCountEvaluator::new()),
                generator: Box::new(SimpleGenerator::new()),
                window: Some(Box::new(HardDeltaWindow::new(0.1, 0.1, 2))),
                time_strategy: Box::new(SimpleTimeStrategy::new(1)),
            },
        )
    }

    const OPEN_BOARD: &str = "2\n0\n0 1\n4 4\n\
                              0 0 0 0\n\
                              0 1 2 0\n\
                              0 2 1 0\n\
                              0 0 0 0\n";

    #[test]
    fn first_legal_move_returns_without_searching() {
        let mut engine = engine(OPEN_BOARD, SearchAlgorithm::FirstLegalMove);

        let best = engine.compute_best_move(Duration::ZERO, 0, 1.0).unwrap();
        assert_eq!(best, engine.state().valid_moves()[0]);
    }

    #[test]
    fn terminal_state_yields_no_move() {
        let mut engine = engine("2\n0\n0 1\n1 2\n1 2\n", SearchAlgorithm::AlphaBeta);

        assert!(engine.compute_best_move(Duration::ZERO, 2, 1.0).is_none());
    }

    #[test]
    fn depth_limited_searches_agree_across_algorithms() {
        let mut results = Vec::new();

        for algorithm in [
            SearchAlgorithm::Minimax,
            SearchAlgorithm::AlphaBeta,
            SearchAlgorithm::AspirationWindows,
        ] {
            let mut engine = engine(OPEN_BOARD, algorithm);
            results.push(engine.compute_best_move(Duration::ZERO, 3, 1.0).unwrap());
        }

        assert_eq!(results[0], results[1]);
        assert_eq!(results[1], results[2]);
    }

    #[test]
    fn exhausted_budget_still_yields_a_legal_move() {
        let mut engine = engine(OPEN_BOARD, SearchAlgorithm::AlphaBeta);

        // A one-nanosecond budget expires before the first round; the
        // security move must come back anyway.
        let best = engine
            .compute_best_move(Duration::from_nanos(1), 0, 1.0)
            .unwrap();
        assert!(engine.state().valid_moves().contains(&best));
    }

    #[test]
    fn apply_move_advances_the_state() {
        let mut engine = engine(OPEN_BOARD, SearchAlgorithm::AlphaBeta);

        let best = engine.compute_best_move(Duration::ZERO, 1, 1.0).unwrap();
        engine.apply_move(&best);

        assert_ne!(engine.state().turn(), best.player());
    }
}
