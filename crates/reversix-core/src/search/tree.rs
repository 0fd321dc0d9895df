//! The game tree and its search algorithms.

use log::debug;

use crate::game::{PlayerId, State};
use crate::moves::Move;
use crate::search::alpha_beta::{AlphaBetaEval, BetaSet};
use crate::search::context::{SearchCancelled, SearchContext};
use crate::search::cutoff::Cutoff;
use crate::search::eval::NodeEval;
use crate::search::evaluator::Evaluate;
use crate::search::generator::Generate;
use crate::search::window::AspirationWindow;

/// A game tree rooted at one state, able to compute a good move with
/// minimax, generalized alpha-beta, or alpha-beta under aspiration
/// windows.
///
/// The tree itself is never materialized: only the states along the
/// live recursion path exist, and each subtree is dropped as soon as it
/// has reported its result. The root's turn player takes the MAX
/// perspective. All policies are borrowed; one tree serves one search
/// of one depth.
pub struct GameTree<'a, E: NodeEval> {
    root: &'a State,
    cutoff: &'a dyn Cutoff,
    evaluator: &'a dyn Evaluate<Eval = E>,
    generator: &'a dyn Generate<E>,
    ctx: &'a SearchContext,
    max_player: PlayerId,
}

impl<'a, E: NodeEval> GameTree<'a, E> {
    pub fn new(
        root: &'a State,
        cutoff: &'a dyn Cutoff,
        evaluator: &'a dyn Evaluate<Eval = E>,
        generator: &'a dyn Generate<E>,
        ctx: &'a SearchContext,
    ) -> GameTree<'a, E> {
        GameTree {
            root,
            cutoff,
            evaluator,
            generator,
            ctx,
            max_player: root.turn(),
        }
    }

    #[inline]
    pub fn max_player(&self) -> PlayerId {
        self.max_player
    }

    /// Full minimax search. Returns the best move, or `None` when the
    /// root is a leaf.
    pub fn minimax(&self) -> Result<Option<Move>, SearchCancelled> {
        Ok(self.minimax_node(self.root, 0)?.1)
    }

    fn minimax_node(
        &self,
        state: &State,
        depth: u32,
    ) -> Result<(E, Option<Move>), SearchCancelled> {
        // Deciding whether a node is a leaf may be expensive; check the
        // deadline first.
        self.ctx.check()?;

        if self.cutoff.cutoff(state, depth, depth == 0) {
            self.ctx.check()?;

            return Ok((self.evaluator.evaluate(state, self.max_player), None));
        }

        self.ctx.check()?;

        let successors = self.generator.generate(state, self.ctx, self.max_player)?;

        debug_assert!(
            !successors.is_empty(),
            "generator returned no successors for a non-terminal state"
        );
        if successors.is_empty() {
            return Ok((self.evaluator.evaluate(state, self.max_player), None));
        }

        let turn = state.turn();

        let mut best: Option<(E, Move)> = None;

        for (mv, succ) in &successors {
            let (eval, _) = self.minimax_node(succ, depth + 1)?;

            match &best {
                Some((best_eval, _)) if !eval.is_better(best_eval, turn) => {}
                _ => best = Some((eval, *mv)),
            }
        }

        // The loop ran at least once.
        match best {
            Some((eval, mv)) => Ok((eval, Some(mv))),
            None => unreachable!(),
        }
    }

    /// Generalized alpha-beta search with an empty initial window.
    pub fn alpha_beta(&self) -> Result<Option<Move>, SearchCancelled> {
        let mut eval = AlphaBetaEval::new(
            self.evaluator
                .lower_bound(self.root.turn(), self.max_player),
        );

        Ok(self.alpha_beta_node(self.root, 0, &mut eval)?.0)
    }

    /// Repeated alpha-beta searches through shrinking-then-widening
    /// aspiration windows until an evaluation inside the window is
    /// found.
    pub fn aspiration_windows(
        &self,
        window: &mut dyn AspirationWindow<E>,
    ) -> Result<Option<Move>, SearchCancelled> {
        loop {
            self.ctx.check()?;

            window.widen();

            if window.width() > 1 {
                debug!("redo search since aspiration window was too narrow");
            }

            let initial_beta = window.window(self.root, self.max_player);

            let mut eval = AlphaBetaEval::with_beta(
                self.evaluator
                    .lower_bound(self.root.turn(), self.max_player),
                initial_beta.clone(),
            );

            self.ctx.check()?;

            let (best, _) = self.alpha_beta_node(self.root, 0, &mut eval)?;

            if in_window(eval.alpha(), &initial_beta) {
                window.update(self.cutoff.max_depth(), eval.alpha().clone());

                return Ok(best);
            }
        }
    }

    /// Recursive alpha-beta step. Alpha is raised in place inside
    /// `eval`; the returned flag tells the caller whether this node was
    /// pruned (its alpha is then only a bound, not an exact value).
    fn alpha_beta_node(
        &self,
        state: &State,
        depth: u32,
        eval: &mut AlphaBetaEval<E>,
    ) -> Result<(Option<Move>, bool), SearchCancelled> {
        // Deciding whether a node is a leaf may be expensive; check the
        // deadline first.
        self.ctx.check()?;

        if self.cutoff.cutoff(state, depth, depth == 0) {
            self.ctx.check()?;

            eval.set_alpha(self.evaluator.evaluate(state, self.max_player));

            return Ok((None, false));
        }

        self.ctx.check()?;

        let successors = self.generator.generate(state, self.ctx, self.max_player)?;

        self.ctx.check()?;

        debug_assert!(
            !successors.is_empty(),
            "generator returned no successors for a non-terminal state"
        );
        if successors.is_empty() {
            eval.set_alpha(self.evaluator.evaluate(state, self.max_player));
            return Ok((None, false));
        }

        let turn = state.turn();

        let mut best = successors[0].0;
        let mut pruned = false;

        for (mv, succ) in &successors {
            self.ctx.check()?;

            let mut succ_eval = AlphaBetaEval::with_beta(
                self.evaluator.lower_bound(succ.turn(), self.max_player),
                eval.successor_beta(turn),
            );

            let (_, succ_pruned) = self.alpha_beta_node(succ, depth + 1, &mut succ_eval)?;

            self.ctx.check()?;

            if !succ_pruned {
                if succ_eval.alpha().is_better(eval.alpha(), turn) {
                    eval.set_alpha(succ_eval.alpha().clone());
                    best = *mv;

                    // Some earlier player can already enforce a result
                    // better for them than this alpha.
                    if eval.beta_blocker(turn) {
                        pruned = true;
                        break;
                    }
                }
            } else if succ_eval.alpha().same_strategy(turn, succ.turn()) {
                // A pruned successor whose turn player pulls in the
                // same direction makes this node's alpha a bound as
                // well.
                pruned = true;
                break;
            }
        }

        self.ctx.check()?;

        Ok((Some(best), pruned))
    }
}

/// Whether an alpha evaluation lies inside a beta window.
fn in_window<E: NodeEval>(alpha: &E, beta: &BetaSet<E>) -> bool {
    beta.iter()
        .all(|(player, bound)| !bound.is_better(alpha, *player))
}
