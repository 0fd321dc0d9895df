//! The alpha-beta bookkeeping generalized to more than two players.
//!
//! Instead of a single beta value, a node carries a *set* of beta
//! evaluations, at most one per group of players sharing a strategy.
//! With one MAX player and paranoid opponents this collapses to the
//! classic two-player alpha-beta, except that alpha always belongs to
//! the turn player rather than to MAX alone.

use crate::game::PlayerId;
use crate::search::eval::NodeEval;

/// Best evaluations the players higher up the current path can already
/// enforce, keyed by the player who contributed them.
pub type BetaSet<E> = Vec<(PlayerId, E)>;

/// Alpha and beta values of one node during alpha-beta search.
#[derive(Debug, Clone)]
pub struct AlphaBetaEval<E> {
    /// Best evaluation the turn player can reach for sure.
    alpha: E,
    beta: BetaSet<E>,
}

impl<E: NodeEval> AlphaBetaEval<E> {
    /// A fresh evaluation with an empty beta set.
    pub fn new(alpha: E) -> AlphaBetaEval<E> {
        AlphaBetaEval {
            alpha,
            beta: BetaSet::new(),
        }
    }

    pub fn with_beta(alpha: E, beta: BetaSet<E>) -> AlphaBetaEval<E> {
        AlphaBetaEval { alpha, beta }
    }

    #[inline]
    pub fn alpha(&self) -> &E {
        &self.alpha
    }

    #[inline]
    pub fn set_alpha(&mut self, alpha: E) {
        self.alpha = alpha;
    }

    #[inline]
    pub fn beta(&self) -> &BetaSet<E> {
        &self.beta
    }

    /// The beta set to hand down to a successor: the current set with
    /// alpha merged in for the turn player's strategy group, keeping
    /// only the better of the two.
    pub fn successor_beta(&self, turn: PlayerId) -> BetaSet<E> {
        let mut beta = self.beta.clone();

        for (player, eval) in beta.iter_mut() {
            if self.alpha.same_strategy(turn, *player) {
                if self.alpha.is_better(eval, *player) {
                    *eval = self.alpha.clone();
                }
                return beta;
            }
        }

        beta.push((turn, self.alpha.clone()));

        beta
    }

    /// Whether some player of a *different* strategy group can already
    /// enforce an evaluation better than alpha, which makes exploring
    /// further successors pointless.
    pub fn beta_blocker(&self, turn: PlayerId) -> bool {
        self.beta.iter().any(|(player, eval)| {
            !self.alpha.same_strategy(turn, *player) && eval.is_better(&self.alpha, *player)
        })
    }
}
