//! Tree search over game states.
//!
//! The algorithms are parameterized by four policies: a [`Cutoff`]
//! deciding where the tree ends, an [`Evaluate`] implementation scoring
//! leaves, a [`Generate`] implementation producing ordered successors,
//! and optionally an [`AspirationWindow`] seeding alpha-beta with
//! initial bounds.

mod alpha_beta;
mod context;
mod cutoff;
mod eval;
mod evaluator;
mod generator;
mod tree;
mod window;

pub use alpha_beta::{AlphaBetaEval, BetaSet};
pub use context::{SearchCancelled, SearchContext};
pub use cutoff::{BombPhaseCutoff, Cutoff, DepthCutoff};
pub use eval::{NodeEval, ParanoidScore};
pub use evaluator::{Evaluate, StoneCountEvaluator};
pub use generator::{BestMovesOnlyGenerator, Generate, SimpleGenerator, SortedGenerator};
pub use tree::GameTree;
pub use window::{AspirationWindow, HardDeltaWindow};
