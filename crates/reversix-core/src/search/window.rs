//! Aspiration windows for alpha-beta search.

use std::collections::HashMap;

use crate::game::{PlayerId, State};
use crate::search::alpha_beta::BetaSet;
use crate::search::eval::{NodeEval, ParanoidScore};

/// Produces initial beta sets for alpha-beta search from evaluations
/// found at shallower deepening depths.
///
/// `width` counts how often the window was requested for the current
/// depth; a width above one means the previous window was too narrow
/// and the search has to be redone. Implementations widen accordingly.
pub trait AspirationWindow<E: NodeEval> {
    /// The initial beta set for a search rooted at `state`. An empty
    /// set is an open window.
    fn window(&mut self, state: &State, max_player: PlayerId) -> BetaSet<E>;

    /// How often the window was handed out since the last `update`.
    fn width(&self) -> u32;

    fn widen(&mut self);

    /// Registers the evaluation found by a completed search of the
    /// given depth and resets the width counter.
    fn update(&mut self, depth: u32, eval: E);

    /// Clears all per-move data. Call between deepening runs.
    fn reset(&mut self);
}

/// A window of fixed deltas around the previous depth's evaluation.
///
/// Every failed attempt widens both bounds by their delta; past
/// `max_width` attempts the window falls open entirely.
#[derive(Debug, Clone)]
pub struct HardDeltaWindow {
    /// How much below the reference evaluation the MAX bound sits.
    delta_max: f64,
    /// How much above the reference evaluation the MIN bound sits.
    delta_min: f64,
    max_width: u32,
    evals: HashMap<u32, ParanoidScore>,
    search_depth: u32,
    call_counter: u32,
}

impl HardDeltaWindow {
    pub fn new(delta_max: f64, delta_min: f64, max_width: u32) -> HardDeltaWindow {
        debug_assert!((0.0..=1.0).contains(&delta_max));
        debug_assert!((0.0..=1.0).contains(&delta_min));
        debug_assert!(max_width >= 1);

        HardDeltaWindow {
            delta_max,
            delta_min,
            max_width,
            evals: HashMap::new(),
            search_depth: 0,
            call_counter: 0,
        }
    }
}

impl AspirationWindow<ParanoidScore> for HardDeltaWindow {
    fn window(&mut self, state: &State, max_player: PlayerId) -> BetaSet<ParanoidScore> {
        // No reference yet, or widened past the limit: search without a
        // window.
        if self.search_depth == 0 || self.call_counter > self.max_width {
            return BetaSet::new();
        }

        let reference = match self.evals.get(&self.search_depth) {
            Some(eval) => eval.value(),
            None => return BetaSet::new(),
        };

        // One bound per strategy group: the MAX player and any one of
        // the MIN players, who all share a strategy.
        let min_player = if max_player == PlayerId::FIRST {
            state.players().next_id(PlayerId::FIRST)
        } else {
            PlayerId::FIRST
        };

        let widening = f64::from(self.call_counter);
        let max_bound = (reference - self.delta_max * widening).max(0.0);
        let min_bound = (reference + self.delta_min * widening).min(1.0);

        vec![
            (max_player, ParanoidScore::new(max_bound, max_player)),
            (min_player, ParanoidScore::new(min_bound, max_player)),
        ]
    }

    fn width(&self) -> u32 {
        self.call_counter
    }

    fn widen(&mut self) {
        self.call_counter += 1;
    }

    fn update(&mut self, depth: u32, eval: ParanoidScore) {
        debug_assert!(depth > self.search_depth);

        self.call_counter = 0;
        self.evals.insert(depth, eval);
        self.search_depth = depth;
    }

    fn reset(&mut self) {
        self.evals.clear();
        self.search_depth = 0;
        self.call_counter = 0;
    }
}
