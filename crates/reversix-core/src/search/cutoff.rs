//! Policies deciding where the game tree turns into leaves.

use crate::game::State;

/// Decides whether a node should become a leaf.
///
/// Implementations must never cut off the root and must always cut off
/// terminal states.
pub trait Cutoff {
    fn cutoff(&self, state: &State, depth: u32, is_root: bool) -> bool;

    fn set_max_depth(&mut self, max_depth: u32);

    fn max_depth(&self) -> u32;
}

/// Cuts off at a fixed depth and at terminal states.
#[derive(Debug, Clone)]
pub struct DepthCutoff {
    max_depth: u32,
}

impl DepthCutoff {
    pub fn new(max_depth: u32) -> DepthCutoff {
        debug_assert!(max_depth > 0);

        DepthCutoff { max_depth }
    }
}

impl Cutoff for DepthCutoff {
    fn cutoff(&self, state: &State, depth: u32, _is_root: bool) -> bool {
        depth >= self.max_depth || state.is_over()
    }

    fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

/// Like [`DepthCutoff`], but additionally cuts off any non-root state
/// that has reached the bombing phase. Bombing positions branch into
/// every tile on the board, so exploring them rarely pays off.
#[derive(Debug, Clone)]
pub struct BombPhaseCutoff {
    max_depth: u32,
}

impl BombPhaseCutoff {
    pub fn new(max_depth: u32) -> BombPhaseCutoff {
        debug_assert!(max_depth > 0);

        BombPhaseCutoff { max_depth }
    }
}

impl Cutoff for BombPhaseCutoff {
    fn cutoff(&self, state: &State, depth: u32, is_root: bool) -> bool {
        depth >= self.max_depth || state.is_over() || (!is_root && state.is_bombing_phase())
    }

    fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
