//! Packed board storage.
//!
//! Tile attributes and the transition table are stored in flat,
//! position-indexed arrays. The transition table is kept behind an
//! [`Arc`] so that the many board snapshots produced during search share
//! one copy; only operations that mutate topology (bombing) request a
//! private clone. Any two boards not derived from one another must never
//! observe each other's topology mutations.

use std::sync::Arc;

use super::{Direction, Pos, TileType};
use crate::board::tile::Occupant;

/// One outgoing transition of a tile: the destination position and the
/// direction the transition arrives from at the destination. The arrival
/// direction is what makes rays reflect correctly through portals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: Option<Pos>,
    pub incoming: Direction,
}

impl Transition {
    const NONE: Transition = Transition {
        to: None,
        incoming: Direction::North,
    };
}

/// The full transition table of a board: eight entries per tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    entries: Vec<Transition>,
}

impl TransitionTable {
    fn new(tiles: usize) -> TransitionTable {
        TransitionTable {
            entries: vec![Transition::NONE; tiles * Direction::NUM],
        }
    }

    #[inline]
    fn slot(pos: Pos, direction: Direction) -> usize {
        pos.index() * Direction::NUM + direction.index()
    }

    #[inline]
    pub fn get(&self, pos: Pos, direction: Direction) -> Transition {
        self.entries[Self::slot(pos, direction)]
    }

    #[inline]
    pub fn set(&mut self, pos: Pos, direction: Direction, transition: Transition) {
        self.entries[Self::slot(pos, direction)] = transition;
    }
}

/// Per-tile attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tile {
    ty: TileType,
    occupant: Occupant,
}

/// Packed per-tile attributes plus the transition table.
///
/// Cloning via [`BoardTensor::fork`] copies the tile array and either
/// shares or clones the transition table.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardTensor {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    transitions: Arc<TransitionTable>,
}

impl BoardTensor {
    /// Creates an empty tensor. All tiles start as unoccupied holes with
    /// no transitions; a builder must initialize them before use.
    pub fn new(width: usize, height: usize) -> BoardTensor {
        debug_assert!((1..=super::MAX_DIMENSION).contains(&width));
        debug_assert!((1..=super::MAX_DIMENSION).contains(&height));

        let tiles = width * height;

        BoardTensor {
            width,
            height,
            tiles: vec![
                Tile {
                    ty: TileType::Absent,
                    occupant: Occupant::EMPTY,
                };
                tiles
            ],
            transitions: Arc::new(TransitionTable::new(tiles)),
        }
    }

    /// Clones the tensor. The tile array is always copied; the
    /// transition table is shared unless `clone_transitions` is set.
    pub fn fork(&self, clone_transitions: bool) -> BoardTensor {
        BoardTensor {
            width: self.width,
            height: self.height,
            tiles: self.tiles.clone(),
            transitions: if clone_transitions {
                Arc::new((*self.transitions).clone())
            } else {
                Arc::clone(&self.transitions)
            },
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn tile_type(&self, pos: Pos) -> TileType {
        self.tiles[pos.index()].ty
    }

    #[inline]
    pub fn set_tile_type(&mut self, pos: Pos, ty: TileType) {
        debug_assert!(
            ty == TileType::Standard || !self.occupant(pos).is_occupied(),
            "a non-standard tile must always be unoccupied"
        );
        self.tiles[pos.index()].ty = ty;
    }

    #[inline]
    pub fn occupant(&self, pos: Pos) -> Occupant {
        self.tiles[pos.index()].occupant
    }

    #[inline]
    pub fn set_occupant(&mut self, pos: Pos, occupant: Occupant) {
        self.tiles[pos.index()].occupant = occupant;
    }

    #[inline]
    pub fn transition(&self, pos: Pos, direction: Direction) -> Transition {
        self.transitions.get(pos, direction)
    }

    #[inline]
    pub fn neighbor(&self, pos: Pos, direction: Direction) -> Option<Pos> {
        self.transitions.get(pos, direction).to
    }

    /// Direction the transition from `pos` towards `direction` arrives
    /// from at the destination tile.
    #[inline]
    pub fn incoming_direction(&self, pos: Pos, direction: Direction) -> Direction {
        self.transitions.get(pos, direction).incoming
    }

    /// Rewires a single outgoing transition.
    ///
    /// Requires exclusive ownership of the transition table, i.e. the
    /// tensor must have been created fresh or forked with
    /// `clone_transitions = true`.
    pub fn set_transition(&mut self, pos: Pos, direction: Direction, transition: Transition) {
        let table = Arc::get_mut(&mut self.transitions)
            .expect("transition table is shared; fork the board with a private table first");
        table.set(pos, direction, transition);
    }

    /// Turns the tile at `pos` into a hole, severing every transition
    /// into and out of it symmetrically.
    pub fn remove_tile(&mut self, pos: Pos) {
        for direction in Direction::ALL {
            let transition = self.transition(pos, direction);

            if let Some(neighbor) = transition.to {
                self.set_transition(neighbor, transition.incoming, Transition::NONE);
                self.set_transition(pos, direction, Transition::NONE);
            }
        }

        self.set_occupant(pos, Occupant::EMPTY);
        self.set_tile_type(pos, TileType::Absent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked_pair() -> BoardTensor {
        let mut tensor = BoardTensor::new(2, 1);
        let a = Pos::new(0, 0, 2);
        let b = Pos::new(1, 0, 2);

        tensor.set_tile_type(a, TileType::Standard);
        tensor.set_tile_type(b, TileType::Standard);
        tensor.set_transition(
            a,
            Direction::East,
            Transition { to: Some(b), incoming: Direction::West },
        );
        tensor.set_transition(
            b,
            Direction::West,
            Transition { to: Some(a), incoming: Direction::East },
        );

        tensor
    }

    #[test]
    fn fork_shares_transition_table_by_default() {
        let tensor = linked_pair();
        let shared = tensor.fork(false);
        let private = tensor.fork(true);

        assert!(Arc::ptr_eq(&tensor.transitions, &shared.transitions));
        assert!(!Arc::ptr_eq(&tensor.transitions, &private.transitions));
    }

    #[test]
    fn remove_tile_severs_both_directions() {
        let mut tensor = linked_pair();
        let a = Pos::new(0, 0, 2);
        let b = Pos::new(1, 0, 2);

        tensor.remove_tile(b);

        assert_eq!(tensor.tile_type(b), TileType::Absent);
        assert_eq!(tensor.neighbor(a, Direction::East), None);
        assert_eq!(tensor.neighbor(b, Direction::West), None);
    }

    #[test]
    #[should_panic(expected = "transition table is shared")]
    fn shared_table_rejects_topology_mutation() {
        let tensor = linked_pair();
        let mut shared = tensor.fork(false);

        shared.set_transition(
            Pos::new(0, 0, 2),
            Direction::North,
            Transition { to: None, incoming: Direction::North },
        );
    }
}
