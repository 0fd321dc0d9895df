//! Board representation.
//!
//! A board is a grid of tiles connected by an explicit transition graph.
//! By default every tile is linked to its grid neighbors, but the text
//! format can add portals between arbitrary tile edges and punch holes
//! into the grid, so all traversal goes through the transition table
//! instead of coordinate arithmetic.

mod direction;
mod iter;
mod position;
mod tensor;
mod tile;

use std::fmt;

pub use direction::Direction;
pub use iter::{BfsIter, RayIter};
pub use position::{Pos, MAX_DIMENSION};
pub use tensor::{BoardTensor, Transition, TransitionTable};
pub use tile::{Occupant, TileType};

/// A game board: the tile/transition tensor plus the static match
/// parameters read from the board header.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    tensor: BoardTensor,
    players: u8,
    bomb_radius: u32,
}

impl Board {
    /// Wraps a fully initialized tensor.
    pub fn new(tensor: BoardTensor, players: u8, bomb_radius: u32) -> Board {
        debug_assert!((2..=8).contains(&players));

        Board {
            tensor,
            players,
            bomb_radius,
        }
    }

    /// Clones the board. Stone data is always copied; the transition
    /// table is shared unless `clone_transitions` is set. Topology
    /// mutations (bombing) require a private table.
    pub fn fork(&self, clone_transitions: bool) -> Board {
        Board {
            tensor: self.tensor.fork(clone_transitions),
            players: self.players,
            bomb_radius: self.bomb_radius,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.tensor.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.tensor.height()
    }

    /// Number of players the board was laid out for.
    #[inline]
    pub fn players(&self) -> u8 {
        self.players
    }

    /// Destructive radius of a bomb.
    #[inline]
    pub fn bomb_radius(&self) -> u32 {
        self.bomb_radius
    }

    #[inline]
    pub fn tensor(&self) -> &BoardTensor {
        &self.tensor
    }

    #[inline]
    pub fn tensor_mut(&mut self) -> &mut BoardTensor {
        &mut self.tensor
    }

    /// Checks whether the given coordinates exist on the board. Holes
    /// count as existing positions.
    #[inline]
    pub fn has_position(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    #[inline]
    pub fn pos(&self, x: usize, y: usize) -> Pos {
        debug_assert!(self.has_position(x, y));
        Pos::new(x, y, self.width())
    }

    /// Casts a ray from `origin` in the given direction.
    pub fn ray(&self, origin: Pos, direction: Direction) -> RayIter<'_> {
        RayIter::new(self, origin, direction)
    }

    /// Breadth-first traversal of all tiles within `radius` transition
    /// hops of `origin`.
    pub fn bfs(&self, origin: Pos, radius: u32) -> BfsIter<'_> {
        BfsIter::new(self, origin, radius)
    }

    /// Iterates over every position of the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width();
        (0..self.height()).flat_map(move |y| (0..width).map(move |x| Pos::new(x, y, width)))
    }

    /// Turns the tile at `pos` into a hole.
    pub fn remove_tile(&mut self, pos: Pos) {
        self.tensor.remove_tile(pos);
    }
}

impl fmt::Display for Board {
    /// Renders the board as an axis-labelled grid using the text format
    /// tile encoding, with `X` for expansion stones and upper-case
    /// letters for special tiles.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "      ")?;

        for x in 0..self.width() {
            write!(f, "{x} ")?;
            if x < 10 {
                write!(f, " ")?;
            }
        }

        write!(f, "\n   /-")?;
        for _ in 0..self.width() {
            write!(f, "---")?;
        }
        writeln!(f, "-")?;

        for y in 0..self.height() {
            write!(f, "{y:>2} |")?;

            for x in 0..self.width() {
                let pos = self.pos(x, y);
                let occupant = self.tensor.occupant(pos);

                let symbol = if occupant.is_expansion_stone() {
                    'X'
                } else if occupant.is_occupied() {
                    (b'0' + occupant.raw()) as char
                } else {
                    match self.tensor.tile_type(pos) {
                        TileType::Absent => '-',
                        TileType::Standard => '0',
                        TileType::Bonus => 'B',
                        TileType::Choice => 'C',
                        TileType::Inversion => 'I',
                    }
                };

                write!(f, "{symbol}  ")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
