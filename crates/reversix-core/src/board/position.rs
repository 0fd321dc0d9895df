//! Tile positions.

use super::Direction;

/// Maximum board dimension (width or height) in tiles.
pub const MAX_DIMENSION: usize = 50;

/// A tile position, encoded as `y * width + x`.
///
/// The encoding is only meaningful relative to a board width, so
/// coordinate accessors take the width as a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Pos(u16);

impl Pos {
    #[inline]
    pub fn new(x: usize, y: usize, width: usize) -> Pos {
        debug_assert!(x < width);
        Pos((y * width + x) as u16)
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Pos {
        Pos(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn x(self, width: usize) -> usize {
        self.0 as usize % width
    }

    #[inline]
    pub const fn y(self, width: usize) -> usize {
        self.0 as usize / width
    }

    /// The grid neighbor in the given direction, ignoring transitions.
    ///
    /// Returns `None` at the board edge. Only used while wiring up the
    /// default adjacency of a fresh board; all traversal afterwards goes
    /// through the transition table.
    pub fn grid_neighbor(
        x: usize,
        y: usize,
        direction: Direction,
        width: usize,
        height: usize,
    ) -> Option<Pos> {
        let max_x = width - 1;
        let max_y = height - 1;

        let (dx, dy): (isize, isize) = match direction {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        };

        let in_range = match dx {
            1 => x < max_x,
            -1 => x > 0,
            _ => true,
        } && match dy {
            1 => y < max_y,
            -1 => y > 0,
            _ => true,
        };

        if in_range {
            Some(Pos::new((x as isize + dx) as usize, (y as isize + dy) as usize, width))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_matches_row_major_order() {
        let p = Pos::new(3, 2, 8);
        assert_eq!(p.raw(), 19);
        assert_eq!(p.x(8), 3);
        assert_eq!(p.y(8), 2);
    }

    #[test]
    fn grid_neighbor_respects_edges() {
        assert_eq!(Pos::grid_neighbor(0, 0, Direction::North, 4, 4), None);
        assert_eq!(Pos::grid_neighbor(0, 0, Direction::West, 4, 4), None);
        assert_eq!(Pos::grid_neighbor(0, 0, Direction::NorthWest, 4, 4), None);
        assert_eq!(
            Pos::grid_neighbor(0, 0, Direction::SouthEast, 4, 4),
            Some(Pos::new(1, 1, 4))
        );
        assert_eq!(Pos::grid_neighbor(3, 3, Direction::SouthEast, 4, 4), None);
        assert_eq!(
            Pos::grid_neighbor(3, 3, Direction::NorthWest, 4, 4),
            Some(Pos::new(2, 2, 4))
        );
    }
}
