//! Transition directions.

/// One of the eight directions a transition can point in.
///
/// The discriminants are the wire encoding used by the board text format
/// (`0` = north, clockwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    /// Number of directions.
    pub const NUM: usize = 8;

    /// All directions in encoding order.
    pub const ALL: [Direction; Direction::NUM] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    #[inline]
    pub const fn encode(self) -> u8 {
        self as u8
    }

    /// Decodes a direction from its numeric encoding.
    #[inline]
    pub const fn decode(encoding: u8) -> Option<Direction> {
        if encoding < 8 {
            Some(Self::ALL[encoding as usize])
        } else {
            None
        }
    }

    /// The direction corresponding to a 180 degree turn.
    #[inline]
    pub const fn invert(self) -> Direction {
        Self::ALL[((self as u8 + 4) % 8) as usize]
    }

    /// Index for direction-keyed arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
