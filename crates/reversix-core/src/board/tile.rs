//! Tile types and occupants.

use crate::game::PlayerId;

/// The type of a tile.
///
/// Every non-standard tile is unoccupied; capturing a special tile turns
/// it into a standard one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileType {
    /// A hole in the board. Carries no transitions.
    Absent = 0,
    Standard = 1,
    Choice = 2,
    Inversion = 3,
    Bonus = 4,
}

/// Occupant encoding for a tile: `0` empty, `1..=8` a player's stone,
/// `9` an expansion stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Occupant(u8);

impl Occupant {
    pub const EMPTY: Occupant = Occupant(0);
    pub const EXPANSION: Occupant = Occupant(9);

    #[inline]
    pub fn stone(player: PlayerId) -> Occupant {
        Occupant(player.get())
    }

    #[inline]
    pub const fn from_raw(raw: u8) -> Occupant {
        debug_assert!(raw <= 9);
        Occupant(raw)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_occupied(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_expansion_stone(self) -> bool {
        self.0 == 9
    }

    /// The player owning this stone, if any.
    #[inline]
    pub fn player(self) -> Option<PlayerId> {
        if self.0 >= 1 && self.0 <= 8 {
            PlayerId::new(self.0)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_stone_of(self, player: PlayerId) -> bool {
        self.0 == player.get()
    }
}
