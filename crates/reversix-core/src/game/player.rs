//! Player data.

use std::fmt;

/// A player identifier in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The first player in turn order.
    pub const FIRST: PlayerId = PlayerId(1);

    /// Creates a player id, rejecting values outside `1..=8`.
    #[inline]
    pub const fn new(id: u8) -> Option<PlayerId> {
        if id >= 1 && id <= 8 {
            Some(PlayerId(id))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One player's resources and status. Two players are the same player
/// iff they have the same id; stone counts do not enter identity.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    override_stones: u32,
    bombs: u32,
    disqualified: bool,
}

impl Player {
    pub fn new(id: PlayerId, override_stones: u32, bombs: u32) -> Player {
        Player {
            id,
            override_stones,
            bombs,
            disqualified: false,
        }
    }

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[inline]
    pub fn override_stones(&self) -> u32 {
        self.override_stones
    }

    #[inline]
    pub fn bombs(&self) -> u32 {
        self.bombs
    }

    #[inline]
    pub fn has_override_stone(&self) -> bool {
        self.override_stones > 0
    }

    #[inline]
    pub fn has_bomb(&self) -> bool {
        self.bombs > 0
    }

    #[inline]
    pub fn disqualified(&self) -> bool {
        self.disqualified
    }

    pub fn add_override_stone(&mut self) {
        self.override_stones += 1;
    }

    pub fn add_bomb(&mut self) {
        self.bombs += 1;
    }

    pub fn use_override_stone(&mut self) {
        debug_assert!(self.has_override_stone());
        self.override_stones -= 1;
    }

    pub fn use_bomb(&mut self) {
        debug_assert!(self.has_bomb());
        self.bombs -= 1;
    }

    pub fn disqualify(&mut self) {
        self.disqualified = true;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.disqualified {
            write!(f, "Player {}: is disqualified", self.id)
        } else {
            write!(
                f,
                "Player {}: override ({}), bombs ({})",
                self.id, self.override_stones, self.bombs
            )
        }
    }
}

/// All players of a match, indexed by id. Player `i` always sits at
/// array index `i - 1`.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    players: Vec<Player>,
}

impl PlayerPool {
    /// Builds a pool from players ordered by id, starting at 1 without
    /// gaps.
    pub fn new(players: Vec<Player>) -> PlayerPool {
        debug_assert!(!players.is_empty());
        debug_assert!(players
            .iter()
            .enumerate()
            .all(|(i, p)| p.id().get() as usize == i + 1));

        PlayerPool { players }
    }

    /// Creates `count` players, each holding the given initial
    /// resources.
    pub fn with_uniform_resources(count: u8, override_stones: u32, bombs: u32) -> PlayerPool {
        let players = (1..=count)
            .filter_map(PlayerId::new)
            .map(|id| Player::new(id, override_stones, bombs))
            .collect();

        PlayerPool::new(players)
    }

    #[inline]
    pub fn len(&self) -> u8 {
        self.players.len() as u8
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: u8) -> bool {
        id >= 1 && id <= self.len()
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.get() as usize - 1]
    }

    #[inline]
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.get() as usize - 1]
    }

    /// The id following `id` in turn order, wrapping around to the
    /// first player.
    #[inline]
    pub fn next_id(&self, id: PlayerId) -> PlayerId {
        PlayerId((id.get() % self.len()) + 1)
    }

    /// Iterates over all players ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterates over all players that are not disqualified.
    pub fn active(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.disqualified())
    }
}

impl fmt::Display for PlayerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, player) in self.players.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{player}")?;
        }
        Ok(())
    }
}
