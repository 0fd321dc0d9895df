//! The move model: stone placements, override placements and bombs.

mod capture;

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::board::{Pos, TileType};
use crate::game::{PlayerId, State};

pub use capture::{apply_captures, capturing_boundaries, has_capturing_direction, CaptureBoundaries};

/// What a player claims when capturing a bonus tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusKind {
    Bomb,
    OverrideStone,
}

/// Extra intent attached to a stone placement, determined by the type
/// of the target tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementPref {
    /// A standard or inversion tile; no choice to make.
    Plain,
    /// A choice tile: the player to swap all stones with (possibly
    /// oneself).
    Choice(PlayerId),
    /// A bonus tile: the resource to claim.
    Bonus(BonusKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Place a stone on a free tile, capturing at least one line.
    Placement(PlacementPref),
    /// Place an override stone on an occupied tile or expansion stone.
    Override,
    /// Drop a bomb, blasting all tiles within the bomb radius.
    Bomb,
}

/// A move of one player at one position.
///
/// Identity (equality and hashing) covers position, player and
/// preference but not the state the move was generated for; only
/// compare moves generated for the same state.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    player: PlayerId,
    x: u8,
    y: u8,
    kind: MoveKind,
}

impl Move {
    pub fn new(player: PlayerId, x: usize, y: usize, kind: MoveKind) -> Move {
        debug_assert!(x < crate::board::MAX_DIMENSION && y < crate::board::MAX_DIMENSION);

        Move {
            player,
            x: x as u8,
            y: y as u8,
            kind,
        }
    }

    #[inline]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[inline]
    pub fn x(&self) -> usize {
        self.x as usize
    }

    #[inline]
    pub fn y(&self) -> usize {
        self.y as usize
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub fn pos(&self, width: usize) -> Pos {
        Pos::new(self.x(), self.y(), width)
    }

    /// Packs the move identity into an integer key: bits 0-5 the x
    /// coordinate, 6-11 the y coordinate, 12-14 the player, 15-18 the
    /// preference and bit 19 the bomb flag.
    pub fn key(&self) -> u32 {
        let pref: u32 = match self.kind {
            MoveKind::Placement(PlacementPref::Choice(with)) => with.get() as u32,
            MoveKind::Placement(PlacementPref::Bonus(BonusKind::Bomb)) => 9,
            MoveKind::Placement(PlacementPref::Bonus(BonusKind::OverrideStone)) => 10,
            _ => 0,
        };
        let bomb: u32 = match self.kind {
            MoveKind::Bomb => 1,
            _ => 0,
        };

        self.x as u32
            | (self.y as u32) << 6
            | ((self.player.get() as u32 - 1) << 12)
            | pref << 15
            | bomb << 19
    }

    /// Checks the move against the rules in the given state.
    pub fn is_valid(&self, state: &State) -> bool {
        let board = state.board();

        if !board.has_position(self.x(), self.y()) {
            return false;
        }

        let pos = self.pos(board.width());
        let tile = board.tensor().tile_type(pos);
        let player = state.players().player(self.player);

        match self.kind {
            MoveKind::Placement(pref) => {
                if tile == TileType::Absent || board.tensor().occupant(pos).is_occupied() {
                    return false;
                }

                let boundaries = capturing_boundaries(board, self.player, pos);
                if !has_capturing_direction(&boundaries) {
                    return false;
                }

                match (tile, pref) {
                    (TileType::Standard | TileType::Inversion, PlacementPref::Plain) => true,
                    (TileType::Bonus, PlacementPref::Bonus(_)) => true,
                    (TileType::Choice, PlacementPref::Choice(with)) => {
                        with.get() <= board.players()
                    }
                    _ => false,
                }
            }

            MoveKind::Override => {
                if tile == TileType::Absent || !player.has_override_stone() {
                    false
                } else if board.tensor().occupant(pos).is_expansion_stone() {
                    true
                } else {
                    board.tensor().occupant(pos).is_occupied()
                        && has_capturing_direction(&capturing_boundaries(board, self.player, pos))
                }
            }

            MoveKind::Bomb => tile != TileType::Absent && player.has_bomb(),
        }
    }

    /// Executes the move, producing the successor state. The move must
    /// be valid.
    pub fn execute(&self, state: &State) -> State {
        debug_assert!(self.is_valid(state), "{self}");

        let pos = self.pos(state.board().width());

        match self.kind {
            MoveKind::Placement(pref) => self.execute_placement(state, pos, pref),
            MoveKind::Override => self.execute_override(state, pos),
            MoveKind::Bomb => self.execute_bomb(state, pos),
        }
    }

    fn execute_placement(&self, state: &State, pos: Pos, pref: PlacementPref) -> State {
        let mut board = state.board().fork(false);
        let boundaries = capturing_boundaries(state.board(), self.player, pos);
        apply_captures(&mut board, self.player, pos, &boundaries);

        let mut players = state.players().clone();

        match board.tensor().tile_type(pos) {
            TileType::Choice => {
                let with = match pref {
                    PlacementPref::Choice(with) => with,
                    // Valid moves carry a choice preference on choice
                    // tiles; fall back to a self-swap otherwise.
                    _ => self.player,
                };

                // Swap every stone of the mover with every stone of the
                // chosen player. Expansion stones are unaffected.
                for swap_pos in state.board().positions() {
                    let occupant = board.tensor().occupant(swap_pos);

                    if occupant.is_stone_of(self.player) {
                        board
                            .tensor_mut()
                            .set_occupant(swap_pos, crate::board::Occupant::stone(with));
                    } else if occupant.is_stone_of(with) {
                        board
                            .tensor_mut()
                            .set_occupant(swap_pos, crate::board::Occupant::stone(self.player));
                    }
                }

                board.tensor_mut().set_tile_type(pos, TileType::Standard);
            }

            TileType::Inversion => {
                // Every stone passes to the next player in id order,
                // cycling over the full initial player count.
                let count = board.players();

                for inv_pos in state.board().positions() {
                    let occupant = board.tensor().occupant(inv_pos);

                    if occupant.is_occupied() && !occupant.is_expansion_stone() {
                        let next = (occupant.raw() % count) + 1;
                        board
                            .tensor_mut()
                            .set_occupant(inv_pos, crate::board::Occupant::from_raw(next));
                    }
                }

                board.tensor_mut().set_tile_type(pos, TileType::Standard);
            }

            TileType::Bonus => {
                let player = players.player_mut(self.player);
                match pref {
                    PlacementPref::Bonus(BonusKind::OverrideStone) => player.add_override_stone(),
                    _ => player.add_bomb(),
                }

                board.tensor_mut().set_tile_type(pos, TileType::Standard);
            }

            _ => {}
        }

        State::derive(board, players, state.phase(), state.turn())
    }

    fn execute_override(&self, state: &State, pos: Pos) -> State {
        let mut board = state.board().fork(false);
        let boundaries = capturing_boundaries(state.board(), self.player, pos);
        apply_captures(&mut board, self.player, pos, &boundaries);

        let mut players = state.players().clone();
        players.player_mut(self.player).use_override_stone();

        State::derive(board, players, state.phase(), state.turn())
    }

    fn execute_bomb(&self, state: &State, pos: Pos) -> State {
        // Bombing rewires the transition graph, so this board needs a
        // private transition table.
        let mut board = state.board().fork(true);

        let blasted: Vec<Pos> = board.bfs(pos, board.bomb_radius()).map(|(p, _)| p).collect();
        for hole in blasted {
            board.remove_tile(hole);
        }

        let mut players = state.players().clone();
        players.player_mut(self.player).use_bomb();

        State::derive(board, players, state.phase(), state.turn())
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Placement(PlacementPref::Plain) => {
                write!(f, "Player {} placed", self.player)?;
            }
            MoveKind::Placement(PlacementPref::Choice(with)) => {
                write!(f, "Player {} swapped colors with Player {with}", self.player)?;
            }
            MoveKind::Placement(PlacementPref::Bonus(BonusKind::Bomb)) => {
                write!(f, "Player {} chose a bomb", self.player)?;
            }
            MoveKind::Placement(PlacementPref::Bonus(BonusKind::OverrideStone)) => {
                write!(f, "Player {} chose an override stone", self.player)?;
            }
            MoveKind::Override => {
                write!(f, "Player {} has overridden a stone", self.player)?;
            }
            MoveKind::Bomb => {
                write!(f, "Player {} dropped a bomb", self.player)?;
            }
        }

        write!(f, " on ({},{})", self.x, self.y)
    }
}
