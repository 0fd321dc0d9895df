//! Game states.

use std::cell::OnceCell;
use std::fmt;

use log::error;

use crate::board::{Board, Direction, TileType};
use crate::game::{Phase, Player, PlayerId, PlayerPool};
use crate::moves::{BonusKind, Move, MoveKind, PlacementPref};

/// One state of a match: the board, all player data, the phase and the
/// turn player.
///
/// The turn player and the phase are derived quantities: whenever a
/// state is created, the turn passes to the next player who can move at
/// all, and a full cycle in which nobody can move advances the phase.
/// The state lazily caches the turn player's legal moves.
#[derive(Debug, Clone)]
pub struct State {
    board: Board,
    players: PlayerPool,
    phase: Phase,
    turn: PlayerId,
    valid_moves: OnceCell<Vec<Move>>,
}

impl State {
    /// Creates the initial state of a match: placement phase, with
    /// player 1 about to move (or the first player after them who can).
    pub fn new(board: Board, players: PlayerPool) -> State {
        let mut state = State {
            board,
            players,
            phase: Phase::Placement,
            turn: PlayerId::FIRST,
            valid_moves: OnceCell::new(),
        };

        state.settle_phase_and_turn();

        state
    }

    /// Derives the successor of a state after a move: passes the turn
    /// to the next player and recomputes the phase.
    pub(crate) fn derive(
        board: Board,
        players: PlayerPool,
        last_phase: Phase,
        last_turn: PlayerId,
    ) -> State {
        debug_assert!(last_phase != Phase::End);

        let mut state = State {
            board,
            players,
            phase: last_phase,
            turn: last_turn,
            valid_moves: OnceCell::new(),
        };

        state.switch_turn();
        state.settle_phase_and_turn();

        state
    }

    /// Skips players without a possible move. A full cycle without any
    /// possible move advances the phase; once the bombing phase yields
    /// no move either, the game ends.
    fn settle_phase_and_turn(&mut self) {
        let initial = self.turn;

        while !self.has_possible_move(self.turn) {
            self.switch_turn();

            if self.turn == initial {
                match self.phase {
                    Phase::Placement => self.phase = Phase::Bombing,
                    Phase::Bombing | Phase::End => {
                        self.phase = Phase::End;
                        return;
                    }
                }
            }
        }
    }

    /// Passes the turn to the next player in id order who is not
    /// disqualified. If every other player is disqualified, the turn
    /// stays where it is.
    fn switch_turn(&mut self) {
        let current = self.turn;
        let mut turn = self.players.next_id(current);

        while turn != current && self.players.player(turn).disqualified() {
            turn = self.players.next_id(turn);
        }

        self.turn = turn;
    }

    /// Removes a player from the match. If it was the turn player's
    /// move, the turn passes on; the phase is recomputed either way.
    pub fn disqualify(&mut self, id: PlayerId) {
        self.players.player_mut(id).disqualify();

        if self.turn == id {
            self.switch_turn();
        }

        self.valid_moves = OnceCell::new();
        self.settle_phase_and_turn();
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn players(&self) -> &PlayerPool {
        &self.players
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    #[inline]
    pub fn turn_player(&self) -> &Player {
        self.players.player(self.turn)
    }

    /// Whether bombs are being dropped. The ended game counts as part
    /// of the bombing phase.
    #[inline]
    pub fn is_bombing_phase(&self) -> bool {
        matches!(self.phase, Phase::Bombing | Phase::End)
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::End
    }

    /// The turn player's legal moves, computed on first use and cached.
    pub fn valid_moves(&self) -> &[Move] {
        self.valid_moves
            .get_or_init(|| self.calc_valid_moves(self.turn))
    }

    /// Computes all legal moves of the given player in this state,
    /// sorted and deduplicated by move identity.
    pub fn calc_valid_moves(&self, player: PlayerId) -> Vec<Move> {
        let mut moves = Vec::new();

        self.scan_moves(player, |mv| {
            moves.push(mv);
            false
        });

        moves.sort_unstable_by_key(Move::key);
        moves.dedup();

        moves
    }

    /// Whether the given player has at least one legal move, without
    /// materializing the move list.
    pub fn has_possible_move(&self, player: PlayerId) -> bool {
        self.scan_moves(player, |_| true)
    }

    /// Scans the board for the player's legal moves, feeding each find
    /// to `sink`. Stops early (returning `true`) once `sink` does. The
    /// same move may be found more than once.
    fn scan_moves(&self, player: PlayerId, mut sink: impl FnMut(Move) -> bool) -> bool {
        let data = self.players.player(player);

        if self.is_over() || (self.is_bombing_phase() && !data.has_bomb()) {
            return false;
        }

        let board = &self.board;
        let tensor = board.tensor();

        for y in 0..board.height() {
            for x in 0..board.width() {
                let pos = board.pos(x, y);

                if self.is_bombing_phase() {
                    // Any tile that is not a hole may be bombed.
                    if tensor.tile_type(pos) != TileType::Absent
                        && sink(Move::new(player, x, y, MoveKind::Bomb))
                    {
                        return true;
                    }
                    continue;
                }

                let occupant = tensor.occupant(pos);

                if occupant.is_stone_of(player) {
                    // Each own stone anchors capture lines: cast rays in
                    // all eight directions looking for placements that
                    // close them.
                    for direction in Direction::ALL {
                        if self.scan_ray(player, data, pos, direction, &mut sink) {
                            return true;
                        }
                    }
                } else if occupant.is_expansion_stone() && data.has_override_stone() {
                    if sink(Move::new(player, x, y, MoveKind::Override)) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Walks one capture ray from an own stone, sinking each landing
    /// tile that would close a capturable line.
    fn scan_ray(
        &self,
        player: PlayerId,
        data: &Player,
        origin: crate::board::Pos,
        direction: Direction,
        sink: &mut impl FnMut(Move) -> bool,
    ) -> bool {
        let board = &self.board;
        let tensor = board.tensor();
        let width = board.width();

        let mut ray = board.ray(origin, direction);

        // The line must start with a capturable stone right next to the
        // anchor.
        match ray.next() {
            None => return false,
            Some(first) => {
                let occupant = tensor.occupant(first);
                if !occupant.is_occupied() || occupant.is_stone_of(player) {
                    return false;
                }
            }
        }

        while let Some(pos) = ray.next() {
            // A ray that loops back onto its anchor captures nothing.
            if pos == origin {
                return false;
            }

            let occupant = tensor.occupant(pos);
            let (x, y) = (pos.x(width), pos.y(width));

            if occupant.is_occupied() {
                if data.has_override_stone() && sink(Move::new(player, x, y, MoveKind::Override)) {
                    return true;
                }

                if occupant.is_stone_of(player) {
                    // Own stones cannot be captured past.
                    return false;
                }
            } else {
                // An unbroken line of capturable stones ends on a free
                // tile; the tile type decides the move.
                let stop = match tensor.tile_type(pos) {
                    TileType::Standard | TileType::Inversion => {
                        sink(Move::new(player, x, y, MoveKind::Placement(PlacementPref::Plain)))
                    }

                    TileType::Bonus => {
                        sink(Move::new(
                            player,
                            x,
                            y,
                            MoveKind::Placement(PlacementPref::Bonus(BonusKind::Bomb)),
                        )) || sink(Move::new(
                            player,
                            x,
                            y,
                            MoveKind::Placement(PlacementPref::Bonus(BonusKind::OverrideStone)),
                        ))
                    }

                    TileType::Choice => {
                        // Stones may be swapped with every player,
                        // including oneself.
                        let mut stop = false;
                        for other in self.players.iter() {
                            if sink(Move::new(
                                player,
                                x,
                                y,
                                MoveKind::Placement(PlacementPref::Choice(other.id())),
                            )) {
                                stop = true;
                                break;
                            }
                        }
                        stop
                    }

                    TileType::Absent => false,
                };

                return stop;
            }
        }

        false
    }

    /// Builds a move at the given coordinates from a wire preference
    /// byte, honoring the current phase and the tile type.
    ///
    /// Returns `None` for coordinates off the board, holes and
    /// preferences that do not fit the target tile.
    pub fn build_move(&self, x: usize, y: usize, pref: u8) -> Option<Move> {
        if !self.board.has_position(x, y) {
            error!("there is no position ({x}, {y}) on the board");
            return None;
        }

        let pos = self.board.pos(x, y);
        let tile = self.board.tensor().tile_type(pos);

        if tile == TileType::Absent {
            return None;
        }

        if self.is_bombing_phase() {
            return Some(Move::new(self.turn, x, y, MoveKind::Bomb));
        }

        let kind = match tile {
            TileType::Standard => {
                if self.board.tensor().occupant(pos).is_occupied() {
                    MoveKind::Override
                } else {
                    MoveKind::Placement(PlacementPref::Plain)
                }
            }
            TileType::Inversion => MoveKind::Placement(PlacementPref::Plain),
            TileType::Choice => {
                let with = PlayerId::new(pref)?;
                if with.get() > self.board.players() {
                    return None;
                }
                MoveKind::Placement(PlacementPref::Choice(with))
            }
            TileType::Bonus => match pref {
                20 => MoveKind::Placement(PlacementPref::Bonus(BonusKind::Bomb)),
                21 => MoveKind::Placement(PlacementPref::Bonus(BonusKind::OverrideStone)),
                _ => return None,
            },
            TileType::Absent => return None,
        };

        Some(Move::new(self.turn, x, y, kind))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.players)?;
        writeln!(f, "{}", self.board)?;
        writeln!(f, "Phase: {}", self.phase)
    }
}
