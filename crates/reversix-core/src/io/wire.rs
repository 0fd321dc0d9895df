//! The five-byte move encoding.
//!
//! A move is sent as big-endian 16-bit x and y coordinates followed by
//! one preference byte: `0` for plain placements, override placements
//! and bombs, `1..=8` the player to swap with on a choice tile, `20` a
//! bonus tile claimed as a bomb, `21` a bonus tile claimed as an
//! override stone.

use crate::error::WireError;
use crate::game::State;
use crate::moves::{BonusKind, Move, MoveKind, PlacementPref};

pub const MOVE_PACKET_LEN: usize = 5;

pub const PREF_NONE: u8 = 0;
pub const PREF_BONUS_BOMB: u8 = 20;
pub const PREF_BONUS_OVERRIDE: u8 = 21;

/// Encodes a move into its wire form.
pub fn encode_move(mv: &Move) -> [u8; MOVE_PACKET_LEN] {
    let x = mv.x() as u16;
    let y = mv.y() as u16;

    let pref = match mv.kind() {
        MoveKind::Placement(PlacementPref::Choice(with)) => with.get(),
        MoveKind::Placement(PlacementPref::Bonus(BonusKind::Bomb)) => PREF_BONUS_BOMB,
        MoveKind::Placement(PlacementPref::Bonus(BonusKind::OverrideStone)) => PREF_BONUS_OVERRIDE,
        _ => PREF_NONE,
    };

    let xb = x.to_be_bytes();
    let yb = y.to_be_bytes();

    [xb[0], xb[1], yb[0], yb[1], pref]
}

/// Decodes a move packet against a state, resolving the move kind from
/// the phase and the target tile.
pub fn decode_move(state: &State, packet: &[u8]) -> Result<Move, WireError> {
    if packet.len() != MOVE_PACKET_LEN {
        return Err(WireError::BadLength(packet.len()));
    }

    let x = u16::from_be_bytes([packet[0], packet[1]]) as usize;
    let y = u16::from_be_bytes([packet[2], packet[3]]) as usize;
    let pref = packet[4];

    state.build_move(x, y, pref).ok_or(WireError::BadMove)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PlayerId;
    use crate::io::parse_board;

    fn player(id: u8) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    #[test]
    fn encodes_coordinates_big_endian() {
        let mv = Move::new(player(1), 33, 7, MoveKind::Placement(PlacementPref::Plain));
        assert_eq!(encode_move(&mv), [0, 33, 0, 7, 0]);
    }

    #[test]
    fn encodes_preferences() {
        let choice = Move::new(
            player(1),
            1,
            2,
            MoveKind::Placement(PlacementPref::Choice(player(5))),
        );
        assert_eq!(encode_move(&choice)[4], 5);

        let bonus = Move::new(
            player(1),
            1,
            2,
            MoveKind::Placement(PlacementPref::Bonus(BonusKind::OverrideStone)),
        );
        assert_eq!(encode_move(&bonus)[4], PREF_BONUS_OVERRIDE);

        let bomb = Move::new(player(1), 1, 2, MoveKind::Bomb);
        assert_eq!(encode_move(&bomb)[4], PREF_NONE);
    }

    #[test]
    fn decode_resolves_kind_from_state() {
        let text = "2\n0\n0 1\n1 4\n1 2 0 b\n";
        let state = parse_board(text).unwrap().into_state();

        let mv = decode_move(&state, &[0, 2, 0, 0, 0]).unwrap();
        assert!(matches!(mv.kind(), MoveKind::Placement(PlacementPref::Plain)));
        assert_eq!(mv.player(), state.turn());

        let bonus = decode_move(&state, &[0, 3, 0, 0, PREF_BONUS_BOMB]).unwrap();
        assert!(matches!(
            bonus.kind(),
            MoveKind::Placement(PlacementPref::Bonus(BonusKind::Bomb))
        ));
    }

    #[test]
    fn decode_rejects_bad_packets() {
        let text = "2\n0\n0 1\n1 4\n1 2 0 0\n";
        let state = parse_board(text).unwrap().into_state();

        assert_eq!(
            decode_move(&state, &[0, 0, 0]).unwrap_err(),
            WireError::BadLength(3)
        );
        assert_eq!(
            decode_move(&state, &[0, 9, 0, 9, 0]).unwrap_err(),
            WireError::BadMove
        );
    }

    #[test]
    fn roundtrip_through_state() {
        let text = "2\n0\n0 1\n1 4\n1 2 0 0\n";
        let state = parse_board(text).unwrap().into_state();

        for mv in state.valid_moves() {
            let decoded = decode_move(&state, &encode_move(mv)).unwrap();
            assert_eq!(&decoded, mv);
        }
    }
}
