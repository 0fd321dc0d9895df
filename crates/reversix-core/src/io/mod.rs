//! Board and move encodings.

mod board_text;
mod wire;

pub use board_text::{parse_board, ParsedBoard};
pub use wire::{
    decode_move, encode_move, MOVE_PACKET_LEN, PREF_BONUS_BOMB, PREF_BONUS_OVERRIDE, PREF_NONE,
};
