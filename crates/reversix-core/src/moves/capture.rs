//! Ray capture mechanics shared by stone moves.

use crate::board::{Board, Direction, Occupant, Pos};
use crate::game::PlayerId;

/// For each direction, the position of the capturing player's own stone
/// that closes a capturable line starting at `origin`, or `None` if the
/// line does not capture.
pub type CaptureBoundaries = [Option<Pos>; Direction::NUM];

/// Computes the capture boundaries of placing a stone of `player` at
/// `origin`.
///
/// A line captures if the first ray step hits an enemy or expansion
/// stone and the ray then reaches one of the player's own stones with
/// no gap. Rays that loop back onto the origin never capture, and a
/// line whose closing stone is the direct ray neighbor of the origin is
/// discarded as well.
///
/// Tile and stone data at the origin itself is not considered.
pub fn capturing_boundaries(board: &Board, player: PlayerId, origin: Pos) -> CaptureBoundaries {
    let mut boundaries = [None; Direction::NUM];
    let tensor = board.tensor();

    for direction in Direction::ALL {
        let mut ray = board.ray(origin, direction);

        let first = match ray.next() {
            Some(first) => first,
            None => continue,
        };

        let occupant = tensor.occupant(first);
        if !occupant.is_occupied() || occupant.is_stone_of(player) || first == origin {
            continue;
        }

        while let Some(pos) = ray.next() {
            let occupant = tensor.occupant(pos);

            if !occupant.is_occupied() || pos == origin {
                break;
            }

            if occupant.is_stone_of(player) {
                // A boundary on the direct neighbor means the ray came
                // back around without enclosing anything.
                if pos != first {
                    boundaries[direction.index()] = Some(pos);
                }
                break;
            }
        }
    }

    boundaries
}

/// Whether at least one direction captures.
pub fn has_capturing_direction(boundaries: &CaptureBoundaries) -> bool {
    boundaries.iter().any(Option::is_some)
}

/// Places the player's stone at `origin` and recolors every line up to
/// (excluding) its capture boundary.
pub fn apply_captures(
    board: &mut Board,
    player: PlayerId,
    origin: Pos,
    boundaries: &CaptureBoundaries,
) {
    let mut captured = Vec::new();

    for direction in Direction::ALL {
        let boundary = match boundaries[direction.index()] {
            Some(boundary) => boundary,
            None => continue,
        };

        for pos in board.ray(origin, direction) {
            if pos == boundary {
                break;
            }
            captured.push(pos);
        }
    }

    let stone = Occupant::stone(player);
    let tensor = board.tensor_mut();

    tensor.set_occupant(origin, stone);
    for pos in captured {
        tensor.set_occupant(pos, stone);
    }
}
