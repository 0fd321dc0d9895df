//! Board traversal: ray casting and breadth-first search.

use std::collections::{HashMap, VecDeque};

use super::{Board, Direction, Pos};

/// Casts a ray from an origin tile through the transition graph.
///
/// Each step follows the transition in the ray's current direction and
/// then bends the ray: the new direction is the inverse of the incoming
/// direction at the destination, so rays travel straight across plain
/// grid adjacency and reflect through portals.
///
/// The origin tile itself is never yielded; a ray that loops back onto
/// its origin yields the origin position, which callers use to detect
/// the no-capture-on-loop rule.
pub struct RayIter<'a> {
    board: &'a Board,
    origin: Pos,
    pos: Pos,
    direction: Direction,
}

impl<'a> RayIter<'a> {
    pub(super) fn new(board: &'a Board, origin: Pos, direction: Direction) -> RayIter<'a> {
        RayIter {
            board,
            origin,
            pos: origin,
            direction,
        }
    }

    /// Restarts the ray at its origin, casting in a new direction.
    pub fn reset(&mut self, direction: Direction) {
        self.pos = self.origin;
        self.direction = direction;
    }

    /// Current position of the ray head.
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Current direction of travel.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Iterator for RayIter<'_> {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        let transition = self.board.tensor().transition(self.pos, self.direction);
        let to = transition.to?;

        self.pos = to;
        self.direction = transition.incoming.invert();

        Some(to)
    }
}

/// Breadth-first traversal of every tile reachable within `radius` hops
/// of an origin, following transitions. Yields `(position, depth)`
/// pairs, origin included at depth 0.
///
/// A depth map doubles as the visited set, so the traversal terminates
/// on cyclic transition graphs and never yields a position twice.
pub struct BfsIter<'a> {
    board: &'a Board,
    radius: u32,
    pending: VecDeque<Pos>,
    depth: HashMap<Pos, u32>,
}

impl<'a> BfsIter<'a> {
    pub(super) fn new(board: &'a Board, origin: Pos, radius: u32) -> BfsIter<'a> {
        let mut pending = VecDeque::new();
        let mut depth = HashMap::new();

        pending.push_back(origin);
        depth.insert(origin, 0);

        BfsIter {
            board,
            radius,
            pending,
            depth,
        }
    }
}

impl Iterator for BfsIter<'_> {
    type Item = (Pos, u32);

    fn next(&mut self) -> Option<(Pos, u32)> {
        let pos = self.pending.pop_front()?;
        let depth = self.depth[&pos];

        if depth < self.radius {
            for direction in Direction::ALL {
                if let Some(neighbor) = self.board.tensor().neighbor(pos, direction) {
                    self.depth.entry(neighbor).or_insert_with(|| {
                        self.pending.push_back(neighbor);
                        depth + 1
                    });
                }
            }
        }

        Some((pos, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_board;

    fn open_board(width: usize, height: usize) -> Board {
        let grid = vec!["0"; width].join(" ");
        let rows = vec![grid; height].join("\n");
        let text = format!("2\n0\n0 1\n{height} {width}\n{rows}\n");
        parse_board(&text).unwrap().into_board()
    }

    #[test]
    fn ray_travels_straight_on_plain_grid() {
        let board = open_board(4, 4);
        let mut ray = board.ray(Pos::new(0, 0, 4), Direction::East);

        let path: Vec<Pos> = ray.by_ref().collect();
        assert_eq!(
            path,
            vec![Pos::new(1, 0, 4), Pos::new(2, 0, 4), Pos::new(3, 0, 4)]
        );
        assert_eq!(ray.direction(), Direction::East);
    }

    #[test]
    fn ray_reflects_through_portal() {
        // Holes at (1,0) and (2,3) free up the east slot of (0,0) and the
        // west slot of (3,3) so the portal declaration is accepted.
        let text = "2\n0\n0 1\n4 4\n\
                    0 - 0 0\n\
                    0 0 0 0\n\
                    0 0 0 0\n\
                    0 0 - 0\n\
                    0 0 2 <-> 3 3 6\n";
        let board = parse_board(text).unwrap().into_board();

        // Casting east out of (0,0) steps through the portal onto (3,3),
        // arriving through that tile's west slot and continuing east.
        let mut ray = board.ray(Pos::new(0, 0, 4), Direction::East);
        assert_eq!(ray.next(), Some(Pos::new(3, 3, 4)));
        assert_eq!(
            board
                .tensor()
                .incoming_direction(Pos::new(0, 0, 4), Direction::East),
            Direction::West
        );
        assert_eq!(ray.direction(), Direction::East);
        // (3,3) is on the east edge, so the ray ends there.
        assert_eq!(ray.next(), None);
    }

    #[test]
    fn bfs_respects_radius_and_cycles() {
        let board = open_board(5, 5);
        let visited: Vec<(Pos, u32)> = board.bfs(Pos::new(2, 2, 5), 1).collect();

        assert_eq!(visited.len(), 9);
        assert!(visited.iter().all(|&(_, d)| d <= 1));
        assert_eq!(visited[0], (Pos::new(2, 2, 5), 0));
    }

    #[test]
    fn bfs_covers_whole_board_without_repeats() {
        let board = open_board(3, 3);
        let visited: Vec<(Pos, u32)> = board.bfs(Pos::new(0, 0, 3), 10).collect();

        assert_eq!(visited.len(), 9);
        let mut seen: Vec<Pos> = visited.iter().map(|&(p, _)| p).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 9);
    }
}
