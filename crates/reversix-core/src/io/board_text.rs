//! Parser for the board text encoding.
//!
//! The encoding is line oriented: the number of players, the initial
//! override stone count, the initial bomb count and radius, the board
//! dimensions as `height width`, one line per tile row, and finally any
//! number of extra transition declarations of the form
//! `x1 y1 d1 <-> x2 y2 d2`.

use crate::board::{Board, BoardTensor, Direction, Occupant, Pos, TileType, Transition, MAX_DIMENSION};
use crate::error::BoardParseError;
use crate::game::{PlayerPool, State};

/// A successfully parsed board encoding, ready to be turned into a
/// [`Board`] or an initial [`State`].
#[derive(Debug, PartialEq)]
pub struct ParsedBoard {
    board: Board,
    override_stones: u32,
    bombs: u32,
}

impl ParsedBoard {
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Builds the initial state: every player holds the configured
    /// override stones and bombs, and player 1 is about to move.
    pub fn into_state(self) -> State {
        let players =
            PlayerPool::with_uniform_resources(self.board.players(), self.override_stones, self.bombs);

        State::new(self.board, players)
    }
}

/// Reads lines and tracks line numbers for error reports.
struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    number: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> LineReader<'a> {
        LineReader {
            lines: text.lines(),
            number: 0,
        }
    }

    fn next(&mut self) -> Result<&'a str, BoardParseError> {
        self.number += 1;
        self.lines
            .next()
            .map(str::trim_end)
            .ok_or(BoardParseError::UnexpectedEnd { line: self.number })
    }

    fn syntax_error(&self) -> BoardParseError {
        BoardParseError::Syntax { line: self.number }
    }
}

/// Parses a token as an unsigned decimal number, rejecting signs and
/// other notation `from_str` would accept.
fn parse_number(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Parses a board encoding.
pub fn parse_board(text: &str) -> Result<ParsedBoard, BoardParseError> {
    let mut reader = LineReader::new(text);

    let players = parse_number(reader.next()?)
        .filter(|&n| (2..=8).contains(&n))
        .ok_or_else(|| reader.syntax_error())? as u8;

    let override_stones = parse_number(reader.next()?).ok_or_else(|| reader.syntax_error())?;

    let (bombs, bomb_radius) = {
        let line = reader.next()?;
        let mut parts = line.split(' ');
        let bombs = parts.next().and_then(parse_number);
        let radius = parts.next().and_then(parse_number);

        match (bombs, radius, parts.next()) {
            (Some(bombs), Some(radius), None) => (bombs, radius),
            _ => return Err(reader.syntax_error()),
        }
    };

    let (height, width) = {
        let line = reader.next()?;
        let mut parts = line.split(' ');
        let height = parts.next().and_then(parse_number);
        let width = parts.next().and_then(parse_number);

        match (height, width, parts.next()) {
            (Some(height), Some(width), None)
                if (1..=MAX_DIMENSION).contains(&(height as usize))
                    && (1..=MAX_DIMENSION).contains(&(width as usize)) =>
            {
                (height as usize, width as usize)
            }
            _ => return Err(reader.syntax_error()),
        }
    };

    // Tile rows.
    let mut tiles = Vec::with_capacity(width * height);

    for _ in 0..height {
        let line = reader.next()?;
        let row: Vec<&str> = line.split(' ').collect();

        if row.len() != width {
            return Err(reader.syntax_error());
        }

        for token in row {
            let mut chars = token.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(symbol), None) => symbol,
                _ => return Err(reader.syntax_error()),
            };

            if !matches!(symbol, '0'..='8' | 'c' | 'i' | 'b' | 'x' | '-') {
                return Err(reader.syntax_error());
            }

            tiles.push(symbol);
        }
    }

    // Extra transition declarations until the end of the input.
    let mut transitions = Vec::new();

    loop {
        let line = match reader.next() {
            Ok(line) => line,
            Err(BoardParseError::UnexpectedEnd { .. }) => break,
            Err(e) => return Err(e),
        };

        transitions.push(parse_transition(line).ok_or_else(|| reader.syntax_error())?);
    }

    build_board(players, bomb_radius, width, height, &tiles, &transitions).map(|board| ParsedBoard {
        board,
        override_stones,
        bombs,
    })
}

/// One endpoint pair of an extra transition declaration.
#[derive(Debug, Clone, Copy)]
struct TransitionDecl {
    x1: usize,
    y1: usize,
    d1: Direction,
    x2: usize,
    y2: usize,
    d2: Direction,
}

impl std::fmt::Display for TransitionDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} <-> {} {} {}",
            self.x1,
            self.y1,
            self.d1.encode(),
            self.x2,
            self.y2,
            self.d2.encode()
        )
    }
}

fn parse_transition(line: &str) -> Option<TransitionDecl> {
    let tokens: Vec<&str> = line.split(' ').collect();

    if tokens.len() != 7 || tokens[3] != "<->" {
        return None;
    }

    let coord = |token: &str| {
        parse_number(token).filter(|&n| (n as usize) < MAX_DIMENSION).map(|n| n as usize)
    };
    let direction = |token: &str| {
        parse_number(token).and_then(|n| u8::try_from(n).ok()).and_then(Direction::decode)
    };

    Some(TransitionDecl {
        x1: coord(tokens[0])?,
        y1: coord(tokens[1])?,
        d1: direction(tokens[2])?,
        x2: coord(tokens[4])?,
        y2: coord(tokens[5])?,
        d2: direction(tokens[6])?,
    })
}

fn build_board(
    players: u8,
    bomb_radius: u32,
    width: usize,
    height: usize,
    tiles: &[char],
    transitions: &[TransitionDecl],
) -> Result<Board, BoardParseError> {
    let mut tensor = BoardTensor::new(width, height);

    // Tile data plus the default grid adjacency.
    for y in 0..height {
        for x in 0..width {
            let pos = Pos::new(x, y, width);

            let (ty, occupant) = match tiles[pos.index()] {
                symbol @ '0'..='8' => (TileType::Standard, symbol as u8 - b'0'),
                'x' => (TileType::Standard, 9),
                '-' => (TileType::Absent, 0),
                'c' => (TileType::Choice, 0),
                'i' => (TileType::Inversion, 0),
                'b' => (TileType::Bonus, 0),
                _ => unreachable!("tile symbols are validated during parsing"),
            };

            tensor.set_tile_type(pos, ty);
            tensor.set_occupant(pos, Occupant::from_raw(occupant));

            for direction in Direction::ALL {
                tensor.set_transition(
                    pos,
                    direction,
                    Transition {
                        to: Pos::grid_neighbor(x, y, direction, width, height),
                        incoming: direction.invert(),
                    },
                );
            }
        }
    }

    // Sever every connection into or out of a hole.
    for y in 0..height {
        for x in 0..width {
            let pos = Pos::new(x, y, width);
            if tensor.tile_type(pos) == TileType::Absent {
                tensor.remove_tile(pos);
            }
        }
    }

    // Extra transitions. A declaration is rejected if either slot is
    // already wired.
    for decl in transitions {
        let invalid = || BoardParseError::InvalidTransition {
            transition: decl.to_string(),
        };

        if decl.x1 >= width || decl.y1 >= height || decl.x2 >= width || decl.y2 >= height {
            return Err(invalid());
        }

        let pos1 = Pos::new(decl.x1, decl.y1, width);
        let pos2 = Pos::new(decl.x2, decl.y2, width);

        if tensor.neighbor(pos1, decl.d1).is_some() || tensor.neighbor(pos2, decl.d2).is_some() {
            return Err(invalid());
        }

        tensor.set_transition(
            pos1,
            decl.d1,
            Transition {
                to: Some(pos2),
                incoming: decl.d2,
            },
        );
        tensor.set_transition(
            pos2,
            decl.d2,
            Transition {
                to: Some(pos1),
                incoming: decl.d1,
            },
        );
    }

    Ok(Board::new(tensor, players, bomb_radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_board() {
        let text = "2\n4\n3 2\n2 2\n1 2\n0 -\n";
        let parsed = parse_board(text).unwrap();
        let state = parsed.into_state();

        let board = state.board();
        assert_eq!(board.players(), 2);
        assert_eq!(board.bomb_radius(), 2);
        assert_eq!((board.width(), board.height()), (2, 2));

        let p1 = crate::game::PlayerId::new(1).unwrap();
        assert_eq!(state.players().player(p1).override_stones(), 4);
        assert_eq!(state.players().player(p1).bombs(), 3);

        assert!(board.tensor().occupant(board.pos(0, 0)).is_stone_of(p1));
        assert_eq!(board.tensor().tile_type(board.pos(1, 1)), TileType::Absent);
    }

    #[test]
    fn holes_are_disconnected_from_their_neighbors() {
        let text = "2\n0\n0 1\n1 3\n0 - 0\n";
        let board = parse_board(text).unwrap().into_board();

        assert_eq!(board.tensor().neighbor(board.pos(0, 0), Direction::East), None);
        assert_eq!(board.tensor().neighbor(board.pos(2, 0), Direction::West), None);
    }

    #[test]
    fn syntax_errors_carry_line_numbers() {
        assert_eq!(
            parse_board("9\n0\n0 1\n1 1\n0\n"),
            Err(BoardParseError::Syntax { line: 1 })
        ); // player count out of range
        assert_eq!(
            parse_board("2\n0\n0\n1 1\n0\n").unwrap_err(),
            BoardParseError::Syntax { line: 3 }
        ); // bomb radius missing
        assert_eq!(
            parse_board("2\n0\n0 1\n1 2\n0 q\n").unwrap_err(),
            BoardParseError::Syntax { line: 5 }
        ); // bad tile symbol
        assert_eq!(
            parse_board("2\n0\n0 1\n2 2\n0 0\n").unwrap_err(),
            BoardParseError::UnexpectedEnd { line: 6 }
        ); // missing tile row
    }

    #[test]
    fn row_width_must_match_the_header() {
        assert_eq!(
            parse_board("2\n0\n0 1\n1 3\n0 0\n").unwrap_err(),
            BoardParseError::Syntax { line: 5 }
        );
    }

    #[test]
    fn transition_onto_wired_slot_is_rejected() {
        // (0,0) already has an east neighbor, so this portal clashes.
        let text = "2\n0\n0 1\n1 3\n0 0 0\n0 0 2 <-> 2 0 6\n";
        assert!(matches!(
            parse_board(text),
            Err(BoardParseError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn transition_out_of_bounds_is_rejected() {
        let text = "2\n0\n0 1\n1 3\n0 - 0\n0 0 2 <-> 5 5 6\n";
        assert!(matches!(
            parse_board(text),
            Err(BoardParseError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn malformed_transition_line_is_a_syntax_error() {
        let text = "2\n0\n0 1\n1 2\n0 0\nnot a transition\n";
        assert_eq!(
            parse_board(text).unwrap_err(),
            BoardParseError::Syntax { line: 6 }
        );
    }

    #[test]
    fn portal_is_wired_symmetrically() {
        let text = "2\n0\n0 1\n1 4\n0 - - 0\n0 0 2 <-> 3 0 6\n";
        let board = parse_board(text).unwrap().into_board();

        let a = board.pos(0, 0);
        let b = board.pos(3, 0);

        assert_eq!(board.tensor().neighbor(a, Direction::East), Some(b));
        assert_eq!(board.tensor().incoming_direction(a, Direction::East), Direction::West);
        assert_eq!(board.tensor().neighbor(b, Direction::West), Some(a));
        assert_eq!(board.tensor().incoming_direction(b, Direction::West), Direction::East);
    }
}
