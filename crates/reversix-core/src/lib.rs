//! Search engine core for a multi-player Reversi variant played on
//! boards with portals, holes and special tiles.
//!
//! The crate is split along the lifecycle of a move computation:
//!
//! - [`board`] — the playing field: tiles, occupants, the transition
//!   table and the ray/BFS iterators that walk it.
//! - [`game`] — players, phases and the [`game::State`] machine.
//! - [`moves`] — the move model: validity, capture computation and
//!   execution.
//! - [`search`] — minimax and generalized alpha-beta over pluggable
//!   cutoff, evaluation, generation and aspiration-window policies.
//! - [`time`] — depth scheduling for iterative deepening.
//! - [`engine`] — the deepening driver tying all of the above together.
//! - [`io`] — the board text format and the move wire encoding.

pub mod board;
pub mod engine;
pub mod error;
pub mod game;
pub mod io;
pub mod moves;
pub mod search;
pub mod time;

pub use engine::{Engine, SearchAlgorithm, SearchConfig};
pub use error::{BoardParseError, WireError};
pub use game::State;
pub use moves::Move;
pub use search::{SearchCancelled, SearchContext};
