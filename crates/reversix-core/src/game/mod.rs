//! Game state: players, phases and the state machine driving them.

mod phase;
mod player;
mod state;

pub use phase::Phase;
pub use player::{Player, PlayerId, PlayerPool};
pub use state::State;
