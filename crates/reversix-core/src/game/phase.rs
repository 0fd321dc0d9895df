//! Game phases.

use std::fmt;

/// The three phases of a match. Players place stones until nobody can,
/// then drop bombs until nobody can, then the game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Placement,
    Bombing,
    End,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Placement => "placement phase",
            Phase::Bombing => "bombing phase",
            Phase::End => "end",
        };
        write!(f, "{name}")
    }
}
