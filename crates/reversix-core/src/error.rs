//! Error types.

use thiserror::Error;

/// Errors produced while parsing a board encoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("syntax error on line {line} of the board encoding")]
    Syntax { line: usize },

    #[error("board encoding ends unexpectedly on line {line}")]
    UnexpectedEnd { line: usize },

    #[error("transition {transition} is not valid")]
    InvalidTransition { transition: String },
}

/// Errors produced while decoding a move packet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("move packet is {0} bytes long, expected 5")]
    BadLength(usize),

    #[error("move packet does not describe a playable move in this state")]
    BadMove,
}
