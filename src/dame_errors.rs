//! Errors used throughout the dame engine.
//!
//! Rule violations are expected, recoverable outcomes: `IllegalMoveReason`
//! names which legality rule a proposed move broke, and the caller is expected
//! to retry with another move. `DameError` wraps that taxonomy together with
//! the input-parsing and game-flow failures of the higher-level API.
//!
//! `CorruptState` is the one variant that signals a bug rather than bad input:
//! it is produced when the piece registries disagree with the board.

use std::error::Error;
use std::fmt;

use crate::game_state::dame_types::{Coord, Side};

/// Why `check_move` rejected a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// A coordinate lies outside the 8x8 grid.
    OutOfBounds(Coord),
    /// A non-jump was offered while a capture is mandatory.
    ForcedCaptureViolation,
    /// The source square does not hold a piece of the moving side.
    NoOwnedPieceAtSource(Coord),
    /// The destination square is not empty.
    DestinationOccupied(Coord),
    /// The displacement is not a step or jump this piece may make.
    IllegalDirection,
    /// A jump whose midpoint does not hold an opponent piece.
    NoCapturableEnemy(Coord),
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveReason::OutOfBounds(c) => write!(f, "coordinate {c} is off the board"),
            IllegalMoveReason::ForcedCaptureViolation => {
                write!(f, "a capture is available and must be taken")
            }
            IllegalMoveReason::NoOwnedPieceAtSource(c) => write!(f, "you have no piece at {c}"),
            IllegalMoveReason::DestinationOccupied(c) => write!(f, "square {c} is occupied"),
            IllegalMoveReason::IllegalDirection => {
                write!(f, "that piece cannot move in that direction")
            }
            IllegalMoveReason::NoCapturableEnemy(c) => {
                write!(f, "no enemy piece to capture at {c}")
            }
        }
    }
}

impl Error for IllegalMoveReason {}

/// Unified error type for the game API, notation parsing, and engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DameError {
    IllegalMove(IllegalMoveReason),
    /// Mid-chain, only the capturing piece at this square may move.
    ChainContinuationRequired(Coord),
    /// The game has ended; payload is the winner.
    GameOver(Side),
    NoLegalMoves,
    InvalidNotation(String),
    InvalidDiagram(String),
    /// An engine failed to produce a move.
    EngineFailure(String),
    CorruptState(String),
}

impl fmt::Display for DameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DameError::IllegalMove(reason) => write!(f, "illegal move: {reason}"),
            DameError::ChainContinuationRequired(c) => {
                write!(f, "the piece at {c} must continue capturing")
            }
            DameError::GameOver(winner) => write!(f, "game is over, {winner} won"),
            DameError::NoLegalMoves => write!(f, "no legal moves available"),
            DameError::InvalidNotation(s) => write!(f, "invalid notation: {s}"),
            DameError::InvalidDiagram(s) => write!(f, "invalid board diagram: {s}"),
            DameError::EngineFailure(s) => write!(f, "engine failure: {s}"),
            DameError::CorruptState(s) => write!(f, "corrupt game state: {s}"),
        }
    }
}

impl Error for DameError {}

impl From<IllegalMoveReason> for DameError {
    fn from(reason: IllegalMoveReason) -> Self {
        DameError::IllegalMove(reason)
    }
}
