use std::fmt;

use thiserror::Error;

use crate::moves::Move;
use crate::piece::Color;

/// Move types the engine deliberately does not implement. Requesting one is
/// a defined error, never a silent approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedKind {
    Castling,
    Promotion,
    EnPassant,
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedKind::Castling => write!(f, "castling"),
            UnsupportedKind::Promotion => write!(f, "promotion"),
            UnsupportedKind::EnPassant => write!(f, "en passant"),
        }
    }
}

/// Why a requested move was rejected. The board it was requested on is left
/// untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move {mv} is not legal for {side}")]
    Illegal { mv: Move, side: Color },
    #[error("{kind} is not supported: {mv}")]
    Unsupported { kind: UnsupportedKind, mv: Move },
}

/// Interchange data that violates the board invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedStateError {
    #[error("coordinates ({file}, {rank}) are outside the board")]
    InvalidCoordinate { file: u8, rank: u8 },
    #[error("{0} has no king")]
    MissingKing(Color),
    #[error("{0} has more than one king")]
    ExtraKing(Color),
    #[error("{side} has {count} pieces, the maximum is 16")]
    TooManyPieces { side: Color, count: usize },
    #[error("{0} is in check but it is not their turn to move")]
    OpponentInCheck(Color),
}
