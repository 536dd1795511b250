use chess_core::GameStatus;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A move was requested on a position that is already terminal.
    #[error("no legal moves: position is already {0}")]
    NoLegalMoves(GameStatus),
    /// Search depth must be a positive number of plies.
    #[error("invalid search depth {0}: depth must be at least 1")]
    InvalidDepth(u32),
}
