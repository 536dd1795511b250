use std::fmt;

use log::debug;

use crate::board::{Board, BoardSnapshot};
use crate::error::{MalformedStateError, MoveError};
use crate::moves::Move;
use crate::piece::Color;

/// Status of the side to move. `Checkmate` and `Stalemate` are terminal:
/// there are no legal moves left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate => write!(f, "checkmate"),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// A board together with the derived status of its side to move. This is
/// the unit exchanged with display layers and driver loops; they read it
/// and never mutate it.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    status: GameStatus,
}

impl GameState {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Wraps a board maintained by the core, recomputing the status from
    /// the legal-move count and check state of the side to move.
    pub fn from_board(board: Board) -> Self {
        let status = status_of(&board);
        Self { board, status }
    }

    /// Builds a state from interchange data, validating the board
    /// invariants.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Result<Self, MalformedStateError> {
        Ok(Self::from_board(Board::from_snapshot(snapshot)?))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Legal moves for the side to move, in deterministic order.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves()
    }

    /// Validates and plays a move, returning the advanced state. This state
    /// is left untouched on error.
    pub fn apply_move(&self, mv: Move) -> Result<GameState, MoveError> {
        let next = Self::from_board(self.board.apply(mv)?);
        if next.status.is_terminal() {
            debug!("{} after {}", next.status, mv);
        }
        Ok(next)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn status_of(board: &Board) -> GameStatus {
    let in_check = board.is_in_check(board.side_to_move());
    let has_moves = !board.legal_moves().is_empty();
    match (in_check, has_moves) {
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, true) => GameStatus::Ongoing,
        (false, false) => GameStatus::Stalemate,
    }
}
