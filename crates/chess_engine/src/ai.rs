use chess_core::{GameState, Move};
use log::info;

use crate::error::EngineError;
use crate::search::search_best_move;

/// One finished decision cycle: the move the engine chose and the state
/// reached by playing it.
#[derive(Debug, Clone)]
pub struct Decision {
    pub mv: Move,
    pub state: GameState,
}

/// Move selector configured with a fixed search depth. A search always runs
/// to completion at that depth; callers needing bounded latency choose the
/// depth accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    depth: u32,
}

impl Engine {
    pub fn new(depth: u32) -> Result<Self, EngineError> {
        if depth == 0 {
            return Err(EngineError::InvalidDepth(depth));
        }
        Ok(Self { depth })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Runs one decision cycle: search, pick the best move, apply it, and
    /// report the advanced state with its recomputed status. Fails without
    /// searching when the position is already terminal.
    pub fn choose_move(&self, state: &GameState) -> Result<Decision, EngineError> {
        let status = state.status();
        if status.is_terminal() {
            return Err(EngineError::NoLegalMoves(status));
        }

        let outcome = search_best_move(state.board(), self.depth);
        let mv = outcome
            .best_move
            .ok_or(EngineError::NoLegalMoves(status))?;
        let next = GameState::from_board(state.board().apply_unchecked(mv));
        info!(
            "{} plays {} (score {}, {})",
            state.side_to_move(),
            mv,
            outcome.score,
            next.status()
        );
        Ok(Decision { mv, state: next })
    }
}

/// Single-decision form of [`Engine::choose_move`].
pub fn choose_move(state: &GameState, depth: u32) -> Result<Decision, EngineError> {
    Engine::new(depth)?.choose_move(state)
}
