use chess_core::{Board, Color, Move};
use log::{debug, trace};

use crate::evaluation::evaluate_position;

/// Base magnitude of a checkmate score. Mate scores are offset by the
/// remaining depth so that faster mates outrank slower ones and the mated
/// side prefers to delay.
pub const MATE_VALUE: i32 = 1_000_000;

/// Score of a stalemate.
pub const DRAW_SCORE: i32 = 0;

/// Outcome of a search: the minimax score of the position from White's
/// perspective, and the best move when the position has any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    pub best_move: Option<Move>,
}

/// Searches `depth` plies with the full alpha-beta window. The result is
/// the same a full unpruned minimax would return for this position and
/// depth; pruning only skips work, never changes the answer.
pub fn search_best_move(board: &Board, depth: u32) -> SearchOutcome {
    let outcome = search(board, depth, i32::MIN, i32::MAX);
    debug!(
        "searched {} to depth {}: score {}, best {}",
        board.side_to_move(),
        depth,
        outcome.score,
        outcome
            .best_move
            .map_or_else(|| "none".to_string(), |mv| mv.to_string()),
    );
    outcome
}

/// Minimax with alpha-beta pruning: White maximizes, Black minimizes.
/// Synchronous and recursive; the stack is bounded by `depth`, and every
/// level owns its immutable board. Runs to completion at the requested
/// depth; there is no time cutoff.
pub fn search(board: &Board, depth: u32, mut alpha: i32, mut beta: i32) -> SearchOutcome {
    if depth == 0 {
        return SearchOutcome {
            score: evaluate_position(board),
            best_move: None,
        };
    }

    let moves = board.legal_moves();
    if moves.is_empty() {
        return SearchOutcome {
            score: terminal_score(board, depth),
            best_move: None,
        };
    }

    let maximizing = board.side_to_move() == Color::White;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for mv in moves {
        let child = board.apply_unchecked(mv);
        let score = search(&child, depth - 1, alpha, beta).score;
        trace!("depth {depth}: {mv} scores {score}");

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            beta = beta.min(best_score);
        }

        // The opponent already has a better alternative elsewhere; no
        // sibling of this node can affect the result above us.
        if alpha >= beta {
            break;
        }
    }

    SearchOutcome {
        score: best_score,
        best_move,
    }
}

/// Score of a position whose side to move has no legal moves: checkmate
/// when in check, stalemate otherwise. The remaining depth is added to the
/// mate magnitude, so a mate reached in fewer plies scores higher.
fn terminal_score(board: &Board, depth: u32) -> i32 {
    let side = board.side_to_move();
    if board.is_in_check(side) {
        match side {
            Color::White => -(MATE_VALUE + depth as i32),
            Color::Black => MATE_VALUE + depth as i32,
        }
    } else {
        DRAW_SCORE
    }
}
