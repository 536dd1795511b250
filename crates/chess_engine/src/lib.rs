pub mod ai;
pub mod error;
pub mod evaluation;
pub mod search;

pub use ai::{choose_move, Decision, Engine};
pub use error::EngineError;
pub use evaluation::{evaluate_position, evaluate_position_with, piece_value};
pub use search::{search, search_best_move, SearchOutcome, DRAW_SCORE, MATE_VALUE};
