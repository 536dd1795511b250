use chess_core::GameState;
use chess_engine::{Engine, EngineError};

const DEFAULT_DEPTH: u32 = 3;
const MAX_PLIES: u32 = 200;

/// Terminal driver: plays the engine against itself from the starting
/// position, one decision cycle per ply, until a terminal status or the
/// ply cap is reached. Search depth is the first argument (default 3).
fn main() {
    env_logger::init();

    let depth = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_DEPTH);

    let engine = match Engine::new(depth) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let mut state = GameState::new();
    println!("{}", state.board());

    for ply in 1..=MAX_PLIES {
        match engine.choose_move(&state) {
            Ok(decision) => {
                println!("{}. {}: {}", ply, state.side_to_move(), decision.mv);
                state = decision.state;
                println!("{}", state.board());
                if state.status().is_terminal() {
                    println!("game over: {}", state.status());
                    return;
                }
            }
            Err(EngineError::NoLegalMoves(status)) => {
                println!("game over: {status}");
                return;
            }
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    }

    println!("stopping after {MAX_PLIES} plies");
}
