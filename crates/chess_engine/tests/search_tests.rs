use chess_core::{Board, BoardSnapshot, Color, GameState, GameStatus, Piece, PieceKind, Square};
use chess_engine::{
    choose_move, evaluate_position, search, search_best_move, Engine, EngineError, MATE_VALUE,
};

fn sq(notation: &str) -> Square {
    Square::from_algebraic(notation).expect("valid square")
}

fn position(side: Color, pieces: &[(&str, PieceKind, Color)]) -> GameState {
    let mut snapshot = BoardSnapshot::empty(side);
    for &(square, kind, color) in pieces {
        snapshot.set(sq(square), Some(Piece::new(kind, color)));
    }
    GameState::from_snapshot(&snapshot).expect("valid position")
}

fn play(state: &GameState, from: &str, to: &str) -> GameState {
    let mv = state
        .legal_moves()
        .into_iter()
        .find(|mv| mv.from == sq(from) && mv.to == sq(to))
        .expect("move should be legal");
    state.apply_move(mv).expect("legal move should apply")
}

/// White mates with the rook lift to a8; the black king is boxed in by its
/// own pawns.
fn back_rank_mate_in_one() -> GameState {
    position(
        Color::White,
        &[
            ("g1", PieceKind::King, Color::White),
            ("a1", PieceKind::Rook, Color::White),
            ("g8", PieceKind::King, Color::Black),
            ("f7", PieceKind::Pawn, Color::Black),
            ("g7", PieceKind::Pawn, Color::Black),
            ("h7", PieceKind::Pawn, Color::Black),
        ],
    )
}

fn cornered_stalemate() -> GameState {
    position(
        Color::Black,
        &[
            ("f7", PieceKind::King, Color::White),
            ("g6", PieceKind::Queen, Color::White),
            ("h8", PieceKind::King, Color::Black),
        ],
    )
}

/// Reference implementation without pruning, for the score-preservation
/// property.
fn minimax(board: &Board, depth: u32) -> i32 {
    if depth == 0 {
        return evaluate_position(board);
    }
    let moves = board.legal_moves();
    if moves.is_empty() {
        return if board.is_in_check(board.side_to_move()) {
            match board.side_to_move() {
                Color::White => -(MATE_VALUE + depth as i32),
                Color::Black => MATE_VALUE + depth as i32,
            }
        } else {
            0
        };
    }

    let maximizing = board.side_to_move() == Color::White;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in moves {
        let score = minimax(&board.apply_unchecked(mv), depth - 1);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

#[test]
fn pruning_preserves_the_minimax_score() {
    let opening = {
        let mut state = GameState::new();
        state = play(&state, "e2", "e4");
        play(&state, "d7", "d5")
    };

    let sparse = position(
        Color::White,
        &[
            ("e1", PieceKind::King, Color::White),
            ("a1", PieceKind::Rook, Color::White),
            ("e8", PieceKind::King, Color::Black),
        ],
    );

    for depth in 1..=2 {
        assert_eq!(
            search_best_move(GameState::new().board(), depth).score,
            minimax(GameState::new().board(), depth),
            "start position, depth {depth}"
        );
        assert_eq!(
            search_best_move(opening.board(), depth).score,
            minimax(opening.board(), depth),
            "open center, depth {depth}"
        );
    }
    for depth in 1..=3 {
        assert_eq!(
            search_best_move(sparse.board(), depth).score,
            minimax(sparse.board(), depth),
            "rook endgame, depth {depth}"
        );
        assert_eq!(
            search_best_move(back_rank_mate_in_one().board(), depth).score,
            minimax(back_rank_mate_in_one().board(), depth),
            "mate in one, depth {depth}"
        );
    }
}

#[test]
fn depth_zero_returns_the_static_evaluation() {
    let state = GameState::new();
    let outcome = search(state.board(), 0, i32::MIN, i32::MAX);
    assert_eq!(outcome.score, evaluate_position(state.board()));
    assert_eq!(outcome.best_move, None);
}

#[test]
fn mate_in_one_is_found_and_preferred_over_slower_mates() {
    let state = back_rank_mate_in_one();

    // The mate lands one ply below the root, so its score carries the
    // remaining depth at that node.
    let outcome = search_best_move(state.board(), 3);
    let best = outcome.best_move.expect("a best move exists");
    assert_eq!((best.from, best.to), (sq("a1"), sq("a8")));
    assert_eq!(outcome.score, MATE_VALUE + 2);

    // Deeper searches still take the fastest mate: longer mating lines
    // terminate with less remaining depth and score lower.
    let outcome = search_best_move(state.board(), 4);
    let best = outcome.best_move.expect("a best move exists");
    assert_eq!((best.from, best.to), (sq("a1"), sq("a8")));
    assert_eq!(outcome.score, MATE_VALUE + 3);
}

#[test]
fn fools_mate_is_detected() {
    let mut state = GameState::new();
    for (from, to) in [("f2", "f4"), ("e7", "e5"), ("g2", "g4")] {
        state = play(&state, from, to);
    }

    let outcome = search_best_move(state.board(), 4);
    let best = outcome.best_move.expect("a best move exists");
    assert_eq!((best.from, best.to), (sq("d8"), sq("h4")));
    assert_eq!(outcome.score, -(MATE_VALUE + 3));

    let decision = choose_move(&state, 4).expect("position is not terminal");
    assert_eq!((decision.mv.from, decision.mv.to), (sq("d8"), sq("h4")));
    assert_eq!(decision.state.status(), GameStatus::Checkmate);
}

#[test]
fn stalemate_scores_zero() {
    let state = cornered_stalemate();
    for depth in 1..=3 {
        let outcome = search(state.board(), depth, i32::MIN, i32::MAX);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.best_move, None);
    }
}

#[test]
fn terminal_positions_are_rejected_before_searching() {
    let stalemate = cornered_stalemate();
    assert_eq!(
        choose_move(&stalemate, 3).unwrap_err(),
        EngineError::NoLegalMoves(GameStatus::Stalemate)
    );

    let mut mated = GameState::new();
    for (from, to) in [("f2", "f4"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        mated = play(&mated, from, to);
    }
    assert_eq!(
        choose_move(&mated, 3).unwrap_err(),
        EngineError::NoLegalMoves(GameStatus::Checkmate)
    );
}

#[test]
fn depth_must_be_positive() {
    assert_eq!(Engine::new(0).unwrap_err(), EngineError::InvalidDepth(0));
    assert_eq!(
        choose_move(&GameState::new(), 0).unwrap_err(),
        EngineError::InvalidDepth(0)
    );
}

#[test]
fn choose_move_is_deterministic() {
    let state = GameState::new();
    let engine = Engine::new(3).expect("positive depth");

    let first = engine.choose_move(&state).expect("moves exist");
    let second = engine.choose_move(&state).expect("moves exist");
    assert_eq!(first.mv, second.mv);

    // A separately constructed identical state decides identically too.
    let rebuilt = GameState::from_snapshot(&state.snapshot()).expect("valid");
    let third = engine.choose_move(&rebuilt).expect("moves exist");
    assert_eq!(first.mv, third.mv);
}

#[test]
fn a_decision_advances_the_game_by_one_ply() {
    let state = GameState::new();
    let decision = choose_move(&state, 2).expect("moves exist");

    assert_eq!(decision.state.side_to_move(), Color::Black);
    assert_eq!(decision.state.board().move_count(), 1);
    assert!(state
        .legal_moves()
        .iter()
        .any(|mv| mv.from == decision.mv.from && mv.to == decision.mv.to));
}
