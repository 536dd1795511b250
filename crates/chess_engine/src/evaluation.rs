use chess_core::{Board, Color, Piece, PieceKind, Square};

// Material weights in pawn units.
pub const PAWN_VALUE: i32 = 1;
pub const KNIGHT_VALUE: i32 = 3;
pub const BISHOP_VALUE: i32 = 3;
pub const ROOK_VALUE: i32 = 5;
pub const QUEEN_VALUE: i32 = 9;

/// Material value of a piece kind. Kings carry none: king safety is
/// terminal detection in the search, not a material term.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => 0,
    }
}

/// Scores a board from White's perspective: positive favors White.
/// Material count only; terminal positions are scored by the search, which
/// checks the legal-move count before ever evaluating them.
pub fn evaluate_position(board: &Board) -> i32 {
    evaluate_position_with(board, |_, _| 0)
}

/// Material evaluation plus a positional bonus per (piece, square), the
/// extension point for piece-square tables and similar heuristics. The
/// bonus is added for White pieces and subtracted for Black ones.
pub fn evaluate_position_with<F>(board: &Board, positional: F) -> i32
where
    F: Fn(Piece, Square) -> i32,
{
    let mut score = 0;
    for (square, piece) in board.pieces() {
        let value = piece_value(piece.kind) + positional(piece, square);
        match piece.color {
            Color::White => score += value,
            Color::Black => score -= value,
        }
    }
    score
}
