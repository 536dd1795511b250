use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::error::{MalformedStateError, MoveError, UnsupportedKind};
use crate::moves::{movement_rule, Move};
use crate::piece::{Color, Piece, PieceKind};
use crate::position::{Square, BOARD_SIZE};

const MAX_PIECES_PER_SIDE: usize = 16;
const KING_START_FILE: u8 = 4;

/// Position interchange format: one cell per square plus the side to move.
/// Enough for a display layer to render a position and for tests to build
/// arbitrary positions without playing from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
}

impl BoardSnapshot {
    pub fn empty(side_to_move: Color) -> Self {
        Self {
            squares: [None; 64],
            side_to_move,
        }
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, side: Color) {
        self.side_to_move = side;
    }
}

/// An immutable position snapshot: square-to-piece mapping, side to move,
/// and the number of plies played. Applying a move produces a new board, so
/// search branches never share mutable state.
#[derive(Debug, Clone)]
pub struct Board {
    pieces: HashMap<Square, Piece>,
    side_to_move: Color,
    move_count: u32,
}

impl Board {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut pieces = HashMap::new();
        for square in Square::all() {
            let piece = match square.rank() {
                0 => Some(Piece::new(back_rank[square.file() as usize], Color::White)),
                1 => Some(Piece::new(PieceKind::Pawn, Color::White)),
                6 => Some(Piece::new(PieceKind::Pawn, Color::Black)),
                7 => Some(Piece::new(back_rank[square.file() as usize], Color::Black)),
                _ => None,
            };
            if let Some(piece) = piece {
                pieces.insert(square, piece);
            }
        }

        Self {
            pieces,
            side_to_move: Color::White,
            move_count: 0,
        }
    }

    /// Builds a board from interchange data, validating the position
    /// invariants: one king per side, at most sixteen pieces per side, and
    /// the side not to move must not already stand in check (its king would
    /// be capturable).
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Result<Self, MalformedStateError> {
        let mut pieces = HashMap::new();
        for square in Square::all() {
            if let Some(piece) = snapshot.get(square) {
                pieces.insert(square, piece);
            }
        }
        let board = Self {
            pieces,
            side_to_move: snapshot.side_to_move(),
            move_count: 0,
        };
        board.validate()?;
        Ok(board)
    }

    /// Exports the position in the interchange format.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::empty(self.side_to_move);
        for (square, piece) in self.pieces() {
            snapshot.set(square, Some(piece));
        }
        snapshot
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Number of plies played since this board's origin position.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// All occupied squares in ascending `(file, rank)` order. The backing
    /// map is unordered; every traversal goes through this iterator so that
    /// results are reproducible across runs and platforms.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(square, _)| square)
    }

    /// Whether `by` attacks `square`, derived from the pseudo-legal moves of
    /// the attacking side. Deliberately no legality filtering here: the
    /// filter itself calls this, and the question "does anything cover this
    /// square" does not depend on the attacker's own king safety.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        let mut moves = Vec::new();
        for (from, piece) in self.pieces() {
            if piece.color != by {
                continue;
            }
            moves.clear();
            movement_rule(piece.kind)(self, from, piece, &mut moves);
            // A pawn's straight advance reaches a square without attacking it.
            let covers = moves.iter().any(|mv| {
                mv.to == square
                    && !(piece.kind == PieceKind::Pawn && mv.from.file() == mv.to.file())
            });
            if covers {
                return true;
            }
        }
        false
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .map_or(false, |square| self.is_square_attacked(square, color.opponent()))
    }

    /// Pseudo-legal moves for `side`: movement pattern and occupancy only,
    /// not yet checked for leaving the own king in check. Sorted ascending
    /// by origin square, then destination.
    pub fn pseudo_legal_moves(&self, side: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, piece) in self.pieces() {
            if piece.color == side {
                movement_rule(piece.kind)(self, from, piece, &mut moves);
            }
        }
        moves.sort_unstable_by_key(|mv| (mv.from, mv.to));
        moves
    }

    /// Legal moves for the side to move, in deterministic order. Each
    /// pseudo-legal move is simulated on a trial board and discarded if the
    /// mover's own king is then attacked; this uniform rule covers pins and
    /// discovered checks without special cases.
    pub fn legal_moves(&self) -> Vec<Move> {
        let side = self.side_to_move;
        self.pseudo_legal_moves(side)
            .into_iter()
            .filter(|&mv| !self.apply_unchecked(mv).is_in_check(side))
            .collect()
    }

    /// Applies a move already known to be legal (one produced by
    /// [`Board::legal_moves`]) without re-deriving the legal set. The search
    /// engine's inner loop runs on this.
    pub fn apply_unchecked(&self, mv: Move) -> Board {
        let mut pieces = self.pieces.clone();
        if let Some(piece) = pieces.remove(&mv.from) {
            pieces.insert(mv.to, piece);
        }
        Board {
            pieces,
            side_to_move: self.side_to_move.opponent(),
            move_count: self.move_count + 1,
        }
    }

    /// Validates and applies a requested move, returning the resulting
    /// board. Unsupported move types (castling, promotion, en passant) are
    /// rejected as such; anything else outside the legal set is illegal.
    /// This board is left untouched either way.
    pub fn apply(&self, mv: Move) -> Result<Board, MoveError> {
        if let Some(kind) = self.unsupported_kind(mv) {
            debug!("rejected {mv}: {kind} is not supported");
            return Err(MoveError::Unsupported { kind, mv });
        }

        let side = self.side_to_move;
        let legal = self
            .legal_moves()
            .into_iter()
            .find(|m| m.from == mv.from && m.to == mv.to)
            .ok_or(MoveError::Illegal { mv, side })?;
        Ok(self.apply_unchecked(legal))
    }

    /// Classifies a request as an unsupported move type, if it matches one:
    /// a king sliding two files from its starting square (castling), a pawn
    /// step onto its promotion rank (promotion), or a pawn capture-shaped
    /// step onto an empty square (en passant).
    fn unsupported_kind(&self, mv: Move) -> Option<UnsupportedKind> {
        let piece = self.piece_at(mv.from)?;
        match piece.kind {
            PieceKind::King => {
                let dfile = (mv.to.file() as i8 - mv.from.file() as i8).abs();
                if mv.from.file() == KING_START_FILE
                    && mv.from.rank() == piece.color.home_rank()
                    && mv.to.rank() == mv.from.rank()
                    && dfile == 2
                {
                    return Some(UnsupportedKind::Castling);
                }
            }
            PieceKind::Pawn => {
                let dfile = (mv.to.file() as i8 - mv.from.file() as i8).abs();
                let drank = mv.to.rank() as i8 - mv.from.rank() as i8;
                let one_step = drank == piece.color.pawn_direction() && dfile <= 1;
                if one_step && mv.to.rank() == piece.color.promotion_rank() {
                    return Some(UnsupportedKind::Promotion);
                }
                if one_step && dfile == 1 && self.piece_at(mv.to).is_none() {
                    return Some(UnsupportedKind::EnPassant);
                }
            }
            _ => {}
        }
        None
    }

    fn validate(&self) -> Result<(), MalformedStateError> {
        for color in [Color::White, Color::Black] {
            let mut kings = 0;
            let mut count = 0;
            for (_, piece) in self.pieces() {
                if piece.color == color {
                    count += 1;
                    if piece.kind == PieceKind::King {
                        kings += 1;
                    }
                }
            }
            if kings == 0 {
                return Err(MalformedStateError::MissingKing(color));
            }
            if kings > 1 {
                return Err(MalformedStateError::ExtraKing(color));
            }
            if count > MAX_PIECES_PER_SIDE {
                return Err(MalformedStateError::TooManyPieces { side: color, count });
            }
        }

        let opponent = self.side_to_move.opponent();
        if self.is_in_check(opponent) {
            return Err(MalformedStateError::OpponentInCheck(opponent));
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..BOARD_SIZE {
                let cell = Square::new(file, rank)
                    .and_then(|square| self.piece_at(square))
                    .map_or('.', |piece| piece.letter());
                write!(f, " {cell}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")
    }
}
