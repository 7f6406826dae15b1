use std::fmt;

use tracing::trace;

use crate::{error::ChessError, movegen::attacked_destinations, types::*};

/// Placement of the standard starting position.
pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Mailbox board with per-color piece lists and a cached attacked-square map.
///
/// Every square listed in `pieces[c]` holds a piece of color `c` whose stored
/// `square` equals that square. The attacked map is only meaningful right
/// after [`Board::recompute_attacked_squares`]; any mutation makes it stale.
#[derive(Clone, Debug)]
pub struct Board {
    squares: [Option<Piece>; 64],
    pieces: [Vec<Square>; 2],
    kings: [Option<Square>; 2],
    attacked: [bool; 64],
    relocate_castling_rook: bool,
}

impl Board {
    pub fn startpos() -> Self {
        Self::from_placement(START_PLACEMENT).expect("start placement is well formed")
    }

    /// Parses a rank-major placement (rank 8 first, ranks split by `/`).
    ///
    /// A full FEN string is accepted; only its first field is read. Any
    /// unknown piece letter is rejected.
    pub fn from_placement(placement: &str) -> Result<Self, ChessError> {
        let field = placement.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = field.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::MalformedPlacement {
                reason: format!("expected 8 ranks, found {}", ranks.len()),
            });
        }

        let mut board = Board {
            squares: [None; 64],
            pieces: [Vec::with_capacity(16), Vec::with_capacity(16)],
            kings: [None; 2],
            attacked: [false; 64],
            relocate_castling_rook: true,
        };

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // placement lists rank 8 .. 1
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(ChessError::MalformedPlacement {
                            reason: format!("bad empty-square run '{ch}' on rank {}", rank + 1),
                        });
                    }
                    file += run as u8;
                } else {
                    let kind = PieceKind::from_letter(ch)
                        .ok_or(ChessError::InvalidPieceSymbol { symbol: ch })?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let square =
                        Square::new(file, rank).ok_or_else(|| ChessError::MalformedPlacement {
                            reason: format!("too many files on rank {}", rank + 1),
                        })?;
                    board.place(Piece::new(kind, color, square))?;
                    file += 1;
                }
                if file > 8 {
                    return Err(ChessError::MalformedPlacement {
                        reason: format!("too many files on rank {}", rank + 1),
                    });
                }
            }
            if file != 8 {
                return Err(ChessError::MalformedPlacement {
                    reason: format!("rank {} covers {file} files", rank + 1),
                });
            }
        }

        trace!(
            white = board.pieces[0].len(),
            black = board.pieces[1].len(),
            "board initialized"
        );
        Ok(board)
    }

    fn place(&mut self, piece: Piece) -> Result<(), ChessError> {
        let c = piece.color.idx();
        if piece.kind == PieceKind::King {
            if self.kings[c].is_some() {
                return Err(ChessError::MalformedPlacement {
                    reason: format!("more than one {} king", piece.color),
                });
            }
            self.kings[c] = Some(piece.square);
        }
        self.squares[piece.square.index()] = Some(piece);
        self.pieces[c].push(piece.square);
        Ok(())
    }

    /// Controls whether applying a recognized castle also moves the rook.
    pub fn with_castling_rook_hop(mut self, enabled: bool) -> Self {
        self.relocate_castling_rook = enabled;
        self
    }

    pub fn relocates_castling_rook(&self) -> bool {
        self.relocate_castling_rook
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Live pieces of `color`, in list order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces[color.idx()]
            .iter()
            .filter_map(|sq| self.squares[sq.index()].as_ref())
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.pieces[color.idx()].len()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.idx()]
    }

    /// Cached attacked flag; valid only after a recompute.
    pub fn is_attacked(&self, sq: Square) -> bool {
        self.attacked[sq.index()]
    }

    pub fn attacked_squares(&self) -> &[bool; 64] {
        &self.attacked
    }

    /// Whether `color`'s king stands on a square flagged in the cached map.
    pub fn king_attacked(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|sq| self.attacked[sq.index()])
    }

    /// Resets the attacked map, then marks every square controlled by the
    /// side that is not `side_to_move`.
    pub fn recompute_attacked_squares(&mut self, side_to_move: Color) {
        self.attacked = self.attack_map(side_to_move);
    }

    /// Squares controlled by the opponent of `side_to_move`, without touching
    /// the cached map.
    pub fn attack_map(&self, side_to_move: Color) -> [bool; 64] {
        let mut map = [false; 64];
        let mut targets = Vec::with_capacity(28);
        for piece in self.pieces(side_to_move.other()) {
            targets.clear();
            attacked_destinations(self, piece, &mut targets);
            for sq in &targets {
                map[sq.index()] = true;
            }
        }
        map
    }

    /// Drops the piece on the destination square from its color's list.
    ///
    /// The grid entry is left in place; the following [`Board::apply_move`]
    /// overwrites it.
    pub fn detect_and_remove_capture(&mut self, mv: Move) -> Option<Piece> {
        let captured = self.squares[mv.to.index()]?;
        let c = captured.color.idx();
        self.pieces[c].retain(|&sq| sq != mv.to);
        if captured.kind == PieceKind::King {
            self.kings[c] = None;
        }
        Some(captured)
    }

    /// Moves the piece on `mv.from` to `mv.to`, marking it as moved.
    ///
    /// Handles promotion (when the move carries a suffix and the mover is a
    /// pawn) and, if enabled, the rook hop of a recognized castle. Capture
    /// bookkeeping must already have been done by
    /// [`Board::detect_and_remove_capture`].
    pub fn apply_move(&mut self, mv: Move) -> Result<(), ChessError> {
        let mut piece = self.squares[mv.from.index()]
            .ok_or(ChessError::EmptySquare { square: mv.from })?;

        let rook_hop = if piece.kind == PieceKind::King && self.relocate_castling_rook {
            self.castle_rook_hop(&piece, mv)
        } else {
            None
        };

        self.squares[mv.from.index()] = None;
        piece.square = mv.to;
        piece.moved = true;
        let c = piece.color.idx();
        if let Some(slot) = self.pieces[c].iter_mut().find(|sq| **sq == mv.from) {
            *slot = mv.to;
        }
        if piece.kind == PieceKind::King {
            self.kings[c] = Some(mv.to);
        }
        self.squares[mv.to.index()] = Some(piece);

        if piece.kind == PieceKind::Pawn
            && let Some(kind) = mv.promotion
        {
            self.promote(mv.to, piece.color, kind);
        }

        if let Some((rook_from, rook_to)) = rook_hop {
            self.relocate(rook_from, rook_to);
        }
        Ok(())
    }

    /// Capture bookkeeping followed by [`Board::apply_move`].
    ///
    /// Fails without touching the board if `mv.from` is empty.
    pub fn make_move(&mut self, mv: Move) -> Result<Option<Piece>, ChessError> {
        if self.is_empty(mv.from) {
            return Err(ChessError::EmptySquare { square: mv.from });
        }
        let captured = self.detect_and_remove_capture(mv);
        self.apply_move(mv)?;
        Ok(captured)
    }

    /// A deep copy with `mv` played on it.
    pub fn after(&self, mv: Move) -> Result<Board, ChessError> {
        let mut next = self.clone();
        next.make_move(mv)?;
        Ok(next)
    }

    fn promote(&mut self, sq: Square, color: Color, kind: PieceKind) {
        let c = color.idx();
        self.pieces[c].retain(|&s| s != sq);
        self.pieces[c].push(sq);
        self.squares[sq.index()] = Some(Piece::new(kind, color, sq));
    }

    /// Rook squares for a king move shaped like a castle: unmoved king, same
    /// rank, two or more files. The rook is the first piece past the king in
    /// the direction of travel and lands beside the king's destination.
    fn castle_rook_hop(&self, king: &Piece, mv: Move) -> Option<(Square, Square)> {
        if king.moved || mv.from.rank() != mv.to.rank() {
            return None;
        }
        let df = mv.to.file() as i8 - mv.from.file() as i8;
        if df.abs() < 2 {
            return None;
        }
        let step = df.signum();
        let mut next = mv.from.offset(step, 0);
        while let Some(sq) = next {
            if let Some(pc) = self.squares[sq.index()] {
                if sq == mv.to
                    || pc.kind != PieceKind::Rook
                    || pc.color != king.color
                    || pc.moved
                {
                    return None;
                }
                return Some((sq, mv.to.offset(-step, 0)?));
            }
            next = sq.offset(step, 0);
        }
        None
    }

    fn relocate(&mut self, from: Square, to: Square) {
        let Some(mut piece) = self.squares[from.index()].take() else {
            return;
        };
        piece.square = to;
        piece.moved = true;
        if let Some(slot) = self.pieces[piece.color.idx()]
            .iter_mut()
            .find(|sq| **sq == from)
        {
            *slot = to;
        }
        self.squares[to.index()] = Some(piece);
    }

    /// Canonical placement key for the transposition table: one character
    /// per square (piece letter or a blank), rank 8 first, each rank
    /// terminated by `/`.
    ///
    /// Side to move and castling state are not encoded.
    pub fn state_key(&self) -> String {
        let mut key = String::with_capacity(72);
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let sq = Square::new(file, rank).expect("file and rank are in range");
                key.push(self.squares[sq.index()].map_or(' ', |pc| pc.symbol()));
            }
            key.push('/');
        }
        key
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in (0..8u8).rev() {
            write!(f, "{}", rank + 1)?;
            for file in 0..8u8 {
                let sq = Square::new(file, rank).expect("file and rank are in range");
                let symbol = self.squares[sq.index()].map_or('.', |pc| pc.symbol());
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
