//! Legal move filtering and game-state queries.

use crate::{board::Board, movegen::movable_destinations, types::*};

impl Board {
    /// All legal moves for `color`.
    ///
    /// Pseudo-legal moves are played on a copy of the board and dropped if
    /// they leave `color`'s king attacked. Pawn moves onto the last rank
    /// expand into four promotion variants. Castling moves come last.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        let mut targets = Vec::with_capacity(28);

        for piece in self.pieces(color) {
            targets.clear();
            movable_destinations(self, piece, &mut targets);

            for &to in &targets {
                if piece.kind == PieceKind::Pawn && to.rank() == color.promotion_rank() {
                    for kind in PROMOTION_CHOICES {
                        let mv = Move::with_promotion(piece.square, to, kind);
                        if !self.simulate_move(mv, color) {
                            out.push(mv);
                        }
                    }
                } else {
                    let mv = Move::new(piece.square, to);
                    if !self.simulate_move(mv, color) {
                        out.push(mv);
                    }
                }
            }
        }

        out.extend(self.find_castle_moves(color));
        out
    }

    /// Plays `mv` on a copy and reports whether `color`'s king is attacked
    /// afterwards. The receiver is untouched.
    ///
    /// A move that cannot be played at all counts as exposing the king.
    pub fn simulate_move(&self, mv: Move, color: Color) -> bool {
        let mut test = self.clone();
        if test.make_move(mv).is_err() {
            return true;
        }
        test.recompute_attacked_squares(color);
        test.king_attacked(color)
    }

    /// True when `color`'s king is attacked and `color` has no legal move.
    ///
    /// Computes its own attack map, so the cached one need not be current.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        let Some(king) = self.king_square(color) else {
            return false;
        };
        self.attack_map(color)[king.index()] && self.legal_moves(color).is_empty()
    }

    /// Castling moves for `color`, kingside first.
    ///
    /// The king must be unmoved and not attacked. Scanning outward along the
    /// king's rank, the first occupied square must hold an unmoved friendly
    /// rook and every square between king and rook must be unattacked;
    /// otherwise that side yields nothing. The move encodes only the king's
    /// destination on the g- or c-file.
    pub fn find_castle_moves(&self, color: Color) -> Vec<Move> {
        let mut out = Vec::with_capacity(2);
        let Some(king_sq) = self.king_square(color) else {
            return out;
        };
        let Some(king) = self.piece_at(king_sq) else {
            return out;
        };
        let attacked = self.attack_map(color);
        if king.moved || attacked[king_sq.index()] {
            return out;
        }

        for (step, dest_file) in [(1i8, 6u8), (-1i8, 2u8)] {
            if let Some(dest) = self.castle_destination(king_sq, color, step, dest_file, &attacked)
            {
                out.push(Move::new(king_sq, dest));
            }
        }
        out
    }

    fn castle_destination(
        &self,
        king_sq: Square,
        color: Color,
        step: i8,
        dest_file: u8,
        attacked: &[bool; 64],
    ) -> Option<Square> {
        let mut next = king_sq.offset(step, 0);
        let mut rook_found = false;
        while let Some(sq) = next {
            match self.piece_at(sq) {
                None if attacked[sq.index()] => return None,
                None => {}
                Some(pc) => {
                    if pc.kind != PieceKind::Rook || pc.color != color || pc.moved {
                        return None;
                    }
                    rook_found = true;
                    break;
                }
            }
            next = sq.offset(step, 0);
        }
        if !rook_found {
            return None;
        }

        let dest = Square::new(dest_file, king_sq.rank())?;
        let delta = dest.file() as i8 - king_sq.file() as i8;
        // Destination must be a free square at least two files away on the
        // rook's side, or applying it could not be told apart from a plain
        // king step.
        if delta.signum() != step || delta.abs() < 2 || !self.is_empty(dest) {
            return None;
        }
        Some(dest)
    }
}

#[cfg(test)]
#[path = "legality_tests.rs"]
mod legality_tests;
