use crate::{board::Board, types::*};

/// Total material of `color`'s live pieces.
pub fn material(board: &Board, color: Color) -> i32 {
    board.pieces(color).map(Piece::value).sum()
}

/// Material balance from `perspective`'s point of view: its own material
/// minus the opponent's.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    material(board, perspective) - material(board, perspective.other())
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
