//! Quiescence test used to decide whether the search may stop at the
//! nominal depth limit.

use chess_core::{Board, Color};

/// Material of `color` standing on squares the opponent controls, and
/// `color`'s total material.
pub fn quiescence_score(board: &Board, color: Color) -> (i32, i32) {
    let attacked = board.attack_map(color);
    board
        .pieces(color)
        .fold((0, 0), |(under_attack, total), piece| {
            let value = piece.value();
            if attacked[piece.square.index()] {
                (under_attack + value, total + value)
            } else {
                (under_attack, total + value)
            }
        })
}

/// True while the attacked share of `color`'s material is at most
/// `threshold`. A side with nothing attacked is always quiescent.
pub fn is_quiescent(board: &Board, color: Color, threshold: f64) -> bool {
    let (under_attack, total) = quiescence_score(board, color);
    under_attack == 0 || f64::from(under_attack) <= threshold * f64::from(total)
}

#[cfg(test)]
#[path = "quiescence_tests.rs"]
mod quiescence_tests;
