use crate::{board::Board, types::Color};

/// Pure perft node count.
/// Counts all legal move sequences from the current position down to `depth`,
/// with `side` to move first.
pub fn perft(board: &Board, side: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves(side);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        // Legal moves always start on an occupied square.
        if let Ok(next) = board.after(mv) {
            nodes += perft(&next, side.other(), depth - 1);
        }
    }
    nodes
}
