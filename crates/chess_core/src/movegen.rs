//! Per-piece move geometry.
//!
//! Each piece kind has two generators: destinations it may move to on its
//! own turn, and squares it controls for the attacked-square map. Both are
//! pseudo-legal; king safety is checked in `legality`.

use crate::{board::Board, types::*};

const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const QUEEN_DIRS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

type Generator = fn(&Board, &Piece, &mut Vec<Square>);

/// Move and attack generators for one piece kind.
struct PieceRules {
    moves: Generator,
    attacks: Generator,
}

/// Indexed by `PieceKind::idx()`.
static RULES: [PieceRules; 6] = [
    PieceRules {
        moves: pawn_moves,
        attacks: pawn_attacks,
    },
    PieceRules {
        moves: knight_moves,
        attacks: knight_attacks,
    },
    PieceRules {
        moves: bishop_moves,
        attacks: bishop_attacks,
    },
    PieceRules {
        moves: rook_moves,
        attacks: rook_attacks,
    },
    PieceRules {
        moves: queen_moves,
        attacks: queen_attacks,
    },
    PieceRules {
        moves: king_moves,
        attacks: king_attacks,
    },
];

/// Appends the squares `piece` may move to: empty squares, or squares held
/// by the opposite color.
pub fn movable_destinations(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    (RULES[piece.kind.idx()].moves)(board, piece, out)
}

/// Appends the squares `piece` controls. Friendly-occupied squares count;
/// pawns control exactly their two forward diagonals.
pub fn attacked_destinations(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    (RULES[piece.kind.idx()].attacks)(board, piece, out)
}

/// Walks each direction until the edge or the first occupied square, which
/// is included when capturable (or always, for control maps).
fn gen_slider(
    board: &Board,
    piece: &Piece,
    dirs: &[(i8, i8)],
    inclusive: bool,
    out: &mut Vec<Square>,
) {
    for &(df, dr) in dirs {
        let mut next = piece.square.offset(df, dr);
        while let Some(to) = next {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) => {
                    if inclusive || pc.color != piece.color {
                        out.push(to);
                    }
                    break;
                }
            }
            next = to.offset(df, dr);
        }
    }
}

fn gen_offsets(
    board: &Board,
    piece: &Piece,
    offsets: &[(i8, i8)],
    inclusive: bool,
    out: &mut Vec<Square>,
) {
    for &(df, dr) in offsets {
        if let Some(to) = piece.square.offset(df, dr) {
            match board.piece_at(to) {
                Some(pc) if !inclusive && pc.color == piece.color => {}
                _ => out.push(to),
            }
        }
    }
}

fn knight_moves(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    gen_offsets(board, piece, &KNIGHT_OFFSETS, false, out)
}

fn knight_attacks(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    gen_offsets(board, piece, &KNIGHT_OFFSETS, true, out)
}

fn king_moves(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    gen_offsets(board, piece, &KING_OFFSETS, false, out)
}

fn king_attacks(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    gen_offsets(board, piece, &KING_OFFSETS, true, out)
}

fn bishop_moves(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    gen_slider(board, piece, &BISHOP_DIRS, false, out)
}

fn bishop_attacks(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    gen_slider(board, piece, &BISHOP_DIRS, true, out)
}

fn rook_moves(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    gen_slider(board, piece, &ROOK_DIRS, false, out)
}

fn rook_attacks(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    gen_slider(board, piece, &ROOK_DIRS, true, out)
}

fn queen_moves(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    gen_slider(board, piece, &QUEEN_DIRS, false, out)
}

fn queen_attacks(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    gen_slider(board, piece, &QUEEN_DIRS, true, out)
}

fn pawn_moves(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    let dir = piece.color.forward();

    for df in [-1, 1] {
        if let Some(to) = piece.square.offset(df, dir)
            && let Some(target) = board.piece_at(to)
            && target.color != piece.color
        {
            out.push(to);
        }
    }

    if let Some(one) = piece.square.offset(0, dir)
        && board.is_empty(one)
    {
        out.push(one);
        if !piece.moved
            && let Some(two) = piece.square.offset(0, 2 * dir)
            && board.is_empty(two)
        {
            out.push(two);
        }
    }
}

fn pawn_attacks(_board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    let dir = piece.color.forward();
    for df in [-1, 1] {
        if let Some(to) = piece.square.offset(df, dir) {
            out.push(to);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
