//! 3-cycles of arbitrary tiles by conjugation.
//!
//! The three tiles and the blank are first walked into a fixed square in the
//! top-left corner using the cycle paths, the square is cycled with four
//! hard-coded slides, and then every setup swap is undone in reverse order.
//! Only the three tiles end up moved.

use log::trace;

use crate::{
    board::{Board, Transposition, BLANK, CELLS},
    cycle_path::{rotate_until, PATH_A, PATH_B, PATH_B_ALT, PATH_C, PATH_D},
};

const TOP_LEFT: usize = 0;
const RIGHT_OF_TOP_LEFT: usize = 1;
const TOP_RIGHT: usize = 3;
const BELOW_TOP_LEFT: usize = 4;
const CENTRE: usize = 5;
const BOTTOM_LEFT: usize = 12;

/// With a, b, c, blank on cells 0, 1, 4, 5, moves a to 1, b to 4 and c to 0,
/// leaving the blank back on 5.
const LOCAL_CYCLE: [Transposition; 4] = [
    Transposition(RIGHT_OF_TOP_LEFT, CENTRE),
    Transposition(TOP_LEFT, RIGHT_OF_TOP_LEFT),
    Transposition(TOP_LEFT, BELOW_TOP_LEFT),
    Transposition(BELOW_TOP_LEFT, CENTRE),
];

fn step(board: &mut Board, moves: &mut Vec<Transposition>, transposition: Transposition) {
    board.apply(transposition);
    moves.push(transposition);
}

/// Moves tile `a` to the cell of `b`, `b` to the cell of `c` and `c` to the
/// cell of `a`. Every other cell, the blank included, is left as it was.
///
/// Returns every swap made. Replaying them on the board as it was before the
/// call gives the same result.
///
/// Panics if the labels are not three distinct tiles.
pub fn cycle3(board: &mut Board, a: u8, b: u8, c: u8) -> Vec<Transposition> {
    for label in [a, b, c] {
        assert!(label != BLANK, "the blank cannot be part of a 3-cycle");
        assert!((label as usize) < CELLS, "label {label} is not on the board");
    }
    assert!(
        a != b && a != c && b != c,
        "3-cycle labels must be distinct, got ({a}, {b}, {c})"
    );

    let mut setup = Vec::new();

    rotate_until(board, &PATH_A, &mut setup, |board| board[TOP_LEFT] == a);

    if board[BOTTOM_LEFT] != c {
        // Path B skips the bottom-left corner.
        if board[BOTTOM_LEFT] == BLANK {
            let exit = if board[8] != c { 8 } else { 13 };
            step(board, &mut setup, Transposition(BOTTOM_LEFT, exit));
        }
        rotate_until(board, &PATH_B, &mut setup, |board| board[BELOW_TOP_LEFT] == c);
    } else {
        // Path B' skips the top-right corner.
        if board[TOP_RIGHT] == BLANK {
            step(board, &mut setup, Transposition(TOP_RIGHT, 7));
        }
        rotate_until(board, &PATH_B_ALT, &mut setup, |board| board[BELOW_TOP_LEFT] == c);
    }

    rotate_until(board, &PATH_C, &mut setup, |board| board[RIGHT_OF_TOP_LEFT] == b);

    // Path D skips cell 10.
    if board[10] == BLANK {
        step(board, &mut setup, Transposition(10, 11));
    }
    rotate_until(board, &PATH_D, &mut setup, |board| board[CENTRE] == BLANK);

    assert!(
        board[TOP_LEFT] == a
            && board[RIGHT_OF_TOP_LEFT] == b
            && board[BELOW_TOP_LEFT] == c
            && board[CENTRE] == BLANK,
        "setup for 3-cycle ({a}, {b}, {c}) ended in the wrong place:\n{board}"
    );
    trace!("3-cycle ({a}, {b}, {c}) set up in {} swaps", setup.len());

    let mut moves = Vec::with_capacity(2 * setup.len() + LOCAL_CYCLE.len());
    moves.extend_from_slice(&setup);
    moves.extend_from_slice(&LOCAL_CYCLE);
    moves.extend(setup.iter().rev());

    board.apply_all(&moves[setup.len()..]);
    moves
}
