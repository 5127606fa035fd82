//! Closed routes over the board along which the blank is walked.
//!
//! One rotation walks the blank once around its path. Every other tile on the
//! path moves back by one slot, so any tile on a path can be brought to any
//! cell of that path by rotating often enough, while cells off the path stay
//! put.

use log::trace;

use crate::board::{are_adjacent, Board, Transposition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePath {
    pub name: &'static str,
    pub cells: &'static [usize],
}

/// Covers the whole board. Brings any tile to the top-left cell.
pub const PATH_A: CyclePath = CyclePath {
    name: "A",
    cells: &[0, 4, 8, 12, 13, 14, 15, 11, 7, 3, 2, 6, 10, 9, 5, 1],
};

/// Brings a tile below the top-left cell. Skips the top-left and bottom-left
/// cells.
pub const PATH_B: CyclePath = CyclePath {
    name: "B",
    cells: &[1, 5, 4, 8, 9, 13, 14, 15, 11, 10, 6, 7, 3, 2],
};

/// Stands in for [`PATH_B`] when the tile to move sits in the bottom-left
/// cell. Skips the top-left and top-right cells.
pub const PATH_B_ALT: CyclePath = CyclePath {
    name: "B'",
    cells: &[1, 5, 4, 8, 12, 13, 9, 10, 14, 15, 11, 7, 6, 2],
};

/// Brings a tile right of the top-left cell. Skips the top-left cell and the
/// one below it.
pub const PATH_C: CyclePath = CyclePath {
    name: "C",
    cells: &[1, 5, 9, 8, 12, 13, 14, 15, 11, 10, 6, 7, 3, 2],
};

/// Brings the blank to (1, 1). Skips cells 0, 1, 4 and 10.
pub const PATH_D: CyclePath = CyclePath {
    name: "D",
    cells: &[2, 6, 5, 9, 8, 12, 13, 14, 15, 11, 7, 3],
};

pub const PATHS: [CyclePath; 5] = [PATH_A, PATH_B, PATH_B_ALT, PATH_C, PATH_D];

impl CyclePath {
    pub fn contains(&self, cell: usize) -> bool {
        self.cells.contains(&cell)
    }

    /// Whether consecutive cells, including last to first, are neighbours and
    /// no cell repeats.
    pub fn is_closed_loop(&self) -> bool {
        let cells = self.cells;
        let distinct = cells
            .iter()
            .enumerate()
            .all(|(i, cell)| !cells[i + 1..].contains(cell));
        distinct
            && cells.len() > 2
            && (0..cells.len()).all(|i| are_adjacent(cells[i], cells[(i + 1) % cells.len()]))
    }
}

/// Walks the blank once around `path` and returns the swaps made.
///
/// Panics if the blank is not on the path.
pub fn rotate(board: &mut Board, path: &CyclePath) -> Vec<Transposition> {
    let blank = board.blank();
    let start = path
        .cells
        .iter()
        .position(|&cell| cell == blank)
        .unwrap_or_else(|| panic!("blank at cell {blank} is not on path {}", path.name));

    let rotated: Vec<usize> = path.cells[start..]
        .iter()
        .chain(&path.cells[..start])
        .copied()
        .collect();
    let transpositions: Vec<_> = rotated
        .windows(2)
        .map(|pair| Transposition(pair[0], pair[1]))
        .collect();

    board.apply_all(&transpositions);
    trace!("Rotated path {} from cell {blank}", path.name);
    transpositions
}

/// Rotates `path` until `done` holds, appending the swaps to `moves`.
///
/// A tile on the path reaches any other cell of the path in fewer rotations
/// than the path has cells, so not being done after that many is fatal.
pub fn rotate_until(
    board: &mut Board,
    path: &CyclePath,
    moves: &mut Vec<Transposition>,
    done: impl Fn(&Board) -> bool,
) {
    let mut rotations = 0;
    while !done(board) {
        assert!(
            rotations < path.cells.len(),
            "path {} did not settle after {rotations} rotations:\n{board}",
            path.name
        );
        moves.extend(rotate(board, path));
        rotations += 1;
    }
}
