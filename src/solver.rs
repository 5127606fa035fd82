use log::{debug, info};
use thiserror::Error;

use crate::{
    board::{index_to_rc, Board, Move, ReplayError, Transposition, BLANK, CELLS, SIZE},
    solvable::{is_solvable, is_solvable_classic},
    three_cycle::cycle3,
};

/// Cells placed by explicit 3-cycles. Once they are right, the last two
/// tiles are forced by parity.
const CYCLED_CELLS: usize = CELLS - 3;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolveError {
    #[error("Board cannot be solved:\n{0}")]
    Unsolvable(Board),
}

/// Finds swaps taking `board` to the solved board. Not a shortest solution.
pub fn try_solve(board: &Board) -> Result<Vec<Transposition>, SolveError> {
    if !is_solvable_classic(board) {
        return Err(SolveError::Unsolvable(*board));
    }

    let mut current = *board;
    let mut moves = home_blank(&mut current);
    assert!(
        is_solvable(&current),
        "parity changed while moving the blank home:\n{current}"
    );

    let goal = Board::solved();
    for cell in 0..CYCLED_CELLS {
        let target = goal[cell];
        if current[cell] == target {
            continue;
        }

        let source = current.position(target);
        assert!(
            source > cell,
            "tile {target} found at cell {source}, before cell {cell}"
        );
        let spare = if cell + 1 != source { cell + 1 } else { cell + 2 };
        let (occupant, spare_label) = (current[cell], current[spare]);

        debug!(
            "Placing {target} at cell {cell} with 3-cycle ({target}, {occupant}, {spare_label})"
        );
        moves.extend(cycle3(&mut current, target, occupant, spare_label));
        assert_eq!(current[cell], target, "3-cycle did not place tile {target}");
    }

    assert!(current.is_solved(), "last tiles did not settle:\n{current}");
    info!("Found solution with {} moves", moves.len());
    Ok(moves)
}

/// Like [`try_solve`], but an unsolvable board is a fatal error. Check with
/// [`is_solvable_classic`] first.
pub fn solve(board: &Board) -> Vec<Transposition> {
    try_solve(board).unwrap_or_else(|err| panic!("{err}"))
}

/// Walks the blank right, then down, to the bottom-right cell.
fn home_blank(board: &mut Board) -> Vec<Transposition> {
    let mut moves = Vec::new();

    loop {
        let blank = board.blank();
        let (row, col) = index_to_rc(blank);
        let next = if col < SIZE - 1 {
            blank + 1
        } else if row < SIZE - 1 {
            blank + SIZE
        } else {
            break;
        };
        let transposition = Transposition(blank, next);
        board.apply(transposition);
        moves.push(transposition);
    }

    if !moves.is_empty() {
        debug!("Moved the blank home in {} moves", moves.len());
    }
    moves
}

/// The tile that slides at each swap.
pub fn translate(board: &Board, transpositions: &[Transposition]) -> Vec<u8> {
    let mut current = *board;
    transpositions
        .iter()
        .map(|&transposition| {
            let Transposition(i, j) = transposition;
            let label = if current[i] != BLANK { current[i] } else { current[j] };
            current.apply(transposition);
            label
        })
        .collect()
}

/// The direction the tile slides at each swap.
pub fn directions(board: &Board, transpositions: &[Transposition]) -> Vec<Move> {
    let mut current = *board;
    transpositions
        .iter()
        .map(|&transposition| {
            let Transposition(i, j) = transposition;
            let (tile, blank) = if current[i] == BLANK { (j, i) } else { (i, j) };
            current.apply(transposition);
            Move::between(tile, blank)
                .unwrap_or_else(|| panic!("cells {tile} and {blank} do not touch"))
        })
        .collect()
}

/// The board reached by playing `transpositions` on `board`.
pub fn replay(board: &Board, transpositions: &[Transposition]) -> Result<Board, ReplayError> {
    let mut current = *board;
    current.try_apply_all(transpositions)?;
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_solved_board_needs_nothing() {
        assert!(solve(&Board::solved()).is_empty());
        assert!(translate(&Board::solved(), &[]).is_empty());
    }

    #[test_log::test]
    fn test_home_blank() {
        let mut board: Board = "0 1 2 3 5 6 7 4 9 10 11 8 13 14 15 12".parse().unwrap();
        let moves = home_blank(&mut board);
        assert_eq!(
            moves,
            vec![
                Transposition(0, 1),
                Transposition(1, 2),
                Transposition(2, 3),
                Transposition(3, 7),
                Transposition(7, 11),
                Transposition(11, 15),
            ]
        );
        assert!(board.is_solved());
    }

    #[test_log::test]
    fn test_last_row_swap_is_unsolvable() {
        let board: Board = "1 2 3 4 5 6 7 8 9 10 11 12 13 15 14 0".parse().unwrap();
        assert_eq!(try_solve(&board), Err(SolveError::Unsolvable(board)));
    }

    #[test_log::test]
    #[should_panic(expected = "cannot be solved")]
    fn test_solve_panics_on_unsolvable() {
        let board: Board = "1 2 3 4 5 6 7 8 9 10 11 12 13 15 14 0".parse().unwrap();
        solve(&board);
    }

    #[test_log::test]
    fn test_translate_and_directions() {
        let mut board = Board::solved();
        board.apply_all(&[Transposition(15, 11), Transposition(11, 10)]);
        let moves = vec![Transposition(10, 11), Transposition(11, 15)];

        assert_eq!(translate(&board, &moves), vec![11, 12]);
        assert_eq!(directions(&board, &moves), vec![Move::Left, Move::Up]);
        assert_eq!(replay(&board, &moves), Ok(Board::solved()));
    }
}
