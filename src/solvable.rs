use crate::board::{index_to_rc, Board, BLANK};

/// Decides solvability from the parity of the whole configuration: sorts a
/// copy with bubble sort and reports whether it took an odd number of
/// exchanges.
///
/// The blank is sorted like any other label and its distance from home is not
/// taken into account, so this only matches the physical puzzle when the blank
/// sits in the bottom-right corner. See [`is_solvable_classic`] for the full
/// criterion.
pub fn is_solvable(board: &Board) -> bool {
    exchange_count(board) % 2 == 1
}

/// Number of adjacent exchanges bubble sort makes to put the labels in
/// ascending order.
pub fn exchange_count(board: &Board) -> usize {
    let mut labels = *board.cells();
    let mut exchanges = 0;

    for pass in 0..labels.len() {
        let mut changed = false;
        for j in 0..labels.len() - pass - 1 {
            if labels[j] > labels[j + 1] {
                labels.swap(j, j + 1);
                exchanges += 1;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    exchanges
}

/// The textbook rule for an even-width board: solvable iff the inversions
/// among the tiles plus the blank's row is odd.
pub fn is_solvable_classic(board: &Board) -> bool {
    let (empty_row, _) = index_to_rc(board.blank());
    (count_inversions(board.cells()) + empty_row) % 2 == 1
}

fn count_inversions(flattened: &[u8]) -> usize {
    flattened
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != BLANK)
        .map(|(i, &val)| {
            flattened[i + 1..]
                .iter()
                .filter(|&&next| next != BLANK && next < val)
                .count()
        })
        .sum()
}
