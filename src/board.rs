use rand::{seq::SliceRandom, Rng};
use std::{fmt, ops::Index, str::FromStr};
use thiserror::Error;

use crate::solvable::is_solvable_classic;

/// Side length of the board.
pub const SIZE: usize = 4;
/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;
/// The label of the empty cell.
pub const BLANK: u8 = 0;

/// The direction a tile slides when it moves into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Down, Move::Right];

    /// Where the blank goes, as a (row, col) offset, when a tile slides this
    /// way.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// The move that slides the tile at `tile` into the blank at `blank`, if
    /// the two cells touch.
    pub fn between(tile: usize, blank: usize) -> Option<Self> {
        let (tile_row, tile_col) = index_to_rc(tile);
        let (blank_row, blank_col) = index_to_rc(blank);
        let offset = (
            tile_row as isize - blank_row as isize,
            tile_col as isize - blank_col as isize,
        );
        Move::ALL
            .into_iter()
            .find(|movement| movement.as_offset() == offset)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Maps a cell index to its (row, col) on the board.
///
/// Panics if `index` is off the board.
pub fn index_to_rc(index: usize) -> (usize, usize) {
    assert!(index < CELLS, "cell {index} is off the board");
    (index / SIZE, index % SIZE)
}

pub fn rc_to_index(row: usize, col: usize) -> usize {
    assert!(row < SIZE && col < SIZE, "({row}, {col}) is off the board");
    row * SIZE + col
}

/// Whether two cells are at taxicab distance one.
pub fn are_adjacent(i: usize, j: usize) -> bool {
    let (i_row, i_col) = index_to_rc(i);
    let (j_row, j_col) = index_to_rc(j);
    i_row.abs_diff(j_row) + i_col.abs_diff(j_col) == 1
}

/// A swap of two neighbouring cells, one of which holds the blank when the
/// swap is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transposition(pub usize, pub usize);

impl fmt::Display for Transposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("A board has {expected} cells, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("Label {0} is out of range, labels run from 0 to 15")]
    LabelOutOfRange(u8),
    #[error("Label {0} appears more than once")]
    DuplicateLabel(u8),
    #[error("Could not parse {0:?} as a label")]
    Parse(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("Cell {0} is off the board")]
    OffBoard(usize),
    #[error("Cell {0} cannot be swapped with itself")]
    SameCell(usize),
    #[error("Cells {0} and {1} are not adjacent")]
    NotAdjacent(usize, usize),
    #[error("Neither cell {0} nor cell {1} holds the blank")]
    NoBlank(usize, usize),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Move {step} {transposition} is illegal: {source}")]
pub struct ReplayError {
    pub step: usize,
    pub transposition: Transposition,
    #[source]
    pub source: MoveError,
}

/// A 4×4 configuration. Always a permutation of the labels 0..16, with 0 as
/// the blank, stored row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELLS],
}

impl Board {
    pub fn new(cells: [u8; CELLS]) -> Result<Self, BoardError> {
        let mut seen = [false; CELLS];
        for &label in &cells {
            let slot = seen
                .get_mut(label as usize)
                .ok_or(BoardError::LabelOutOfRange(label))?;
            if *slot {
                return Err(BoardError::DuplicateLabel(label));
            }
            *slot = true;
        }
        Ok(Self { cells })
    }

    /// The canonical configuration `1, 2, ..., 15, 0`.
    pub fn solved() -> Self {
        let mut cells = [BLANK; CELLS];
        let mut value = 1;

        for (i, cell) in cells.iter_mut().enumerate() {
            if i == CELLS - 1 {
                *cell = BLANK; // The empty space is represented by 0
            } else {
                *cell = value;
                value += 1;
            }
        }

        Self { cells }
    }

    /// A uniformly random board that can be solved.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Self::solved();

        loop {
            board.cells.shuffle(rng);

            if is_solvable_classic(&board) {
                break board;
            }
        }
    }

    /// The solved board after `steps` random legal moves, never undoing the
    /// previous one.
    pub fn scrambled<R: Rng + ?Sized>(rng: &mut R, steps: usize) -> Self {
        let mut board = Self::solved();
        let mut last_move: Option<Move> = None;
        let mut made = 0;
        while made < steps {
            let movement = Move::ALL[rng.gen_range(0..Move::ALL.len())];
            if last_move.is_some_and(|last| movement == last.opposite()) {
                continue;
            }
            if board.apply_move(movement) {
                last_move = Some(movement);
                made += 1;
            }
        }
        board
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    /// The cell currently holding `label`.
    pub fn position(&self, label: u8) -> usize {
        self.cells
            .iter()
            .position(|&held| held == label)
            .unwrap_or_else(|| panic!("label {label} is not on the board"))
    }

    pub fn blank(&self) -> usize {
        self.position(BLANK)
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::solved()
    }

    /// Swaps the two cells of `transposition`, checking that the swap is a
    /// legal slide first. The board is untouched on error.
    pub fn try_apply(&mut self, transposition: Transposition) -> Result<(), MoveError> {
        let Transposition(i, j) = transposition;
        for cell in [i, j] {
            if cell >= CELLS {
                return Err(MoveError::OffBoard(cell));
            }
        }
        if i == j {
            return Err(MoveError::SameCell(i));
        }
        if !are_adjacent(i, j) {
            return Err(MoveError::NotAdjacent(i, j));
        }
        if self.cells[i] != BLANK && self.cells[j] != BLANK {
            return Err(MoveError::NoBlank(i, j));
        }
        self.cells.swap(i, j);
        Ok(())
    }

    /// Like [`Board::try_apply`], but an illegal move is a fatal error.
    pub fn apply(&mut self, transposition: Transposition) {
        if let Err(err) = self.try_apply(transposition) {
            panic!("illegal transposition {transposition}: {err}");
        }
    }

    /// Applies every transposition in order, stopping at the first illegal
    /// one. Moves before the failing one stay applied.
    pub fn try_apply_all(&mut self, transpositions: &[Transposition]) -> Result<(), ReplayError> {
        for (step, &transposition) in transpositions.iter().enumerate() {
            self.try_apply(transposition)
                .map_err(|source| ReplayError {
                    step,
                    transposition,
                    source,
                })?;
        }
        Ok(())
    }

    pub fn apply_all(&mut self, transpositions: &[Transposition]) {
        if let Err(err) = self.try_apply_all(transpositions) {
            panic!("{err}");
        }
    }

    /// Slides the tile labelled `label` into the blank.
    pub fn slide(&mut self, label: u8) -> Result<(), MoveError> {
        if label == BLANK {
            let blank = self.blank();
            return Err(MoveError::SameCell(blank));
        }
        let tile = self.position(label);
        let blank = self.blank();
        self.try_apply(Transposition(tile, blank))
    }

    /// Slides the neighbour of the blank that lies in the direction opposite
    /// to `movement`. Returns false, leaving the board as is, when there is
    /// no such neighbour.
    pub fn apply_move(&mut self, movement: Move) -> bool {
        let (dx, dy) = movement.as_offset();
        let (x_pos, y_pos) = index_to_rc(self.blank());

        let new_x = x_pos as isize + dx;
        let new_y = y_pos as isize + dy;

        if new_x >= 0 && new_x < SIZE as isize && new_y >= 0 && new_y < SIZE as isize {
            let from = rc_to_index(x_pos, y_pos);
            let to = rc_to_index(new_x as usize, new_y as usize);
            self.cells.swap(from, to);
            true
        } else {
            false
        }
    }
}

impl Index<usize> for Board {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.cells[index]
    }
}

impl TryFrom<&[u8]> for Board {
    type Error = BoardError;

    fn try_from(labels: &[u8]) -> Result<Self, BoardError> {
        let cells: [u8; CELLS] = labels.try_into().map_err(|_| BoardError::WrongLength {
            expected: CELLS,
            actual: labels.len(),
        })?;
        Board::new(cells)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses sixteen labels separated by commas and/or whitespace.
    fn from_str(s: &str) -> Result<Self, BoardError> {
        let labels = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|_| BoardError::Parse(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::try_from(labels.as_slice())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIZE) {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test_log::test]
    fn test_index_to_rc() {
        assert_eq!(index_to_rc(0), (0, 0));
        assert_eq!(index_to_rc(5), (1, 1));
        assert_eq!(index_to_rc(11), (2, 3));
        assert_eq!(index_to_rc(15), (3, 3));
        for index in 0..CELLS {
            let (row, col) = index_to_rc(index);
            assert_eq!(rc_to_index(row, col), index);
        }
    }

    #[test_log::test]
    #[should_panic(expected = "off the board")]
    fn test_index_to_rc_off_board() {
        index_to_rc(16);
    }

    #[test_log::test]
    fn test_adjacency() {
        assert!(are_adjacent(0, 1));
        assert!(are_adjacent(0, 4));
        assert!(are_adjacent(6, 2));
        assert!(!are_adjacent(3, 4));
        assert!(!are_adjacent(0, 5));
        assert!(!are_adjacent(7, 7));
    }

    #[test_log::test]
    fn test_new_rejects_bad_boards() {
        let mut cells = *Board::solved().cells();
        cells[3] = 16;
        assert_eq!(Board::new(cells), Err(BoardError::LabelOutOfRange(16)));

        let mut cells = *Board::solved().cells();
        cells[3] = 1;
        assert_eq!(Board::new(cells), Err(BoardError::DuplicateLabel(1)));

        assert_eq!(
            Board::try_from(&[1u8, 2, 3][..]),
            Err(BoardError::WrongLength {
                expected: 16,
                actual: 3
            })
        );
    }

    #[test_log::test]
    fn test_parse() {
        let board: Board = "1,2,3,4, 5 6 7 8\n9 10 11 12 13 14 15 0".parse().unwrap();
        assert_eq!(board, Board::solved());
        assert_eq!(
            "1 2 x".parse::<Board>(),
            Err(BoardError::Parse("x".to_string()))
        );
        assert!(matches!(
            "1 2 3".parse::<Board>(),
            Err(BoardError::WrongLength { actual: 3, .. })
        ));
    }

    #[test_log::test]
    fn test_apply_legal_and_illegal() {
        let mut board = Board::solved();
        board.apply(Transposition(15, 14));
        assert_eq!(board[14], BLANK);
        assert_eq!(board[15], 15);

        let before = board;
        assert_eq!(board.try_apply(Transposition(14, 14)), Err(MoveError::SameCell(14)));
        assert_eq!(board.try_apply(Transposition(14, 16)), Err(MoveError::OffBoard(16)));
        assert_eq!(board.try_apply(Transposition(14, 9)), Err(MoveError::NotAdjacent(14, 9)));
        assert_eq!(board.try_apply(Transposition(0, 1)), Err(MoveError::NoBlank(0, 1)));
        assert_eq!(board, before);
    }

    #[test_log::test]
    #[should_panic(expected = "illegal transposition (0, 1)")]
    fn test_apply_without_blank_panics() {
        Board::solved().apply(Transposition(0, 1));
    }

    #[test_log::test]
    fn test_apply_all_stops_at_first_illegal() {
        let mut board = Board::solved();
        let err = board
            .try_apply_all(&[Transposition(15, 11), Transposition(0, 1), Transposition(11, 10)])
            .unwrap_err();
        assert_eq!(err.step, 1);
        assert_eq!(err.source, MoveError::NoBlank(0, 1));
        // The first move stays applied.
        assert_eq!(board.blank(), 11);
    }

    #[test_log::test]
    fn test_moves_and_slides() {
        let mut board = Board::solved();
        assert!(!board.apply_move(Move::Up));
        assert!(!board.apply_move(Move::Left));
        assert!(board.apply_move(Move::Right));
        assert_eq!(board.blank(), 14);
        assert_eq!(Move::between(15, 14), Some(Move::Left));
        assert!(board.apply_move(Move::Down));
        assert_eq!(board.blank(), 10);
        assert!(board.apply_move(Move::Up));
        assert_eq!(board.blank(), 14);
        assert_eq!(Move::between(3, 14), None);

        assert!(board.slide(15).is_ok());
        assert_eq!(board.blank(), 15);
        assert_eq!(board.slide(1), Err(MoveError::NotAdjacent(0, 15)));
        assert!(board.is_solved());
    }

    #[test_log::test]
    fn test_opposite_moves_cancel() {
        let start: Board = "1 2 3 4 5 0 7 8 9 10 11 12 13 14 15 6".parse().unwrap();
        for movement in Move::ALL {
            let mut board = start;
            assert!(board.apply_move(movement));
            assert_ne!(board, start);
            let tile = start.blank();
            assert_eq!(Move::between(tile, board.blank()), Some(movement.opposite()));
            assert!(board.apply_move(movement.opposite()));
            assert_eq!(board, start);
        }
    }

    #[test_log::test]
    fn test_random_boards_are_solvable_permutations() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let board = Board::shuffled(&mut rng);
            assert!(Board::new(*board.cells()).is_ok());
            assert!(is_solvable_classic(&board));

            let board = Board::scrambled(&mut rng, 40);
            assert!(Board::new(*board.cells()).is_ok());
            assert!(is_solvable_classic(&board));
        }
    }

    #[test_log::test]
    fn test_display() {
        let expected = " 1  2  3  4 \n 5  6  7  8 \n 9 10 11 12 \n13 14 15  0 \n";
        assert_eq!(Board::solved().to_string(), expected);
    }
}
