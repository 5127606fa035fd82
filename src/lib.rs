//! Solves the 4×4 sliding-tile puzzle with 3-cycles built by conjugating a few
//! fixed cyclic paths of the blank.

pub mod board;
pub mod cycle_path;
pub mod solvable;
pub mod solver;
pub mod three_cycle;

pub use board::{Board, BoardError, Move, MoveError, ReplayError, Transposition};
pub use solvable::{is_solvable, is_solvable_classic};
pub use solver::{directions, replay, solve, translate, try_solve, SolveError};
pub use three_cycle::cycle3;
