//! Logical solving, the way a human would go about it.
//!
//! A [`Strategy`] scans the matrix for one kind of pattern and describes what it found
//! as a [`Deduction`]. Strategies never touch the matrix themselves. The
//! [`LogicalSolver`] tries them in order, applies the first deduction found and starts
//! over until the puzzle is solved, blocked or no strategy applies any more.
//!
//! Strategies only look at the matrix, so they are generalized versions of the
//! familiar sudoku techniques. Every pattern found over cell constraints has
//! "hidden" twins over row, column and box constraints.

mod deduction;
mod solver;
mod strategies;

pub use self::deduction::{Action, Deduction, Pattern};
pub use self::solver::{LogicalSolver, Outcome, SolveReport};
pub use self::strategies::Strategy;
