#![warn(missing_docs)]
//! Exact cover solving with dancing links, and a human style sudoku solver on top
//!
//! ## Overview
//!
//! The [`Matrix`] holds constraints (columns) and candidates (rows) of an exact cover
//! problem and mutates them reversibly. [`search`] enumerates exact covers by
//! backtracking. The [`strategy`] module implements logical deductions that work on
//! any matrix, though they are named after the sudoku techniques they generalize.
//! [`sudoku`] builds matrices from sudoku text.
//!
//! ## Example
//!
//! ```
//! use sudoku_dlx::sudoku::Puzzle;
//! use sudoku_dlx::{Outcome, SolverConfig};
//!
//! let line = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
//!
//! // Backtracking
//! let mut puzzle = Puzzle::from_str_line(line).unwrap();
//! if let Some(solution) = puzzle.solve_unique().unwrap() {
//!     println!("{}", solution);
//!     println!("{}", solution.to_str_line());
//! }
//!
//! // Logical solving, step by step
//! let report = puzzle.solve_logically(&SolverConfig::default()).unwrap();
//! assert_eq!(report.outcome, Outcome::Solved);
//! for deduction in &report.deductions {
//!     println!("{}: {}", deduction.strategy(), deduction.description());
//! }
//! assert!(puzzle.grid().is_complete());
//! ```

pub mod changes;
pub mod config;
pub mod errors;
pub mod matrix;
pub mod search;
pub mod strategy;
pub mod sudoku;

pub use crate::changes::{Change, Listener};
pub use crate::config::{SearchLimits, SolverConfig};
pub use crate::matrix::Matrix;
pub use crate::strategy::{Deduction, LogicalSolver, Outcome, SolveReport, Strategy};
