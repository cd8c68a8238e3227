//! Sudoku on top of the exact cover matrix.
//!
//! Each cell, and each digit in each row, column and box, is a constraint. Each
//! possible placement of a digit into a cell is a candidate hitting four of them.
//! Constraints are named `p{row}{col}`, `r{row}{digit}`, `c{col}{digit}` and
//! `b{box}{digit}`, candidates `r{row}c{col}d{digit}`, with rows, columns and boxes
//! counted from 0.
pub mod canned;
mod reader;

use crate::config::SolverConfig;
use crate::errors::{BuildError, ParseError, SearchError, SolveError};
use crate::matrix::{CandidateId, ConstraintKind, Matrix};
use crate::search;
use crate::strategy::{LogicalSolver, SolveReport};
use std::fmt;

/// A digit in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// 0-8, top to bottom
    pub row: u8,
    /// 0-8, left to right
    pub col: u8,
    /// 1-9
    pub digit: u8,
}

impl Placement {
    /// 0-8, row by row
    pub fn box_index(self) -> u8 {
        self.row / 3 * 3 + self.col / 3
    }

    /// Name of the candidate, e.g. `r3c0d2`
    pub fn name(self) -> String {
        format!("r{}c{}d{}", self.row, self.col, self.digit)
    }

    fn constraint_names(self) -> [String; 4] {
        let Placement { row, col, digit } = self;
        [
            format!("p{}{}", row, col),
            format!("r{}{}", row, digit),
            format!("c{}{}", col, digit),
            format!("b{}{}", self.box_index(), digit),
        ]
    }
}

/// A sudoku as an exact cover matrix
#[derive(Debug, Clone)]
pub struct Puzzle {
    matrix: Matrix<Placement>,
}

impl Puzzle {
    /// All 729 candidates, no givens
    pub fn empty() -> Result<Puzzle, BuildError> {
        let mut matrix = Matrix::new();
        // all cells first, then rows, columns and boxes, so every candidate's
        // constraints ascend in that order
        for row in 0..9 {
            for col in 0..9 {
                matrix.add_constraint(format!("p{}{}", row, col), ConstraintKind::Cell)?;
            }
        }
        let units = [
            ("r", ConstraintKind::Row),
            ("c", ConstraintKind::Column),
            ("b", ConstraintKind::Box),
        ];
        for &(prefix, kind) in &units {
            for unit in 0..9 {
                for digit in 1..=9 {
                    matrix.add_constraint(format!("{}{}{}", prefix, unit, digit), kind)?;
                }
            }
        }
        for col in 0..9 {
            for row in 0..9 {
                for digit in 1..=9 {
                    let placement = Placement { row, col, digit };
                    let constraints = placement.constraint_names();
                    matrix.add_candidate(placement.name(), &constraints, placement)?;
                }
            }
        }
        Ok(Puzzle { matrix })
    }

    /// Reads a puzzle, see [`parse`](Self::parse)
    pub fn from_str_line(line: &str) -> Result<Puzzle, ParseError> {
        Puzzle::parse(line)
    }

    /// Reads nine rows, optionally followed by candidates to eliminate
    pub fn from_rows(rows: &[&str]) -> Result<Puzzle, ParseError> {
        Puzzle::parse(&rows.join("\n"))
    }

    /// Reads a puzzle as one line of 81 cells or as nine lines of 9 cells.
    ///
    /// Digits `1`-`9` are givens, `.` is an empty cell. Any lines after the grid name
    /// candidates like `r3c0d2` that are removed before solving starts.
    ///
    /// ```
    /// use sudoku_dlx::sudoku::Puzzle;
    ///
    /// let text = "
    /// 9....2...
    /// .5.869714
    /// 6...3...5
    /// .24......
    /// .96.8.1..
    /// ...7.6.4.
    /// ....183..
    /// ...3....2
    /// ..9....71
    /// r0c1d1 r0c1d3
    /// ";
    /// let puzzle = Puzzle::parse(text).unwrap();
    /// assert_eq!(puzzle.matrix().hints().len(), 29);
    /// ```
    pub fn parse(text: &str) -> Result<Puzzle, ParseError> {
        let parsed = reader::read(text)?;
        let mut puzzle = Puzzle::empty()?;
        for placement in &parsed.givens {
            puzzle.matrix.add_hint(&placement.name())?;
        }
        for name in &parsed.eliminations {
            if puzzle.matrix.candidate_by_name(name).is_none() {
                return Err(ParseError::UnknownCandidate(name.clone()));
            }
            puzzle.matrix.eliminate_candidate(name)?;
        }
        Ok(puzzle)
    }

    #[allow(missing_docs)]
    pub fn matrix(&self) -> &Matrix<Placement> {
        &self.matrix
    }

    #[allow(missing_docs)]
    pub fn matrix_mut(&mut self) -> &mut Matrix<Placement> {
        &mut self.matrix
    }

    #[allow(missing_docs)]
    pub fn into_matrix(self) -> Matrix<Placement> {
        self.matrix
    }

    /// Givens and solved cells
    pub fn grid(&self) -> Grid {
        self.grid_of(&self.matrix.solution_candidates())
    }

    /// Fills a grid with the placements of `candidates`
    pub fn grid_of(&self, candidates: &[CandidateId]) -> Grid {
        let mut grid = Grid([0; 81]);
        for placement in candidates.iter().filter_map(|&c| self.matrix.payload(c)) {
            grid.0[placement.row as usize * 9 + placement.col as usize] = placement.digit;
        }
        grid
    }

    /// Runs the [`LogicalSolver`] configured by `config`
    pub fn solve_logically(&mut self, config: &SolverConfig) -> Result<SolveReport, SolveError> {
        LogicalSolver::from_config(config).solve(&mut self.matrix)
    }

    /// Finds a solution by backtracking from the current state
    pub fn solve_one(&mut self) -> Result<Option<Grid>, SearchError> {
        let solution = search::solve_one(&mut self.matrix)?;
        Ok(solution.map(|candidates| self.grid_of(&candidates)))
    }

    /// Finds the solution if there is exactly one
    pub fn solve_unique(&mut self) -> Result<Option<Grid>, SearchError> {
        let mut solutions = search::solve_at_most(&mut self.matrix, 2)?;
        match solutions.len() {
            1 => Ok(solutions.pop().map(|candidates| self.grid_of(&candidates))),
            _ => Ok(None),
        }
    }

    /// Counts solutions, stopping at `limit`
    pub fn count_at_most(&mut self, limit: usize) -> Result<usize, SearchError> {
        search::count_solutions(&mut self.matrix, limit)
    }
}

/// Digits of a sudoku row by row, 0 for an empty cell
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid(pub [u8; 81]);

impl Grid {
    #[allow(missing_docs)]
    pub fn get(&self, row: u8, col: u8) -> Option<u8> {
        match self.0[row as usize * 9 + col as usize] {
            0 => None,
            digit => Some(digit),
        }
    }

    /// Whether every cell has a digit
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|&digit| digit != 0)
    }

    /// The grid as 81 characters, `.` for empty cells
    pub fn to_str_line(&self) -> String {
        self.0.iter().map(|&digit| cell_char(digit)).collect()
    }
}

fn cell_char(digit: u8) -> char {
    match digit {
        1..=9 => char::from(b'0' + digit),
        _ => '.',
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (row, cells) in self.0.chunks(9).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for &digit in cells {
                write!(f, "{}", cell_char(digit))?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid({})", self.to_str_line())
    }
}
