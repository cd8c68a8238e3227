use super::{Deduction, Strategy};
use crate::changes::Change;
use crate::config::SolverConfig;
use crate::errors::SolveError;
use crate::matrix::Matrix;
use log::{error, info, warn};

/// How a logical solve ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Every constraint is satisfied
    Solved,
    /// Some constraint has no candidate left. Either the puzzle has no solution or
    /// a uniqueness strategy was used on a puzzle with several.
    Blocked,
    /// No strategy applies
    Stuck,
}

/// Everything a [`LogicalSolver::solve`] run did, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    #[allow(missing_docs)]
    pub outcome: Outcome,
    /// Applied deductions, first to last
    pub deductions: Vec<Deduction>,
    /// Candidate changes of all applied deductions
    pub changes: Vec<Change>,
}

impl SolveReport {
    #[allow(missing_docs)]
    pub fn is_solved(&self) -> bool {
        self.outcome == Outcome::Solved
    }

    /// Undoes every deduction of this run, last first.
    ///
    /// The matrix must not have been changed since the run, or only by changes
    /// that were undone already.
    pub fn rewind<P>(&self, matrix: &mut Matrix<P>) -> Vec<Change> {
        self.deductions
            .iter()
            .rev()
            .flat_map(|deduction| deduction.undo(matrix))
            .collect()
    }
}

/// Applies strategies to a matrix until it is solved or they run out.
///
/// ```
/// use sudoku_dlx::strategy::{LogicalSolver, Outcome};
/// use sudoku_dlx::sudoku::Puzzle;
///
/// let line = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
/// let mut puzzle = Puzzle::from_str_line(line).unwrap();
/// let report = LogicalSolver::default().solve(puzzle.matrix_mut()).unwrap();
/// assert_eq!(report.outcome, Outcome::Solved);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalSolver {
    strategies: Vec<Strategy>,
    parallel: bool,
}

impl Default for LogicalSolver {
    fn default() -> Self {
        LogicalSolver::from_config(&SolverConfig::default())
    }
}

impl LogicalSolver {
    /// Uses `strategies` in the given order, sequentially
    pub fn new(strategies: &[Strategy]) -> Self {
        LogicalSolver {
            strategies: strategies.to_vec(),
            parallel: false,
        }
    }

    #[allow(missing_docs)]
    pub fn from_config(config: &SolverConfig) -> Self {
        LogicalSolver {
            strategies: config.effective_strategies(),
            parallel: config.parallel,
        }
    }

    /// The strategies in the order they are tried
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Finds the deduction the next [`solve`](Self::solve) step would apply
    pub fn step<P: Sync>(&self, matrix: &Matrix<P>) -> Option<Deduction> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.find(matrix, self.parallel))
    }

    /// Applies deductions until the matrix is solved, blocked or stuck.
    ///
    /// The matrix is left in its final state. [`SolveReport::rewind`] takes it back.
    pub fn solve<P: Sync>(&self, matrix: &mut Matrix<P>) -> Result<SolveReport, SolveError> {
        if matrix.constraint_count() == 0 {
            return Err(SolveError(()));
        }
        let mut deductions = vec![];
        let mut changes = vec![];
        let outcome = loop {
            if matrix.is_blocked() {
                error!("blocked after {} deductions", deductions.len());
                break Outcome::Blocked;
            }
            if matrix.is_solved() {
                info!("solved with {} deductions", deductions.len());
                break Outcome::Solved;
            }
            match self.step(matrix) {
                Some(deduction) => {
                    changes.extend(deduction.apply(matrix));
                    deductions.push(deduction);
                }
                None => {
                    warn!(
                        "stuck after {} deductions, {} candidates left",
                        deductions.len(),
                        matrix.active_candidate_count()
                    );
                    break Outcome::Stuck;
                }
            }
        };
        Ok(SolveReport {
            outcome,
            deductions,
            changes,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::matrix::test::knuth;
    use crate::sudoku::{canned, Puzzle};

    #[test]
    fn solves_exact_cover() {
        let mut matrix = knuth();
        let report = LogicalSolver::default().solve(&mut matrix).unwrap();
        assert_eq!(report.outcome, Outcome::Solved);
        let mut names = matrix
            .solution_candidates()
            .into_iter()
            .map(|c| matrix.candidate_name(c))
            .collect::<Vec<_>>();
        names.sort();
        assert_eq!(names, ["1", "4", "5"]);

        report.rewind(&mut matrix);
        assert_eq!(matrix.active_candidate_count(), 6);
        assert_eq!(matrix.active_constraint_count(), 7);
        assert!(matrix.solution().is_empty());
    }

    #[test]
    fn empty_matrix_is_an_error() {
        let mut matrix = Matrix::<()>::new();
        assert_eq!(LogicalSolver::default().solve(&mut matrix), Err(SolveError(())));
    }

    #[test]
    fn stuck_without_strategies() {
        let mut puzzle = Puzzle::from_rows(&canned::TEST).unwrap();
        let candidates = puzzle.matrix().active_candidate_count();
        let report = LogicalSolver::new(&[]).solve(puzzle.matrix_mut()).unwrap();
        assert_eq!(report.outcome, Outcome::Stuck);
        assert!(report.deductions.is_empty());
        assert_eq!(puzzle.matrix().active_candidate_count(), candidates);
    }

    #[test]
    fn singles_alone_get_stuck_on_hard_puzzles() {
        let mut puzzle = Puzzle::from_rows(&canned::VIDAR_MONSTER).unwrap();
        let before = puzzle.matrix().active_candidates().collect::<Vec<_>>();
        let report = LogicalSolver::new(&[Strategy::Singles])
            .solve(puzzle.matrix_mut())
            .unwrap();
        assert_eq!(report.outcome, Outcome::Stuck);
        report.rewind(puzzle.matrix_mut());
        assert_eq!(before, puzzle.matrix().active_candidates().collect::<Vec<_>>());
    }

    #[test]
    fn blocked_matrix_is_an_outcome() {
        // the hint takes the only candidate of b
        let mut matrix = Matrix::new();
        matrix.add_constraint("a", crate::matrix::ConstraintKind::Unknown).unwrap();
        matrix.add_constraint("b", crate::matrix::ConstraintKind::Unknown).unwrap();
        matrix.add_candidate("x", &["a", "b"], ()).unwrap();
        matrix.add_candidate("y", &["a"], ()).unwrap();
        matrix.add_hint("y").unwrap();
        let report = LogicalSolver::default().solve(&mut matrix).unwrap();
        assert_eq!(report.outcome, Outcome::Blocked);
    }
}
