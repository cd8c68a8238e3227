//! Backtracking exact cover search.
//!
//! At every level the active constraint with the fewest remaining candidates is covered
//! and each of its candidates is tried in turn. Every cover is held by a scoped guard, so
//! the matrix is back in its original state when the search returns, also on error.
use crate::config::SearchLimits;
use crate::errors::SearchError;
use crate::matrix::{CandidateId, ConstraintId, Matrix};
use log::trace;
use std::fmt;
use std::ops::ControlFlow;

/// Statistics gathered during a [`search`]. Owned by the caller and accumulated over calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search tree nodes visited
    pub nodes: u64,
    /// Links updated by covers
    pub updates: u64,
    /// Solutions reported
    pub solutions: u64,
    /// Deepest level reached
    pub max_depth: usize,
    /// Most candidates of any chosen constraint
    pub max_branching: usize,
    level_updates: Vec<u64>,
    // profile[level][degree]
    profile: Vec<Vec<u64>>,
}

impl SearchStats {
    /// Links updated at each level
    pub fn level_updates(&self) -> &[u64] {
        &self.level_updates
    }

    /// How often a constraint with `degree` candidates was chosen at `level`
    pub fn profile(&self, level: usize, degree: usize) -> u64 {
        self.profile
            .get(level)
            .and_then(|degrees| degrees.get(degree))
            .copied()
            .unwrap_or(0)
    }

    fn record_branch(&mut self, level: usize, degree: usize) {
        if self.profile.len() <= level {
            self.profile.resize(level + 1, vec![]);
        }
        let degrees = &mut self.profile[level];
        if degrees.len() <= degree {
            degrees.resize(degree + 1, 0);
        }
        degrees[degree] += 1;
        self.max_branching = self.max_branching.max(degree);
    }

    fn record_updates(&mut self, level: usize, updates: usize) {
        if self.level_updates.len() <= level {
            self.level_updates.resize(level + 1, 0);
        }
        self.level_updates[level] += updates as u64;
        self.updates += updates as u64;
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} nodes, {} updates, {} solutions, depth {}, branching {}",
            self.nodes, self.updates, self.solutions, self.max_depth, self.max_branching
        )?;
        for (level, degrees) in self.profile.iter().enumerate() {
            write!(f, "{:3}:", level)?;
            for count in degrees.iter().skip(1) {
                write!(f, " {:5}", count)?;
            }
            writeln!(f, " {:8} updates", self.level_updates.get(level).unwrap_or(&0))?;
        }
        Ok(())
    }
}

/// Enumerates exact covers of the matrix.
///
/// `on_solution` sees the matrix with the full solution on its [solution stack](Matrix::solution)
/// and decides whether to keep going. The search also stops once
/// [`SearchLimits::max_solutions`] solutions were found.
pub fn search<P, F>(
    matrix: &mut Matrix<P>,
    limits: &SearchLimits,
    stats: &mut SearchStats,
    mut on_solution: F,
) -> Result<(), SearchError>
where
    F: FnMut(&Matrix<P>) -> ControlFlow<()>,
{
    if matrix.constraint_count() == 0 {
        return Err(SearchError::NoConstraints);
    }
    let mut found = 0;
    let mut on_solution = |matrix: &Matrix<P>| {
        found += 1;
        match on_solution(matrix) {
            ControlFlow::Continue(()) if limits.max_solutions.map_or(true, |max| found < max) => {
                ControlFlow::Continue(())
            }
            _ => ControlFlow::Break(()),
        }
    };
    descend(matrix, 0, limits, stats, &mut on_solution)?;
    Ok(())
}

fn descend<P, F>(
    matrix: &mut Matrix<P>,
    level: usize,
    limits: &SearchLimits,
    stats: &mut SearchStats,
    on_solution: &mut F,
) -> Result<ControlFlow<()>, SearchError>
where
    F: FnMut(&Matrix<P>) -> ControlFlow<()>,
{
    stats.nodes += 1;
    stats.max_depth = stats.max_depth.max(level);

    let column = match choose_constraint(matrix) {
        Some(column) => column,
        None => {
            stats.solutions += 1;
            return Ok(on_solution(matrix));
        }
    };
    let degree = matrix.len(column);
    if degree == 0 {
        return Ok(ControlFlow::Continue(()));
    }
    if level >= limits.max_depth {
        return Err(SearchError::DepthLimit {
            limit: limits.max_depth,
        });
    }
    if degree > limits.max_branching {
        return Err(SearchError::BranchLimit {
            level,
            degree,
            limit: limits.max_branching,
        });
    }
    stats.record_branch(level, degree);

    let mut covered = matrix.cover_scoped(column);
    stats.record_updates(level, covered.updates());
    let rows = covered.constraint_hits(column).collect::<Vec<_>>();
    for row in rows {
        let mut chosen = covered.choose_scoped(row);
        stats.record_updates(level, chosen.updates());
        trace!("level {}: trying {}", level, chosen.row_name(row));
        if descend(&mut *chosen, level + 1, limits, stats, on_solution)?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}

// fewest candidates first, ties go to the lower ordinal
fn choose_constraint<P>(matrix: &Matrix<P>) -> Option<ConstraintId> {
    let mut best: Option<(usize, ConstraintId)> = None;
    for constraint in matrix.active_constraints() {
        let len = matrix.len(constraint);
        if best.map_or(true, |(best_len, _)| len < best_len) {
            best = Some((len, constraint));
            if len == 0 {
                break;
            }
        }
    }
    best.map(|(_, constraint)| constraint)
}

/// Counts solutions, stopping at `limit`
pub fn count_solutions<P>(matrix: &mut Matrix<P>, limit: usize) -> Result<usize, SearchError> {
    let mut count = 0;
    if limit == 0 {
        return Ok(0);
    }
    search(
        matrix,
        &SearchLimits::solutions(limit),
        &mut SearchStats::default(),
        |_| {
            count += 1;
            ControlFlow::Continue(())
        },
    )?;
    Ok(count)
}

/// Collects up to `limit` solutions, each as the list of hinted and chosen candidates
pub fn solve_at_most<P>(
    matrix: &mut Matrix<P>,
    limit: usize,
) -> Result<Vec<Vec<CandidateId>>, SearchError> {
    let mut solutions = vec![];
    if limit == 0 {
        return Ok(solutions);
    }
    search(
        matrix,
        &SearchLimits::solutions(limit),
        &mut SearchStats::default(),
        |matrix| {
            solutions.push(matrix.solution_candidates());
            ControlFlow::Continue(())
        },
    )?;
    Ok(solutions)
}

/// Finds any one solution
pub fn solve_one<P>(matrix: &mut Matrix<P>) -> Result<Option<Vec<CandidateId>>, SearchError> {
    Ok(solve_at_most(matrix, 1)?.pop())
}
