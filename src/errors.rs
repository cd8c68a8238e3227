//! Errors for building, searching, solving and reading puzzles
use crate::matrix::ConstraintKind;

/// Error while building a [`Matrix`](crate::matrix::Matrix)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A constraint with this name already exists
    #[error("constraint {0:?} defined twice")]
    DuplicateConstraint(String),
    /// A candidate with this name already exists
    #[error("candidate {0:?} defined twice")]
    DuplicateCandidate(String),
    /// A candidate references a constraint that was never added
    #[error("candidate {candidate:?} references unknown constraint {constraint:?}")]
    UnknownConstraint {
        #[allow(missing_docs)]
        candidate: String,
        #[allow(missing_docs)]
        constraint: String,
    },
    /// A candidate names the same constraint more than once
    #[error("candidate {candidate:?} hits constraint {constraint:?} more than once")]
    RepeatedConstraint {
        #[allow(missing_docs)]
        candidate: String,
        #[allow(missing_docs)]
        constraint: String,
    },
    /// A candidate without any constraint
    #[error("candidate {0:?} hits no constraint")]
    EmptyCandidate(String),
    /// No candidate with this name exists
    #[error("unknown candidate {0:?}")]
    UnknownCandidate(String),
    /// The candidate was already removed, e.g. by a conflicting hint
    #[error("candidate {0:?} is no longer possible")]
    InactiveCandidate(String),
}

/// Error for the backtracking [`search`](crate::search::search)
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The matrix holds no constraint at all
    #[error("cannot search a matrix without constraints")]
    NoConstraints,
    /// Recursion went deeper than [`SearchLimits::max_depth`](crate::config::SearchLimits::max_depth)
    #[error("search exceeded {limit} levels")]
    DepthLimit {
        #[allow(missing_docs)]
        limit: usize,
    },
    /// A chosen constraint had more candidates than [`SearchLimits::max_branching`](crate::config::SearchLimits::max_branching)
    #[error("search branched {degree} ways at level {level}, limit is {limit}")]
    BranchLimit {
        #[allow(missing_docs)]
        level: usize,
        #[allow(missing_docs)]
        degree: usize,
        #[allow(missing_docs)]
        limit: usize,
    },
}

/// Error for the [`LogicalSolver`](crate::strategy::LogicalSolver)
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot solve a matrix without constraints")]
pub struct SolveError(pub(crate) ());

/// Error while reading a sudoku
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Character is neither a digit 1-9 nor `.`
    #[error("invalid entry {ch:?} in row {row}, column {col}")]
    InvalidEntry {
        #[allow(missing_docs)]
        row: u8,
        #[allow(missing_docs)]
        col: u8,
        #[allow(missing_docs)]
        ch: char,
    },
    /// Row does not have exactly 9 cells
    #[error("row {row} has {len} cells instead of 9")]
    InvalidLineLength {
        #[allow(missing_docs)]
        row: u8,
        #[allow(missing_docs)]
        len: usize,
    },
    /// Input ended before the 9th row
    #[error("input ends after {0} rows")]
    NotEnoughRows(u8),
    /// A given digit occurs twice in the same house
    #[error("digit {digit} given twice in {kind} {index}")]
    DuplicateDigit {
        #[allow(missing_docs)]
        kind: ConstraintKind,
        #[allow(missing_docs)]
        index: u8,
        #[allow(missing_docs)]
        digit: u8,
    },
    /// Elimination line names a candidate that doesn't exist
    #[error("cannot eliminate unknown candidate {0:?}")]
    UnknownCandidate(String),
    /// Building the matrix failed
    #[error(transparent)]
    Build(#[from] BuildError),
}
