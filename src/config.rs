//! Knobs for the logical solver and the backtracking search
use crate::strategy::Strategy;

/// Configuration of a [`LogicalSolver`](crate::strategy::LogicalSolver)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SolverConfig {
    /// Strategies to try, in order
    pub strategies: Vec<Strategy>,
    /// Split tuple searches across threads. Only has an effect with the `parallel` feature.
    pub parallel: bool,
    /// Allow strategies that are only sound if the puzzle has a single solution
    pub assume_unique: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            strategies: Strategy::ALL.to_vec(),
            parallel: false,
            assume_unique: true,
        }
    }
}

impl SolverConfig {
    /// The configured strategies minus those ruled out by `assume_unique`
    pub fn effective_strategies(&self) -> Vec<Strategy> {
        self.strategies
            .iter()
            .copied()
            .filter(|strategy| self.assume_unique || !strategy.assumes_unique_solution())
            .collect()
    }
}

/// Ceilings that abort a runaway [`search`](crate::search::search)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SearchLimits {
    /// Deepest recursion level allowed
    pub max_depth: usize,
    /// Most candidates a chosen constraint may have
    pub max_branching: usize,
    /// Stop after this many solutions
    pub max_solutions: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_depth: 150,
            max_branching: 1000,
            max_solutions: None,
        }
    }
}

impl SearchLimits {
    /// Default limits, stopping after `limit` solutions
    pub fn solutions(limit: usize) -> Self {
        SearchLimits {
            max_solutions: Some(limit),
            ..SearchLimits::default()
        }
    }
}
