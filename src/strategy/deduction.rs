use super::Strategy;
use crate::changes::Change;
use crate::matrix::{CandidateId, ConstraintId, HitId, Matrix};

/// A single mutation implied by a deduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// The cell's candidate is part of the solution
    Solve(HitId),
    /// The cell's candidate can't be part of the solution
    Eliminate(HitId),
}

impl Action {
    /// The cell through which the action is applied
    pub fn hit(self) -> HitId {
        match self {
            Action::Solve(hit) | Action::Eliminate(hit) => hit,
        }
    }
}

/// The witness a strategy found, in matrix terms
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pattern {
    /// Only one candidate left in `constraint`
    Single {
        #[allow(missing_docs)]
        constraint: ConstraintId,
    },
    /// All candidates of `subset` are candidates of `superset`
    LockedSet {
        #[allow(missing_docs)]
        subset: ConstraintId,
        #[allow(missing_docs)]
        superset: ConstraintId,
    },
    /// Two bivalue constraints whose cells conflict crosswise,
    /// `matched[i][0]` with `matched[i][1]`
    Pair {
        #[allow(missing_docs)]
        constraints: [ConstraintId; 2],
        #[allow(missing_docs)]
        matched: [[HitId; 2]; 2],
    },
    /// Three constraints with up to three cells each, arranged in three mutually
    /// conflicting lines. Missing cells are `None`.
    Triple {
        #[allow(missing_docs)]
        constraints: [ConstraintId; 3],
        #[allow(missing_docs)]
        lines: [[Option<HitId>; 3]; 3],
    },
    /// A hinge constraint forcing one of the two pincer cells
    Wing {
        #[allow(missing_docs)]
        hinge: ConstraintId,
        #[allow(missing_docs)]
        wings: [ConstraintId; 2],
        #[allow(missing_docs)]
        pincers: [HitId; 2],
    },
    /// Three bivalue corners and a fourth constraint, whose two cells that complete
    /// the rectangle are `extra`
    Rectangle {
        #[allow(missing_docs)]
        corners: [ConstraintId; 3],
        #[allow(missing_docs)]
        fourth: ConstraintId,
        #[allow(missing_docs)]
        extra: [HitId; 2],
    },
}

/// A deduction found by a [`Strategy`].
///
/// It can be applied to the matrix it was found in and undone again, as long as
/// undos happen in reverse order of application.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deduction {
    pub(crate) strategy: Strategy,
    pub(crate) pattern: Pattern,
    pub(crate) actions: Vec<Action>,
    pub(crate) description: String,
}

impl Deduction {
    pub(crate) fn new(
        strategy: Strategy,
        pattern: Pattern,
        actions: Vec<Action>,
        description: String,
    ) -> Self {
        Deduction {
            strategy,
            pattern,
            actions,
            description,
        }
    }

    #[allow(missing_docs)]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[allow(missing_docs)]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The mutations, in the order they are applied
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Short justification, built from constraint names
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Cells of all eliminated candidates
    pub fn eliminations(&self) -> impl Iterator<Item = HitId> + '_ {
        self.actions.iter().filter_map(|action| match *action {
            Action::Eliminate(hit) => Some(hit),
            Action::Solve(_) => None,
        })
    }

    /// Performs all actions and reports every candidate they touched
    pub fn apply<P>(&self, matrix: &mut Matrix<P>) -> Vec<Change> {
        let mut changes = vec![];
        for &action in &self.actions {
            match action {
                Action::Solve(hit) => {
                    let candidate = matrix.candidate_of(hit);
                    let constraint = matrix.constraint_of(hit);
                    changes.push(Change::Solved(candidate));
                    let mut removed = |other: CandidateId| {
                        if other != candidate {
                            changes.push(Change::Removed(other))
                        }
                    };
                    matrix.cover_with(constraint, &mut removed);
                    matrix.cover_row_constraints_with(hit, &mut removed);
                    matrix.push_solution(hit);
                }
                Action::Eliminate(hit) => {
                    matrix.eliminate_row(hit);
                    changes.push(Change::Removed(matrix.candidate_of(hit)));
                }
            }
        }
        changes
    }

    /// Reverts [`apply`](Self::apply). Must be called before any later deduction is undone.
    pub fn undo<P>(&self, matrix: &mut Matrix<P>) -> Vec<Change> {
        let mut changes = vec![];
        for &action in self.actions.iter().rev() {
            match action {
                Action::Solve(hit) => {
                    let candidate = matrix.candidate_of(hit);
                    let constraint = matrix.constraint_of(hit);
                    let _popped = matrix.pop_solution();
                    debug_assert_eq!(_popped, Some(hit), "solution stack out of order");
                    let mut added = |other: CandidateId| {
                        if other != candidate {
                            changes.push(Change::Added(other))
                        }
                    };
                    matrix.uncover_row_constraints_with(hit, &mut added);
                    matrix.uncover_with(constraint, &mut added);
                    changes.push(Change::Unsolved(candidate));
                }
                Action::Eliminate(hit) => {
                    matrix.restore_row(hit);
                    changes.push(Change::Added(matrix.candidate_of(hit)));
                }
            }
        }
        changes
    }
}
