pub(crate) mod locked_sets;
pub(crate) mod pairs;
pub(crate) mod prelude;
pub(crate) mod rectangles;
pub(crate) mod singles;
pub(crate) mod triples;
pub(crate) mod wings;

use self::prelude::*;
use std::collections::HashSet;

/// The strategies the [`LogicalSolver`](super::LogicalSolver) can use.
///
/// They only look at the matrix, never at what the constraints mean, so the
/// usual sudoku techniques appear in generalized form. A naked pair of two cells
/// and an X-Wing on two rows are the same pattern to [`Strategy::NakedPairs`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// A constraint with a single candidate left
    #[strum(serialize = "singles")]
    Singles,
    /// Pointing pairs and triples, box/line reduction
    #[strum(serialize = "locked-sets")]
    LockedSets,
    /// Naked and hidden pairs, X-Wings
    #[strum(serialize = "naked-pairs")]
    NakedPairs,
    /// Y-Wing on cell constraints only
    #[strum(serialize = "y-wing")]
    YWing,
    /// Naked and hidden triples, Swordfish
    #[strum(serialize = "naked-triples")]
    NakedTriples,
    /// Unique rectangle on cell constraints only. Assumes a unique solution.
    #[strum(serialize = "unique-rectangle")]
    UniqueRectangle,
    /// Unique rectangle on any constraints. Assumes a unique solution.
    #[strum(serialize = "hidden-unique-rectangle")]
    HiddenUniqueRectangle,
    /// Y-Wing on any constraints
    #[strum(serialize = "xy-wing")]
    XyWing,
}

impl Strategy {
    /// All strategies, simplest first
    pub const ALL: &'static [Strategy] = &[
        Strategy::Singles,
        Strategy::LockedSets,
        Strategy::NakedPairs,
        Strategy::YWing,
        Strategy::NakedTriples,
        Strategy::UniqueRectangle,
        Strategy::HiddenUniqueRectangle,
        Strategy::XyWing,
    ];

    /// Whether the strategy is only sound for puzzles with exactly one solution
    pub fn assumes_unique_solution(self) -> bool {
        matches!(
            self,
            Strategy::UniqueRectangle | Strategy::HiddenUniqueRectangle
        )
    }

    /// Looks for the first deduction of this kind. Never mutates the matrix.
    ///
    /// With `parallel` set and the `parallel` feature enabled, tuple searches are
    /// split across threads and any valid deduction may be returned.
    pub fn find<P: Sync>(self, matrix: &Matrix<P>, parallel: bool) -> Option<Deduction> {
        use self::Strategy::*;
        match self {
            Singles => singles::find_singles(matrix),
            LockedSets => locked_sets::find_locked_sets(matrix, parallel),
            NakedPairs => pairs::find_naked_pairs(matrix, parallel),
            YWing => wings::find_wing(matrix, parallel, true),
            NakedTriples => triples::find_naked_triples(matrix, parallel),
            UniqueRectangle => rectangles::find_unique_rectangle(matrix, parallel, true),
            HiddenUniqueRectangle => rectangles::find_unique_rectangle(matrix, parallel, false),
            XyWing => wings::find_wing(matrix, parallel, false),
        }
    }
}

// Runs `find` for 0..n and returns the first hit. In parallel mode the order is
// up to the thread pool.
pub(crate) fn first_match<F>(n: usize, parallel: bool, find: F) -> Option<Deduction>
where
    F: Fn(usize) -> Option<Deduction> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            return (0..n).into_par_iter().find_map_any(&find);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    (0..n).find_map(find)
}

// The two cells of a bivalue constraint
pub(crate) fn two_cells<P>(matrix: &Matrix<P>, constraint: ConstraintId) -> Option<[HitId; 2]> {
    let mut hits = matrix.constraint_hits(constraint);
    match (hits.next(), hits.next(), hits.next()) {
        (Some(a), Some(b), None) => Some([a, b]),
        _ => None,
    }
}

// Whether no two of the constraints share a candidate
pub(crate) fn disjoint<P>(matrix: &Matrix<P>, constraints: &[ConstraintId]) -> bool {
    constraints.iter().enumerate().all(|(i, &a)| {
        constraints[i + 1..]
            .iter()
            .all(|&b| !matrix.intersects(a, b))
    })
}

/// Eliminated candidates of one deduction, each recorded once
#[derive(Debug, Default)]
pub(crate) struct Eliminations {
    hits: Vec<HitId>,
    seen: HashSet<CandidateId>,
}

impl Eliminations {
    pub(crate) fn push<P>(&mut self, matrix: &Matrix<P>, hit: HitId) {
        if self.seen.insert(matrix.candidate_of(hit)) {
            self.hits.push(hit);
        }
    }

    // every active candidate other than `members` that conflicts with all of them
    pub(crate) fn push_common_conflicts<P>(&mut self, matrix: &Matrix<P>, members: &[CandidateId]) {
        for candidate in matrix.active_candidates() {
            if members.contains(&candidate) {
                continue;
            }
            if members.iter().all(|&m| matrix.conflicts(candidate, m)) {
                self.push(matrix, matrix.first_hit(candidate));
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub(crate) fn into_actions(self) -> Vec<Action> {
        self.hits.into_iter().map(Action::Eliminate).collect()
    }
}

// "r05" for a cell, "r05, r13 and c24" for several
pub(crate) fn constraint_list<P>(matrix: &Matrix<P>, constraints: &[ConstraintId]) -> String {
    let names = constraints
        .iter()
        .map(|&c| matrix.constraint_name(c))
        .collect::<Vec<_>>();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sudoku::{canned, Puzzle};
    use strum::IntoEnumIterator;

    #[test]
    fn all_lists_every_strategy() {
        let listed = Strategy::ALL.iter().copied().collect::<HashSet<_>>();
        let declared = Strategy::iter().collect::<HashSet<_>>();
        assert_eq!(listed, declared);
        assert_eq!(listed.len(), Strategy::ALL.len());
    }

    #[test]
    fn names_round_trip() {
        for strategy in Strategy::iter() {
            let name = strategy.to_string();
            assert_eq!(name.parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!("xy-wing".parse::<Strategy>().unwrap(), Strategy::XyWing);
    }

    #[test]
    fn deductions_undo_cleanly() {
        for rows in &[canned::HIDDEN_UNIQUE_RECT, canned::Y_WINGS, canned::X_WINGS] {
            let mut puzzle = Puzzle::from_rows(rows).unwrap();
            let matrix = puzzle.matrix_mut();
            let before = matrix.active_candidates().collect::<Vec<_>>();
            for strategy in Strategy::iter() {
                if let Some(deduction) = strategy.find(matrix, false) {
                    assert!(!deduction.actions().is_empty(), "{}", strategy);
                    deduction.apply(matrix);
                    deduction.undo(matrix);
                    assert_eq!(before, matrix.active_candidates().collect::<Vec<_>>());
                }
            }
        }
    }
}
