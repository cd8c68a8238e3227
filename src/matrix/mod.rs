//! The sparse constraint matrix at the heart of the solver.
//!
//! Constraints are the columns of an exact cover problem, candidates are its rows,
//! and every 1 in the matrix is a [`HitId`] that links its candidate to its constraint.
//! All three live in flat arenas and refer to each other by index, so "unlinking" a cell
//! just rewrites the indices of its neighbours. The unlinked cell keeps its own
//! links, which is what makes [`Matrix::uncover`] and [`Matrix::restore_row`] work.
//!
//! Constraints and candidates each carry an ordinal that is strictly increasing along their
//! lists. Set relations such as [`Matrix::is_subset_of`] rely on it.
//!
//! ## Example
//!
//! ```
//! use sudoku_dlx::matrix::{ConstraintKind, Matrix};
//!
//! let mut matrix = Matrix::new();
//! for name in &["a", "b", "c"] {
//!     matrix.add_constraint(*name, ConstraintKind::Unknown).unwrap();
//! }
//! matrix.add_candidate("x", &["a", "b"], ()).unwrap();
//! matrix.add_candidate("y", &["c"], ()).unwrap();
//! matrix.add_candidate("z", &["b", "c"], ()).unwrap();
//!
//! assert_eq!(sudoku_dlx::search::count_solutions(&mut matrix, 10).unwrap(), 1);
//! ```
mod links;
mod relations;

pub use self::links::{Chosen, Covered};

use crate::changes::Change;
use crate::errors::BuildError;
use std::collections::HashMap;

/// Index of a constraint (column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintId(pub(crate) usize);

/// Index of a candidate (row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateId(pub(crate) usize);

/// Index of a cell, the intersection of one candidate and one constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitId(pub(crate) usize);

impl ConstraintId {
    pub(crate) const ROOT: ConstraintId = ConstraintId(0);

    /// Position in the arena, starting at 1 for the first added constraint
    pub fn as_index(self) -> usize {
        self.0
    }
}

impl CandidateId {
    pub(crate) const ROOT: CandidateId = CandidateId(0);

    /// Position in the arena, starting at 1 for the first added candidate
    pub fn as_index(self) -> usize {
        self.0
    }
}

/// What sort of unit a constraint stands for. Only used to restrict or describe strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum ConstraintKind {
    #[strum(serialize = "cell")]
    Cell,
    #[strum(serialize = "row")]
    Row,
    #[strum(serialize = "column")]
    Column,
    #[strum(serialize = "box")]
    Box,
    #[strum(serialize = "constraint")]
    Unknown,
}

#[derive(Debug, Clone)]
pub(crate) struct Constraint {
    pub(crate) name: String,
    pub(crate) kind: ConstraintKind,
    pub(crate) num: u32,
    // header cell, never part of a candidate
    pub(crate) head: HitId,
    pub(crate) len: usize,
    pub(crate) prev: ConstraintId,
    pub(crate) next: ConstraintId,
    // secondary constraints stay out of the active list
    pub(crate) primary: bool,
    pub(crate) covered: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) name: String,
    pub(crate) num: u32,
    // meaningless for the root
    pub(crate) first: HitId,
    pub(crate) prev: CandidateId,
    pub(crate) next: CandidateId,
    pub(crate) active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hit {
    pub(crate) up: HitId,
    pub(crate) down: HitId,
    pub(crate) left: HitId,
    pub(crate) right: HitId,
    pub(crate) constraint: ConstraintId,
    pub(crate) candidate: CandidateId,
}

/// Sparse 0/1 matrix of constraints and candidates with reversible cover operations.
///
/// `P` is an arbitrary payload stored with each candidate.
#[derive(Debug, Clone)]
pub struct Matrix<P = ()> {
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) hits: Vec<Hit>,
    // payloads[i] belongs to CandidateId(i + 1)
    payloads: Vec<P>,
    constraint_names: HashMap<String, ConstraintId>,
    candidate_names: HashMap<String, CandidateId>,
    pub(crate) active_constraints: usize,
    pub(crate) active_candidates: usize,
    pub(crate) hints: Vec<HitId>,
    pub(crate) solution: Vec<HitId>,
    #[cfg(debug_assertions)]
    pub(crate) journal: Vec<links::Op>,
}

impl<P> Default for Matrix<P> {
    fn default() -> Self {
        Matrix::new()
    }
}

impl<P> Matrix<P> {
    /// Creates an empty matrix holding only the two root sentinels
    pub fn new() -> Self {
        let root_hit = Hit {
            up: HitId(0),
            down: HitId(0),
            left: HitId(0),
            right: HitId(0),
            constraint: ConstraintId::ROOT,
            candidate: CandidateId::ROOT,
        };
        let root_constraint = Constraint {
            name: String::from("root"),
            kind: ConstraintKind::Unknown,
            num: 0,
            head: HitId(0),
            len: 0,
            prev: ConstraintId::ROOT,
            next: ConstraintId::ROOT,
            primary: false,
            covered: false,
        };
        let root_candidate = Candidate {
            name: String::from("root"),
            num: 0,
            first: HitId(0),
            prev: CandidateId::ROOT,
            next: CandidateId::ROOT,
            active: false,
        };
        Matrix {
            constraints: vec![root_constraint],
            candidates: vec![root_candidate],
            hits: vec![root_hit],
            payloads: vec![],
            constraint_names: HashMap::new(),
            candidate_names: HashMap::new(),
            active_constraints: 0,
            active_candidates: 0,
            hints: vec![],
            solution: vec![],
            #[cfg(debug_assertions)]
            journal: vec![],
        }
    }

    /// Adds a constraint that every solution must satisfy exactly once.
    ///
    /// Constraints are appended to the active list, so their ordinals increase
    /// in the order they are added.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        kind: ConstraintKind,
    ) -> Result<ConstraintId, BuildError> {
        self.push_constraint(name.into(), kind, true)
    }

    /// Adds a constraint that may be satisfied at most once.
    ///
    /// It never appears among the active constraints, so it neither blocks nor
    /// completes a solution and is never branched on.
    pub fn add_secondary_constraint(
        &mut self,
        name: impl Into<String>,
        kind: ConstraintKind,
    ) -> Result<ConstraintId, BuildError> {
        self.push_constraint(name.into(), kind, false)
    }

    fn push_constraint(
        &mut self,
        name: String,
        kind: ConstraintKind,
        primary: bool,
    ) -> Result<ConstraintId, BuildError> {
        if self.constraint_names.contains_key(&name) {
            return Err(BuildError::DuplicateConstraint(name));
        }
        let id = ConstraintId(self.constraints.len());
        let head = HitId(self.hits.len());
        self.hits.push(Hit {
            up: head,
            down: head,
            left: head,
            right: head,
            constraint: id,
            candidate: CandidateId::ROOT,
        });

        let (prev, next) = match primary {
            true => (self.constraints[ConstraintId::ROOT.0].prev, ConstraintId::ROOT),
            false => (id, id),
        };
        self.constraints.push(Constraint {
            name: name.clone(),
            kind,
            num: id.0 as u32,
            head,
            len: 0,
            prev,
            next,
            primary,
            covered: false,
        });
        if primary {
            self.constraints[prev.0].next = id;
            self.constraints[next.0].prev = id;
            self.active_constraints += 1;
        }
        self.constraint_names.insert(name, id);
        Ok(id)
    }

    /// Adds a candidate that satisfies the named constraints.
    ///
    /// The candidate's cells are linked in ascending constraint order, whatever
    /// order the names come in. All constraints must exist already.
    pub fn add_candidate<I, S>(
        &mut self,
        name: impl Into<String>,
        constraint_names: I,
        payload: P,
    ) -> Result<CandidateId, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        if self.candidate_names.contains_key(&name) {
            return Err(BuildError::DuplicateCandidate(name));
        }

        let mut constraints = vec![];
        for constraint_name in constraint_names {
            let constraint_name = constraint_name.as_ref();
            match self.constraint_names.get(constraint_name) {
                Some(&id) => constraints.push(id),
                None => {
                    return Err(BuildError::UnknownConstraint {
                        candidate: name,
                        constraint: constraint_name.to_owned(),
                    })
                }
            }
        }
        if constraints.is_empty() {
            return Err(BuildError::EmptyCandidate(name));
        }
        constraints.sort_unstable();
        if let Some(pair) = constraints.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(BuildError::RepeatedConstraint {
                candidate: name,
                constraint: self.constraints[pair[0].0].name.clone(),
            });
        }

        let id = CandidateId(self.candidates.len());
        let first = self.hits.len();
        let last = first + constraints.len() - 1;
        for (i, &constraint) in constraints.iter().enumerate() {
            let hit = HitId(first + i);
            let head = self.constraints[constraint.0].head;
            let tail = self.hits[head.0].up;
            self.hits.push(Hit {
                up: tail,
                down: head,
                left: HitId(if i == 0 { last } else { first + i - 1 }),
                right: HitId(if first + i == last { first } else { first + i + 1 }),
                constraint,
                candidate: id,
            });
            self.hits[tail.0].down = hit;
            self.hits[head.0].up = hit;
            self.constraints[constraint.0].len += 1;
        }

        let prev = self.candidates[CandidateId::ROOT.0].prev;
        self.candidates.push(Candidate {
            name: name.clone(),
            num: id.0 as u32,
            first: HitId(first),
            prev,
            next: CandidateId::ROOT,
            active: true,
        });
        self.candidates[prev.0].next = id;
        self.candidates[CandidateId::ROOT.0].prev = id;
        self.active_candidates += 1;
        self.payloads.push(payload);
        self.candidate_names.insert(name, id);
        Ok(id)
    }

    /// Fixes a candidate as part of every solution before solving starts.
    ///
    /// Covers all of the candidate's constraints and records it among the hints.
    pub fn add_hint(&mut self, name: &str) -> Result<Vec<Change>, BuildError> {
        let candidate = self.active_candidate_by_name(name)?;
        let hit = self.candidates[candidate.0].first;
        let constraint = self.hits[hit.0].constraint;

        let mut changes = vec![Change::Hinted(candidate)];
        let mut removed = |other: CandidateId| {
            if other != candidate {
                changes.push(Change::Removed(other))
            }
        };
        self.cover_with(constraint, &mut removed);
        self.cover_row_constraints_with(hit, &mut removed);
        self.hints.push(hit);
        Ok(changes)
    }

    /// Removes a single candidate by name before solving starts.
    ///
    /// Candidates that are no longer active are left alone.
    pub fn eliminate_candidate(&mut self, name: &str) -> Result<Vec<Change>, BuildError> {
        let candidate = match self.active_candidate_by_name(name) {
            Ok(candidate) => candidate,
            Err(BuildError::InactiveCandidate(_)) => return Ok(vec![]),
            Err(err) => return Err(err),
        };
        self.eliminate_row(self.candidates[candidate.0].first);
        Ok(vec![Change::Removed(candidate)])
    }

    fn active_candidate_by_name(&self, name: &str) -> Result<CandidateId, BuildError> {
        let candidate = self
            .candidate_by_name(name)
            .ok_or_else(|| BuildError::UnknownCandidate(name.to_owned()))?;
        match self.is_candidate_active(candidate) {
            true => Ok(candidate),
            false => Err(BuildError::InactiveCandidate(name.to_owned())),
        }
    }

    /// Looks up a constraint by its name
    pub fn constraint_by_name(&self, name: &str) -> Option<ConstraintId> {
        self.constraint_names.get(name).copied()
    }

    /// Looks up a candidate by its name
    pub fn candidate_by_name(&self, name: &str) -> Option<CandidateId> {
        self.candidate_names.get(name).copied()
    }

    /// Number of constraints ever added, primary and secondary
    pub fn constraint_count(&self) -> usize {
        self.constraints.len() - 1
    }

    /// Number of candidates ever added
    pub fn candidate_count(&self) -> usize {
        self.candidates.len() - 1
    }

    /// Number of primary constraints that are not covered
    pub fn active_constraint_count(&self) -> usize {
        self.active_constraints
    }

    /// Number of candidates that are neither covered nor eliminated
    pub fn active_candidate_count(&self) -> usize {
        self.active_candidates
    }

    /// All uncovered primary constraints, in ascending ordinal
    pub fn active_constraints(&self) -> ActiveConstraints<'_> {
        ActiveConstraints {
            constraints: &self.constraints,
            cur: ConstraintId::ROOT,
        }
    }

    /// All uncovered primary constraints with exactly `len` remaining candidates
    pub fn active_constraints_with_len(
        &self,
        len: usize,
    ) -> impl Iterator<Item = ConstraintId> + '_ {
        self.active_constraints().filter(move |&c| self.len(c) == len)
    }

    /// All remaining candidates, in ascending ordinal
    pub fn active_candidates(&self) -> ActiveCandidates<'_> {
        ActiveCandidates {
            candidates: &self.candidates,
            cur: CandidateId::ROOT,
        }
    }

    /// Cells of a constraint that belong to active candidates, top to bottom
    pub fn constraint_hits(&self, constraint: ConstraintId) -> ConstraintHits<'_> {
        let head = self.constraints[constraint.0].head;
        ConstraintHits {
            hits: &self.hits,
            head,
            cur: head,
        }
    }

    /// All cells of a candidate, left to right, whether their constraints are covered or not
    pub fn candidate_hits(&self, candidate: CandidateId) -> CandidateHits<'_> {
        let first = self.candidates[candidate.0].first;
        CandidateHits {
            hits: &self.hits,
            first,
            next: Some(first),
        }
    }

    /// True if some active constraint can no longer be satisfied
    pub fn is_blocked(&self) -> bool {
        self.active_constraints().any(|c| self.len(c) == 0)
    }

    /// True if every primary constraint is covered
    pub fn is_solved(&self) -> bool {
        self.active_constraints == 0
    }

    /// Whether the constraint is primary and not covered
    pub fn is_constraint_active(&self, constraint: ConstraintId) -> bool {
        let constraint = &self.constraints[constraint.0];
        constraint.primary && !constraint.covered
    }

    /// Whether the candidate is still possible
    pub fn is_candidate_active(&self, candidate: CandidateId) -> bool {
        self.candidates[candidate.0].active
    }

    /// Number of active candidates with a cell in this constraint
    pub fn len(&self, constraint: ConstraintId) -> usize {
        self.constraints[constraint.0].len
    }

    #[allow(missing_docs)]
    pub fn constraint_name(&self, constraint: ConstraintId) -> &str {
        &self.constraints[constraint.0].name
    }

    #[allow(missing_docs)]
    pub fn constraint_kind(&self, constraint: ConstraintId) -> ConstraintKind {
        self.constraints[constraint.0].kind
    }

    #[allow(missing_docs)]
    pub fn candidate_name(&self, candidate: CandidateId) -> &str {
        &self.candidates[candidate.0].name
    }

    /// The payload given to [`add_candidate`](Self::add_candidate), `None` for the root
    pub fn payload(&self, candidate: CandidateId) -> Option<&P> {
        candidate.0.checked_sub(1).and_then(|i| self.payloads.get(i))
    }

    /// The cell through which a candidate is usually addressed
    pub fn first_hit(&self, candidate: CandidateId) -> HitId {
        self.candidates[candidate.0].first
    }

    /// Constraint the cell belongs to
    pub fn constraint_of(&self, hit: HitId) -> ConstraintId {
        self.hits[hit.0].constraint
    }

    /// Candidate the cell belongs to
    pub fn candidate_of(&self, hit: HitId) -> CandidateId {
        self.hits[hit.0].candidate
    }

    /// Cells of candidates fixed by [`add_hint`](Self::add_hint), in order
    pub fn hints(&self) -> &[HitId] {
        &self.hints
    }

    /// The current, possibly partial, solution stack
    pub fn solution(&self) -> &[HitId] {
        &self.solution
    }

    /// Hinted and chosen candidates together
    pub fn solution_candidates(&self) -> Vec<CandidateId> {
        self.hints
            .iter()
            .chain(&self.solution)
            .map(|&hit| self.candidate_of(hit))
            .collect()
    }

    /// Label for log output, e.g. `r0c0d5: p00 r05 c05 b05 (1 of 4)`
    pub fn row_name(&self, hit: HitId) -> String {
        let candidate = self.candidate_of(hit);
        let hits = self.candidate_hits(candidate).collect::<Vec<_>>();
        let position = hits.iter().position(|&h| h == hit).map_or(0, |pos| pos + 1);
        let names = hits
            .iter()
            .map(|&h| self.constraint_name(self.constraint_of(h)))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{}: {} ({} of {})",
            self.candidate_name(candidate),
            names,
            position,
            hits.len()
        )
    }
}

/// Iterator over the active constraints, see [`Matrix::active_constraints`]
#[derive(Debug, Clone)]
pub struct ActiveConstraints<'a> {
    constraints: &'a [Constraint],
    cur: ConstraintId,
}

impl Iterator for ActiveConstraints<'_> {
    type Item = ConstraintId;

    fn next(&mut self) -> Option<ConstraintId> {
        let next = self.constraints[self.cur.0].next;
        if next == ConstraintId::ROOT {
            return None;
        }
        self.cur = next;
        Some(next)
    }
}

/// Iterator over the active candidates, see [`Matrix::active_candidates`]
#[derive(Debug, Clone)]
pub struct ActiveCandidates<'a> {
    candidates: &'a [Candidate],
    cur: CandidateId,
}

impl Iterator for ActiveCandidates<'_> {
    type Item = CandidateId;

    fn next(&mut self) -> Option<CandidateId> {
        let next = self.candidates[self.cur.0].next;
        if next == CandidateId::ROOT {
            return None;
        }
        self.cur = next;
        Some(next)
    }
}

/// Iterator going down a constraint, see [`Matrix::constraint_hits`]
#[derive(Debug, Clone)]
pub struct ConstraintHits<'a> {
    hits: &'a [Hit],
    head: HitId,
    cur: HitId,
}

impl Iterator for ConstraintHits<'_> {
    type Item = HitId;

    fn next(&mut self) -> Option<HitId> {
        let down = self.hits[self.cur.0].down;
        if down == self.head {
            return None;
        }
        self.cur = down;
        Some(down)
    }
}

/// Iterator going right along a candidate, see [`Matrix::candidate_hits`]
#[derive(Debug, Clone)]
pub struct CandidateHits<'a> {
    hits: &'a [Hit],
    first: HitId,
    next: Option<HitId>,
}

impl Iterator for CandidateHits<'_> {
    type Item = HitId;

    fn next(&mut self) -> Option<HitId> {
        let hit = self.next?;
        let right = self.hits[hit.0].right;
        self.next = if right == self.first { None } else { Some(right) };
        Some(hit)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    // exact cover example from Knuth's "Dancing Links" paper
    pub(crate) fn knuth() -> Matrix<()> {
        let mut matrix = Matrix::new();
        for name in &["A", "B", "C", "D", "E", "F", "G"] {
            matrix.add_constraint(*name, ConstraintKind::Unknown).unwrap();
        }
        let rows: &[(&str, &[&str])] = &[
            ("1", &["C", "E", "F"]),
            ("2", &["A", "D", "G"]),
            ("3", &["B", "C", "F"]),
            ("4", &["A", "D"]),
            ("5", &["B", "G"]),
            ("6", &["D", "E", "G"]),
        ];
        for &(name, constraints) in rows {
            matrix.add_candidate(name, constraints, ()).unwrap();
        }
        matrix
    }

    #[test]
    fn build_counts() {
        let matrix = knuth();
        assert_eq!(matrix.active_constraint_count(), 7);
        assert_eq!(matrix.active_candidate_count(), 6);
        let lens = matrix
            .active_constraints()
            .map(|c| matrix.len(c))
            .collect::<Vec<_>>();
        assert_eq!(lens, [2, 2, 2, 3, 2, 2, 3]);
        assert!(!matrix.is_blocked());
        assert!(!matrix.is_solved());
    }

    #[test]
    fn ordinals_increase() {
        let matrix = knuth();
        let nums = matrix
            .active_constraints()
            .map(|c| matrix.constraints[c.0].num)
            .collect::<Vec<_>>();
        assert!(nums.windows(2).all(|w| w[0] < w[1]));
        let nums = matrix
            .active_candidates()
            .map(|c| matrix.candidates[c.0].num)
            .collect::<Vec<_>>();
        assert!(nums.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn row_cells_sorted_by_constraint() {
        let mut matrix = Matrix::new();
        for name in &["a", "b", "c"] {
            matrix.add_constraint(*name, ConstraintKind::Unknown).unwrap();
        }
        let x = matrix.add_candidate("x", &["c", "a", "b"], 7u8).unwrap();
        let names = matrix
            .candidate_hits(x)
            .map(|h| matrix.constraint_name(matrix.constraint_of(h)))
            .collect::<Vec<_>>();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(matrix.payload(x), Some(&7));
        assert_eq!(matrix.row_name(matrix.first_hit(x)), "x: a b c (1 of 3)");
    }

    #[test]
    fn build_errors() {
        let mut matrix = Matrix::<()>::new();
        matrix.add_constraint("a", ConstraintKind::Unknown).unwrap();
        assert_eq!(
            matrix.add_constraint("a", ConstraintKind::Row),
            Err(BuildError::DuplicateConstraint("a".into()))
        );
        assert!(matches!(
            matrix.add_candidate("x", &["b"], ()),
            Err(BuildError::UnknownConstraint { .. })
        ));
        assert_eq!(
            matrix.add_candidate("x", Vec::<&str>::new(), ()),
            Err(BuildError::EmptyCandidate("x".into()))
        );
        assert!(matches!(
            matrix.add_candidate("x", &["a", "a"], ()),
            Err(BuildError::RepeatedConstraint { .. })
        ));
        matrix.add_candidate("x", &["a"], ()).unwrap();
        assert_eq!(
            matrix.add_candidate("x", &["a"], ()),
            Err(BuildError::DuplicateCandidate("x".into()))
        );
        assert_eq!(
            matrix.add_hint("y"),
            Err(BuildError::UnknownCandidate("y".into()))
        );
    }

    #[test]
    fn hints_cover_their_constraints() {
        let mut matrix = knuth();
        let changes = matrix.add_hint("4").unwrap();
        // A and D are gone, taking candidates 2, 4 and 6 with them
        assert_eq!(matrix.active_constraint_count(), 5);
        assert_eq!(matrix.active_candidate_count(), 3);
        assert_eq!(changes[0], Change::Hinted(matrix.candidate_by_name("4").unwrap()));
        assert_eq!(changes.len(), 3);
        assert_eq!(
            matrix.add_hint("2"),
            Err(BuildError::InactiveCandidate("2".into()))
        );
    }

    #[test]
    fn secondary_constraints_stay_inactive() {
        let mut matrix = Matrix::<()>::new();
        matrix.add_constraint("a", ConstraintKind::Unknown).unwrap();
        let s = matrix.add_secondary_constraint("s", ConstraintKind::Unknown).unwrap();
        matrix.add_candidate("x", &["a", "s"], ()).unwrap();
        matrix.add_candidate("y", &["a"], ()).unwrap();
        assert_eq!(matrix.active_constraint_count(), 1);
        assert!(!matrix.is_constraint_active(s));
        assert_eq!(matrix.len(s), 1);
        assert!(matrix.active_constraints().all(|c| c != s));
    }
}
