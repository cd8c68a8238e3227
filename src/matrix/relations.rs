//! Set relations between constraints and between candidates.
//!
//! A constraint is treated as the set of its active candidates and a candidate as the
//! set of its constraints. Both lists are sorted by ordinal, so every relation is a
//! single merge pass over the two lists.
use super::{CandidateId, ConstraintId, HitId, Matrix};
use std::iter::Peekable;

// (ordinal, cell) pairs with strictly increasing ordinals
type Keyed = (u32, HitId);

struct Ordered<I> {
    inner: I,
    last: Option<u32>,
}

impl<I: Iterator<Item = Keyed>> Iterator for Ordered<I> {
    type Item = Keyed;

    fn next(&mut self) -> Option<Keyed> {
        let item = self.inner.next()?;
        debug_assert!(
            self.last.map_or(true, |last| last < item.0),
            "ordinals out of order"
        );
        self.last = Some(item.0);
        Some(item)
    }
}

/// Walks the left list and reports for each entry whether the right list has the same ordinal
struct MergeJoin<L, R: Iterator<Item = Keyed>> {
    left: Ordered<L>,
    right: Peekable<Ordered<R>>,
}

impl<L, R> MergeJoin<L, R>
where
    L: Iterator<Item = Keyed>,
    R: Iterator<Item = Keyed>,
{
    fn new(left: L, right: R) -> Self {
        MergeJoin {
            left: Ordered { inner: left, last: None },
            right: Ordered { inner: right, last: None }.peekable(),
        }
    }
}

impl<L, R> Iterator for MergeJoin<L, R>
where
    L: Iterator<Item = Keyed>,
    R: Iterator<Item = Keyed>,
{
    type Item = (Keyed, bool);

    fn next(&mut self) -> Option<(Keyed, bool)> {
        let item = self.left.next()?;
        while let Some(&(num, _)) = self.right.peek() {
            if num >= item.0 {
                break;
            }
            self.right.next();
        }
        let found = matches!(self.right.peek(), Some(&(num, _)) if num == item.0);
        Some((item, found))
    }
}

impl<P> Matrix<P> {
    // cells of a constraint keyed by candidate ordinal
    fn column(&self, constraint: ConstraintId) -> impl Iterator<Item = Keyed> + '_ {
        self.constraint_hits(constraint)
            .map(move |hit| (self.candidates[self.candidate_of(hit).0].num, hit))
    }

    // cells of a candidate keyed by constraint ordinal
    fn row(&self, candidate: CandidateId) -> impl Iterator<Item = Keyed> + '_ {
        self.candidate_hits(candidate)
            .map(move |hit| (self.constraints[self.constraint_of(hit).0].num, hit))
    }

    fn join_columns(
        &self,
        a: ConstraintId,
        b: ConstraintId,
    ) -> impl Iterator<Item = (HitId, bool)> + '_ {
        MergeJoin::new(self.column(a), self.column(b)).map(|((_, hit), found)| (hit, found))
    }

    fn join_rows(
        &self,
        x: CandidateId,
        y: CandidateId,
    ) -> impl Iterator<Item = (HitId, bool)> + '_ {
        MergeJoin::new(self.row(x), self.row(y)).map(|((_, hit), found)| (hit, found))
    }

    /// Whether every candidate of `a` is also a candidate of `b`
    pub fn is_subset_of(&self, a: ConstraintId, b: ConstraintId) -> bool {
        self.len(a) <= self.len(b) && self.join_columns(a, b).all(|(_, found)| found)
    }

    /// Whether `a` is a subset of `b` and `b` has more candidates
    pub fn is_strict_subset_of(&self, a: ConstraintId, b: ConstraintId) -> bool {
        self.len(a) < self.len(b) && self.is_subset_of(a, b)
    }

    /// Cells of `a` whose candidate is not in `b`
    pub fn minus(&self, a: ConstraintId, b: ConstraintId) -> Vec<HitId> {
        self.join_columns(a, b)
            .filter(|&(_, found)| !found)
            .map(|(hit, _)| hit)
            .collect()
    }

    /// Cells of `a` whose candidate is also in `b`
    pub fn shared_hits(&self, a: ConstraintId, b: ConstraintId) -> Vec<HitId> {
        self.join_columns(a, b)
            .filter(|&(_, found)| found)
            .map(|(hit, _)| hit)
            .collect()
    }

    /// Whether `a` and `b` have a candidate in common
    pub fn intersects(&self, a: ConstraintId, b: ConstraintId) -> bool {
        self.join_columns(a, b).any(|(_, found)| found)
    }

    /// Whether two candidates share a constraint and so can't both be part of a solution.
    ///
    /// Every candidate conflicts with itself.
    pub fn conflicts(&self, x: CandidateId, y: CandidateId) -> bool {
        self.join_rows(x, y).any(|(_, found)| found)
    }

    /// Cells of `x` in constraints that `y` hits as well
    pub fn shared_constraints(&self, x: CandidateId, y: CandidateId) -> Vec<HitId> {
        self.join_rows(x, y)
            .filter(|&(_, found)| found)
            .map(|(hit, _)| hit)
            .collect()
    }

    /// Cell of `x` in the first constraint that all of `others` hit too
    pub fn common_constraint(&self, x: CandidateId, others: &[CandidateId]) -> Option<HitId> {
        let mut shared = self.row(x).collect::<Vec<_>>();
        for &y in others {
            shared = MergeJoin::new(shared.into_iter(), self.row(y))
                .filter(|&(_, found)| found)
                .map(|(item, _)| item)
                .collect();
            if shared.is_empty() {
                return None;
            }
        }
        shared.first().map(|&(_, hit)| hit)
    }
}

#[cfg(test)]
mod test {
    use super::super::test::knuth;
    use super::*;

    fn id(matrix: &Matrix<()>, name: &str) -> ConstraintId {
        matrix.constraint_by_name(name).unwrap()
    }

    fn candidate_names(matrix: &Matrix<()>, hits: &[HitId]) -> Vec<String> {
        hits.iter()
            .map(|&h| matrix.candidate_name(matrix.candidate_of(h)).to_owned())
            .collect()
    }

    #[test]
    fn laws_on_every_constraint() {
        let matrix = knuth();
        for a in matrix.active_constraints() {
            assert!(matrix.is_subset_of(a, a));
            assert!(!matrix.is_strict_subset_of(a, a));
            assert!(matrix.minus(a, a).is_empty());
            assert_eq!(matrix.shared_hits(a, a).len(), matrix.len(a));
            for b in matrix.active_constraints() {
                if matrix.is_subset_of(a, b) && matrix.is_subset_of(b, a) {
                    assert_eq!(
                        candidate_names(&matrix, &matrix.constraint_hits(a).collect::<Vec<_>>()),
                        candidate_names(&matrix, &matrix.constraint_hits(b).collect::<Vec<_>>()),
                    );
                }
            }
        }
    }

    #[test]
    fn constraint_relations() {
        let matrix = knuth();
        // A = {2, 4}, D = {2, 4, 6}, G = {2, 5, 6}, B = {3, 5}
        let (a, b, d, g) = (id(&matrix, "A"), id(&matrix, "B"), id(&matrix, "D"), id(&matrix, "G"));
        assert!(matrix.is_strict_subset_of(a, d));
        assert!(!matrix.is_subset_of(d, a));
        assert!(!matrix.is_subset_of(a, g));
        assert_eq!(candidate_names(&matrix, &matrix.minus(d, a)), ["6"]);
        assert_eq!(candidate_names(&matrix, &matrix.shared_hits(d, g)), ["2", "6"]);
        assert!(matrix.intersects(b, g));
        assert!(!matrix.intersects(a, b));
    }

    #[test]
    fn candidate_relations() {
        let matrix = knuth();
        let c = |name| matrix.candidate_by_name(name).unwrap();
        assert!(matrix.conflicts(c("1"), c("3")));
        assert!(matrix.conflicts(c("2"), c("2")));
        assert!(!matrix.conflicts(c("1"), c("2")));
        let shared = matrix.shared_constraints(c("2"), c("6"));
        let names = shared
            .iter()
            .map(|&h| matrix.constraint_name(matrix.constraint_of(h)))
            .collect::<Vec<_>>();
        assert_eq!(names, ["D", "G"]);

        let common = matrix.common_constraint(c("2"), &[c("4"), c("6")]).unwrap();
        assert_eq!(matrix.constraint_name(matrix.constraint_of(common)), "D");
        assert_eq!(matrix.common_constraint(c("2"), &[c("5"), c("4")]), None);
    }

    #[test]
    fn relations_follow_covers() {
        let mut matrix = knuth();
        let (a, d) = (id(&matrix, "A"), id(&matrix, "D"));
        let six = matrix.candidate_by_name("6").unwrap();
        let hit = matrix.first_hit(six);
        matrix.eliminate_row(hit);
        // with 6 gone D = {2, 4} = A
        assert!(matrix.is_subset_of(d, a));
        assert!(!matrix.is_strict_subset_of(a, d));
        matrix.restore_row(hit);
        assert!(matrix.is_strict_subset_of(a, d));
    }
}
