// Reversible mutations of the matrix.
//
// Every unlink leaves the removed cell's own links untouched so that the
// matching relink can put it back. Undo operations must be called in exactly
// the reverse order of their counterparts. Debug builds keep a journal to
// catch violations, release builds trust the caller.
use super::{CandidateId, ConstraintId, HitId, Matrix};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Cover(ConstraintId),
    Eliminate(CandidateId),
}

impl<P> Matrix<P> {
    fn journal_push(&mut self, _op: Op) {
        #[cfg(debug_assertions)]
        self.journal.push(_op);
    }

    fn journal_pop(&mut self, _op: Op) {
        #[cfg(debug_assertions)]
        {
            let last = self.journal.pop();
            debug_assert_eq!(last, Some(_op), "undo out of order");
        }
    }

    fn unlink_constraint(&mut self, c: ConstraintId) {
        let (prev, next) = (self.constraints[c.0].prev, self.constraints[c.0].next);
        self.constraints[prev.0].next = next;
        self.constraints[next.0].prev = prev;
        self.constraints[c.0].covered = true;
        if self.constraints[c.0].primary {
            self.active_constraints -= 1;
        }
    }

    fn relink_constraint(&mut self, c: ConstraintId) {
        let (prev, next) = (self.constraints[c.0].prev, self.constraints[c.0].next);
        self.constraints[prev.0].next = c;
        self.constraints[next.0].prev = c;
        self.constraints[c.0].covered = false;
        if self.constraints[c.0].primary {
            self.active_constraints += 1;
        }
    }

    fn unlink_candidate(&mut self, r: CandidateId) {
        let (prev, next) = (self.candidates[r.0].prev, self.candidates[r.0].next);
        self.candidates[prev.0].next = next;
        self.candidates[next.0].prev = prev;
        self.candidates[r.0].active = false;
        self.active_candidates -= 1;
    }

    fn relink_candidate(&mut self, r: CandidateId) {
        let (prev, next) = (self.candidates[r.0].prev, self.candidates[r.0].next);
        self.candidates[prev.0].next = r;
        self.candidates[next.0].prev = r;
        self.candidates[r.0].active = true;
        self.active_candidates += 1;
    }

    // removes the cell from its constraint only
    fn unlink_vertical(&mut self, h: HitId) {
        let hit = self.hits[h.0];
        self.hits[hit.up.0].down = hit.down;
        self.hits[hit.down.0].up = hit.up;
        self.constraints[hit.constraint.0].len -= 1;
    }

    fn relink_vertical(&mut self, h: HitId) {
        let hit = self.hits[h.0];
        self.hits[hit.up.0].down = h;
        self.hits[hit.down.0].up = h;
        self.constraints[hit.constraint.0].len += 1;
    }

    /// Removes a constraint and every candidate that satisfies it.
    ///
    /// Returns the number of links updated, counting the constraint itself.
    pub fn cover(&mut self, constraint: ConstraintId) -> usize {
        self.cover_with(constraint, &mut |_| ())
    }

    /// Exact inverse of [`cover`](Self::cover). Must undo the most recent cover or elimination.
    pub fn uncover(&mut self, constraint: ConstraintId) -> usize {
        self.uncover_with(constraint, &mut |_| ())
    }

    pub(crate) fn cover_with<F>(&mut self, constraint: ConstraintId, on_removed: &mut F) -> usize
    where
        F: FnMut(CandidateId),
    {
        debug_assert!(constraint != ConstraintId::ROOT, "root is never covered");
        debug_assert!(!self.constraints[constraint.0].covered, "covered twice");
        self.journal_push(Op::Cover(constraint));
        self.unlink_constraint(constraint);

        let head = self.constraints[constraint.0].head;
        let mut updates = 1;
        let mut row = self.hits[head.0].down;
        while row != head {
            let mut hit = self.hits[row.0].right;
            while hit != row {
                self.unlink_vertical(hit);
                updates += 1;
                hit = self.hits[hit.0].right;
            }
            let candidate = self.hits[row.0].candidate;
            self.unlink_candidate(candidate);
            on_removed(candidate);
            row = self.hits[row.0].down;
        }
        updates
    }

    pub(crate) fn uncover_with<F>(&mut self, constraint: ConstraintId, on_added: &mut F) -> usize
    where
        F: FnMut(CandidateId),
    {
        self.journal_pop(Op::Cover(constraint));

        let head = self.constraints[constraint.0].head;
        let mut updates = 1;
        let mut row = self.hits[head.0].up;
        while row != head {
            let candidate = self.hits[row.0].candidate;
            self.relink_candidate(candidate);
            on_added(candidate);
            let mut hit = self.hits[row.0].left;
            while hit != row {
                self.relink_vertical(hit);
                updates += 1;
                hit = self.hits[hit.0].left;
            }
            row = self.hits[row.0].up;
        }
        self.relink_constraint(constraint);
        updates
    }

    /// Covers every constraint of the cell's candidate except the cell's own.
    pub fn cover_row_constraints(&mut self, hit: HitId) -> usize {
        self.cover_row_constraints_with(hit, &mut |_| ())
    }

    /// Exact inverse of [`cover_row_constraints`](Self::cover_row_constraints)
    pub fn uncover_row_constraints(&mut self, hit: HitId) -> usize {
        self.uncover_row_constraints_with(hit, &mut |_| ())
    }

    pub(crate) fn cover_row_constraints_with<F>(&mut self, hit: HitId, on_removed: &mut F) -> usize
    where
        F: FnMut(CandidateId),
    {
        let mut updates = 0;
        let mut cur = self.hits[hit.0].right;
        while cur != hit {
            updates += self.cover_with(self.hits[cur.0].constraint, on_removed);
            cur = self.hits[cur.0].right;
        }
        updates
    }

    pub(crate) fn uncover_row_constraints_with<F>(&mut self, hit: HitId, on_added: &mut F) -> usize
    where
        F: FnMut(CandidateId),
    {
        let mut updates = 0;
        let mut cur = self.hits[hit.0].left;
        while cur != hit {
            updates += self.uncover_with(self.hits[cur.0].constraint, on_added);
            cur = self.hits[cur.0].left;
        }
        updates
    }

    /// Removes just the cell's candidate from all of its constraints.
    ///
    /// No constraint leaves the active list, they only get shorter.
    pub fn eliminate_row(&mut self, hit: HitId) -> usize {
        let candidate = self.hits[hit.0].candidate;
        debug_assert!(self.candidates[candidate.0].active, "eliminated twice");
        self.journal_push(Op::Eliminate(candidate));

        let mut updates = 0;
        let mut cur = hit;
        loop {
            self.unlink_vertical(cur);
            updates += 1;
            cur = self.hits[cur.0].right;
            if cur == hit {
                break;
            }
        }
        self.unlink_candidate(candidate);
        updates
    }

    /// Exact inverse of [`eliminate_row`](Self::eliminate_row), given the same cell
    pub fn restore_row(&mut self, hit: HitId) -> usize {
        let candidate = self.hits[hit.0].candidate;
        self.journal_pop(Op::Eliminate(candidate));
        self.relink_candidate(candidate);

        let mut updates = 0;
        let mut cur = hit;
        loop {
            cur = self.hits[cur.0].left;
            self.relink_vertical(cur);
            updates += 1;
            if cur == hit {
                break;
            }
        }
        updates
    }

    /// Records a cell as part of the solution. Its constraints must already be covered.
    pub fn push_solution(&mut self, hit: HitId) {
        debug_assert!(
            self.constraints[self.hits[hit.0].constraint.0].covered,
            "pushed before covering"
        );
        self.solution.push(hit);
    }

    /// Takes back the most recent solution cell, before its constraints get uncovered
    pub fn pop_solution(&mut self) -> Option<HitId> {
        self.solution.pop()
    }

    /// Covers the constraint until the returned guard is dropped.
    pub fn cover_scoped(&mut self, constraint: ConstraintId) -> Covered<'_, P> {
        let updates = self.cover(constraint);
        Covered {
            matrix: self,
            constraint,
            updates,
        }
    }

    /// Covers the rest of the cell's row and pushes the cell onto the solution
    /// until the returned guard is dropped.
    ///
    /// The cell's own constraint is expected to be covered already, typically
    /// through [`cover_scoped`](Self::cover_scoped).
    pub fn choose_scoped(&mut self, hit: HitId) -> Chosen<'_, P> {
        let updates = self.cover_row_constraints(hit);
        self.push_solution(hit);
        Chosen {
            matrix: self,
            hit,
            updates,
        }
    }
}

/// Guard of [`Matrix::cover_scoped`]. Uncovers on drop.
#[derive(Debug)]
pub struct Covered<'a, P> {
    matrix: &'a mut Matrix<P>,
    constraint: ConstraintId,
    updates: usize,
}

impl<P> Covered<'_, P> {
    /// Links updated by the cover
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl<P> Deref for Covered<'_, P> {
    type Target = Matrix<P>;

    fn deref(&self) -> &Matrix<P> {
        &*self.matrix
    }
}

impl<P> DerefMut for Covered<'_, P> {
    fn deref_mut(&mut self) -> &mut Matrix<P> {
        &mut *self.matrix
    }
}

impl<P> Drop for Covered<'_, P> {
    fn drop(&mut self) {
        self.matrix.uncover(self.constraint);
    }
}

/// Guard of [`Matrix::choose_scoped`]. Pops the solution and uncovers on drop.
#[derive(Debug)]
pub struct Chosen<'a, P> {
    matrix: &'a mut Matrix<P>,
    hit: HitId,
    updates: usize,
}

impl<P> Chosen<'_, P> {
    /// Links updated while covering the row
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl<P> Deref for Chosen<'_, P> {
    type Target = Matrix<P>;

    fn deref(&self) -> &Matrix<P> {
        &*self.matrix
    }
}

impl<P> DerefMut for Chosen<'_, P> {
    fn deref_mut(&mut self) -> &mut Matrix<P> {
        &mut *self.matrix
    }
}

impl<P> Drop for Chosen<'_, P> {
    fn drop(&mut self) {
        let _popped = self.matrix.pop_solution();
        debug_assert_eq!(_popped, Some(self.hit), "solution stack out of order");
        self.matrix.uncover_row_constraints(self.hit);
    }
}
