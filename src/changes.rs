//! Records of what happened to candidates when a deduction was applied or undone.
//!
//! The matrix never calls back into user code. Whoever applies a [`Deduction`](crate::strategy::Deduction)
//! gets a list of [`Change`]s back and can forward them to a [`Listener`], e.g. to keep a
//! display in sync.
use crate::matrix::CandidateId;

/// One state transition of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Change {
    /// Candidate became possible again
    Added(CandidateId),
    /// Candidate was ruled out
    Removed(CandidateId),
    /// Candidate was placed into the solution
    Solved(CandidateId),
    /// Candidate was taken back out of the solution
    Unsolved(CandidateId),
    /// Candidate was given as a hint
    Hinted(CandidateId),
}

impl Change {
    /// The candidate that changed
    pub fn candidate(self) -> CandidateId {
        use self::Change::*;
        match self {
            Added(c) | Removed(c) | Solved(c) | Unsolved(c) | Hinted(c) => c,
        }
    }

    /// Calls the listener method matching this change
    pub fn notify<L: Listener + ?Sized>(self, listener: &mut L) {
        use self::Change::*;
        match self {
            Added(c) => listener.candidate_added(c),
            Removed(c) => listener.candidate_removed(c),
            Solved(c) => listener.candidate_solved(c),
            Unsolved(c) => listener.candidate_unsolved(c),
            Hinted(c) => listener.candidate_hinted(c),
        }
    }
}

/// Observer of candidate changes. All methods default to doing nothing.
#[allow(missing_docs)]
pub trait Listener {
    fn candidate_added(&mut self, _candidate: CandidateId) {}
    fn candidate_removed(&mut self, _candidate: CandidateId) {}
    fn candidate_solved(&mut self, _candidate: CandidateId) {}
    fn candidate_unsolved(&mut self, _candidate: CandidateId) {}
    fn candidate_hinted(&mut self, _candidate: CandidateId) {}
}

/// Forwards every change in order
pub fn dispatch<L: Listener + ?Sized>(changes: &[Change], listener: &mut L) {
    for &change in changes {
        change.notify(listener);
    }
}
