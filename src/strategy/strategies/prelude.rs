pub(crate) use super::{constraint_list, disjoint, first_match, two_cells, Eliminations, Strategy};
pub(crate) use crate::matrix::{CandidateId, ConstraintId, ConstraintKind, HitId, Matrix};
pub(crate) use crate::strategy::deduction::{Action, Deduction, Pattern};
pub(crate) use log::debug;
