use super::prelude::*;

pub(crate) fn find_singles<P>(matrix: &Matrix<P>) -> Option<Deduction> {
    let constraint = matrix.active_constraints_with_len(1).next()?;
    let hit = matrix.constraint_hits(constraint).next()?;
    let description = format!(
        "{} is the only candidate left in {}",
        matrix.candidate_name(matrix.candidate_of(hit)),
        matrix.constraint_name(constraint),
    );
    debug!("{}", description);
    Some(Deduction::new(
        Strategy::Singles,
        Pattern::Single { constraint },
        vec![Action::Solve(hit)],
        description,
    ))
}
