use super::prelude::*;

// If every candidate of one constraint also satisfies a second one, the second
// constraint will be satisfied by whichever candidate the first picks, so the
// rest of the second constraint is impossible.
pub(crate) fn find_locked_sets<P: Sync>(matrix: &Matrix<P>, parallel: bool) -> Option<Deduction> {
    let active = matrix
        .active_constraints()
        .filter(|&c| matrix.len(c) > 0)
        .collect::<Vec<_>>();

    first_match(active.len(), parallel, |i| {
        let first = active[i];
        active[i + 1..].iter().find_map(|&second| {
            let (len1, len2) = (matrix.len(first), matrix.len(second));
            if len1 == len2 {
                return None;
            }
            let (subset, superset) = if len1 < len2 { (first, second) } else { (second, first) };
            if !matrix.is_strict_subset_of(subset, superset) {
                return None;
            }
            Some(locked_set(matrix, subset, superset))
        })
    })
}

fn locked_set<P>(matrix: &Matrix<P>, subset: ConstraintId, superset: ConstraintId) -> Deduction {
    let actions = matrix
        .minus(superset, subset)
        .into_iter()
        .map(Action::Eliminate)
        .collect::<Vec<_>>();

    let what = match (matrix.constraint_kind(subset), matrix.constraint_kind(superset)) {
        (ConstraintKind::Box, _) => "pointing",
        (_, ConstraintKind::Box) => "box/line reduction",
        _ => "locked set",
    };
    let description = format!(
        "{}: candidates of {} all lie in {}, removing {} from {}",
        what,
        matrix.constraint_name(subset),
        matrix.constraint_name(superset),
        actions.len(),
        matrix.constraint_name(superset),
    );
    debug!("{}", description);
    Deduction::new(
        Strategy::LockedSets,
        Pattern::LockedSet { subset, superset },
        actions,
        description,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::matrix::test::knuth;

    #[test]
    fn strict_subset_eliminates_difference() {
        let mut matrix = knuth();
        // A = {2, 4} is a strict subset of D = {2, 4, 6}
        let deduction = find_locked_sets(&matrix, false).unwrap();
        let a = matrix.constraint_by_name("A").unwrap();
        let d = matrix.constraint_by_name("D").unwrap();
        assert_eq!(deduction.pattern(), &Pattern::LockedSet { subset: a, superset: d });
        let eliminated = deduction.eliminations().collect::<Vec<_>>();
        assert_eq!(eliminated.len(), 1);
        let six = matrix.candidate_of(eliminated[0]);
        assert_eq!(matrix.candidate_name(six), "6");

        deduction.apply(&mut matrix);
        assert!(!matrix.active_candidates().any(|c| c == six));
        assert_eq!(matrix.len(d), 2);
        assert_eq!(matrix.active_constraint_count(), 7);
    }

    #[test]
    fn equal_sets_are_not_locked() {
        let mut matrix = knuth();
        // without 6, D = A = {2, 4}
        let six = matrix.candidate_by_name("6").unwrap();
        matrix.eliminate_row(matrix.first_hit(six));
        // C = F = {1, 3}, E = {1}; E is a strict subset of C
        let deduction = find_locked_sets(&matrix, false).unwrap();
        let e = matrix.constraint_by_name("E").unwrap();
        assert!(matches!(deduction.pattern(), Pattern::LockedSet { subset, .. } if *subset == e));
    }
}
