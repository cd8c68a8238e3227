use super::prelude::*;

// Two disjoint constraints with two candidates each, {n1, n2} and {n3, n4}.
// If n1 conflicts with n3 and n2 with n4, then either n1 and n4 or n2 and n3 are
// part of the solution. Anything that conflicts with both n1 and n3 is impossible,
// likewise for n2 and n4.
pub(crate) fn find_naked_pairs<P: Sync>(matrix: &Matrix<P>, parallel: bool) -> Option<Deduction> {
    let pairs = matrix.active_constraints_with_len(2).collect::<Vec<_>>();

    first_match(pairs.len(), parallel, |i| {
        let first = pairs[i];
        pairs[i + 1..]
            .iter()
            .find_map(|&second| check_pair(matrix, first, second))
    })
}

fn check_pair<P>(
    matrix: &Matrix<P>,
    first: ConstraintId,
    second: ConstraintId,
) -> Option<Deduction> {
    if matrix.intersects(first, second) {
        return None;
    }
    let [n1, n2] = two_cells(matrix, first)?;
    let [n3, n4] = two_cells(matrix, second)?;

    let mut eliminations = Eliminations::default();
    let mut witness = None;
    for &(a, b) in &[(n3, n4), (n4, n3)] {
        let matched = [[n1, a], [n2, b]];
        if !matched.iter().all(|&[x, y]| conflict(matrix, x, y)) {
            continue;
        }
        for &[x, y] in &matched {
            eliminations
                .push_common_conflicts(matrix, &[matrix.candidate_of(x), matrix.candidate_of(y)]);
        }
        witness.get_or_insert(matched);
    }
    if eliminations.is_empty() {
        return None;
    }
    let matched = witness?;

    let description = format!(
        "pair in {}",
        constraint_list(matrix, &[first, second])
    );
    debug!("{}", description);
    Some(Deduction::new(
        Strategy::NakedPairs,
        Pattern::Pair {
            constraints: [first, second],
            matched,
        },
        eliminations.into_actions(),
        description,
    ))
}

fn conflict<P>(matrix: &Matrix<P>, x: HitId, y: HitId) -> bool {
    matrix.conflicts(matrix.candidate_of(x), matrix.candidate_of(y))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::matrix::ConstraintKind;

    // Two bivalue cells sharing a unit: {a1, a2} and {b1, b2} where a1/b1 and a2/b2
    // each share a unit constraint. A fifth candidate in both units goes.
    #[test]
    fn crossing_pair_eliminates() {
        let mut matrix = Matrix::new();
        for name in &["cellA", "cellB", "cellC", "unit1", "unit2"] {
            matrix.add_constraint(*name, ConstraintKind::Unknown).unwrap();
        }
        matrix.add_candidate("a1", &["cellA", "unit1"], ()).unwrap();
        matrix.add_candidate("a2", &["cellA", "unit2"], ()).unwrap();
        matrix.add_candidate("b1", &["cellB", "unit1"], ()).unwrap();
        matrix.add_candidate("b2", &["cellB", "unit2"], ()).unwrap();
        matrix.add_candidate("c1", &["cellC", "unit1"], ()).unwrap();
        matrix.add_candidate("c2", &["cellC", "unit2"], ()).unwrap();
        matrix.add_candidate("c3", &["cellC"], ()).unwrap();

        let deduction = find_naked_pairs(&matrix, false).unwrap();
        let mut names = deduction
            .eliminations()
            .map(|hit| matrix.candidate_name(matrix.candidate_of(hit)))
            .collect::<Vec<_>>();
        names.sort();
        // c1 hits unit1 like a1 and b1
        assert_eq!(names, ["c1", "c2"]);
        assert!(matches!(deduction.pattern(), Pattern::Pair { .. }));
    }

    #[test]
    fn overlapping_constraints_are_skipped() {
        let mut matrix = Matrix::new();
        for name in &["x", "y", "z"] {
            matrix.add_constraint(*name, ConstraintKind::Unknown).unwrap();
        }
        matrix.add_candidate("a", &["x", "y"], ()).unwrap();
        matrix.add_candidate("b", &["x", "y"], ()).unwrap();
        matrix.add_candidate("c", &["z"], ()).unwrap();
        assert!(find_naked_pairs(&matrix, false).is_none());
    }
}
