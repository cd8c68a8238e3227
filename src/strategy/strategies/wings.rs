use super::prelude::*;

// (hinge, first wing, second wing), the hinge's first cell sees the first wing
const ROLES: [(usize, usize, usize); 6] = [
    (0, 1, 2),
    (0, 2, 1),
    (1, 0, 2),
    (1, 2, 0),
    (2, 0, 1),
    (2, 1, 0),
];

// Three disjoint bivalue constraints, a hinge {h1, h2} and two wings {a1, a2} and
// {b1, b2}. If h1 conflicts with a1 and h2 with b1, whichever way the hinge goes
// forces a2 or b2. Candidates conflicting with both a2 and b2 are impossible.
//
// With `cells_only` all three constraints must be cells, which is the classic Y-Wing.
pub(crate) fn find_wing<P: Sync>(
    matrix: &Matrix<P>,
    parallel: bool,
    cells_only: bool,
) -> Option<Deduction> {
    let bivalue = matrix
        .active_constraints_with_len(2)
        .filter(|&c| !cells_only || matrix.constraint_kind(c) == ConstraintKind::Cell)
        .collect::<Vec<_>>();

    first_match(bivalue.len(), parallel, |i| {
        let c1 = bivalue[i];
        for (j, &c2) in bivalue.iter().enumerate().skip(i + 1) {
            if matrix.intersects(c1, c2) {
                continue;
            }
            for &c3 in &bivalue[j + 1..] {
                if !disjoint(matrix, &[c1, c2, c3]) {
                    continue;
                }
                if let Some(deduction) = check_wing(matrix, [c1, c2, c3], cells_only) {
                    return Some(deduction);
                }
            }
        }
        None
    })
}

fn check_wing<P>(
    matrix: &Matrix<P>,
    constraints: [ConstraintId; 3],
    cells_only: bool,
) -> Option<Deduction> {
    let cells = [
        two_cells(matrix, constraints[0])?,
        two_cells(matrix, constraints[1])?,
        two_cells(matrix, constraints[2])?,
    ];
    for &(h, a, b) in &ROLES {
        let hinge = cells[h];
        for &[a1, a2] in &[cells[a], [cells[a][1], cells[a][0]]] {
            for &[b1, b2] in &[cells[b], [cells[b][1], cells[b][0]]] {
                if !conflict(matrix, hinge[0], a1) || !conflict(matrix, hinge[1], b1) {
                    continue;
                }
                let mut eliminations = Eliminations::default();
                let pincers = [matrix.candidate_of(a2), matrix.candidate_of(b2)];
                eliminations.push_common_conflicts(matrix, &pincers);
                if eliminations.is_empty() {
                    continue;
                }
                let wings = [constraints[a], constraints[b]];
                return Some(wing(
                    matrix,
                    constraints[h],
                    wings,
                    [a2, b2],
                    eliminations,
                    cells_only,
                ));
            }
        }
    }
    None
}

fn wing<P>(
    matrix: &Matrix<P>,
    hinge: ConstraintId,
    wings: [ConstraintId; 2],
    pincers: [HitId; 2],
    eliminations: Eliminations,
    cells_only: bool,
) -> Deduction {
    let all_cells = [hinge, wings[0], wings[1]]
        .iter()
        .all(|&c| matrix.constraint_kind(c) == ConstraintKind::Cell);
    let name = if all_cells { "Y-Wing" } else { "XY-Wing" };
    let description = format!(
        "{} with hinge {} and wings {}: one of {} and {} holds",
        name,
        matrix.constraint_name(hinge),
        constraint_list(matrix, &wings),
        matrix.candidate_name(matrix.candidate_of(pincers[0])),
        matrix.candidate_name(matrix.candidate_of(pincers[1])),
    );
    debug!("{}", description);
    let strategy = if cells_only { Strategy::YWing } else { Strategy::XyWing };
    Deduction::new(
        strategy,
        Pattern::Wing {
            hinge,
            wings,
            pincers,
        },
        eliminations.into_actions(),
        description,
    )
}

fn conflict<P>(matrix: &Matrix<P>, x: HitId, y: HitId) -> bool {
    matrix.conflicts(matrix.candidate_of(x), matrix.candidate_of(y))
}
