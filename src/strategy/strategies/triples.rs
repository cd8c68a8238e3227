use super::prelude::*;

// orderings of the cells of the second and third constraint
const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

type Lines = [[Option<HitId>; 3]; 3];

// Three disjoint constraints with two or three candidates each. If their cells can
// be arranged in three lines so that the cells of each line pairwise exclude each
// other, every line holds exactly one solution candidate. A candidate that conflicts
// with the whole of a line is then impossible.
pub(crate) fn find_naked_triples<P: Sync>(matrix: &Matrix<P>, parallel: bool) -> Option<Deduction> {
    let small = matrix
        .active_constraints()
        .filter(|&c| (2..=3).contains(&matrix.len(c)))
        .collect::<Vec<_>>();

    first_match(small.len(), parallel, |i| {
        let c1 = small[i];
        for (j, &c2) in small.iter().enumerate().skip(i + 1) {
            if matrix.intersects(c1, c2) {
                continue;
            }
            for &c3 in &small[j + 1..] {
                if matrix.intersects(c1, c3) || matrix.intersects(c2, c3) {
                    continue;
                }
                if let Some(deduction) = check_triple(matrix, [c1, c2, c3]) {
                    return Some(deduction);
                }
            }
        }
        None
    })
}

fn cells<P>(matrix: &Matrix<P>, constraint: ConstraintId) -> [Option<HitId>; 3] {
    let mut hits = matrix.constraint_hits(constraint);
    [hits.next(), hits.next(), hits.next()]
}

fn check_triple<P>(matrix: &Matrix<P>, constraints: [ConstraintId; 3]) -> Option<Deduction> {
    let grid = [
        cells(matrix, constraints[0]),
        cells(matrix, constraints[1]),
        cells(matrix, constraints[2]),
    ];

    // the first constraint's order is fixed, permuting it would only relabel lines
    for p2 in &PERMUTATIONS {
        for p3 in &PERMUTATIONS {
            let mut lines: Lines = [[None; 3]; 3];
            for (i, line) in lines.iter_mut().enumerate() {
                *line = [grid[0][i], grid[1][p2[i]], grid[2][p3[i]]];
            }
            if !lines.iter().all(|line| is_locked(matrix, line)) {
                continue;
            }

            let mut eliminations = Eliminations::default();
            for line in &lines {
                let members = members(matrix, line);
                eliminations.push_common_conflicts(matrix, &members);
            }
            if eliminations.is_empty() {
                continue;
            }

            let description = format!("triple in {}", constraint_list(matrix, &constraints));
            debug!("{}", description);
            return Some(Deduction::new(
                Strategy::NakedTriples,
                Pattern::Triple { constraints, lines },
                eliminations.into_actions(),
                description,
            ));
        }
    }
    None
}

fn members<P>(matrix: &Matrix<P>, line: &[Option<HitId>; 3]) -> Vec<CandidateId> {
    line.iter()
        .flatten()
        .map(|&hit| matrix.candidate_of(hit))
        .collect()
}

// at most one candidate of the line can be in the solution
fn is_locked<P>(matrix: &Matrix<P>, line: &[Option<HitId>; 3]) -> bool {
    match *members(matrix, line).as_slice() {
        [a, b] => matrix.conflicts(a, b),
        [a, b, c] => matrix.common_constraint(a, &[b, c]).is_some(),
        _ => false,
    }
}
