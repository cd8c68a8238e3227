use super::prelude::*;
use std::collections::HashSet;

// three corners in chain order, first and last are adjacent to the fourth
type Chain = [[HitId; 2]; 3];

// Three disjoint bivalue constraints whose cells line up as three corners of a
// rectangle, and a fourth wider constraint holding the two cells that close it.
// The eight candidates split into two ways of filling the rectangle. If every
// constraint they touch is hit exactly twice, nothing outside can tell the two
// apart, so a unique solution can't use either of the fourth corner's cells.
//
// With `cells_only` the three corners must be cells. The fourth constraint may be
// of any kind either way.
pub(crate) fn find_unique_rectangle<P: Sync>(
    matrix: &Matrix<P>,
    parallel: bool,
    cells_only: bool,
) -> Option<Deduction> {
    let corners = matrix
        .active_constraints_with_len(2)
        .filter(|&c| !cells_only || matrix.constraint_kind(c) == ConstraintKind::Cell)
        .collect::<Vec<_>>();
    let wide = matrix
        .active_constraints()
        .filter(|&c| matrix.len(c) > 2)
        .collect::<Vec<_>>();
    if wide.is_empty() {
        return None;
    }

    first_match(corners.len(), parallel, |i| {
        let c1 = corners[i];
        for (j, &c2) in corners.iter().enumerate().skip(i + 1) {
            if matrix.intersects(c1, c2) {
                continue;
            }
            for &c3 in &corners[j + 1..] {
                if !disjoint(matrix, &[c1, c2, c3]) {
                    continue;
                }
                if let Some(deduction) = check_rectangle(matrix, [c1, c2, c3], &wide, cells_only) {
                    return Some(deduction);
                }
            }
        }
        None
    })
}

fn check_rectangle<P>(
    matrix: &Matrix<P>,
    constraints: [ConstraintId; 3],
    wide: &[ConstraintId],
    cells_only: bool,
) -> Option<Deduction> {
    let chains = chains(matrix, constraints)?;
    if chains.is_empty() {
        return None;
    }
    let six = chains[0]
        .1
        .iter()
        .flatten()
        .map(|&hit| matrix.candidate_of(hit))
        .collect::<Vec<_>>();

    for &fourth in wide {
        let extras = matrix
            .constraint_hits(fourth)
            .filter(|&hit| !six.contains(&matrix.candidate_of(hit)))
            .collect::<Vec<_>>();
        for (order, chain) in &chains {
            for (k, &x) in extras.iter().enumerate() {
                for &y in &extras[k + 1..] {
                    let extra = if closes(matrix, chain, x, y) {
                        [x, y]
                    } else if closes(matrix, chain, y, x) {
                        [y, x]
                    } else {
                        continue;
                    };
                    if !is_undistinguished(matrix, chain, extra) {
                        continue;
                    }
                    let corners = [
                        constraints[order[0]],
                        constraints[order[1]],
                        constraints[order[2]],
                    ];
                    return Some(rectangle(matrix, corners, fourth, [x, y], extra, cells_only));
                }
            }
        }
    }
    None
}

// Every way to line up the three corners: each constraint takes a turn as the
// middle corner, and the middle and last corner can be flipped.
fn chains<P>(
    matrix: &Matrix<P>,
    constraints: [ConstraintId; 3],
) -> Option<Vec<([usize; 3], Chain)>> {
    let cells = [
        two_cells(matrix, constraints[0])?,
        two_cells(matrix, constraints[1])?,
        two_cells(matrix, constraints[2])?,
    ];
    let flips = |[a, b]: [HitId; 2]| [[a, b], [b, a]];

    let mut chains = vec![];
    for &order in &[[0, 1, 2], [1, 0, 2], [0, 2, 1]] {
        let first = cells[order[0]];
        for &middle in &flips(cells[order[1]]) {
            for &last in &flips(cells[order[2]]) {
                let aligned = (0..2).all(|side| {
                    conflict(matrix, first[side], middle[side])
                        && conflict(matrix, middle[side], last[side])
                });
                if aligned {
                    chains.push((order, [first, middle, last]));
                }
            }
        }
    }
    Some(chains)
}

// whether x lines up with the first side of the rectangle and y with the second
fn closes<P>(matrix: &Matrix<P>, chain: &Chain, x: HitId, y: HitId) -> bool {
    let [first, _, last] = chain;
    conflict(matrix, last[0], x)
        && conflict(matrix, x, first[0])
        && conflict(matrix, last[1], y)
        && conflict(matrix, y, first[1])
}

// every constraint of the eight candidates is hit an even number of times
fn is_undistinguished<P>(matrix: &Matrix<P>, chain: &Chain, extra: [HitId; 2]) -> bool {
    let mut stray = HashSet::new();
    for &hit in chain.iter().flatten().chain(&extra) {
        for cell in matrix.candidate_hits(matrix.candidate_of(hit)) {
            let constraint = matrix.constraint_of(cell);
            if !stray.remove(&constraint) {
                stray.insert(constraint);
            }
        }
    }
    stray.is_empty()
}

fn rectangle<P>(
    matrix: &Matrix<P>,
    corners: [ConstraintId; 3],
    fourth: ConstraintId,
    eliminated: [HitId; 2],
    extra: [HitId; 2],
    cells_only: bool,
) -> Deduction {
    let mut eliminations = Eliminations::default();
    for &hit in &eliminated {
        eliminations.push(matrix, hit);
    }
    let description = format!(
        "{} on {} and {}: {} and {} would allow a second solution",
        if cells_only { "unique rectangle" } else { "hidden unique rectangle" },
        constraint_list(matrix, &corners),
        matrix.constraint_name(fourth),
        matrix.candidate_name(matrix.candidate_of(eliminated[0])),
        matrix.candidate_name(matrix.candidate_of(eliminated[1])),
    );
    debug!("{}", description);
    let strategy = if cells_only {
        Strategy::UniqueRectangle
    } else {
        Strategy::HiddenUniqueRectangle
    };
    Deduction::new(
        strategy,
        Pattern::Rectangle {
            corners,
            fourth,
            extra,
        },
        eliminations.into_actions(),
        description,
    )
}

fn conflict<P>(matrix: &Matrix<P>, x: HitId, y: HitId) -> bool {
    matrix.conflicts(matrix.candidate_of(x), matrix.candidate_of(y))
}

#[cfg(test)]
mod test {
    use super::*;

    // Digits 1 and 2 in the four corners of rows 0-1 and columns 0-1, where the
    // corners r0c0, r0c1 and r1c0 can only take 1 or 2 and r1c1 can also take 3.
    // Only the cells are primary, rows and columns are secondary and boxes are left out.
    // A `marked` r0c0d1 hits one more constraint than the rest of the rectangle.
    fn rectangle_matrix(kind: ConstraintKind, marked: bool) -> Matrix<()> {
        let mut matrix = Matrix::new();
        for cell in &["p00", "p01", "p10", "p11"] {
            matrix.add_constraint(*cell, kind).unwrap();
        }
        for unit in &["r0", "r1", "c0", "c1"] {
            for digit in 1..=3 {
                let name = format!("{}{}", unit, digit);
                matrix.add_secondary_constraint(name, ConstraintKind::Unknown).unwrap();
            }
        }
        matrix.add_secondary_constraint("mark", ConstraintKind::Unknown).unwrap();
        let corners: &[(u8, u8, &[u8])] = &[
            (0, 0, &[1, 2]),
            (0, 1, &[1, 2]),
            (1, 0, &[1, 2]),
            (1, 1, &[1, 2, 3]),
        ];
        for &(row, col, digits) in corners {
            for &digit in digits {
                let mut constraints = vec![
                    format!("p{}{}", row, col),
                    format!("r{}{}", row, digit),
                    format!("c{}{}", col, digit),
                ];
                if marked && (row, col, digit) == (0, 0, 1) {
                    constraints.push("mark".to_owned());
                }
                matrix
                    .add_candidate(format!("r{}c{}d{}", row, col, digit), &constraints, ())
                    .unwrap();
            }
        }
        matrix
    }

    fn eliminated_names(matrix: &Matrix<()>, deduction: &Deduction) -> Vec<String> {
        let mut names = deduction
            .eliminations()
            .map(|hit| matrix.candidate_name(matrix.candidate_of(hit)).to_owned())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    #[test]
    fn fourth_corner_loses_both_digits() {
        let matrix = rectangle_matrix(ConstraintKind::Cell, false);
        let deduction = find_unique_rectangle(&matrix, false, true).unwrap();
        assert_eq!(eliminated_names(&matrix, &deduction), ["r1c1d1", "r1c1d2"]);
        assert_eq!(deduction.strategy(), Strategy::UniqueRectangle);
        let fourth = matrix.constraint_by_name("p11").unwrap();
        assert!(matches!(
            deduction.pattern(),
            Pattern::Rectangle { fourth: f, .. } if *f == fourth
        ));
    }

    #[test]
    fn hidden_rectangle_takes_any_corners() {
        let matrix = rectangle_matrix(ConstraintKind::Unknown, false);
        assert!(find_unique_rectangle(&matrix, false, true).is_none());
        let deduction = find_unique_rectangle(&matrix, false, false).unwrap();
        assert_eq!(eliminated_names(&matrix, &deduction), ["r1c1d1", "r1c1d2"]);
        assert!(deduction.description().starts_with("hidden unique rectangle"));
    }

    #[test]
    fn outside_constraint_distinguishes() {
        let matrix = rectangle_matrix(ConstraintKind::Cell, true);
        assert!(find_unique_rectangle(&matrix, false, true).is_none());
        assert!(find_unique_rectangle(&matrix, false, false).is_none());
    }
}
