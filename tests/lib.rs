extern crate sudoku_dlx;

use std::collections::HashSet;
use sudoku_dlx::sudoku::{canned, Grid, Puzzle};
use sudoku_dlx::{Change, LogicalSolver, Outcome, SolverConfig, Strategy};

const README: &str = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";

fn solution_of(rows: &[&str]) -> Grid {
    let mut puzzle = Puzzle::from_rows(rows).unwrap();
    puzzle.solve_unique().unwrap().expect("exactly one solution")
}

// every candidate of the true solution is still solved or active
fn assert_sound(puzzle: &Puzzle, solution: &Grid) {
    let matrix = puzzle.matrix();
    let solved = matrix.solution_candidates().into_iter().collect::<HashSet<_>>();
    for row in 0..9 {
        for col in 0..9 {
            let digit = solution.get(row, col).unwrap();
            let name = format!("r{}c{}d{}", row, col, digit);
            let candidate = matrix.candidate_by_name(&name).unwrap();
            assert!(
                solved.contains(&candidate) || matrix.is_candidate_active(candidate),
                "{} was lost",
                name
            );
        }
    }
}

#[test]
fn readme() {
    let mut puzzle = Puzzle::from_str_line(README).unwrap();
    let expected = puzzle.solve_unique().unwrap().unwrap();
    let report = puzzle.solve_logically(&SolverConfig::default()).unwrap();
    assert_eq!(report.outcome, Outcome::Solved);
    assert_eq!(puzzle.grid(), expected);
    assert!(report
        .deductions
        .iter()
        .all(|deduction| !deduction.strategy().assumes_unique_solution()));
}

#[test]
fn canned_puzzles_have_one_solution() {
    for name in canned::NAMES {
        let rows = canned::by_name(name).unwrap();
        let mut puzzle = Puzzle::from_rows(&rows).unwrap();
        assert_eq!(puzzle.count_at_most(2).unwrap(), 1, "{}", name);
    }
}

// logic never blocks a canned puzzle and keeps its solution, whatever it finds
fn solve_every_canned_puzzle(config: &SolverConfig) {
    for name in canned::NAMES {
        let rows = canned::by_name(name).unwrap();
        let solution = solution_of(&rows);
        let mut puzzle = Puzzle::from_rows(&rows).unwrap();
        let report = puzzle.solve_logically(config).unwrap();
        assert_ne!(report.outcome, Outcome::Blocked, "{}", name);
        assert_sound(&puzzle, &solution);
        if report.outcome == Outcome::Solved {
            assert_eq!(puzzle.grid(), solution, "{}", name);
        }
    }
}

#[test]
fn canned_puzzles_never_block() {
    solve_every_canned_puzzle(&SolverConfig::default());
}

#[cfg(feature = "parallel")]
#[test]
fn canned_puzzles_never_block_in_parallel() {
    let config = SolverConfig {
        parallel: true,
        ..SolverConfig::default()
    };
    solve_every_canned_puzzle(&config);
}

#[test]
fn logic_agrees_with_search() {
    let solved = [
        canned::UNIQUE_RECT,
        canned::SWORDFISH_WITH_FIN,
        canned::SWORDFISH,
        canned::Y_WINGS,
    ];
    for rows in &solved {
        let solution = solution_of(rows);
        let mut puzzle = Puzzle::from_rows(rows).unwrap();
        let report = puzzle.solve_logically(&SolverConfig::default()).unwrap();
        assert_eq!(report.outcome, Outcome::Solved, "{:?}", rows);
        assert_eq!(puzzle.grid(), solution);
    }
}

#[test]
fn stuck_without_losing_the_solution() {
    let solution = solution_of(&canned::HIDDEN_UNIQUE_RECT);
    let mut puzzle = Puzzle::from_rows(&canned::HIDDEN_UNIQUE_RECT).unwrap();
    let report = puzzle.solve_logically(&SolverConfig::default()).unwrap();
    assert_eq!(report.outcome, Outcome::Stuck);
    assert!(!report.deductions.is_empty());
    assert_sound(&puzzle, &solution);

    // search still finishes the job from where logic stopped
    assert_eq!(puzzle.solve_one().unwrap(), Some(solution));
}

#[test]
fn unique_rectangle_after_eliminations() {
    let mut rows = canned::UNIQUE_RECT.to_vec();
    rows.push("r1c8d2 r2c0d9 r2c1d9 r2c8d2 r2c8d9 r8c1d3 r2c6d4 r2c8d4");
    let puzzle = Puzzle::from_rows(&rows).unwrap();
    let matrix = puzzle.matrix();

    let deduction = LogicalSolver::default().step(matrix).unwrap();
    assert_eq!(deduction.strategy(), Strategy::UniqueRectangle);
    let eliminated = deduction
        .eliminations()
        .map(|hit| matrix.candidate_name(matrix.candidate_of(hit)))
        .collect::<Vec<_>>();
    assert_eq!(eliminated, ["r3c0d2", "r3c0d9"]);
    assert!(deduction.description().starts_with("unique rectangle"));
}

#[test]
fn rewind_restores_the_puzzle() {
    let mut puzzle = Puzzle::from_rows(&canned::SWORDFISH).unwrap();
    let before = puzzle.matrix().active_candidates().collect::<Vec<_>>();
    let hints = puzzle.matrix().hints().len();

    let report = puzzle.solve_logically(&SolverConfig::default()).unwrap();
    assert!(puzzle.matrix().is_solved());
    let changes = report.rewind(puzzle.matrix_mut());
    assert_eq!(changes.len(), report.changes.len());
    assert!(changes.iter().any(|change| matches!(change, Change::Unsolved(_))));

    assert_eq!(puzzle.matrix().active_candidates().collect::<Vec<_>>(), before);
    assert!(puzzle.matrix().solution().is_empty());
    assert_eq!(puzzle.matrix().hints().len(), hints);
}

#[test]
fn without_uniqueness_strategies() {
    let config = SolverConfig {
        assume_unique: false,
        ..SolverConfig::default()
    };
    let solution = solution_of(&canned::UNIQUE_RECT);
    let mut puzzle = Puzzle::from_rows(&canned::UNIQUE_RECT).unwrap();
    let report = puzzle.solve_logically(&config).unwrap();
    assert_ne!(report.outcome, Outcome::Blocked);
    assert!(report
        .deductions
        .iter()
        .all(|deduction| !deduction.strategy().assumes_unique_solution()));
    assert_sound(&puzzle, &solution);
}

#[test]
fn parse_errors() {
    assert!(Puzzle::from_str_line("123").is_err());
    let mut rows = canned::SWORDFISH.to_vec();
    rows.push("r9c9d9");
    assert!(Puzzle::from_rows(&rows).is_err());
}

#[test]
fn grid_round_trip() {
    let mut puzzle = Puzzle::from_str_line(README).unwrap();
    let solution = puzzle.solve_one().unwrap().unwrap();
    let line = solution.to_str_line();
    assert_eq!(line.len(), 81);
    let reparsed = Puzzle::from_str_line(&line).unwrap();
    assert!(reparsed.matrix().is_solved());
    assert_eq!(reparsed.grid(), solution);
}
