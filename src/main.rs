use clap::{ArgAction, Parser, ValueEnum};
use log::{trace, LevelFilter, Log, Metadata, Record};
use std::io::{self, Read};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::{fs, process};
use sudoku_dlx::changes::dispatch;
use sudoku_dlx::errors::{ParseError, SearchError, SolveError};
use sudoku_dlx::matrix::{CandidateId, Matrix};
use sudoku_dlx::search::{self, SearchStats};
use sudoku_dlx::sudoku::{canned, Placement, Puzzle};
use sudoku_dlx::{Listener, Outcome, SearchLimits, SolverConfig, Strategy};

/// Solve sudokus by logic or by dancing links
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Puzzle file: nine rows or one line of 81 cells, then candidates to eliminate.
    /// Reads stdin if missing.
    input: Option<PathBuf>,
    /// Use a built-in puzzle instead
    #[arg(long, conflicts_with = "input")]
    canned: Option<String>,
    /// List the built-in puzzles
    #[arg(long)]
    list: bool,
    #[arg(long, value_enum, default_value_t = Mode::Logic)]
    mode: Mode,
    /// Count solutions up to this limit instead of solving
    #[arg(long)]
    count: Option<usize>,
    /// Print search statistics
    #[arg(long)]
    profile: bool,
    /// Comma separated strategies to try, in order
    #[arg(long, value_delimiter = ',')]
    strategies: Option<Vec<Strategy>>,
    /// Skip strategies that only work for puzzles with a single solution
    #[arg(long)]
    no_unique: bool,
    /// Split strategy searches across threads
    #[arg(long)]
    parallel: bool,
    /// Deepest search level before giving up
    #[arg(long, default_value_t = SearchLimits::default().max_depth)]
    max_depth: usize,
    /// More output, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Human style strategies
    Logic,
    /// Backtracking exact cover search
    Search,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no canned puzzle named {0:?}, try --list")]
    UnknownCanned(String),
    #[error("failed to read puzzle: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

// traces every candidate change of the logical solve
struct ChangeLog<'a> {
    matrix: &'a Matrix<Placement>,
}

impl Listener for ChangeLog<'_> {
    fn candidate_added(&mut self, candidate: CandidateId) {
        trace!("+ {}", self.matrix.candidate_name(candidate));
    }

    fn candidate_removed(&mut self, candidate: CandidateId) {
        trace!("- {}", self.matrix.candidate_name(candidate));
    }

    fn candidate_solved(&mut self, candidate: CandidateId) {
        trace!("= {}", self.matrix.candidate_name(candidate));
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    if args.list {
        for name in canned::NAMES {
            println!("{}", name);
        }
        return Ok(());
    }
    let mut puzzle = read_puzzle(args)?;
    let limits = SearchLimits {
        max_depth: args.max_depth,
        ..SearchLimits::default()
    };

    if let Some(limit) = args.count {
        let mut stats = SearchStats::default();
        let mut count = 0;
        let limits = SearchLimits {
            max_solutions: Some(limit),
            ..limits
        };
        if limit > 0 {
            search::search(puzzle.matrix_mut(), &limits, &mut stats, |_| {
                count += 1;
                ControlFlow::Continue(())
            })?;
        }
        println!("{}", count);
        print_profile(args, &stats);
        return Ok(());
    }

    match args.mode {
        Mode::Logic => solve_logically(args, &mut puzzle),
        Mode::Search => solve_by_search(args, &mut puzzle, limits),
    }
}

fn read_puzzle(args: &Args) -> Result<Puzzle, CliError> {
    let text = match (&args.canned, &args.input) {
        (Some(name), _) => canned::by_name(name)
            .ok_or_else(|| CliError::UnknownCanned(name.clone()))?
            .join("\n"),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(Puzzle::parse(&text)?)
}

fn solve_logically(args: &Args, puzzle: &mut Puzzle) -> Result<(), CliError> {
    let config = SolverConfig {
        strategies: args
            .strategies
            .clone()
            .unwrap_or_else(|| Strategy::ALL.to_vec()),
        parallel: args.parallel,
        assume_unique: !args.no_unique,
    };
    let report = puzzle.solve_logically(&config)?;
    dispatch(
        &report.changes,
        &mut ChangeLog {
            matrix: puzzle.matrix(),
        },
    );
    for deduction in &report.deductions {
        println!("{}: {}", deduction.strategy(), deduction.description());
    }
    println!();
    println!("{}", puzzle.grid());
    println!();
    match report.outcome {
        Outcome::Solved => println!("solved"),
        Outcome::Blocked => println!("blocked"),
        Outcome::Stuck => println!(
            "stuck with {} candidates left",
            puzzle.matrix().active_candidate_count()
        ),
    }
    Ok(())
}

fn solve_by_search(args: &Args, puzzle: &mut Puzzle, limits: SearchLimits) -> Result<(), CliError> {
    let limits = SearchLimits {
        max_solutions: Some(2),
        ..limits
    };
    let mut stats = SearchStats::default();
    let mut solutions = vec![];
    search::search(puzzle.matrix_mut(), &limits, &mut stats, |matrix| {
        solutions.push(matrix.solution_candidates());
        ControlFlow::Continue(())
    })?;
    match solutions.first() {
        Some(solution) => {
            println!("{}", puzzle.grid_of(solution));
            if solutions.len() > 1 {
                println!();
                println!("solution is not unique");
            }
        }
        None => println!("no solution"),
    }
    print_profile(args, &stats);
    Ok(())
}

fn print_profile(args: &Args, stats: &SearchStats) {
    if args.profile {
        println!();
        print!("{}", stats);
    }
}
