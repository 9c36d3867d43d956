//! # nonosolver
//!
//! `nonosolver` is a command-line nonogram (picross) solver. It parses a
//! puzzle description, runs rule-based logical elimination over the rows
//! and columns, and falls back to backtracking search (bifurcation) when
//! pure logic stalls.
//!
//! ## Input formats
//!
//! Two textual dialects are supported. Both start with a `<width> <height>`
//! header and list one clue line per column/row; comment lines (`#`) and
//! blank lines are ignored:
//!
//! -   `.non` (native): column clue lines first, then row clue lines.
//! -   `.nin`: row clue lines first, then column clue lines.
//!
//! The dialect is picked from the file extension; `--nin` forces the NIN
//! dialect regardless.
//!
//! ## Usage
//!
//! ```sh
//! # solve a single puzzle
//! nonosolver puzzle.non
//!
//! # solve every .non/.nin puzzle under a directory
//! nonosolver puzzles/
//!
//! # logical elimination only; exits nonzero if the grid stays unfinished
//! nonosolver solve --path puzzle.non --no-bifurcation
//!
//! # write the solution as a BMP image as well
//! nonosolver solve --path puzzle.non --bmp out.bmp
//!
//! # shell completions
//! nonosolver completions bash
//! ```
//!
//! ### Common options
//!
//! -   `-d, --debug`: per-rule line traces at debug level.
//! -   `--nin`: treat the input as the NIN dialect.
//! -   `--no-bifurcation`: stop after logical elimination.
//! -   `--max-depth <N>`: limit nested guess levels during search.
//! -   `--bmp <PATH>`: also write the solution as a 24-bpp BMP.
//! -   `-s, --stats`: print solving statistics (default: `true`).

use clap::{Args, CommandFactory, Parser, Subcommand};
use nonogram_solver::puzzle::{Grid, PuzzleFormat, parse_file};
use nonogram_solver::solver::{SolveOptions, SolveStats, solve};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface of the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "nonosolver", version, about = "A rule-based nonogram solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as a puzzle file (or a directory of puzzles) to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file, or every `.non`/`.nin` puzzle in a directory.
    Solve {
        /// Path to the puzzle file or directory.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output, including a trace of every rule application
    /// that narrowed a line.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Treat the input as the NIN dialect (row clues first) regardless of
    /// the file extension.
    #[arg(long, default_value_t = false)]
    nin: bool,

    /// Stop after logical elimination; exit nonzero if that leaves the
    /// grid unfinished.
    #[arg(long, default_value_t = false)]
    no_bifurcation: bool,

    /// Limit on nested guess levels during search (unbounded by default).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Also write the solution to this path as a 24-bpp BMP image.
    #[arg(long)]
    bmp: Option<PathBuf>,

    /// Enable printing of solving statistics.
    #[arg(short, long, default_value_t = true)]
    stats: bool,
}

/// Main entry point: parses command-line arguments and dispatches.
fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "nonosolver",
                &mut std::io::stdout(),
            );
            ExitCode::SUCCESS
        }
        Some(Commands::Solve { path, common }) => run(&path, &common),
        None => cli.path.map_or_else(
            || {
                eprintln!("No puzzle provided. Use --help for more information.");
                ExitCode::FAILURE
            },
            |path| run(&path, &cli.common),
        ),
    }
}

fn run(path: &Path, common: &CommonOptions) -> ExitCode {
    init_tracing(common.debug);

    let ok = if path.is_dir() {
        solve_directory(path, common)
    } else {
        solve_puzzle(path, common, common.bmp.clone())
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Route log output through `tracing`; `RUST_LOG` overrides the level the
/// `--debug` flag picks.
fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Solve every `.non`/`.nin` puzzle under `path`.
///
/// Reports failure if any puzzle fails; the remaining puzzles are still
/// attempted. With `--bmp` each solution lands next to its puzzle file.
fn solve_directory(path: &Path, common: &CommonOptions) -> bool {
    let mut ok = true;

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path
            .extension()
            .is_none_or(|ext| ext != "non" && ext != "nin")
        {
            debug!(path = %file_path.display(), "skipping non-puzzle file");
            continue;
        }

        let bmp = common
            .bmp
            .is_some()
            .then(|| file_path.with_extension("bmp"));
        ok &= solve_puzzle(file_path, common, bmp);
    }

    ok
}

/// Parse one puzzle, solve it, and report the solution and statistics.
///
/// Returns whether the puzzle was parsed, solved, and rendered without
/// trouble.
fn solve_puzzle(path: &Path, common: &CommonOptions, bmp: Option<PathBuf>) -> bool {
    println!("Solving: {}", path.display());

    let format = if common.nin || path.extension().is_some_and(|ext| ext == "nin") {
        PuzzleFormat::Nin
    } else {
        PuzzleFormat::Native
    };

    let time = std::time::Instant::now();
    let mut grid = match parse_file(path, format) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error parsing puzzle file: {e}");
            return false;
        }
    };
    let parse_time = time.elapsed();

    let options = SolveOptions {
        bifurcation: !common.no_bifurcation,
        max_depth: common.max_depth,
    };

    let time = std::time::Instant::now();
    let report = match solve(&mut grid, &options) {
        Ok(report) => report,
        Err(contradiction) => {
            eprintln!("Puzzle is inconsistent: {contradiction}");
            return false;
        }
    };
    let elapsed = time.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    #[allow(clippy::cast_precision_loss)]
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    #[allow(clippy::cast_precision_loss)]
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &grid,
            &report.stats,
            allocated_mib,
            resident_mib,
            report.solution.is_some(),
        );
    }

    match report.solution {
        Some(solution) => {
            println!("{solution}");
            if let Some(bmp_path) = bmp {
                if let Err(e) = solution.write_bitmap(&bmp_path) {
                    eprintln!("Unable to write {}: {e}", bmp_path.display());
                    return false;
                }
                println!("Bitmap written to: {}", bmp_path.display());
            }
            true
        }
        None => {
            println!("No solution found");
            println!("{}", grid.solution());
            false
        }
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    #[allow(clippy::cast_precision_loss)]
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of puzzle and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    grid: &Grid,
    s: &SolveStats,
    allocated: f64,
    resident: f64,
    solved: bool,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Puzzle Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Width", grid.width());
    stat_line("Height", grid.height());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Sweeps", s.sweeps, elapsed_secs);
    stat_line_with_rate("Lines examined", s.lines_examined, elapsed_secs);
    stat_line_with_rate("Cells colored", s.cells_colored, elapsed_secs);
    stat_line_with_rate("Guesses", s.guesses, elapsed_secs);
    stat_line_with_rate("Pruned guesses", s.pruned_branches, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solved {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVED");
    }
}
