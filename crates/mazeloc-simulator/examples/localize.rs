//! Example localizing a robot in a maze file.
//!
//! This example shows how to:
//! - Load a maze in the text format, with an optional `\robot x y` directive
//! - Simulate a noisy sensor run and filter it with `SequentialFilter`
//! - Track a sensorless robot's belief set through a move sequence
//!
//! # Usage
//!
//! Filter a simulated run of 5 steps from the maze's robot:
//!
//! ```sh
//! cargo run --example localize -- mazes/maze1.maz
//! ```
//!
//! Control the run length, sensor accuracy, and randomness:
//!
//! ```sh
//! cargo run --example localize -- mazes/maze1.maz --steps 10 --accuracy 0.95 \
//!     --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
//! ```
//!
//! Follow a blind move sequence instead (N, S, E, W; case-insensitive):
//!
//! ```sh
//! cargo run --example localize -- mazes/maze2.maz --mode sensorless --moves WWWSSS
//! ```
//!
//! Set `RUST_LOG=debug` to see sensor mistakes as they happen.

use std::{error::Error, fs, path::PathBuf, process};

use clap::{Parser, ValueEnum};
use mazeloc_core::{Cell, Direction, GridOracle as _, Maze};
use mazeloc_filter::{FilterConfig, Normalization, SequentialFilter};
use mazeloc_sensorless::{SearchProblem as _, SensorlessProblem};
use mazeloc_simulator::{SensorSimulator, SimulationSeed};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Filter,
    Sensorless,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NormalizationKind {
    Euclidean,
    Probability,
}

impl From<NormalizationKind> for Normalization {
    fn from(kind: NormalizationKind) -> Self {
        match kind {
            NormalizationKind::Euclidean => Self::Euclidean,
            NormalizationKind::Probability => Self::Probability,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Maze file to load.
    #[arg(value_name = "MAZE")]
    maze: PathBuf,

    /// Localization strategy to run.
    #[arg(long, value_name = "MODE", default_value = "filter")]
    mode: Mode,

    /// Number of simulated sensor readings.
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    steps: usize,

    /// Probability that the sensor reports the true color.
    #[arg(long, value_name = "P", default_value_t = 0.88)]
    accuracy: f64,

    /// Seed for the simulated run (64 hex digits). Random if omitted.
    #[arg(long, value_name = "HEX")]
    seed: Option<SimulationSeed>,

    /// How beliefs are rescaled after each reading.
    #[arg(long, value_name = "KIND", default_value = "euclidean")]
    normalization: NormalizationKind,

    /// Moves for sensorless mode, one of N, S, E, W per character.
    #[arg(long, value_name = "MOVES", default_value = "")]
    moves: String,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.maze)?;
    let maze: Maze = text.parse()?;

    println!("Maze (robot labeled as 1):");
    println!("{maze}");

    match args.mode {
        Mode::Filter => run_filter(&maze, args),
        Mode::Sensorless => run_sensorless(&maze, &args.moves),
    }
}

fn run_filter(maze: &Maze, args: &Args) -> Result<(), Box<dyn Error>> {
    let start = maze
        .robots()
        .first()
        .copied()
        .or_else(|| maze.floor_cells().first().copied())
        .ok_or("maze has no floor cells")?;

    let simulator = SensorSimulator::new(maze, args.accuracy)?;
    let seed = args.seed.unwrap_or_else(SimulationSeed::random);
    let trajectory = simulator.simulate_with_seed(start, args.steps, seed)?;

    let config = FilterConfig::new(args.accuracy).with_normalization(args.normalization.into());
    let filter = SequentialFilter::new(maze, config)?;
    let trace = filter.filter(&trajectory.readings);

    println!("Seed:");
    println!("  {}", trajectory.seed);
    println!();
    print!("{trajectory}");
    println!();
    print!("{}", filter.render(&trace));

    let actual = trajectory.path.last().copied();
    match (filter.most_likely(trace.last()), actual) {
        (Some((guess, weight)), Some(actual)) => {
            let verdict = if guess == actual { "correct" } else { "wrong" };
            println!("Most likely: {guess} ({weight:.5}); actual: {actual} [{verdict}]");
        }
        (None, _) if trace.has_diverged() => {
            println!("Filter diverged at t = {:?}", trace.diverged());
        }
        _ => {}
    }
    Ok(())
}

fn run_sensorless(maze: &Maze, moves: &str) -> Result<(), Box<dyn Error>> {
    let moves = moves
        .chars()
        .map(|c| Direction::from_char(c).ok_or_else(|| format!("invalid move {c:?}")))
        .collect::<Result<Vec<_>, _>>()?;

    let problem = SensorlessProblem::new(maze);
    let mut state = problem.start_state();
    print_belief(maze, "start", &state.to_vec());

    for direction in moves {
        let advance = problem.advance(&state, direction);
        print_belief(
            maze,
            &format!(
                "{direction} (moved {}, bumped {}, merged {})",
                advance.moved, advance.bumped, advance.merged
            ),
            &advance.state.to_vec(),
        );
        state = advance.state;
    }

    match state.as_single() {
        Some(cell) => println!("Localized at {cell}"),
        None => println!(
            "{} candidates remain (heuristic {})",
            state.len(),
            problem.heuristic(&state)
        ),
    }
    Ok(())
}

fn print_belief(maze: &Maze, label: &str, cells: &[Cell]) {
    println!("{label}: {} candidates", cells.len());
    println!("{}", maze.render_marked(cells, '*'));
}
