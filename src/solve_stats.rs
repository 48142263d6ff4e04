//! Solves a batch of seeded scrambles and writes one CSV row per solve,
//! for comparing algorithms and tuning the solver's settings.

use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use cube_solver::{generate_scramble, Algorithm, Config, CubeError, CubeSolver, CubeState};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "solve-stats")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cube size, 2 through 7
    #[arg(short, long, default_value_t = 3)]
    size: usize,

    /// Number of scrambles to solve
    #[arg(short, long, default_value_t = 100)]
    count: usize,

    /// Moves per scramble; defaults to the configured length
    #[arg(short = 'l', long)]
    scramble_length: Option<usize>,

    /// advanced (or kociemba), beginner or reduction
    #[arg(short, long, default_value = "advanced")]
    algorithm: String,

    /// Seed of the first scramble; scramble i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSON file with solver and scramble settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the CSV; standard output when absent
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Record {
    seed: u64,
    size: usize,
    algorithm: String,
    scramble: String,
    solved: bool,
    moves: usize,
    unoptimized_moves: usize,
    move_ceiling: usize,
    elapsed_ms: f64,
    failed_stage: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_json(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let algorithm: Algorithm = cli.algorithm.parse()?;
    let length = cli.scramble_length.unwrap_or(config.scramble.default_length);
    let solver = CubeSolver::new(config.solver);
    let solved = CubeState::solved(cli.size)?;

    let writer: Box<dyn io::Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut failures = 0;
    for i in 0..cli.count {
        let seed = cli.seed + i as u64;
        let scramble = generate_scramble(length, &mut ChaCha8Rng::seed_from_u64(seed));
        let state = solved.apply_sequence(&scramble);

        let record = match solver.solve(&state, algorithm) {
            Ok(solution) => Record {
                seed,
                size: cli.size,
                algorithm: solution.algorithm.to_string(),
                scramble: scramble.to_string(),
                solved: state.apply_sequence(&solution.moves).is_solved(),
                moves: solution.moves.len(),
                unoptimized_moves: solution.unoptimized_length,
                move_ceiling: solution.move_ceiling,
                elapsed_ms: solution.elapsed.as_secs_f64() * 1000.0,
                failed_stage: String::new(),
            },
            Err(CubeError::SolveFailed { stage, partial }) => {
                warn!("seed {}: failed at {}", seed, stage);
                failures += 1;
                Record {
                    seed,
                    size: cli.size,
                    algorithm: algorithm.to_string(),
                    scramble: scramble.to_string(),
                    solved: false,
                    moves: partial.len(),
                    unoptimized_moves: partial.len(),
                    move_ceiling: 0,
                    elapsed_ms: 0.0,
                    failed_stage: stage,
                }
            }
            Err(err) => return Err(err.into()),
        };
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    info!("{} solves, {} failed", cli.count, failures);
    Ok(())
}
