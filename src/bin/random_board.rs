use anyhow::{Context, Result};
use clap::Parser;
use eight_puzzle_solver::utils::{board_from_str, board_to_spaced_rows, init_tracing};
use std::io::{self, Read};
use tracing::debug;

/// Reads a board from stdin, applies a seeded sequence of random legal slides and prints the
/// resulting board in the same format.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Seed for the random number generator
    seed: u64,

    /// Number of random moves to make
    moves: usize,

    /// Log level used when RUST_LOG is not set
    #[clap(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read board from stdin")?;
    let board = board_from_str(&content).context("Invalid board format")?;

    let scrambled = board.scramble_with_seed(args.seed, args.moves);
    debug!(seed = args.seed, moves = args.moves, "scrambled board\n{}", scrambled);

    print!("{}", board_to_spaced_rows(&scrambled));
    Ok(())
}
