use anyhow::{Context, Result};
use clap::Parser;
use eight_puzzle_solver::heuristics::Heuristic;
use eight_puzzle_solver::solver::{solve, SearchOutcome};
use eight_puzzle_solver::utils::{board_from_str, init_tracing};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve an 8-puzzle board optimally with A* search", long_about = None)]
struct Args {
    /// Heuristic: 0 = none, 1 = misplaced tiles, 2 = Manhattan distance,
    /// 3 = Manhattan distance plus misplaced tiles not next to the blank
    #[clap(value_parser = clap::value_parser!(u8).range(0..=3))]
    h_choice: u8,

    /// Path to the board file (3 lines of 3 tiles); read from stdin when omitted
    #[clap(short, long)]
    board: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[clap(long, default_value = "warn")]
    log_level: String,
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read board file {}", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read board from stdin")?;
            Ok(content)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let heuristic = Heuristic::try_from(args.h_choice)?;
    let content = read_input(args.board.as_ref())?;
    let board = board_from_str(&content).context("Invalid board format")?;
    info!(%heuristic, solvable = board.is_solvable(), "loaded board\n{}", board);

    match solve(&board, heuristic) {
        SearchOutcome::Solved(solution) => {
            println!("V={}", solution.expanded);
            println!("N={}", solution.peak_nodes);
            println!("d={}", solution.depth());
            if solution.depth() == 0 {
                println!("b=0");
            } else {
                println!("b={:?}", solution.branching_factor());
            }
            println!();
            for step in &solution.path {
                println!("{}", step);
            }
        }
        SearchOutcome::Exhausted { expanded } => {
            info!(expanded, "no path to the goal");
            println!("Invalid board");
        }
    }

    Ok(())
}
