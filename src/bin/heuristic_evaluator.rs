use anyhow::Result;
use clap::Parser;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::heuristics::Heuristic;
use eight_puzzle_solver::solver::{solve, SearchOutcome};
use eight_puzzle_solver::utils::init_tracing;
use std::collections::HashMap;
use tracing::{info, warn};

const DEFAULT_BOARDS: usize = 20;
const DEFAULT_MOVES: usize = 40;
const START_SEED: u64 = 0;

/// Solves a batch of scrambled boards with every heuristic and compares the statistics.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of boards to evaluate
    #[clap(long, default_value_t = DEFAULT_BOARDS)]
    boards: usize,

    /// Random moves applied to the goal to make each board
    #[clap(long, default_value_t = DEFAULT_MOVES)]
    moves: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = START_SEED)]
    seed: u64,

    /// Log level used when RUST_LOG is not set
    #[clap(long, default_value = "warn")]
    log_level: String,
}

#[derive(Default)]
struct Totals {
    solved: usize,
    expanded: usize,
    peak_nodes: usize,
    depth: usize,
    branching: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut totals: HashMap<Heuristic, Totals> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} boards ({} random moves each)...",
        args.boards, args.moves
    );

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let initial_board = Board::goal().scramble_with_seed(current_seed, args.moves);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);
        print!("{}", initial_board);

        for heuristic in Heuristic::ALL {
            match solve(&initial_board, heuristic) {
                SearchOutcome::Solved(solution) => {
                    println!(
                        "  Heuristic: {:<20} V: {:<8} N: {:<8} d: {}",
                        heuristic.to_string(),
                        solution.expanded,
                        solution.peak_nodes,
                        solution.depth()
                    );
                    let entry = totals.entry(heuristic).or_default();
                    entry.solved += 1;
                    entry.expanded += solution.expanded;
                    entry.peak_nodes += solution.peak_nodes;
                    entry.depth += solution.depth();
                    entry.branching += solution.branching_factor();
                }
                SearchOutcome::Exhausted { expanded } => {
                    warn!(
                        %heuristic,
                        board_idx,
                        seed = current_seed,
                        expanded,
                        "scrambled board had no solution"
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages ---");

    for heuristic in Heuristic::ALL {
        let Some(t) = totals.get(&heuristic).filter(|t| t.solved > 0) else {
            println!("Heuristic {}: No solutions recorded.", heuristic);
            continue;
        };
        let n = t.solved as f64;
        println!(
            "Heuristic {:<20}: V = {:.1}, N = {:.1}, d = {:.2}, b = {:.3}",
            heuristic.to_string(),
            t.expanded as f64 / n,
            t.peak_nodes as f64 / n,
            t.depth as f64 / n,
            t.branching / n
        );
    }

    info!("evaluation finished");
    Ok(())
}
