//! # 8-Puzzle Solver Library
//!
//! This library provides the board model for the 3x3 sliding-tile puzzle and an A* search
//! that finds optimal solutions, guided by one of four heuristics.
//!
//! It is used by three binaries:
//! - `a_star`: Reads a board and a heuristic selector, then prints the search statistics
//!   (nodes expanded, peak node count, solution depth, effective branching factor) and the
//!   sequence of boards from the input to the goal.
//! - `random_board`: Scrambles a board with a seeded sequence of random legal slides, to
//!   produce test boards.
//! - `heuristic_evaluator`: Solves a batch of scrambled boards with every heuristic and
//!   compares the statistics.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), the blank's moves (`Direction`),
//!   scrambling and the solvability check.
//! - `heuristics`: The four remaining-cost estimates (`Heuristic`).
//! - `frontier`: The A* open list (`Frontier`) and closed list (`VisitedSet`).
//! - `solver`: The A* search (`AStar`, `solve`) and its results (`SearchOutcome`, `Solution`).
//! - `utils`: Parsing and formatting boards as text, and logging setup for the binaries.

pub mod engine;
pub mod frontier;
pub mod heuristics;
pub mod solver;
pub mod utils;
