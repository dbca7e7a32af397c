use crate::engine::{Board, BLANK, BOARD_SIZE};
use std::fmt;
use thiserror::Error;

/// Returned when a heuristic selector is not one of `0..=3`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unknown heuristic selector {0} (expected 0, 1, 2 or 3)")]
pub struct InvalidHeuristic(pub u8);

/// The estimate of remaining moves used to order the A* frontier.
///
/// Each variant is identified by the integer selector accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Always 0. A* degrades to uniform-cost search.
    Null = 0,
    /// Number of non-blank tiles outside their goal cell.
    MisplacedTiles = 1,
    /// Sum of the city-block distances of the non-blank tiles from their goal cells.
    Manhattan = 2,
    /// Manhattan distance plus one for each misplaced tile that is not next to the blank.
    /// Not admissible.
    ManhattanBlankPenalty = 3,
}

impl Heuristic {
    /// All heuristics, in selector order.
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Null,
        Heuristic::MisplacedTiles,
        Heuristic::Manhattan,
        Heuristic::ManhattanBlankPenalty,
    ];

    /// The integer selector for this heuristic.
    pub fn selector(self) -> u8 {
        self as u8
    }

    /// A short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Null => "null",
            Heuristic::MisplacedTiles => "misplaced",
            Heuristic::Manhattan => "manhattan",
            Heuristic::ManhattanBlankPenalty => "manhattan+blank",
        }
    }

    /// True if the estimate never exceeds the true remaining distance, so A* returns an
    /// optimal path.
    pub fn is_admissible(self) -> bool {
        !matches!(self, Heuristic::ManhattanBlankPenalty)
    }

    /// Estimates the number of moves from `board` to the goal.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// use eight_puzzle_solver::heuristics::Heuristic;
    ///
    /// let board = Board::from_grid([[1, 2, 5], [3, 4, 0], [6, 7, 8]]).unwrap();
    /// assert_eq!(Heuristic::Null.evaluate(&board), 0);
    /// assert_eq!(Heuristic::MisplacedTiles.evaluate(&board), 3);
    /// assert_eq!(Heuristic::Manhattan.evaluate(&board), 3);
    /// assert_eq!(Heuristic::ManhattanBlankPenalty.evaluate(&board), 5);
    /// ```
    pub fn evaluate(self, board: &Board) -> u32 {
        match self {
            Heuristic::Null => 0,
            Heuristic::MisplacedTiles => misplaced_tiles(board),
            Heuristic::Manhattan => manhattan_distance(board),
            Heuristic::ManhattanBlankPenalty => manhattan_with_blank_penalty(board),
        }
    }
}

impl TryFrom<u8> for Heuristic {
    type Error = InvalidHeuristic;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.selector() == selector)
            .ok_or(InvalidHeuristic(selector))
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.selector(), self.name())
    }
}

/// Goal cell of a tile: value `v` belongs at row `v / 3`, col `v % 3`.
fn goal_position(value: u8) -> (usize, usize) {
    let index = value as usize;
    (index / BOARD_SIZE, index % BOARD_SIZE)
}

fn city_block(a: (usize, usize), b: (usize, usize)) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

/// Counts the non-blank tiles that are not in their goal cell.
///
/// The blank is never counted, so this never exceeds the number of moves left.
pub fn misplaced_tiles(board: &Board) -> u32 {
    board
        .cells()
        .filter(|&(row, col, value)| value != BLANK && goal_position(value) != (row, col))
        .count() as u32
}

/// Sums, over the non-blank tiles, the city-block distance from each tile's cell to its
/// goal cell. Tiles already in place contribute 0.
pub fn manhattan_distance(board: &Board) -> u32 {
    board
        .cells()
        .filter(|&(_, _, value)| value != BLANK)
        .map(|(row, col, value)| city_block((row, col), goal_position(value)))
        .sum()
}

/// Manhattan distance plus a penalty of one for every misplaced tile whose city-block
/// distance to the current blank is greater than 1.
///
/// The distance is accumulated tile by tile alongside the penalty; its total is the same
/// as `manhattan_distance`.
pub fn manhattan_with_blank_penalty(board: &Board) -> u32 {
    let blank = board.blank();
    let mut distance = 0;
    let mut penalty = 0;

    for (row, col, value) in board.cells() {
        if value == BLANK {
            continue;
        }
        let goal = goal_position(value);
        if goal == (row, col) {
            continue;
        }
        distance += city_block((row, col), goal);
        if city_block((row, col), blank) > 1 {
            penalty += 1;
        }
    }

    distance + penalty
}
