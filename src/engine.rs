//! Board representation for the 8-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Direction`: The four ways the blank can slide.
//! - `Board`: A 3x3 grid of tiles `0..=8` (0 is the blank) with the blank's position cached.
//!   Boards are small `Copy` values; every move produces a new board and never mutates the
//!   receiver.
//! - Seeded scrambling used to generate test boards, and the permutation parity check that
//!   tells whether a board can reach the goal at all.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use thiserror::Error;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells (and distinct tile labels) on the board.
pub const TILE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The label used for the blank cell.
pub const BLANK: u8 = 0;

/// The solved configuration: the blank in the top-left corner, then tiles in row-major order.
pub const GOAL_GRID: BoardKey = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];

/// Exact-equality key of a board: its grid contents.
pub type BoardKey = [[u8; BOARD_SIZE]; BOARD_SIZE];

/// Errors raised when a grid is not a permutation of `0..=8`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("tile {value} at row {row} col {col} is outside 0..=8")]
    TileOutOfRange { value: u8, row: usize, col: usize },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u8 },
}

/// Direction in which the blank moves.
///
/// Moving the blank `Up` slides the tile above it down into the blank's cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order successors are generated.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the direction that undoes this one.
    ///
    /// ```
    /// use eight_puzzle_solver::engine::Direction;
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Row and column delta applied to the blank.
    fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// A 3x3 sliding-tile board.
///
/// The grid is always a permutation of `0..=8` and `blank` always points at the cell holding
/// `0`. Equality and hashing follow the grid (the blank position is derived from it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: BoardKey,
    blank: (usize, usize),
}

impl Board {
    /// Returns the solved board.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, GOAL_GRID};
    /// let goal = Board::goal();
    /// assert!(goal.is_goal());
    /// assert_eq!(goal.identity(), GOAL_GRID);
    /// assert_eq!(goal.blank(), (0, 0));
    /// ```
    pub fn goal() -> Self {
        Board {
            grid: GOAL_GRID,
            blank: (0, 0),
        }
    }

    /// Creates a board from a grid, locating the blank.
    ///
    /// # Returns
    /// * `Ok(Board)` if the grid holds each of `0..=8` exactly once.
    /// * `Err(BoardError)` if a value is larger than 8 or appears twice. Nine in-range values
    ///   with no duplicates are necessarily a permutation, so no other check is needed.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// let board = Board::from_grid([[1, 2, 5], [3, 4, 0], [6, 7, 8]]).unwrap();
    /// assert_eq!(board.blank(), (1, 2));
    ///
    /// assert!(Board::from_grid([[1, 1, 5], [3, 4, 0], [6, 7, 8]]).is_err());
    /// assert!(Board::from_grid([[9, 2, 5], [3, 4, 0], [6, 7, 8]]).is_err());
    /// ```
    pub fn from_grid(grid: BoardKey) -> Result<Self, BoardError> {
        let mut seen = [false; TILE_COUNT];
        let mut blank = (0, 0);

        for (row, cells) in grid.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                let index = value as usize;
                if index >= TILE_COUNT {
                    return Err(BoardError::TileOutOfRange { value, row, col });
                }
                if seen[index] {
                    return Err(BoardError::DuplicateTile { value });
                }
                seen[index] = true;
                if value == BLANK {
                    blank = (row, col);
                }
            }
        }

        Ok(Board { grid, blank })
    }

    /// Returns the tile at `row`, `col`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below `BOARD_SIZE`.
    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self.grid[row][col]
    }

    /// Returns the underlying grid.
    pub fn grid(&self) -> &BoardKey {
        &self.grid
    }

    /// Returns the blank's `(row, col)`.
    pub fn blank(&self) -> (usize, usize) {
        self.blank
    }

    /// Returns the key used to identify this configuration in sets and maps.
    pub fn identity(&self) -> BoardKey {
        self.grid
    }

    /// True iff the board is the solved configuration.
    pub fn is_goal(&self) -> bool {
        self.grid == GOAL_GRID
    }

    /// Iterates over every cell as `(row, col, tile)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.grid.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &value)| (row, col, value))
        })
    }

    /// Returns the board reached by moving the blank one cell in `direction`.
    ///
    /// The tile next to the blank in that direction slides into the blank's cell. Returns
    /// `None` when the blank sits on the edge in that direction (row 0 blocks `Up`, row 2
    /// blocks `Down`, col 0 blocks `Left`, col 2 blocks `Right`).
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, Direction};
    /// let goal = Board::goal();
    /// assert!(goal.successor(Direction::Up).is_none());
    ///
    /// let down = goal.successor(Direction::Down).unwrap();
    /// assert_eq!(down.tile(0, 0), 3);
    /// assert_eq!(down.blank(), (1, 0));
    /// ```
    pub fn successor(&self, direction: Direction) -> Option<Board> {
        let (row, col) = self.blank;
        let (d_row, d_col) = direction.offset();

        let next_row = row.checked_add_signed(d_row)?;
        let next_col = col.checked_add_signed(d_col)?;
        if next_row >= BOARD_SIZE || next_col >= BOARD_SIZE {
            return None;
        }

        let mut next = *self;
        next.grid[row][col] = next.grid[next_row][next_col];
        next.grid[next_row][next_col] = BLANK;
        next.blank = (next_row, next_col);
        Some(next)
    }

    /// Iterates over the legal successors, in `Direction::ALL` order.
    pub fn successors(&self) -> impl Iterator<Item = (Direction, Board)> {
        let board = *self;
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| board.successor(direction).map(|next| (direction, next)))
    }

    /// Counts pairs of non-blank tiles that appear in the wrong relative order (row-major).
    fn count_inversions(&self) -> usize {
        let tiles: Vec<u8> = self
            .cells()
            .map(|(_, _, value)| value)
            .filter(|&value| value != BLANK)
            .collect();

        tiles
            .iter()
            .enumerate()
            .map(|(i, &value)| tiles[i + 1..].iter().filter(|&&next| next < value).count())
            .sum()
    }

    /// Checks whether the goal is reachable from this board.
    ///
    /// On a 3x3 board every slide preserves the parity of the inversion count over the
    /// non-blank tiles, and the goal has zero inversions, so exactly the boards with an even
    /// count are solvable.
    ///
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// assert!(Board::goal().is_solvable());
    /// let swapped = Board::from_grid([[0, 2, 1], [3, 4, 5], [6, 7, 8]]).unwrap();
    /// assert!(!swapped.is_solvable());
    /// ```
    pub fn is_solvable(&self) -> bool {
        self.count_inversions() % 2 == 0
    }

    /// Applies `moves` random legal slides to a copy of this board.
    ///
    /// Each slide draws one of the four directions uniformly and redraws while the choice would
    /// move the blank off the grid. A slide may undo the previous one.
    pub fn scramble<R: Rng + ?Sized>(&self, rng: &mut R, moves: usize) -> Board {
        let mut board = *self;
        for _ in 0..moves {
            loop {
                let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
                if let Some(next) = board.successor(direction) {
                    board = next;
                    break;
                }
            }
        }
        board
    }

    /// Scrambles a copy of this board with a `SmallRng` seeded from `seed`.
    ///
    /// The same seed, board and move count always give the same result.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// let a = Board::goal().scramble_with_seed(7, 30);
    /// let b = Board::goal().scramble_with_seed(7, 30);
    /// assert_eq!(a, b);
    /// assert!(a.is_solvable());
    /// ```
    pub fn scramble_with_seed(&self, seed: u64, moves: usize) -> Board {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.scramble(&mut rng, moves)
    }
}

impl fmt::Display for Board {
    /// Three lines of space-separated tiles, each terminated by a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            writeln!(f, "{} {} {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
