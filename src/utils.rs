use crate::engine::{Board, BoardError, BOARD_SIZE};
use thiserror::Error;

/// Errors from reading a board out of text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} tiles (expected {expected})")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid tile '{token}' in row {row} col {col}")]
    InvalidToken {
        token: String,
        row: usize,
        col: usize,
    },

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}

/// Parses rows of whitespace-separated tiles into a `Board`.
///
/// Each string slice is one row, starting from the top. There must be exactly `BOARD_SIZE`
/// rows of `BOARD_SIZE` integers, and together they must hold each of `0..=8` once.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["1 2 5", "3 4 0", "6 7 8"]).unwrap();
/// assert_eq!(board.blank(), (1, 2));
/// assert_eq!(board.tile(0, 2), 5);
///
/// assert!(board_from_str_array(&["1 2 5", "3 4 0"]).is_err());
/// assert!(board_from_str_array(&["1 2 x", "3 4 0", "6 7 8"]).is_err());
/// ```
pub fn board_from_str_array(rows: &[&str]) -> Result<Board, ParseBoardError> {
    if rows.len() != BOARD_SIZE {
        return Err(ParseBoardError::RowCount {
            expected: BOARD_SIZE,
            found: rows.len(),
        });
    }

    let mut grid = [[0u8; BOARD_SIZE]; BOARD_SIZE];
    for (r, line) in rows.iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != BOARD_SIZE {
            return Err(ParseBoardError::ColumnCount {
                row: r,
                expected: BOARD_SIZE,
                found: tokens.len(),
            });
        }
        for (c, token) in tokens.into_iter().enumerate() {
            grid[r][c] = token
                .parse::<u8>()
                .map_err(|_| ParseBoardError::InvalidToken {
                    token: token.to_string(),
                    row: r,
                    col: c,
                })?;
        }
    }

    Ok(Board::from_grid(grid)?)
}

/// Parses a board from text such as the contents of a board file or stdin.
///
/// Blank lines and surrounding whitespace are ignored.
pub fn board_from_str(text: &str) -> Result<Board, ParseBoardError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    board_from_str_array(&rows)
}

/// Formats a board as rows of tiles, each tile followed by a space.
///
/// This is the format the board scrambler writes, and `board_from_str` reads it back.
pub fn board_to_spaced_rows(board: &Board) -> String {
    let mut output = String::new();
    for row in board.grid() {
        for tile in row {
            output.push_str(&format!("{} ", tile));
        }
        output.push('\n');
    }
    output
}

/// Installs a `tracing` subscriber that writes to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` (e.g. `"warn"`, `"debug"`) is used.
/// Calling this more than once is harmless.
pub fn init_tracing(default_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["0 1 2", "3 4 5", "6 7 8"]).unwrap();
        assert!(board.is_goal());
    }

    #[test]
    fn test_board_from_str_array_extra_whitespace() {
        let board = board_from_str_array(&["  1\t2   5 ", "3 4 0", "6 7  8"]).unwrap();
        assert_eq!(board.identity(), [[1, 2, 5], [3, 4, 0], [6, 7, 8]]);
    }

    #[test]
    fn test_board_from_str_array_wrong_row_count() {
        let result = board_from_str_array(&["0 1 2", "3 4 5"]);
        assert_eq!(
            result,
            Err(ParseBoardError::RowCount {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_board_from_str_array_wrong_column_count() {
        let result = board_from_str_array(&["0 1 2", "3 4 5 9", "6 7 8"]);
        assert_eq!(
            result,
            Err(ParseBoardError::ColumnCount {
                row: 1,
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn test_board_from_str_array_invalid_token() {
        let result = board_from_str_array(&["0 1 2", "3 -4 5", "6 7 8"]);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("invalid tile '-4' in row 1 col 1"));
    }

    #[test]
    fn test_board_from_str_array_not_a_permutation() {
        let result = board_from_str_array(&["0 1 2", "3 4 5", "6 7 7"]);
        assert_eq!(
            result,
            Err(ParseBoardError::Board(BoardError::DuplicateTile { value: 7 }))
        );
    }

    #[test]
    fn test_board_from_str_skips_blank_lines() {
        let text = "\n1 2 5\n\n3 4 0\n6 7 8\n\n";
        let board = board_from_str(text).unwrap();
        assert_eq!(board.blank(), (1, 2));
    }

    #[test]
    fn test_spaced_rows_round_trip() {
        let board = Board::goal().scramble_with_seed(99, 20);
        let text = board_to_spaced_rows(&board);
        assert_eq!(text.lines().count(), BOARD_SIZE);
        assert!(text.lines().all(|line| line.ends_with(' ')));
        assert_eq!(board_from_str(&text), Ok(board));
    }

    #[test]
    fn test_spaced_rows_format() {
        assert_eq!(board_to_spaced_rows(&Board::goal()), "0 1 2 \n3 4 5 \n6 7 8 \n");
    }
}
