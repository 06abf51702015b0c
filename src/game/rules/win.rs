//! Win detection.

use crate::game::{Board, Cell, Mark};
use tracing::instrument;

/// The eight winning lines as `(row, col)` triples.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Returns true if `mark` fills any row, column or diagonal.
#[instrument(skip(board))]
pub fn has_won(board: &Board, mark: Mark) -> bool {
    let target = Some(Cell::Occupied(mark));
    LINES
        .iter()
        .any(|line| line.iter().all(|&(row, col)| board.get(row, col) == target))
}

/// Returns the mark owning a complete line, if any.
#[instrument(skip(board))]
pub fn winning_mark(board: &Board) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|&mark| has_won(board, mark))
}
