//! Win condition checking
//!
//! A player wins with an unbroken run of `win_length` stones along a row,
//! column, or either diagonal. Longer runs also win; the reported line is the
//! first `win_length` cells found.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// A completed winning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinLine {
    pub winner: Stone,
    /// Exactly `win_length` positions, ordered from the run's first cell
    pub cells: Vec<Pos>,
}

/// Collect the `len` cells starting at `start` along `(dr, dc)` if they all
/// hold `start`'s stone. Returns `None` on an empty start, a mismatch, or
/// when the window runs off the board.
fn run_from(board: &Board, start: Pos, dr: i32, dc: i32, len: usize) -> Option<Vec<Pos>> {
    let stone = board.get(start);
    if stone == Stone::Empty {
        return None;
    }

    let mut line = Vec::with_capacity(len);
    line.push(start);
    for i in 1..len as i32 {
        let next = board.step(start, dr, dc, i)?;
        if board.get(next) != stone {
            return None;
        }
        line.push(next);
    }
    Some(line)
}

/// Find the first winning run.
///
/// Cells are scanned in row-major order and directions in `DIRECTIONS`
/// order; when several runs exist the first one found is returned.
pub fn check_win_condition(board: &Board, win_length: usize) -> Option<WinLine> {
    for start in board.positions() {
        for &(dr, dc) in &DIRECTIONS {
            if let Some(cells) = run_from(board, start, dr, dc, win_length) {
                return Some(WinLine {
                    winner: board.get(start),
                    cells,
                });
            }
        }
    }
    None
}

/// Check if any player has a winning run
#[inline]
pub fn has_winner(board: &Board, win_length: usize) -> bool {
    check_win_condition(board, win_length).is_some()
}
