//! Draw detection
//!
//! A window is any `win_length` consecutive on-board cells along one of the
//! four directions. A window still holding stones of at most one player can
//! become a winning run; once none are left the game is drawn.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Check whether the window starting at `start` can still become a run.
///
/// Windows that would leave the board are not windows and report `false`.
fn is_playable_window(board: &Board, start: Pos, dr: i32, dc: i32, len: usize) -> bool {
    let mut has_max = false;
    let mut has_min = false;

    for i in 0..len as i32 {
        let Some(pos) = board.step(start, dr, dc, i) else {
            return false;
        };
        match board.get(pos) {
            Stone::Max => has_max = true,
            Stone::Min => has_min = true,
            Stone::Empty => {}
        }
    }

    !(has_max && has_min)
}

/// Check for a draw.
///
/// Returns true when every full-length window already holds stones of both
/// players, which includes a full board without a winner. Call this only
/// after `check_win_condition` found no winner: a completed run is itself a
/// single-player window.
pub fn check_draw(board: &Board, win_length: usize) -> bool {
    for start in board.positions() {
        for &(dr, dc) in &DIRECTIONS {
            if is_playable_window(board, start, dr, dc, win_length) {
                return false;
            }
        }
    }
    true
}
