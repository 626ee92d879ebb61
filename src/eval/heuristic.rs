//! Heuristic evaluation function for Gomoku board positions
//!
//! Slides every pattern of the table over every cell in each of the four
//! directions and sums the scores of full matches. Partial matches that run
//! off the board do not count.
//!
//! The result is absolute: positive values favor Max, negative values favor
//! Min. Because the table is mirrored, swapping the colors of every stone
//! negates the score.

use crate::board::{Board, Pos, DIRECTIONS};

use super::patterns::{Pattern, PatternTable};

/// Evaluate the board.
///
/// Returns a score where:
/// - Positive values indicate advantage for Max
/// - Negative values indicate advantage for Min
/// - Each completed run contributes `±PatternScore::FIVE`
#[must_use]
pub fn evaluate(board: &Board, table: &PatternTable) -> i32 {
    let mut score = 0;

    for start in board.positions() {
        for &(dr, dc) in &DIRECTIONS {
            for pattern in table.iter() {
                if matches_at(board, start, dr, dc, pattern) {
                    score += pattern.score;
                }
            }
        }
    }

    score
}

/// Check whether `pattern` lies on the board starting at `start` along `(dr, dc)`.
#[inline]
fn matches_at(board: &Board, start: Pos, dr: i32, dc: i32, pattern: &Pattern) -> bool {
    pattern.cells.iter().enumerate().all(|(i, &expected)| {
        board
            .step(start, dr, dc, i as i32)
            .is_some_and(|pos| board.get(pos) == expected)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;
    use crate::eval::PatternScore;

    fn table() -> PatternTable {
        PatternTable::new(5)
    }

    #[test]
    fn test_empty_board_is_zero() {
        let board = Board::new(9).unwrap();
        assert_eq!(evaluate(&board, &table()), 0);
    }

    #[test]
    fn test_single_center_stone() {
        let board = Board::new(9)
            .unwrap()
            .with_stone(Pos::new(4, 4), Stone::Max)
            .unwrap();
        // _X_ in all four directions
        assert_eq!(evaluate(&board, &table()), 4 * PatternScore::OPEN_ONE);
    }

    #[test]
    fn test_open_four_exceeds_baseline() {
        let single = Board::from_rows(&[
            ".........",
            ".........",
            ".........",
            ".........",
            "....X....",
            ".........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();
        let open_four = Board::from_rows(&[
            ".........",
            ".........",
            ".........",
            ".........",
            "..XXXX...",
            ".........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();

        let baseline = evaluate(&single, &table());
        let four = evaluate(&open_four, &table());
        assert!(
            four - baseline >= PatternScore::OPEN_FOUR,
            "open four {four} should exceed single stone {baseline} by at least {}",
            PatternScore::OPEN_FOUR
        );
    }

    #[test]
    fn test_five_dominates() {
        let board = Board::from_rows(&[
            "OOOO.....",
            ".........",
            ".........",
            ".........",
            "..XXXXX..",
            ".........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();
        let score = evaluate(&board, &table());
        assert!(score >= PatternScore::FIVE - PatternScore::CLOSED_FOUR, "got {score}");
    }

    #[test]
    fn test_color_swap_negates() {
        let board = Board::from_rows(&[
            ".........",
            "..X......",
            "..XO.....",
            "..XOO....",
            "...O.X...",
            ".........",
            "......O..",
            ".........",
            "X........",
        ])
        .unwrap();
        let score = evaluate(&board, &table());
        assert_ne!(score, 0);
        assert_eq!(evaluate(&board.swap_colors(), &table()), -score);
    }

    #[test]
    fn test_blocked_three_scores_less_than_open_three() {
        let open = Board::from_rows(&[
            ".........",
            ".........",
            ".........",
            ".........",
            "...XXX...",
            ".........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();
        let blocked = Board::from_rows(&[
            ".........",
            ".........",
            ".........",
            ".........",
            "..OXXX...",
            ".........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();
        assert!(evaluate(&open, &table()) > evaluate(&blocked, &table()));
    }
}
