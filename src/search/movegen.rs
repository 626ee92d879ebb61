//! Candidate move generation
//!
//! Only cells close to existing stones are worth considering. On an empty
//! board every cell is a candidate so the first move can go anywhere.

use std::cmp::Reverse;

use crate::board::{Board, Pos, Stone, MAX_BOARD_SIZE};

use super::Searcher;

/// Empty cells within Chebyshev distance `radius` of any stone, in row-major
/// order. Every cell when the board is empty; nothing when it is full.
pub fn candidate_cells(board: &Board, radius: usize) -> Vec<Pos> {
    if board.is_board_empty() {
        return board.positions().collect();
    }

    // No neighbourhood reaches further than the far edge
    let radius = radius.min(board.size() - 1) as i32;
    let mut near = [[false; MAX_BOARD_SIZE]; MAX_BOARD_SIZE];

    for pos in board.stones(Stone::Max).chain(board.stones(Stone::Min)) {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if let Some(p) = board.step(pos, dr, dc, 1) {
                    near[p.row as usize][p.col as usize] = true;
                }
            }
        }
    }

    board
        .positions()
        .filter(|p| near[p.row as usize][p.col as usize] && board.is_empty(*p))
        .collect()
}

impl Searcher<'_> {
    /// Generate candidate moves for `player`.
    ///
    /// With `top_k`, candidates are ranked by the heuristic score of the board
    /// after playing them (best for `player` first) and truncated. The sort is
    /// stable, so equal scores keep row-major order.
    pub fn get_moves(&mut self, board: &Board, player: Stone, top_k: Option<usize>) -> Vec<Pos> {
        let key = (*board, player, top_k);
        if self.config.memoize {
            if let Some(moves) = self.cache.moves.get(&key) {
                return moves;
            }
        }

        let candidates = candidate_cells(board, self.config.radius);

        let moves = match top_k {
            Some(k) if !board.is_board_empty() => {
                let mut scored: Vec<(Pos, i32)> = Vec::with_capacity(candidates.len());
                for pos in candidates {
                    // Candidates are empty in-bounds cells, so this cannot fail
                    if let Ok(next) = self.apply_move(board, pos, player) {
                        scored.push((pos, self.heuristic(&next, player)));
                    }
                }

                if player == Stone::Max {
                    scored.sort_by_key(|&(_, score)| Reverse(score));
                } else {
                    scored.sort_by_key(|&(_, score)| score);
                }
                scored.truncate(k);
                scored.into_iter().map(|(pos, _)| pos).collect()
            }
            _ => candidates,
        };

        if self.config.memoize {
            self.cache.moves.insert(key, moves.clone());
        }
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::eval::PatternTable;
    use crate::search::SearchCache;

    #[test]
    fn test_empty_board_returns_every_cell() {
        let board = Board::new(8).unwrap();
        let moves = candidate_cells(&board, 3);
        assert_eq!(moves.len(), 64);
        assert_eq!(moves[0], Pos::new(0, 0));
        assert_eq!(moves[63], Pos::new(7, 7));
    }

    #[test]
    fn test_radius_around_single_stone() {
        let board = Board::new(9)
            .unwrap()
            .with_stone(Pos::new(4, 4), Stone::Max)
            .unwrap();

        let moves = candidate_cells(&board, 1);
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&Pos::new(4, 4)));

        let moves = candidate_cells(&board, 3);
        assert_eq!(moves.len(), 48);
    }

    #[test]
    fn test_radius_clipped_at_corner() {
        let board = Board::new(9)
            .unwrap()
            .with_stone(Pos::new(0, 0), Stone::Min)
            .unwrap();
        // 4x4 box minus the stone itself
        assert_eq!(candidate_cells(&board, 3).len(), 15);
    }

    #[test]
    fn test_oversized_radius_covers_board() {
        let board = Board::new(9)
            .unwrap()
            .with_stone(Pos::new(4, 4), Stone::Max)
            .unwrap();

        for radius in [8, 1 << 31, usize::MAX] {
            assert_eq!(candidate_cells(&board, radius).len(), 80, "radius {radius}");
        }
    }

    #[test]
    fn test_candidates_are_empty_and_unique() {
        let board = Board::from_rows(&[
            ".........",
            ".........",
            "...XO....",
            "....X....",
            "...OXO...",
            ".........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();

        let moves = candidate_cells(&board, 3);
        let mut sorted = moves.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, moves, "row-major and without duplicates");
        assert!(moves.iter().all(|p| board.is_empty(*p)));
    }

    #[test]
    fn test_full_board_has_no_candidates() {
        let board = Board::from_rows(&["XXOOX", "OOXXO", "XXOOX", "OOXXO", "XXOOX"]).unwrap();
        assert!(candidate_cells(&board, 3).is_empty());
    }

    #[test]
    fn test_top_k_ranks_for_each_player() {
        let config = EngineConfig::classic();
        let patterns = PatternTable::new(config.win_length);
        let mut cache = SearchCache::new();
        let mut searcher = Searcher::new(&config, &patterns, &mut cache);

        // Max has an open three on row 4; extending it is Max's best move,
        // blocking it is Min's
        let board = Board::from_rows(&[
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

        let max_moves = searcher.get_moves(&board, Stone::Max, Some(3));
        assert_eq!(max_moves.len(), 3);
        assert!(
            max_moves[0] == Pos::new(4, 2) || max_moves[0] == Pos::new(4, 6),
            "Max should extend the three, got {:?}",
            max_moves
        );

        let min_moves = searcher.get_moves(&board, Stone::Min, Some(3));
        assert_eq!(min_moves.len(), 3);
        assert!(
            min_moves[0] == Pos::new(4, 2) || min_moves[0] == Pos::new(4, 6),
            "Min should cap the three, got {:?}",
            min_moves
        );
    }

    #[test]
    fn test_top_k_ignored_on_empty_board() {
        let config = EngineConfig::with_board_size(8);
        let patterns = PatternTable::new(config.win_length);
        let mut cache = SearchCache::new();
        let mut searcher = Searcher::new(&config, &patterns, &mut cache);

        let board = Board::new(8).unwrap();
        assert_eq!(searcher.get_moves(&board, Stone::Max, Some(5)).len(), 64);
    }
}
