//! Minimax search with alpha-beta pruning
//!
//! The search is deliberately shallow: each root move is answered by the
//! opponent's best replies `max_depth` plies deep and the leaves are scored by
//! the pattern heuristic. Strength comes from the evaluation, not from
//! lookahead.
//!
//! Ties are broken by generator order: at the root that is row-major order,
//! below it the stable heuristic ranking.

use crate::board::{Board, Pos, Stone};

use super::Searcher;

/// Infinity score for alpha-beta bounds
pub const INF: i32 = i32::MAX;

/// Best move at a ply and its score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub pos: Pos,
    pub score: i32,
}

impl Searcher<'_> {
    /// Depth-limited minimax with alpha-beta pruning.
    ///
    /// Returns the heuristic value of `board` with `player` to move. Max nodes
    /// take the maximum over their children, Min nodes the minimum; a branch
    /// is abandoned once `beta <= alpha`.
    pub fn minimax(
        &mut self,
        board: &Board,
        player: Stone,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 || self.is_terminal(board) {
            return self.heuristic(board, player);
        }

        let moves = self.get_moves(board, player, self.config.interior_top_k());
        if moves.is_empty() {
            return self.heuristic(board, player);
        }

        if player == Stone::Max {
            let mut best = -INF;
            for pos in moves {
                let Ok(child) = self.apply_move(board, pos, player) else {
                    continue;
                };
                let score = self.minimax(&child, Stone::Min, depth - 1, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break; // Beta cutoff
                }
            }
            best
        } else {
            let mut best = INF;
            for pos in moves {
                let Ok(child) = self.apply_move(board, pos, player) else {
                    continue;
                };
                let score = self.minimax(&child, Stone::Max, depth - 1, alpha, beta);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break; // Alpha cutoff
                }
            }
            best
        }
    }

    /// Score every root candidate and return the best one for `player`.
    ///
    /// Root candidates are not truncated. Each is searched with a full window
    /// so its score is exact; the first candidate reaching the best score wins.
    /// Returns `None` when there is no candidate or `player` is `Stone::Empty`.
    pub fn find_best_move(&mut self, board: &Board, player: Stone) -> Option<SearchResult> {
        if !player.is_player() {
            return None;
        }

        let mut best: Option<SearchResult> = None;
        for pos in self.get_moves(board, player, None) {
            let Ok(child) = self.apply_move(board, pos, player) else {
                continue;
            };
            let score = self.minimax(&child, player.opponent(), self.config.max_depth, -INF, INF);

            let improves = match best {
                None => true,
                Some(current) if player == Stone::Max => score > current.score,
                Some(current) => score < current.score,
            };
            if improves {
                best = Some(SearchResult { pos, score });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::eval::PatternTable;
    use crate::search::SearchCache;

    /// Plain minimax without pruning, for comparison
    fn full_minimax(searcher: &mut Searcher<'_>, board: &Board, player: Stone, depth: u8) -> i32 {
        if depth == 0 || searcher.is_terminal(board) {
            return searcher.heuristic(board, player);
        }
        let top_k = searcher.config.interior_top_k();
        let moves = searcher.get_moves(board, player, top_k);
        if moves.is_empty() {
            return searcher.heuristic(board, player);
        }
        let mut scores = Vec::with_capacity(moves.len());
        for pos in moves {
            let child = searcher.apply_move(board, pos, player).unwrap();
            scores.push(full_minimax(searcher, &child, player.opponent(), depth - 1));
        }
        if player == Stone::Max {
            scores.into_iter().max().unwrap()
        } else {
            scores.into_iter().min().unwrap()
        }
    }

    fn midgame() -> Board {
        Board::from_rows(&[
            ".........",
            ".........",
            "...O.....",
            "...XX....",
            "....XO...",
            "...O.X...",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap()
    }

    #[test]
    fn test_depth_zero_is_heuristic() {
        let config = EngineConfig::classic();
        let patterns = PatternTable::new(5);
        let mut cache = SearchCache::new();
        let mut searcher = Searcher::new(&config, &patterns, &mut cache);

        let board = midgame();
        let h = searcher.heuristic(&board, Stone::Max);
        assert_eq!(searcher.minimax(&board, Stone::Max, 0, -INF, INF), h);
        assert_eq!(searcher.nodes(), 1);
    }

    #[test]
    fn test_pruning_matches_full_minimax() {
        let config = EngineConfig {
            max_depth: 2,
            ..EngineConfig::classic()
        };
        let patterns = PatternTable::new(5);
        let mut cache = SearchCache::new();
        let mut searcher = Searcher::new(&config, &patterns, &mut cache);
        let board = midgame();

        for player in [Stone::Max, Stone::Min] {
            for depth in 1..=3 {
                let pruned = searcher.minimax(&board, player, depth, -INF, INF);
                let full = full_minimax(&mut searcher, &board, player, depth);
                assert_eq!(pruned, full, "player {player}, depth {depth}");
            }
        }
    }

    #[test]
    fn test_best_move_has_best_full_value() {
        let config = EngineConfig {
            max_depth: 2,
            ..EngineConfig::classic()
        };
        let patterns = PatternTable::new(5);
        let mut cache = SearchCache::new();
        let mut searcher = Searcher::new(&config, &patterns, &mut cache);
        let board = midgame();

        let best = searcher.find_best_move(&board, Stone::Min).unwrap();

        let mut values = Vec::new();
        for pos in searcher.get_moves(&board, Stone::Min, None) {
            let child = searcher.apply_move(&board, pos, Stone::Min).unwrap();
            values.push(full_minimax(&mut searcher, &child, Stone::Max, 2));
        }
        let optimum = values.iter().copied().min().unwrap();
        assert_eq!(best.score, optimum);
    }

    #[test]
    fn test_takes_immediate_win() {
        let config = EngineConfig::classic();
        let patterns = PatternTable::new(5);
        let mut cache = SearchCache::new();
        let mut searcher = Searcher::new(&config, &patterns, &mut cache);

        let board = Board::from_rows(&[
            ".........",
            ".........",
            ".........",
            ".OOOO....",
            ".........",
            ".XXX.....",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();

        let best = searcher.find_best_move(&board, Stone::Min).unwrap();
        assert!(
            best.pos == Pos::new(3, 0) || best.pos == Pos::new(3, 5),
            "Min should complete five, got {}",
            best.pos
        );
    }

    #[test]
    fn test_no_move_on_full_board_or_for_empty_player() {
        let config = EngineConfig::with_board_size(5);
        let patterns = PatternTable::new(5);
        let mut cache = SearchCache::new();
        let mut searcher = Searcher::new(&config, &patterns, &mut cache);

        let full = Board::from_rows(&["XXOOX", "OOXXO", "XXOOX", "OOXXO", "XXOOX"]).unwrap();
        assert_eq!(searcher.find_best_move(&full, Stone::Max), None);
        assert_eq!(searcher.find_best_move(&midgame(), Stone::Empty), None);
    }
}
