//! Search context: configuration, pattern table and caches for one search
//!
//! The primitives here (apply a move, evaluate, test for a finished game) are
//! the memoized building blocks the move generator and minimax sit on. With
//! `memoize` switched off they compute every call from scratch and return the
//! same values.

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::eval::{evaluate, PatternTable};
use crate::rules::{check_draw, check_win_condition, WinLine};

use super::SearchCache;

/// Borrowed view of an engine for the duration of one operation.
pub struct Searcher<'a> {
    pub(crate) config: &'a EngineConfig,
    pub(super) patterns: &'a PatternTable,
    pub(super) cache: &'a mut SearchCache,
    /// Minimax nodes visited since construction
    pub(crate) nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(
        config: &'a EngineConfig,
        patterns: &'a PatternTable,
        cache: &'a mut SearchCache,
    ) -> Self {
        Self {
            config,
            patterns,
            cache,
            nodes: 0,
        }
    }

    #[inline]
    fn memoize(&self) -> bool {
        self.config.memoize
    }

    /// Number of minimax nodes visited so far
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Place `player`'s stone at `pos`, returning the new board.
    pub fn apply_move(&mut self, board: &Board, pos: Pos, player: Stone) -> Result<Board> {
        let key = (*board, pos, player);
        if self.memoize() {
            if let Some(next) = self.cache.boards.get(&key) {
                return Ok(next);
            }
        }

        let next = board.with_stone(pos, player)?;
        if self.memoize() {
            self.cache.boards.insert(key, next);
        }
        Ok(next)
    }

    /// Heuristic score of `board` (positive favors Max).
    ///
    /// `player` only takes part in the cache key: the score itself is the
    /// same for both players.
    pub fn heuristic(&mut self, board: &Board, player: Stone) -> i32 {
        let key = (*board, player);
        if self.memoize() {
            if let Some(score) = self.cache.scores.get(&key) {
                return score;
            }
        }

        let score = evaluate(board, self.patterns);
        if self.memoize() {
            self.cache.scores.insert(key, score);
        }
        score
    }

    /// First winning run on the board, if any
    pub fn winner(&mut self, board: &Board) -> Option<WinLine> {
        if self.memoize() {
            if let Some(result) = self.cache.wins.get(board) {
                return result;
            }
        }

        let result = check_win_condition(board, self.config.win_length);
        if self.memoize() {
            self.cache.wins.insert(*board, result.clone());
        }
        result
    }

    /// Draw check; only meaningful when `winner` found nothing
    pub fn is_draw(&mut self, board: &Board) -> bool {
        if self.memoize() {
            if let Some(result) = self.cache.draws.get(board) {
                return result;
            }
        }

        let result = check_draw(board, self.config.win_length);
        if self.memoize() {
            self.cache.draws.insert(*board, result);
        }
        result
    }

    /// The game is over on this board: a winning run exists or no cell is left.
    pub fn is_terminal(&mut self, board: &Board) -> bool {
        board.is_full() || self.winner(board).is_some()
    }
}
