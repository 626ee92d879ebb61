//! Main AI Engine integrating all components
//!
//! `AIEngine` owns the configuration, the pattern table and the memoization
//! caches, and exposes the operations a game front end needs:
//!
//! 1. **find_best_move**: pick a move for the side to play
//! 2. **apply_move**: advance the board after any move
//! 3. **check_win_condition** / **check_draw**: decide whether the game ended
//! 4. **evaluate_state**: read the current evaluation
//! 5. **reset_caches**: forget everything between games
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Stone};
//!
//! let mut engine = AIEngine::new();
//! let mut board = engine.new_board();
//!
//! let human = board.pos(4, 4).unwrap();
//! board = engine.apply_move(&board, human, Stone::Max).unwrap();
//!
//! let reply = engine.find_best_move(&board, Stone::Min).expect("board has room");
//! board = engine.apply_move(&board, reply, Stone::Min).unwrap();
//!
//! assert!(engine.check_win_condition(&board).is_none());
//! assert!(!engine.check_draw(&board));
//! ```

use std::time::Instant;

use tracing::{debug, trace};

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::error::{GameError, Result};
use crate::eval::PatternTable;
use crate::rules::WinLine;
use crate::search::{CacheStats, SearchCache, Searcher};

/// Result of a move search with statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Minimax value of the best move (positive favors Max)
    pub score: i32,
    /// Minimax nodes visited
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    /// Result for a position with nothing to play
    #[inline]
    fn no_move(nodes: u64, time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            nodes,
            time_ms,
        }
    }
}

/// Main AI Engine for N-in-a-row.
///
/// Every cached operation takes `&mut self`. To search from a worker thread
/// while another thread reads the engine, wrap it in a `Mutex`.
pub struct AIEngine {
    config: EngineConfig,
    patterns: PatternTable,
    cache: SearchCache,
}

impl AIEngine {
    /// Create an engine with the classic 9x9 configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(EngineConfig::classic())
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the configuration is not playable.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Build from a configuration that has already passed `validate`.
    pub(crate) fn build(config: EngineConfig) -> Self {
        Self {
            patterns: PatternTable::new(config.win_length),
            cache: SearchCache::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// An empty board of the configured size
    #[must_use]
    pub fn new_board(&self) -> Board {
        // Size was validated when the engine was built
        Board::new(self.config.board_size).unwrap_or_else(|_| unreachable!())
    }

    fn searcher(&mut self) -> Searcher<'_> {
        Searcher::new(&self.config, &self.patterns, &mut self.cache)
    }

    /// Get the best move for `player`, or `None` when no move is possible.
    #[must_use]
    pub fn find_best_move(&mut self, board: &Board, player: Stone) -> Option<Pos> {
        self.search(board, player).best_move
    }

    /// Search for the best move and report statistics.
    pub fn search(&mut self, board: &Board, player: Stone) -> MoveResult {
        let start = Instant::now();
        let mut searcher = self.searcher();
        let best = searcher.find_best_move(board, player);
        let nodes = searcher.nodes();
        let time_ms = start.elapsed().as_millis() as u64;

        let result = match best {
            Some(found) => MoveResult {
                best_move: Some(found.pos),
                score: found.score,
                nodes,
                time_ms,
            },
            None => MoveResult::no_move(nodes, time_ms),
        };

        debug!(
            player = %player,
            best_move = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "search finished"
        );
        result
    }

    /// Place `player`'s stone at `pos` and return the new board.
    ///
    /// # Errors
    ///
    /// `GameError::CellOccupied` if the cell holds a stone,
    /// `GameError::OutOfBounds` if `pos` is off the board and
    /// `GameError::InvalidPlayer` for `Stone::Empty`.
    pub fn apply_move(&mut self, board: &Board, pos: Pos, player: Stone) -> Result<Board> {
        self.searcher().apply_move(board, pos, player)
    }

    /// Winner and the cells of its run, if the game is won.
    pub fn check_win_condition(&mut self, board: &Board) -> Option<WinLine> {
        self.searcher().winner(board)
    }

    /// Whether no line can be completed any more. Call after
    /// `check_win_condition` returned `None`.
    pub fn check_draw(&mut self, board: &Board) -> bool {
        self.searcher().is_draw(board)
    }

    /// Heuristic value of the position (positive favors Max).
    pub fn evaluate_state(&mut self, board: &Board, player: Stone) -> i32 {
        self.heuristic(board, player)
    }

    /// Memoized pattern score of `board`, as seen by the search leaves.
    pub fn heuristic(&mut self, board: &Board, player: Stone) -> i32 {
        self.searcher().heuristic(board, player)
    }

    /// Which side the evaluation currently favors (`Stone::Empty` when level)
    pub fn favored(&mut self, board: &Board) -> Stone {
        match self.evaluate_state(board, Stone::Max) {
            s if s > 0 => Stone::Max,
            s if s < 0 => Stone::Min,
            _ => Stone::Empty,
        }
    }

    /// Candidate moves, optionally ranked and truncated to `top_k`.
    pub fn get_moves(&mut self, board: &Board, player: Stone, top_k: Option<usize>) -> Vec<Pos> {
        self.searcher().get_moves(board, player, top_k)
    }

    /// Validate and place a move given as raw coordinates.
    pub fn play(&mut self, board: &Board, row: usize, col: usize, player: Stone) -> Result<Board> {
        if !player.is_player() {
            return Err(GameError::InvalidPlayer);
        }
        let pos = board.pos(row, col)?;
        self.apply_move(board, pos, player)
    }

    /// Forget every memoized result. Call when a new game starts.
    pub fn reset_caches(&mut self) {
        let before = self.cache.stats();
        self.cache.clear();
        trace!(
            entries = before.entries(),
            hit_rate = before.hit_rate(),
            "caches reset"
        );
    }

    /// Cache sizes and hit counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
