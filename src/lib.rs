//! N-in-a-row AI engine with shallow minimax
//!
//! A compact engine for Gomoku-style games on small boards:
//! - Square board from 5x5 to 19x19 (9x9 by default)
//! - A run of `win_length` stones wins (5 by default)
//! - Draw once no line can be completed by either player
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Immutable board values backed by bitboards
//! - [`rules`]: Win and draw detection
//! - [`eval`]: Pattern table and heuristic scoring
//! - [`search`]: Candidate generation, minimax with alpha-beta, memoization
//! - [`engine`]: Main AI engine integrating all components
//! - [`game`]: Game session running the engine on a worker thread
//! - [`config`]: Engine configuration and TOML loading
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, EngineConfig, Stone};
//!
//! let mut engine = AIEngine::with_config(EngineConfig::with_board_size(8)).unwrap();
//! let board = engine.new_board();
//!
//! // On an empty board every cell is a candidate
//! assert_eq!(engine.get_moves(&board, Stone::Max, None).len(), 64);
//!
//! let first = engine.find_best_move(&board, Stone::Max).unwrap();
//! let board = engine.apply_move(&board, first, Stone::Max).unwrap();
//! assert_eq!(board.stone_count(), 1);
//! ```
//!
//! # Search
//!
//! Every root candidate is searched `max_depth` plies deep (1 by default)
//! and the leaves are scored by the pattern heuristic. Below the root,
//! candidates are ranked by that heuristic and only the best `top_k` are
//! expanded. All intermediate results are memoized per engine.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult};
pub use error::{GameError, Result};
pub use game::{GameSession, Phase};
pub use rules::WinLine;
