//! Search module for Gomoku AI
//!
//! Contains:
//! - Memoization caches keyed by board value
//! - The search context with cached primitives
//! - Candidate move generation
//! - Minimax with alpha-beta pruning

pub mod cache;
pub mod minimax;
pub mod movegen;
pub mod searcher;

pub use cache::{CacheStats, MemoTable, SearchCache};
pub use minimax::{SearchResult, INF};
pub use movegen::candidate_cells;
pub use searcher::Searcher;
