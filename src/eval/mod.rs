//! Position evaluation
//!
//! - [`patterns`]: the mirrored pattern table and its weights
//! - [`heuristic`]: the pattern-matching scorer

pub mod heuristic;
pub mod patterns;

pub use heuristic::evaluate;
pub use patterns::{Pattern, PatternScore, PatternTable, WIN_UTIL};
