//! Game rules for N-in-a-row
//!
//! This module implements the terminal checks:
//! - Win conditions (unbroken run of `win_length`)
//! - Draw detection (no window left that either player could complete)

pub mod draw;
pub mod win;

// Re-exports for convenient access
pub use draw::check_draw;
pub use win::{check_win_condition, has_winner, WinLine};

