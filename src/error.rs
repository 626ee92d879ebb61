//! Error types

use thiserror::Error;

/// Errors raised at the engine boundary.
///
/// The search itself never fails; these come from malformed boards, moves,
/// configuration, or moves played out of turn in a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Board side outside the supported range
    #[error("Invalid board size {size} (supported: {min}..={max})")]
    InvalidBoardSize { size: usize, min: usize, max: usize },

    /// Move target is not on the board
    #[error("Position ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    /// Move target already holds a stone
    #[error("Cell ({row}, {col}) is already occupied")]
    CellOccupied { row: u8, col: u8 },

    /// `Stone::Empty` passed where a player is required
    #[error("Empty is not a player")]
    InvalidPlayer,

    /// Configuration rejected by validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Text board could not be parsed
    #[error("Cannot parse board row {row}: {reason}")]
    BoardParse { row: usize, reason: String },

    /// The game has already ended
    #[error("Game is already over")]
    GameOver,

    /// The engine is computing a move for the side to play
    #[error("AI is thinking")]
    AiThinking,
}

/// Engine operation result type
pub type Result<T> = std::result::Result<T, GameError>;
