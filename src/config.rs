//! Engine configuration
//!
//! Every tunable of the engine lives here instead of in global constants, so
//! several engines with different boards can coexist. The defaults reproduce
//! the classic 9x9 game: five in a row, one ply of lookahead below the root,
//! candidates within three cells of a stone, five ranked replies per node.

use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{GameError, Result};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board side N
    pub board_size: usize,
    /// Stones in a row needed to win (L)
    pub win_length: usize,
    /// Plies searched below each root move
    pub max_depth: u8,
    /// Chebyshev distance from an existing stone for candidate moves
    pub radius: usize,
    /// Candidates kept per interior node after ranking (0 keeps all)
    pub top_k: usize,
    /// Enable the memoization caches
    pub memoize: bool,
}

impl EngineConfig {
    /// The classic 9x9 configuration
    pub fn classic() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            win_length: 5,
            max_depth: 1,
            radius: 3,
            top_k: 5,
            memoize: true,
        }
    }

    /// Same game on a custom board side
    pub fn with_board_size(board_size: usize) -> Self {
        Self {
            board_size,
            ..Self::classic()
        }
    }

    /// Parse a TOML document; missing keys fall back to the classic values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| GameError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(GameError::InvalidBoardSize {
                size: self.board_size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.win_length < 3 || self.win_length > self.board_size {
            return Err(GameError::InvalidConfig {
                reason: format!(
                    "win_length {} must be between 3 and the board size {}",
                    self.win_length, self.board_size
                ),
            });
        }
        if self.radius == 0 || self.radius >= self.board_size {
            return Err(GameError::InvalidConfig {
                reason: format!(
                    "radius {} must be between 1 and {}",
                    self.radius,
                    self.board_size - 1
                ),
            });
        }
        Ok(())
    }

    /// Truncation applied to interior-node candidate lists
    #[inline]
    pub fn interior_top_k(&self) -> Option<usize> {
        (self.top_k > 0).then_some(self.top_k)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::classic()
    }
}
