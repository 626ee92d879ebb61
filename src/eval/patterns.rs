//! Pattern table for Gomoku evaluation
//!
//! Each shape is written once for Max (`X` = Max stone, `_` = empty cell) and
//! mirrored for Min with the negated score, so one pass over the board scores
//! both sides.

use crate::board::Stone;

/// Value of a completed run. Every other weight is a fraction of it.
pub const WIN_UTIL: i32 = 100_000;

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Completed run - immediate win
    pub const FIVE: i32 = WIN_UTIL;
    /// Open four: _XXXX_
    pub const OPEN_FOUR: i32 = WIN_UTIL / 2;
    /// Four with one open end: _XXXX or XXXX_
    pub const CLOSED_FOUR: i32 = WIN_UTIL / 10;
    /// Four with a hole: XX_XX, X_XXX, XXX_X
    pub const SPLIT_FOUR: i32 = WIN_UTIL / 20;
    /// Open three: _XXX_
    pub const OPEN_THREE: i32 = WIN_UTIL / 100;
    /// Open two: _XX_
    pub const OPEN_TWO: i32 = WIN_UTIL / 1000;
    /// Lone stone with space on both sides: _X_
    pub const OPEN_ONE: i32 = WIN_UTIL / 10_000;
}

/// Threat shapes from Max's point of view, in table order.
/// The completed run is prepended separately since its length is configurable.
const THREAT_SHAPES: [(&str, i32); 9] = [
    ("_XXXX_", PatternScore::OPEN_FOUR),
    ("XX_XX", PatternScore::SPLIT_FOUR),
    ("X_XXX", PatternScore::SPLIT_FOUR),
    ("XXX_X", PatternScore::SPLIT_FOUR),
    ("_XXXX", PatternScore::CLOSED_FOUR),
    ("XXXX_", PatternScore::CLOSED_FOUR),
    ("_XXX_", PatternScore::OPEN_THREE),
    ("_XX_", PatternScore::OPEN_TWO),
    ("_X_", PatternScore::OPEN_ONE),
];

/// A cell sequence and the score it contributes when matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub cells: Vec<Stone>,
    pub score: i32,
}

impl Pattern {
    /// Build a pattern from a Max-perspective shape, owned by `player`.
    ///
    /// `X` becomes `player`'s stone, `_` an empty cell; Min patterns carry
    /// the negated score.
    fn from_shape(shape: &str, score: i32, player: Stone) -> Self {
        let cells = shape
            .chars()
            .map(|c| if c == 'X' { player } else { Stone::Empty })
            .collect();
        let score = if player == Stone::Min { -score } else { score };
        Self { cells, score }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Full pattern table: mirrored Max/Min pairs
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: Vec<Pattern>,
}

impl PatternTable {
    /// Build the table for a game won by `win_length` stones in a row.
    pub fn new(win_length: usize) -> Self {
        let run = "X".repeat(win_length);

        let mut patterns = Vec::with_capacity(2 * (THREAT_SHAPES.len() + 1));
        patterns.push(Pattern::from_shape(&run, PatternScore::FIVE, Stone::Max));
        patterns.push(Pattern::from_shape(&run, PatternScore::FIVE, Stone::Min));
        for &(shape, score) in &THREAT_SHAPES {
            patterns.push(Pattern::from_shape(shape, score, Stone::Max));
            patterns.push(Pattern::from_shape(shape, score, Stone::Min));
        }
        Self { patterns }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
