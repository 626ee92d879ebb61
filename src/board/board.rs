//! Immutable board value

use std::fmt;

use super::bitboard::Bitboard;
use super::{Pos, Stone, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{GameError, Result};

/// Game board.
///
/// A plain value: placing a stone returns a new board and never touches the
/// original. Two boards compare equal exactly when they have the same size and
/// the same stones, so the board itself serves as a compact cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    size: u8,
    /// Max stones bitboard
    max: Bitboard,
    /// Min stones bitboard
    min: Bitboard,
}

impl Board {
    /// Create an empty `size` x `size` board.
    pub fn new(size: usize) -> Result<Self> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GameError::InvalidBoardSize {
                size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(Self {
            size: size as u8,
            max: Bitboard::new(),
            min: Bitboard::new(),
        })
    }

    /// Parse a board from text rows using `X`, `O` and `.`.
    ///
    /// The number of rows sets the board size; every row must be that long.
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let mut board = Self::new(rows.len())?;
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != rows.len() {
                return Err(GameError::BoardParse {
                    row,
                    reason: format!("expected {} cells, found {}", rows.len(), cells.len()),
                });
            }
            for (col, c) in cells.into_iter().enumerate() {
                let stone = Stone::from_symbol(c).ok_or_else(|| GameError::BoardParse {
                    row,
                    reason: format!("unknown cell symbol {c:?}"),
                })?;
                if stone.is_player() {
                    let pos = Pos::new(row as u8, col as u8);
                    board = board.with_stone(pos, stone)?;
                }
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Check whether raw coordinates fall on this board
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        let size = i32::from(self.size);
        row >= 0 && row < size && col >= 0 && col < size
    }

    /// Validated position constructor.
    pub fn pos(&self, row: usize, col: usize) -> Result<Pos> {
        if row >= self.size() || col >= self.size() {
            return Err(GameError::OutOfBounds {
                row,
                col,
                size: self.size(),
            });
        }
        Ok(Pos::new(row as u8, col as u8))
    }

    /// Position `steps` cells away along `(dr, dc)`, if it is on the board.
    #[inline]
    pub fn step(&self, pos: Pos, dr: i32, dc: i32, steps: i32) -> Option<Pos> {
        let (r, c) = pos.offset(dr, dc, steps);
        if self.contains(r, c) {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(i32::from(pos.row), i32::from(pos.col)));
        pos.row as usize * self.size() + pos.col as usize
    }

    #[inline]
    fn pos_at(&self, idx: usize) -> Pos {
        Pos::new((idx / self.size()) as u8, (idx % self.size()) as u8)
    }

    /// Get stone at position. Positions off this board read as `Stone::Empty`.
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if !self.contains(i32::from(pos.row), i32::from(pos.col)) {
            return Stone::Empty;
        }
        let idx = self.index(pos);
        if self.max.get(idx) {
            Stone::Max
        } else if self.min.get(idx) {
            Stone::Min
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Return a copy of this board with `stone` placed at `pos`.
    ///
    /// Fails if `pos` is off the board, the cell is occupied, or `stone` is
    /// `Stone::Empty`. The receiver is left unchanged.
    pub fn with_stone(&self, pos: Pos, stone: Stone) -> Result<Board> {
        if !self.contains(i32::from(pos.row), i32::from(pos.col)) {
            return Err(GameError::OutOfBounds {
                row: pos.row as usize,
                col: pos.col as usize,
                size: self.size(),
            });
        }
        if !self.is_empty(pos) {
            return Err(GameError::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }

        let idx = self.index(pos);
        let mut next = *self;
        match stone {
            Stone::Max => next.max.set(idx),
            Stone::Min => next.min.set(idx),
            Stone::Empty => return Err(GameError::InvalidPlayer),
        }
        Ok(next)
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.size() * self.size()).map(move |idx| self.pos_at(idx))
    }

    /// Positions of one player's stones in row-major order (empty for `Stone::Empty`)
    pub fn stones(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        let bits = match stone {
            Stone::Max => self.max,
            Stone::Min => self.min,
            Stone::Empty => Bitboard::new(),
        };
        bits.iter_ones().map(move |idx| self.pos_at(idx))
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.max.count() + self.min.count()
    }

    /// Check if board has no stones
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.max.is_empty() && self.min.is_empty()
    }

    /// Check if every cell is occupied
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.size() * self.size()
    }

    /// The same position with Max and Min stones exchanged
    #[must_use]
    pub fn swap_colors(&self) -> Board {
        Board {
            size: self.size,
            max: self.min,
            min: self.max,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.get(Pos::new(row, col)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
