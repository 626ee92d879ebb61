//! Board representation for Gomoku

pub mod bitboard;
pub mod board;


// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Smallest supported board side
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest supported board side (19x19)
pub const MAX_BOARD_SIZE: usize = 19;
/// Board side used by the classic game (9x9)
pub const DEFAULT_BOARD_SIZE: usize = 9;
pub const MAX_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE; // 361

/// Direction vectors for line scanning, in scan order.
/// Each line is visited once: scanning always goes forward from its first cell.
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Cell contents. `Max` and `Min` double as the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stone {
    #[default]
    Empty,
    /// Maximizing player (`X`)
    Max,
    /// Minimizing player (`O`)
    Min,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Max => Stone::Min,
            Stone::Min => Stone::Max,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Text symbol used by `Board::from_rows` and `Display`
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Stone::Max => 'X',
            Stone::Min => 'O',
            Stone::Empty => '.',
        }
    }

    #[inline]
    pub fn from_symbol(c: char) -> Option<Stone> {
        match c {
            'X' | 'x' => Some(Stone::Max),
            'O' | 'o' => Some(Stone::Min),
            '.' | '_' | '-' => Some(Stone::Empty),
            _ => None,
        }
    }

    #[inline]
    pub fn is_player(self) -> bool {
        self != Stone::Empty
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stone::Max => f.write_str("Max"),
            Stone::Min => f.write_str("Min"),
            Stone::Empty => f.write_str("Empty"),
        }
    }
}

/// Position on the board (a move target)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    /// Unchecked constructor; use `Board::pos` to validate against a board.
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < MAX_BOARD_SIZE as u8 && col < MAX_BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Step `steps` cells along `(dr, dc)`, returning raw coordinates.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, steps: i32) -> (i32, i32) {
        (
            i32::from(self.row) + dr * steps,
            i32::from(self.col) + dc * steps,
        )
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    /// Row-major order: lowest row first, then lowest column.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
