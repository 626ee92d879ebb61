//! Memoization caches for search
//!
//! Every expensive pure function the search calls is memoized here, keyed by
//! the board value plus whatever context disambiguates the call. Unlike a
//! transposition table there is no replacement policy: entries are written
//! once per key and the tables only grow until `clear()` is called, which
//! callers do between games.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::SearchCache;
//!
//! let mut cache = SearchCache::new();
//! let board = Board::new(9).unwrap();
//!
//! cache.scores.insert((board, Stone::Max), 0);
//! assert_eq!(cache.scores.get(&(board, Stone::Max)), Some(0));
//!
//! cache.clear();
//! assert_eq!(cache.stats().entries(), 0);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use crate::board::{Board, Pos, Stone};
use crate::rules::WinLine;

/// Key for candidate lists: board, player to move, requested truncation
pub type MovesKey = (Board, Stone, Option<usize>);
/// Key for applied moves: board, target cell, player placing the stone
pub type BoardKey = (Board, Pos, Stone);
/// Key for heuristic scores: board and the player the score was asked for
pub type ScoreKey = (Board, Stone);

/// A single write-once key-value table with hit/miss counters.
#[derive(Debug)]
pub struct MemoTable<K, V> {
    entries: HashMap<K, V>,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash, V: Clone> MemoTable<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a key, counting the probe as a hit or a miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a value. An existing entry for the key is kept as is.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.entry(key).or_insert(value);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl<K: Eq + Hash, V: Clone> Default for MemoTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The engine's memoization layer.
///
/// Owned by the caller (through `AIEngine`); nothing here is global. Sharing one
/// cache between threads requires external locking.
#[derive(Debug, Default)]
pub struct SearchCache {
    /// Candidate move lists
    pub moves: MemoTable<MovesKey, Vec<Pos>>,
    /// Boards produced by applying a move
    pub boards: MemoTable<BoardKey, Board>,
    /// Win check results
    pub wins: MemoTable<Board, Option<WinLine>>,
    /// Draw check results
    pub draws: MemoTable<Board, bool>,
    /// Heuristic scores
    pub scores: MemoTable<ScoreKey, i32>,
}

impl SearchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.moves.clear();
        self.boards.clear();
        self.wins.clear();
        self.draws.clear();
        self.scores.clear();
    }

    /// Snapshot of table sizes and probe counters
    pub fn stats(&self) -> CacheStats {
        let tables = [
            (self.moves.hits, self.moves.misses),
            (self.boards.hits, self.boards.misses),
            (self.wins.hits, self.wins.misses),
            (self.draws.hits, self.draws.misses),
            (self.scores.hits, self.scores.misses),
        ];
        CacheStats {
            moves: self.moves.len(),
            boards: self.boards.len(),
            wins: self.wins.len(),
            draws: self.draws.len(),
            scores: self.scores.len(),
            hits: tables.iter().map(|t| t.0).sum(),
            misses: tables.iter().map(|t| t.1).sum(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub moves: usize,
    pub boards: usize,
    pub wins: usize,
    pub draws: usize,
    pub scores: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Total entries across all tables
    pub fn entries(&self) -> usize {
        self.moves + self.boards + self.wins + self.draws + self.scores
    }

    pub fn hit_rate(&self) -> f64 {
        let probes = self.hits + self.misses;
        if probes == 0 {
            0.0
        } else {
            self.hits as f64 / probes as f64
        }
    }
}
