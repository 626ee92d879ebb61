//! Game session: turn order, game end and the background AI
//!
//! The engine search runs on a worker thread so the caller's loop never
//! blocks. Every search is tagged with the session's generation; starting a
//! new game or conceding bumps the generation, and a reply carrying an old
//! generation is dropped instead of being played onto the wrong board.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::engine::{AIEngine, MoveResult};
use crate::error::{GameError, Result};

/// Where the session stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// A move may be played with `play`
    WaitingForPlayer,
    /// A search is running; its reply is collected by `poll_ai`
    AiThinking,
    /// The game has ended. `winner` is `Stone::Empty` for a draw and `line`
    /// is empty unless the game was won on the board.
    GameOver { winner: Stone, line: Vec<Pos> },
}

/// Reply sent back by the search thread
struct AiReply {
    generation: u64,
    player: Stone,
    result: MoveResult,
}

/// A search in flight
struct PendingSearch {
    receiver: Receiver<AiReply>,
    start_time: Instant,
}

/// One game against the engine (or several, via `new_game`).
pub struct GameSession {
    engine: Arc<Mutex<AIEngine>>,
    /// Configuration of `engine`, for replacing it while a search holds it
    config: EngineConfig,
    empty_board: Board,
    ai_player: Stone,
    board: Board,
    to_move: Stone,
    phase: Phase,
    history: Vec<(Pos, Stone)>,
    generation: u64,
    pending: Option<PendingSearch>,
    last_ai_result: Option<MoveResult>,
}

impl GameSession {
    /// Start a session where the engine plays `ai_player`. Max always moves
    /// first.
    pub fn new(engine: AIEngine, ai_player: Stone) -> Result<Self> {
        if !ai_player.is_player() {
            return Err(GameError::InvalidPlayer);
        }
        let board = engine.new_board();
        Ok(Self {
            config: engine.config().clone(),
            engine: Arc::new(Mutex::new(engine)),
            empty_board: board,
            ai_player,
            board,
            to_move: Stone::Max,
            phase: Phase::WaitingForPlayer,
            history: Vec::new(),
            generation: 0,
            pending: None,
            last_ai_result: None,
        })
    }

    fn lock_engine(&self) -> MutexGuard<'_, AIEngine> {
        // Caches are write-once, so a poisoned lock still holds valid entries
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the shared engine. Blocks while a
    /// search is running.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut AIEngine) -> R) -> R {
        f(&mut *self.lock_engine())
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    #[inline]
    pub fn ai_player(&self) -> Stone {
        self.ai_player
    }

    #[inline]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Moves played so far, oldest first
    #[inline]
    pub fn history(&self) -> &[(Pos, Stone)] {
        &self.history
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_ai_result(&self) -> Option<&MoveResult> {
        self.last_ai_result.as_ref()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.phase == Phase::WaitingForPlayer && self.to_move == self.ai_player
    }

    pub fn is_ai_thinking(&self) -> bool {
        self.phase == Phase::AiThinking
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    /// How long the current search has been running
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match (&self.phase, &self.pending) {
            (Phase::AiThinking, Some(pending)) => Some(pending.start_time.elapsed()),
            _ => None,
        }
    }

    /// Play `pos` for the side to move.
    ///
    /// # Errors
    ///
    /// `GameError::GameOver` once the game has ended, `GameError::AiThinking`
    /// while a search is running, and the board's errors for a bad cell.
    pub fn play(&mut self, pos: Pos) -> Result<()> {
        match self.phase {
            Phase::GameOver { .. } => return Err(GameError::GameOver),
            Phase::AiThinking => return Err(GameError::AiThinking),
            Phase::WaitingForPlayer => {}
        }
        self.execute_move(pos)
    }

    /// Place the stone and settle the outcome: win, then draw, then switch
    /// sides.
    fn execute_move(&mut self, pos: Pos) -> Result<()> {
        let player = self.to_move;
        let (board, won, drawn) = {
            let mut engine = self.lock_engine();
            let board = engine.apply_move(&self.board, pos, player)?;
            let won = engine.check_win_condition(&board);
            let drawn = won.is_none() && engine.check_draw(&board);
            (board, won, drawn)
        };

        self.board = board;
        self.history.push((pos, player));

        if let Some(win) = won {
            info!(winner = %win.winner, moves = self.history.len(), "game won");
            self.phase = Phase::GameOver {
                winner: win.winner,
                line: win.cells,
            };
        } else if drawn {
            info!(moves = self.history.len(), "game drawn");
            self.phase = Phase::GameOver {
                winner: Stone::Empty,
                line: Vec::new(),
            };
        } else {
            self.to_move = player.opponent();
            self.phase = Phase::WaitingForPlayer;
        }
        Ok(())
    }

    /// Start searching for the side to move on a worker thread.
    ///
    /// # Errors
    ///
    /// `GameError::GameOver` once the game has ended and
    /// `GameError::AiThinking` if a search is already running.
    pub fn start_ai_thinking(&mut self) -> Result<()> {
        match self.phase {
            Phase::GameOver { .. } => return Err(GameError::GameOver),
            Phase::AiThinking => return Err(GameError::AiThinking),
            Phase::WaitingForPlayer => {}
        }

        let board = self.board;
        let player = self.to_move;
        let generation = self.generation;
        let engine = Arc::clone(&self.engine);
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .search(&board, player);
            // The session may be gone already
            let _ = tx.send(AiReply {
                generation,
                player,
                result,
            });
        });

        self.pending = Some(PendingSearch {
            receiver: rx,
            start_time: Instant::now(),
        });
        self.phase = Phase::AiThinking;
        Ok(())
    }

    /// Collect the search reply if it has arrived and play it.
    ///
    /// Returns the move that was played. Replies from an earlier generation,
    /// or arriving after the session left `AiThinking`, are discarded.
    pub fn poll_ai(&mut self) -> Option<Pos> {
        let pending = self.pending.as_ref()?;
        let received = pending.receiver.try_recv();
        let reply = match received {
            Ok(reply) => reply,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                warn!("search thread ended without a reply");
                self.pending = None;
                if self.phase == Phase::AiThinking {
                    self.phase = Phase::WaitingForPlayer;
                }
                return None;
            }
        };
        self.pending = None;
        self.accept_reply(reply)
    }

    /// Block until the running search replies, then handle it like `poll_ai`.
    pub fn wait_ai(&mut self) -> Option<Pos> {
        let pending = self.pending.take()?;
        match pending.receiver.recv() {
            Ok(reply) => self.accept_reply(reply),
            Err(_) => {
                warn!("search thread ended without a reply");
                if self.phase == Phase::AiThinking {
                    self.phase = Phase::WaitingForPlayer;
                }
                None
            }
        }
    }

    fn accept_reply(&mut self, reply: AiReply) -> Option<Pos> {
        if reply.generation != self.generation || self.phase != Phase::AiThinking {
            warn!(
                reply_generation = reply.generation,
                generation = self.generation,
                "discarding stale search result"
            );
            return None;
        }

        self.phase = Phase::WaitingForPlayer;
        let result = reply.result;
        self.last_ai_result = Some(result.clone());

        let Some(pos) = result.best_move else {
            warn!(player = %reply.player, "engine found no move");
            return None;
        };
        match self.execute_move(pos) {
            Ok(()) => Some(pos),
            Err(err) => {
                warn!(%err, "engine move rejected");
                None
            }
        }
    }

    /// Clear the board, the log and the engine caches. A search still running
    /// for the previous game will be discarded.
    ///
    /// Never waits for that search: if it still holds the engine, the session
    /// switches to a fresh engine and the worker finishes on the old one.
    pub fn new_game(&mut self) {
        self.generation += 1;
        let replace = match self.engine.try_lock() {
            Ok(mut engine) => {
                engine.reset_caches();
                false
            }
            Err(TryLockError::Poisoned(poisoned)) => {
                poisoned.into_inner().reset_caches();
                false
            }
            Err(TryLockError::WouldBlock) => true,
        };
        if replace {
            info!("search still running, starting with a fresh engine");
            self.engine = Arc::new(Mutex::new(AIEngine::build(self.config.clone())));
        }
        self.board = self.empty_board;
        self.to_move = Stone::Max;
        self.phase = Phase::WaitingForPlayer;
        self.history.clear();
        self.last_ai_result = None;
        info!(generation = self.generation, "new game");
    }

    /// The human side gives up; the engine is recorded as the winner.
    pub fn concede(&mut self) -> Result<()> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        self.generation += 1;
        self.phase = Phase::GameOver {
            winner: self.ai_player,
            line: Vec::new(),
        };
        info!(winner = %self.ai_player, "game conceded");
        Ok(())
    }

    /// Whose position the engine currently prefers, or `None` while a
    /// search holds the engine.
    pub fn favored(&self) -> Option<Stone> {
        let board = self.board;
        match self.engine.try_lock() {
            Ok(mut engine) => Some(engine.favored(&board)),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner().favored(&board)),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn session() -> GameSession {
        let engine = AIEngine::with_config(EngineConfig::with_board_size(7)).unwrap();
        GameSession::new(engine, Stone::Min).unwrap()
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert_eq!(s.board().size(), 7);
        assert_eq!(s.to_move(), Stone::Max);
        assert_eq!(s.phase(), &Phase::WaitingForPlayer);
        assert!(s.history().is_empty());
        assert!(!s.is_ai_turn());
    }

    #[test]
    fn test_empty_ai_player_rejected() {
        let engine = AIEngine::new();
        assert!(matches!(
            GameSession::new(engine, Stone::Empty),
            Err(GameError::InvalidPlayer)
        ));
    }

    #[test]
    fn test_play_switches_sides() {
        let mut s = session();
        s.play(Pos::new(3, 3)).unwrap();
        assert_eq!(s.to_move(), Stone::Min);
        assert_eq!(s.board().get(Pos::new(3, 3)), Stone::Max);
        assert!(s.is_ai_turn());
        assert_eq!(s.history(), &[(Pos::new(3, 3), Stone::Max)]);
    }

    #[test]
    fn test_occupied_cell_keeps_turn() {
        let mut s = session();
        s.play(Pos::new(3, 3)).unwrap();
        assert_eq!(
            s.play(Pos::new(3, 3)),
            Err(GameError::CellOccupied { row: 3, col: 3 })
        );
        assert_eq!(s.to_move(), Stone::Min);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_ai_reply_is_played() {
        let mut s = session();
        s.play(Pos::new(3, 3)).unwrap();
        s.start_ai_thinking().unwrap();
        assert!(s.is_ai_thinking());
        assert_eq!(s.play(Pos::new(0, 0)), Err(GameError::AiThinking));
        assert_eq!(s.start_ai_thinking(), Err(GameError::AiThinking));

        let pos = s.wait_ai().expect("engine should reply with a move");
        assert_eq!(s.board().get(pos), Stone::Min);
        assert_eq!(s.to_move(), Stone::Max);
        assert_eq!(s.phase(), &Phase::WaitingForPlayer);
        assert!(s.last_ai_result().is_some());
    }

    #[test]
    fn test_stale_reply_discarded_after_new_game() {
        let mut s = session();
        s.play(Pos::new(3, 3)).unwrap();
        s.start_ai_thinking().unwrap();
        s.new_game();

        assert_eq!(s.wait_ai(), None);
        assert!(s.board().is_board_empty());
        assert!(s.history().is_empty());
        assert_eq!(s.phase(), &Phase::WaitingForPlayer);
        assert_eq!(s.generation(), 1);
    }

    #[test]
    fn test_stale_reply_discarded_after_concede() {
        let mut s = session();
        s.play(Pos::new(3, 3)).unwrap();
        s.start_ai_thinking().unwrap();
        s.concede().unwrap();

        assert_eq!(s.wait_ai(), None);
        assert_eq!(s.board().stone_count(), 1);
        assert_eq!(
            s.phase(),
            &Phase::GameOver {
                winner: Stone::Min,
                line: Vec::new()
            }
        );
        assert_eq!(s.concede(), Err(GameError::GameOver));
    }

    #[test]
    fn test_win_ends_game() {
        let mut s = session();
        for col in 0..4 {
            s.play(Pos::new(0, col)).unwrap();
            s.play(Pos::new(6, col)).unwrap();
        }
        s.play(Pos::new(0, 4)).unwrap();

        match s.phase() {
            Phase::GameOver { winner, line } => {
                assert_eq!(*winner, Stone::Max);
                assert_eq!(line.len(), 5);
                assert_eq!(line[0], Pos::new(0, 0));
            }
            other => panic!("expected game over, got {other:?}"),
        }
        assert_eq!(s.play(Pos::new(3, 3)), Err(GameError::GameOver));
        assert_eq!(s.start_ai_thinking(), Err(GameError::GameOver));
    }

    #[test]
    fn test_new_game_does_not_wait_for_busy_engine() {
        let mut s = session();
        s.play(Pos::new(3, 3)).unwrap();

        // Stand in for a search thread holding the engine
        let busy = Arc::clone(&s.engine);
        let guard = busy.lock().unwrap();
        assert_eq!(s.favored(), None);

        s.new_game();
        assert!(!Arc::ptr_eq(&busy, &s.engine));
        assert!(s.board().is_board_empty());
        assert_eq!(s.favored(), Some(Stone::Empty));
        drop(guard);

        s.play(Pos::new(0, 0)).unwrap();
        assert_eq!(s.with_engine(|e| e.config().board_size), 7);
    }

    #[test]
    fn test_new_game_reuses_idle_engine() {
        let mut s = session();
        s.play(Pos::new(3, 3)).unwrap();
        let before = Arc::clone(&s.engine);

        s.new_game();
        assert!(Arc::ptr_eq(&before, &s.engine));
        assert_eq!(s.with_engine(|e| e.cache_stats().entries()), 0);
        assert_eq!(s.favored(), Some(Stone::Empty));
    }

    #[test]
    fn test_poll_before_start_is_idle() {
        let mut s = session();
        assert_eq!(s.poll_ai(), None);
        assert_eq!(s.wait_ai(), None);
        assert_eq!(s.ai_thinking_elapsed(), None);
    }
}
