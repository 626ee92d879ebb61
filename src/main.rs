//! Gomoku engine self-play demo
//!
//! Usage: `gomoku [config.toml]`
//!
//! Plays one engine-vs-engine game with the given configuration (the classic
//! 9x9 game by default) and prints the final board. Set `RUST_LOG` to adjust
//! logging, e.g. `RUST_LOG=gomoku=debug` to see every search.

use std::fs;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gomoku::{AIEngine, EngineConfig, GameSession, Phase, Stone};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

fn load_config() -> Result<EngineConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file: {path}"))?;
            EngineConfig::from_toml_str(&text)
                .with_context(|| format!("invalid config file: {path}"))
        }
        None => Ok(EngineConfig::classic()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("gomoku=info".parse()?))
        .init();

    let config = load_config()?;
    info!(
        board_size = config.board_size,
        win_length = config.win_length,
        max_depth = config.max_depth,
        "starting self-play"
    );

    let engine = AIEngine::with_config(config)?;
    let mut session = GameSession::new(engine, Stone::Min)?;

    while !session.is_game_over() {
        let player = session.to_move();
        session.start_ai_thinking()?;

        let played = loop {
            if let Some(pos) = session.poll_ai() {
                break Some(pos);
            }
            if !session.is_ai_thinking() {
                break None;
            }
            thread::sleep(POLL_INTERVAL);
        };
        let Some(pos) = played else {
            bail!("engine found no move for {player}");
        };

        let (score, nodes, time_ms) = session
            .last_ai_result()
            .map_or((0, 0, 0), |r| (r.score, r.nodes, r.time_ms));
        info!(
            ply = session.history().len(),
            %player,
            %pos,
            score,
            nodes,
            time_ms,
            favors = ?session.favored(),
            "move played"
        );
    }

    println!("{}", session.board());
    match session.phase() {
        Phase::GameOver { winner: Stone::Empty, .. } => println!("Draw"),
        Phase::GameOver { winner, line } => {
            let cells: Vec<String> = line.iter().map(ToString::to_string).collect();
            println!("{winner} wins: {}", cells.join(" "));
        }
        _ => {}
    }
    info!(
        moves = session.history().len(),
        cache_entries = session.with_engine(|e| e.cache_stats().entries()),
        "game finished"
    );
    Ok(())
}
