use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use maze_chase::config::Glyphs;
use maze_chase::game::{Game, GameState, DEFAULT_LIVES, DEFAULT_TICK_MS};
use maze_chase::ghost::PolicyKind;
use maze_chase::input::spawn_reader;
use maze_chase::level::Level;
use maze_chase::render::TerminalRenderer;
use maze_chase::terminal::RawModeGuard;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze description to play
    #[arg(long, value_name = "FILE", default_value = "assets/maze01.txt")]
    maze_file: PathBuf,

    /// Glyph configuration (JSON)
    #[arg(long, value_name = "FILE", default_value = "assets/config.json")]
    config_file: PathBuf,

    /// Lives at the start of the game
    #[arg(long, default_value_t = DEFAULT_LIVES, value_parser = clap::value_parser!(u32).range(1..))]
    lives: u32,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = DEFAULT_TICK_MS, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// How the ghosts move
    #[arg(long, value_enum, default_value_t = PolicyKind::Random)]
    policy: PolicyKind,

    /// Seed for the ghosts' random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let level = match Level::load(&args.maze_file) {
        Ok(level) => level,
        Err(e) => {
            tracing::error!(error = %e, "failed to load maze");
            return Ok(());
        }
    };
    let glyphs = Glyphs::load_or_default(&args.config_file);

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = GameState::new(level, args.lives);
    tracing::info!(
        rows = state.grid.rows(),
        cols = state.grid.cols(),
        ghosts = state.ghosts.len(),
        items = state.player.items_left,
        "maze loaded"
    );

    let guard = RawModeGuard::acquire().context("unable to activate raw mode")?;
    let input = spawn_reader(io::stdin()).context("unable to start input reader")?;
    let renderer = TerminalRenderer::new(io::stdout(), glyphs);

    let mut game = Game::new(state, args.policy.build(rng), input, renderer)
        .with_tick(Duration::from_millis(args.tick_ms));
    let outcome = game.run();

    guard.release().context("unable to restore terminal mode")?;
    tracing::info!(?outcome, score = game.state().player.score, "exiting");
    Ok(())
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("unable to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_ansi(false).with_writer(io::stderr).init(),
    }
    Ok(())
}
