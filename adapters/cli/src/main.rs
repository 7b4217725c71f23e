#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Tower of Go.
//!
//! Without flags the binary starts a game, renders a single frame and prints
//! it as plain text. With `-t` it takes over the terminal and runs the
//! interactive loop until the player quits.

mod terminal;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tower_of_go_core::{DEFAULT_FIELD_COLUMNS, DEFAULT_FIELD_ROWS, HERO_POSITION};
use tower_of_go_rendering::Screen;
use tower_of_go_system_reducers::start_or_restart_game;
use tower_of_go_world::{query, GameConfig, GameState};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Climb as many floors of randomly generated mazes as the timer allows.
#[derive(Debug, Parser)]
#[command(name = "tower-of-go", version)]
struct CliArgs {
    /// Run the interactive game in the terminal.
    #[arg(short = 't', long = "terminal")]
    terminal: bool,
    /// Seed for maze generation. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of field rows, border included.
    #[arg(long, default_value_t = DEFAULT_FIELD_ROWS)]
    rows: usize,
    /// Number of field columns, border included.
    #[arg(long, default_value_t = DEFAULT_FIELD_COLUMNS)]
    columns: usize,
    /// Length of a run in seconds.
    #[arg(long = "time-limit", default_value_t = 30)]
    time_limit: u64,
    /// Upper bound on how long one loop iteration waits for input, in milliseconds.
    #[arg(long = "frame-millis", default_value_t = 50)]
    frame_millis: u64,
}

impl CliArgs {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            rows: self.rows,
            columns: self.columns,
            time_limit: Duration::from_secs(self.time_limit),
            entrance: HERO_POSITION,
            seed: self.seed.unwrap_or_else(rand::random),
        }
    }
}

/// Entry point for the Tower of Go command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = args.game_config();
    info!(
        rows = config.rows,
        columns = config.columns,
        seed = config.seed,
        "configured field"
    );

    if args.terminal {
        let frame = Duration::from_millis(args.frame_millis.max(1));
        return terminal::run(GameState::new(&config), frame);
    }

    let text = render_plain(GameState::new(&config))?;
    println!("{text}");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn render_plain(state: GameState) -> Result<String> {
    let state = start_or_restart_game(state)
        .context("failed to start the game")?
        .state;
    let (rows, columns) = query::dimensions(&state);
    let mut screen = Screen::for_field(rows, columns);
    screen
        .render(&state)
        .context("failed to draw the game screen")?;
    Ok(screen.as_text())
}
