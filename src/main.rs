//! SRS-TETRIS - line-driven front end for the rules engine
//!
//! Type command keys and press enter; the board is printed after every
//! processed command.

use srs_tetris::input::KeyBindings;
use srs_tetris::settings::Settings;
use srs_tetris::{BUFFER_HEIGHT, Cell, EndReason, Game, GameState, ShapeTables};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Get the log directory, creating it if needed
fn log_dir(settings: &Settings) -> PathBuf {
    let dir = settings
        .log
        .directory
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("srs-tetris"));
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Plain text view: visible rows, active piece in lowercase, ghost as ':'
fn render(game: &Game) -> String {
    let active = game.active_cells();
    let ghost = game.ghost_cells();
    let active_letter = game
        .active_shape()
        .map(|shape| shape.letter().to_ascii_lowercase())
        .unwrap_or('#');

    let mut out = String::new();
    for (offset, row) in game.visible_board().iter().enumerate() {
        let row_index = (offset + BUFFER_HEIGHT) as i32;
        out.push('|');
        for (col, cell) in row.iter().enumerate() {
            let pos = (row_index, col as i32);
            let ch = if active.is_some_and(|cells| cells.contains(&pos)) {
                active_letter
            } else if let Cell::Filled(shape) = cell {
                shape.letter()
            } else if ghost.is_some_and(|cells| cells.contains(&pos)) {
                ':'
            } else {
                '.'
            };
            out.push(ch);
            out.push(' ');
        }
        out.push_str("|\n");
    }

    let hold = game.hold().map_or('-', |shape| shape.letter());
    let next: String = game.preview().iter().map(|shape| shape.letter()).collect();
    let _ = writeln!(
        out,
        "hold: {}  next: {}  lines: {}",
        hold,
        next,
        game.lines_cleared()
    );
    out
}

fn main() -> io::Result<()> {
    let settings = Settings::load();

    // Generate session ID for this instance
    let session_id: u32 = rand::random();
    let dir = log_dir(&settings);
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file so it never mixes with the board on stdout
    let file_appender = tracing_appender::rolling::never(&dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_new(&settings.log.filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("srs_tetris=info"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "SRS-TETRIS starting up, session={:08x}, log={}",
        session_id,
        dir.join(&log_file).display()
    );

    let tables = Arc::new(ShapeTables::new());
    let seed = settings.gameplay.seed.unwrap_or_else(rand::random);
    tracing::info!("Using seed {}", seed);
    let mut game = Game::with_seed(tables, seed);
    let keys = KeyBindings::from_settings(&settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", render(&game))?;
    out.flush()?;

    'input: for line in io::stdin().lock().lines() {
        let line = line?;
        for key in line.chars() {
            // Unbound keys are ignored
            let Some(command) = keys.command_for(key) else {
                continue;
            };
            game.step(command);
            writeln!(out, "----------")?;
            write!(out, "{}", render(&game))?;
            if game.has_ended() {
                break 'input;
            }
        }
        out.flush()?;
    }

    // First run: write out the defaults so they can be edited
    if Settings::settings_path().is_some_and(|path| !path.exists()) {
        if let Err(e) = settings.save() {
            eprintln!("Warning: Could not save settings: {}", e);
        }
    }

    let reason = match game.state() {
        GameState::GameOver(EndReason::ToppedOut) => "topped out",
        GameState::GameOver(EndReason::SpawnBlocked) => "no room to spawn",
        GameState::GameOver(EndReason::Quit) | GameState::Playing => "quit",
    };
    writeln!(
        out,
        "Game over ({}): {} pieces, {} lines",
        reason,
        game.pieces_locked(),
        game.lines_cleared()
    )?;
    Ok(())
}
