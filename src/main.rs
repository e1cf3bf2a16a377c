//! BLOCKFALL - a falling-block puzzle game for the terminal

mod board;
mod collision;
mod figure;
mod game;
mod input;
mod kick;
mod piece;
mod settings;
mod snapshot;
mod timer;
mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use game::Game;
use input::{Input, InputHandler};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Input delay after game over to prevent accidental exit
const GAME_OVER_INPUT_DELAY: Duration = Duration::from_secs(2);

/// Get the blockfall temp directory, creating it if needed
fn temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file; the terminal belongs to the UI
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "blockfall=debug".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;

    match &result {
        Ok(game) => {
            println!("\nThanks for playing BLOCKFALL!");
            println!("Rows cleared: {}", game.lines_cleared());
        }
        Err(e) => tracing::error!("Terminal error: {}", e),
    }

    result.map(|_| ())
}

/// Drive one game: input, timers, ticks and drawing, serialized on this thread
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<Game> {
    let mut game = Game::new(settings);
    let mut input = InputHandler::from_settings(settings);
    let start = Instant::now();
    let mut game_over_time: Option<Instant> = None;

    loop {
        terminal.draw(|frame| ui::render_game(frame, &game.snapshot(), settings))?;

        if game.is_over() && game_over_time.is_none() {
            game_over_time = Some(Instant::now());
            input.clear();
        }

        // Handle input
        if event::poll(FRAME_DURATION)? {
            let inputs = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(over_at) = game_over_time {
                        // Any key leaves once the delay has passed
                        if over_at.elapsed() >= GAME_OVER_INPUT_DELAY {
                            return Ok(game);
                        }
                        continue;
                    }
                    input.key_down(key)
                }
                Event::Mouse(mouse) => input.mouse(mouse),
                _ => Vec::new(),
            };

            for command in inputs {
                match command {
                    Input::Action(action) => game.process_action(action),
                    Input::Quit => {
                        tracing::info!("Quit requested");
                        return Ok(game);
                    }
                }
            }
        }

        // Stop ticking once the game has ended
        if game.is_over() {
            continue;
        }

        for command in input.update(Instant::now()) {
            if let Input::Action(action) = command {
                game.process_action(action);
            }
        }

        game.tick(start.elapsed());
    }
}
