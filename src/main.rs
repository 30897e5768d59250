mod actions;
mod app;
mod llms;
mod logging;
mod state;
mod ui;

use std::io;

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use ds_base::config::{Settings, load_settings, settings_path};

use app::App;
use state::State;

fn main() -> io::Result<()> {
    let _log_guard = match logging::init(&logging::log_path()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("logging disabled: {}", e);
            None
        }
    };

    let settings = match load_settings(&settings_path()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "ignoring settings file, using defaults");
            Settings::default()
        }
    };
    tracing::info!(
        reveal_interval_ms = settings.reveal_interval_ms,
        mode = ?settings.default_mode,
        api_base = %settings.api_base,
        "starting"
    );

    install_panic_hook();

    let client = llms::get_client(&settings);

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(State::new(settings), client);
    let result = app.run(&mut terminal);

    // Cleanup
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    tracing::info!("exiting");
    result
}

/// Only the main thread owns the terminal. Gateway worker panics are caught
/// and reported as failed replies while the UI keeps running.
fn restores_terminal(thread_name: Option<&str>) -> bool {
    thread_name == Some("main")
}

/// Panic hook: restore terminal state and log the panic.
/// Without this, a panic leaves the terminal in raw mode + alternate screen.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let thread = std::thread::current();
        if !restores_terminal(thread.name()) {
            // Printing to stderr here would draw over the running UI.
            tracing::error!(thread = ?thread.name(), "worker panic: {}", info);
            return;
        }
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        let backtrace = std::backtrace::Backtrace::force_capture();
        tracing::error!("panic: {}\n{}", info, backtrace);
        default_hook(info);
    }));
}
