//! crud-console binary entry point.
//!
//! Parses the command line, sets up file logging and the tokio runtime,
//! puts the terminal in raw mode, runs the TUI event loop, and restores the
//! terminal state on exit.
//!
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crud_console::api::ApiClient;
use crud_console::app::{self, AppState, Theme, keymap::Keymap};
use crud_console::config::Cli;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Log to a file in the config directory; the terminal belongs to the UI.
fn init_logging(cli: &Cli) -> Result<WorkerGuard> {
    let dir = cli.config_dir();
    std::fs::create_dir_all(&dir).with_context(|| format!("create config dir {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(&dir, &cli.log_file);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    let theme = Theme::load_or_init(&cli.theme_path());
    let keymap = Keymap::load_or_init(&cli.keybinds_path());
    let api = ApiClient::new(cli.api_url.clone());
    tracing::info!(api_url = api.base_url(), "starting crud-console");
    let (mut state, first) = AppState::new(api.base_url(), theme, keymap);

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &mut state, first, &api, runtime.handle());

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
