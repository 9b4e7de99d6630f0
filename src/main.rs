//! ghfinder binary entry point.
//!
//! Loads settings, starts logging and the async runtime, puts the terminal in
//! raw mode, runs the TUI event loop, and restores the terminal on exit.
//!
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use ghfinder::app::settings::Settings;
use ghfinder::app::update::{Dispatcher, Effect};
use ghfinder::app::{self, ActiveTab, AppState, InputMode};
use ghfinder::cli::Cli;
use ghfinder::error::{Context, Result};
use ghfinder::github::GitHubClient;
use ghfinder::search::SearchEvent;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> std::io::Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Send `tracing` output to `path`; stdout belongs to the UI.
fn init_logging(path: &Path) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("logging disabled: cannot open {}: {e}", path.display());
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = app::config_dir(cli.config_dir.as_deref());

    let mut settings = Settings::load_or_init(&dir.join("settings.conf"));
    cli.apply(&mut settings);

    let log_path = cli.log_file.clone().unwrap_or_else(|| dir.join("ghfinder.log"));
    init_logging(&log_path);
    tracing::info!(config_dir = %dir.display(), api_base = %settings.api_base, "starting ghfinder");

    let runtime = tokio::runtime::Runtime::new().with_ctx(|| "start async runtime".to_string())?;
    let client = GitHubClient::new(&settings.api_base)?;
    let mut dispatcher = Dispatcher::new(runtime.handle().clone(), client, settings.debounce);
    let mut app = AppState::from_config_dir(&dir, settings);

    if let Some(username) = &cli.username {
        app.lookup.set_query(username.clone());
        app.input_mode = InputMode::Normal;
        if let Some(request) = app.lookup.submit() {
            dispatcher.dispatch(Effect::FetchProfile(request));
        }
    }
    if let Some(query) = &cli.query {
        app.active_tab = ActiveTab::Search;
        app.search.raw_query = query.clone();
        if let Some(command) = app.search.handle(SearchEvent::Settled(query.clone())) {
            dispatcher.dispatch(Effect::Search(command));
        }
    }

    let mut terminal = init_terminal().with_ctx(|| "init terminal".to_string())?;

    let res = app::run(&mut terminal, &mut app, &mut dispatcher);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    drop(dispatcher);
    runtime.shutdown_timeout(Duration::from_millis(250));

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
