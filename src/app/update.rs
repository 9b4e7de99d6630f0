use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::app::keymap::KeyAction;
use crate::app::{ActiveTab, AppMessage, AppState, InputMode};
use crate::debounce::Debouncer;
use crate::github::UserDirectory;
use crate::lookup::LookupRequest;
use crate::search::{SearchCommand, SearchEvent};
use crate::ui;

/// Work the event loop hands to the runtime after a state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    FetchProfile(LookupRequest),
    Search(SearchCommand),
}

/// Apply one key press to the state.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Option<Effect> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match app.input_mode {
        InputMode::Editing => handle_editing_key(app, key),
        InputMode::Normal => match app.keymap.resolve(&key)? {
            KeyAction::Quit => {
                app.should_quit = true;
                None
            }
            KeyAction::SwitchTab => {
                app.active_tab = app.active_tab.toggled();
                None
            }
            KeyAction::StartEditing => {
                app.input_mode = InputMode::Editing;
                None
            }
            KeyAction::Submit => submit(app),
            KeyAction::MoveUp => {
                if app.active_tab == ActiveTab::Search {
                    app.search.select_previous();
                }
                None
            }
            KeyAction::MoveDown => {
                if app.active_tab == ActiveTab::Search {
                    app.search.select_next();
                }
                None
            }
            KeyAction::ToggleKeybindsPane => {
                app.show_keybinds = !app.show_keybinds;
                None
            }
            KeyAction::Ignore => None,
        },
    }
}

fn handle_editing_key(app: &mut AppState, key: KeyEvent) -> Option<Effect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return None;
    }
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            None
        }
        KeyCode::Tab => {
            app.active_tab = app.active_tab.toggled();
            None
        }
        KeyCode::Enter => match app.active_tab {
            ActiveTab::Profile => app.lookup.submit().map(Effect::FetchProfile),
            ActiveTab::Search => {
                app.input_mode = InputMode::Normal;
                None
            }
        },
        KeyCode::Backspace => edit_input(app, |text| {
            text.pop();
        }),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
            edit_input(app, |text| text.push(c))
        }
        _ => None,
    }
}

fn edit_input(app: &mut AppState, edit: impl FnOnce(&mut String)) -> Option<Effect> {
    match app.active_tab {
        ActiveTab::Profile => {
            edit(&mut app.lookup.query);
            None
        }
        ActiveTab::Search => {
            let mut text = app.search.raw_query.clone();
            edit(&mut text);
            app.search
                .handle(SearchEvent::Keystroke(text))
                .map(Effect::Search)
        }
    }
}

/// Enter in normal mode: look up the input, or the selected search result.
fn submit(app: &mut AppState) -> Option<Effect> {
    match app.active_tab {
        ActiveTab::Profile => app.lookup.submit().map(Effect::FetchProfile),
        ActiveTab::Search => {
            let login = app.search.selected()?.login.clone();
            app.active_tab = ActiveTab::Profile;
            app.lookup.set_query(login);
            app.lookup.submit().map(Effect::FetchProfile)
        }
    }
}

/// Apply one message from a timer or request task to the state.
pub fn handle_message(app: &mut AppState, msg: AppMessage) -> Option<Effect> {
    match msg {
        AppMessage::ProfileLoaded { id, outcome } => {
            app.lookup.resolve(id, outcome);
            None
        }
        AppMessage::SearchSettled(text) => app
            .search
            .handle(SearchEvent::Settled(text))
            .map(Effect::Search),
        AppMessage::SearchLoaded { id, items } => app
            .search
            .handle(SearchEvent::Loaded { id, items })
            .map(Effect::Search),
        AppMessage::SearchFailed { id } => app
            .search
            .handle(SearchEvent::Failed { id })
            .map(Effect::Search),
    }
}

/// Runs effects on the tokio runtime and collects their results.
pub struct Dispatcher<A> {
    runtime: Handle,
    api: A,
    tx: UnboundedSender<AppMessage>,
    rx: UnboundedReceiver<AppMessage>,
    debouncer: Debouncer<AppMessage>,
}

impl<A> Dispatcher<A>
where
    A: UserDirectory + Clone + Send + Sync + 'static,
{
    pub fn new(runtime: Handle, api: A, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(runtime.clone(), debounce, tx.clone());
        Self {
            runtime,
            api,
            tx,
            rx,
            debouncer,
        }
    }

    pub fn dispatch(&mut self, effect: Effect) {
        match effect {
            Effect::FetchProfile(LookupRequest { id, username }) => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                self.runtime.spawn(async move {
                    let outcome = api.fetch_user(&username).await;
                    let _ = tx.send(AppMessage::ProfileLoaded { id, outcome });
                });
            }
            Effect::Search(SearchCommand::Debounce(text)) => {
                self.debouncer.schedule(AppMessage::SearchSettled(text));
            }
            Effect::Search(SearchCommand::Fetch { id, query }) => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                self.runtime.spawn(async move {
                    let msg = match api.search_users(&query).await {
                        Ok(items) => AppMessage::SearchLoaded { id, items },
                        Err(e) => {
                            warn!(id, error = %e, "user search request failed");
                            AppMessage::SearchFailed { id }
                        }
                    };
                    let _ = tx.send(msg);
                });
            }
        }
    }

    /// Apply every message that has arrived so far. Returns how many were handled.
    pub fn pump(&mut self, app: &mut AppState) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            handled += 1;
            if let Some(effect) = handle_message(app, msg) {
                self.dispatch(effect);
            }
        }
        handled
    }
}

pub fn run_app<A>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
    dispatcher: &mut Dispatcher<A>,
) -> Result<()>
where
    A: UserDirectory + Clone + Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(effect) = handle_key(app, key) {
                    dispatcher.dispatch(effect);
                }
            }
        }

        dispatcher.pump(app);

        if app.should_quit {
            debug!(uptime = ?app.started_at.elapsed(), "quitting");
            break;
        }
    }

    Ok(())
}
