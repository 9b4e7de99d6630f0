//! Shared UI components (status bar, keybindings panel).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{ActiveTab, AppState, InputMode};
use crate::lookup::RequestState;
use std::collections::{BTreeMap, BTreeSet};

/// Render the bottom status bar with mode and flow summaries.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Editing => "EDIT",
    };
    let lookup = match &app.lookup.state {
        RequestState::Idle => "idle",
        RequestState::Loading => "loading",
        RequestState::Success(_) => "ok",
        RequestState::Error(_) => "error",
    };
    let msg = format!(
        "mode: {mode}  lookup:{lookup}  results:{}  settled:\"{}\"  debounce:{}ms",
        app.search.results.len(),
        app.search.settled_query,
        app.settings.debounce.as_millis(),
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Render the right-side keybindings viewer.
pub fn render_keybinds_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Keybindings")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);

    let mut general: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    for ((mods, code), action) in app.keymap.all_bindings() {
        let label = match action {
            KeyAction::Quit => "Quit",
            KeyAction::SwitchTab => "Switch tab",
            KeyAction::StartEditing => "Edit input",
            KeyAction::Submit => match app.active_tab {
                ActiveTab::Profile => "Look up",
                ActiveTab::Search => "Open selected",
            },
            KeyAction::MoveUp => "Move up",
            KeyAction::MoveDown => "Move down",
            KeyAction::ToggleKeybindsPane => "Toggle this panel",
            KeyAction::Ignore => continue,
        };
        general.entry(label).or_default().insert(Keymap::format_key(mods, code));
    }

    let col1_w = general
        .keys()
        .map(|k| k.len())
        .chain(["Stop editing".len()])
        .max()
        .unwrap_or(0)
        .min((inner.width as usize).saturating_sub(8));
    let row = |label: &str, value: String| {
        let lbl: String = label.chars().take(col1_w).collect();
        Line::from(vec![
            Span::raw(format!("  {:>width$} │ ", lbl, width = col1_w)),
            Span::styled(value, Style::default().add_modifier(Modifier::ITALIC)),
        ])
    };

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        "Normal mode:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (label, keys) in &general {
        lines.push(row(label, keys.iter().cloned().collect::<Vec<_>>().join(", ")));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "While editing:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(row("Stop editing", "Esc".to_string()));
    lines.push(row("Submit", "Enter".to_string()));
    lines.push(row("Quit", "Ctrl+c".to_string()));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(block, area);
    f.render_widget(p, inner);
}
