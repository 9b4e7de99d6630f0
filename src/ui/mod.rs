pub mod components;
pub mod profile;
pub mod results;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{ActiveTab, AppState, InputMode};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    render_header(f, root[0], app);
    render_input(f, root[1], app);

    let body = if app.show_keybinds {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
            .split(root[2]);
        components::render_keybinds_panel(f, cols[1], app);
        cols[0]
    } else {
        root[2]
    };

    match app.active_tab {
        ActiveTab::Profile => profile::render_profile(f, body, app),
        ActiveTab::Search => results::render_search(f, body, app),
    }

    components::render_status_bar(f, root[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(format!("[{label}]"), Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(app.theme.muted))
        }
    };
    let line = Line::from(vec![
        Span::raw("GitHub Profile Finder  "),
        tab("Profile", app.active_tab == ActiveTab::Profile),
        Span::raw(" "),
        tab("Search", app.active_tab == ActiveTab::Search),
        Span::raw("  | Tab: switch; /: edit; Enter: search; Esc: stop editing; q: quit"),
    ]);
    let p = Paragraph::new(line)
        .block(
            Block::default()
                .title("ghfinder")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &AppState) {
    let (title, text, placeholder) = match app.active_tab {
        ActiveTab::Profile => ("Username", app.lookup.query.as_str(), "Enter GitHub username..."),
        ActiveTab::Search => ("Search users", app.search.raw_query.as_str(), "Search GitHub users..."),
    };
    let editing = app.input_mode == InputMode::Editing;
    let content = if text.is_empty() && !editing {
        Span::styled(placeholder, Style::default().fg(app.theme.muted))
    } else if editing {
        Span::styled(format!("{text}▏"), Style::default().fg(app.theme.text))
    } else {
        Span::styled(text.to_string(), Style::default().fg(app.theme.text))
    };
    let border = if editing { app.theme.accent } else { app.theme.border };
    let p = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}
