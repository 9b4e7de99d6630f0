use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Row, Table};

use crate::app::AppState;

/// Suggestions on top, the full result grid below.
pub fn render_search(f: &mut Frame, area: Rect, app: &AppState) {
    let suggestion_rows = app.search.suggestion_limit.max(1) as u16 + 2;
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(suggestion_rows), Constraint::Min(4)].as_ref())
        .split(area);

    render_suggestions(f, parts[0], app);
    render_grid(f, parts[1], app);
}

fn render_suggestions(f: &mut Frame, area: Rect, app: &AppState) {
    let title = if app.search.loading { "Suggestions (searching...)" } else { "Suggestions" };
    let items: Vec<ListItem> = app
        .search
        .suggestions
        .iter()
        .map(|u| ListItem::new(format!("  {}", u.login)))
        .collect();
    let list = List::new(items)
        .style(Style::default().fg(app.theme.text))
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(list, area);
}

fn render_grid(f: &mut Frame, area: Rect, app: &AppState) {
    let rows_per_page = (area.height.saturating_sub(3) as usize).max(1);
    let start = (app.search.selected / rows_per_page) * rows_per_page;
    let end = (start + rows_per_page).min(app.search.results.len());
    let slice = &app.search.results[start.min(end)..end];

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let style = if start + i == app.search.selected {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.login.clone()),
            Cell::from(u.html_url.clone()),
            Cell::from(u.avatar_url.clone()),
        ])
        .style(style)
    });

    let widths = [Constraint::Length(24), Constraint::Percentage(40), Constraint::Percentage(60)];
    let header = Row::new(vec!["LOGIN", "PROFILE", "AVATAR"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));
    let title = format!("Users ({})", app.search.results.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)))
        .column_spacing(1);
    f.render_widget(table, area);
}
