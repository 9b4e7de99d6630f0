use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::AppState;
use crate::github::UserProfile;
use crate::lookup::RequestState;

/// Loading indicator, error line, or the profile card.
pub fn render_profile(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Profile")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    match &app.lookup.state {
        RequestState::Idle => {
            let p = Paragraph::new("Type a username and press Enter.")
                .style(Style::default().fg(app.theme.muted))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(p, area);
        }
        RequestState::Loading => {
            let p = Paragraph::new("Searching...")
                .style(Style::default().fg(app.theme.accent).add_modifier(Modifier::ITALIC))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(p, area);
        }
        RequestState::Error(message) => {
            let p = Paragraph::new(message.as_str())
                .style(Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(p, area);
        }
        RequestState::Success(profile) => {
            let inner = block.inner(area);
            f.render_widget(block, area);
            render_card(f, inner, app, profile);
        }
    }
}

fn render_card(f: &mut Frame, area: Rect, app: &AppState, profile: &UserProfile) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(2), Constraint::Length(3), Constraint::Length(2)].as_ref())
        .split(area);

    let names = vec![
        Line::from(Span::styled(
            profile.display_name().to_string(),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("@{}", profile.login), Style::default().fg(app.theme.muted))),
        Line::from(Span::styled(profile.avatar_url.clone(), Style::default().fg(app.theme.muted))),
    ];
    f.render_widget(Paragraph::new(names), rows[0]);

    let bio = Paragraph::new(profile.bio_or_placeholder().to_string())
        .style(Style::default().fg(app.theme.text))
        .wrap(Wrap { trim: true });
    f.render_widget(bio, rows[1]);

    let stats = [
        ("Followers", profile.followers),
        ("Following", profile.following),
        ("Repos", profile.public_repos),
        ("Stars", profile.stars()),
    ];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4].as_ref())
        .split(rows[2]);
    for (i, (label, value)) in stats.iter().enumerate() {
        let p = Paragraph::new(vec![
            Line::from(Span::styled(value.to_string(), Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(*label, Style::default().fg(app.theme.muted))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::LEFT).border_style(Style::default().fg(app.theme.border)));
        f.render_widget(p, cols[i]);
    }

    let link = Paragraph::new(Line::from(vec![
        Span::raw("View GitHub Profile: "),
        Span::styled(profile.html_url.clone(), Style::default().fg(app.theme.accent).add_modifier(Modifier::UNDERLINED)),
    ]));
    f.render_widget(link, rows[3]);
}
