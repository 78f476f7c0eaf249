use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, View};

use super::{accent, bg_selected, danger, inactive, text, text_dim};

pub fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(inactive()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(12), Constraint::Min(10), Constraint::Length(36)])
        .split(inner);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("󰄋 ", Style::default().fg(accent())),
        Span::styled("Auto X", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
    ]));
    f.render_widget(logo, chunks[0]);

    // Narrow terminals get the menu (m) instead of inline entries
    if chunks[1].width >= 40 {
        f.render_widget(Paragraph::new(nav_line(app)), chunks[1]);
    }

    f.render_widget(Paragraph::new(user_line(app)).alignment(Alignment::Right), chunks[2]);
}

fn nav_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, view) in View::NAV.iter().enumerate() {
        let style = if view.is_active(app.view) {
            Style::default().fg(accent()).bg(bg_selected()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text())
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, view.label()), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

fn user_line(app: &App) -> Line<'_> {
    let menu_icon = if app.is_menu_open() { "✕" } else { "☰" };

    let mut spans = match &app.user {
        Some(user) => vec![
            Span::styled(format!("Welcome, {}", user.name), Style::default().fg(text())),
            Span::styled("  ", Style::default()),
            Span::styled("o", Style::default().fg(danger())),
            Span::styled(" Logout", Style::default().fg(text_dim())),
        ],
        None => vec![
            Span::styled("l", Style::default().fg(accent())),
            Span::styled(" Login  ", Style::default().fg(text())),
            Span::styled(" s Sign Up ", Style::default().fg(text()).bg(accent()).add_modifier(Modifier::BOLD)),
        ],
    };
    spans.push(Span::styled(format!("  {} ", menu_icon), Style::default().fg(text_dim())));
    Line::from(spans)
}
