mod components;
mod details;
mod header;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, DetailState, Popup, View};
use crate::booking::FormField;
use crate::theme::Theme;

use components::{centered_rect, key_hints, panel};

// Load theme colors once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

fn accent() -> Color { theme().brand }
fn accent_bright() -> Color { theme().brand_bright }
fn inactive() -> Color { theme().inactive }
fn success() -> Color { theme().success }
fn danger() -> Color { theme().danger }
fn rating() -> Color { theme().rating }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn header() -> Color { theme().header }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),   // Header bar
            Constraint::Length(1),   // Info line
            Constraint::Min(6),      // Current view
            Constraint::Length(1),   // Footer
        ])
        .split(area);

    header::draw_header(f, app, chunks[0]);
    draw_info_line(f, app, chunks[1]);

    match app.view {
        View::Home => draw_home(f, app, chunks[2]),
        View::Vehicles => draw_vehicles(f, app, chunks[2]),
        View::Services => draw_placeholder(f, "Services", "Detailing, repairs and inspections are coming soon.", chunks[2]),
        View::Materials => draw_placeholder(f, "Materials", "Parts and accessories are coming soon.", chunks[2]),
        View::VehicleDetails => details::draw_details(f, app, chunks[2]),
    }

    draw_footer(f, app, chunks[3]);

    match app.popup {
        Popup::None => {}
        Popup::Menu => draw_menu(f, app),
        Popup::Login => draw_credentials(f, app, "Login"),
        Popup::SignUp => draw_credentials(f, app, "Sign Up"),
        Popup::Help => draw_help_popup(f),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(accent_bright())))
    } else {
        Line::from(Span::styled(app.view.label(), Style::default().fg(text_dim())))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_home(f: &mut Frame, app: &App, area: Rect) {
    let available = app.listings.iter().filter(|v| v.available).count();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Rent the right vehicle, nearby", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} vehicles listed, {} available now", app.listings.len(), available),
            Style::default().fg(text_dim()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(accent())),
            Span::styled(" browse vehicles", Style::default().fg(text_dim())),
        ]),
    ];

    let home = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel("Auto X", false));
    f.render_widget(home, area);
}

fn draw_vehicles(f: &mut Frame, app: &App, area: Rect) {
    // Responsive columns based on width
    let show_location = area.width > 70;

    let header_cells = if show_location {
        vec!["", "Name", "Type", "Location", "Rating", "Per day"]
    } else {
        vec!["", "Name", "Rating", "Per day"]
    };
    let header_row = Row::new(
        header_cells
            .into_iter()
            .map(|h| Span::styled(h, Style::default().fg(header())))
            .collect::<Vec<_>>(),
    );

    let rows: Vec<Row> = if app.listings.is_empty() {
        vec![Row::new(vec![Span::styled("  No vehicles listed", Style::default().fg(text_dim()))])]
    } else {
        app.listings
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let icon_color = if v.available { success() } else { danger() };
                let row_style = if i == app.selected_vehicle {
                    Style::default().bg(bg_selected()).fg(text())
                } else {
                    Style::default()
                };
                let price = app.config.money(u64::from(v.price));

                let mut cells = vec![
                    Span::styled("●", Style::default().fg(icon_color)),
                    Span::styled(v.name.as_str(), Style::default().fg(text())),
                ];
                if show_location {
                    cells.push(Span::styled(v.vehicle_type.as_str(), Style::default().fg(text_dim())));
                    cells.push(Span::styled(v.location.as_str(), Style::default().fg(text_dim())));
                }
                cells.push(Span::styled(format!("★ {}", v.rating), Style::default().fg(rating())));
                cells.push(Span::styled(price, Style::default().fg(accent())));

                Row::new(cells).style(row_style)
            })
            .collect()
    };

    let widths = if show_location {
        vec![
            Constraint::Length(3),
            Constraint::Percentage(32),
            Constraint::Percentage(14),
            Constraint::Percentage(22),
            Constraint::Percentage(12),
            Constraint::Percentage(15),
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Percentage(55),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ]
    };

    let table = Table::new(rows, widths)
        .header(header_row)
        .block(panel("Vehicles", true));
    f.render_widget(table, area);
}

fn draw_placeholder(f: &mut Frame, title: &str, message: &str, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(text_dim()))),
    ])
    .alignment(Alignment::Center)
    .block(panel(title, true));
    f.render_widget(content, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.view {
        View::VehicleDetails => match app.detail {
            DetailState::Loaded(_) => {
                let mut hints = vec![("Tab", "Field")];
                if matches!(app.booking.focus, FormField::StartDate | FormField::EndDate) {
                    hints.push(("↑↓", "Day"));
                } else {
                    hints.push(("Enter", "Book"));
                }
                hints.extend([("c", "Call"), ("e", "Email"), ("Esc", "Back")]);
                hints
            }
            _ => vec![("Esc", "Back")],
        },
        View::Vehicles => vec![("↑↓", "Nav"), ("Enter", "Details"), ("Tab", "Next"), ("m", "Menu"), ("h", "Help"), ("q", "Quit")],
        _ => vec![("1-3", "Go to"), ("Tab", "Next"), ("m", "Menu"), ("g", "Home"), ("h", "Help"), ("q", "Quit")],
    };

    // Fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else { hints.len() };
    let footer = Paragraph::new(key_hints(&hints[..max_hints.min(hints.len())]))
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_menu(f: &mut Frame, app: &App) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width.saturating_sub(24),
        y: 2.min(area.height),
        width: 24.min(area.width),
        height: (View::NAV.len() as u16 + 2).min(area.height.saturating_sub(2)),
    };
    f.render_widget(Clear, popup_area);

    let lines: Vec<Line> = View::NAV
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let mut style = if view.is_active(app.view) {
                Style::default().fg(accent()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(text())
            };
            if i == app.menu_selected {
                style = style.bg(bg_selected());
            }
            Line::from(Span::styled(format!(" {} {:<18}", i + 1, view.label()), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(panel("Menu", true)), popup_area);
}

fn draw_credentials(f: &mut Frame, app: &App, title: &str) {
    let popup_area = centered_rect(40, 30, f.area());
    f.render_widget(Clear, popup_area);

    let prompt = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Name", Style::default().fg(header()))),
        Line::from(vec![
            Span::styled("[ ", Style::default().fg(accent_bright())),
            Span::styled(format!("{}_", app.input_buffer), Style::default().fg(text()).bg(bg_selected())),
            Span::styled(" ]", Style::default().fg(accent_bright())),
        ]),
        Line::from(""),
        key_hints(&[("Enter", "Continue"), ("Esc", "Cancel")]),
    ])
    .alignment(Alignment::Center)
    .block(panel(title, true));
    f.render_widget(prompt, popup_area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );
    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(header()).add_modifier(Modifier::BOLD)))
    };
    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), Style::default().fg(accent())),
            Span::raw(desc),
        ])
    };

    let help_text = vec![
        section("═══ Navigation ═══"),
        entry("1 2 3", "Vehicles, Services, Materials"),
        entry("Tab", "Next section (next field in the booking form)"),
        entry("m", "Open/close the menu"),
        entry("g", "Home"),
        entry("↑/↓ j/k", "Move in lists"),
        entry("Enter", "Open the selected vehicle"),
        Line::from(""),
        section("═══ Booking ═══"),
        entry("0-9 -", "Type a date (YYYY-MM-DD)"),
        entry("↑/↓", "Next/previous day in a date field"),
        entry("Enter", "Book Now (login required)"),
        entry("c / e", "Call or email the owner"),
        entry("Esc", "Back to vehicles"),
        Line::from(""),
        section("═══ Account ═══"),
        entry("l / s", "Login / Sign Up"),
        entry("o", "Logout"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("h", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" 󰋖 Auto X Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(help, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::User;
    use crate::catalog;
    use crate::config::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn detail_app(detail: DetailState) -> App {
        let mut app = App::new(AppConfig::default());
        app.view = View::VehicleDetails;
        app.detail = detail;
        app
    }

    #[test]
    fn test_missing_vehicle_renders_fallback() {
        let screen = render(&detail_app(DetailState::NotFound));

        assert!(screen.contains("Vehicle Not Found"));
        assert!(screen.contains("Go Back"));
        assert!(!screen.contains("Book Now"));
        assert!(!screen.contains("Specifications"));
    }

    #[test]
    fn test_loaded_vehicle_renders_detail_view() {
        let vehicle = catalog::find(1).unwrap();
        let screen = render(&detail_app(DetailState::Loaded(Box::new(vehicle.clone()))));

        assert!(screen.contains(&vehicle.name));
        assert!(screen.contains("Book Now"));
        assert!(screen.contains("Start Date"));
        assert!(screen.contains("End Date"));
        assert!(screen.contains("Login required to book"));
        assert!(!screen.contains("Vehicle Not Found"));
    }

    #[test]
    fn test_sidebar_shows_estimate_for_valid_window() {
        let vehicle = catalog::find(1).unwrap();
        let mut app = detail_app(DetailState::Loaded(Box::new(vehicle)));
        let start = App::today() + chrono::Duration::days(1);
        app.booking.start_date = start.format("%Y-%m-%d").to_string();
        app.booking.end_date = (start + chrono::Duration::days(3)).format("%Y-%m-%d").to_string();

        let screen = render(&app);
        assert!(screen.contains("3 day(s) = $135"));
    }

    #[test]
    fn test_header_shows_user_state() {
        let mut app = App::new(AppConfig::default());
        let screen = render(&app);
        assert!(screen.contains("Login"));
        assert!(screen.contains("Sign Up"));

        app.user = Some(User { name: "Dana".to_string() });
        let screen = render(&app);
        assert!(screen.contains("Welcome, Dana"));
        assert!(screen.contains("Logout"));
        assert!(!screen.contains("Sign Up"));
    }

    #[test]
    fn test_listing_renders_every_vehicle() {
        let mut app = App::new(AppConfig::default());
        app.view = View::Vehicles;
        let screen = render(&app);

        for v in &app.listings {
            assert!(screen.contains(&v.name), "missing {}", v.name);
        }
    }
}
