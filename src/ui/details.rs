//! Vehicle detail view: listing info on the left, booking sidebar on the right

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{App, DetailState};
use crate::booking::FormField;
use crate::catalog::Vehicle;

use super::components::{centered_rect, panel};
use super::{accent, accent_bright, bg_selected, danger, header, inactive, rating, success, text, text_dim};

pub fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    match &app.detail {
        DetailState::Loading => draw_loading(f, area),
        DetailState::NotFound => draw_not_found(f, area),
        DetailState::Loaded(vehicle) => draw_vehicle(f, app, vehicle, area),
    }
}

fn draw_loading(f: &mut Frame, area: Rect) {
    let loading = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("󰔟 Loading vehicle...", Style::default().fg(text_dim()))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(loading, centered_rect(50, 30, area));
}

fn draw_not_found(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Vehicle Not Found",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Go Back ", Style::default().fg(text()).bg(accent()).add_modifier(Modifier::BOLD)),
            Span::styled("  Enter/Esc", Style::default().fg(text_dim())),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(content, centered_rect(60, 40, area));
}

fn draw_vehicle(f: &mut Frame, app: &App, vehicle: &Vehicle, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(8)])
        .split(area);

    let back = Paragraph::new(Line::from(vec![
        Span::styled(" ← ", Style::default().fg(accent())),
        Span::styled("Back to Vehicles", Style::default().fg(text_dim())),
        Span::styled(" (Esc)", Style::default().fg(inactive())),
    ]));
    f.render_widget(back, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(rows[1]);

    draw_info(f, app, vehicle, columns[0]);
    draw_booking_sidebar(f, app, vehicle, columns[1]);
}

fn draw_info(f: &mut Frame, app: &App, vehicle: &Vehicle, area: Rect) {
    let feature_rows = vehicle.features.len().div_ceil(2) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),
            Constraint::Length(feature_rows + 2),
            Constraint::Length(7),
        ])
        .split(area);

    let price = app.config.money(u64::from(vehicle.price));
    let summary = vec![
        Line::from(vec![
            Span::styled(vehicle.name.as_str(), Style::default().fg(header()).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", vehicle.vehicle_type), Style::default().fg(text_dim())),
        ]),
        Line::from(vec![
            Span::styled("󰍎 ", Style::default().fg(text_dim())),
            Span::styled(vehicle.location.as_str(), Style::default().fg(text_dim())),
            Span::styled("   ★ ", Style::default().fg(rating())),
            Span::styled(
                format!("{} ({} reviews)", vehicle.rating, vehicle.reviews),
                Style::default().fg(text_dim()),
            ),
            Span::styled(format!("   {}", price), Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
            Span::styled(" per day", Style::default().fg(text_dim())),
        ]),
        Line::from(""),
        Line::from(Span::styled(vehicle.description.as_str(), Style::default().fg(text()))),
        Line::from(""),
        Line::from(Span::styled(vehicle.image.as_str(), Style::default().fg(inactive()))),
    ];
    let info = Paragraph::new(summary)
        .wrap(Wrap { trim: true })
        .block(panel("Vehicle", false));
    f.render_widget(info, chunks[0]);

    // Features, two per row
    let feature_lines: Vec<Line> = vehicle
        .features
        .chunks(2)
        .map(|pair| {
            let mut spans = Vec::new();
            for feature in pair {
                spans.push(Span::styled(" ✓ ", Style::default().fg(success())));
                spans.push(Span::styled(format!("{:<24}", feature), Style::default().fg(text())));
            }
            Line::from(spans)
        })
        .collect();
    f.render_widget(Paragraph::new(feature_lines).block(panel("Features", false)), chunks[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let specs = &vehicle.specifications;
    let spec_lines = vec![
        field_line("Year", specs.year.to_string()),
        field_line("Fuel", specs.fuel.clone()),
        field_line("Transmission", specs.transmission.clone()),
        field_line("Seats", specs.seats.to_string()),
        field_line("Mileage", specs.mileage.clone()),
    ];
    f.render_widget(Paragraph::new(spec_lines).block(panel("Specifications", false)), bottom[0]);

    let owner = &vehicle.owner;
    let (verified_text, verified_color) = if owner.verified {
        ("✓ Verified", success())
    } else {
        ("Unverified", text_dim())
    };
    let owner_lines = vec![
        Line::from(vec![
            Span::styled(owner.name.as_str(), Style::default().fg(text()).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  ★ {}  ", owner.rating), Style::default().fg(rating())),
            Span::styled(verified_text, Style::default().fg(verified_color)),
        ]),
        Line::from(vec![
            Span::styled("c ", Style::default().fg(accent())),
            Span::styled(owner.phone.as_str(), Style::default().fg(text())),
        ]),
        Line::from(vec![
            Span::styled("e ", Style::default().fg(accent())),
            Span::styled(owner.email.as_str(), Style::default().fg(text())),
        ]),
    ];
    f.render_widget(Paragraph::new(owner_lines).block(panel("Owner", false)), bottom[1]);
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(text_dim())),
        Span::styled(value, Style::default().fg(text())),
    ])
}

fn date_input(label: &str, value: &str, min: String, focused: bool) -> Vec<Line<'static>> {
    let (shown, style) = if value.is_empty() {
        ("YYYY-MM-DD".to_string(), Style::default().fg(inactive()))
    } else {
        (value.to_string(), Style::default().fg(text()))
    };
    let cursor = if focused { "_" } else { " " };
    let bracket = if focused { accent_bright() } else { inactive() };
    let field_style = if focused { style.bg(bg_selected()) } else { style };

    vec![
        Line::from(vec![
            Span::styled(label.to_string(), Style::default().fg(header())),
            Span::styled(format!("  min {}", min), Style::default().fg(inactive())),
        ]),
        Line::from(vec![
            Span::styled("[ ", Style::default().fg(bracket)),
            Span::styled(format!("{}{}", shown, cursor), field_style),
            Span::styled(" ]", Style::default().fg(bracket)),
        ]),
    ]
}

fn draw_booking_sidebar(f: &mut Frame, app: &App, vehicle: &Vehicle, area: Rect) {
    let today = App::today();
    let form = &app.booking;
    let price = app.config.money(u64::from(vehicle.price));

    let mut lines = vec![
        Line::from(Span::styled(price, Style::default().fg(accent()).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("per day", Style::default().fg(text_dim()))),
        Line::from(""),
    ];

    lines.extend(date_input(
        "Start Date",
        &form.start_date,
        form.min_start(today).to_string(),
        form.focus == FormField::StartDate,
    ));
    lines.push(Line::from(""));
    lines.extend(date_input(
        "End Date",
        &form.end_date,
        form.min_end(today).to_string(),
        form.focus == FormField::EndDate,
    ));
    lines.push(Line::from(""));

    // Estimate, or why there is none yet
    match (app.current_quote(), form.window(today)) {
        (Some(quote), _) => {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} × {} day(s) = ", app.config.money(u64::from(quote.daily_price)), quote.days),
                    Style::default().fg(text_dim()),
                ),
                Span::styled(
                    app.config.money(quote.total),
                    Style::default().fg(text()).add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        (None, Err(e)) if !form.start_date.is_empty() && !form.end_date.is_empty() => {
            lines.push(Line::from(Span::styled(e.to_string(), Style::default().fg(danger()))));
        }
        _ => lines.push(Line::from("")),
    }

    let availability = &vehicle.availability;
    lines.push(if availability.available {
        Line::from(Span::styled("● Available", Style::default().fg(success())))
    } else {
        Line::from(Span::styled(
            format!("● Unavailable, next {}", availability.next_available),
            Style::default().fg(danger()),
        ))
    });
    lines.push(Line::from(""));

    let enabled = app.can_book();
    let focused = form.focus == FormField::BookNow;
    let mut button_style = if enabled {
        Style::default().fg(text()).bg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive()).add_modifier(Modifier::DIM)
    };
    if focused {
        button_style = button_style.add_modifier(Modifier::REVERSED);
    }
    lines.push(Line::from(Span::styled("   Book Now   ", button_style)));

    if app.user.is_none() {
        lines.push(Line::from(Span::styled("Login required to book", Style::default().fg(text_dim()))));
    }

    let sidebar = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel("Book", true));
    f.render_widget(sidebar, area);
}
