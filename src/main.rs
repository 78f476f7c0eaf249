mod app;
mod booking;
mod catalog;
mod config;
mod contact;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup, User};
use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "autox")]
#[command(version = "0.1.0")]
#[command(about = "Auto X - browse rental vehicles and estimate bookings from the terminal")]
struct Args {
    /// Open the detail view of a vehicle on startup
    #[arg(short, long, value_name = "ID")]
    vehicle: Option<u32>,

    /// Start logged in as this user
    #[arg(short, long, value_name = "NAME")]
    user: Option<String>,

    /// Print a vehicle record as JSON
    #[arg(long, value_name = "ID")]
    show: Option<u32>,

    /// Print a price quote as JSON for a vehicle (needs --start and --end)
    #[arg(long, value_name = "ID")]
    quote: Option<u32>,

    /// Rental start date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// Rental end date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let config = AppConfig::load().unwrap_or_default();

    // Handle CLI-only commands
    if let Some(id) = args.show {
        return print_vehicle(id, &config).await;
    }

    if let Some(id) = args.quote {
        let (Some(start), Some(end)) = (&args.start, &args.end) else {
            anyhow::bail!("--quote needs both --start and --end");
        };
        return print_quote(id, start, end);
    }

    run_tui(config, args.vehicle, args.user).await
}

/// The TUI owns the terminal, so logs go to a file in the cache directory
fn init_logging() {
    let log_file = dirs::cache_dir()
        .map(|d| d.join("autox"))
        .and_then(|dir| {
            fs::create_dir_all(&dir).ok()?;
            File::options().create(true).append(true).open(dir.join("autox.log")).ok()
        });

    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::from_default_env());
    match log_file {
        Some(file) => registry
            .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .init(),
    }
}

async fn print_vehicle(id: u32, config: &AppConfig) -> Result<()> {
    let vehicle = catalog::fetch_vehicle(id, config.fetch_delay())
        .await
        .ok_or_else(|| anyhow::anyhow!("Vehicle {} not found", id))?;
    println!("{}", serde_json::to_string_pretty(&vehicle)?);
    Ok(())
}

fn print_quote(id: u32, start: &str, end: &str) -> Result<()> {
    let vehicle = catalog::find(id).ok_or_else(|| anyhow::anyhow!("Vehicle {} not found", id))?;
    let form = booking::BookingForm {
        start_date: start.to_string(),
        end_date: end.to_string(),
        ..Default::default()
    };
    let window = form.window(App::today())?;
    let quote = booking::quote(vehicle.price, &window);

    let output = serde_json::json!({
        "vehicle": vehicle.id,
        "name": vehicle.name,
        "start": window.start,
        "end": window.end,
        "days": quote.days,
        "daily_price": quote.daily_price,
        "total": quote.total,
        "available": vehicle.availability.available,
        "next_available": vehicle.availability.next_available,
    });
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

async fn run_tui(config: AppConfig, vehicle: Option<u32>, user: Option<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    if let Some(name) = user.filter(|n| !n.trim().is_empty()) {
        app.user = Some(User { name: name.trim().to_string() });
    }
    if let Some(id) = vehicle {
        app.open_vehicle(id);
    }

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Show errors in the info line instead of bailing out
                            if let Err(e) = app.handle_key(key).await {
                                tracing::warn!("Key handling failed: {}", e);
                                app.set_status(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        app.tick();
    }
}

fn notify(summary: &str, body: &str) -> Result<()> {
    notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .icon("x-office-calendar")
        .show()?;
    Ok(())
}
