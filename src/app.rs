use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::booking::{self, BookingForm, BookingWindow, FormField, Quote};
use crate::catalog::{self, Vehicle, VehicleSummary};
use crate::config::AppConfig;
use crate::contact::{self, ContactKind};

/// Seconds a status message stays in the info line
const STATUS_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Vehicles,
    Services,
    Materials,
    VehicleDetails,
}

impl View {
    /// Entries of the header navigation, in display order
    pub const NAV: [View; 3] = [View::Vehicles, View::Services, View::Materials];

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Vehicles => "Vehicles",
            View::Services => "Services",
            View::Materials => "Materials",
            View::VehicleDetails => "Vehicle",
        }
    }

    /// Whether this nav entry should be highlighted while `current` is shown
    pub fn is_active(self, current: View) -> bool {
        self == current || (self == View::Vehicles && current == View::VehicleDetails)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Menu,
    Login,
    SignUp,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Box<Vehicle>),
    NotFound,
}

/// What "Book Now" produced. Nothing is reserved anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub vehicle_id: u32,
    pub user: String,
    pub window: BookingWindow,
    pub quote: Quote,
}

struct FetchResult {
    seq: u64,
    vehicle: Option<Vehicle>,
}

pub struct App {
    pub config: AppConfig,
    pub view: View,
    pub popup: Popup,
    pub menu_selected: usize,

    pub user: Option<User>,
    pub input_buffer: String,       // Name typed into the login/sign-up prompt

    // Listing
    pub listings: Vec<VehicleSummary>,
    pub selected_vehicle: usize,

    // Detail view
    pub detail: DetailState,
    pub booking: BookingForm,
    pub last_booking: Option<BookingRequest>,

    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    // Mock fetches report back here; only the latest sequence number is kept
    fetch_tx: UnboundedSender<FetchResult>,
    fetch_rx: UnboundedReceiver<FetchResult>,
    fetch_seq: u64,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();

        Self {
            view: config.start_view.into(),
            config,
            popup: Popup::None,
            menu_selected: 0,

            user: None,
            input_buffer: String::new(),

            listings: catalog::listings(),
            selected_vehicle: 0,

            detail: DetailState::Loading,
            booking: BookingForm::default(),
            last_booking: None,

            status_message: None,
            status_message_time: None,

            fetch_tx,
            fetch_rx,
            fetch_seq: 0,
        }
    }

    pub fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    pub fn is_menu_open(&self) -> bool {
        self.popup == Popup::Menu
    }

    /// Set a status message (auto-clears after a few seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// The loaded vehicle, if the detail view has one
    pub fn vehicle(&self) -> Option<&Vehicle> {
        match &self.detail {
            DetailState::Loaded(v) if self.view == View::VehicleDetails => Some(&**v),
            _ => None,
        }
    }

    /// Whether the "Book Now" button is enabled
    pub fn can_book(&self) -> bool {
        self.vehicle()
            .map(|v| self.booking.can_book(v.availability.available, Self::today()))
            .unwrap_or(false)
    }

    /// Estimate for the currently typed window, if it is valid
    pub fn current_quote(&self) -> Option<Quote> {
        let vehicle = self.vehicle()?;
        let window = self.booking.window(Self::today()).ok()?;
        Some(booking::quote(vehicle.price, &window))
    }

    // Header callbacks

    pub fn on_navigate(&mut self, view: View) {
        tracing::debug!("Navigate to {:?}", view);
        self.view = view;
    }

    pub fn on_home_navigate(&mut self) {
        self.on_navigate(View::Home);
    }

    pub fn on_menu_click(&mut self) {
        self.popup = if self.is_menu_open() {
            Popup::None
        } else {
            self.menu_selected = View::NAV
                .iter()
                .position(|v| v.is_active(self.view))
                .unwrap_or(0);
            Popup::Menu
        };
    }

    pub fn on_show_login(&mut self) {
        self.input_buffer.clear();
        self.popup = Popup::Login;
    }

    pub fn on_show_sign_up(&mut self) {
        self.input_buffer.clear();
        self.popup = Popup::SignUp;
    }

    pub fn on_logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("{} logged out", user.name);
            self.set_status("Logged out");
        }
    }

    fn submit_credentials(&mut self) {
        let name = self.input_buffer.trim().to_string();
        if name.is_empty() {
            self.set_status("Enter a name to continue");
            return;
        }

        let verb = if self.popup == Popup::SignUp { "Signed up" } else { "Logged in" };
        tracing::info!("{} as {}", verb, name);
        self.set_status(format!("{} as {}", verb, name));
        self.user = Some(User { name });
        self.input_buffer.clear();
        self.popup = Popup::None;
    }

    // Detail view

    /// Enter the detail view and start the simulated lookup
    pub fn open_vehicle(&mut self, id: u32) {
        self.fetch_seq += 1;
        let seq = self.fetch_seq;

        self.view = View::VehicleDetails;
        self.detail = DetailState::Loading;
        self.booking.clear();

        let tx = self.fetch_tx.clone();
        let delay = self.config.fetch_delay();
        tokio::spawn(async move {
            let vehicle = catalog::fetch_vehicle(id, delay).await;
            // Receiver only goes away on shutdown
            let _ = tx.send(FetchResult { seq, vehicle });
        });
    }

    pub fn on_back(&mut self) {
        self.booking.clear();
        self.view = View::Vehicles;
    }

    pub fn handle_booking(&mut self) {
        let Some(vehicle) = self.vehicle() else {
            return;
        };
        let vehicle_id = vehicle.id;
        let vehicle_name = vehicle.name.clone();
        let price = vehicle.price;

        let window = match self.booking.validate(vehicle.availability.available, Self::today()) {
            Ok(window) => window,
            Err(e) => {
                self.set_status(format!("Cannot book: {}", e));
                return;
            }
        };

        let Some(user) = self.user.clone() else {
            self.on_show_login();
            self.set_status("Log in to book this vehicle");
            return;
        };

        let quote = booking::quote(price, &window);
        tracing::info!(
            vehicle_id,
            user = %user.name,
            start = %window.start,
            end = %window.end,
            days = quote.days,
            total = quote.total,
            "Booking vehicle"
        );

        let summary = format!(
            "Booking requested: {} for {} day(s), {}",
            vehicle_name,
            quote.days,
            self.config.money(quote.total)
        );
        if self.config.notifications {
            if let Err(e) = crate::notify("Auto X", &summary) {
                tracing::warn!("Notification failed: {}", e);
            }
        }
        self.set_status(summary);
        self.last_booking = Some(BookingRequest {
            vehicle_id,
            user: user.name,
            window,
            quote,
        });
    }

    pub async fn contact_owner(&mut self, kind: ContactKind) -> Result<()> {
        let Some(vehicle) = self.vehicle() else {
            return Ok(());
        };
        let uri = contact::owner_uri(&vehicle.owner, kind);
        let owner = vehicle.owner.name.clone();

        tracing::info!("Opening {}", uri);
        contact::open_uri(&uri).await?;
        self.set_status(format!("Contacting {}", owner));
        Ok(())
    }

    // Input

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup != Popup::None {
            self.handle_popup_key(key);
            return Ok(());
        }

        if self.view == View::VehicleDetails {
            if let Some(result) = self.handle_detail_key(key).await {
                return result;
            }
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                let current = View::NAV.iter().position(|v| v.is_active(self.view));
                let len = View::NAV.len();
                let next = match (current, key.code) {
                    (None, _) => 0,
                    (Some(i), KeyCode::Tab) => (i + 1) % len,
                    (Some(i), _) => (i + len - 1) % len,
                };
                self.on_navigate(View::NAV[next]);
            }
            KeyCode::Char('1') => self.on_navigate(View::Vehicles),
            KeyCode::Char('2') => self.on_navigate(View::Services),
            KeyCode::Char('3') => self.on_navigate(View::Materials),
            KeyCode::Char('g') | KeyCode::Home => self.on_home_navigate(),
            KeyCode::Char('m') => self.on_menu_click(),

            KeyCode::Char('l') if self.user.is_none() => self.on_show_login(),
            KeyCode::Char('s') if self.user.is_none() => self.on_show_sign_up(),
            KeyCode::Char('o') => self.on_logout(),

            KeyCode::Char('j') | KeyCode::Down if self.view == View::Vehicles => {
                if !self.listings.is_empty() {
                    self.selected_vehicle = (self.selected_vehicle + 1) % self.listings.len();
                }
            }
            KeyCode::Char('k') | KeyCode::Up if self.view == View::Vehicles => {
                if !self.listings.is_empty() {
                    self.selected_vehicle = self
                        .selected_vehicle
                        .checked_sub(1)
                        .unwrap_or(self.listings.len() - 1);
                }
            }
            KeyCode::Enter if self.view == View::Vehicles => {
                if let Some(id) = self.listings.get(self.selected_vehicle).map(|v| v.id) {
                    self.open_vehicle(id);
                }
            }
            KeyCode::Enter if self.view == View::Home => self.on_navigate(View::Vehicles),

            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,
            _ => {}
        }
        Ok(())
    }

    /// Keys owned by the detail view. `None` means fall through to the
    /// global bindings.
    async fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Result<()>> {
        let not_found = self.detail == DetailState::NotFound;
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('b')) || (not_found && key.code == KeyCode::Enter) {
            self.on_back();
            return Some(Ok(()));
        }
        if !matches!(self.detail, DetailState::Loaded(_)) {
            return None;
        }

        let editing = matches!(self.booking.focus, FormField::StartDate | FormField::EndDate);
        match key.code {
            KeyCode::Tab => self.booking.next_field(),
            KeyCode::BackTab => self.booking.prev_field(),
            KeyCode::Up if editing => self.booking.step(1, Self::today()),
            KeyCode::Down if editing => self.booking.step(-1, Self::today()),
            KeyCode::Backspace if editing => self.booking.backspace(),
            KeyCode::Char(c) if editing && (c.is_ascii_digit() || c == '-') => {
                self.booking.push_char(c);
            }
            KeyCode::Enter if editing => self.booking.next_field(),
            KeyCode::Enter => self.handle_booking(),
            KeyCode::Char('c') => return Some(self.contact_owner(ContactKind::Phone).await),
            KeyCode::Char('e') => return Some(self.contact_owner(ContactKind::Email).await),
            _ => return None,
        }
        Some(Ok(()))
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        match self.popup {
            Popup::Menu => match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    self.menu_selected = (self.menu_selected + 1) % View::NAV.len();
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.menu_selected = self.menu_selected.checked_sub(1).unwrap_or(View::NAV.len() - 1);
                }
                KeyCode::Enter => {
                    self.on_navigate(View::NAV[self.menu_selected]);
                    self.on_menu_click();
                }
                KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => self.on_menu_click(),
                _ => {}
            },
            Popup::Login | Popup::SignUp => match key.code {
                KeyCode::Enter => self.submit_credentials(),
                KeyCode::Esc => {
                    self.input_buffer.clear();
                    self.popup = Popup::None;
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) if !c.is_control() && self.input_buffer.len() < 32 => {
                    self.input_buffer.push(c);
                }
                _ => {}
            },
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
            }
            Popup::None => {}
        }
    }

    /// Apply finished fetches and expire the status message
    pub fn tick(&mut self) {
        while let Ok(result) = self.fetch_rx.try_recv() {
            if result.seq != self.fetch_seq || self.view != View::VehicleDetails {
                tracing::debug!("Dropping stale vehicle fetch #{}", result.seq);
                continue;
            }
            self.detail = match result.vehicle {
                Some(vehicle) => DetailState::Loaded(Box::new(vehicle)),
                None => DetailState::NotFound,
            };
        }

        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_TIMEOUT_SECS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as Days;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn test_app() -> App {
        App::new(AppConfig {
            fetch_delay_ms: 0,
            ..AppConfig::default()
        })
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Tick until the pending fetch lands
    async fn settle(app: &mut App) {
        for _ in 0..100 {
            app.tick();
            if app.detail != DetailState::Loading {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("vehicle fetch never completed");
    }

    fn iso(d: NaiveDate) -> String {
        d.format("%Y-%m-%d").to_string()
    }

    #[tokio::test]
    async fn test_menu_navigates_and_closes() {
        let mut app = test_app();
        assert_eq!(app.view, View::Home);

        app.handle_key(key(KeyCode::Char('m'))).await.unwrap();
        assert!(app.is_menu_open());

        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.view, View::Services);
        assert!(!app.is_menu_open());
    }

    #[tokio::test]
    async fn test_tab_cycles_nav_entries() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.view, View::Vehicles);
        app.handle_key(key(KeyCode::BackTab)).await.unwrap();
        assert_eq!(app.view, View::Materials);
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let mut app = test_app();

        app.handle_key(key(KeyCode::Char('l'))).await.unwrap();
        assert_eq!(app.popup, Popup::Login);
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.popup, Popup::Login, "empty name is rejected");

        type_str(&mut app, "Dana").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.user, Some(User { name: "Dana".to_string() }));
        assert_eq!(app.popup, Popup::None);

        app.handle_key(key(KeyCode::Char('o'))).await.unwrap();
        assert!(app.user.is_none());
    }

    #[tokio::test]
    async fn test_unknown_vehicle_is_not_found() {
        let mut app = test_app();
        app.open_vehicle(9999);
        assert_eq!(app.detail, DetailState::Loading);

        settle(&mut app).await;
        assert_eq!(app.detail, DetailState::NotFound);
        assert!(app.vehicle().is_none());

        // "Go Back"
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.view, View::Vehicles);
    }

    #[tokio::test]
    async fn test_stale_fetch_is_dropped() {
        let mut app = test_app();
        app.open_vehicle(1);
        app.open_vehicle(3);
        settle(&mut app).await;
        assert_eq!(app.vehicle().map(|v| v.id), Some(3));

        app.open_vehicle(1);
        app.on_back();
        tokio::time::sleep(Duration::from_millis(20)).await;
        app.tick();
        assert_eq!(app.view, View::Vehicles);
        assert_eq!(app.detail, DetailState::Loading);
    }

    #[tokio::test]
    async fn test_listing_enter_opens_selected_vehicle() {
        let mut app = test_app();
        app.on_navigate(View::Vehicles);
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        settle(&mut app).await;

        assert_eq!(app.vehicle().map(|v| v.id), Some(app.listings[1].id));
    }

    #[tokio::test]
    async fn test_booking_requires_login_then_books() {
        let mut app = test_app();
        app.open_vehicle(1);
        settle(&mut app).await;

        let start = App::today() + Days::days(1);
        let end = start + Days::days(3);

        assert!(!app.can_book());
        type_str(&mut app, &iso(start)).await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_str(&mut app, &iso(end)).await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.booking.focus, FormField::BookNow);
        assert!(app.can_book());

        let quote = app.current_quote().unwrap();
        assert_eq!(quote.days, 3);
        assert_eq!(quote.total, 3 * 45);

        // Not logged in: redirected to the login prompt, nothing booked
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.popup, Popup::Login);
        assert!(app.last_booking.is_none());

        type_str(&mut app, "Sam").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        let request = app.last_booking.clone().expect("booking recorded");
        assert_eq!(request.vehicle_id, 1);
        assert_eq!(request.user, "Sam");
        assert_eq!(request.quote.total, 135);
    }

    #[tokio::test]
    async fn test_disabled_booking_reports_reason_without_login_prompt() {
        let mut app = test_app();
        app.open_vehicle(1);
        settle(&mut app).await;

        app.booking.focus = FormField::BookNow;
        assert!(!app.can_book());
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.popup, Popup::None);
        assert!(app.last_booking.is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Cannot book: start date is required")
        );
    }

    #[test]
    fn test_status_message_expires() {
        let mut app = test_app();
        app.set_status("Logged in as Dana");
        app.tick();
        assert!(app.status_message.is_some(), "fresh message stays");

        app.status_message_time = Instant::now().checked_sub(Duration::from_secs(STATUS_TIMEOUT_SECS + 1));
        assert!(app.status_message_time.is_some());
        app.tick();
        assert!(app.status_message.is_none());
        assert!(app.status_message_time.is_none());
    }

    #[tokio::test]
    async fn test_unavailable_vehicle_cannot_be_booked() {
        let mut app = test_app();
        app.user = Some(User { name: "Sam".to_string() });
        app.open_vehicle(2);
        settle(&mut app).await;

        let start = App::today() + Days::days(1);
        app.booking.start_date = iso(start);
        app.booking.end_date = iso(start + Days::days(2));
        app.booking.focus = FormField::BookNow;

        assert!(!app.can_book());
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.last_booking.is_none());
        assert!(app.status_message.as_deref().unwrap_or("").contains("not available"));
    }
}
