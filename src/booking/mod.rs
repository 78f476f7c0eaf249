//! Booking window selection and the client-side price estimate.
//!
//! Dates are entered as ISO `YYYY-MM-DD` text. Nothing is reserved; a
//! "booking" is only ever an estimate handed back to the caller.

use chrono::{Duration, NaiveDate};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const MAX_DATE_LEN: usize = 10;

/// Latest date that still fits the four-digit-year field
fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("start date is required")]
    MissingStart,
    #[error("end date is required")]
    MissingEnd,
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("start date {start} is before today ({today})")]
    StartInPast { start: NaiveDate, today: NaiveDate },
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("rental must span at least one day")]
    EmptyWindow,
    #[error("vehicle is not available")]
    Unavailable,
}

/// Parse an ISO date as typed into a date field
pub fn parse_date(s: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| BookingError::InvalidDate(s.to_string()))
}

/// Number of rental days between two dates, rounded up.
///
/// Both dates are taken at midnight, so this is the calendar-day difference.
/// Negative spans round toward zero the same way `ceil` does.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let ms = (end - start).num_milliseconds();
    if ms >= 0 {
        (ms + DAY_MS - 1) / DAY_MS
    } else {
        -(-ms / DAY_MS)
    }
}

/// A validated start/end pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BookingWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BookingError> {
        if end < start {
            return Err(BookingError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn days(&self) -> u32 {
        duration_days(self.start, self.end) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub days: u32,
    pub daily_price: u32,
    pub total: u64,
}

pub fn quote(daily_price: u32, window: &BookingWindow) -> Quote {
    let days = window.days();
    Quote {
        days,
        daily_price,
        total: u64::from(daily_price) * u64::from(days),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    StartDate,
    EndDate,
    BookNow,
}

/// The booking sidebar's editable state
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub start_date: String,
    pub end_date: String,
    pub focus: FormField,
}

impl BookingForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::StartDate => FormField::EndDate,
            FormField::EndDate => FormField::BookNow,
            FormField::BookNow => FormField::StartDate,
        };
    }

    pub fn prev_field(&mut self) {
        self.focus = match self.focus {
            FormField::StartDate => FormField::BookNow,
            FormField::EndDate => FormField::StartDate,
            FormField::BookNow => FormField::EndDate,
        };
    }

    fn focused_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::StartDate => Some(&mut self.start_date),
            FormField::EndDate => Some(&mut self.end_date),
            FormField::BookNow => None,
        }
    }

    /// Type a character into the focused date field. Returns false if the
    /// character was rejected.
    pub fn push_char(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || c == '-') {
            return false;
        }
        match self.focused_mut() {
            Some(field) if field.len() < MAX_DATE_LEN => {
                field.push(c);
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.pop();
        }
    }

    /// Earliest date the start field accepts
    pub fn min_start(&self, today: NaiveDate) -> NaiveDate {
        today
    }

    /// Earliest date the end field accepts: the start date if one is set
    pub fn min_end(&self, today: NaiveDate) -> NaiveDate {
        parse_date(&self.start_date)
            .ok()
            .filter(|d| *d >= today)
            .unwrap_or(today)
    }

    /// Move the focused date by `delta` days, never below the field's minimum.
    /// An empty or unparseable field starts at its minimum.
    pub fn step(&mut self, delta: i64, today: NaiveDate) {
        let min = match self.focus {
            FormField::StartDate => self.min_start(today),
            FormField::EndDate => self.min_end(today),
            FormField::BookNow => return,
        };
        let Some(field) = self.focused_mut() else {
            return;
        };
        let next = match parse_date(field) {
            Ok(current) => current
                .checked_add_signed(Duration::days(delta))
                .unwrap_or(current)
                .clamp(min, max_date().max(min)),
            Err(_) => min,
        };
        *field = next.format(DATE_FORMAT).to_string();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate the typed dates against today's date
    pub fn window(&self, today: NaiveDate) -> Result<BookingWindow, BookingError> {
        if self.start_date.trim().is_empty() {
            return Err(BookingError::MissingStart);
        }
        if self.end_date.trim().is_empty() {
            return Err(BookingError::MissingEnd);
        }
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        if start < today {
            return Err(BookingError::StartInPast { start, today });
        }
        BookingWindow::new(start, end)
    }

    /// Everything "Book Now" needs: a valid, non-empty window on an
    /// available vehicle
    pub fn validate(&self, available: bool, today: NaiveDate) -> Result<BookingWindow, BookingError> {
        let window = self.window(today)?;
        if !available {
            return Err(BookingError::Unavailable);
        }
        if window.days() == 0 {
            return Err(BookingError::EmptyWindow);
        }
        Ok(window)
    }

    pub fn can_book(&self, available: bool, today: NaiveDate) -> bool {
        self.validate(available, today).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn form(start: &str, end: &str) -> BookingForm {
        BookingForm {
            start_date: start.to_string(),
            end_date: end.to_string(),
            focus: FormField::StartDate,
        }
    }

    #[test]
    fn test_duration_is_calendar_day_difference() {
        assert_eq!(duration_days(date("2024-03-01"), date("2024-03-04")), 3);
        assert_eq!(duration_days(date("2024-02-28"), date("2024-03-01")), 2); // leap year
        assert_eq!(duration_days(date("2023-12-31"), date("2024-01-01")), 1);
        assert_eq!(duration_days(date("2024-05-05"), date("2024-05-05")), 0);
        assert_eq!(duration_days(date("2024-05-05"), date("2024-05-02")), -3);
    }

    #[test]
    fn test_total_is_price_times_days() {
        let window = BookingWindow::new(date("2024-06-10"), date("2024-06-15")).unwrap();
        let q = quote(45, &window);
        assert_eq!(q.days, 5);
        assert_eq!(q.total, 225);

        let same_day = BookingWindow::new(date("2024-06-10"), date("2024-06-10")).unwrap();
        assert_eq!(quote(95, &same_day).total, 0);
    }

    #[test]
    fn test_booking_disabled_without_dates_or_availability() {
        let today = date("2024-01-01");

        assert!(!form("", "").can_book(true, today));
        assert!(!form("2024-01-02", "").can_book(true, today));
        assert!(!form("", "2024-01-05").can_book(true, today));
        assert!(!form("2024-01-02", "2024-01-05").can_book(false, today));
        assert!(form("2024-01-02", "2024-01-05").can_book(true, today));
    }

    #[test]
    fn test_window_validation_errors() {
        let today = date("2024-01-10");

        assert_eq!(form("", "2024-01-12").window(today), Err(BookingError::MissingStart));
        assert_eq!(form("2024-01-12", " ").window(today), Err(BookingError::MissingEnd));
        assert_eq!(
            form("2024-13-01", "2024-01-12").window(today),
            Err(BookingError::InvalidDate("2024-13-01".to_string()))
        );
        assert!(matches!(
            form("2024-01-09", "2024-01-12").window(today),
            Err(BookingError::StartInPast { .. })
        ));
        assert!(matches!(
            form("2024-01-12", "2024-01-11").window(today),
            Err(BookingError::EndBeforeStart { .. })
        ));
        assert_eq!(
            form("2024-01-12", "2024-01-12").validate(true, today),
            Err(BookingError::EmptyWindow)
        );
    }

    #[test]
    fn test_date_input_filters_characters() {
        let mut f = BookingForm::default();
        for c in "2024-0a1-15x9".chars() {
            f.push_char(c);
        }
        assert_eq!(f.start_date, "2024-01-15");

        f.backspace();
        assert_eq!(f.start_date, "2024-01-1");

        f.focus = FormField::BookNow;
        assert!(!f.push_char('1'));
    }

    #[test]
    fn test_step_respects_minimums() {
        let today = date("2024-01-10");
        let mut f = BookingForm::default();

        f.step(1, today);
        assert_eq!(f.start_date, "2024-01-10");
        f.step(2, today);
        assert_eq!(f.start_date, "2024-01-12");
        f.step(-5, today);
        assert_eq!(f.start_date, "2024-01-10");

        f.start_date = "2024-01-20".to_string();
        f.next_field();
        f.step(1, today);
        assert_eq!(f.end_date, "2024-01-20");
        f.step(3, today);
        assert_eq!(f.end_date, "2024-01-23");
    }

    #[test]
    fn test_step_stays_within_four_digit_years() {
        let today = date("2024-01-10");
        let mut f = BookingForm {
            start_date: "9999-12-31".to_string(),
            ..Default::default()
        };

        f.step(1, today);
        assert_eq!(f.start_date, "9999-12-31");
        assert!(f.start_date.len() <= MAX_DATE_LEN);

        f.step(-1, today);
        assert_eq!(f.start_date, "9999-12-30");
    }

    #[test]
    fn test_focus_cycles() {
        let mut f = BookingForm::default();
        f.next_field();
        f.next_field();
        assert_eq!(f.focus, FormField::BookNow);
        f.next_field();
        assert_eq!(f.focus, FormField::StartDate);
        f.prev_field();
        assert_eq!(f.focus, FormField::BookNow);
    }
}
