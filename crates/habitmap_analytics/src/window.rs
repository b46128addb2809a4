//! Calendar-day windows and date-key normalization.
//!
//! Logs are keyed by calendar day, not timestamp: two dates on the same
//! calendar day must produce the same key, and window membership is decided
//! by day-key equality only.

use crate::error::{AnalyticsError, AnalyticsResult};
use chrono::NaiveDate;

/// A bounded, consecutive sequence of calendar days, trailing and inclusive
/// of its end day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    end: NaiveDate,
    length: i64, // positive by construction
}

impl Window {
    /// The conventional trailing window used across the dashboard.
    pub const DEFAULT_LENGTH: i64 = 30;

    /// A window of `length` days ending at (and including) `end`.
    pub fn trailing(end: NaiveDate, length: i64) -> AnalyticsResult<Self> {
        if length <= 0 {
            return Err(AnalyticsError::InvalidWindow(length));
        }
        Ok(Self { end, length })
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start(&self) -> NaiveDate {
        self.end - chrono::Duration::days(self.length - 1)
    }

    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end
    }

    /// Every day in the window, oldest first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.start();
        (0..self.length).map(move |offset| start + chrono::Duration::days(offset))
    }
}

/// Ordered calendar-day sequence of `length` days ending at `end`, oldest
/// first, inclusive of `end`.
pub fn days_in_window(end: NaiveDate, length: i64) -> AnalyticsResult<Vec<NaiveDate>> {
    Ok(Window::trailing(end, length)?.days().collect())
}

/// Canonical `YYYY-MM-DD` key for a calendar day.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a boundary date string to a calendar day.
///
/// Accepts:
/// - YYYY-MM-DD (the canonical key)
/// - RFC3339 datetime (extracts date)
/// - Naive datetime YYYY-MM-DDTHH:MM:SS (extracts date)
pub fn parse_date_key(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(ndt.date());
    }
    None
}
