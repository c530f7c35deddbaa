//! Trailing-year window arithmetic

use chrono::{Days, NaiveDate};

use crate::StorageError;

/// Length of the "last 12 months" window, in calendar days.
pub const WINDOW_DAYS: u64 = 365;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Return the date `WINDOW_DAYS` days before `most_recent`, as `YYYY-MM-DD`.
///
/// Leap days are not special-cased: the window is always exactly 365 days.
pub fn one_year_before(most_recent: &str) -> Result<String, StorageError> {
    let date = NaiveDate::parse_from_str(most_recent, DATE_FORMAT)
        .map_err(|_| StorageError::InvalidDate(most_recent.to_string()))?;

    date.checked_sub_days(Days::new(WINDOW_DAYS))
        .map(|d| d.format(DATE_FORMAT).to_string())
        .ok_or_else(|| StorageError::InvalidDate(most_recent.to_string()))
}
