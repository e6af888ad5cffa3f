//! Calendar gate for the backdrop.
//!
//! Dates are compared as formatted strings, so `2024/1/1` never matches
//! `2024/01/01`. [`ActivationDates::validate`] is available to reject such
//! entries up front when they come from a settings file.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{BackdropError, BackdropResult};

/// `YYYY/MM/dd` with the calendar year.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Source of "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Allow-list of days on which the backdrop is shown. Empty means every day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationDates(Vec<String>);

impl ActivationDates {
    pub fn new<I, S>(dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(dates.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, date: &str) -> bool {
        self.0.iter().any(|d| d == date)
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.is_empty() || self.contains(&format_date(date))
    }

    /// Ensures every entry is a real date written exactly as [`DATE_FORMAT`] prints it.
    pub fn validate(&self) -> BackdropResult<()> {
        for date in &self.0 {
            match NaiveDate::parse_from_str(date, DATE_FORMAT) {
                Ok(parsed) if format_date(parsed) == *date => {}
                _ => return Err(BackdropError::InvalidActivationDate { date: date.clone() }),
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for ActivationDates {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_date(day(2024, 1, 1)), "2024/01/01");
        assert_eq!(format_date(day(2025, 12, 31)), "2025/12/31");
    }

    #[test]
    fn uses_calendar_year_around_new_year() {
        // 2024/12/30 already belongs to ISO week 1 of 2025.
        assert_eq!(format_date(day(2024, 12, 30)), "2024/12/30");
    }

    #[test]
    fn empty_list_is_always_active() {
        let dates = ActivationDates::default();
        assert!(dates.is_active_on(day(1999, 3, 7)));
        assert!(dates.is_active_on(day(2024, 1, 2)));
    }

    #[test]
    fn matches_exact_strings_only() {
        let dates = ActivationDates::new(["2024/01/01", "2024/1/2"]);
        assert!(dates.is_active_on(day(2024, 1, 1)));
        assert!(!dates.is_active_on(day(2024, 1, 2)));
    }

    #[test]
    fn validate_rejects_unpadded_and_impossible_dates() {
        assert!(ActivationDates::new(["2024/02/29"]).validate().is_ok());
        assert!(ActivationDates::new(["2024/1/2"]).validate().is_err());
        assert!(ActivationDates::new(["2023/02/29"]).validate().is_err());
        assert!(ActivationDates::new(["2024-01-01"]).validate().is_err());
    }
}
