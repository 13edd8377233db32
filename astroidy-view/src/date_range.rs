use astroidy_common::DATE_FORMAT;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use thiserror::Error;

/// Longest window the feed serves, counted in calendar days inclusive
pub const MAX_RANGE_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Please select both a start and an end date.")]
    Incomplete,

    #[error("The end date must not be before the start date.")]
    Reversed,

    #[error("The maximum date range is 7 days.")]
    TooLong { days: i64 },
}

/// A validated `start..=end` window of at most [`MAX_RANGE_DAYS`] days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn single_day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// Today as a one-day window; the feed's calendar is UTC
    pub fn today() -> Self {
        Self::utc_day(Utc::now())
    }

    /// The UTC calendar day containing `instant`
    pub fn utc_day(instant: DateTime<Utc>) -> Self {
        Self::single_day(instant.date_naive())
    }

    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::Reversed);
        }

        let range = Self { start, end };
        let days = range.days();
        if days > MAX_RANGE_DAYS {
            return Err(RangeError::TooLong { days });
        }
        Ok(range)
    }

    /// Validate a picker selection where either end may still be unset
    pub fn from_parts(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, RangeError> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Err(RangeError::Incomplete),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_param(), self.end_param())
    }
}
