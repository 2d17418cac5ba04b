//! Monday-to-Sunday week windows.

use std::fmt;

use chrono::{Datelike, Duration, Local, Month, NaiveDate};

use crate::error::{BirthdayError, BirthdayResult, Boundary};
use crate::month::month_of;

/// Fixed-width reference date format accepted from callers.
pub const REFERENCE_DATE_FORMAT: &str = "%m-%d-%Y";

/// The seven days from a Monday through the following Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The week containing `reference`.
pub fn week_range(reference: NaiveDate) -> WeekWindow {
    let offset = reference.weekday().num_days_from_monday();
    let start = reference - Duration::days(i64::from(offset));
    WeekWindow {
        start,
        end: start + Duration::days(6),
    }
}

/// Parse an `MM-DD-YYYY` date.
pub fn parse_reference_date(s: &str) -> BirthdayResult<NaiveDate> {
    let trimmed = s.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'-' || bytes[5] != b'-' {
        return Err(BirthdayError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, REFERENCE_DATE_FORMAT)
        .map_err(|_| BirthdayError::InvalidDate(s.to_string()))
}

impl WeekWindow {
    /// The week containing today's local date.
    pub fn current() -> Self {
        week_range(Local::now().date_naive())
    }

    /// Week for an optional `MM-DD-YYYY` argument, defaulting to now.
    pub fn from_arg(date: Option<&str>) -> BirthdayResult<Self> {
        match date {
            Some(s) => Ok(week_range(parse_reference_date(s)?)),
            None => Ok(Self::current()),
        }
    }

    /// The month documents this week needs: one, or two when the week
    /// crosses into the next month.
    pub fn months(&self) -> Vec<(Boundary, Month)> {
        let start = month_of(self.start);
        let end = month_of(self.end);

        if start == end {
            vec![(Boundary::Start, start)]
        } else {
            vec![(Boundary::Start, start), (Boundary::End, end)]
        }
    }

    /// Every date in the window, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} through {}",
            self.start.format(REFERENCE_DATE_FORMAT),
            self.end.format(REFERENCE_DATE_FORMAT)
        )
    }
}
