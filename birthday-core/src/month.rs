//! The fixed calendar every month document is checked against.
//!
//! Day counts come from a non-leap reference year, so February always has
//! 28 days and February 29 never exists anywhere in the schema.

use chrono::{Datelike, Month, NaiveDate};

use crate::error::{BirthdayError, BirthdayResult};

/// Any non-leap year will do.
pub const REFERENCE_YEAR: i32 = 2023;

/// The twelve months in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Number of days in `month` for the reference year.
pub fn days_in_month(month: Month) -> u32 {
    let number = month.number_from_month();
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(REFERENCE_YEAR, number, day).is_some())
        .unwrap_or(28)
}

/// Normalize a full English month name (any case, surrounding whitespace
/// ignored). Abbreviations are rejected.
pub fn canonical_month_name(input: &str) -> BirthdayResult<Month> {
    let trimmed = input.trim();
    MONTHS
        .into_iter()
        .find(|month| month.name().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| BirthdayError::InvalidMonth(input.to_string()))
}

/// The month a date falls in.
pub fn month_of(date: NaiveDate) -> Month {
    MONTHS[date.month0() as usize]
}

/// Parse a day number ("7", " 07 ") without regard to which month it is in.
pub fn parse_day(input: &str) -> BirthdayResult<u32> {
    let trimmed = input.trim();
    let invalid = |reason| BirthdayError::InvalidDay {
        day: input.to_string(),
        reason,
    };

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected a digit between 1-31"));
    }

    match trimmed.parse::<u32>() {
        Ok(day @ 1..=31) => Ok(day),
        _ => Err(invalid("expected a month day between 1 and 31")),
    }
}

/// Check that `day` exists in `month`. February 29 gets its own error.
pub fn check_day(month: Month, day: u32) -> BirthdayResult<()> {
    if month == Month::February && day == 29 {
        return Err(BirthdayError::LeapDay);
    }
    if day == 0 || day > days_in_month(month) {
        return Err(BirthdayError::DayOutOfRange { month, day });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_matches_non_leap_calendar() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month, days) in MONTHS.into_iter().zip(expected) {
            assert_eq!(days_in_month(month), days, "{}", month.name());
        }
    }

    #[test]
    fn reference_year_is_not_a_leap_year() {
        assert!(NaiveDate::from_ymd_opt(REFERENCE_YEAR, 2, 29).is_none());
        assert_eq!(days_in_month(Month::February), 28);
    }

    #[test]
    fn canonical_month_name_ignores_case_and_whitespace() {
        assert_eq!(canonical_month_name("june").unwrap(), Month::June);
        assert_eq!(canonical_month_name("  DECEMBER ").unwrap(), Month::December);
        assert_eq!(canonical_month_name("sePTember").unwrap(), Month::September);
    }

    #[test]
    fn canonical_month_name_rejects_abbreviations() {
        for input in ["Jan", "Sept", "", "Juneteenth", "13"] {
            assert!(matches!(
                canonical_month_name(input),
                Err(BirthdayError::InvalidMonth(_))
            ));
        }
    }

    #[test]
    fn month_of_follows_the_date() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 2).unwrap();
        assert_eq!(month_of(date), Month::July);
    }

    #[test]
    fn parse_day_accepts_digits_in_range() {
        assert_eq!(parse_day("1").unwrap(), 1);
        assert_eq!(parse_day(" 31 ").unwrap(), 31);
        assert_eq!(parse_day("07").unwrap(), 7);
    }

    #[test]
    fn parse_day_rejects_non_digits_and_out_of_range() {
        for input in ["0", "32", "-1", "1.5", "twelve", "", "99999999999"] {
            let err = parse_day(input).unwrap_err();
            assert!(err.is_invalid_day(), "{input}: {err}");
        }
    }

    #[test]
    fn check_day_is_month_aware() {
        assert!(check_day(Month::January, 31).is_ok());
        assert!(matches!(
            check_day(Month::April, 31),
            Err(BirthdayError::DayOutOfRange { month: Month::April, day: 31 })
        ));
        assert!(matches!(check_day(Month::February, 29), Err(BirthdayError::LeapDay)));
        assert!(matches!(
            check_day(Month::February, 30),
            Err(BirthdayError::DayOutOfRange { .. })
        ));
    }
}
