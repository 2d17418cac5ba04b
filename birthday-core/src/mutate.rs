//! Adding and removing names on a month record.

use std::fmt;
use std::str::FromStr;

use crate::error::{BirthdayError, BirthdayResult};
use crate::month::check_day;
use crate::record::MonthRecord;

/// What to do with a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Delete,
}

impl FromStr for Action {
    type Err = BirthdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Action::Add),
            "delete" => Ok(Action::Delete),
            _ => Err(BirthdayError::InvalidAction(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Add => write!(f, "add"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// Upper-case the first letter of every run of letters, lower-case the rest:
/// "KING louis xii" becomes "King Louis Xii", "o'neil" becomes "O'Neil".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// The form a name is stored under.
pub fn canonical_name(name: &str) -> BirthdayResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BirthdayError::EmptyName);
    }
    Ok(title_case(trimmed))
}

/// Apply one add/delete to `record` in place.
///
/// Adds never deduplicate. Deletes remove the first matching entry only.
/// Nothing is rolled back if a later update on the same record fails.
pub fn apply_update(
    record: &mut MonthRecord,
    day: u32,
    name: &str,
    action: Action,
) -> BirthdayResult<()> {
    check_day(record.month, day)?;
    let name = canonical_name(name)?;
    let names = record.days.entry(day).or_default();

    match action {
        Action::Add => names.push(name),
        Action::Delete => {
            let Some(position) = names.iter().position(|n| *n == name) else {
                return Err(BirthdayError::RecordNotFound {
                    month: record.month,
                    day,
                    name,
                });
            };
            names.remove(position);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    #[test]
    fn title_case_matches_display_form() {
        assert_eq!(title_case("sam"), "Sam");
        assert_eq!(title_case("KING louis xii"), "King Louis Xii");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("anne-marie"), "Anne-Marie");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn action_parsing() {
        assert_eq!(" ADD ".parse::<Action>().unwrap(), Action::Add);
        assert_eq!("Delete".parse::<Action>().unwrap(), Action::Delete);
        assert!(matches!(
            "remove".parse::<Action>(),
            Err(BirthdayError::InvalidAction(_))
        ));
    }

    #[test]
    fn add_appends_title_cased_name() {
        let mut record = MonthRecord::empty(Month::June);
        apply_update(&mut record, 27, "  king louis xii ", Action::Add).unwrap();
        assert_eq!(record.names(27), ["King Louis Xii"]);
    }

    #[test]
    fn add_keeps_duplicates() {
        let mut record = MonthRecord::empty(Month::June);
        apply_update(&mut record, 5, "sam", Action::Add).unwrap();
        apply_update(&mut record, 5, "Sam", Action::Add).unwrap();
        assert_eq!(record.names(5), ["Sam", "Sam"]);
    }

    #[test]
    fn add_then_delete_is_a_no_op() {
        let mut record = MonthRecord::empty(Month::March);
        apply_update(&mut record, 3, "Alex", Action::Add).unwrap();
        let before = record.clone();

        apply_update(&mut record, 3, "jordan", Action::Add).unwrap();
        apply_update(&mut record, 3, "JORDAN", Action::Delete).unwrap();
        assert_eq!(record, before);
    }

    #[test]
    fn delete_removes_first_occurrence_only() {
        let mut record = MonthRecord::empty(Month::June);
        record.days.insert(5, vec!["Sam".into(), "Alex".into(), "Sam".into()]);
        apply_update(&mut record, 5, "sam", Action::Delete).unwrap();
        assert_eq!(record.names(5), ["Alex", "Sam"]);
    }

    #[test]
    fn delete_of_absent_name_fails() {
        let mut record = MonthRecord::empty(Month::June);
        match apply_update(&mut record, 5, "Sam", Action::Delete) {
            Err(BirthdayError::RecordNotFound { month, day, name }) => {
                assert_eq!(month, Month::June);
                assert_eq!(day, 5);
                assert_eq!(name, "Sam");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn february_29_is_always_rejected() {
        let mut record = MonthRecord::empty(Month::February);
        for action in [Action::Add, Action::Delete] {
            assert!(matches!(
                apply_update(&mut record, 29, "Sam", action),
                Err(BirthdayError::LeapDay)
            ));
        }
    }

    #[test]
    fn out_of_range_day_is_rejected() {
        let mut record = MonthRecord::empty(Month::September);
        assert!(matches!(
            apply_update(&mut record, 31, "Sam", Action::Add),
            Err(BirthdayError::DayOutOfRange { month: Month::September, day: 31 })
        ));
        assert!(matches!(
            apply_update(&mut record, 0, "Sam", Action::Add),
            Err(BirthdayError::DayOutOfRange { .. })
        ));
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut record = MonthRecord::empty(Month::June);
        assert!(matches!(
            apply_update(&mut record, 1, "   ", Action::Add),
            Err(BirthdayError::EmptyName)
        ));
    }

    #[test]
    fn earlier_updates_survive_a_later_failure() {
        let mut record = MonthRecord::empty(Month::June);
        apply_update(&mut record, 1, "Sam", Action::Add).unwrap();
        assert!(apply_update(&mut record, 1, "Alex", Action::Delete).is_err());
        assert_eq!(record.names(1), ["Sam"]);
    }
}
