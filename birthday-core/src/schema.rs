//! Month document validation.
//!
//! Documents arrive as arbitrary JSON (from a store or a skeleton file).
//! [`validate`] checks them against the calendar and returns a typed
//! [`MonthRecord`]. The first violation found is reported, in this order:
//!
//! 1. both schema keys present ([`BirthdayError::MissingKey`])
//! 2. month value is a full month name ([`BirthdayError::InvalidMonth`])
//! 3. day value is an object ([`BirthdayError::TypeMismatch`])
//! 4. every day key is a day number 1-31 ([`BirthdayError::InvalidDay`])
//! 5. every day value is an array ([`BirthdayError::TypeMismatch`])
//! 6. every name is a string ([`BirthdayError::TypeMismatch`])
//! 7. the day keys are exactly the days of that month
//!    ([`BirthdayError::LeapDay`] or [`BirthdayError::SchemaCompleteness`])
//!
//! Completeness is only computed once the keys are known to be well-typed.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Month;
use serde_json::{Map, Value};

use crate::error::{BirthdayError, BirthdayResult};
use crate::month::{canonical_month_name, days_in_month, parse_day};
use crate::record::{MonthRecord, SchemaKeys};

/// JSON type name used in mismatch messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate a month document and parse it into a [`MonthRecord`].
pub fn validate(document: &Value, keys: &SchemaKeys) -> BirthdayResult<MonthRecord> {
    let Value::Object(fields) = document else {
        return Err(BirthdayError::TypeMismatch {
            key: "document".to_string(),
            expected: "an object",
            found: json_type(document),
        });
    };

    for key in [&keys.month_key, &keys.day_key] {
        if !fields.contains_key(key) {
            return Err(BirthdayError::MissingKey(key.clone()));
        }
    }

    let month = match &fields[&keys.month_key] {
        Value::String(name) => canonical_month_name(name)?,
        other => return Err(BirthdayError::InvalidMonth(other.to_string())),
    };

    let Value::Object(day_map) = &fields[&keys.day_key] else {
        return Err(BirthdayError::TypeMismatch {
            key: keys.day_key.clone(),
            expected: "an object",
            found: json_type(&fields[&keys.day_key]),
        });
    };

    let day_numbers = parse_day_keys(day_map)?;
    let mut days = BTreeMap::new();

    for ((key, value), day) in day_map.iter().zip(day_numbers) {
        let Value::Array(entries) = value else {
            return Err(BirthdayError::TypeMismatch {
                key: format!("{}.{key}", keys.day_key),
                expected: "an array",
                found: json_type(value),
            });
        };
        days.insert(day, entries);
    }

    let mut parsed = BTreeMap::new();
    for (day, entries) in days {
        let names = entries
            .iter()
            .map(|entry| match entry {
                Value::String(name) => Ok(name.clone()),
                other => Err(BirthdayError::TypeMismatch {
                    key: format!("{}.{day}", keys.day_key),
                    expected: "an array of strings",
                    found: json_type(other),
                }),
            })
            .collect::<BirthdayResult<Vec<_>>>()?;
        parsed.insert(day, names);
    }

    check_completeness(month, parsed.keys().copied().collect())?;

    let extra = fields
        .iter()
        .filter(|(key, _)| **key != keys.month_key && **key != keys.day_key)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(MonthRecord {
        month,
        days: parsed,
        extra,
    })
}

/// Day numbers for every key, in map order. "1" and "01" name the same day
/// and cannot both be present.
fn parse_day_keys(day_map: &Map<String, Value>) -> BirthdayResult<Vec<u32>> {
    let mut seen = BTreeSet::new();
    day_map
        .keys()
        .map(|key| {
            let day = parse_day(key)?;
            if !seen.insert(day) {
                return Err(BirthdayError::InvalidDay {
                    day: key.clone(),
                    reason: "the same day appears more than once",
                });
            }
            Ok(day)
        })
        .collect()
}

fn check_completeness(month: Month, located: BTreeSet<u32>) -> BirthdayResult<()> {
    let expected: BTreeSet<u32> = (1..=days_in_month(month)).collect();
    if located == expected {
        return Ok(());
    }

    let missing: BTreeSet<u32> = expected.difference(&located).copied().collect();
    let extra: BTreeSet<u32> = located.difference(&expected).copied().collect();

    if month == Month::February && extra.contains(&29) {
        return Err(BirthdayError::LeapDay);
    }

    Err(BirthdayError::SchemaCompleteness {
        month,
        missing,
        extra,
    })
}
