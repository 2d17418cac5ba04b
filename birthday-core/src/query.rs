//! Weekly birthday lookup and message rendering.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde_json::Value;

use crate::error::{BirthdayError, BirthdayResult};
use crate::month::month_of;
use crate::mutate::title_case;
use crate::record::{MonthRecord, SchemaKeys};
use crate::schema;
use crate::week::WeekWindow;

/// One day of the week that has at least one birthday.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthdayDay {
    pub date: NaiveDate,
    pub names: Vec<String>,
}

impl BirthdayDay {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// Birthdays found in a week, in date order.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthdayQueryResult {
    pub window: WeekWindow,
    pub days: Vec<BirthdayDay>,
    pub total: usize,
}

/// Collect the birthdays falling inside `window`.
///
/// `fetch_month` is asked once for each month the window touches and returns
/// the raw stored document, or `None` when the store has no such month. A
/// missing month fails the whole query.
pub fn query<F>(
    window: &WeekWindow,
    keys: &SchemaKeys,
    mut fetch_month: F,
) -> BirthdayResult<BirthdayQueryResult>
where
    F: FnMut(Month) -> BirthdayResult<Option<Value>>,
{
    let mut records: Vec<(Month, MonthRecord)> = Vec::with_capacity(2);

    for (boundary, month) in window.months() {
        let document = fetch_month(month)?.ok_or(BirthdayError::MonthNotFound {
            month,
            boundary: Some(boundary),
        })?;
        records.push((month, schema::validate(&document, keys)?));
    }

    let mut days = Vec::new();
    let mut total = 0;

    for date in window.dates() {
        let month = month_of(date);
        let Some((_, record)) = records.iter().find(|(m, _)| *m == month) else {
            continue;
        };

        let names = record.names(date.day());
        if names.is_empty() {
            continue;
        }

        total += names.len();
        days.push(BirthdayDay {
            date,
            names: names.to_vec(),
        });
    }

    Ok(BirthdayQueryResult {
        window: *window,
        days,
        total,
    })
}

impl BirthdayQueryResult {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Telegram Markdown message: a count header, then each day with its
    /// names. A name listed twice on one day is shown twice.
    pub fn render(&self) -> String {
        let header = format!(
            "❗❗❗ *There are {} birthdays coming up this week* ❗❗❗",
            self.total
        );

        let mut lines = Vec::new();
        for day in &self.days {
            lines.push(format!(
                "\n🎂 *{} ({})* 🎂",
                day.date.format("%B %d"),
                day.date.format("%A")
            ));
            lines.extend(day.names.iter().map(|name| format!("🔴 _{}_", title_case(name))));
        }

        format!("{header}\n{}", lines.join("\n"))
    }
}
