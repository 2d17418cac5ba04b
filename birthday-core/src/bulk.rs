//! Bulk record import from a CSV file.
//!
//! Every row names a person, a date and an action (`add`/`delete`). Rows are
//! grouped by month and day so each month document is read and written once.

use std::io::Read;
use std::path::Path;

use chrono::{Datelike, Month, NaiveDate};

use crate::error::{BirthdayError, BirthdayResult};
use crate::month::month_of;
use crate::mutate::{Action, canonical_name};

/// Date formats accepted in the date column.
const DATE_FORMATS: [&str; 3] = ["%m-%d-%Y", "%m/%d/%Y", "%Y-%m-%d"];

/// Header names of the three required columns. Matching is case-sensitive.
#[derive(Debug, Clone)]
pub struct BulkColumns {
    pub name: String,
    pub date: String,
    pub update: String,
}

impl Default for BulkColumns {
    fn default() -> Self {
        BulkColumns {
            name: "Name".to_string(),
            date: "Date".to_string(),
            update: "Update".to_string(),
        }
    }
}

/// One cleaned row: title-cased name, month and day of the birthday.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkRow {
    pub month: Month,
    pub day: u32,
    pub action: Action,
    pub name: String,
}

/// The adds and deletes for one day, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBatch {
    pub day: u32,
    pub add: Vec<String>,
    pub delete: Vec<String>,
}

/// Everything to change in one month document.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBatch {
    pub month: Month,
    pub days: Vec<DayBatch>,
}

/// A delete that found nothing to remove and was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDelete {
    pub month: Month,
    pub day: u32,
    pub name: String,
}

/// Outcome of a bulk update run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkSummary {
    pub updated: Vec<Month>,
    pub failed: Vec<Month>,
    pub skipped_deletes: Vec<SkippedDelete>,
}

impl BulkSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Read and clean a `.csv` bulk file.
pub fn read_bulk_file(path: &Path, columns: &BulkColumns) -> BirthdayResult<Vec<BulkRow>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(BirthdayError::Import(format!(
            "Birthday records must be .csv files, got '{}'",
            path.display()
        )));
    }

    let file = std::fs::File::open(path)?;
    parse_bulk(file, columns)
}

/// Parse CSV text with a header row into cleaned rows.
///
/// Fails on the first bad row: empty cells, unknown actions, unreadable dates
/// and February 29 all reject the whole file.
pub fn parse_bulk<R: Read>(input: R, columns: &BulkColumns) -> BirthdayResult<Vec<BulkRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let index_of = |column: &str| {
        headers.iter().position(|h| h == column).ok_or_else(|| {
            BirthdayError::Import(format!("Missing required column '{column}'"))
        })
    };
    let name_idx = index_of(&columns.name)?;
    let date_idx = index_of(&columns.date)?;
    let update_idx = index_of(&columns.update)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        // Header is line 1.
        let line = i + 2;

        let cell = |idx: usize, column: &str| match record.get(idx) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(BirthdayError::Import(format!(
                "Error parsing '{column}' column on line {line} - ensure that there are no empty cells"
            ))),
        };

        let name = canonical_name(cell(name_idx, &columns.name)?)?;
        let action: Action = cell(update_idx, &columns.update)?.parse().map_err(|_| {
            BirthdayError::Import(format!(
                "Error parsing '{}' column on line {line} - cells must be either 'add' or 'delete'",
                columns.update
            ))
        })?;
        let date = parse_bulk_date(cell(date_idx, &columns.date)?).ok_or_else(|| {
            BirthdayError::Import(format!(
                "Error parsing '{}' column on line {line} - expected MM-DD-YYYY, MM/DD/YYYY or YYYY-MM-DD",
                columns.date
            ))
        })?;

        if date.month() == 2 && date.day() == 29 {
            return Err(BirthdayError::LeapDay);
        }

        rows.push(BulkRow {
            month: month_of(date),
            day: date.day(),
            action,
            name,
        });
    }

    Ok(rows)
}

fn parse_bulk_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

fn csv_error(e: csv::Error) -> BirthdayError {
    BirthdayError::Import(e.to_string())
}

/// Group rows by month, then day, keeping the order each first appears in.
pub fn group_rows(rows: Vec<BulkRow>) -> Vec<MonthBatch> {
    let mut batches: Vec<MonthBatch> = Vec::new();

    for row in rows {
        let month_idx = match batches.iter().position(|b| b.month == row.month) {
            Some(idx) => idx,
            None => {
                batches.push(MonthBatch {
                    month: row.month,
                    days: Vec::new(),
                });
                batches.len() - 1
            }
        };
        let days = &mut batches[month_idx].days;

        let day_idx = match days.iter().position(|d| d.day == row.day) {
            Some(idx) => idx,
            None => {
                days.push(DayBatch {
                    day: row.day,
                    ..DayBatch::default()
                });
                days.len() - 1
            }
        };

        let day = &mut days[day_idx];
        match row.action {
            Action::Add => day.add.push(row.name),
            Action::Delete => day.delete.push(row.name),
        }
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(csv: &str) -> BirthdayResult<Vec<BulkRow>> {
        parse_bulk(csv.as_bytes(), &BulkColumns::default())
    }

    #[test]
    fn parses_and_cleans_rows() {
        let rows = parse(
            "Name,Date,Update\n\
             \x20 sam smith ,06-27-1990, ADD \n\
             Alex,1985-07-01,delete\n\
             jo,12/31/2000,Add\n",
        )
        .unwrap();

        assert_eq!(
            rows,
            vec![
                BulkRow { month: Month::June, day: 27, action: Action::Add, name: "Sam Smith".into() },
                BulkRow { month: Month::July, day: 1, action: Action::Delete, name: "Alex".into() },
                BulkRow { month: Month::December, day: 31, action: Action::Add, name: "Jo".into() },
            ]
        );
    }

    #[test]
    fn custom_column_names_and_extra_columns() {
        let columns = BulkColumns {
            name: "name".into(),
            date: "date".into(),
            update: "update".into(),
        };
        let rows = parse_bulk(
            "notes,update,name,date\nbring cake,add,Sam,03-03-2001\n".as_bytes(),
            &columns,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, Month::March);
    }

    #[test]
    fn missing_column_is_rejected() {
        match parse("Name,Date\nSam,06-27-1990\n") {
            Err(BirthdayError::Import(msg)) => assert!(msg.contains("Update")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn column_names_are_case_sensitive() {
        assert!(matches!(
            parse("name,date,update\nSam,06-27-1990,add\n"),
            Err(BirthdayError::Import(_))
        ));
    }

    #[test]
    fn empty_cells_are_rejected() {
        match parse("Name,Date,Update\nSam,,add\n") {
            Err(BirthdayError::Import(msg)) => {
                assert!(msg.contains("'Date'"));
                assert!(msg.contains("line 2"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(matches!(
            parse("Name,Date,Update\nSam,06-27-1990,remove\n"),
            Err(BirthdayError::Import(_))
        ));
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(matches!(
            parse("Name,Date,Update\nSam,June 27,add\n"),
            Err(BirthdayError::Import(_))
        ));
    }

    #[test]
    fn leap_day_rejects_the_file() {
        assert!(matches!(
            parse("Name,Date,Update\nSam,06-27-1990,add\nLeap,02-29-2024,add\n"),
            Err(BirthdayError::LeapDay)
        ));
    }

    #[test]
    fn grouping_keeps_first_appearance_order() {
        let rows = parse(
            "Name,Date,Update\n\
             A,07-04-2000,add\n\
             B,06-01-2000,add\n\
             C,07-04-2001,delete\n\
             D,07-05-2001,add\n\
             E,07-04-1999,add\n",
        )
        .unwrap();

        let batches = group_rows(rows);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].month, Month::July);
        assert_eq!(batches[1].month, Month::June);
        assert_eq!(
            batches[0].days,
            vec![
                DayBatch { day: 4, add: vec!["A".into(), "E".into()], delete: vec!["C".into()] },
                DayBatch { day: 5, add: vec!["D".into()], delete: vec![] },
            ]
        );
    }

    #[test]
    fn file_must_be_csv() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(file, "Name,Date,Update").unwrap();
        assert!(matches!(
            read_bulk_file(file.path(), &BulkColumns::default()),
            Err(BirthdayError::Import(_))
        ));
    }

    #[test]
    fn reads_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "Name,Date,Update\nSam,06-27-1990,add\n").unwrap();
        let rows = read_bulk_file(file.path(), &BulkColumns::default()).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
