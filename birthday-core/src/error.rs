//! Error types for birthday-notifs.

use std::collections::BTreeSet;

use chrono::Month;
use thiserror::Error;

/// Which end of a week window a month document was needed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::Start => write!(f, "starting"),
            Boundary::End => write!(f, "ending"),
        }
    }
}

/// Errors that can occur in birthday-notifs operations.
#[derive(Error, Debug)]
pub enum BirthdayError {
    #[error("Could not locate key '{0}' in the month document")]
    MissingKey(String),

    #[error("Expecting a valid, full month name, got '{0}'")]
    InvalidMonth(String),

    #[error("Day '{day}' is invalid: {reason}")]
    InvalidDay { day: String, reason: &'static str },

    #[error("{} has no day {day}", .month.name())]
    DayOutOfRange { month: Month, day: u32 },

    /// February 29 is never part of the schema.
    #[error("February 29 is not supported - please defer to February 28 or March 1 instead")]
    LeapDay,

    #[error("'{key}' must be {expected}, got {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error(
        "Schema for '{}' does not match its calendar (missing days: {missing:?}, extra days: {extra:?})",
        .month.name()
    )]
    SchemaCompleteness {
        month: Month,
        missing: BTreeSet<u32>,
        extra: BTreeSet<u32>,
    },

    #[error("Record '{name}' does not exist for '{} {day}'", .month.name())]
    RecordNotFound { month: Month, day: u32, name: String },

    #[error(
        "Could not locate {}month '{}' in the store",
        .boundary.map(|b| format!("{b} ")).unwrap_or_default(),
        .month.name()
    )]
    MonthNotFound {
        month: Month,
        boundary: Option<Boundary>,
    },

    #[error("Names must not be empty")]
    EmptyName,

    #[error("Action '{0}' is invalid - expected 'add' or 'delete'")]
    InvalidAction(String),

    #[error("Invalid date '{0}'. Expected MM-DD-YYYY")]
    InvalidDate(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BirthdayError {
    /// True for every flavour of bad day number, including February 29.
    pub fn is_invalid_day(&self) -> bool {
        matches!(
            self,
            BirthdayError::InvalidDay { .. }
                | BirthdayError::DayOutOfRange { .. }
                | BirthdayError::LeapDay
        )
    }
}

/// Result type alias for birthday-notifs operations.
pub type BirthdayResult<T> = Result<T, BirthdayError>;
