//! Core types for birthday-notifs.
//!
//! - `month`, `record`, `skeleton`: the fixed non-leap-year calendar and the
//!   month documents built on it
//! - `schema`: validation of stored documents into typed records
//! - `mutate`: adding and removing names
//! - `week`, `query`: the Monday-Sunday window and the birthdays inside it
//! - `bulk`: CSV import
//! - `store`, `notify`: the month-document store and Telegram delivery
//! - `birthdays`: the store-backed operations tying these together

pub mod birthdays;
pub mod bulk;
pub mod config;
pub mod error;
pub mod month;
pub mod mutate;
pub mod notify;
pub mod query;
pub mod record;
pub mod retry;
pub mod schema;
pub mod skeleton;
pub mod store;
pub mod week;

pub use birthdays::Birthdays;
pub use error::{BirthdayError, BirthdayResult};
pub use record::{MonthRecord, SchemaKeys};
