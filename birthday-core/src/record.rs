//! Month documents as the store holds them.

use std::collections::BTreeMap;

use chrono::Month;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::month::days_in_month;

fn default_month_key() -> String {
    "month_name".to_string()
}

fn default_day_key() -> String {
    "days".to_string()
}

/// Field names used inside a stored month document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaKeys {
    #[serde(default = "default_month_key")]
    pub month_key: String,

    #[serde(default = "default_day_key")]
    pub day_key: String,
}

impl Default for SchemaKeys {
    fn default() -> Self {
        SchemaKeys {
            month_key: default_month_key(),
            day_key: default_day_key(),
        }
    }
}

/// One month of birthdays: day of month to the names celebrating that day.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRecord {
    pub month: Month,
    pub days: BTreeMap<u32, Vec<String>>,
    /// Other top-level fields of the stored document (store metadata etc.),
    /// written back untouched.
    pub extra: Map<String, Value>,
}

impl MonthRecord {
    /// A record with every day of `month` present and empty.
    pub fn empty(month: Month) -> Self {
        MonthRecord {
            month,
            days: (1..=days_in_month(month)).map(|day| (day, Vec::new())).collect(),
            extra: Map::new(),
        }
    }

    pub fn names(&self, day: u32) -> &[String] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of names across the month.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the whole-month document to hand to a store. The document `id`
    /// is the canonical month name.
    pub fn to_document(&self, keys: &SchemaKeys) -> Value {
        let mut document = self.extra.clone();
        let name = self.month.name().to_string();

        let days: Map<String, Value> = self
            .days
            .iter()
            .map(|(day, names)| {
                let names = names.iter().cloned().map(Value::String).collect();
                (day.to_string(), Value::Array(names))
            })
            .collect();

        document.insert("id".to_string(), Value::String(name.clone()));
        document.insert(keys.month_key.clone(), Value::String(name));
        document.insert(keys.day_key.clone(), Value::Object(days));

        Value::Object(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_record_has_every_day() {
        let record = MonthRecord::empty(Month::February);
        assert_eq!(record.days.len(), 28);
        assert!(record.days.values().all(Vec::is_empty));
        assert!(record.is_empty());
    }

    #[test]
    fn names_for_unknown_day_is_empty() {
        let record = MonthRecord::empty(Month::April);
        assert!(record.names(31).is_empty());
    }

    #[test]
    fn to_document_uses_configured_keys() {
        let mut record = MonthRecord::empty(Month::June);
        record.days.insert(27, vec!["King Louis Xii".to_string()]);
        record.extra.insert("_etag".to_string(), json!("abc"));

        let keys = SchemaKeys {
            month_key: "month".to_string(),
            day_key: "birthdays".to_string(),
        };
        let document = record.to_document(&keys);

        assert_eq!(document["id"], "June");
        assert_eq!(document["month"], "June");
        assert_eq!(document["_etag"], "abc");
        assert_eq!(document["birthdays"]["27"], json!(["King Louis Xii"]));
        assert_eq!(document["birthdays"]["30"], json!([]));
        assert_eq!(document["birthdays"].as_object().unwrap().len(), 30);
    }
}
