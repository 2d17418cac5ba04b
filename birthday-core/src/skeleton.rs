//! The yearly calendar skeleton: twelve empty month documents.

use std::path::Path;

use serde_json::Value;

use crate::error::{BirthdayError, BirthdayResult};
use crate::month::MONTHS;
use crate::record::MonthRecord;
use crate::schema::json_type;

/// All twelve months, January to December, with every day present and empty.
pub fn generate_skeleton() -> Vec<MonthRecord> {
    MONTHS.into_iter().map(MonthRecord::empty).collect()
}

/// Read a skeleton document from a `.json` file.
///
/// Only the outer shape is checked here (a list of exactly 12 entries);
/// each entry still has to go through [`crate::schema::validate`].
pub fn load_skeleton_file(path: &Path) -> BirthdayResult<Vec<Value>> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(BirthdayError::Import(format!(
            "Skeleton must be a .json file, got '{}'",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    parse_skeleton(&content)
}

/// Parse skeleton JSON text. See [`load_skeleton_file`].
pub fn parse_skeleton(content: &str) -> BirthdayResult<Vec<Value>> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| BirthdayError::Serialization(format!("Skeleton JSON is corrupt: {e}")))?;

    let months = match document {
        Value::Array(months) => months,
        other => {
            return Err(BirthdayError::TypeMismatch {
                key: "skeleton".to_string(),
                expected: "a list of 12 month documents",
                found: json_type(&other),
            });
        }
    };

    if months.len() != MONTHS.len() {
        return Err(BirthdayError::Import(format!(
            "Expected 12 months in skeleton document, got {}",
            months.len()
        )));
    }

    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::month::days_in_month;
    use crate::record::SchemaKeys;
    use std::io::Write;

    #[test]
    fn skeleton_has_twelve_empty_months_in_order() {
        let skeleton = generate_skeleton();
        assert_eq!(skeleton.len(), 12);

        for (record, month) in skeleton.iter().zip(MONTHS) {
            assert_eq!(record.month, month);
            let expected: Vec<u32> = (1..=days_in_month(month)).collect();
            assert_eq!(record.days.keys().copied().collect::<Vec<_>>(), expected);
            assert!(record.is_empty());
        }
    }

    #[test]
    fn skeleton_file_round_trips() {
        let keys = SchemaKeys::default();
        let documents: Vec<Value> = generate_skeleton()
            .iter()
            .map(|r| r.to_document(&keys))
            .collect();

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", serde_json::to_string(&documents).unwrap()).unwrap();

        let loaded = load_skeleton_file(file.path()).unwrap();
        assert_eq!(loaded, documents);
    }

    #[test]
    fn rejects_wrong_extension() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(matches!(
            load_skeleton_file(file.path()),
            Err(BirthdayError::Import(_))
        ));
    }

    #[test]
    fn rejects_wrong_month_count() {
        assert!(matches!(
            parse_skeleton("[{}, {}]"),
            Err(BirthdayError::Import(_))
        ));
    }

    #[test]
    fn rejects_non_list_documents() {
        assert!(matches!(
            parse_skeleton(r#"{"month_name": "January"}"#),
            Err(BirthdayError::TypeMismatch { found: "object", .. })
        ));
    }

    #[test]
    fn rejects_corrupt_json() {
        assert!(matches!(
            parse_skeleton("[{"),
            Err(BirthdayError::Serialization(_))
        ));
    }
}
