//! A directory of `<Month>.json` files.

use std::path::{Path, PathBuf};

use chrono::Month;
use serde_json::Value;

use crate::error::{BirthdayError, BirthdayResult};
use crate::store::MonthStore;

#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, month: Month) -> PathBuf {
        self.dir.join(format!("{}.json", month.name()))
    }
}

impl MonthStore for LocalStore {
    async fn read(&self, month: Month) -> BirthdayResult<Option<Value>> {
        let path = self.path_for(month);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let document = serde_json::from_str(&content).map_err(|e| {
            BirthdayError::Serialization(format!("{}: {e}", path.display()))
        })?;
        Ok(Some(document))
    }

    async fn write(&self, month: Month, document: &Value) -> BirthdayResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| BirthdayError::Serialization(e.to_string()))?;

        tokio::fs::write(self.path_for(month), content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_month_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        assert!(store.read(Month::May).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested"));
        let document = json!({ "month_name": "May", "days": {} });

        store.write(Month::May, &document).await.unwrap();

        assert!(store.path_for(Month::May).ends_with("May.json"));
        assert_eq!(store.read(Month::May).await.unwrap(), Some(document));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        std::fs::write(store.path_for(Month::June), "{ not json").unwrap();

        assert!(matches!(
            store.read(Month::June).await,
            Err(BirthdayError::Serialization(_))
        ));
    }
}
