//! Store-backed birthday operations.
//!
//! [`Birthdays`] holds the store handle and schema keys. Every operation
//! re-reads and re-validates the month documents it touches; nothing is
//! cached between calls.

use chrono::Month;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::bulk::{BulkRow, BulkSummary, MonthBatch, SkippedDelete, group_rows};
use crate::error::{BirthdayError, BirthdayResult};
use crate::month::check_day;
use crate::mutate::{Action, apply_update, canonical_name};
use crate::query::{BirthdayQueryResult, query};
use crate::record::{MonthRecord, SchemaKeys};
use crate::schema::validate;
use crate::skeleton::generate_skeleton;
use crate::store::MonthStore;
use crate::week::WeekWindow;

pub struct Birthdays<S> {
    store: S,
    keys: SchemaKeys,
}

impl<S: MonthStore> Birthdays<S> {
    pub fn new(store: S, keys: SchemaKeys) -> Self {
        Birthdays { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &SchemaKeys {
        &self.keys
    }

    /// Birthdays in `window`. The one or two months needed are fetched
    /// concurrently.
    pub async fn upcoming(&self, window: &WeekWindow) -> BirthdayResult<BirthdayQueryResult> {
        let fetches = window.months().into_iter().map(|(_, month)| async move {
            debug!(month = month.name(), "fetching month document");
            Ok::<_, BirthdayError>((month, self.store.read(month).await?))
        });
        let fetched: Vec<(Month, Option<Value>)> = try_join_all(fetches).await?;

        query(window, &self.keys, |month| {
            Ok(fetched
                .iter()
                .find(|(m, _)| *m == month)
                .and_then(|(_, document)| document.clone()))
        })
    }

    /// Add or delete a single name. Any failure is returned; nothing is
    /// written unless the update applied.
    pub async fn update_record(
        &self,
        month: Month,
        day: u32,
        name: &str,
        action: Action,
    ) -> BirthdayResult<()> {
        check_day(month, day)?;
        let name = canonical_name(name)?;

        let mut record = self.load(month).await?;
        apply_update(&mut record, day, &name, action)?;
        self.save(&record).await?;

        info!(%action, name = %name, month = month.name(), day, "updated record");
        Ok(())
    }

    /// Validate every document, then write them one month at a time. A bad
    /// document stops the upload before anything is written.
    pub async fn upload_skeleton(&self, documents: &[Value]) -> BirthdayResult<()> {
        let records = documents
            .iter()
            .enumerate()
            .map(|(i, document)| {
                debug!(chunk = i + 1, "validating skeleton chunk");
                validate(document, &self.keys)
            })
            .collect::<BirthdayResult<Vec<_>>>()?;

        for record in &records {
            self.save(record).await?;
        }

        info!(months = records.len(), "uploaded skeleton");
        Ok(())
    }

    /// Upload a freshly generated, empty skeleton.
    pub async fn upload_generated_skeleton(&self) -> BirthdayResult<()> {
        let documents: Vec<Value> = generate_skeleton()
            .iter()
            .map(|record| record.to_document(&self.keys))
            .collect();
        self.upload_skeleton(&documents).await
    }

    /// Apply bulk rows month by month. A month that cannot be read, validated
    /// or written is skipped and listed in the summary; deletes of names that
    /// are not there are logged and skipped.
    pub async fn bulk_update(&self, rows: Vec<BulkRow>) -> BulkSummary {
        let mut summary = BulkSummary::default();

        for batch in group_rows(rows) {
            debug!(month = batch.month.name(), "processing month");
            match self.apply_batch(&batch, &mut summary).await {
                Ok(()) => summary.updated.push(batch.month),
                Err(e) => {
                    error!(month = batch.month.name(), error = %e, "could not update month");
                    summary.failed.push(batch.month);
                }
            }
        }

        if !summary.failed.is_empty() {
            let names: Vec<_> = summary.failed.iter().map(|m| m.name()).collect();
            warn!(
                "The following month(s) could not be updated and were skipped: {}",
                names.join(", ")
            );
        }
        info!(
            updated = summary.updated.len(),
            failed = summary.failed.len(),
            skipped_deletes = summary.skipped_deletes.len(),
            "completed bulk update"
        );

        summary
    }

    async fn apply_batch(
        &self,
        batch: &MonthBatch,
        summary: &mut BulkSummary,
    ) -> BirthdayResult<()> {
        let mut record = self.load(batch.month).await?;
        let mut skipped = Vec::new();

        for day in &batch.days {
            for name in &day.add {
                apply_update(&mut record, day.day, name, Action::Add)?;
            }
            for name in &day.delete {
                match apply_update(&mut record, day.day, name, Action::Delete) {
                    Err(BirthdayError::RecordNotFound { month, day, name }) => {
                        warn!(month = month.name(), day, name = %name, "record does not exist, skipping delete");
                        skipped.push(SkippedDelete { month, day, name });
                    }
                    other => other?,
                }
            }
        }

        self.save(&record).await?;
        summary.skipped_deletes.extend(skipped);
        Ok(())
    }

    async fn load(&self, month: Month) -> BirthdayResult<MonthRecord> {
        let document = self
            .store
            .read(month)
            .await?
            .ok_or(BirthdayError::MonthNotFound {
                month,
                boundary: None,
            })?;
        validate(&document, &self.keys)
    }

    async fn save(&self, record: &MonthRecord) -> BirthdayResult<()> {
        self.store
            .write(record.month, &record.to_document(&self.keys))
            .await
    }
}
