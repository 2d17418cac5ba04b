use std::path::Path;

use anyhow::{Result, bail};
use birthday_core::bulk::{BulkColumns, read_bulk_file};
use birthday_core::config::BirthdayConfig;

use super::open;
use crate::render::Render;

pub async fn run(config: &BirthdayConfig, file: &Path, columns: &BulkColumns) -> Result<()> {
    let rows = read_bulk_file(file, columns)?;
    tracing::info!(rows = rows.len(), file = %file.display(), "read bulk file");

    let summary = open(config).bulk_update(rows).await;
    println!("{}", summary.render());

    if !summary.is_success() {
        bail!("{} month(s) could not be updated", summary.failed.len());
    }
    Ok(())
}
