use std::path::Path;

use anyhow::{Context, Result};
use birthday_core::config::BirthdayConfig;
use birthday_core::skeleton::load_skeleton_file;

use super::open;

pub async fn run(config: &BirthdayConfig, file: Option<&Path>) -> Result<()> {
    let birthdays = open(config);

    match file {
        Some(path) => {
            let documents = load_skeleton_file(path)
                .with_context(|| format!("Could not read skeleton from {}", path.display()))?;
            birthdays.upload_skeleton(&documents).await?;
        }
        None => birthdays.upload_generated_skeleton().await?,
    }

    println!("Uploaded all 12 months");
    Ok(())
}
