use anyhow::{Context, Result};
use birthday_core::config::BirthdayConfig;
use birthday_core::month::{canonical_month_name, parse_day};
use birthday_core::mutate::{Action, title_case};

use super::open;

pub async fn run(
    config: &BirthdayConfig,
    month: &str,
    day: &str,
    name: &str,
    action: &str,
) -> Result<()> {
    let month = canonical_month_name(month)?;
    let day = parse_day(day)?;
    let action: Action = action.parse()?;

    open(config)
        .update_record(month, day, name, action)
        .await
        .with_context(|| format!("Failed to {action} record '{name}' for '{} {day}'", month.name()))?;

    let verb = match action {
        Action::Add => "Added",
        Action::Delete => "Deleted",
    };
    println!("{verb} '{}' for {} {day}", title_case(name.trim()), month.name());
    Ok(())
}
