//! Terminal rendering for birthday-core types.
//!
//! Extension traits that add colored output with owo_colors. The Telegram
//! message itself is plain Markdown and lives in birthday-core.

use birthday_core::bulk::{BulkSummary, SkippedDelete};
use birthday_core::week::WeekWindow;
use chrono::Month;
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for WeekWindow {
    fn render(&self) -> String {
        let months: Vec<Month> = self.months().into_iter().map(|(_, m)| m).collect();
        format!(
            "📅 {} {}\n   {}",
            self.start.format("%A"),
            self,
            month_list(&months).dimmed()
        )
    }
}

impl Render for SkippedDelete {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            "-".yellow(),
            self.name.yellow(),
            format!("({} {}, not found)", self.month.name(), self.day).dimmed()
        )
    }
}

impl Render for BulkSummary {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        if !self.updated.is_empty() {
            lines.push(format!(
                "{} {} {}",
                "✓".green(),
                format!("Updated {}:", pluralize("month", self.updated.len())).green(),
                month_list(&self.updated)
            ));
        }

        if !self.skipped_deletes.is_empty() {
            lines.push("Skipped deletes:".dimmed().to_string());
            for skipped in &self.skipped_deletes {
                lines.push(format!("   {}", skipped.render()));
            }
        }

        if !self.failed.is_empty() {
            lines.push(format!(
                "{} {} {}",
                "✗".red(),
                format!(
                    "Could not update {}, skipped:",
                    pluralize("month", self.failed.len())
                )
                .red(),
                month_list(&self.failed)
            ));
        }

        if lines.is_empty() {
            return "No rows to apply".dimmed().to_string();
        }

        lines.join("\n")
    }
}

fn month_list(months: &[Month]) -> String {
    months
        .iter()
        .map(|m| m.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
