use anyhow::Result;
use birthday_core::config::BirthdayConfig;
use birthday_core::notify::TelegramNotifier;
use birthday_core::retry::retry;
use birthday_core::week::WeekWindow;
use birthday_core::BirthdayError;

use super::open;

/// Query the week and post it, retrying the whole run with the configured
/// policy. Delivery gets its own retries inside each run.
pub async fn run(config: &BirthdayConfig, date: Option<&str>) -> Result<()> {
    let notifier = TelegramNotifier::new(config.telegram()?);
    let birthdays = open(config);
    let policy = config.retry_policy();
    let (birthdays, notifier, policy) = (&birthdays, &notifier, &policy);

    retry(policy, "upcoming-birthdays run", move || async move {
        let window = WeekWindow::from_arg(date)?;
        let result = birthdays.upcoming(&window).await?;
        let text = result.render();

        retry(policy, "telegram delivery", || notifier.send(&text)).await?;

        tracing::info!(
            chat_id = notifier.chat_id(),
            total = result.total,
            "posted upcoming birthdays for the week of {window}"
        );
        Ok::<_, BirthdayError>(())
    })
    .await?;

    Ok(())
}
