use anyhow::Result;
use birthday_core::config::BirthdayConfig;
use birthday_core::week::WeekWindow;

use super::open;

pub async fn run(config: &BirthdayConfig, window: WeekWindow) -> Result<()> {
    let birthdays = open(config);
    let result = birthdays.upcoming(&window).await?;

    println!("{}", result.render());
    Ok(())
}
