use anyhow::Result;
use birthday_core::week::WeekWindow;

use crate::render::Render;

pub fn run(window: WeekWindow) -> Result<()> {
    println!("{}", window.render());
    Ok(())
}
