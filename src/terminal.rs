use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm};

mod bullet_points;

pub use bullet_points::{BulletPointPrinter, LineWriter, StdoutLineWriter};

pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
