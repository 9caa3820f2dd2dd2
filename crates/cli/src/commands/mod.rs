pub mod appointments;
pub mod calendar;
pub mod catalog;
pub mod clients;

use anyhow::Result;
use dialoguer::Confirm;

/// Ask before destructive actions unless `--yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
