//! Terminal confirmation for destructive panel actions.

use anyhow::Result;
use linkholder_core::panel::Confirm;

pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let answer = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}
