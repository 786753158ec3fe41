use crate::output::Output;
use cinetrack_core::Confirmation;
use color_eyre::Result;
use dialoguer::{Confirm, Password};
use tracing::warn;

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Asks on the terminal, defaulting to "no". A prompt that cannot be shown
/// (no TTY) counts as declined.
pub struct TerminalConfirmation<'a> {
    output: &'a Output,
}

impl<'a> TerminalConfirmation<'a> {
    pub fn new(output: &'a Output) -> Self {
        Self { output }
    }
}

impl Confirmation for TerminalConfirmation<'_> {
    fn confirm(&self, prompt: &str) -> bool {
        match prompt_yes_no(prompt, Some(false)) {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Confirmation prompt failed: {}", e);
                self.output.error(format!("{} Re-run with --yes to skip the prompt.", e));
                false
            }
        }
    }
}
