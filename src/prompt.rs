//! User interaction.
//! Confirmation prompts go through the [`Prompter`] trait so tasks can be
//! driven without a terminal.

use crate::error::{Error, Result};
use dialoguer::Confirm;

pub trait Prompter {
    /// Asks a yes/no question.
    ///
    /// # Arguments
    /// * `skip_prompt` - Answer "yes" without asking
    /// * `prompt` - Question shown to the user
    fn confirm(&self, skip_prompt: bool, prompt: String) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip_prompt: bool, prompt: String) -> Result<bool> {
        if skip_prompt {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}
