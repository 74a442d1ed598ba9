//! User input and interaction handling.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Select};

/// Interactive questions asked while creating projects or saving settings.
pub trait Prompter {
    /// Asks the user to pick one of `items`, returning its index.
    fn select(&self, prompt: String, items: &[String]) -> Result<usize>;

    /// Asks a yes/no question. Returns true without asking when `skip` is set.
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool>;
}

/// Arrow-key menus on the terminal.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: String, items: &[String]) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .max_length(10)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}
