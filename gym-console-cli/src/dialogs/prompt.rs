use anyhow::Result;
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};

/// Source of interactive answers for dialogs and confirmations
pub trait Prompter {
    /// Free text; an empty answer yields `default` when one is given
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

    fn password(&mut self, prompt: &str) -> Result<String>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Index of the chosen item; `items` is never empty
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Indices of the chosen items, in item order
    fn multi_select(&mut self, prompt: &str, items: &[String], defaults: &[bool])
        -> Result<Vec<usize>>;
}

/// dialoguer-backed prompter for the terminal
#[derive(Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);

        if let Some(default) = default {
            input = input.default(default.to_string());
        }

        Ok(input.interact_text()?)
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        Ok(Password::new().with_prompt(prompt).interact()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn multi_select(
        &mut self,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> Result<Vec<usize>> {
        Ok(MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .defaults(defaults)
            .interact()?)
    }
}
