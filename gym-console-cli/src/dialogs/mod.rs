//! Interactive entity forms.
//!
//! A dialog collects field values through a [`Prompter`], refuses to submit
//! while [`validator`] rules fail, and on confirmation shapes the values into
//! the request payload the matching resource client expects. Declining at
//! any confirmation returns `None`.

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use std::fmt::Display;
use std::str::FromStr;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

mod machine;
mod member;
mod plan;
mod prompt;
mod register;
mod session;
mod trainer;

pub use machine::MachineForm;
pub use member::MemberForm;
pub use plan::{PlanDialog, PlanForm};
pub use prompt::{Prompter, TerminalPrompter};
pub use register::RegisterForm;
pub use session::{compose_scheduled_date, SessionDialog, SessionForm};
pub use trainer::TrainerForm;

/// A selectable reference to another record
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub id: i64,
    pub label: String,
}

/// A form that can be filled interactively and shaped into a payload
pub trait Form: Validate {
    type Payload;

    /// Prompt for every field, using current values as defaults
    fn collect(&mut self, prompter: &mut dyn Prompter) -> Result<()>;

    fn into_payload(self) -> Result<Self::Payload>;
}

/// Fill, validate and confirm a form. `None` means the user cancelled.
pub fn run_dialog<F: Form>(
    prompter: &mut dyn Prompter,
    mut form: F,
    confirm_prompt: &str,
) -> Result<Option<F::Payload>> {
    loop {
        form.collect(prompter)?;

        match form.validate() {
            Ok(()) => break,
            Err(errors) => {
                println!();
                for message in validation_messages(&errors) {
                    println!("  {} {}", "✗".red(), message);
                }
                println!();

                if !prompter.confirm("Fix and try again?", true)? {
                    return Ok(None);
                }
            }
        }
    }

    if !prompter.confirm(confirm_prompt, true)? {
        return Ok(None);
    }

    form.into_payload().map(Some)
}

/// `field: message` lines, sorted by field
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();

    lines.sort();
    lines
}

/// Rejects `NaN` and infinities, which `f64` parsing accepts
pub(crate) fn finite_amount<T: std::borrow::Borrow<f64>>(value: T) -> Result<(), ValidationError> {
    if value.borrow().is_finite() {
        return Ok(());
    }
    let mut err = ValidationError::new("not_finite");
    err.message = Some(Cow::Borrowed("Amount must be a number"));
    Err(err)
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn prompt_text(
    prompter: &mut dyn Prompter,
    prompt: &str,
    current: &str,
) -> Result<String> {
    let default = if current.is_empty() { None } else { Some(current) };
    Ok(prompter.input(prompt, default)?.trim().to_string())
}

/// Re-prompts until the answer parses
pub(crate) fn prompt_parsed<T>(prompter: &mut dyn Prompter, prompt: &str, current: &T) -> Result<T>
where
    T: FromStr + Display,
{
    let default = current.to_string();
    loop {
        let answer = prompter.input(prompt, Some(&default))?;
        match answer.trim().parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("  {} '{}' is not a valid value", "✗".red(), answer.trim()),
        }
    }
}

/// Like [`prompt_parsed`], but an empty answer or `-` yields `None`. The
/// prompter's default covers the keep-current case.
pub(crate) fn prompt_optional<T>(
    prompter: &mut dyn Prompter,
    prompt: &str,
    current: Option<T>,
) -> Result<Option<T>>
where
    T: FromStr + Display + Copy,
{
    let default = current.map(|v| v.to_string());
    loop {
        let answer = prompter.input(prompt, default.as_deref())?;
        let answer = answer.trim();

        if answer.is_empty() || answer == "-" {
            return Ok(None);
        }

        match answer.parse() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("  {} '{}' is not a valid value", "✗".red(), answer),
        }
    }
}

pub(crate) fn prompt_date(
    prompter: &mut dyn Prompter,
    prompt: &str,
    current: NaiveDate,
) -> Result<NaiveDate> {
    let default = current.format("%Y-%m-%d").to_string();
    loop {
        let answer = prompter.input(prompt, Some(&default))?;
        match NaiveDate::parse_from_str(answer.trim(), "%Y-%m-%d") {
            Ok(date) => return Ok(date),
            Err(_) => println!("  {} Use the YYYY-MM-DD format", "✗".red()),
        }
    }
}

/// Pick one of a fixed set of values
pub(crate) fn prompt_choice<T>(
    prompter: &mut dyn Prompter,
    prompt: &str,
    options: &[T],
    current: T,
) -> Result<T>
where
    T: Copy + Display + PartialEq,
{
    let labels: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    let default = options.iter().position(|o| *o == current).unwrap_or(0);
    let index = prompter.select(prompt, &labels, default)?;
    Ok(options[index])
}

/// Pick a referenced record. Without options (the list failed to load or is
/// empty) the numeric ID is typed instead.
pub(crate) fn prompt_reference(
    prompter: &mut dyn Prompter,
    prompt: &str,
    options: &[Choice],
    current: Option<i64>,
) -> Result<Option<i64>> {
    if options.is_empty() {
        return prompt_optional(prompter, &format!("{} (ID)", prompt), current);
    }

    let labels: Vec<String> = options
        .iter()
        .map(|c| format!("{} (#{})", c.label, c.id))
        .collect();
    let default = current
        .and_then(|id| options.iter().position(|c| c.id == id))
        .unwrap_or(0);

    let index = prompter.select(prompt, &labels, default)?;
    Ok(Some(options[index].id))
}
