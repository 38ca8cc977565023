//! Interactive forms using dialoguer.
//!
//! Terminal replacements for the PDP dialog and the feedback modal: a short
//! sequence of prompts ending in a confirmation. Declining the confirmation
//! returns `None` and nothing is submitted.

use crate::feedback::Feedback;
use crate::pdp::PdpForm;
use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::path::PathBuf;

/// Collect a PDP submission. Returns `None` if the user backs out.
pub fn pdp_form() -> anyhow::Result<Option<PdpForm>> {
    let theme = ColorfulTheme::default();

    println!("\n\x1b[1mGenerate Personal Development Plan\x1b[0m\n");

    let cv_path: String = Input::with_theme(&theme)
        .with_prompt("Path to your CV (PDF)")
        .validate_with(|input: &String| -> Result<(), &str> {
            let path = PathBuf::from(input.trim());
            if input.trim().is_empty() {
                Err("Please select a CV file")
            } else if !path.is_file() {
                Err("File not found")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let career_goal: String = Input::with_theme(&theme)
        .with_prompt("Your career goal")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Please set your career goal")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let additional_context: String = Input::with_theme(&theme)
        .with_prompt("Additional context (optional)")
        .allow_empty(true)
        .interact_text()?;

    let target_date: String = Input::with_theme(&theme)
        .with_prompt("Goal target date (YYYY-MM-DD)")
        .validate_with(|input: &String| -> Result<(), &str> {
            match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
                Ok(date) if date < Local::now().date_naive() => {
                    Err("Target date must not be in the past")
                }
                Ok(_) => Ok(()),
                Err(_) => Err("Use YYYY-MM-DD format"),
            }
        })
        .interact_text()?;

    let confirmed = Confirm::with_theme(&theme)
        .with_prompt("Generate the plan now?")
        .default(true)
        .interact()?;
    if !confirmed {
        return Ok(None);
    }

    Ok(Some(PdpForm {
        cv_path: PathBuf::from(cv_path.trim()),
        career_goal,
        additional_context,
        target_date,
    }))
}

/// Collect a feedback submission. Returns `None` if the user backs out.
pub fn feedback_form() -> anyhow::Result<Option<Feedback>> {
    let theme = ColorfulTheme::default();

    println!("\n\x1b[1mSend Feedback\x1b[0m\n");

    let contact: String = Input::with_theme(&theme)
        .with_prompt("Contact information (email/name)")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Contact information is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let feedback: String = Input::with_theme(&theme)
        .with_prompt("Feedback")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Feedback content is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let confirmed = Confirm::with_theme(&theme)
        .with_prompt("Send feedback?")
        .default(true)
        .interact()?;
    if !confirmed {
        return Ok(None);
    }

    Ok(Some(Feedback { contact, feedback }))
}
