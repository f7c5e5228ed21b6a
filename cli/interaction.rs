use anyhow::Result;
use console::{Term, style};
use dialoguer::Confirm;

pub fn confirm_write(file_count: usize, no_confirm: bool) -> Result<bool> {
    if no_confirm || file_count <= 1 || !Term::stdout().is_term() {
        return Ok(true);
    }

    let prompt = format!(
        "Remove comments from {} files in place?",
        style(file_count).cyan()
    );

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    if !confirmed {
        println!("Aborted by user.");
    }

    Ok(confirmed)
}
