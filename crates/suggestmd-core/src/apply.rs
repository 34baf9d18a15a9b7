// Apply a suggestion file to CLAUDE.md: show both documents, confirm, merge.

use crate::helpers::paths::expand_tilde;
use crate::{config, interactive, section};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::io::{BufRead, Write};

pub fn apply_suggestion(suggestion_path: &str) -> Result<()> {
    apply_suggestion_with_input(suggestion_path, &mut std::io::stdin().lock())
}

/// Same as [`apply_suggestion`] but reads the confirmation from the given
/// reader when not attached to a terminal, so tests can drive it.
pub fn apply_suggestion_with_input(suggestion_path: &str, input: &mut dyn BufRead) -> Result<()> {
    let suggestion_path = expand_tilde(suggestion_path);
    if !suggestion_path.exists() {
        anyhow::bail!("suggestion file does not exist: {}", suggestion_path.display());
    }
    let suggestion_content = fs::read_to_string(&suggestion_path)
        .with_context(|| format!("failed to read suggestion file {}", suggestion_path.display()))?;

    let config = config::load_config_with_precedence();
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let memory_path = cwd.join(&config.memory_file);

    let existing_content = if memory_path.exists() {
        fs::read_to_string(&memory_path)
            .with_context(|| format!("failed to read {}", memory_path.display()))?
    } else {
        String::new()
    };

    println!("{}", "=".repeat(80).bright_black());
    println!("{} Current {}", "▸".bright_cyan(), config.memory_file);
    println!("{}", "=".repeat(80).bright_black());
    if existing_content.is_empty() {
        println!("(file does not exist)");
    } else {
        println!("{}", existing_content);
    }
    println!();

    println!("{}", "=".repeat(80).bright_black());
    println!("{} Suggested additions", "▸".bright_cyan());
    println!("{}", "=".repeat(80).bright_black());
    println!("{}", suggestion_content);
    println!();

    let question = format!("Apply this suggestion to {}?", config.memory_file);
    let confirmed = if interactive::is_interactive() {
        interactive::prompt_confirm(&question, false)?
    } else {
        print!("{} (yes/no): ", question);
        std::io::stdout().flush()?;

        let mut response = String::new();
        let read = input.read_line(&mut response).context("failed to read input")?;
        if read == 0 {
            anyhow::bail!("no input");
        }
        let response = response.trim().to_lowercase();
        response == "yes" || response == "y"
    };

    if !confirmed {
        println!("{} Cancelled", "✗".bright_red());
        return Ok(());
    }

    let merged = section::insert_into_section(&existing_content, &suggestion_content);
    fs::write(&memory_path, merged)
        .with_context(|| format!("failed to write {}", memory_path.display()))?;

    println!("{} Updated {}", "✓".bright_green(), memory_path.display());
    println!("   Suggestion file: {}", suggestion_path.display());

    Ok(())
}
