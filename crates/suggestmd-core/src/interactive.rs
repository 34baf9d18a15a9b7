// Terminal detection for the apply confirmation prompt.

use anyhow::Result;
use inquire::Confirm;
use std::io::IsTerminal;

/// Whether to show an inquire prompt. False under tests, in CI, or whenever
/// stdin is not a terminal; apply then falls back to reading plain input.
pub fn is_interactive() -> bool {
    if cfg!(test) || std::env::var("SUGGESTMD_TEST").is_ok() || is_ci() {
        return false;
    }

    std::io::stdin().is_terminal()
}

fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI"]
        .iter()
        .any(|var| std::env::var(var).is_ok())
}

pub fn prompt_confirm(message: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new(message).with_default(default).prompt()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_interactive_under_test_harness() {
        assert!(!is_interactive());
    }
}
