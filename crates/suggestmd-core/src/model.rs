// Wire and config types.

use serde::Deserialize;
use std::path::PathBuf;

pub use crate::hooks::{ClaudeSettings, HookCommand, HookEntry};

/// JSON payload Claude Code writes to stdin when it invokes a hook.
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub transcript_path: String,
    #[serde(default)]
    pub hook_event_name: String,
    #[serde(default)]
    pub trigger: String,
}

/// Default command the suggestion prompt is piped into.
pub const DEFAULT_ANALYZER_COMMAND: &str =
    "claude --dangerously-skip-permissions --output-format text --print";

/// Resolved tool configuration, after merging config files over defaults.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub analyzer_command: String,
    pub suggestion_dir: PathBuf,
    pub memory_file: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            analyzer_command: DEFAULT_ANALYZER_COMMAND.to_string(),
            suggestion_dir: PathBuf::from("/tmp"),
            memory_file: "CLAUDE.md".to_string(),
        }
    }
}

/// A config file on disk. All fields optional so user and project configs can
/// each override only what they care about.
#[derive(Debug, Default, Deserialize)]
pub struct PartialToolConfig {
    pub analyzer: Option<PartialAnalyzer>,
    pub paths: Option<PartialPaths>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialAnalyzer {
    pub command: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialPaths {
    pub suggestion_dir: Option<PathBuf>,
    pub memory_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_types_reachable_here() {
        let settings = ClaudeSettings::default();
        assert!(settings.hooks.is_empty());
        assert!(settings.extra.is_empty());
    }
}
