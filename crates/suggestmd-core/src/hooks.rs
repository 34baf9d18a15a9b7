// Register suggestmd as a SessionEnd/PreCompact hook in Claude Code's
// settings.json.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const COMMAND_NAME: &str = "suggestmd";

pub const SCOPE_USER: &str = "user";
pub const SCOPE_PROJECT: &str = "project";

const HOOK_EVENTS: [&str; 2] = ["SessionEnd", "PreCompact"];

/// The parts of .claude/settings.json this tool understands. Unrecognized
/// top-level keys are carried through `extra` so a rewrite never loses them.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ClaudeSettings {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hooks: BTreeMap<String, Vec<HookEntry>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookEntry {
    pub hooks: Vec<HookCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookCommand {
    #[serde(rename = "type")]
    pub kind: String,
    pub command: String,
}

/// Install hooks into settings.json for the given scope (`user` or
/// `project`). Idempotent: an already-registered suggestmd command is left
/// alone.
pub fn install_hooks(scope: &str) -> Result<()> {
    let settings_path = match scope {
        SCOPE_USER => {
            let home_dir = dirs::home_dir().context("could not determine home directory")?;
            let claude_dir = home_dir.join(".claude");
            if !claude_dir.exists() {
                fs::create_dir_all(&claude_dir).with_context(|| {
                    format!("failed to create directory {}", claude_dir.display())
                })?;
            }
            claude_dir.join("settings.json")
        }
        SCOPE_PROJECT => {
            let claude_dir = PathBuf::from(".claude");
            if !claude_dir.exists() {
                anyhow::bail!(
                    ".claude directory not found. This does not look like a Claude Code project."
                );
            }
            claude_dir.join("settings.json")
        }
        _ => anyhow::bail!("invalid scope '{}' (valid values: user, project)", scope),
    };

    // Register whatever binary is actually running; fall back to the bare
    // command name if the path cannot be resolved.
    let exec_path = std::env::current_exe()
        .ok()
        .and_then(|p| p.to_str().map(str::to_string))
        .unwrap_or_else(|| COMMAND_NAME.to_string());

    let mut settings = load_settings(&settings_path)
        .with_context(|| format!("failed to load settings {}", settings_path.display()))?;

    let hook_command = HookCommand {
        kind: "command".to_string(),
        command: exec_path.clone(),
    };

    for event in HOOK_EVENTS {
        let entries = settings.hooks.entry(event.to_string()).or_default();
        add_hook_if_not_exists(entries, &hook_command);
    }

    save_settings(&settings_path, &settings)
        .with_context(|| format!("failed to save settings {}", settings_path.display()))?;

    let scope_label = match scope {
        SCOPE_USER => "user settings (all projects)",
        _ => "project settings (current project only)",
    };

    println!("{} {}", "✓".bright_green(), "Hooks installed".green());
    println!("   Scope: {}", scope_label);
    println!("   Settings file: {}", settings_path.display());
    println!("   Command: {}", exec_path);
    println!();
    println!("Registered hooks:");
    println!("  - SessionEnd: when a session ends normally");
    println!("  - PreCompact: before compaction at the token limit");

    Ok(())
}

/// Load settings, returning the empty default when the file does not exist.
pub fn load_settings(path: &Path) -> Result<ClaudeSettings> {
    if !path.exists() {
        return Ok(ClaudeSettings::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let settings: ClaudeSettings = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &ClaudeSettings) -> Result<()> {
    let data = serde_json::to_string_pretty(settings)?;
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Append the hook command unless a suggestmd registration is already
/// present, matching by exact command or by binary basename.
fn add_hook_if_not_exists(entries: &mut Vec<HookEntry>, hook_command: &HookCommand) {
    for entry in entries.iter() {
        for command in &entry.hooks {
            let basename = Path::new(&command.command)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("");
            if command.kind == hook_command.kind
                && (command.command == hook_command.command
                    || basename == COMMAND_NAME
                    || basename == format!("{}.exe", COMMAND_NAME))
            {
                println!("{} suggestmd hook is already registered", "▸".yellow());
                return;
            }
        }
    }

    if let Some(first) = entries.first_mut() {
        first.hooks.push(hook_command.clone());
        return;
    }

    entries.push(HookEntry {
        hooks: vec![hook_command.clone()],
    });
}
