use crate::model::{PartialToolConfig, ToolConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Load config with precedence:
/// 1. User config (~/.suggestmd/config.toml) - lowest priority
/// 2. Project config (.suggestmd.toml) - highest priority
///
/// Both files are optional; a file that fails to parse is reported as a
/// warning and skipped, so this never blocks a hook run.
pub fn load_config_with_precedence() -> ToolConfig {
    let mut configs = Vec::new();

    if let Some(home_dir) = dirs::home_dir() {
        let user_config = home_dir.join(".suggestmd/config.toml");
        if user_config.exists() {
            match load_single_config(&user_config) {
                Ok(cfg) => configs.push(cfg),
                Err(e) => eprintln!("Warning: Failed to load user config: {}", e),
            }
        }
    }

    let project_config = PathBuf::from(".suggestmd.toml");
    if project_config.exists() {
        match load_single_config(&project_config) {
            Ok(cfg) => configs.push(cfg),
            Err(e) => eprintln!("Warning: Failed to load project config: {}", e),
        }
    }

    merge_configs(configs)
}

fn load_single_config(path: &Path) -> Result<PartialToolConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: PartialToolConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

/// Apply partial configs over the defaults, later entries override earlier
/// ones field-by-field.
fn merge_configs(configs: Vec<PartialToolConfig>) -> ToolConfig {
    let mut merged = ToolConfig::default();

    for cfg in configs {
        if let Some(analyzer) = cfg.analyzer {
            if let Some(command) = analyzer.command {
                merged.analyzer_command = command;
            }
        }

        if let Some(paths) = cfg.paths {
            if let Some(suggestion_dir) = paths.suggestion_dir {
                merged.suggestion_dir = suggestion_dir;
            }
            if let Some(memory_file) = paths.memory_file {
                merged.memory_file = memory_file;
            }
        }
    }

    merged
}
