pub mod apply;
pub mod config;
pub mod executor;
pub mod helpers;
pub mod hooks;
pub mod interactive;
pub mod model;
pub mod prompt;
pub mod section;
pub mod transcript;

use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};

/// Environment variable set while a background analysis is running, so a hook
/// fired by the analysis session itself does not start another one.
pub const RUNNING_ENV: &str = "SUGGESTMD_RUNNING";

/// Hook mode: read the hook payload from `input`, extract the conversation
/// history and kick off a background analysis. Progress messages go to
/// `output` (they show up in the Claude Code hook log).
pub fn cmd_run(input: &mut dyn Read, output: &mut dyn Write) -> Result<()> {
    if matches!(std::env::var(RUNNING_ENV), Ok(v) if v == "1") {
        writeln!(output, "Analysis already in progress, skipping")?;
        return Ok(());
    }

    let hook_input: model::HookInput =
        serde_json::from_reader(input).context("failed to decode hook input")?;

    if hook_input.transcript_path.is_empty() {
        anyhow::bail!("hook input has an empty transcript_path");
    }

    let transcript_path = helpers::paths::expand_tilde(&hook_input.transcript_path);
    if !transcript_path.exists() {
        anyhow::bail!("transcript file does not exist: {}", transcript_path.display());
    }

    let config = config::load_config_with_precedence();
    let project_root = std::env::current_dir().context("failed to determine current directory")?;

    let conversation_id = transcript_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("session")
        .to_string();
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();

    let log_file = config
        .suggestion_dir
        .join(format!("suggestmd-{}-{}.log", conversation_id, timestamp));
    let suggestion_file = config
        .suggestion_dir
        .join(format!("suggestmd-{}-{}.md", conversation_id, timestamp));

    let hook_info = format!(
        "Hook: {} (trigger: {})",
        hook_input.hook_event_name, hook_input.trigger
    );

    writeln!(output, "Analyzing conversation history...")?;
    writeln!(output, "{}", hook_info)?;
    writeln!(output, "Running in the background")?;
    writeln!(output, "Log file: {}", log_file.display())?;
    writeln!(output, "Suggestion file: {}", suggestion_file.display())?;

    let conversation_history = transcript::extract_conversation_history(&transcript_path)?;
    if conversation_history.is_empty() {
        writeln!(output, "Conversation history is empty, skipping")?;
        return Ok(());
    }

    let memory_path = project_root.join(&config.memory_file);
    let existing_memory = fs::read_to_string(&memory_path).unwrap_or_default();

    let prompt_content =
        prompt::generate_prompt(prompt::DEFAULT_PROMPT, &conversation_history, &existing_memory);

    let prompt_file = std::env::temp_dir().join(format!(
        "suggestmd-prompt-{}-{}.md",
        conversation_id, timestamp
    ));
    fs::write(&prompt_file, &prompt_content)
        .with_context(|| format!("failed to write prompt file {}", prompt_file.display()))?;

    let exec_config = executor::ExecutorConfig {
        project_root,
        prompt_file: prompt_file.clone(),
        log_file: log_file.clone(),
        hook_info,
        suggestion_file: suggestion_file.clone(),
        analyzer_command: config.analyzer_command,
    };

    if let Err(e) = executor::execute_in_background(&exec_config) {
        let _ = fs::remove_file(&prompt_file);
        return Err(e);
    }

    writeln!(output)?;
    writeln!(output, "Background analysis started")?;
    writeln!(output, "   Result: cat {}", log_file.display())?;
    writeln!(output, "   Apply:  suggestmd apply {}", suggestion_file.display())?;

    Ok(())
}

/// Register hooks in settings.json (`user` or `project` scope).
pub fn cmd_install_hook(scope: &str) -> Result<()> {
    hooks::install_hooks(scope)
}

/// Merge a suggestion file into CLAUDE.md after confirmation.
pub fn cmd_apply(suggestion_path: &str) -> Result<()> {
    apply::apply_suggestion(suggestion_path)
}
