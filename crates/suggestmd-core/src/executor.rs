// Launch the analyzer command in a detached background shell so the hook can
// return immediately.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Everything the background script needs. Paths are embedded single-quoted,
/// so they must not contain single quotes themselves.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    pub project_root: PathBuf,
    pub prompt_file: PathBuf,
    pub log_file: PathBuf,
    pub hook_info: String,
    pub suggestion_file: PathBuf,
    pub analyzer_command: String,
}

/// Build the shell script run in the background: feed the prompt to the
/// analyzer, tee the suggestion, append diagnostics to the log, fire a
/// best-effort desktop notification, clean up the prompt file.
pub fn build_script(config: &ExecutorConfig) -> String {
    // The script contains `"##`, so the raw string needs a three-hash
    // delimiter.
    format!(
        r###"
cd '{root}' || exit 1
export SUGGESTMD_RUNNING=1

# Run the analyzer; its output is both the suggestion and the log body
{analyzer} < '{prompt}' | tee '{suggestion}' > '{log}' 2>&1

# Append hook details and the full prompt to the log
{{
    echo ""
    echo "---"
    echo ""
    echo "## Hook invocation"
    echo ""
    echo "{hook_info}"
    echo ""
    echo "---"
    echo ""
    echo "## Full prompt"
    echo ""
    cat '{prompt}'
}} >> '{log}'

# Completion notification (macOS only, ignored elsewhere)
osascript -e 'display notification "Suggestion: {suggestion}\nApply: suggestmd apply {suggestion}" with title "CLAUDE.md suggestions" subtitle "Analysis complete"' 2>/dev/null || true

rm -f '{prompt}'
"###,
        root = config.project_root.display(),
        analyzer = config.analyzer_command,
        prompt = config.prompt_file.display(),
        suggestion = config.suggestion_file.display(),
        log = config.log_file.display(),
        hook_info = config.hook_info,
    )
}

/// Spawn the script detached. The child keeps running after this process
/// exits; its output goes to the log and suggestion files, not our stdio.
pub fn execute_in_background(config: &ExecutorConfig) -> Result<()> {
    let script = build_script(config);

    Command::new("sh")
        .arg("-c")
        .arg(&script)
        .env("SUGGESTMD_RUNNING", "1")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("failed to start background analysis")?;

    Ok(())
}
