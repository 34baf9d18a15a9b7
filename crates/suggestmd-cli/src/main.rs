use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "suggestmd",
    version,
    about = "CLAUDE.md update suggestions from Claude Code conversation history"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Register SessionEnd/PreCompact hooks in Claude Code settings
    InstallHook {
        /// user: ~/.claude/settings.json, project: .claude/settings.json
        #[arg(value_name = "SCOPE")]
        scope: String,
    },
    /// Merge a suggestion file into CLAUDE.md after confirmation
    Apply {
        /// Suggestion file produced by a hook run
        file: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Some(Command::InstallHook { scope }) => suggestmd_core::cmd_install_hook(&scope)?,
        Some(Command::Apply { file }) => suggestmd_core::cmd_apply(&file)?,
        // No subcommand: invoked as a hook, payload on stdin.
        None => suggestmd_core::cmd_run(&mut std::io::stdin(), &mut std::io::stdout())?,
    }
    Ok(())
}
