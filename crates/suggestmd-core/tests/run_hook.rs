use serial_test::serial;
use std::fs;
use std::io::Cursor;
use std::time::{Duration, Instant};
use suggestmd_core::{cmd_run, RUNNING_ENV};
use tempfile::TempDir;

struct ChangeDir {
    original: std::path::PathBuf,
}

impl ChangeDir {
    fn new(path: &std::path::Path) -> Self {
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(path).unwrap();
        Self { original }
    }
}

impl Drop for ChangeDir {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

fn run(input: &str) -> (anyhow::Result<()>, String) {
    let mut output = Vec::new();
    let result = cmd_run(&mut Cursor::new(input.as_bytes()), &mut output);
    (result, String::from_utf8(output).unwrap())
}

fn hook_payload(transcript_path: &std::path::Path) -> String {
    serde_json::json!({
        "transcript_path": transcript_path.to_str().unwrap(),
        "hook_event_name": "SessionEnd",
        "trigger": "manual"
    })
    .to_string()
}

#[test]
#[serial]
fn test_run_skips_when_already_running() {
    std::env::set_var(RUNNING_ENV, "1");
    let (result, output) = run("not even json");
    std::env::remove_var(RUNNING_ENV);

    result.unwrap();
    assert!(output.contains("skipping"));
}

#[test]
#[serial]
fn test_run_rejects_invalid_hook_input() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());

    let (result, _) = run("{ definitely not json");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("failed to decode hook input"));
}

#[test]
#[serial]
fn test_run_rejects_empty_transcript_path() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());

    let (result, _) = run(r#"{"transcript_path": "", "hook_event_name": "SessionEnd"}"#);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("empty transcript_path"));
}

#[test]
#[serial]
fn test_run_rejects_missing_transcript_file() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());

    let payload = hook_payload(&tmp.path().join("missing.jsonl"));
    let (result, _) = run(&payload);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("transcript file does not exist"));
}

#[test]
#[serial]
fn test_run_skips_on_empty_history() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());

    let transcript = tmp.path().join("session.jsonl");
    fs::write(&transcript, "garbage line\n{\"message\":{}}\n").unwrap();

    let (result, output) = run(&hook_payload(&transcript));
    result.unwrap();
    assert!(output.contains("Conversation history is empty"));
}

#[test]
#[serial]
fn test_run_starts_background_analysis() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());

    // Use `cat` as the analyzer so the background script just copies the
    // prompt into the suggestion file, and keep outputs inside the tempdir.
    fs::write(
        ".suggestmd.toml",
        format!(
            "[analyzer]\ncommand = \"cat\"\n\n[paths]\nsuggestion_dir = '{}'\n",
            tmp.path().display()
        ),
    )
    .unwrap();

    fs::write("CLAUDE.md", "# Project\n\n## Notes\n\nKeep.\n").unwrap();

    let transcript = tmp.path().join("session-abc.jsonl");
    fs::write(
        &transcript,
        r#"{"message":{"role":"user","content":"Always run make lint"}}"#,
    )
    .unwrap();

    let (result, output) = run(&hook_payload(&transcript));
    result.unwrap();

    assert!(output.contains("Analyzing conversation history"));
    assert!(output.contains("Hook: SessionEnd (trigger: manual)"));
    assert!(output.contains("Background analysis started"));

    // The suggestion file path is announced in the output.
    let suggestion_path = output
        .lines()
        .find_map(|line| line.strip_prefix("Suggestion file: "))
        .unwrap()
        .to_string();
    assert!(suggestion_path.contains("suggestmd-session-abc-"));

    // Wait for the detached script to finish writing the suggestion.
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Ok(content) = fs::read_to_string(&suggestion_path) {
            if content.contains("</conversation_history>") {
                assert!(content.contains("Always run make lint"));
                assert!(content.contains("<existing_claude_md>"));
                break;
            }
        }
        assert!(Instant::now() < deadline, "suggestion file never completed");
        std::thread::sleep(Duration::from_millis(50));
    }
}
