// Extract a readable conversation history from a Claude Code transcript
// (newline-delimited JSON records).

use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to open transcript {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read transcript {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a JSONL transcript and format it as markdown, one `### {role}` block
/// per message. Blank lines, malformed records, and messages without text
/// content are skipped.
pub fn extract_conversation_history(transcript_path: &Path) -> Result<String, TranscriptError> {
    let file = File::open(transcript_path).map_err(|source| TranscriptError::Open {
        path: transcript_path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut history = String::new();
    for line in reader.lines() {
        let line = line.map_err(|source| TranscriptError::Read {
            path: transcript_path.to_path_buf(),
            source,
        })?;
        if line.is_empty() {
            continue;
        }

        let record: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(_) => continue,
        };

        let role = record["message"]["role"].as_str().unwrap_or("");
        let content = extract_text_content(&record["message"]["content"]);
        if content.is_empty() {
            continue;
        }

        history.push_str(&format!("### {}\n\n{}\n\n", role, content));
    }

    Ok(history.trim().to_string())
}

/// The content field is either a plain string or an array of content items;
/// only `{"type": "text"}` items carry text.
fn extract_text_content(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            let texts: Vec<&str> = items
                .iter()
                .filter(|item| item["type"].as_str() == Some("text"))
                .filter_map(|item| item["text"].as_str())
                .filter(|text| !text.is_empty())
                .collect();
            texts.join("\n")
        }
        _ => String::new(),
    }
}
