// Section-aware CLAUDE.md merge: parse ATX headers, splice suggestion
// subsections into matching level-2 sections, append the rest.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A markdown section: one ATX header line plus everything up to the next
/// header of any level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// 1 for `#`, 2 for `##`, up to 6.
    pub level: usize,
    /// Header text, whitespace-trimmed.
    pub title: String,
    /// The header line itself plus all following non-header lines, each
    /// newline-terminated.
    pub content: String,
    /// Zero-based source line range (inclusive).
    pub start_line: usize,
    pub end_line: usize,
}

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap())
}

/// Parse markdown content into a flat, document-ordered list of sections.
///
/// Lines before the first header are dropped. Any input parses; non-markdown
/// text simply yields no sections. Lines are split on `\n` only; a `\r` from
/// CRLF input stays in the content (titles lose it to trimming).
pub fn parse_sections(content: &str) -> Vec<Section> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = header_regex().captures(line) {
            if let Some(mut section) = current.take() {
                section.end_line = i - 1;
                sections.push(section);
            }

            current = Some(Section {
                level: caps[1].len(),
                title: caps[2].trim().to_string(),
                content: format!("{}\n", line),
                start_line: i,
                end_line: i,
            });
        } else if let Some(section) = current.as_mut() {
            section.content.push_str(line);
            section.content.push('\n');
        }
    }

    if let Some(mut section) = current.take() {
        section.end_line = lines.len() - 1;
        sections.push(section);
    }

    sections
}

/// Find a level-2 section by title (case-insensitive, trimmed).
pub fn find_section_by_title<'a>(sections: &'a [Section], title: &str) -> Option<&'a Section> {
    let normalized = normalize_title(title);
    sections
        .iter()
        .find(|s| s.level == 2 && normalize_title(&s.title) == normalized)
}

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Merge a suggestion document into existing CLAUDE.md content.
///
/// Suggestion subsections land at the end of the existing level-2 section
/// with the same title; level-2 sections with no existing counterpart are
/// appended at the end. A suggestion without any level-2 header is appended
/// verbatim. The function is total: it never fails, it only ever returns a
/// merged string.
pub fn insert_into_section(existing_content: &str, suggestion_content: &str) -> String {
    if existing_content.is_empty() {
        return suggestion_content.to_string();
    }

    let existing_sections = parse_sections(existing_content);
    let suggestion_sections = parse_sections(suggestion_content);

    if suggestion_sections.is_empty() {
        // No headers at all, treat the suggestion as unstructured text.
        return append_content(existing_content, suggestion_content);
    }

    // Full text span of every existing level-2 group (the section plus its
    // contiguous level>2 subsections), keyed by normalized title. The span is
    // what gets re-located in the result buffer when splicing.
    let mut existing_groups: HashMap<String, String> = HashMap::new();
    for (i, section) in existing_sections.iter().enumerate() {
        if section.level != 2 {
            continue;
        }
        let mut span = section.content.clone();
        for sub in existing_sections[i + 1..].iter().take_while(|s| s.level > 2) {
            span.push_str(&sub.content);
        }
        existing_groups.insert(normalize_title(&section.title), span);
    }

    // Group the suggestion the same way. Splices run in document order of the
    // first occurrence of each title; a duplicate title's later subsection
    // list overwrites the earlier one. Titles absent from the existing
    // document are collected for appending, in document order.
    let mut suggestion_groups: HashMap<String, String> = HashMap::new();
    let mut key_order: Vec<String> = Vec::new();
    let mut new_level2_sections: Vec<String> = Vec::new();
    let mut has_level2_sections = false;

    for (i, section) in suggestion_sections.iter().enumerate() {
        if section.level != 2 {
            continue;
        }
        has_level2_sections = true;
        let key = normalize_title(&section.title);

        let mut subsection_content = String::new();
        for sub in suggestion_sections[i + 1..].iter().take_while(|s| s.level > 2) {
            subsection_content.push_str(&sub.content);
        }

        if !suggestion_groups.contains_key(&key) {
            key_order.push(key.clone());
        }
        suggestion_groups.insert(key.clone(), subsection_content.clone());

        if !existing_groups.contains_key(&key) {
            let mut full_section = section.content.clone();
            full_section.push_str(&subsection_content);
            new_level2_sections.push(full_section);
        }
    }

    // Only level-1 or level>2 headers in the suggestion: nothing to match
    // against, append the whole thing.
    if !has_level2_sections {
        return append_content(existing_content, suggestion_content);
    }

    let mut result = existing_content.to_string();
    for key in &key_order {
        let span = match existing_groups.get(key) {
            Some(span) => span,
            None => continue,
        };
        let subsection_content = &suggestion_groups[key];
        if subsection_content.is_empty() {
            continue;
        }

        // Earlier splices shift byte offsets, so each group's span is
        // re-located by content search. A span no longer present verbatim is
        // silently skipped.
        if let Some(pos) = result.find(span.as_str()) {
            let end = pos + span.len();
            let mut before = result[..end].to_string();
            let after = &result[end..];

            // Exactly one blank line between the group and the new material.
            if !before.ends_with("\n\n") {
                if before.ends_with('\n') {
                    before.push('\n');
                } else {
                    before.push_str("\n\n");
                }
            }

            result = before + subsection_content + after;
        }
    }

    if !new_level2_sections.is_empty() {
        if !result.ends_with('\n') {
            result.push('\n');
        }
        result.push('\n');
        result.push_str(&new_level2_sections.join("\n"));
    }

    result
}

/// Append new content after existing content with a single blank line between.
pub fn append_content(existing: &str, new_content: &str) -> String {
    let mut result = existing.to_string();
    if !result.ends_with('\n') {
        result.push('\n');
    }
    result.push('\n');
    result.push_str(new_content);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_section_by_title_case_insensitive() {
        let sections = parse_sections("## Section 1\n\nContent 1\n\n## Section 2\n\nContent 2\n");

        let found = find_section_by_title(&sections, "section 1").unwrap();
        assert_eq!(found.title, "Section 1");

        assert!(find_section_by_title(&sections, "Non-existent").is_none());
    }

    #[test]
    fn test_find_section_by_title_ignores_deeper_levels() {
        let sections = parse_sections("## Level 2 Section\n\n### Level 3 Section\n\nContent\n");

        assert!(find_section_by_title(&sections, "Level 2 Section").is_some());
        assert!(find_section_by_title(&sections, "Level 3 Section").is_none());
    }

    #[test]
    fn test_append_content_spacing() {
        assert_eq!(
            append_content("Existing content\n", "New content"),
            "Existing content\n\nNew content"
        );
        assert_eq!(
            append_content("Existing content", "New content"),
            "Existing content\n\nNew content"
        );
        assert_eq!(append_content("", "New content"), "\n\nNew content");
    }
}
