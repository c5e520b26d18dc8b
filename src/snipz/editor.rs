use crate::error::{Result, SnipzError};
use crate::model::SnippetDraft;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use uuid::Uuid;

/// Line separating the description from the code in an editor buffer.
pub const CODE_MARKER: &str = "--- code ---";

/// Formats a draft for the editor buffer.
///
/// ```text
/// Title
///
/// Description, any number of lines
/// --- code ---
/// code, kept verbatim
/// ```
///
/// A description line that reads like the marker is written with a leading
/// backslash so it stays part of the description.
pub fn to_buffer(draft: &SnippetDraft) -> String {
    let mut buffer = format!("{}\n\n", draft.title);
    for line in draft.description.lines() {
        if is_escaped_marker(line) {
            buffer.push('\\');
        }
        buffer.push_str(line);
        buffer.push('\n');
    }
    buffer.push_str(CODE_MARKER);
    buffer.push('\n');
    buffer.push_str(&draft.code);
    buffer
}

/// Parses an editor buffer back into a draft.
///
/// The first line is the title; everything up to the code marker is the
/// description; everything after it is code. Without a marker there is no code.
pub fn from_buffer(buffer: &str) -> SnippetDraft {
    let (head, code) = match split_at_marker(buffer) {
        Some((head, code)) => (head, code.to_string()),
        None => (buffer, String::new()),
    };

    let mut lines = head.splitn(2, '\n');
    let title = lines.next().unwrap_or_default().trim().to_string();
    let description = lines
        .next()
        .unwrap_or_default()
        .lines()
        .map(|line| match line.strip_prefix('\\') {
            Some(rest) if is_escaped_marker(rest) => rest,
            _ => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    SnippetDraft {
        title,
        description,
        code,
    }
}

/// The marker preceded by any number of backslashes.
fn is_escaped_marker(line: &str) -> bool {
    line.trim_start_matches('\\') == CODE_MARKER
}

fn split_at_marker(buffer: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in buffer.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == CODE_MARKER {
            return Some((&buffer[..offset], &buffer[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(SnipzError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait"
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(editor.as_str());
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| SnipzError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(SnipzError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(SnipzError::Io)
}

/// Opens an editor pre-filled with `initial` and returns what the user saved.
pub fn edit_draft(initial: &SnippetDraft) -> Result<SnippetDraft> {
    let temp_file = env::temp_dir().join(format!("snipz_edit-{}.txt", Uuid::new_v4()));
    fs::write(&temp_file, to_buffer(initial)).map_err(SnipzError::Io)?;

    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(from_buffer(&result?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_layout() {
        let draft = SnippetDraft::new("Reverse", "Slicing trick", "x[::-1]\n");
        assert_eq!(
            to_buffer(&draft),
            "Reverse\n\nSlicing trick\n--- code ---\nx[::-1]\n"
        );
    }

    #[test]
    fn buffer_without_description() {
        let draft = SnippetDraft::new("Reverse", "", "x[::-1]");
        assert_eq!(to_buffer(&draft), "Reverse\n\n--- code ---\nx[::-1]");
    }

    #[test]
    fn parses_multiline_description_and_code() {
        let buffer = "Title\n\nline one\nline two\n--- code ---\ndef f():\n    pass\n";
        let draft = from_buffer(buffer);
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.description, "line one\nline two");
        assert_eq!(draft.code, "def f():\n    pass\n");
    }

    #[test]
    fn code_is_kept_verbatim() {
        let buffer = "T\n--- code ---\n\n  indented\n\n";
        assert_eq!(from_buffer(buffer).code, "\n  indented\n\n");
    }

    #[test]
    fn missing_marker_means_no_code() {
        let draft = from_buffer("Title\n\nJust words");
        assert_eq!(draft.description, "Just words");
        assert_eq!(draft.code, "");
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(from_buffer(""), SnippetDraft::default());
    }

    #[test]
    fn buffer_roundtrip() {
        let original = SnippetDraft::new("Title", "Desc\nmore", "fn main() {}\n");
        assert_eq!(from_buffer(&to_buffer(&original)), original);
    }

    #[test]
    fn description_marker_line_survives_roundtrip() {
        let original = SnippetDraft::new("T", "before\n--- code ---\nafter", "x = 1\n");
        let buffer = to_buffer(&original);
        assert!(buffer.contains("\\--- code ---\n"));
        assert_eq!(from_buffer(&buffer), original);
    }

    #[test]
    fn already_escaped_description_line_roundtrips() {
        let original = SnippetDraft::new("T", "\\--- code ---", "x");
        assert_eq!(from_buffer(&to_buffer(&original)), original);
    }
}
