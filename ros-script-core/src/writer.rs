use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::script::Script;

/// Errors that can occur while rendering a [`Script`] to text.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A rendered line contains characters the device console cannot take.
    #[error("section '{section}' line {line}: non-ASCII or control character in {text:?}")]
    UnsafeText {
        section: String,
        line: usize,
        text: String,
    },
    /// Failed to write output file.
    #[error("failed to write script file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a [`Script`] into newline-delimited ASCII text.
///
/// Every line is checked after quoting; the first offending line aborts the
/// write so that no partial script is returned.
pub fn write(script: &Script) -> Result<String, WriteError> {
    let mut out = String::new();
    for text in &script.header {
        push_checked(&mut out, "header", 0, &format!("# {text}"))?;
    }
    for section in &script.sections {
        push_checked(&mut out, &section.name, 0, &format!("# --- {} ---", section.name))?;
        for (idx, line) in section.lines.iter().enumerate() {
            push_checked(&mut out, &section.name, idx + 1, &line.to_string())?;
        }
    }
    Ok(out)
}

/// Render a [`Script`] and write it to `path`.
pub fn write_file(script: &Script, path: &Path) -> Result<(), WriteError> {
    let text = write(script)?;
    fs::write(path, text)?;
    Ok(())
}

fn push_checked(out: &mut String, section: &str, line: usize, text: &str) -> Result<(), WriteError> {
    if !is_device_safe(text) {
        return Err(WriteError::UnsafeText {
            section: section.to_string(),
            line,
            text: text.to_string(),
        });
    }
    out.push_str(text);
    out.push('\n');
    Ok(())
}

fn is_device_safe(text: &str) -> bool {
    text.chars()
        .all(|ch| ch.is_ascii() && (ch == ' ' || !ch.is_ascii_control()))
}
