// src/target/wordlist.rs
// =============================================================================
// Loads newline-separated lists (words and extensions) from disk.
//
// Every line becomes one entry, blank lines included. A file ending in a
// newline therefore yields a final empty entry, which probes the bare
// `word` (for extensions) or the base path itself (for words).
// `BlankLines::DropTrailing` removes only that final entry.
// =============================================================================

use std::path::Path;

use super::TargetError;

// What to do with the empty entry left behind by a final newline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankLines {
    /// Keep it (probes a degenerate candidate)
    #[default]
    Keep,
    /// Drop the last entry if it is empty
    DropTrailing,
}

// Splits raw list content into entries
//
// Lines are split on '\n'; a trailing '\r' (CRLF files) is stripped from
// each entry. Blank lines in the middle of the file are always kept.
pub fn split_entries(content: &str, blanks: BlankLines) -> Vec<String> {
    let mut entries: Vec<String> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();

    if blanks == BlankLines::DropTrailing && entries.last().is_some_and(|e| e.is_empty()) {
        entries.pop();
    }

    entries
}

// Reads a list file and splits it into entries
//
// Invalid UTF-8 is replaced rather than rejected; wordlists scraped from
// the web are rarely clean.
pub async fn load_list(path: &Path, blanks: BlankLines) -> Result<Vec<String>, TargetError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| TargetError::ReadList {
            path: path.display().to_string(),
            source,
        })?;

    Ok(split_entries(&String::from_utf8_lossy(&bytes), blanks))
}
