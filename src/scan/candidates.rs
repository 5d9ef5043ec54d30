// src/scan/candidates.rs
// =============================================================================
// Generates the URLs to probe.
//
// Order is extension-major: every word with the first extension, then every
// word with the second extension, and so on. The sequence is lazy and can
// be restarted by calling `candidates()` again on the same target.
//
// Example (words = [admin, login], extensions = ["", .php]):
//   /admin, /login, /admin.php, /login.php
// =============================================================================

use std::borrow::Cow;
use std::iter::FusedIterator;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::target::Target;

// One URL to probe, along with the inputs it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: Url,
    pub word: String,
    pub extension: String,
    word_index: usize,
}

impl Candidate {
    /// True for the first candidate of each extension
    pub fn starts_extension(&self) -> bool {
        self.word_index == 0
    }
}

// Lazy iterator over every (extension, word) combination of a target
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    target: &'a Target,
    ext_index: usize,
    word_index: usize,
}

// Starts a fresh candidate sequence for `target`
pub fn candidates(target: &Target) -> Candidates<'_> {
    Candidates {
        target,
        ext_index: 0,
        word_index: 0,
    }
}

impl Iterator for Candidates<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let words = self.target.words();
        let extension = self.target.extensions().get(self.ext_index)?;
        let word = words.get(self.word_index)?;

        let mut url = self.target.base_url().clone();
        let segments = join_segments(url.path(), &format!("{word}{extension}"));
        // Segments are pushed as literal text: '%', '/' and '\' inside a
        // word are escaped rather than read as encodings or separators.
        // http(s) URLs always have a path, so this never fails.
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(&segments);
        }

        let candidate = Candidate {
            url,
            word: word.clone(),
            extension: extension.clone(),
            word_index: self.word_index,
        };

        self.word_index += 1;
        if self.word_index == words.len() {
            self.word_index = 0;
            self.ext_index += 1;
        }

        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let words = self.target.words().len();
        let remaining_exts = self.target.extensions().len().saturating_sub(self.ext_index);
        let remaining = (remaining_exts * words).saturating_sub(self.word_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Candidates<'_> {}

impl FusedIterator for Candidates<'_> {}

// Joins an encoded URL path and a raw relative path into decoded segments
//
// The base path comes from a parsed URL, so its segments are
// percent-decoded first. The relative part is taken literally: "%2e%2e" is
// a file name, not "..". Empty and "." segments are dropped, a literal ".."
// removes the previous segment (never going above the root):
//   join_segments("/app/", "admin.php") == ["app", "admin.php"]
//   join_segments("/", "")              == []
//   join_segments("/a/b", "../c")       == ["a", "c"]
pub fn join_segments(base_path: &str, relative: &str) -> Vec<String> {
    let base = base_path
        .split('/')
        .map(|part| percent_decode_str(part).decode_utf8_lossy());
    let relative = relative.split('/').map(Cow::Borrowed);

    let mut parts: Vec<String> = Vec::new();
    for part in base.chain(relative) {
        match part.as_ref() {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part.into_owned()),
        }
    }

    parts
}
