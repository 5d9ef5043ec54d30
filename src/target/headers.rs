// src/target/headers.rs
// =============================================================================
// Parses the `-H` header string into a header map.
//
// Format: `Key: Value` pairs separated by `|`
//   "User-Agent : BLAH | Referer : http://example.com"
//
// Each pair is split on the FIRST ':' only, so values may contain colons
// (URLs, timestamps). Both sides are trimmed.
// =============================================================================

use std::collections::BTreeMap;

use super::TargetError;

// Parses a header string into an ordered name -> value map
//
// Returns an empty map for an empty (or all-whitespace) string.
// Blank segments such as the one produced by a trailing '|' are ignored.
// Header names are case-insensitive: if the same name appears twice in any
// casing, the later pair (name spelling and value) wins.
pub fn parse_headers(spec: &str) -> Result<BTreeMap<String, String>, TargetError> {
    let mut headers = BTreeMap::new();

    for pair in spec.split('|') {
        if pair.trim().is_empty() {
            continue;
        }

        let (key, value) = pair
            .split_once(':')
            .ok_or_else(|| TargetError::MalformedHeader(pair.trim().to_string()))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(TargetError::MalformedHeader(pair.trim().to_string()));
        }

        headers.retain(|existing: &String, _| !existing.eq_ignore_ascii_case(key));
        headers.insert(key.to_string(), value.trim().to_string());
    }

    Ok(headers)
}
