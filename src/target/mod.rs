// src/target/mod.rs
// =============================================================================
// The scan target: everything a run needs, validated once up front.
//
// A `Target` is built from a `TargetSpec` (plain values from the CLI) and
// is immutable afterwards. The scheduler shares it between probe tasks
// behind an `Arc`, so no locking is ever needed to read it.
//
// Submodules:
// - headers: parses the `Key: Value | Key: Value` header string
// - wordlist: loads newline-separated word and extension lists
// =============================================================================

mod headers;
mod wordlist;

pub use headers::parse_headers;
pub use wordlist::{load_list, split_entries, BlankLines};

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;
use tokio::sync::Semaphore;
use url::Url;

/// Per-request timeout applied to every probe
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Everything that can be wrong with the scan configuration
//
// All of these are detected before the first request is sent.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid target url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported url scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("malformed header '{0}', expected 'Key: Value'")]
    MalformedHeader(String),

    #[error("invalid header name '{0}'")]
    InvalidHeaderName(String),

    #[error("invalid value for header '{0}'")]
    InvalidHeaderValue(String),

    #[error("invalid thread number {0}, must be at least 1")]
    InvalidConcurrency(usize),

    #[error("{0} list is empty")]
    EmptyList(&'static str),

    #[error("failed to read list '{path}': {source}")]
    ReadList {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// Raw, unvalidated inputs for a scan
#[derive(Debug, Clone)]
pub struct TargetSpec {
    pub url: String,
    pub words: Vec<String>,
    pub extensions: Vec<String>,
    pub headers: BTreeMap<String, String>,
    pub concurrency: usize,
    pub timeout: Duration,
    pub verify_tls: bool,
}

impl TargetSpec {
    pub fn new(url: impl Into<String>, words: Vec<String>, extensions: Vec<String>) -> Self {
        Self {
            url: url.into(),
            words,
            extensions,
            headers: BTreeMap::new(),
            concurrency: 1,
            timeout: REQUEST_TIMEOUT,
            verify_tls: false,
        }
    }
}

/// Validated, read-only description of a scan.
#[derive(Debug, Clone)]
pub struct Target {
    base_url: Url,
    words: Vec<String>,
    extensions: Vec<String>,
    headers: HeaderMap,
    concurrency: NonZeroUsize,
    timeout: Duration,
    verify_tls: bool,
}

impl Target {
    pub fn new(spec: TargetSpec) -> Result<Self, TargetError> {
        let base_url = Url::parse(&spec.url).map_err(|source| TargetError::InvalidUrl {
            url: spec.url.clone(),
            source,
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(TargetError::UnsupportedScheme(base_url.scheme().to_string()));
        }

        let concurrency = NonZeroUsize::new(spec.concurrency)
            .filter(|n| n.get() <= Semaphore::MAX_PERMITS)
            .ok_or(TargetError::InvalidConcurrency(spec.concurrency))?;

        if spec.words.is_empty() {
            return Err(TargetError::EmptyList("word"));
        }
        if spec.extensions.is_empty() {
            return Err(TargetError::EmptyList("extension"));
        }

        let headers = build_header_map(&spec.headers)?;

        Ok(Self {
            base_url,
            words: spec.words,
            extensions: spec.extensions,
            headers,
            concurrency,
            timeout: spec.timeout,
            verify_tls: spec.verify_tls,
        })
    }

    /// Normalized base URL; every candidate is rooted at its path
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Headers attached to every probe
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Maximum number of probes in flight at once
    pub fn concurrency(&self) -> NonZeroUsize {
        self.concurrency
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether TLS certificates are validated. Off by default so that
    /// targets with self-signed or expired certificates can still be probed.
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Number of candidates a full run will probe
    pub fn candidate_count(&self) -> usize {
        self.words.len() * self.extensions.len()
    }
}

// Converts the parsed header strings into a typed HeaderMap
//
// Names and values are kept as given; only their validity as HTTP
// tokens is checked. `parse_headers` already folds names that differ only
// in case, so each HTTP header is inserted once.
fn build_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, TargetError> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| TargetError::InvalidHeaderName(key.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| TargetError::InvalidHeaderValue(key.clone()))?;
        map.insert(name, value);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> TargetSpec {
        TargetSpec::new(
            "http://example.com/app/",
            vec!["admin".to_string(), "login".to_string()],
            vec!["".to_string(), ".php".to_string()],
        )
    }

    #[test]
    fn test_valid_target() {
        let target = Target::new(spec()).unwrap();
        assert_eq!(target.base_url().as_str(), "http://example.com/app/");
        assert_eq!(target.concurrency().get(), 1);
        assert_eq!(target.timeout(), REQUEST_TIMEOUT);
        assert!(!target.verify_tls());
        assert_eq!(target.candidate_count(), 4);
    }

    #[test]
    fn test_url_is_normalized() {
        let mut spec = spec();
        spec.url = "HTTP://Example.COM".to_string();
        let target = Target::new(spec).unwrap();
        assert_eq!(target.base_url().as_str(), "http://example.com/");
    }

    #[test]
    fn test_invalid_url() {
        let mut spec = spec();
        spec.url = "not a url".to_string();
        assert!(matches!(Target::new(spec), Err(TargetError::InvalidUrl { .. })));
    }

    #[test]
    fn test_unsupported_scheme() {
        let mut spec = spec();
        spec.url = "ftp://example.com/".to_string();
        assert!(matches!(Target::new(spec), Err(TargetError::UnsupportedScheme(s)) if s == "ftp"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut spec = spec();
        spec.concurrency = 0;
        assert!(matches!(Target::new(spec), Err(TargetError::InvalidConcurrency(0))));
    }

    #[test]
    fn test_empty_lists_rejected() {
        let mut no_words = spec();
        no_words.words.clear();
        assert!(matches!(Target::new(no_words), Err(TargetError::EmptyList("word"))));

        let mut no_exts = spec();
        no_exts.extensions.clear();
        assert!(matches!(Target::new(no_exts), Err(TargetError::EmptyList("extension"))));
    }

    #[test]
    fn test_headers_converted_verbatim() {
        let mut spec = spec();
        spec.headers = parse_headers("User-Agent : test | X-Foo:bar").unwrap();
        let target = Target::new(spec).unwrap();

        assert_eq!(target.headers().len(), 2);
        assert_eq!(target.headers()["user-agent"], "test");
        assert_eq!(target.headers()["x-foo"], "bar");
    }

    #[test]
    fn test_case_duplicate_header_keeps_later_value() {
        let mut spec = spec();
        spec.headers = parse_headers("x-foo: 1 | X-Foo: 2").unwrap();
        let target = Target::new(spec).unwrap();

        assert_eq!(target.headers().len(), 1);
        assert_eq!(target.headers()["x-foo"], "2");
    }

    #[test]
    fn test_invalid_header_name() {
        let mut spec = spec();
        spec.headers.insert("Bad Name".to_string(), "x".to_string());
        assert!(matches!(Target::new(spec), Err(TargetError::InvalidHeaderName(_))));
    }

    #[test]
    fn test_invalid_header_value() {
        let mut spec = spec();
        spec.headers.insert("X-Foo".to_string(), "line\nbreak".to_string());
        assert!(matches!(Target::new(spec), Err(TargetError::InvalidHeaderValue(_))));
    }
}
