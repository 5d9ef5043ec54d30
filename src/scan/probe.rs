// src/scan/probe.rs
// =============================================================================
// Checks whether a single candidate URL exists.
//
// Key functionality:
// - Makes one HTTP HEAD request per candidate (headers only, no body)
// - Attaches the configured custom headers to every request
// - Accepts invalid TLS certificates unless verification is turned on
// - Classifies the result: 200 / 403 = match, any other status = miss,
//   timeout or transport error = failure
//
// No retries: each candidate is attempted exactly once.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::target::Target;

// Redirects followed before giving up, same as most HTTP clients default to
const MAX_REDIRECTS: usize = 10;

// Why a probe produced no HTTP status at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Request(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ProbeError::Timeout
        } else if error.is_connect() {
            ProbeError::Connect(error.to_string())
        } else {
            ProbeError::Request(error.to_string())
        }
    }
}

// The result of probing one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The resource exists (200 OK or 403 Forbidden)
    Match { url: Url, status: StatusCode },
    /// Any other status code
    Miss { url: Url, status: StatusCode },
    /// No response: timeout, DNS, refused connection, TLS handshake, ...
    Failed { url: Url, error: ProbeError },
}

impl ProbeOutcome {
    pub fn url(&self) -> &Url {
        match self {
            ProbeOutcome::Match { url, .. }
            | ProbeOutcome::Miss { url, .. }
            | ProbeOutcome::Failed { url, .. } => url,
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            ProbeOutcome::Match { .. } => OutcomeKind::Match,
            ProbeOutcome::Miss { .. } => OutcomeKind::Miss,
            ProbeOutcome::Failed { .. } => OutcomeKind::Failed,
        }
    }
}

// Outcome without its payload, used for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Match,
    Miss,
    Failed,
}

// A reported match, as written in JSON output
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord<'a> {
    pub url: &'a str,
    pub status: u16,
}

// Whether a status code means "the resource is there"
//
// 403 counts: the path exists even though we may not read it.
pub fn is_match(status: StatusCode) -> bool {
    matches!(status, StatusCode::OK | StatusCode::FORBIDDEN)
}

// Something that can issue HEAD requests
//
// The scanner only talks to the network through this trait, so tests can
// swap in an in-memory implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn head(&self, url: &Url, headers: &HeaderMap) -> Result<StatusCode, ProbeError>;
}

// The real transport, backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    // Builds the client once for the whole run
    //
    // The client is cheap to share: it is an Arc around a connection pool,
    // so all probe tasks reuse the same connections.
    pub fn new(target: &Target) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(target.timeout())
            .danger_accept_invalid_certs(!target.verify_tls())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn head(&self, url: &Url, headers: &HeaderMap) -> Result<StatusCode, ProbeError> {
        let response = self
            .client
            .head(url.clone())
            .headers(headers.clone())
            .send()
            .await?;

        Ok(response.status())
    }
}

// Probes one candidate and classifies the result
//
// The transport call is wrapped in the target's timeout as well, so even a
// transport without its own timeout cannot stall the run.
pub async fn probe<T>(transport: &T, target: &Target, url: Url) -> ProbeOutcome
where
    T: Transport + ?Sized,
{
    let result = tokio::time::timeout(target.timeout(), transport.head(&url, target.headers())).await;

    match result {
        Ok(Ok(status)) if is_match(status) => ProbeOutcome::Match { url, status },
        Ok(Ok(status)) => ProbeOutcome::Miss { url, status },
        Ok(Err(error)) => ProbeOutcome::Failed { url, error },
        Err(_) => ProbeOutcome::Failed {
            url,
            error: ProbeError::Timeout,
        },
    }
}
