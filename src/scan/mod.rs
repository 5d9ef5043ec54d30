// src/scan/mod.rs
// =============================================================================
// The scanning engine.
//
// Submodules:
// - candidates: builds every (extension, word) URL in a fixed order
// - probe: sends one HEAD request and classifies the answer
// - report: writes outcomes out as they arrive
// - scheduler: runs all probes with a cap on how many are in flight
// =============================================================================

mod candidates;
mod probe;
mod report;
mod scheduler;

pub use candidates::{candidates, join_segments, Candidate, Candidates};
pub use probe::{is_match, probe, HttpTransport, OutcomeKind, ProbeError, ProbeOutcome, Transport};
pub use report::{LogReporter, Reporter};
pub use scheduler::{run, ScanSummary};
