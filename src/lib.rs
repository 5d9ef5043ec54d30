// src/lib.rs
// =============================================================================
// Library root. The binary in main.rs is a thin wrapper around these
// modules:
// - cli: command-line parsing and target construction
// - logging: tracing subscriber setup
// - target: the validated, read-only scan description
// - scan: candidate generation, probing and scheduling
// =============================================================================

pub mod cli;
pub mod logging;
pub mod scan;
pub mod target;
