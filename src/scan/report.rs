// src/scan/report.rs
// =============================================================================
// Turns probe outcomes into output as soon as they are discovered.
//
// Nothing is collected: each outcome is written out and then dropped, so a
// scan over millions of candidates keeps a flat memory profile.
// =============================================================================

use std::io::Write;

use tracing::{error, info, trace, warn};

use super::probe::{MatchRecord, ProbeOutcome};

// Receives every outcome, from whichever task produced it
pub trait Reporter: Send + Sync {
    fn report(&self, outcome: &ProbeOutcome);
}

// Default reporter: log lines, plus optional JSON lines on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter {
    json: bool,
}

impl LogReporter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl Reporter for LogReporter {
    fn report(&self, outcome: &ProbeOutcome) {
        let url = outcome.url();
        match outcome {
            ProbeOutcome::Match { status, .. } => {
                info!("{} : {}", url, status.as_u16());
                if self.json {
                    print_json(&MatchRecord {
                        url: url.as_str(),
                        status: status.as_u16(),
                    });
                }
            }
            ProbeOutcome::Miss { status, .. } => {
                trace!("{} : {}", url, status.as_u16());
            }
            ProbeOutcome::Failed { error, .. } => {
                warn!("error accessing url {}: {}", url, error);
            }
        }
    }
}

// Writes one JSON object per line; the stdout lock keeps lines whole
fn print_json(record: &MatchRecord<'_>) {
    let line = match serde_json::to_string(record) {
        Ok(line) => line,
        Err(e) => {
            error!("failed to serialize match {}: {}", record.url, e);
            return;
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", line) {
        error!("failed to write match {}: {}", record.url, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ProbeError;
    use reqwest::StatusCode;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use url::Url;

    #[test]
    fn test_match_record_json() {
        let record = MatchRecord {
            url: "http://example.com/admin",
            status: 200,
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"url":"http://example.com/admin","status":200}"#
        );
    }

    // Collects everything the fmt subscriber writes
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    // Runs `f` with an info-level subscriber and returns its output
    fn capture_info(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_log_reporter_output_lines() {
        let reporter = LogReporter::new(false);
        let found = Url::parse("http://example.com/admin").unwrap();
        let hidden = Url::parse("http://example.com/secret.php").unwrap();
        let missing = Url::parse("http://example.com/login").unwrap();
        let down = Url::parse("http://example.com/down").unwrap();

        let output = capture_info(|| {
            reporter.report(&ProbeOutcome::Match { url: found, status: StatusCode::OK });
            reporter.report(&ProbeOutcome::Match { url: hidden, status: StatusCode::FORBIDDEN });
            reporter.report(&ProbeOutcome::Miss { url: missing, status: StatusCode::NOT_FOUND });
            reporter.report(&ProbeOutcome::Failed {
                url: down,
                error: ProbeError::Timeout,
            });
        });

        assert!(output.contains("http://example.com/admin : 200\n"), "{output}");
        assert!(output.contains("http://example.com/secret.php : 403\n"), "{output}");
        assert!(!output.contains("http://example.com/login"), "{output}");
        assert!(output.contains("error accessing url http://example.com/down: request timed out"));
    }
}
