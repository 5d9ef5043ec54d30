// src/scan/scheduler.rs
// =============================================================================
// Drives a whole scan: every candidate is probed exactly once, with at most
// `concurrency` probes in flight at any moment.
//
// How it works:
// 1. Walk the candidate sequence in order
// 2. Acquire a semaphore permit for each candidate (waits while saturated)
// 3. Spawn a task that owns the permit, probes, and reports the outcome
// 4. The permit is dropped when the task ends, whatever the outcome
// 5. After the last dispatch, join every task that is still running
//
// Errors from individual probes never escape this module; they are reported
// and counted, and the scan moves on.
// =============================================================================

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info};

use super::candidates::candidates;
use super::probe::{probe, OutcomeKind, Transport};
use super::report::Reporter;
use crate::target::Target;

// Counts of what happened during a run
//
// When `run` returns, matched + missed + failed == total, and total equals
// the number of candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub total: usize,
    pub matched: usize,
    pub missed: usize,
    pub failed: usize,
}

impl ScanSummary {
    fn record(&mut self, result: Result<OutcomeKind, JoinError>) {
        self.total += 1;
        match result {
            Ok(OutcomeKind::Match) => self.matched += 1,
            Ok(OutcomeKind::Miss) => self.missed += 1,
            Ok(OutcomeKind::Failed) => self.failed += 1,
            Err(e) => {
                error!("probe task did not complete: {}", e);
                self.failed += 1;
            }
        }
    }
}

// Probes every candidate of `target` and waits for all of them
//
// Parameters:
//   target: the validated scan description, shared with every task
//   transport: how HEAD requests are sent
//   reporter: where outcomes go as they are discovered
pub async fn run(
    target: Arc<Target>,
    transport: Arc<dyn Transport>,
    reporter: Arc<dyn Reporter>,
) -> ScanSummary {
    let semaphore = Arc::new(Semaphore::new(target.concurrency().get()));
    let mut tasks = JoinSet::new();
    let mut summary = ScanSummary::default();

    debug!(
        "dispatching {} candidates, {} at a time",
        target.candidate_count(),
        target.concurrency()
    );

    for candidate in candidates(&target) {
        if candidate.starts_extension() {
            info!("Test extension: {}", candidate.extension);
        }

        // The only place dispatch waits. The semaphore is never closed, so
        // this cannot fail while we hold it.
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                error!("concurrency gate closed, stopping dispatch: {}", e);
                break;
            }
        };

        let task_target = Arc::clone(&target);
        let transport = Arc::clone(&transport);
        let reporter = Arc::clone(&reporter);

        tasks.spawn(async move {
            let _permit = permit;
            let outcome = probe(transport.as_ref(), &task_target, candidate.url).await;
            reporter.report(&outcome);
            outcome.kind()
        });

        // Reap finished tasks so their handles don't pile up
        while let Some(result) = tasks.try_join_next() {
            summary.record(result);
        }
    }

    while let Some(result) = tasks.join_next().await {
        summary.record(result);
    }

    info!(
        "Scan finished: {} probed, {} found, {} failed",
        summary.total, summary.matched, summary.failed
    );

    summary
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why acquire the permit BEFORE spawning?
//    - acquire_owned() waits while `concurrency` permits are out
//    - So the loop itself pauses, and we never have more than
//      `concurrency` probe tasks doing network I/O
//
// 2. What is an OwnedSemaphorePermit?
//    - A permit that is not tied to a borrow of the semaphore
//    - It can be moved into a 'static task
//    - Dropping it gives the permit back (even if the task panics)
//
// 3. What is JoinSet?
//    - A collection of spawned tasks
//    - join_next() waits for the next one to finish
//    - Joining all of them is our "wait until everything is done" step
//
// 4. Why Arc<dyn Transport>?
//    - Every task needs the transport, and tasks must own what they use
//    - Arc::clone only bumps a reference count
//    - dyn lets tests pass a fake transport without changing this code
// -----------------------------------------------------------------------------
