//! Waiting on an asynchronous run.
//!
//! A run is created `queued`, moves to `in_progress`, and eventually lands on a terminal
//! status. [`wait_on_run`] re-checks the status until it leaves the pending pair, sleeping
//! between checks with a capped backoff, and gives up with [`Error::RunTimeout`] once the
//! [`PollPolicy::max_wait`] budget is spent.

use crate::ais::types::{Run, RunOutcome, ThreadId};
use crate::ais::AssistantService;
use crate::{Error, Result};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, instrument};

// region:       -- Constants

const POLLING_DURATION_MS: u64 = 500;
const POLLING_BACKOFF: f64 = 1.5;
const POLLING_MAX_INTERVAL_MS: u64 = 5_000;
const POLLING_MAX_WAIT_SECS: u64 = 300;
const POLLING_MAX_BACKOFF: f64 = 10.0;

// endregion:    -- Constants

// region:       -- PollPolicy

#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    /// Delay before the second status check.
    pub interval: Duration,
    /// Multiplier applied to the delay after each pending check. `1.0` polls at a fixed rate.
    pub backoff: f64,
    pub max_interval: Duration,
    /// Total time budget for the wait.
    pub max_wait: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(POLLING_DURATION_MS),
            backoff: POLLING_BACKOFF,
            max_interval: Duration::from_millis(POLLING_MAX_INTERVAL_MS),
            max_wait: Duration::from_secs(POLLING_MAX_WAIT_SECS),
        }
    }
}

impl PollPolicy {
    /// Never shorter than `delay`, never longer than `max_interval`.
    pub fn next_delay(&self, delay: Duration) -> Duration {
        // NaN or below 1.0 polls at a fixed rate.
        let factor = if self.backoff.is_nan() {
            1.0
        } else {
            self.backoff.clamp(1.0, POLLING_MAX_BACKOFF)
        };
        Duration::try_from_secs_f64(delay.as_secs_f64() * factor)
            .unwrap_or(self.max_interval)
            .min(self.max_interval)
    }
}

// endregion:    -- PollPolicy

// region:       -- Wait on Run

/// Polls `run` until it reaches a terminal status and returns that outcome.
///
/// The first check is issued right away; the loop never returns while the status is
/// `queued` or `in_progress`.
#[instrument(skip_all, fields(thread_id = %thread_id, run_id = %run.id))]
pub async fn wait_on_run<S: AssistantService>(
    service: &S,
    thread_id: &ThreadId,
    run: Run,
    policy: &PollPolicy,
) -> Result<RunOutcome> {
    let started = Instant::now();
    let mut delay = policy.interval;
    let mut run = run;
    let mut checks: u32 = 0;

    loop {
        if let Some(outcome) = RunOutcome::from_run(&run) {
            debug!(checks, ?outcome, "run finished");
            return Ok(outcome);
        }

        run = service.retrieve_run(thread_id, &run.id).await?;
        checks += 1;
        debug!(checks, status = ?run.status, "run status");

        if RunOutcome::from_run(&run).is_some() {
            continue;
        }

        let waited = started.elapsed();
        if waited + delay > policy.max_wait {
            return Err(Error::RunTimeout {
                run_id: run.id.to_string(),
                waited,
            });
        }

        sleep(delay).await;
        delay = policy.next_delay(delay);
    }
}

// endregion:    -- Wait on Run

// region:       -- Tests


// endregion:    -- Tests
