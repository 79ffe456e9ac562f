// src/converge/poller.rs

//! Fixed-interval convergence loop.

use std::collections::BTreeSet;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

use crate::converge::{ConvergenceResult, ConvergenceStatus, ConvergenceTracker, PollSettings};
use crate::directory::{DirectoryError, ServiceDirectory};
use crate::errors::{Result, WinsvcError};
use crate::types::{ServiceName, ServiceState};

/// Stand-in deadline for waits too long to add to an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Samples a [`ServiceDirectory`] until a set of services reaches a state.
#[derive(Debug)]
pub struct ConvergencePoller<'a, D> {
    directory: &'a D,
    settings: PollSettings,
}

impl<'a, D: ServiceDirectory> ConvergencePoller<'a, D> {
    pub fn new(directory: &'a D, settings: PollSettings) -> Self {
        Self {
            directory,
            settings,
        }
    }

    /// Block until every service in `targets` reports `desired`, or until
    /// `max_wait` has elapsed.
    ///
    /// The deadline is checked at the top of each round, so the call can
    /// overrun `max_wait` by at most one interval plus one round of queries.
    /// A `max_wait` beyond what `Instant` can represent never times out.
    pub async fn await_state(
        &self,
        targets: BTreeSet<ServiceName>,
        desired: ServiceState,
        max_wait: Duration,
    ) -> Result<ConvergenceResult> {
        if !desired.is_waitable() {
            return Err(WinsvcError::InvalidArgument(format!(
                "target service state '{desired}' not in allowed values: {}",
                ServiceState::WAITABLE.map(|s| s.as_str()).join(", ")
            )));
        }

        if targets.is_empty() {
            error!(desired = %desired, "no matching service(s) found to check");
            return Ok(ConvergenceResult::no_targets(desired));
        }

        let started = Instant::now();
        let deadline = started
            .checked_add(max_wait)
            .unwrap_or_else(|| started + FAR_FUTURE);
        let mut tracker = ConvergenceTracker::new(targets, desired);

        while !tracker.is_done() {
            if started.elapsed() > max_wait {
                error!(
                    stragglers = ?tracker.pending(),
                    desired = %desired,
                    waited_secs = started.elapsed().as_secs(),
                    "timeout while waiting for services to reach target status"
                );
                return Ok(tracker.finish(ConvergenceStatus::TimedOut, started.elapsed()));
            }

            let round: Vec<ServiceName> = tracker.pending().iter().cloned().collect();
            for name in round {
                let state = self.observe(&name).await;
                if tracker.observe(&name, state) {
                    info!(service = %name, state = %desired, "service reached target status");
                }
            }

            sleep(self.settings.interval).await;

            if !tracker.is_done() && self.snapshot_due(deadline) {
                log_snapshot(&tracker, deadline);
            }
        }

        info!(
            services = ?tracker.converged(),
            state = %desired,
            "all services reached target status"
        );
        Ok(tracker.finish(ConvergenceStatus::Succeeded, started.elapsed()))
    }

    /// Current state of one service; failures become `Unknown`.
    async fn observe(&self, name: &str) -> ServiceState {
        match self.directory.service_state(name).await {
            Ok(state) => state,
            Err(DirectoryError::NotFound(_)) => {
                warn!(service = %name, "service is no longer registered");
                ServiceState::Unknown
            }
            Err(err) => {
                warn!(service = %name, error = %err, "failed to query service state");
                ServiceState::Unknown
            }
        }
    }

    fn snapshot_due(&self, deadline: Instant) -> bool {
        if self.settings.progress_every == 0 {
            return false;
        }
        intervals_remaining(deadline, self.settings.interval) % u64::from(self.settings.progress_every)
            == 0
    }
}

/// Debug view of the pending services, as seen in the last round.
fn log_snapshot(tracker: &ConvergenceTracker, deadline: Instant) {
    let remaining = deadline.saturating_duration_since(Instant::now());
    debug!(
        remaining_secs = remaining.as_secs(),
        pending = ?tracker.pending(),
        desired = %tracker.desired(),
        "waiting for services to reach target status"
    );
    for (name, state) in tracker.last_seen() {
        debug!(service = %name, state = %state, "current status");
    }
}

/// Whole polling intervals left until `deadline`, rounded to nearest.
fn intervals_remaining(deadline: Instant, interval: Duration) -> u64 {
    let remaining = deadline.saturating_duration_since(Instant::now());
    if interval.is_zero() {
        return 0;
    }
    (remaining.as_secs_f64() / interval.as_secs_f64()).round() as u64
}
