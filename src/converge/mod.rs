// src/converge/mod.rs

//! Waiting for services to reach a target state.
//!
//! - [`tracker`] is the pure per-service bookkeeping (`pending` →
//!   `converged`), with no clock and no IO.
//! - [`poller`] drives the tracker: it samples the service directory at a
//!   fixed interval until everything converged or the deadline passed.

pub mod poller;
pub mod tracker;

use std::collections::BTreeSet;
use std::time::Duration;

use crate::types::{ServiceName, ServiceState};

pub use poller::ConvergencePoller;
pub use tracker::ConvergenceTracker;

/// Polling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Sleep between two sampling rounds.
    pub interval: Duration,
    /// Emit a snapshot of pending services whenever the number of whole
    /// intervals left until the deadline is a multiple of this. 0 disables.
    pub progress_every: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            progress_every: 5,
        }
    }
}

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    /// Every target reached the desired state.
    Succeeded,
    /// The deadline passed with stragglers left.
    TimedOut,
    /// There was nothing to wait for.
    NoTargets,
}

/// Result of one wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvergenceResult {
    pub status: ConvergenceStatus,
    pub desired: ServiceState,
    /// Services in the order they were seen converging.
    pub converged: Vec<ServiceName>,
    /// Services that had not converged when polling ended.
    pub stragglers: BTreeSet<ServiceName>,
    pub elapsed: Duration,
}

impl ConvergenceResult {
    pub fn no_targets(desired: ServiceState) -> Self {
        Self {
            status: ConvergenceStatus::NoTargets,
            desired,
            converged: Vec::new(),
            stragglers: BTreeSet::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ConvergenceStatus::Succeeded
    }
}
