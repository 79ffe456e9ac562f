// src/converge/tracker.rs

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::converge::{ConvergenceResult, ConvergenceStatus};
use crate::types::{ServiceName, ServiceState};

/// Pending/converged bookkeeping for one wait.
///
/// The watch set is fixed at construction; services only ever move from
/// `pending` to `converged`, never back and never in from outside.
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    desired: ServiceState,
    pending: BTreeSet<ServiceName>,
    converged: Vec<ServiceName>,
    last_seen: BTreeMap<ServiceName, ServiceState>,
}

impl ConvergenceTracker {
    pub fn new(targets: BTreeSet<ServiceName>, desired: ServiceState) -> Self {
        Self {
            desired,
            pending: targets,
            converged: Vec::new(),
            last_seen: BTreeMap::new(),
        }
    }

    pub fn desired(&self) -> ServiceState {
        self.desired
    }

    pub fn pending(&self) -> &BTreeSet<ServiceName> {
        &self.pending
    }

    pub fn converged(&self) -> &[ServiceName] {
        &self.converged
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// Most recent observation of each still-pending service.
    pub fn last_seen(&self) -> impl Iterator<Item = (&ServiceName, ServiceState)> {
        self.last_seen.iter().map(|(name, state)| (name, *state))
    }

    /// Record an observation. Returns true if `name` converged just now.
    pub fn observe(&mut self, name: &str, state: ServiceState) -> bool {
        if !self.pending.contains(name) {
            return false;
        }
        if state != self.desired {
            self.last_seen.insert(name.to_string(), state);
            return false;
        }
        self.last_seen.remove(name);
        if self.pending.remove(name) {
            self.converged.push(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn finish(self, status: ConvergenceStatus, elapsed: Duration) -> ConvergenceResult {
        ConvergenceResult {
            status,
            desired: self.desired,
            converged: self.converged,
            stragglers: self.pending,
            elapsed,
        }
    }
}
