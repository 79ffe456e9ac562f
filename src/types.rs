// src/types.rs

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;

/// Concrete, OS-registered service name (e.g. `"XblAuthManager"`).
pub type ServiceName = String;

/// Name of a scheduled task, always `"<ACTION>-<logical-name>"`.
pub type TaskName = String;

/// Boxed future returned by the adapter traits so they stay object safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Run state of a Windows service, as reported by the service manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceState {
    Running,
    Stopped,
    Paused,
    StartPending,
    StopPending,
    PausePending,
    ContinuePending,
    Unknown,
}

impl ServiceState {
    /// States a caller may wait for.
    ///
    /// Pending states are transitional; the service manager moves out of
    /// them on its own, so waiting for one is ill-posed.
    pub const WAITABLE: [ServiceState; 3] =
        [ServiceState::Running, ServiceState::Paused, ServiceState::Stopped];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceState::Running => "running",
            ServiceState::Stopped => "stopped",
            ServiceState::Paused => "paused",
            ServiceState::StartPending => "start_pending",
            ServiceState::StopPending => "stop_pending",
            ServiceState::PausePending => "pause_pending",
            ServiceState::ContinuePending => "continue_pending",
            ServiceState::Unknown => "unknown",
        }
    }

    pub fn is_waitable(&self) -> bool {
        Self::WAITABLE.contains(self)
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a scheduled task does to its services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
}

impl Action {
    pub fn prefix(&self) -> &'static str {
        match self {
            Action::Start => "START",
            Action::Stop => "STOP",
        }
    }

    /// The state every target must reach once the task has run.
    pub fn desired_state(&self) -> ServiceState {
        match self {
            Action::Start => ServiceState::Running,
            Action::Stop => ServiceState::Stopped,
        }
    }

    pub fn task_name(&self, logical: &str) -> TaskName {
        task_name(self.prefix(), logical)
    }
}

/// Build the scheduled task name for an action prefix and a logical name.
pub fn task_name(action: &str, logical: &str) -> TaskName {
    format!("{action}-{logical}")
}

/// How the orchestrator turns a logical identifier into glob patterns.
///
/// - `TaskDefinition` (default): the patterns are read from the command
///   line of the scheduled task itself, which is what `setup` stored there.
///   A task without script arguments falls back to the identifier.
/// - `Identifier`: the identifier is used as-is (callers write their own
///   wildcards, e.g. `Xbl*`).
/// - `Prefix`: a trailing `*` is appended unless already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    Identifier,
    Prefix,
    TaskDefinition,
}

impl Default for TargetPolicy {
    fn default() -> Self {
        TargetPolicy::TaskDefinition
    }
}
