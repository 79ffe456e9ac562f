#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use winsvc::converge::PollSettings;
use winsvc::orchestrator::{Orchestrator, OrchestratorSettings};
use winsvc::types::TargetPolicy;
use winsvc_test_utils::{FakeServiceDirectory, FakeTaskScheduler};

pub use winsvc_test_utils::init_tracing;

/// One-second polling, no progress snapshots (keeps query counts exact).
pub fn quiet_poll() -> PollSettings {
    PollSettings {
        interval: Duration::from_secs(1),
        progress_every: 0,
    }
}

pub fn settings(policy: TargetPolicy) -> OrchestratorSettings {
    OrchestratorSettings {
        poll: quiet_poll(),
        policy,
        case_insensitive: true,
        start_script: PathBuf::from(r"C:\winsvc\scripts\start-service.ps1"),
        stop_script: PathBuf::from(r"C:\winsvc\scripts\stop-service.ps1"),
        run_as: Some("admin".to_string()),
    }
}

pub fn orchestrator(
    directory: &FakeServiceDirectory,
    scheduler: &FakeTaskScheduler,
    policy: TargetPolicy,
) -> Orchestrator<FakeServiceDirectory, FakeTaskScheduler> {
    Orchestrator::new(directory.clone(), scheduler.clone(), settings(policy))
}
