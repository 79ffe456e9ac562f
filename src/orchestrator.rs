// src/orchestrator.rs

//! `start` / `stop` composition: resolve targets, trigger the task, wait.
//!
//! Decision tree per call:
//! - no matching service → `NoTargets` outcome, the task is not run;
//! - task missing → [`WinsvcError::TaskNotConfigured`], no polling;
//! - any other task failure → [`WinsvcError::TaskTriggerUnexpected`];
//! - otherwise the poller's outcome (`Succeeded` / `TimedOut`).
//!
//! A triggered task is never retried and never rolled back.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::ConfigFile;
use crate::converge::{ConvergencePoller, ConvergenceResult, PollSettings};
use crate::directory::ServiceDirectory;
use crate::errors::{Result, WinsvcError};
use crate::matcher::ServiceMatcher;
use crate::task::schtasks::script_command;
use crate::task::{TaskScheduler, TaskSpec, TaskTrigger};
use crate::types::{Action, ServiceName, TargetPolicy, TaskName};

/// Knobs the orchestrator needs from the configuration.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    pub poll: PollSettings,
    pub policy: TargetPolicy,
    pub case_insensitive: bool,
    pub start_script: PathBuf,
    pub stop_script: PathBuf,
    pub run_as: Option<String>,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self::from(&ConfigFile::default())
    }
}

impl From<&ConfigFile> for OrchestratorSettings {
    fn from(cfg: &ConfigFile) -> Self {
        Self {
            poll: PollSettings::from(cfg.poll()),
            policy: cfg.targets().policy,
            case_insensitive: cfg.targets().case_insensitive,
            start_script: cfg.setup().start_script.clone(),
            stop_script: cfg.setup().stop_script.clone(),
            run_as: cfg.setup().effective_run_as(),
        }
    }
}

/// Starts and stops services through their scheduled tasks.
#[derive(Debug)]
pub struct Orchestrator<D, S> {
    directory: D,
    scheduler: S,
    settings: OrchestratorSettings,
}

impl<D: ServiceDirectory, S: TaskScheduler> Orchestrator<D, S> {
    pub fn new(directory: D, scheduler: S, settings: OrchestratorSettings) -> Self {
        Self {
            directory,
            scheduler,
            settings,
        }
    }

    /// Run `START-<identifier>` and wait for the services to be running.
    pub async fn start(&self, identifier: &str, max_wait: Duration) -> Result<ConvergenceResult> {
        self.run(Action::Start, identifier, max_wait).await
    }

    /// Run `STOP-<identifier>` and wait for the services to be stopped.
    pub async fn stop(&self, identifier: &str, max_wait: Duration) -> Result<ConvergenceResult> {
        self.run(Action::Stop, identifier, max_wait).await
    }

    async fn run(
        &self,
        action: Action,
        identifier: &str,
        max_wait: Duration,
    ) -> Result<ConvergenceResult> {
        if identifier.trim().is_empty() {
            return Err(WinsvcError::InvalidArgument(
                "service identifier must not be empty".to_string(),
            ));
        }

        let task = action.task_name(identifier);
        let desired = action.desired_state();
        let trigger = TaskTrigger::new(&self.scheduler);

        let targets = self.resolve_targets(&trigger, &task, identifier).await?;
        if targets.is_empty() {
            error!(
                identifier,
                task = %task,
                "no matching service(s) found; not running the scheduled task"
            );
            return Ok(ConvergenceResult::no_targets(desired));
        }

        match action {
            Action::Start => info!(task = %task, services = ?targets, "starting service(s)"),
            Action::Stop => info!(task = %task, services = ?targets, "stopping service(s)"),
        }

        trigger.trigger(&task).await?;

        ConvergencePoller::new(&self.directory, self.settings.poll)
            .await_state(targets, desired, max_wait)
            .await
    }

    /// Glob patterns for `identifier` under the configured policy, expanded
    /// against the live service list.
    async fn resolve_targets(
        &self,
        trigger: &TaskTrigger<'_, S>,
        task: &str,
        identifier: &str,
    ) -> Result<BTreeSet<ServiceName>> {
        let patterns = match self.settings.policy {
            TargetPolicy::Identifier => vec![identifier.to_string()],
            TargetPolicy::Prefix => vec![prefix_pattern(identifier)],
            TargetPolicy::TaskDefinition => {
                let definition = trigger.lookup(task).await?;
                if definition.service_patterns.is_empty() {
                    warn!(
                        task = %task,
                        task_to_run = ?definition.task_to_run,
                        "no service arguments in task definition; matching the identifier instead"
                    );
                    vec![identifier.to_string()]
                } else {
                    definition.service_patterns
                }
            }
        };

        ServiceMatcher::new(&self.directory, self.settings.case_insensitive)
            .match_any(&patterns)
            .await
    }

    /// Create `START-<name>` and `STOP-<name>` for the given service
    /// patterns (defaults to `name` itself). Needs administrator rights.
    pub async fn setup(&self, name: &str, services: &[String]) -> Result<Vec<TaskName>> {
        if name.trim().is_empty() {
            return Err(WinsvcError::InvalidArgument(
                "task name must not be empty".to_string(),
            ));
        }
        let services: Vec<String> = if services.is_empty() {
            vec![name.to_string()]
        } else {
            services.to_vec()
        };

        let trigger = TaskTrigger::new(&self.scheduler);
        let mut created = Vec::with_capacity(2);
        for (action, script) in [
            (Action::Start, &self.settings.start_script),
            (Action::Stop, &self.settings.stop_script),
        ] {
            let spec = TaskSpec {
                name: action.task_name(name),
                command: script_command(&script.to_string_lossy(), &services),
                run_as: self.settings.run_as.clone(),
            };
            trigger.create(&spec).await?;
            created.push(spec.name);
        }
        Ok(created)
    }
}

/// `identifier` with a trailing `*`, unless it already has one.
pub fn prefix_pattern(identifier: &str) -> String {
    if identifier.ends_with('*') {
        identifier.to_string()
    } else {
        format!("{identifier}*")
    }
}
