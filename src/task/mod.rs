// src/task/mod.rs

//! Scheduled tasks: trigger, look up, and (once) create them.
//!
//! - [`TaskScheduler`] is the adapter seam to the OS task scheduler. Its
//!   errors are already classified ([`TaskError::NotFound`] vs. anything
//!   else), so locale-specific output sniffing stays inside the adapter.
//! - [`TaskTrigger`] is what the orchestrator uses: it logs, and folds the
//!   adapter errors into [`TaskTriggerError`].
//! - [`definition`] parses the verbose task query output.
//! - [`schtasks`] is the production adapter around `schtasks.exe`.

pub mod definition;
pub mod schtasks;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::types::{BoxFuture, TaskName};

pub use definition::{parse_task_definition, TaskDefinition};
pub use schtasks::SchtasksScheduler;

/// Classified failure from the task scheduler adapter.
#[derive(Error, Debug)]
pub enum TaskError {
    /// No task with this name exists.
    #[error("scheduled task '{0}' does not exist")]
    NotFound(TaskName),

    #[error("task scheduler exited with code {code:?}: {output}")]
    Failed { code: Option<i32>, output: String },

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome classes of triggering a task, as seen by the orchestrator.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TaskTriggerError {
    /// The task was never created (setup step missing).
    #[error("scheduled task '{0}' is not configured")]
    NotConfigured(TaskName),

    /// Any other failure; carries the raw diagnostic text.
    #[error("{0}")]
    Unexpected(String),
}

impl From<TaskError> for TaskTriggerError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(name) => TaskTriggerError::NotConfigured(name),
            TaskError::Failed { output, .. } => TaskTriggerError::Unexpected(output),
            other @ TaskError::Spawn { .. } => TaskTriggerError::Unexpected(other.to_string()),
        }
    }
}

/// Parameters for creating one start/stop task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: TaskName,
    /// Full command line the task runs.
    pub command: String,
    /// Account to run as; `None` lets the scheduler pick the caller.
    pub run_as: Option<String>,
}

/// Adapter trait for the OS task scheduler.
pub trait TaskScheduler: Send + Sync {
    /// Start the named task. Returns as soon as the scheduler accepted it.
    fn run_task<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<(), TaskError>>;

    /// Return the verbose definition listing of the named task.
    fn query_task<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<String, TaskError>>;

    /// Create (or overwrite) a task.
    fn create_task<'a>(&'a self, spec: &'a TaskSpec) -> BoxFuture<'a, Result<(), TaskError>>;
}

/// Trigger/lookup front-end used by the orchestrator.
#[derive(Debug)]
pub struct TaskTrigger<'a, S> {
    scheduler: &'a S,
}

impl<'a, S: TaskScheduler> TaskTrigger<'a, S> {
    pub fn new(scheduler: &'a S) -> Self {
        Self { scheduler }
    }

    /// Run the task. Fire-and-forget: the service change happens later.
    pub async fn trigger(&self, name: &str) -> Result<(), TaskTriggerError> {
        match self.scheduler.run_task(name).await {
            Ok(()) => {
                debug!(task = %name, "scheduled task successfully executed");
                Ok(())
            }
            Err(err) => Err(report(name, err)),
        }
    }

    /// Look up the task definition (which services its script is handed).
    pub async fn lookup(&self, name: &str) -> Result<TaskDefinition, TaskTriggerError> {
        let listing = self
            .scheduler
            .query_task(name)
            .await
            .map_err(|err| report(name, err))?;
        Ok(parse_task_definition(name, &listing))
    }

    /// Create a task, logging the result.
    pub async fn create(&self, spec: &TaskSpec) -> Result<(), TaskTriggerError> {
        match self.scheduler.create_task(spec).await {
            Ok(()) => {
                info!(task = %spec.name, "scheduled task created successfully");
                Ok(())
            }
            Err(err) => {
                error!(task = %spec.name, "scheduled task could not be created");
                Err(report(&spec.name, err))
            }
        }
    }
}

fn report(name: &str, err: TaskError) -> TaskTriggerError {
    let err = TaskTriggerError::from(err);
    match &err {
        TaskTriggerError::NotConfigured(_) => error!(
            task = %name,
            "the scheduled task that handles the service could not be found; \
             make sure it exists in the Task Scheduler library (see `winsvc setup --help`)"
        ),
        TaskTriggerError::Unexpected(output) => {
            error!(task = %name, "{}", output.trim_end())
        }
    }
    err
}
