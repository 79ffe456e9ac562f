// src/task/schtasks.rs

//! `schtasks.exe`-backed task scheduler.
//!
//! `schtasks` reports every failure with exit code 1, so telling "task does
//! not exist" apart from other errors needs its (localized) message text.
//! That is done here and nowhere else, against a configurable marker list.

use tracing::debug;

use crate::exec::{run_captured, CommandOutput};
use crate::task::{TaskError, TaskScheduler, TaskSpec};
use crate::types::BoxFuture;

/// Markers for "task not found" in the locales we know about.
pub const DEFAULT_NOT_FOUND_MARKERS: &[&str] = &[
    "ERROR: The system cannot find the file specified",
    "FEHLER: Das System kann die angegebene Datei nicht finden",
];

/// Event the created tasks are bound to. Nothing ever logs it, so the tasks
/// only run when triggered on demand.
pub const DUMMY_EVENT_QUERY: &str = "*[System/EventID=999]";

#[derive(Debug, Clone)]
pub struct SchtasksScheduler {
    program: String,
    not_found_markers: Vec<String>,
}

impl SchtasksScheduler {
    pub fn new(program: impl Into<String>, not_found_markers: Vec<String>) -> Self {
        Self {
            program: program.into(),
            not_found_markers,
        }
    }

    async fn invoke(&self, args: &[String]) -> Result<CommandOutput, TaskError> {
        run_captured(&self.program, args)
            .await
            .map_err(|source| TaskError::Spawn {
                program: self.program.clone(),
                source,
            })
    }

    async fn schtasks(&self, name: &str, args: &[String]) -> Result<String, TaskError> {
        let out = self.invoke(args).await?;
        if out.success() {
            return Ok(out.text);
        }
        Err(classify_failure(
            name,
            out.code,
            out.text,
            &self.not_found_markers,
        ))
    }
}

impl Default for SchtasksScheduler {
    fn default() -> Self {
        Self::new(
            "schtasks.exe",
            DEFAULT_NOT_FOUND_MARKERS.iter().map(|m| m.to_string()).collect(),
        )
    }
}

impl TaskScheduler for SchtasksScheduler {
    fn run_task<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<(), TaskError>> {
        Box::pin(async move {
            let out = self.schtasks(name, &run_task_args(name)).await?;
            debug!(task = %name, output = %out.trim_end(), "schtasks /run accepted");
            Ok(())
        })
    }

    fn query_task<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<String, TaskError>> {
        Box::pin(async move { self.schtasks(name, &query_task_args(name)).await })
    }

    fn create_task<'a>(&'a self, spec: &'a TaskSpec) -> BoxFuture<'a, Result<(), TaskError>> {
        Box::pin(async move {
            let out = self.invoke(&create_task_args(spec)).await?;
            if out.success() {
                debug!(task = %spec.name, output = %out.text.trim_end(), "schtasks /create accepted");
                return Ok(());
            }
            Err(create_failure(out.code, out.text))
        })
    }
}

/// A failed `schtasks /CREATE`. Never "not found": a missing-file message
/// there is about the script path, and the output is kept verbatim.
pub fn create_failure(code: Option<i32>, output: String) -> TaskError {
    TaskError::Failed { code, output }
}

/// Map a failed `schtasks` invocation onto the closed error enum.
pub fn classify_failure(
    name: &str,
    code: Option<i32>,
    output: String,
    not_found_markers: &[String],
) -> TaskError {
    if not_found_markers
        .iter()
        .any(|marker| !marker.is_empty() && output.contains(marker.as_str()))
    {
        TaskError::NotFound(name.to_string())
    } else {
        TaskError::Failed { code, output }
    }
}

pub fn run_task_args(name: &str) -> Vec<String> {
    ["/Run", "/TN", name].iter().map(|s| s.to_string()).collect()
}

pub fn query_task_args(name: &str) -> Vec<String> {
    ["/Query", "/V", "/FO", "LIST", "/TN", name]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Arguments for `schtasks /CREATE`.
///
/// The task name sits at index 4, the command at 6 and (when given) the
/// run-as account at 10.
pub fn create_task_args(spec: &TaskSpec) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "/CREATE".into(),
        "/SC".into(),
        "ONEVENT".into(),
        "/TN".into(),
        spec.name.clone(),
        "/TR".into(),
        spec.command.clone(),
        "/RL".into(),
        "HIGHEST".into(),
    ];
    if let Some(user) = &spec.run_as {
        args.push("/RU".into());
        args.push(user.clone());
    }
    args.extend(
        ["/EC", "Application", "/MO", DUMMY_EVENT_QUERY, "/F"]
            .iter()
            .map(|s| s.to_string()),
    );
    args
}

/// Command line a start/stop task runs: a hidden PowerShell script that
/// receives the service patterns as arguments. The script path is quoted so
/// it may contain spaces.
pub fn script_command(script: &str, services: &[String]) -> String {
    let mut cmd = format!("PowerShell.exe -WindowStyle hidden -File \"{script}\"");
    for svc in services {
        cmd.push(' ');
        cmd.push_str(svc);
    }
    cmd
}
