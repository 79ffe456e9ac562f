// src/lib.rs

pub mod cli;
pub mod config;
pub mod converge;
pub mod directory;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod matcher;
pub mod orchestrator;
pub mod task;
pub mod types;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::{resolve_config, ConfigFile};
use crate::directory::ScmServiceDirectory;
use crate::errors::{Result, WinsvcError};
use crate::orchestrator::{Orchestrator, OrchestratorSettings};
use crate::task::SchtasksScheduler;

/// Exit code when every target converged (or setup succeeded).
pub const EXIT_OK: i32 = 0;
/// Exit code for timeouts, missing targets and hard errors.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when the backing scheduled task does not exist.
pub const EXIT_NOT_CONFIGURED: i32 = 6;

/// High-level entry point used by `main.rs`.
///
/// Returns whether the requested operation succeeded; typed errors are
/// left to the caller so it can pick an exit code.
pub async fn run(args: CliArgs) -> Result<bool> {
    let cfg = resolve_config(args.config.as_deref())?;
    let orchestrator = build_orchestrator(&cfg)?;

    match args.command {
        Command::Start(svc) => {
            let wait = effective_wait(svc.wait, &cfg);
            let result = orchestrator.start(&svc.service_name, wait).await?;
            Ok(result.is_success())
        }
        Command::Stop(svc) => {
            let wait = effective_wait(svc.wait, &cfg);
            let result = orchestrator.stop(&svc.service_name, wait).await?;
            Ok(result.is_success())
        }
        Command::Setup(setup) => {
            let created = orchestrator.setup(&setup.name, &setup.services).await?;
            debug!(?created, "setup finished");
            Ok(true)
        }
    }
}

/// Map the outcome of [`run`] onto a process exit code.
pub fn exit_code(outcome: &Result<bool>) -> i32 {
    match outcome {
        Ok(true) => EXIT_OK,
        Ok(false) => EXIT_FAILURE,
        Err(WinsvcError::TaskNotConfigured(_)) => EXIT_NOT_CONFIGURED,
        Err(_) => EXIT_FAILURE,
    }
}

fn effective_wait(cli_wait: Option<u64>, cfg: &ConfigFile) -> Duration {
    cli_wait
        .map(Duration::from_secs)
        .unwrap_or_else(|| cfg.poll().default_wait())
}

fn build_orchestrator(
    cfg: &ConfigFile,
) -> Result<Orchestrator<ScmServiceDirectory, SchtasksScheduler>> {
    let directory = ScmServiceDirectory::new(cfg.directory().program.clone());
    let scheduler = SchtasksScheduler::new(
        cfg.scheduler().program.clone(),
        cfg.scheduler().not_found_markers.clone(),
    );

    let mut settings = OrchestratorSettings::from(cfg);
    let cwd = std::env::current_dir()?;
    settings.start_script = absolute_from(&cwd, &settings.start_script);
    settings.stop_script = absolute_from(&cwd, &settings.stop_script);

    Ok(Orchestrator::new(directory, scheduler, settings))
}

/// Scheduled tasks run from another working directory, so script paths
/// stored in them must be absolute.
fn absolute_from(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
