// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::converge::PollSettings;
use crate::task::schtasks::DEFAULT_NOT_FOUND_MARKERS;
use crate::types::TargetPolicy;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [poll]
/// interval_ms = 1000
/// progress_every = 5
/// default_wait_secs = 30
///
/// [targets]
/// policy = "identifier"
/// case_insensitive = true
///
/// [scheduler]
/// program = "schtasks.exe"
/// not_found_markers = ["ERROR: The system cannot find the file specified"]
///
/// [directory]
/// program = "sc.exe"
///
/// [setup]
/// start_script = "scripts/start-service.ps1"
/// stop_script = "scripts/stop-service.ps1"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub poll: PollSection,

    #[serde(default)]
    pub targets: TargetsSection,

    #[serde(default)]
    pub scheduler: SchedulerSection,

    #[serde(default)]
    pub directory: DirectorySection,

    #[serde(default)]
    pub setup: SetupSection,
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    poll: PollSection,
    targets: TargetsSection,
    scheduler: SchedulerSection,
    directory: DirectorySection,
    setup: SetupSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            poll: raw.poll,
            targets: raw.targets,
            scheduler: raw.scheduler,
            directory: raw.directory,
            setup: raw.setup,
        }
    }

    pub fn poll(&self) -> &PollSection {
        &self.poll
    }

    pub fn targets(&self) -> &TargetsSection {
        &self.targets
    }

    pub fn scheduler(&self) -> &SchedulerSection {
        &self.scheduler
    }

    pub fn directory(&self) -> &DirectorySection {
        &self.directory
    }

    pub fn setup(&self) -> &SetupSection {
        &self.setup
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}

/// `[poll]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PollSection {
    /// Milliseconds between two sampling rounds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Snapshot cadence in intervals; `0` turns snapshots off.
    #[serde(default = "default_progress_every")]
    pub progress_every: u32,

    /// Wait used when `--wait` is not given on the command line.
    #[serde(default = "default_wait_secs")]
    pub default_wait_secs: u64,
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_progress_every() -> u32 {
    5
}

fn default_wait_secs() -> u64 {
    30
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            progress_every: default_progress_every(),
            default_wait_secs: default_wait_secs(),
        }
    }
}

impl PollSection {
    pub fn default_wait(&self) -> Duration {
        Duration::from_secs(self.default_wait_secs)
    }
}

impl From<&PollSection> for PollSettings {
    fn from(section: &PollSection) -> Self {
        PollSettings {
            interval: Duration::from_millis(section.interval_ms),
            progress_every: section.progress_every,
        }
    }
}

/// `[targets]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetsSection {
    #[serde(default)]
    pub policy: TargetPolicy,

    /// Windows compares service names case-insensitively.
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TargetsSection {
    fn default() -> Self {
        Self {
            policy: TargetPolicy::default(),
            case_insensitive: true,
        }
    }
}

/// `[scheduler]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSection {
    #[serde(default = "default_schtasks")]
    pub program: String,

    /// Substrings of `schtasks` output meaning "this task does not exist".
    /// One per UI language the tool may run under.
    #[serde(default = "default_not_found_markers")]
    pub not_found_markers: Vec<String>,
}

fn default_schtasks() -> String {
    "schtasks.exe".to_string()
}

fn default_not_found_markers() -> Vec<String> {
    DEFAULT_NOT_FOUND_MARKERS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            program: default_schtasks(),
            not_found_markers: default_not_found_markers(),
        }
    }
}

/// `[directory]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySection {
    #[serde(default = "default_sc")]
    pub program: String,
}

fn default_sc() -> String {
    "sc.exe".to_string()
}

impl Default for DirectorySection {
    fn default() -> Self {
        Self {
            program: default_sc(),
        }
    }
}

/// `[setup]` section, used by `winsvc setup` only.
#[derive(Debug, Clone, Deserialize)]
pub struct SetupSection {
    #[serde(default = "default_start_script")]
    pub start_script: PathBuf,

    #[serde(default = "default_stop_script")]
    pub stop_script: PathBuf,

    /// Account the tasks run as. Falls back to `%USERNAME%`.
    #[serde(default)]
    pub run_as: Option<String>,
}

fn default_start_script() -> PathBuf {
    PathBuf::from("scripts").join("start-service.ps1")
}

fn default_stop_script() -> PathBuf {
    PathBuf::from("scripts").join("stop-service.ps1")
}

impl Default for SetupSection {
    fn default() -> Self {
        Self {
            start_script: default_start_script(),
            stop_script: default_stop_script(),
            run_as: None,
        }
    }
}

impl SetupSection {
    /// Configured account, else the current user from the environment.
    pub fn effective_run_as(&self) -> Option<String> {
        self.run_as
            .clone()
            .or_else(|| std::env::var("USERNAME").ok())
            .filter(|u| !u.trim().is_empty())
    }
}
