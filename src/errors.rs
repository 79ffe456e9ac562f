// src/errors.rs

//! Crate-wide error type.

use thiserror::Error;

use crate::directory::DirectoryError;
use crate::task::TaskTriggerError;
use crate::types::TaskName;

#[derive(Error, Debug)]
pub enum WinsvcError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid service pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error(
        "Scheduled task '{0}' could not be found. Check the Task Scheduler library or create it with `winsvc setup`."
    )]
    TaskNotConfigured(TaskName),

    #[error("Scheduled task failed unexpectedly: {0}")]
    TaskTriggerUnexpected(String),

    #[error("Service directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<TaskTriggerError> for WinsvcError {
    fn from(err: TaskTriggerError) -> Self {
        match err {
            TaskTriggerError::NotConfigured(task) => WinsvcError::TaskNotConfigured(task),
            TaskTriggerError::Unexpected(output) => WinsvcError::TaskTriggerUnexpected(output),
        }
    }
}

pub type Result<T> = std::result::Result<T, WinsvcError>;
