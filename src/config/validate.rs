// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, WinsvcError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::WinsvcError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_poll(cfg)?;
    validate_programs(cfg)?;
    validate_markers(cfg)?;
    Ok(())
}

fn validate_poll(cfg: &RawConfigFile) -> Result<()> {
    if cfg.poll.interval_ms == 0 {
        return Err(WinsvcError::ConfigError(
            "[poll].interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.poll.default_wait_secs == 0 {
        return Err(WinsvcError::ConfigError(
            "[poll].default_wait_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_programs(cfg: &RawConfigFile) -> Result<()> {
    if cfg.scheduler.program.trim().is_empty() {
        return Err(WinsvcError::ConfigError(
            "[scheduler].program must not be empty".to_string(),
        ));
    }
    if cfg.directory.program.trim().is_empty() {
        return Err(WinsvcError::ConfigError(
            "[directory].program must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_markers(cfg: &RawConfigFile) -> Result<()> {
    if cfg.scheduler.not_found_markers.is_empty() {
        return Err(WinsvcError::ConfigError(
            "[scheduler].not_found_markers must contain at least one marker".to_string(),
        ));
    }
    if let Some(idx) = cfg
        .scheduler
        .not_found_markers
        .iter()
        .position(|m| m.trim().is_empty())
    {
        return Err(WinsvcError::ConfigError(format!(
            "[scheduler].not_found_markers[{idx}] is empty"
        )));
    }
    Ok(())
}
