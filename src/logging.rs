// src/logging.rs

//! Logging setup for `winsvc` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--quiet` (turns everything off)
//! 2. `--log-level` CLI flag (if provided)
//! 3. `WINSVC_LOG` environment variable (e.g. "info", "debug")
//! 4. default to `info`
//!
//! Logs are sent to STDERR.

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Logger configuration for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub level: Option<LogLevel>,
    pub quiet: bool,
}

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(settings: LogSettings) -> Result<()> {
    let env_level = std::env::var("WINSVC_LOG").ok();
    let level = resolve_level(settings, env_level.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}

/// Effective level filter for the given settings and `WINSVC_LOG` value.
pub fn resolve_level(settings: LogSettings, env_level: Option<&str>) -> LevelFilter {
    if settings.quiet {
        return LevelFilter::OFF;
    }
    match settings.level {
        Some(lvl) => level_from_log_level(lvl),
        None => env_level
            .and_then(parse_level_str)
            .unwrap_or(LevelFilter::INFO),
    }
}

fn level_from_log_level(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<LevelFilter> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        "off" => Some(LevelFilter::OFF),
        _ => None,
    }
}
