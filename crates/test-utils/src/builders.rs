#![allow(dead_code)]

use winsvc::config::{ConfigFile, RawConfigFile};
use winsvc::types::TargetPolicy;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.config.poll.interval_ms = ms;
        self
    }

    pub fn progress_every(mut self, every: u32) -> Self {
        self.config.poll.progress_every = every;
        self
    }

    pub fn default_wait_secs(mut self, secs: u64) -> Self {
        self.config.poll.default_wait_secs = secs;
        self
    }

    pub fn policy(mut self, policy: TargetPolicy) -> Self {
        self.config.targets.policy = policy;
        self
    }

    pub fn case_insensitive(mut self, val: bool) -> Self {
        self.config.targets.case_insensitive = val;
        self
    }

    pub fn not_found_marker(mut self, marker: &str) -> Self {
        self.config
            .scheduler
            .not_found_markers
            .push(marker.to_string());
        self
    }

    pub fn run_as(mut self, user: &str) -> Self {
        self.config.setup.run_as = Some(user.to_string());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
