// src/exec/mod.rs

//! Process execution layer.
//!
//! Both OS adapters (`sc.exe` for the service directory, `schtasks.exe` for
//! the task scheduler) are thin wrappers around short-lived console tools.
//! [`command`] runs such a tool to completion and hands back its exit code
//! plus the combined stdout/stderr text for classification.

pub mod command;

pub use command::{run_captured, CommandOutput};
