// src/task/definition.rs

//! Parsing of `schtasks /query /v /fo LIST` output.
//!
//! The labels of that listing are localized ("Task To Run:",
//! "Auszuführende Aufgabe:", ...) but the field order is not. The command
//! line sits on the eleventh line of the listing, so that line is tried
//! first; any other line carrying a `-File` argument is the fallback.

use crate::types::TaskName;

/// Index of the "Task To Run" line in the verbose listing.
pub const TASK_TO_RUN_LINE: usize = 10;

/// The parts of a scheduled task definition the orchestrator cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    pub name: TaskName,
    /// Command line the task runs, if it could be located.
    pub task_to_run: Option<String>,
    /// Service patterns handed to the start/stop script.
    pub service_patterns: Vec<String>,
}

pub fn parse_task_definition(name: &str, listing: &str) -> TaskDefinition {
    let lines: Vec<&str> = listing.lines().collect();

    let preferred = lines.get(TASK_TO_RUN_LINE).and_then(|l| field_value(l));
    let command = preferred
        .filter(|cmd| file_argument_index(cmd).is_some())
        .or_else(|| {
            lines
                .iter()
                .filter_map(|l| field_value(l))
                .find(|cmd| file_argument_index(cmd).is_some())
        })
        .or(preferred);

    let service_patterns = command.map(script_arguments).unwrap_or_default();

    TaskDefinition {
        name: name.to_string(),
        task_to_run: command.map(str::to_string),
        service_patterns,
    }
}

/// Value part of a `Label: value` line.
fn field_value(line: &str) -> Option<&str> {
    let (_, value) = line.split_once(':')?;
    let value = value.trim();
    if value.is_empty() { None } else { Some(value) }
}

fn file_argument_index(command: &str) -> Option<usize> {
    split_command_line(command)
        .iter()
        .position(|t| t.eq_ignore_ascii_case("-File"))
}

/// Every argument after `-File <script>`.
///
/// The script path is normally one quoted token. An unquoted path with
/// spaces is skipped up to the token that ends in `.ps1`.
fn script_arguments(command: &str) -> Vec<String> {
    let tokens = split_command_line(command);
    let Some(idx) = tokens.iter().position(|t| t.eq_ignore_ascii_case("-File")) else {
        return Vec::new();
    };
    let script = idx + 1;
    if script >= tokens.len() {
        return Vec::new();
    }
    let script_end = if is_script(&tokens[script]) {
        script
    } else {
        tokens[script..]
            .iter()
            .position(|t| is_script(t))
            .map_or(script, |offset| script + offset)
    };
    tokens.into_iter().skip(script_end + 1).collect()
}

fn is_script(token: &str) -> bool {
    token.to_ascii_lowercase().ends_with(".ps1")
}

/// Split on whitespace; double quotes group a token and are dropped.
fn split_command_line(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in command.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}
