// src/exec/command.rs

//! Run a console tool and capture its output.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

/// Exit status and text produced by a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Process exit code; `None` if it was terminated by a signal.
    pub code: Option<i32>,
    /// Stdout followed by stderr, decoded lossily.
    pub text: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run `program args...` to completion.
///
/// Stdin is closed so tools that prompt (e.g. `schtasks /create` asking for
/// a password) fail instead of hanging. Stderr is appended to stdout, the
/// same way the Windows tools interleave diagnostics on a console.
pub async fn run_captured<S: AsRef<str>>(
    program: &str,
    args: &[S],
) -> std::io::Result<CommandOutput> {
    let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
    debug!(program, ?args, "running command");

    let output = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    let code = output.status.code();
    debug!(program, exit_code = ?code, "command exited");

    Ok(CommandOutput { code, text })
}
