pub mod builders;
pub mod capture;
pub mod fake_directory;
pub mod fake_scheduler;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};
use winsvc::task::schtasks::script_command;

pub use capture::{CapturedEvent, EventCapture};
pub use fake_directory::FakeServiceDirectory;
pub use fake_scheduler::FakeTaskScheduler;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Verbose `schtasks /query` listing whose command line passes `services`
/// to the start/stop script.
pub fn verbose_task_listing(task: &str, services: &[&str]) -> String {
    let services: Vec<String> = services.iter().map(|s| s.to_string()).collect();
    let command = script_command(
        r"C:\Program Files\winsvc\scripts\start-service.ps1",
        &services,
    );
    task_listing(task, &command)
}

/// Verbose `schtasks /query` listing of a task that runs `command`.
pub fn task_listing(task: &str, command: &str) -> String {
    let mut out = String::new();
    out.push_str("\r\n");
    out.push_str("Folder: \\\r\n");
    out.push_str("HostName:                             HOST\r\n");
    out.push_str(&format!("TaskName:                             \\{task}\r\n"));
    out.push_str("Next Run Time:                        N/A\r\n");
    out.push_str("Status:                               Ready\r\n");
    out.push_str("Logon Mode:                           Interactive only\r\n");
    out.push_str("Last Run Time:                        30.11.1999 00:00:00\r\n");
    out.push_str("Last Result:                          267011\r\n");
    out.push_str("Author:                               HOST\\admin\r\n");
    out.push_str(&format!("Task To Run:                          {command}\r\n"));
    out.push_str("Start In:                             N/A\r\n");
    out.push_str("Comment:                              N/A\r\n");
    out
}
