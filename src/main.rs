// src/main.rs

use winsvc::errors::WinsvcError;
use winsvc::logging::{self, LogSettings};
use winsvc::{cli, exit_code, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(LogSettings {
        level: args.log_level,
        quiet: args.quiet,
    }) {
        eprintln!("winsvc error: {err:?}");
    }

    let outcome = run(args).await;
    match &outcome {
        // Already explained in the log; the exit code says the rest.
        Err(WinsvcError::TaskNotConfigured(_)) => {}
        Err(err) => eprintln!("winsvc error: {err}"),
        Ok(_) => {}
    }

    std::process::exit(exit_code(&outcome));
}
