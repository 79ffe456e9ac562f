// tests/cli_and_exit_codes.rs

use clap::Parser;
use tracing::level_filters::LevelFilter;

use winsvc::cli::{CliArgs, Command, LogLevel};
use winsvc::errors::WinsvcError;
use winsvc::logging::{resolve_level, LogSettings};
use winsvc::{exit_code, EXIT_FAILURE, EXIT_NOT_CONFIGURED, EXIT_OK};

#[test]
fn start_takes_identifier_wait_and_quiet() {
    let args = CliArgs::try_parse_from(["winsvc", "start", "Xbl*", "-w", "45", "-q"]).unwrap();
    assert!(args.quiet);
    match args.command {
        Command::Start(svc) => {
            assert_eq!(svc.service_name, "Xbl*");
            assert_eq!(svc.wait, Some(45));
        }
        other => panic!("expected start, got {other:?}"),
    }
}

#[test]
fn stop_wait_is_optional() {
    let args = CliArgs::try_parse_from(["winsvc", "stop", "Spooler"]).unwrap();
    match args.command {
        Command::Stop(svc) => assert_eq!(svc.wait, None),
        other => panic!("expected stop, got {other:?}"),
    }
}

#[test]
fn zero_wait_is_rejected() {
    assert!(CliArgs::try_parse_from(["winsvc", "start", "Spooler", "--wait", "0"]).is_err());
}

#[test]
fn setup_collects_service_patterns() {
    let args = CliArgs::try_parse_from([
        "winsvc", "setup", "xbox", "--service", "Xbl*", "--service", "XboxNetApiSvc",
    ])
    .unwrap();
    match args.command {
        Command::Setup(setup) => {
            assert_eq!(setup.name, "xbox");
            assert_eq!(setup.services, vec!["Xbl*", "XboxNetApiSvc"]);
        }
        other => panic!("expected setup, got {other:?}"),
    }
}

#[test]
fn global_flags_work_after_the_subcommand() {
    let args = CliArgs::try_parse_from([
        "winsvc", "stop", "Spooler", "--log-level", "debug", "--config", "custom.toml",
    ])
    .unwrap();
    assert_eq!(args.log_level, Some(LogLevel::Debug));
    assert_eq!(args.config.as_deref(), Some(std::path::Path::new("custom.toml")));
}

#[test]
fn exit_codes_distinguish_not_configured() {
    assert_eq!(exit_code(&Ok(true)), EXIT_OK);
    assert_eq!(exit_code(&Ok(false)), EXIT_FAILURE);
    assert_eq!(
        exit_code(&Err(WinsvcError::TaskNotConfigured("START-x".to_string()))),
        EXIT_NOT_CONFIGURED
    );
    assert_eq!(
        exit_code(&Err(WinsvcError::TaskTriggerUnexpected("boom".to_string()))),
        EXIT_FAILURE
    );
    assert_eq!(EXIT_NOT_CONFIGURED, 6);
}

#[test]
fn quiet_turns_logging_off() {
    let quiet = LogSettings {
        level: Some(LogLevel::Trace),
        quiet: true,
    };
    assert_eq!(resolve_level(quiet, Some("debug")), LevelFilter::OFF);
}

#[test]
fn cli_level_beats_environment() {
    let settings = LogSettings {
        level: Some(LogLevel::Warn),
        quiet: false,
    };
    assert_eq!(resolve_level(settings, Some("debug")), LevelFilter::WARN);
    assert_eq!(resolve_level(LogSettings::default(), Some("Debug")), LevelFilter::DEBUG);
    assert_eq!(resolve_level(LogSettings::default(), Some("nonsense")), LevelFilter::INFO);
    assert_eq!(resolve_level(LogSettings::default(), None), LevelFilter::INFO);
}
