// tests/config_loading.rs

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;
use winsvc::config::{load_and_validate, resolve_config, ConfigFile};
use winsvc::converge::PollSettings;
use winsvc::errors::WinsvcError;
use winsvc::orchestrator::OrchestratorSettings;
use winsvc::types::TargetPolicy;
use winsvc_test_utils::builders::ConfigFileBuilder;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn empty_file_yields_defaults() {
    let file = write_config("");
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.poll().interval_ms, 1000);
    assert_eq!(cfg.poll().progress_every, 5);
    assert_eq!(cfg.poll().default_wait(), Duration::from_secs(30));
    assert_eq!(cfg.targets().policy, TargetPolicy::TaskDefinition);
    assert!(cfg.targets().case_insensitive);
    assert_eq!(cfg.scheduler().program, "schtasks.exe");
    assert_eq!(cfg.directory().program, "sc.exe");
    assert!(cfg
        .scheduler()
        .not_found_markers
        .iter()
        .any(|m| m.starts_with("ERROR: The system cannot find the file specified")));
}

#[test]
fn sections_override_defaults() {
    let file = write_config(
        r#"
[poll]
interval_ms = 250
progress_every = 0
default_wait_secs = 90

[targets]
policy = "task_definition"
case_insensitive = false

[scheduler]
not_found_markers = ["ERREUR : Le fichier spécifié est introuvable"]

[setup]
start_script = 'D:\svc\start.ps1'
run_as = "svc-admin"
"#,
    );
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(
        PollSettings::from(cfg.poll()),
        PollSettings {
            interval: Duration::from_millis(250),
            progress_every: 0,
        }
    );
    assert_eq!(cfg.poll().default_wait_secs, 90);
    assert_eq!(cfg.targets().policy, TargetPolicy::TaskDefinition);
    assert_eq!(cfg.scheduler().not_found_markers.len(), 1);

    let settings = OrchestratorSettings::from(&cfg);
    assert!(!settings.case_insensitive);
    assert_eq!(settings.run_as.as_deref(), Some("svc-admin"));
    assert_eq!(settings.start_script, Path::new(r"D:\svc\start.ps1"));
}

#[test]
fn zero_interval_is_rejected() {
    let file = write_config("[poll]\ninterval_ms = 0\n");
    match load_and_validate(file.path()) {
        Err(WinsvcError::ConfigError(msg)) => assert!(msg.contains("interval_ms")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn empty_marker_list_is_rejected() {
    let file = write_config("[scheduler]\nnot_found_markers = []\n");
    match load_and_validate(file.path()) {
        Err(WinsvcError::ConfigError(msg)) => assert!(msg.contains("not_found_markers")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn unknown_policy_is_a_toml_error() {
    let file = write_config("[targets]\npolicy = \"sometimes\"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(WinsvcError::TomlError(_))
    ));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let err = resolve_config(Some(Path::new("definitely/not/here/Winsvc.toml"))).unwrap_err();
    assert!(matches!(err, WinsvcError::ConfigError(_)));
}

#[test]
fn builder_produces_validated_config() {
    let cfg: ConfigFile = ConfigFileBuilder::new()
        .interval_ms(500)
        .policy(TargetPolicy::Prefix)
        .case_insensitive(false)
        .not_found_marker("ERREUR : Le fichier")
        .run_as("tester")
        .build();
    assert_eq!(cfg.poll().interval_ms, 500);
    assert_eq!(cfg.targets().policy, TargetPolicy::Prefix);
    assert!(!cfg.targets().case_insensitive);
    assert_eq!(
        cfg.scheduler().not_found_markers.last().map(String::as_str),
        Some("ERREUR : Le fichier")
    );
    assert_eq!(cfg.setup().effective_run_as().as_deref(), Some("tester"));

    let raw = ConfigFileBuilder::new().default_wait_secs(0).raw();
    assert!(ConfigFile::try_from(raw).is_err());
}
