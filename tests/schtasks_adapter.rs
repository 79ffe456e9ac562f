// tests/schtasks_adapter.rs

use winsvc::task::schtasks::{
    classify_failure, create_failure, create_task_args, query_task_args, run_task_args,
    script_command, DEFAULT_NOT_FOUND_MARKERS,
};
use winsvc::task::{parse_task_definition, TaskError, TaskSpec, TaskTriggerError};
use winsvc::types::{task_name, Action};
use winsvc_test_utils::verbose_task_listing;

fn markers() -> Vec<String> {
    DEFAULT_NOT_FOUND_MARKERS.iter().map(|m| m.to_string()).collect()
}

#[test]
fn task_names_are_action_dash_logical() {
    assert_eq!(task_name("START", "svc"), "START-svc");
    assert_eq!(task_name("STOP", "svc"), "STOP-svc");
    assert_eq!(Action::Start.task_name("svc"), "START-svc");
    assert_eq!(Action::Stop.task_name("svc"), task_name("STOP", "svc"));
}

#[test]
fn not_found_output_is_classified_as_not_found() {
    let err = classify_failure(
        "START-svc",
        Some(1),
        "ERROR: The system cannot find the file specified.\r\r\n".to_string(),
        &markers(),
    );
    assert!(matches!(err, TaskError::NotFound(ref n) if n == "START-svc"));
    assert_eq!(
        TaskTriggerError::from(err),
        TaskTriggerError::NotConfigured("START-svc".to_string())
    );
}

#[test]
fn other_output_is_classified_as_failed() {
    let err = classify_failure(
        "START-svc",
        Some(1),
        "ERROR: Access is denied.\r\n".to_string(),
        &markers(),
    );
    match err {
        TaskError::Failed { code, output } => {
            assert_eq!(code, Some(1));
            assert!(output.contains("Access is denied"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn classification_only_knows_configured_locales() {
    let french = "ERREUR : Le fichier spécifié est introuvable.\r\n".to_string();
    let err = classify_failure("STOP-svc", Some(1), french.clone(), &markers());
    assert!(matches!(err, TaskError::Failed { .. }));

    let err = classify_failure(
        "STOP-svc",
        Some(1),
        french,
        &["Le fichier spécifié est introuvable".to_string()],
    );
    assert!(matches!(err, TaskError::NotFound(_)));
}

#[test]
fn definition_with_single_pattern() {
    let listing = format!(
        "{}Task To Run:  PowerShell.exe -WindowStyle hidden -File start-service.ps1 Xbl*\r\n",
        "Test Line\r\n".repeat(10)
    );
    let def = parse_task_definition("START-xbox", &listing);
    assert_eq!(def.service_patterns, vec!["Xbl*".to_string()]);
    assert_eq!(def.name, "START-xbox");
}

#[test]
fn definition_with_several_patterns() {
    let listing = format!(
        "{}Task To Run:  PowerShell.exe -WindowStyle hidden -File start-service.ps1 X1 X2*\r\n",
        "Test Line\r\n".repeat(10)
    );
    let def = parse_task_definition("START-x", &listing);
    assert_eq!(def.service_patterns, vec!["X1".to_string(), "X2*".to_string()]);
}

#[test]
fn definition_from_realistic_listing_with_drive_letters() {
    let listing = verbose_task_listing("STOP-xbox", &["XblAuthManager", "XblGameSave"]);
    let def = parse_task_definition("STOP-xbox", &listing);
    assert_eq!(
        def.service_patterns,
        vec!["XblAuthManager".to_string(), "XblGameSave".to_string()]
    );
    assert!(def.task_to_run.unwrap().starts_with("PowerShell.exe"));
}

#[test]
fn definition_line_is_found_when_the_listing_is_shifted() {
    let listing = format!(
        "Extra: line\r\n{}",
        verbose_task_listing("START-x", &["Spooler"])
    );
    let def = parse_task_definition("START-x", &listing);
    assert_eq!(def.service_patterns, vec!["Spooler".to_string()]);
}

#[test]
fn definition_without_script_arguments_has_no_patterns() {
    let listing = format!("{}Task To Run:  notepad.exe\r\n", "Test Line\r\n".repeat(10));
    let def = parse_task_definition("START-x", &listing);
    assert!(def.service_patterns.is_empty());
    assert_eq!(def.task_to_run.as_deref(), Some("notepad.exe"));
}

#[test]
fn quoted_script_path_with_spaces_is_not_a_pattern() {
    let services = vec!["Xbl*".to_string()];
    let command = script_command(r"C:\Program Files\winsvc\start-service.ps1", &services);
    assert_eq!(
        command,
        r#"PowerShell.exe -WindowStyle hidden -File "C:\Program Files\winsvc\start-service.ps1" Xbl*"#
    );

    let listing = format!("{}Task To Run:  {command}\r\n", "Test Line\r\n".repeat(10));
    let def = parse_task_definition("START-xbox", &listing);
    assert_eq!(def.service_patterns, vec!["Xbl*".to_string()]);
    assert_eq!(def.task_to_run.as_deref(), Some(command.as_str()));
}

#[test]
fn unquoted_script_path_with_spaces_is_skipped_up_to_the_script() {
    let listing = format!(
        "{}Task To Run:  PowerShell.exe -WindowStyle hidden -File C:\\Program Files\\winsvc\\stop-service.ps1 X1 X2*\r\n",
        "Test Line\r\n".repeat(10)
    );
    let def = parse_task_definition("STOP-x", &listing);
    assert_eq!(def.service_patterns, vec!["X1".to_string(), "X2*".to_string()]);
}

#[test]
fn create_failure_keeps_raw_output_even_when_it_reads_like_not_found() {
    let output = "ERROR: The system cannot find the file specified.\r\n".to_string();
    match create_failure(Some(1), output.clone()) {
        TaskError::Failed { code, output: kept } => {
            assert_eq!(code, Some(1));
            assert_eq!(kept, output);
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn create_args_put_name_command_and_user_at_fixed_positions() {
    let services = vec!["dummy-svc1".to_string(), "dummy-svc2".to_string()];
    let command = script_command("dummy-script", &services);
    assert_eq!(
        command,
        r#"PowerShell.exe -WindowStyle hidden -File "dummy-script" dummy-svc1 dummy-svc2"#
    );

    let spec = TaskSpec {
        name: "dummy-task".to_string(),
        command: command.clone(),
        run_as: Some("someone".to_string()),
    };
    let args = create_task_args(&spec);
    assert_eq!((args[4].as_str(), args[6].as_str(), args[10].as_str()), ("dummy-task", command.as_str(), "someone"));
    assert_eq!(args.last().map(String::as_str), Some("/F"));
    assert!(args.contains(&"*[System/EventID=999]".to_string()));
}

#[test]
fn create_args_without_user_leave_out_run_as() {
    let spec = TaskSpec {
        name: "dummy-task".to_string(),
        command: "cmd".to_string(),
        run_as: None,
    };
    let args = create_task_args(&spec);
    assert_eq!((args[4].as_str(), args[6].as_str()), ("dummy-task", "cmd"));
    assert!(!args.iter().any(|a| a == "/RU"));
}

#[test]
fn run_and_query_args() {
    assert_eq!(run_task_args("START-x"), vec!["/Run", "/TN", "START-x"]);
    assert_eq!(
        query_task_args("START-x"),
        vec!["/Query", "/V", "/FO", "LIST", "/TN", "START-x"]
    );
}
