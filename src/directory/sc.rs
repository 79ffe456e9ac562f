// src/directory/sc.rs

//! Service enumeration through `sc.exe`.
//!
//! Only the `SERVICE_NAME:` lines are read; they are not localized.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::directory::DirectoryError;
use crate::exec::run_captured;
use crate::types::ServiceName;

/// Enumeration buffer handed to `sc`. The default one is too small for a
/// typical desktop and makes `sc` stop with `ERROR_MORE_DATA` (234).
pub const ENUM_BUFFER_SIZE: u32 = 256 * 1024;

static SERVICE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*SERVICE_NAME:\s*(\S.*?)\s*$").expect("valid regex"));

/// Arguments of the `sc` call that lists every installed service.
pub fn list_services_args() -> Vec<String> {
    vec![
        "query".to_string(),
        "type=".to_string(),
        "service".to_string(),
        "state=".to_string(),
        "all".to_string(),
        "bufsize=".to_string(),
        ENUM_BUFFER_SIZE.to_string(),
    ]
}

/// Names of all installed services, as reported by `program` (`sc.exe`).
pub async fn enumerate_services(program: &str) -> Result<BTreeSet<ServiceName>, DirectoryError> {
    let out = run_captured(program, &list_services_args())
        .await
        .map_err(|source| DirectoryError::Spawn {
            program: program.to_string(),
            source,
        })?;
    if !out.success() {
        return Err(DirectoryError::Failed {
            code: out.code,
            output: out.text,
        });
    }
    let names = parse_service_names(&out.text);
    debug!(count = names.len(), "enumerated services");
    Ok(names)
}

/// Extract every `SERVICE_NAME:` entry from `sc query` output.
pub fn parse_service_names(output: &str) -> BTreeSet<ServiceName> {
    SERVICE_NAME_RE
        .captures_iter(output)
        .map(|c| c[1].to_string())
        .collect()
}
