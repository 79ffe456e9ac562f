// src/directory/scm.rs

//! Service directory backed by the Windows service control manager.
//!
//! State queries go through the SCM API (`windows-service`). Enumeration
//! is delegated to `sc.exe`, see [`super::sc`].

use std::collections::BTreeSet;
use std::io;

use tokio::task::spawn_blocking;

use crate::directory::sc::enumerate_services;
use crate::directory::{DirectoryError, ServiceDirectory};
use crate::types::{BoxFuture, ServiceName, ServiceState};

/// `ERROR_SERVICE_DOES_NOT_EXIST`.
pub const ERROR_SERVICE_DOES_NOT_EXIST: i32 = 1060;

#[derive(Debug, Clone)]
pub struct ScmServiceDirectory {
    sc_program: String,
}

impl ScmServiceDirectory {
    /// `sc_program` is used for enumeration only.
    pub fn new(sc_program: impl Into<String>) -> Self {
        Self {
            sc_program: sc_program.into(),
        }
    }
}

impl Default for ScmServiceDirectory {
    fn default() -> Self {
        Self::new("sc.exe")
    }
}

impl ServiceDirectory for ScmServiceDirectory {
    fn list_services(&self) -> BoxFuture<'_, Result<BTreeSet<ServiceName>, DirectoryError>> {
        Box::pin(enumerate_services(&self.sc_program))
    }

    fn service_state<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<ServiceState, DirectoryError>> {
        let owned = name.to_string();
        Box::pin(async move {
            spawn_blocking(move || query_state(&owned))
                .await
                .map_err(|join| DirectoryError::Query {
                    name: name.to_string(),
                    source: io::Error::other(join),
                })?
        })
    }
}

/// Map an OS error from the SCM onto the directory's error model.
pub fn classify_scm_error(name: &str, source: io::Error) -> DirectoryError {
    if source.raw_os_error() == Some(ERROR_SERVICE_DOES_NOT_EXIST) {
        DirectoryError::NotFound(name.to_string())
    } else {
        DirectoryError::Query {
            name: name.to_string(),
            source,
        }
    }
}

#[cfg(windows)]
fn query_state(name: &str) -> Result<ServiceState, DirectoryError> {
    use windows_service::service::ServiceAccess;
    use windows_service::service_manager::{ServiceManager, ServiceManagerAccess};

    let to_directory_error = |err: windows_service::Error| match err {
        windows_service::Error::Winapi(source) => classify_scm_error(name, source),
        other => DirectoryError::Query {
            name: name.to_string(),
            source: io::Error::other(other),
        },
    };

    let manager = ServiceManager::local_computer(None::<&str>, ServiceManagerAccess::CONNECT)
        .map_err(to_directory_error)?;
    let service = manager
        .open_service(name, ServiceAccess::QUERY_STATUS)
        .map_err(to_directory_error)?;
    let status = service.query_status().map_err(to_directory_error)?;
    Ok(from_scm_state(status.current_state))
}

#[cfg(not(windows))]
fn query_state(_name: &str) -> Result<ServiceState, DirectoryError> {
    Err(DirectoryError::Unsupported)
}

#[cfg(windows)]
fn from_scm_state(state: windows_service::service::ServiceState) -> ServiceState {
    use windows_service::service::ServiceState as Scm;

    match state {
        Scm::Stopped => ServiceState::Stopped,
        Scm::StartPending => ServiceState::StartPending,
        Scm::StopPending => ServiceState::StopPending,
        Scm::Running => ServiceState::Running,
        Scm::ContinuePending => ServiceState::ContinuePending,
        Scm::PausePending => ServiceState::PausePending,
        Scm::Paused => ServiceState::Paused,
    }
}
