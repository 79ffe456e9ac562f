// src/directory/mod.rs

//! Service directory: what services exist, and what state they are in.
//!
//! The core never talks to the service manager directly; it goes through
//! the [`ServiceDirectory`] trait. Production uses [`ScmServiceDirectory`];
//! tests provide scripted fakes.

pub mod sc;
pub mod scm;

use std::collections::BTreeSet;

use thiserror::Error;

use crate::types::{BoxFuture, ServiceName, ServiceState};

pub use scm::ScmServiceDirectory;

#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The service is not (or no longer) registered.
    #[error("service '{0}' does not exist")]
    NotFound(ServiceName),

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("service query failed with exit code {code:?}: {output}")]
    Failed { code: Option<i32>, output: String },

    #[error("failed to query service '{name}': {source}")]
    Query {
        name: ServiceName,
        #[source]
        source: std::io::Error,
    },

    #[error("the service control manager is only available on Windows")]
    Unsupported,
}

/// Read-only view of the OS service registry.
pub trait ServiceDirectory: Send + Sync {
    /// Names of all currently registered services.
    fn list_services(&self) -> BoxFuture<'_, Result<BTreeSet<ServiceName>, DirectoryError>>;

    /// Current run state of a single service.
    ///
    /// Fails with [`DirectoryError::NotFound`] if the service vanished.
    fn service_state<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<ServiceState, DirectoryError>>;
}
