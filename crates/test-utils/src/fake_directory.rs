use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};

use winsvc::directory::{DirectoryError, ServiceDirectory};
use winsvc::types::{BoxFuture, ServiceName, ServiceState};

/// Scripted service directory.
///
/// Every service has a queue of observations. Each `service_state` call
/// consumes the front of the queue; the last entry sticks. `None` means the
/// service is gone (`NotFound`), and a gone service is not listed.
#[derive(Debug, Clone, Default)]
pub struct FakeServiceDirectory {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    services: BTreeMap<ServiceName, VecDeque<Option<ServiceState>>>,
    queries: Vec<ServiceName>,
    list_calls: usize,
    fail_listing: bool,
}

impl FakeServiceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service that always reports `state`.
    pub fn with_service(self, name: &str, state: ServiceState) -> Self {
        self.with_script(name, [state])
    }

    /// Service that reports `states` in order, then keeps the last one.
    pub fn with_script<I>(self, name: &str, states: I) -> Self
    where
        I: IntoIterator<Item = ServiceState>,
    {
        let script: VecDeque<Option<ServiceState>> = states.into_iter().map(Some).collect();
        assert!(!script.is_empty(), "script for {name} must not be empty");
        self.inner
            .lock()
            .unwrap()
            .services
            .insert(name.to_string(), script);
        self
    }

    /// Service that reports `states` in order and is then uninstalled.
    pub fn with_vanishing<I>(self, name: &str, states: I) -> Self
    where
        I: IntoIterator<Item = ServiceState>,
    {
        let mut script: VecDeque<Option<ServiceState>> = states.into_iter().map(Some).collect();
        script.push_back(None);
        self.inner
            .lock()
            .unwrap()
            .services
            .insert(name.to_string(), script);
        self
    }

    /// Make `list_services` fail.
    pub fn with_failing_listing(self) -> Self {
        self.inner.lock().unwrap().fail_listing = true;
        self
    }

    /// Names passed to `service_state`, in call order.
    pub fn queries(&self) -> Vec<ServiceName> {
        self.inner.lock().unwrap().queries.clone()
    }

    pub fn query_count(&self, name: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .queries
            .iter()
            .filter(|q| q.as_str() == name)
            .count()
    }

    pub fn list_calls(&self) -> usize {
        self.inner.lock().unwrap().list_calls
    }
}

impl ServiceDirectory for FakeServiceDirectory {
    fn list_services(&self) -> BoxFuture<'_, Result<BTreeSet<ServiceName>, DirectoryError>> {
        let result = {
            let mut inner = self.inner.lock().unwrap();
            inner.list_calls += 1;
            if inner.fail_listing {
                Err(DirectoryError::Failed {
                    code: Some(5),
                    output: "[SC] OpenSCManager FAILED 5:\r\n\r\nAccess is denied.".to_string(),
                })
            } else {
                Ok(inner
                    .services
                    .iter()
                    .filter(|(_, script)| matches!(script.front(), Some(Some(_))))
                    .map(|(name, _)| name.clone())
                    .collect())
            }
        };
        Box::pin(async move { result })
    }

    fn service_state<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<ServiceState, DirectoryError>> {
        let result = {
            let mut inner = self.inner.lock().unwrap();
            inner.queries.push(name.to_string());
            match inner.services.get_mut(name) {
                Some(script) => {
                    let current = if script.len() > 1 {
                        script.pop_front().flatten()
                    } else {
                        script.front().copied().flatten()
                    };
                    current.ok_or_else(|| DirectoryError::NotFound(name.to_string()))
                }
                None => Err(DirectoryError::NotFound(name.to_string())),
            }
        };
        Box::pin(async move { result })
    }
}
