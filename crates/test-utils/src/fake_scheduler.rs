use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use winsvc::task::schtasks::{classify_failure, create_failure, DEFAULT_NOT_FOUND_MARKERS};
use winsvc::task::{TaskError, TaskScheduler, TaskSpec};
use winsvc::types::{BoxFuture, TaskName};

use crate::task_listing;

/// What a configured task does when run.
#[derive(Debug, Clone)]
enum Behaviour {
    Succeed,
    /// Raw exit code and output; classified like the real adapter does.
    Fail { code: i32, output: String },
}

/// Scripted task scheduler.
///
/// Created tasks can be run and queried afterwards, like real ones.
///
/// Unknown tasks fail with the English `schtasks` "not found" message and
/// are classified through the same `classify_failure` the real adapter
/// uses. Every call is recorded.
#[derive(Debug, Clone)]
pub struct FakeTaskScheduler {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    tasks: BTreeMap<TaskName, Behaviour>,
    definitions: BTreeMap<TaskName, String>,
    markers: Vec<String>,
    runs: Vec<TaskName>,
    queries: Vec<TaskName>,
    created: Vec<TaskSpec>,
    fail_create: Option<String>,
}

impl Default for FakeTaskScheduler {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                tasks: BTreeMap::new(),
                definitions: BTreeMap::new(),
                markers: DEFAULT_NOT_FOUND_MARKERS
                    .iter()
                    .map(|m| m.to_string())
                    .collect(),
                runs: Vec::new(),
                queries: Vec::new(),
                created: Vec::new(),
                fail_create: None,
            })),
        }
    }
}

pub const NOT_FOUND_OUTPUT: &str = "ERROR: The system cannot find the file specified.\r\r\n";

impl FakeTaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A task that runs fine.
    pub fn with_task(self, name: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .tasks
            .insert(name.to_string(), Behaviour::Succeed);
        self
    }

    /// A task whose run exits with `code` and prints `output`.
    pub fn with_failing_task(self, name: &str, code: i32, output: &str) -> Self {
        self.inner.lock().unwrap().tasks.insert(
            name.to_string(),
            Behaviour::Fail {
                code,
                output: output.to_string(),
            },
        );
        self
    }

    /// Verbose listing returned by `query_task` for `name`.
    pub fn with_definition(self, name: &str, listing: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .definitions
            .insert(name.to_string(), listing.to_string());
        self
    }

    /// Make `create_task` fail with the given output, classified the way
    /// the real adapter classifies `/CREATE` failures.
    pub fn with_failing_create(self, output: &str) -> Self {
        self.inner.lock().unwrap().fail_create = Some(output.to_string());
        self
    }

    pub fn runs(&self) -> Vec<TaskName> {
        self.inner.lock().unwrap().runs.clone()
    }

    pub fn queries(&self) -> Vec<TaskName> {
        self.inner.lock().unwrap().queries.clone()
    }

    pub fn created(&self) -> Vec<TaskSpec> {
        self.inner.lock().unwrap().created.clone()
    }
}

impl TaskScheduler for FakeTaskScheduler {
    fn run_task<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<(), TaskError>> {
        let result = {
            let mut inner = self.inner.lock().unwrap();
            inner.runs.push(name.to_string());
            match inner.tasks.get(name).cloned() {
                Some(Behaviour::Succeed) => Ok(()),
                Some(Behaviour::Fail { code, output }) => {
                    Err(classify_failure(name, Some(code), output, &inner.markers))
                }
                None => Err(classify_failure(
                    name,
                    Some(1),
                    NOT_FOUND_OUTPUT.to_string(),
                    &inner.markers,
                )),
            }
        };
        Box::pin(async move { result })
    }

    fn query_task<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<String, TaskError>> {
        let result = {
            let mut inner = self.inner.lock().unwrap();
            inner.queries.push(name.to_string());
            match inner.definitions.get(name).cloned() {
                Some(listing) => Ok(listing),
                None => Err(classify_failure(
                    name,
                    Some(1),
                    NOT_FOUND_OUTPUT.to_string(),
                    &inner.markers,
                )),
            }
        };
        Box::pin(async move { result })
    }

    fn create_task<'a>(&'a self, spec: &'a TaskSpec) -> BoxFuture<'a, Result<(), TaskError>> {
        let result = {
            let mut inner = self.inner.lock().unwrap();
            match inner.fail_create.clone() {
                Some(output) => Err(create_failure(Some(1), output)),
                None => {
                    inner.created.push(spec.clone());
                    inner.tasks.insert(spec.name.clone(), Behaviour::Succeed);
                    inner
                        .definitions
                        .insert(spec.name.clone(), task_listing(&spec.name, &spec.command));
                    Ok(())
                }
            }
        };
        Box::pin(async move { result })
    }
}
