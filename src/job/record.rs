// src/job/record.rs

use std::fmt;
use std::sync::Arc;

use super::scope::JobScope;
use super::JobResult;

pub(crate) type Body = dyn Fn(&mut JobScope<'_>) -> JobResult + Send + Sync;

/// The deferred call of a job-defining routine, with its arguments bound.
///
/// Calling it re-runs the whole routine body; what the body does past the
/// commit marker depends on the scope's mode.
#[derive(Clone)]
pub struct Invocation {
    routine: &'static str,
    body: Arc<Body>,
}

impl Invocation {
    pub(crate) fn new(routine: &'static str, body: Arc<Body>) -> Self {
        Self { routine, body }
    }

    /// Name of the job-defining routine this invocation came from.
    pub fn routine(&self) -> &'static str {
        self.routine
    }

    pub fn call(&self, scope: &mut JobScope<'_>) -> JobResult {
        (self.body)(scope)
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("routine", &self.routine)
            .finish_non_exhaustive()
    }
}

/// A registered job: what it reads, what it writes, and how to run it.
///
/// Built once during registration and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct JobRecord {
    name: String,
    inputs: Vec<Arc<dyn super::Resource>>,
    outputs: Vec<Arc<dyn super::Resource>>,
    invocation: Invocation,
}

impl JobRecord {
    pub(crate) fn new(
        name: String,
        inputs: Vec<Arc<dyn super::Resource>>,
        outputs: Vec<Arc<dyn super::Resource>>,
        invocation: Invocation,
    ) -> Self {
        Self {
            name,
            inputs,
            outputs,
            invocation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[Arc<dyn super::Resource>] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Arc<dyn super::Resource>] {
        &self.outputs
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    pub fn output_paths(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|o| o.path())
    }
}

/// In-progress record filled in by declarations while scheduling.
#[derive(Debug)]
pub(crate) struct Draft {
    pub name: String,
    pub inputs: Vec<Arc<dyn super::Resource>>,
    pub outputs: Vec<Arc<dyn super::Resource>>,
    pub committed: bool,
}

impl Draft {
    pub fn new(routine: &str) -> Self {
        Self {
            name: routine.to_string(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            committed: false,
        }
    }

    pub fn finish(self, invocation: Invocation) -> JobRecord {
        JobRecord::new(self.name, self.inputs, self.outputs, invocation)
    }
}
