// src/job/scope.rs

//! Declaration surface seen by job bodies.
//!
//! A job body is an ordinary function that is called twice:
//!
//! 1. While scheduling, `name`/`input`/`output` fill in the job record and
//!    [`JobScope::commit`] returns `None`, so the body returns early before
//!    issuing any command.
//! 2. While running, declarations are no-ops (they still return the declared
//!    path or resource) and `commit` hands out [`Commands`].
//!
//! ```ignore
//! fn compute(job: &mut JobScope<'_>, dataset: &String) -> JobResult {
//!     job.name(format!("Running {dataset}"));
//!     let input = job.input_path(format!("d:/datasets/{dataset}"));
//!     let output = job.output_path(format!("d:/results/{dataset}"));
//!
//!     let Some(mut cmd) = job.commit() else { return Ok(()) };
//!     cmd.run(["compute", input.as_str(), output.as_str()])
//! }
//! ```

use std::sync::Arc;

use tracing::trace;

use super::record::Draft;
use super::resource::{PathResource, Resource};
use super::JobResult;
use crate::exec::ExecContext;
use crate::fs::FileSystem;
use crate::types::Mode;

pub struct JobScope<'a> {
    mode: Mode,
    draft: Option<&'a mut Draft>,
    exec: Option<&'a mut ExecContext>,
    fs: Arc<dyn FileSystem>,
}

impl<'a> JobScope<'a> {
    pub(crate) fn scheduling(draft: &'a mut Draft, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            mode: Mode::Scheduling,
            draft: Some(draft),
            exec: None,
            fs,
        }
    }

    pub(crate) fn running(exec: &'a mut ExecContext, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            mode: Mode::Running,
            draft: None,
            exec: Some(exec),
            fs,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Filesystem used for path resources; custom resources may share it.
    pub fn filesystem(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Set the display name of the job. Defaults to the routine name.
    pub fn name(&mut self, name: impl Into<String>) {
        if let Some(draft) = self.draft.as_deref_mut() {
            draft.name = name.into();
        }
    }

    /// Declare an input resource and get it back for use in commands.
    pub fn input<R: Resource + 'static>(&mut self, resource: R) -> Arc<R> {
        let resource = Arc::new(resource);
        if let Some(draft) = self.draft.as_deref_mut() {
            trace!(path = resource.path(), "declared input");
            draft.inputs.push(resource.clone());
        }
        resource
    }

    /// Declare a plain path input; returns the path.
    pub fn input_path(&mut self, path: impl Into<String>) -> String {
        let path = path.into();
        self.input(PathResource::new(path.clone(), self.fs.clone()));
        path
    }

    /// Declare an output resource and get it back for use in commands.
    pub fn output<R: Resource + 'static>(&mut self, resource: R) -> Arc<R> {
        let resource = Arc::new(resource);
        if let Some(draft) = self.draft.as_deref_mut() {
            trace!(path = resource.path(), "declared output");
            draft.outputs.push(resource.clone());
        }
        resource
    }

    /// Declare a plain path output; returns the path.
    pub fn output_path(&mut self, path: impl Into<String>) -> String {
        let path = path.into();
        self.output(PathResource::new(path.clone(), self.fs.clone()));
        path
    }

    /// End of declarations.
    ///
    /// Returns `None` unless the body is being run for real; the body must
    /// then return without issuing commands.
    pub fn commit(&mut self) -> Option<Commands<'_>> {
        match self.mode {
            Mode::Scheduling => {
                if let Some(draft) = self.draft.as_deref_mut() {
                    draft.committed = true;
                }
                None
            }
            Mode::Analysing => None,
            Mode::Running => self.exec.as_deref_mut().map(|ctx| Commands { ctx }),
        }
    }
}

/// Command surface available to a job body past the commit marker.
pub struct Commands<'a> {
    ctx: &'a mut ExecContext,
}

impl Commands<'_> {
    /// Run one command to completion.
    ///
    /// Fails with [`super::JobError::Command`] on a non-zero exit code.
    pub fn run<I, S>(&mut self, argv: I) -> JobResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        self.ctx.run_command(&argv)
    }
}
