// src/job/registry.rs

//! Two-phase job registration.
//!
//! [`Registry::schedule`] calls a job body in scheduling mode. The body
//! declares its name, inputs and outputs, then reaches the commit marker and
//! returns early. The filled-in record is stored together with an
//! [`Invocation`] that binds the arguments, so the engine can call the same
//! body again later in running mode, this time past the commit marker.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::record::{Body, Draft, Invocation, JobRecord};
use super::scope::JobScope;
use super::{JobError, JobResult};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::Mode;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("cannot schedule jobs while {mode}")]
    NotScheduling { mode: Mode },

    #[error("job '{routine}' returned before reaching its commit marker")]
    NotCommitted { routine: &'static str },

    #[error("job '{routine}' failed while declaring resources: {source}")]
    Declaration {
        routine: &'static str,
        #[source]
        source: JobError,
    },
}

type Routine<A> = dyn Fn(&mut JobScope<'_>, &A) -> JobResult + Send + Sync;

/// A job-defining routine, not yet bound to arguments.
pub struct JobDef<A> {
    routine: &'static str,
    body: Arc<Routine<A>>,
}

impl<A> JobDef<A> {
    pub fn new<F>(routine: &'static str, body: F) -> Self
    where
        F: Fn(&mut JobScope<'_>, &A) -> JobResult + Send + Sync + 'static,
    {
        Self {
            routine,
            body: Arc::new(body),
        }
    }

    pub fn routine(&self) -> &'static str {
        self.routine
    }
}

impl<A> Clone for JobDef<A> {
    fn clone(&self) -> Self {
        Self {
            routine: self.routine,
            body: Arc::clone(&self.body),
        }
    }
}

impl<A> fmt::Debug for JobDef<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobDef")
            .field("routine", &self.routine)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of registered jobs.
#[derive(Debug)]
pub struct Registry {
    jobs: Vec<JobRecord>,
    mode: Mode,
    fs: Arc<dyn FileSystem>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Arc::new(RealFileSystem))
    }
}

impl Registry {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            jobs: Vec::new(),
            mode: Mode::Scheduling,
            fs,
        }
    }

    /// Bind `args` to `def` and register the resulting job.
    ///
    /// The body runs up to its commit marker only; no command is issued.
    /// Returns the index of the new job.
    pub fn schedule<A>(&mut self, def: &JobDef<A>, args: A) -> Result<usize, RegistryError>
    where
        A: Send + Sync + 'static,
    {
        if self.mode != Mode::Scheduling {
            return Err(RegistryError::NotScheduling { mode: self.mode });
        }

        let routine = def.routine;
        let bound = Arc::clone(&def.body);
        let body: Arc<Body> = Arc::new(move |scope: &mut JobScope<'_>| bound(scope, &args));
        let invocation = Invocation::new(routine, body);

        let mut draft = Draft::new(routine);
        {
            let mut scope = JobScope::scheduling(&mut draft, Arc::clone(&self.fs));
            invocation
                .call(&mut scope)
                .map_err(|source| RegistryError::Declaration { routine, source })?;
        }

        if !draft.committed {
            return Err(RegistryError::NotCommitted { routine });
        }

        let record = draft.finish(invocation);
        debug!(
            job = %record.name(),
            routine,
            inputs = record.inputs().len(),
            outputs = record.outputs().len(),
            "job scheduled"
        );
        self.jobs.push(record);
        Ok(self.jobs.len() - 1)
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        debug!(from = %self.mode, to = %mode, "registry mode change");
        self.mode = mode;
    }

    pub fn filesystem(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }
}
