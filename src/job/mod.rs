// src/job/mod.rs

//! Jobs: declared resources plus a deferred body.
//!
//! - [`resource`] defines the `Resource` trait and the generic path resource.
//! - [`record`] holds the immutable job record and its captured invocation.
//! - [`scope`] is the declaration surface a job body talks to.
//! - [`registry`] turns job bodies into records (two-phase registration).

pub mod record;
pub mod registry;
pub mod resource;
pub mod scope;

use thiserror::Error;

use crate::exec::{CommandFailed, ExecError};

pub use record::{Invocation, JobRecord};
pub use registry::{JobDef, Registry, RegistryError};
pub use resource::{PathResource, Resource};
pub use scope::{Commands, JobScope};

/// Ways a job body can fail.
#[derive(Error, Debug)]
pub enum JobError {
    #[error(transparent)]
    Command(#[from] CommandFailed),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type JobResult = std::result::Result<(), JobError>;
