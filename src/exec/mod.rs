// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] describes a command (argv + stream wiring) and the
//!   non-zero-exit failure.
//! - [`backend`] provides the `ProcessExecutor` trait, the `ProcessFuture`
//!   every executor returns, and the default `DirectExecutor`.
//! - [`progress`] animates the terminal while a process runs.
//! - [`context`] owns the active executor and implements the command
//!   invocation wrapper used by job bodies.

pub mod backend;
pub mod command;
pub mod context;
pub mod progress;

use thiserror::Error;

pub use backend::{DirectExecutor, ProcessCompleter, ProcessExecutor, ProcessFuture, ProcessResult};
pub use command::{format_cmd, CommandFailed, CommandRequest, IoOptions, OutputTarget};
pub use context::{ExecContext, ExecOptions, SpawnerScope};
pub use progress::{wait_with_progress, ProgressOptions};

/// Failure to get an exit code out of a command at all.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("empty command")]
    EmptyCommand,

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("spawner channel error: {0}")]
    Channel(String),

    #[error("spawner protocol error: {0}")]
    Protocol(String),

    #[error("worker could not run command: {0}")]
    Worker(String),

    #[error("process result was abandoned before completion")]
    Abandoned,
}
