// src/exec/command.rs

//! Command descriptions shared by every executor.
//!
//! A [`CommandRequest`] is plain data (argv + I/O options) so it can cross
//! the spawner channel unchanged.

use std::fs::File;
use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ExecError;
use crate::types::StdinMode;

/// How the child's standard streams are wired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoOptions {
    pub stdin: StdinMode,
    /// Send the child's stderr to the same place as its stdout.
    pub merge_stderr: bool,
}

impl Default for IoOptions {
    fn default() -> Self {
        Self {
            stdin: StdinMode::Null,
            merge_stderr: true,
        }
    }
}

/// Where a child's stdout ends up.
#[derive(Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    /// Used by the spawner worker, whose stdout is the response channel.
    Stderr,
    /// An already open console or file, shared by every child.
    File(Arc<File>),
}

impl OutputTarget {
    fn stdio(&self) -> io::Result<Stdio> {
        match self {
            OutputTarget::Stdout => Ok(Stdio::from(io::stdout())),
            OutputTarget::Stderr => Ok(Stdio::from(io::stderr())),
            OutputTarget::File(file) => file.try_clone().map(Stdio::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub argv: Vec<String>,
    pub io: IoOptions,
}

impl CommandRequest {
    pub fn new(argv: Vec<String>, io: IoOptions) -> Self {
        Self { argv, io }
    }

    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Build a ready-to-spawn command with the requested stream wiring.
    pub fn build(&self, target: &OutputTarget) -> Result<Command, ExecError> {
        let (program, args) = self.argv.split_first().ok_or(ExecError::EmptyCommand)?;
        let wiring = |source: io::Error| ExecError::Spawn {
            program: program.clone(),
            source,
        };

        let mut cmd = Command::new(program);
        cmd.args(args);

        match self.io.stdin {
            StdinMode::Null => cmd.stdin(Stdio::null()),
            StdinMode::Inherit => cmd.stdin(Stdio::inherit()),
        };

        cmd.stdout(target.stdio().map_err(wiring)?);
        if self.io.merge_stderr {
            cmd.stderr(target.stdio().map_err(wiring)?);
        }

        Ok(cmd)
    }
}

/// A command exited with a non-zero code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Non-zero exit code: {exit_code}")]
pub struct CommandFailed {
    pub exit_code: i32,
    pub argv: Vec<String>,
}

/// Render an argument list for humans: two-space separated, arguments
/// containing spaces in double quotes.
pub fn format_cmd(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.contains(' ') {
                format!("\"{arg}\"")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}
