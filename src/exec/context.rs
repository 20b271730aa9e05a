// src/exec/context.rs

//! Execution context handed to job bodies.
//!
//! Instead of a process-wide "current executor", the active executor lives
//! in an [`ExecContext`]. Entering a spawner swaps it for the duration of a
//! [`SpawnerScope`]; the scope mutably borrows the context, so two spawners
//! can never be active on the same context.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Handle;
use tracing::{debug, info};

use super::backend::{DirectExecutor, ProcessExecutor};
use super::command::{format_cmd, CommandFailed, CommandRequest, IoOptions};
use super::progress::{wait_with_progress, ProgressOptions};
use super::ExecError;
use crate::job::JobResult;
use crate::report::{format_duration, Console};
use crate::spawner::Spawner;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    pub progress: ProgressOptions,
    pub io: IoOptions,
    /// Prepended to every command, e.g. `["cmd", "/c", "start", "/wait"]`.
    pub command_prefix: Vec<String>,
}

pub struct ExecContext {
    handle: Handle,
    executor: Arc<dyn ProcessExecutor>,
    console: Console,
    options: ExecOptions,
}

impl fmt::Debug for ExecContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecContext")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ExecContext {
    pub fn new(
        handle: Handle,
        executor: Arc<dyn ProcessExecutor>,
        console: Console,
        options: ExecOptions,
    ) -> Self {
        Self {
            handle,
            executor,
            console,
            options,
        }
    }

    /// Context running commands as direct children of this process.
    pub fn direct(handle: Handle, console: Console, options: ExecOptions) -> Self {
        let executor = Arc::new(DirectExecutor::new(handle.clone()));
        Self::new(handle, executor, console, options)
    }

    pub fn console(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn options(&self) -> &ExecOptions {
        &self.options
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Run one command to completion on behalf of a job.
    ///
    /// Prints the command line and its duration, and turns a non-zero exit
    /// into [`CommandFailed`] carrying `argv` as given (without prefix).
    /// Must not be called from inside the Tokio runtime.
    pub fn run_command(&mut self, argv: &[String]) -> JobResult {
        if argv.is_empty() {
            return Err(ExecError::EmptyCommand.into());
        }

        self.console.line(format!("    $ {}", format_cmd(argv)));

        let full_argv: Vec<String> = self
            .options
            .command_prefix
            .iter()
            .chain(argv.iter())
            .cloned()
            .collect();
        let request = CommandRequest::new(full_argv, self.options.io.clone());

        info!(argv = ?request.argv, "running command");
        let started = Instant::now();
        let future = self.executor.execute(request);

        // The animation is terminal decoration; redirected output gets a plain wait.
        let result = if self.options.progress.enabled && self.console.is_terminal() {
            self.handle.block_on(wait_with_progress(
                future,
                &self.options.progress,
                self.console.writer(),
            ))
        } else {
            self.handle.block_on(future)
        };

        let elapsed = started.elapsed();
        self.console
            .line(format!("      duration = {}", format_duration(elapsed)));

        let exit_code = result?;
        debug!(exit_code, elapsed_ms = elapsed.as_millis() as u64, "command finished");

        if exit_code != 0 {
            return Err(CommandFailed {
                exit_code,
                argv: argv.to_vec(),
            }
            .into());
        }
        Ok(())
    }

    /// Route every command through `spawner` until the scope ends.
    pub fn enter_spawner(&mut self, spawner: Spawner) -> SpawnerScope<'_> {
        let spawner = Arc::new(spawner);
        let active: Arc<dyn ProcessExecutor> = spawner.clone();
        let previous = std::mem::replace(&mut self.executor, active);
        info!("spawner active");

        SpawnerScope {
            ctx: self,
            previous: Some(previous),
            spawner: Some(spawner),
        }
    }
}

/// Active spawner override. The previous executor comes back on drop.
pub struct SpawnerScope<'a> {
    ctx: &'a mut ExecContext,
    previous: Option<Arc<dyn ProcessExecutor>>,
    spawner: Option<Arc<Spawner>>,
}

impl SpawnerScope<'_> {
    /// Restore the previous executor and wait for the worker to exit.
    pub fn finish(mut self) -> Result<(), ExecError> {
        self.restore();
        match self.spawner.take() {
            Some(spawner) => self.ctx.handle.block_on(spawner.shutdown()),
            None => Ok(()),
        }
    }

    fn restore(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.ctx.executor = previous;
            info!("spawner released; direct executor restored");
        }
    }
}

impl Deref for SpawnerScope<'_> {
    type Target = ExecContext;

    fn deref(&self) -> &ExecContext {
        self.ctx
    }
}

impl DerefMut for SpawnerScope<'_> {
    fn deref_mut(&mut self) -> &mut ExecContext {
        self.ctx
    }
}

impl Drop for SpawnerScope<'_> {
    fn drop(&mut self) {
        self.restore();
        // Dropping the spawner closes the channel; the worker exits on EOF.
        self.spawner.take();
    }
}
