// src/exec/backend.rs

//! Pluggable process executor abstraction.
//!
//! Everything that runs a command goes through [`ProcessExecutor::execute`],
//! which returns immediately with a [`ProcessFuture`]. The future resolves
//! exactly once, to the exit code, from whatever background task owns the
//! process.
//!
//! - [`DirectExecutor`] spawns the process on the Tokio runtime and waits for
//!   it in a background task.
//! - The spawner (see [`crate::spawner`]) forwards the command to a worker
//!   process instead.
//! - Tests provide executors that resolve instantly.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::command::{CommandRequest, OutputTarget};
use super::ExecError;

pub type ProcessResult = Result<i32, ExecError>;

/// Trait abstracting how a command is turned into a running process.
pub trait ProcessExecutor: Send + Sync {
    /// Start the command. Must not block until the process finishes.
    fn execute(&self, request: CommandRequest) -> ProcessFuture;
}

/// Eventual exit code of a started process.
///
/// Polling has no side effects, so it is fine to poll it repeatedly under a
/// timeout.
#[derive(Debug)]
pub struct ProcessFuture {
    rx: oneshot::Receiver<ProcessResult>,
}

/// Resolving half of a [`ProcessFuture`].
#[derive(Debug)]
pub struct ProcessCompleter {
    tx: oneshot::Sender<ProcessResult>,
}

impl ProcessFuture {
    pub fn channel() -> (ProcessCompleter, ProcessFuture) {
        let (tx, rx) = oneshot::channel();
        (ProcessCompleter { tx }, ProcessFuture { rx })
    }

    /// An already-resolved future.
    pub fn ready(result: ProcessResult) -> Self {
        let (done, fut) = Self::channel();
        done.complete(result);
        fut
    }
}

impl ProcessCompleter {
    pub fn complete(self, result: ProcessResult) {
        if self.tx.send(result).is_err() {
            debug!("process result dropped; nobody is waiting for it");
        }
    }
}

impl Future for ProcessFuture {
    type Output = ProcessResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.unwrap_or(Err(ExecError::Abandoned)))
    }
}

/// Runs commands as direct children of this process.
#[derive(Clone)]
pub struct DirectExecutor {
    handle: Handle,
}

impl fmt::Debug for DirectExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectExecutor").finish_non_exhaustive()
    }
}

impl DirectExecutor {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }
}

impl ProcessExecutor for DirectExecutor {
    fn execute(&self, request: CommandRequest) -> ProcessFuture {
        let cmd = match request.build(&OutputTarget::Stdout) {
            Ok(cmd) => cmd,
            Err(e) => return ProcessFuture::ready(Err(e)),
        };
        let program = request.program().unwrap_or_default().to_string();
        let (done, fut) = ProcessFuture::channel();

        self.handle.spawn(async move {
            let mut cmd = tokio::process::Command::from(cmd);
            let result = match cmd.spawn() {
                Ok(mut child) => match child.wait().await {
                    Ok(status) => {
                        let code = status.code().unwrap_or(-1);
                        debug!(%program, exit_code = code, "process exited");
                        Ok(code)
                    }
                    Err(source) => Err(ExecError::Wait { program, source }),
                },
                Err(source) => {
                    warn!(%program, error = %source, "failed to start process");
                    Err(ExecError::Spawn { program, source })
                }
            };
            done.complete(result);
        });

        fut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_future_resolves_immediately() {
        let code = ProcessFuture::ready(Ok(7)).await.unwrap();
        assert_eq!(code, 7);
    }

    #[tokio::test]
    async fn dropped_completer_abandons_the_future() {
        let (done, fut) = ProcessFuture::channel();
        drop(done);
        assert!(matches!(fut.await, Err(ExecError::Abandoned)));
    }

    #[tokio::test]
    async fn missing_program_resolves_to_spawn_error() {
        let exec = DirectExecutor::new(Handle::current());
        let req = CommandRequest::new(
            vec!["jobqueue-definitely-not-a-program".to_string()],
            Default::default(),
        );
        let err = exec.execute(req).await.unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn direct_executor_reports_exit_code() {
        let exec = DirectExecutor::new(Handle::current());
        let req = CommandRequest::new(
            vec!["sh".into(), "-c".into(), "exit 2".into()],
            Default::default(),
        );
        assert_eq!(exec.execute(req).await.unwrap(), 2);
    }
}
