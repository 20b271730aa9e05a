// src/spawner/mod.rs

//! Spawner: an alternate executor backed by a long-lived worker process.
//!
//! While a spawner is active (see
//! [`ExecContext::enter_spawner`](crate::exec::ExecContext::enter_spawner)),
//! every command is serialized over a duplex channel to the worker, which
//! runs it synchronously in its own console and replies with the exit code.
//! Each call gets its own listener task that resolves the returned
//! [`ProcessFuture`].
//!
//! - [`protocol`] defines the line-delimited JSON messages.
//! - [`worker`] is the serving loop that runs inside the worker process.
//! - [`console`] isolates the "separate console window" capability.

pub mod console;
pub mod protocol;
pub mod worker;

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::process::Child;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::exec::{CommandRequest, ExecError, ProcessExecutor, ProcessFuture, ProcessResult};

pub use console::{ConsoleHost, InheritConsole, NewConsoleWindow};
use protocol::{WorkerOutcome, WorkerRequest, WorkerResponse};

/// Hidden CLI subcommand that turns the binary into a worker.
pub const WORKER_SUBCOMMAND: &str = "spawner-worker";

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// How to start the worker process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl WorkerCommand {
    /// This executable, re-invoked as a worker.
    pub fn current_exe() -> std::io::Result<Self> {
        Ok(Self {
            program: std::env::current_exe()?,
            args: vec![WORKER_SUBCOMMAND.to_string()],
        })
    }
}

type Reader = Box<dyn AsyncRead + Send + Unpin>;
type Writer = Box<dyn AsyncWrite + Send + Unpin>;

struct Channel {
    writer: Option<Writer>,
    lines: Lines<BufReader<Reader>>,
}

pub struct Spawner {
    handle: Handle,
    channel: Arc<Mutex<Channel>>,
    worker: std::sync::Mutex<Option<Child>>,
    next_id: AtomicU64,
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner")
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl Spawner {
    /// Start the worker process and connect to it.
    pub fn start(
        handle: Handle,
        worker: &WorkerCommand,
        console: &dyn ConsoleHost,
    ) -> Result<Self, ExecError> {
        let _rt = handle.enter();

        let mut cmd = tokio::process::Command::new(&worker.program);
        cmd.args(&worker.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::from(console.worker_stderr()));
        console.prepare(&mut cmd);

        let program = worker.program.display().to_string();
        let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
            program: program.clone(),
            source,
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ExecError::Channel("worker stdin was not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExecError::Channel("worker stdout was not captured".to_string()))?;

        info!(%program, pid = child.id(), "spawner worker started");

        let spawner = Self::from_channel(handle.clone(), stdout, stdin);
        *spawner.lock_worker() = Some(child);
        Ok(spawner)
    }

    /// Spawner over an existing duplex channel, with no worker process to
    /// manage.
    pub fn from_channel<R, W>(handle: Handle, reader: R, writer: W) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let reader: Reader = Box::new(reader);
        let writer: Writer = Box::new(writer);

        Self {
            handle,
            channel: Arc::new(Mutex::new(Channel {
                writer: Some(writer),
                lines: BufReader::new(reader).lines(),
            })),
            worker: std::sync::Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// Close the channel and wait for the worker to exit.
    ///
    /// The worker finishes on EOF; if it does not within a grace period it
    /// is killed.
    pub async fn shutdown(&self) -> Result<(), ExecError> {
        {
            let mut channel = self.channel.lock().await;
            if let Some(mut writer) = channel.writer.take() {
                if let Err(e) = writer.shutdown().await {
                    debug!(error = %e, "closing spawner channel");
                }
            }
        }

        let worker = self.lock_worker().take();
        let Some(mut child) = worker else {
            return Ok(());
        };

        match timeout(SHUTDOWN_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                info!(exit_code = status.code(), "spawner worker exited");
                Ok(())
            }
            Ok(Err(source)) => Err(ExecError::Wait {
                program: "spawner worker".to_string(),
                source,
            }),
            Err(_) => {
                warn!("spawner worker did not exit after channel close; killing it");
                child.kill().await.map_err(|source| ExecError::Wait {
                    program: "spawner worker".to_string(),
                    source,
                })
            }
        }
    }

    fn lock_worker(&self) -> std::sync::MutexGuard<'_, Option<Child>> {
        self.worker.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProcessExecutor for Spawner {
    fn execute(&self, request: CommandRequest) -> ProcessFuture {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let channel = Arc::clone(&self.channel);
        let (done, fut) = ProcessFuture::channel();

        debug!(id, argv = ?request.argv, "forwarding command to spawner worker");
        self.handle.spawn(async move {
            done.complete(exchange(&channel, id, request).await);
        });

        fut
    }
}

/// Send one request and wait for its response.
///
/// The channel stays locked for the whole exchange, so responses can never
/// be read by the wrong listener.
async fn exchange(channel: &Mutex<Channel>, id: u64, command: CommandRequest) -> ProcessResult {
    let mut channel = channel.lock().await;
    let line = protocol::encode(&WorkerRequest { id, command })?;

    let writer = channel
        .writer
        .as_mut()
        .ok_or_else(|| ExecError::Channel("spawner is closed".to_string()))?;
    writer
        .write_all(line.as_bytes())
        .await
        .map_err(|e| ExecError::Channel(e.to_string()))?;
    writer
        .flush()
        .await
        .map_err(|e| ExecError::Channel(e.to_string()))?;

    let reply = channel
        .lines
        .next_line()
        .await
        .map_err(|e| ExecError::Channel(e.to_string()))?
        .ok_or_else(|| ExecError::Channel("worker closed the channel".to_string()))?;

    let response: WorkerResponse = protocol::decode(&reply)?;
    if response.id != id {
        return Err(ExecError::Protocol(format!(
            "expected response to request {id}, got {}",
            response.id
        )));
    }

    match response.outcome {
        WorkerOutcome::Exited { code } => Ok(code),
        WorkerOutcome::Failed { message } => Err(ExecError::Worker(message)),
    }
}
