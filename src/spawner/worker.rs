// src/spawner/worker.rs

//! Worker side of the spawner.
//!
//! The worker is this same binary started with the hidden `spawner-worker`
//! subcommand. Requests arrive on stdin and responses leave on stdout, so
//! status lines and child output go to the worker's console: its own
//! window when it has one, otherwise its stderr.

use std::io::{self, BufRead, Write};
use std::process::Stdio;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::console::WorkerConsole;
use super::protocol::{decode, encode, WorkerOutcome, WorkerRequest, WorkerResponse};
use crate::exec::{format_cmd, CommandRequest, ExecError, OutputTarget};

/// Serve requests from `input` until it reaches EOF.
///
/// `run` executes one command synchronously and returns its exit code.
/// Status lines (`:: Idle`, `:: Starting ...`) go to `log`.
pub fn serve<R, W, L, F>(input: R, mut output: W, mut log: L, mut run: F) -> Result<()>
where
    R: BufRead,
    W: Write,
    L: Write,
    F: FnMut(&CommandRequest) -> std::result::Result<i32, ExecError>,
{
    let mut lines = input.lines();

    loop {
        writeln!(log, ":: Idle")?;
        log.flush()?;

        let line = match lines.next() {
            Some(line) => line.context("reading spawner request")?,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let request: WorkerRequest = decode(&line)?;
        writeln!(log, ":: Starting {}", format_cmd(&request.command.argv))?;
        log.flush()?;

        let outcome = match run(&request.command) {
            Ok(code) => WorkerOutcome::Exited { code },
            Err(e) => WorkerOutcome::Failed {
                message: e.to_string(),
            },
        };
        debug!(id = request.id, ?outcome, "worker finished request");

        let response = WorkerResponse {
            id: request.id,
            outcome,
        };
        output.write_all(encode(&response)?.as_bytes())?;
        output.flush()?;
    }

    info!("spawner channel closed; worker exiting");
    Ok(())
}

/// Entry point of the worker process.
pub fn serve_stdio() -> Result<()> {
    let console = WorkerConsole::attach();
    let target = console
        .output_target()
        .context("opening worker console for commands")?;
    let log = console.log().context("opening worker console for status lines")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(stdin.lock(), stdout.lock(), log, |request| {
        run_blocking(request, &target)
    })
}

/// Run a command to completion with its output sent to `target`.
pub fn run_blocking(
    request: &CommandRequest,
    target: &OutputTarget,
) -> std::result::Result<i32, ExecError> {
    let mut cmd = request.build(target)?;
    // The worker's stdin is the request channel.
    cmd.stdin(Stdio::null());

    let program = request.program().unwrap_or_default().to_string();
    let status = cmd.status().map_err(|source| ExecError::Spawn { program, source })?;
    Ok(status.code().unwrap_or(-1))
}
