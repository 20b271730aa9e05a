// src/lib.rs

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod job;
pub mod logging;
pub mod report;
pub mod spawner;
pub mod types;

use std::io::Write;

use crossterm::{cursor, QueueableCommand};
use tokio::runtime::{Handle, Runtime};
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::{load_and_validate, register_jobs, Settings};
use crate::engine::RunSummary;
use crate::errors::{JobqueueError, Result};
use crate::exec::ExecContext;
use crate::job::Registry;
use crate::report::Console;
use crate::spawner::{NewConsoleWindow, Spawner, WorkerCommand};

/// High-level entry point used by `main.rs`.
///
/// Returns `Ok(false)` when the run pass had failing jobs.
pub fn run(args: CliArgs) -> Result<bool> {
    if let Some(Command::SpawnerWorker) = args.command {
        spawner::worker::serve_stdio()?;
        return Ok(true);
    }

    let file = load_and_validate(&args.jobs)?;
    let mut registry = Registry::default();
    register_jobs(&file, &mut registry)?;

    let settings = Settings::from_parts(&args, &file.config);
    run_with(&settings, registry)
}

/// Verify `registry` and, if `settings.run`, execute it.
///
/// This is the entry point for programs that define their jobs in Rust
/// instead of a job file. It builds its own Tokio runtime, so it must not
/// be called from async code.
pub fn run_with(settings: &Settings, mut registry: Registry) -> Result<bool> {
    let runtime = Runtime::new()?;
    install_interrupt_handler(runtime.handle());

    let mut console = Console::stderr();
    let report = engine::verify(&mut registry, &mut console).into_result()?;
    debug!(planned = report.generated.len(), "verification passed");

    if !settings.run {
        info!("dry run; pass --run to execute jobs");
        return Ok(true);
    }

    let mut ctx = ExecContext::direct(runtime.handle().clone(), console, settings.exec.clone());
    let summary = if settings.window {
        run_in_window(&mut registry, &mut ctx)?
    } else {
        engine::run(&mut registry, &mut ctx)
    };

    Ok(summary.is_success())
}

fn run_in_window(registry: &mut Registry, ctx: &mut ExecContext) -> Result<RunSummary> {
    let worker = WorkerCommand::current_exe()?;
    let spawner = Spawner::start(ctx.handle().clone(), &worker, &NewConsoleWindow)
        .map_err(|e| JobqueueError::Spawner(e.to_string()))?;

    let mut scope = ctx.enter_spawner(spawner);
    let summary = engine::run(registry, &mut scope);
    scope
        .finish()
        .map_err(|e| JobqueueError::Spawner(e.to_string()))?;
    Ok(summary)
}

/// First Ctrl-C restores the cursor and exits with status 130.
fn install_interrupt_handler(handle: &Handle) {
    handle.spawn(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            return;
        }

        let mut err = std::io::stderr();
        let _ = err.queue(cursor::Show);
        let _ = writeln!(err, "\nInterrupted.");
        let _ = err.flush();
        std::process::exit(130);
    });
}
