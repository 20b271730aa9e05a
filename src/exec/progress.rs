// src/exec/progress.rs

//! Progress animation while waiting on a process.
//!
//! The reporter only observes the [`ProcessFuture`](super::ProcessFuture):
//! it polls it under a timeout and redraws one frame per interval.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use crossterm::{cursor, QueueableCommand};
use tokio::time::timeout;
use tracing::{debug, trace};

use super::backend::ProcessResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressOptions {
    pub enabled: bool,
    /// Poll timeout, and thus time per animation frame.
    pub interval: Duration,
    /// Width of the animation.
    pub length: usize,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: Duration::from_secs(1),
            length: 5,
        }
    }
}

/// One animation cycle: `".    "`, `"..   "`, ... up to `length` dots.
pub fn frames(length: usize) -> Vec<String> {
    (1..=length)
        .map(|dots| format!("{}{}", ".".repeat(dots), " ".repeat(length - dots)))
        .collect()
}

/// Await `future`, animating on `out` until it resolves.
///
/// The cursor is hidden for the duration and shown again afterwards; the
/// animation line is cleared before returning.
pub async fn wait_with_progress<F, W>(
    mut future: F,
    options: &ProgressOptions,
    out: &mut W,
) -> ProcessResult
where
    F: Future<Output = ProcessResult> + Unpin,
    W: Write,
{
    draw(out, |out| {
        out.queue(cursor::Hide)?;
        Ok(())
    });

    let mut cycle = frames(options.length).into_iter().cycle();
    let mut polls = 0usize;

    let result = loop {
        let frame = cycle.next().unwrap_or_default();
        draw(out, |out| {
            write!(out, "\r{frame}")?;
            out.flush()
        });

        polls += 1;
        match timeout(options.interval, &mut future).await {
            Ok(result) => break result,
            Err(_) => trace!(polls, "process still running"),
        }
    };

    let blank = " ".repeat(options.length.max(8));
    draw(out, |out| {
        out.queue(cursor::Show)?;
        write!(out, "\r{blank}\r")?;
        out.flush()
    });

    debug!(polls, "process finished while animating");
    result
}

// Terminal decoration must never fail a command.
fn draw<W: Write>(out: &mut W, f: impl FnOnce(&mut W) -> std::io::Result<()>) {
    if let Err(e) = f(out) {
        debug!(error = %e, "progress output failed");
    }
}
