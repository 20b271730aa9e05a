// src/report.rs

//! Human-readable report written during the verify and run passes.
//!
//! This is the user-facing output; `tracing` logs are diagnostics on top.
//! Everything goes through a [`Console`] so tests can capture it.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::style::{style, Color, Stylize};
use tracing::debug;

use crate::analysis::{ItemAnalysis, ItemStatus, JobAnalysis, JobStatus};
use crate::engine::{JobOutcome, RunSummary};
use crate::exec::format_cmd;

const RUN: Color = Color::Yellow;
const DONE: Color = Color::Green;
const ERROR: Color = Color::Red;
const INFO: Color = Color::Cyan;

/// Destination of the report.
///
/// `terminal` gates both colours and the progress animation.
pub struct Console {
    out: Box<dyn Write + Send>,
    terminal: bool,
}

impl Console {
    pub fn new(out: impl Write + Send + 'static, terminal: bool) -> Self {
        Self {
            out: Box::new(out),
            terminal,
        }
    }

    /// Report on stderr, coloured when stderr is a terminal.
    pub fn stderr() -> Self {
        let terminal = io::stderr().is_terminal();
        Self::new(io::stderr(), terminal)
    }

    /// Uncoloured console writing into a shared buffer.
    pub fn capture() -> (Self, Capture) {
        let capture = Capture::default();
        (Self::new(capture.clone(), false), capture)
    }

    pub fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{text}") {
            debug!(error = %e, "console write failed");
        }
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn paint(&self, text: impl Display, color: Color) -> String {
        if self.terminal {
            style(text.to_string()).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn writer(&mut self) -> &mut Box<dyn Write + Send> {
        &mut self.out
    }
}

/// Cloneable in-memory sink.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn job_color(status: JobStatus) -> Color {
    match status {
        JobStatus::Run => RUN,
        JobStatus::Done => DONE,
        JobStatus::Error => ERROR,
    }
}

fn item_color(status: ItemStatus) -> Color {
    match status {
        ItemStatus::Run | ItemStatus::Planned => RUN,
        ItemStatus::Done | ItemStatus::Available => DONE,
        ItemStatus::Error => ERROR,
    }
}

/// Classification of one job, as shown by the verify pass.
pub fn render_job(console: &mut Console, name: &str, analysis: &JobAnalysis) {
    let header = format!("Job {}", console.paint(name, job_color(analysis.status)));
    console.line(header);

    for input in &analysis.inputs {
        render_item(console, "Input", input);
    }
    for output in &analysis.outputs {
        render_item(console, "Output", output);
    }
}

fn render_item(console: &mut Console, kind: &str, item: &ItemAnalysis) {
    let title = console.paint(&item.title, item_color(item.status));
    let note = item.note.map(|n| n.to_string()).unwrap_or_default();
    console.line(format!("    {kind} {title}        {note}").trim_end());
}

pub fn render_skipped(console: &mut Console, index: usize, name: &str) {
    let line = format!("Skipping #{index} {}", console.paint(name, DONE));
    console.line(line);
    console.blank();
}

pub fn render_running(console: &mut Console, index: usize, name: &str) {
    let line = format!("Running #{index} {}", console.paint(name, INFO));
    console.line(line);
}

/// Result of a job that was considered for running.
pub fn render_outcome(console: &mut Console, outcome: &JobOutcome) {
    match outcome {
        JobOutcome::Skipped => return,
        JobOutcome::PredictedFailure => {
            let line = format!(
                "{} Job was predicted to fail if run.",
                console.paint("Failure.", ERROR)
            );
            console.line(line);
        }
        JobOutcome::CommandFailed { exit_code, argv } => {
            let line = format!("{} Job command failed.", console.paint("Failed.", ERROR));
            console.line(line);
            console.line(format!("    Exit code = {exit_code}"));
            console.line(format!("    Command   = {}", format_cmd(argv)));
        }
        JobOutcome::MissingOutputs { outputs } => {
            let line = format!(
                "{} Job did not produce all outputs",
                console.paint("Failed.", ERROR)
            );
            console.line(line);
            for check in outputs {
                let (color, label) = if check.present {
                    (DONE, "ok")
                } else {
                    (ERROR, "missing")
                };
                let line = format!("    {}  {label}", console.paint(&check.title, color));
                console.line(line);
            }
        }
        JobOutcome::Errored { message } => {
            let line = format!("{} Job could not be run.", console.paint("Failed.", ERROR));
            console.line(line);
            console.line(format!("    Error     = {message}"));
        }
        JobOutcome::Succeeded => {
            let line = console.paint("Success.", DONE);
            console.line(line);
        }
    }
    console.blank();
}

/// Totals printed at the end of the run pass.
pub fn render_summary(console: &mut Console, summary: &RunSummary) {
    console.line(format!("Finished running {} jobs.", summary.total()));

    if summary.skipped() > 0 {
        let line = format!("    {}{}", summary.skipped(), console.paint(" skipped", INFO));
        console.line(line);
    }
    if summary.not_run() > 0 {
        let line = format!(
            "    {}{} as predicted to fail",
            summary.not_run(),
            console.paint(" not run", ERROR)
        );
        console.line(line);
    }
    if summary.failed() > 0 {
        let line = format!("    {}{}", summary.failed(), console.paint(" failed", ERROR));
        console.line(line);
    }
    if summary.is_success() {
        let line = console.paint("Success.", DONE);
        console.line(line);
    }
    console.blank();
}

/// Compact duration: `120ms`, `1.4s`, `42s`, `3m 5s`, `25m`, `2h 10m`, `12h`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();

    if secs < 0.3 {
        return format!("{}ms", duration.as_millis());
    }
    if secs < 3.0 {
        return format!("{secs:.1}s");
    }

    let total = duration.as_secs();
    if total < 60 {
        return format!("{total}s");
    }

    let (m, s) = (total / 60, total % 60);
    if m < 10 {
        return format!("{m}m {s}s");
    }
    if m < 60 {
        return format!("{m}m");
    }

    let (h, m) = (m / 60, m % 60);
    if h < 10 {
        return format!("{h}h {m}m");
    }
    format!("{h}h")
}
