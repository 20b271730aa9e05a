// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::exec::{ExecOptions, IoOptions, ProgressOptions};
use crate::types::StdinMode;

/// Job file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// progress = true
/// command_prefix = ["cmd", "/c", "start", "/wait"]
///
/// [[job]]
/// name = "Running abc - 1"
/// inputs = ["d:/datasets/abc"]
/// outputs = ["d:/results/abc/1"]
/// cmd = [["python", "compute.py", "abc", "1"]]
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawJobsFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Jobs in registration order.
    #[serde(default)]
    pub job: Vec<JobConfig>,
}

/// `[config]` section: how commands are run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigSection {
    /// Animate the terminal while a command runs.
    #[serde(default = "default_progress")]
    pub progress: bool,

    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    #[serde(default = "default_progress_length")]
    pub progress_length: usize,

    /// Prepended to every command line.
    #[serde(default)]
    pub command_prefix: Vec<String>,

    #[serde(default)]
    pub stdin: StdinMode,

    /// Child stderr goes wherever its stdout goes.
    #[serde(default = "default_merge_stderr")]
    pub merge_stderr: bool,
}

fn default_progress() -> bool {
    true
}

fn default_progress_interval_ms() -> u64 {
    1000
}

fn default_progress_length() -> usize {
    5
}

fn default_merge_stderr() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            progress: default_progress(),
            progress_interval_ms: default_progress_interval_ms(),
            progress_length: default_progress_length(),
            command_prefix: Vec::new(),
            stdin: StdinMode::default(),
            merge_stderr: default_merge_stderr(),
        }
    }
}

impl ConfigSection {
    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            progress: ProgressOptions {
                enabled: self.progress,
                interval: Duration::from_millis(self.progress_interval_ms),
                length: self.progress_length,
            },
            io: IoOptions {
                stdin: self.stdin,
                merge_stderr: self.merge_stderr,
            },
            command_prefix: self.command_prefix.clone(),
        }
    }
}

/// One `[[job]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobConfig {
    /// Display name. Defaults to `job #<index>`.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub inputs: Vec<String>,

    #[serde(default)]
    pub outputs: Vec<String>,

    /// Commands run in order; each is a full argv.
    pub cmd: Vec<Vec<String>>,
}

/// A job file that passed validation.
#[derive(Debug, Clone)]
pub struct JobsFile {
    pub config: ConfigSection,
    pub job: Vec<JobConfig>,
}

impl JobsFile {
    pub(crate) fn new_unchecked(config: ConfigSection, job: Vec<JobConfig>) -> Self {
        Self { config, job }
    }
}
